pub mod figure_service;
pub mod query_service;
