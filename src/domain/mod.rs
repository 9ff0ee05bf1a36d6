pub mod aggregate;
pub mod entities;
pub mod error;
pub mod query;
