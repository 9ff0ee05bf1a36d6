//! The table query engine: clause parsing, conjunctive filtering, multi-key
//! sorting and page slicing over row positions of a shared [`Dataset`].
//!
//! [`Dataset`]: crate::domain::entities::dataset::Dataset

pub mod filter;
pub mod pager;
pub mod parser;
pub mod sort;
