use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::entities::dataset::{Record, Value};
use crate::domain::error::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Contains,
    DateStartsWith,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Contains => "contains",
            Operator::DateStartsWith => "datestartswith",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub column: String,
    pub operator: Operator,
    pub operand: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    #[serde(rename = "column_id")]
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// A validated page request. Construction rejects sizes below one, so the
/// pager never sees an empty window width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    index: usize,
    size: usize,
}

impl PageSpec {
    pub fn new(index: i64, size: i64) -> Result<Self, QueryError> {
        if size <= 0 {
            return Err(QueryError::InvalidPageSize(size));
        }
        if index < 0 {
            return Err(QueryError::InvalidPageIndex(index));
        }
        Ok(Self {
            index: index as usize,
            size: size as usize,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// Snapshot of the table widget: current page, sort headers and filter text.
/// Field names follow the table's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableState {
    pub page_current: i64,
    pub page_size: i64,
    #[serde(default)]
    pub sort_by: Vec<SortKey>,
    #[serde(default)]
    pub filter_query: String,
}

impl TableState {
    pub fn first_page(page_size: i64) -> Self {
        Self {
            page_current: 0,
            page_size,
            sort_by: Vec::new(),
            filter_query: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
    pub total_rows: usize,
    pub page_count: usize,
}
