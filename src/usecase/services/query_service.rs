use std::sync::Arc;

use log::debug;

use crate::domain::entities::dataset::Dataset;
use crate::domain::entities::query::{PageResult, PageSpec, SortDirection, SortKey, TableState};
use crate::domain::error::QueryError;
use crate::domain::query::filter::apply_filters;
use crate::domain::query::pager::{page_count, page_window};
use crate::domain::query::parser::parse_query;
use crate::domain::query::sort::sort_rows;

/// Runs the table pipeline (parse, filter, sort, page) against the shared
/// dataset. Nothing is cached between calls.
#[derive(Clone)]
pub struct QueryService {
    dataset: Arc<Dataset>,
}

impl QueryService {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn render_page(&self, state: &TableState) -> Result<PageResult, QueryError> {
        let page = PageSpec::new(state.page_current, state.page_size)?;
        let dataset = self.dataset.as_ref();

        let clauses = parse_query(&state.filter_query);
        let mut rows = apply_filters(dataset, dataset.row_ids(), &clauses);
        if !state.sort_by.is_empty() {
            sort_rows(dataset, &mut rows, &state.sort_by);
        }

        let window = page_window(&rows, page);
        debug!(
            "query {:?}: {} clauses, {} sort keys, {} of {} rows matched, page {} has {} rows",
            state.filter_query,
            clauses.len(),
            state.sort_by.len(),
            rows.len(),
            dataset.len(),
            page.index(),
            window.len()
        );

        Ok(PageResult {
            columns: dataset.sorted_columns(),
            rows: window.iter().map(|&row| dataset.record(row)).collect(),
            total_rows: rows.len(),
            page_count: page_count(rows.len(), page),
        })
    }
}

/// Header click on a multi-sort table: a new column is appended ascending,
/// an ascending key turns descending, a descending key is removed.
pub fn toggle_sort(sort_by: &[SortKey], column: &str) -> Vec<SortKey> {
    let mut next = sort_by.to_vec();
    match next.iter().position(|key| key.column == column) {
        None => next.push(SortKey::asc(column)),
        Some(idx) => match next[idx].direction {
            SortDirection::Asc => next[idx].direction = SortDirection::Desc,
            SortDirection::Desc => {
                next.remove(idx);
            }
        },
    }
    next
}
