use crate::domain::entities::query::PageSpec;

/// Returns the half-open window `[index * size, index * size + size)`,
/// clipped to `rows`. Pages past the end are empty.
pub fn page_window<T>(rows: &[T], page: PageSpec) -> &[T] {
    let start = page.index().saturating_mul(page.size());
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(page.size()).min(rows.len());
    &rows[start..end]
}

/// Number of pages needed to show `total_rows`; zero rows still has no pages.
pub fn page_count(total_rows: usize, page: PageSpec) -> usize {
    total_rows.div_ceil(page.size())
}
