use std::cmp::Ordering;

use crate::domain::entities::dataset::{Dataset, Value};
use crate::domain::entities::query::{SortDirection, SortKey};

/// Stable multi-key sort over row positions. Earlier keys take priority and
/// each key flips independently; blank cells go last in both directions.
pub fn sort_rows(dataset: &Dataset, rows: &mut [usize], keys: &[SortKey]) {
    if keys.is_empty() {
        return;
    }

    let resolved: Vec<(Option<usize>, SortDirection)> = keys
        .iter()
        .map(|key| (dataset.column_index(&key.column), key.direction))
        .collect();

    rows.sort_by(|&left, &right| {
        resolved
            .iter()
            .map(|(col_idx, direction)| match col_idx {
                Some(col_idx) => compare_cells(
                    dataset.value(left, *col_idx),
                    dataset.value(right, *col_idx),
                    *direction,
                ),
                None => Ordering::Equal,
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

fn compare_cells(left: Option<&Value>, right: Option<&Value>, direction: SortDirection) -> Ordering {
    let left_missing = left.is_none_or(Value::is_missing);
    let right_missing = right.is_none_or(Value::is_missing);

    match (left_missing, right_missing) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let (Some(left), Some(right)) = (left, right) else {
                return Ordering::Equal;
            };
            let ordering = left.total_cmp(right);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}
