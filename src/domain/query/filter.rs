use std::cmp::Ordering;

use log::debug;

use crate::domain::entities::dataset::{Dataset, Value};
use crate::domain::entities::query::{FilterClause, Operator};

/// Narrows `rows` by each clause in turn. Clauses naming a column the dataset
/// does not have are skipped. Row order is preserved.
pub fn apply_filters(dataset: &Dataset, rows: Vec<usize>, clauses: &[FilterClause]) -> Vec<usize> {
    clauses
        .iter()
        .fold(rows, |rows, clause| apply_clause(dataset, rows, clause))
}

pub fn apply_clause(dataset: &Dataset, rows: Vec<usize>, clause: &FilterClause) -> Vec<usize> {
    let Some(col_idx) = dataset.column_index(&clause.column) else {
        debug!(
            "skipping filter on unknown column {:?} ({} {})",
            clause.column, clause.operator, clause.operand
        );
        return rows;
    };

    rows.into_iter()
        .filter(|&row| {
            dataset
                .value(row, col_idx)
                .is_some_and(|value| matches(value, clause.operator, &clause.operand))
        })
        .collect()
}

/// Evaluates one cell against an operand. Comparisons between a number and
/// text never match, except `ne` which always does.
pub fn matches(value: &Value, operator: Operator, operand: &Value) -> bool {
    match operator {
        Operator::Contains => value.to_string().contains(&operand.to_string()),
        Operator::DateStartsWith => value.to_string().starts_with(&operand.to_string()),
        Operator::Ne => compare(value, operand) != Some(Ordering::Equal),
        Operator::Eq => compare(value, operand) == Some(Ordering::Equal),
        Operator::Lt => compare(value, operand) == Some(Ordering::Less),
        Operator::Gt => compare(value, operand) == Some(Ordering::Greater),
        Operator::Le => matches!(
            compare(value, operand),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Operator::Ge => matches!(
            compare(value, operand),
            Some(Ordering::Greater | Ordering::Equal)
        ),
    }
}

fn compare(value: &Value, operand: &Value) -> Option<Ordering> {
    match (value, operand) {
        (Value::Number(left), Value::Number(right)) => left.partial_cmp(right),
        (Value::Text(left), Value::Text(right)) => Some(left.as_str().cmp(right.as_str())),
        _ => None,
    }
}
