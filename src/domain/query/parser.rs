use crate::domain::entities::dataset::Value;
use crate::domain::entities::query::{FilterClause, Operator};

/// Separator between clauses in a filter query string.
pub const CLAUSE_DELIMITER: &str = " && ";

/// Operator tokens in match priority. A clause is split at the first token of
/// the first group found anywhere in it, so this order must not change: `"ge "`
/// has to win over `"="` and the symbolic forms over their prefixes.
const OPERATORS: [(Operator, &[&str]); 8] = [
    (Operator::Ge, &["ge ", ">="]),
    (Operator::Le, &["le ", "<="]),
    (Operator::Lt, &["lt ", "<"]),
    (Operator::Gt, &["gt ", ">"]),
    (Operator::Ne, &["ne ", "!="]),
    (Operator::Eq, &["eq ", "="]),
    (Operator::Contains, &["contains "]),
    (Operator::DateStartsWith, &["datestartswith "]),
];

const QUOTES: [char; 3] = ['\'', '"', '`'];

/// Parses one clause such as `{bedrooms} ge 2`. Returns `None` when no
/// operator token is present or the operand is empty; callers skip those.
pub fn parse_clause(clause: &str) -> Option<FilterClause> {
    for (operator, tokens) in OPERATORS {
        for token in tokens {
            if let Some((name_part, value_part)) = clause.split_once(token) {
                let operand = parse_operand(value_part)?;
                return Some(FilterClause {
                    column: column_name(name_part),
                    operator,
                    operand,
                });
            }
        }
    }
    None
}

/// Splits a filter query on [`CLAUSE_DELIMITER`] and keeps the clauses that parse.
pub fn parse_query(query: &str) -> Vec<FilterClause> {
    query.split(CLAUSE_DELIMITER).filter_map(parse_clause).collect()
}

fn column_name(name_part: &str) -> String {
    let start = name_part.find('{').map(|idx| idx + 1);
    let end = name_part.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start <= end => name_part[start..end].to_string(),
        (Some(_), Some(_)) => String::new(),
        _ => name_part.trim().to_string(),
    }
}

fn parse_operand(value_part: &str) -> Option<Value> {
    let value = value_part.trim();
    let first = value.chars().next()?;

    if QUOTES.contains(&first) && value.ends_with(first) {
        let inner = if value.len() > first.len_utf8() {
            &value[first.len_utf8()..value.len() - first.len_utf8()]
        } else {
            ""
        };
        let escaped = format!("\\{first}");
        return Some(Value::Text(inner.replace(&escaped, &first.to_string())));
    }

    match value.parse::<f64>() {
        Ok(number) => Some(Value::Number(number)),
        Err(_) => Some(Value::Text(value.to_string())),
    }
}
