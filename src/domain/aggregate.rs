//! Grouped statistics over the listings, computed once at load time and fed
//! to the charts.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use log::warn;

use crate::domain::entities::dataset::{Dataset, Value};

pub const NEIGHBORHOOD: &str = "neighborhood";
pub const MONTHLY_RENT: &str = "monthly_rent";
pub const PRICE_PER_SQUARE_METER: &str = "price_per_square_meter";
pub const MONTH: &str = "month";
pub const BATHROOMS: &str = "bathrooms";
pub const BEDROOMS: &str = "bedrooms";
pub const CORRELATION_COLUMNS: [&str; 5] =
    ["monthly_rent", "sq_meters", "bedrooms", "bathrooms", "floor"];

#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodAverage {
    pub neighborhood: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyCount {
    pub month: String,
    pub listings: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationCount {
    pub neighborhood: String,
    pub bathrooms: f64,
    pub bedrooms: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub avg_rent: Vec<NeighborhoodAverage>,
    pub avg_price_per_sqm: Vec<NeighborhoodAverage>,
    pub monthly_growth: Vec<MonthlyCount>,
    pub correlation: CorrelationMatrix,
    pub configurations: Vec<ConfigurationCount>,
    /// Distinct neighborhoods in order of first appearance.
    pub neighborhoods: Vec<String>,
}

impl Aggregates {
    pub fn compute(dataset: &Dataset) -> Self {
        Self {
            avg_rent: neighborhood_means(dataset, MONTHLY_RENT),
            avg_price_per_sqm: neighborhood_means(dataset, PRICE_PER_SQUARE_METER),
            monthly_growth: monthly_growth(dataset),
            correlation: correlation_matrix(dataset, &CORRELATION_COLUMNS),
            configurations: configuration_counts(dataset),
            neighborhoods: distinct_neighborhoods(dataset),
        }
    }
}

fn require_column(dataset: &Dataset, column: &str, purpose: &str) -> Option<usize> {
    let col_idx = dataset.column_index(column);
    if col_idx.is_none() {
        warn!("dataset has no {column:?} column; {purpose} will be empty");
    }
    col_idx
}

/// Non-blank grouping key at `row`. Rows with a blank key are left out of
/// every grouped statistic.
fn group_key(dataset: &Dataset, row: usize, col_idx: usize) -> Option<&Value> {
    dataset
        .value(row, col_idx)
        .filter(|value| !value.is_missing())
}

/// Mean of `column` per neighborhood, rounded to cents, neighborhoods sorted.
pub fn neighborhood_means(dataset: &Dataset, column: &str) -> Vec<NeighborhoodAverage> {
    let purpose = format!("average {column} per neighborhood");
    let (Some(group_idx), Some(value_idx)) = (
        require_column(dataset, NEIGHBORHOOD, &purpose),
        require_column(dataset, column, &purpose),
    ) else {
        return Vec::new();
    };

    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for row in 0..dataset.len() {
        let Some(group) = group_key(dataset, row, group_idx) else {
            continue;
        };
        let entry = sums.entry(group.to_string()).or_insert((0.0, 0));
        if let Some(value) = dataset
            .value(row, value_idx)
            .and_then(Value::as_number)
            .filter(|value| !value.is_nan())
        {
            entry.0 += value;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(neighborhood, (sum, count))| NeighborhoodAverage {
            neighborhood,
            value: if count == 0 {
                f64::NAN
            } else {
                round_cents(sum / count as f64)
            },
        })
        .collect()
}

/// Listings per month, latest month first.
pub fn monthly_growth(dataset: &Dataset) -> Vec<MonthlyCount> {
    let Some(month_idx) = require_column(dataset, MONTH, "monthly growth") else {
        return Vec::new();
    };

    let mut counts: BTreeMap<String, (Value, usize)> = BTreeMap::new();
    for value in (0..dataset.len()).filter_map(|row| group_key(dataset, row, month_idx)) {
        counts
            .entry(value.to_string())
            .or_insert_with(|| (value.clone(), 0))
            .1 += 1;
    }

    let mut counts: Vec<(Value, usize)> = counts.into_values().collect();
    counts.sort_by(|(left, _), (right, _)| right.total_cmp(left));

    counts
        .into_iter()
        .map(|(month, listings)| MonthlyCount {
            month: month.to_string(),
            listings,
        })
        .collect()
}

/// Pearson correlation over pairwise-complete numeric observations. Columns
/// the dataset lacks are left out; undefined coefficients are NaN.
pub fn correlation_matrix(dataset: &Dataset, columns: &[&str]) -> CorrelationMatrix {
    let present: Vec<(String, usize)> = columns
        .iter()
        .filter_map(|column| {
            require_column(dataset, column, "correlation matrix")
                .map(|idx| (column.to_string(), idx))
        })
        .collect();

    let series: Vec<Vec<Option<f64>>> = present
        .iter()
        .map(|(_, col_idx)| {
            (0..dataset.len())
                .map(|row| {
                    dataset
                        .value(row, *col_idx)
                        .and_then(Value::as_number)
                        .filter(|value| !value.is_nan())
                })
                .collect()
        })
        .collect();

    let values = series
        .iter()
        .map(|left| series.iter().map(|right| pearson(left, right)).collect())
        .collect();

    CorrelationMatrix {
        columns: present.into_iter().map(|(name, _)| name).collect(),
        values,
    }
}

fn pearson(left: &[Option<f64>], right: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = left
        .iter()
        .zip(right)
        .filter_map(|(l, r)| Some(((*l)?, (*r)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_l = pairs.iter().map(|(l, _)| l).sum::<f64>() / n;
    let mean_r = pairs.iter().map(|(_, r)| r).sum::<f64>() / n;
    let (mut cov, mut var_l, mut var_r) = (0.0, 0.0, 0.0);
    for (l, r) in &pairs {
        cov += (l - mean_l) * (r - mean_r);
        var_l += (l - mean_l).powi(2);
        var_r += (r - mean_r).powi(2);
    }

    let denominator = (var_l * var_r).sqrt();
    if denominator == 0.0 {
        f64::NAN
    } else {
        (cov / denominator).clamp(-1.0, 1.0)
    }
}

/// How often each (neighborhood, bathrooms, bedrooms) combination occurs.
/// Rows with a missing key are not counted.
pub fn configuration_counts(dataset: &Dataset) -> Vec<ConfigurationCount> {
    let purpose = "configuration counts";
    let (Some(group_idx), Some(bath_idx), Some(bed_idx)) = (
        require_column(dataset, NEIGHBORHOOD, purpose),
        require_column(dataset, BATHROOMS, purpose),
        require_column(dataset, BEDROOMS, purpose),
    ) else {
        return Vec::new();
    };

    // f64 keys are grouped by bit pattern; `+ 0.0` folds -0.0 into 0.0
    let mut groups: BTreeMap<(String, u64, u64), ConfigurationCount> = BTreeMap::new();
    for row in 0..dataset.len() {
        let number_at = |col_idx| {
            dataset
                .value(row, col_idx)
                .and_then(Value::as_number)
                .filter(|value: &f64| !value.is_nan())
        };
        let (Some(neighborhood), Some(bathrooms), Some(bedrooms)) = (
            group_key(dataset, row, group_idx).map(Value::to_string),
            number_at(bath_idx),
            number_at(bed_idx),
        ) else {
            continue;
        };

        let key = (
            neighborhood.clone(),
            (bathrooms + 0.0).to_bits(),
            (bedrooms + 0.0).to_bits(),
        );
        groups
            .entry(key)
            .or_insert_with(|| ConfigurationCount {
                neighborhood,
                bathrooms,
                bedrooms,
                count: 0,
            })
            .count += 1;
    }

    let mut counts: Vec<ConfigurationCount> = groups.into_values().collect();
    counts.sort_by(|left, right| {
        left.neighborhood
            .cmp(&right.neighborhood)
            .then(left.bathrooms.partial_cmp(&right.bathrooms).unwrap_or(Ordering::Equal))
            .then(left.bedrooms.partial_cmp(&right.bedrooms).unwrap_or(Ordering::Equal))
    });
    counts
}

pub fn distinct_neighborhoods(dataset: &Dataset) -> Vec<String> {
    let Some(group_idx) = require_column(dataset, NEIGHBORHOOD, "neighborhood selector") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for row in 0..dataset.len() {
        if let Some(name) = group_key(dataset, row, group_idx).map(Value::to_string) {
            if seen.insert(name.clone()) {
                ordered.push(name);
            }
        }
    }
    ordered
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
