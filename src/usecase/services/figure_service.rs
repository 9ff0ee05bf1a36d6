use std::sync::Arc;

use crate::domain::aggregate::{Aggregates, NeighborhoodAverage};
use crate::domain::entities::chart::{BubblePoint, ChartSeries, ChartSpec, Layout, Orientation};
use crate::domain::entities::dataset::format_number;

/// The two neighborhood charts that follow the neighborhood selection.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodFigures {
    pub avg_rent: ChartSpec,
    pub price_per_sqm: ChartSpec,
}

/// Builds chart specifications from the precomputed aggregates.
#[derive(Clone)]
pub struct FigureService {
    aggregates: Arc<Aggregates>,
}

impl FigureService {
    pub fn new(aggregates: Arc<Aggregates>) -> Self {
        Self { aggregates }
    }

    pub fn neighborhoods(&self) -> &[String] {
        &self.aggregates.neighborhoods
    }

    /// Rebuilds the neighborhood charts for `selected`; an empty selection
    /// shows every neighborhood.
    pub fn refresh(&self, selected: &[String]) -> NeighborhoodFigures {
        let avg_rent = select(&self.aggregates.avg_rent, selected);
        let price_per_sqm = select(&self.aggregates.avg_price_per_sqm, selected);

        NeighborhoodFigures {
            avg_rent: bar_chart(
                "Neighborhood Performance, Average selling price per neighborhood",
                Orientation::Horizontal,
                &avg_rent,
                Layout::sized(600, 500),
            ),
            price_per_sqm: bar_chart(
                "Price per Square Meter",
                Orientation::Vertical,
                &price_per_sqm,
                Layout::sized(700, 500),
            ),
        }
    }

    pub fn monthly_growth(&self) -> ChartSpec {
        let (x, y): (Vec<String>, Vec<f64>) = self
            .aggregates
            .monthly_growth
            .iter()
            .map(|entry| (entry.month.clone(), entry.listings as f64))
            .unzip();
        ChartSpec {
            title: "Monthly growth of numbers of apartments added".to_string(),
            series: ChartSeries::Line { x, y },
            layout: Layout::sized(600, 300),
        }
    }

    pub fn correlation(&self) -> ChartSpec {
        let matrix = &self.aggregates.correlation;
        ChartSpec {
            title: "Correlation Heatmap".to_string(),
            series: ChartSeries::Heatmap {
                labels: matrix.columns.clone(),
                matrix: matrix.values.clone(),
            },
            layout: Layout::sized(600, 400),
        }
    }

    pub fn configurations(&self) -> ChartSpec {
        let points = self
            .aggregates
            .configurations
            .iter()
            .map(|entry| BubblePoint {
                x: entry.bathrooms,
                y: entry.bedrooms,
                size: entry.count as f64,
                label: format!(
                    "{}: {} bath / {} bed x{}",
                    entry.neighborhood,
                    format_number(entry.bathrooms),
                    format_number(entry.bedrooms),
                    entry.count
                ),
            })
            .collect();
        ChartSpec {
            title: "Most Common Bathroom and Bedroom Configurations".to_string(),
            series: ChartSeries::Bubble { points },
            layout: Layout::sized(700, 400),
        }
    }
}

fn select<'a>(
    averages: &'a [NeighborhoodAverage],
    selected: &[String],
) -> Vec<&'a NeighborhoodAverage> {
    averages
        .iter()
        .filter(|entry| selected.is_empty() || selected.contains(&entry.neighborhood))
        .collect()
}

fn bar_chart(
    title: &str,
    orientation: Orientation,
    averages: &[&NeighborhoodAverage],
    layout: Layout,
) -> ChartSpec {
    ChartSpec {
        title: title.to_string(),
        series: ChartSeries::Bar {
            orientation,
            categories: averages
                .iter()
                .map(|entry| entry.neighborhood.clone())
                .collect(),
            values: averages.iter().map(|entry| entry.value).collect(),
        },
        layout,
    }
}
