use std::ops::Range;

use dioxus::prelude::*;
use log::warn;
use plotters::coord::Shift;
use plotters::prelude::{
    ChartBuilder, Circle, Color, DrawingArea, DrawingAreaErrorKind, DrawingBackend,
    IntoDrawingArea, IntoFont, LineSeries, RGBColor, Rectangle, SVGBackend, Text, TextStyle,
};
use thiserror::Error;

use crate::domain::entities::chart::{BubblePoint, ChartSeries, ChartSpec, Orientation};
use crate::ui::styles::chart_card_style;

const BACKGROUND: RGBColor = RGBColor(0x1e, 0x1e, 0x1e);
const LABEL: RGBColor = RGBColor(0xdd, 0xdd, 0xdd);
const AXIS: RGBColor = RGBColor(0x55, 0x55, 0x55);
const CELL_TEXT: RGBColor = RGBColor(0x00, 0x00, 0x00);
const BAR_FILL: RGBColor = RGBColor(0x7f, 0xdb, 0xff);
const LINE_STROKE: RGBColor = RGBColor(0x41, 0x69, 0xe1);
const MARKER_FILL: RGBColor = RGBColor(0xff, 0x00, 0x00);
const NO_DATA: RGBColor = RGBColor(0x80, 0x80, 0x80);

const BAR_HALF_WIDTH: f64 = 0.4;
const MAX_BUBBLE_RADIUS: f64 = 30.0;

#[derive(Debug, Error)]
#[error("failed to draw chart: {0}")]
pub struct RenderError(String);

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Self(err.to_string())
    }
}

/// Draws `spec` into a standalone SVG document.
pub fn render_svg(spec: &ChartSpec) -> Result<String, RenderError> {
    let mut svg = String::new();
    {
        let size = (spec.layout.width, spec.layout.height);
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&BACKGROUND)?;

        match &spec.series {
            ChartSeries::Bar {
                orientation: Orientation::Horizontal,
                categories,
                values,
            } => draw_horizontal_bars(&root, spec, categories, values)?,
            ChartSeries::Bar {
                orientation: Orientation::Vertical,
                categories,
                values,
            } => draw_vertical_bars(&root, spec, categories, values)?,
            ChartSeries::Line { x, y } => draw_line(&root, spec, x, y)?,
            ChartSeries::Heatmap { labels, matrix } => draw_heatmap(&root, spec, labels, matrix)?,
            ChartSeries::Bubble { points } => draw_bubbles(&root, spec, points)?,
        }

        root.present()?;
    }
    Ok(svg)
}

#[component]
pub fn Chart(spec: ChartSpec) -> Element {
    match render_svg(&spec) {
        Ok(svg) => rsx! {
            div { style: "{chart_card_style()}", dangerous_inner_html: "{svg}" }
        },
        Err(err) => {
            let message = format!("{}: {err}", spec.title);
            warn!("{message}");
            rsx! {
                div { style: "{chart_card_style()}", "{message}" }
            }
        }
    }
}

fn label_style() -> TextStyle<'static> {
    ("sans-serif", 11).into_font().color(&LABEL)
}

fn chart_builder<'a, 'b, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    spec: &ChartSpec,
) -> ChartBuilder<'a, 'b, DB> {
    let margin = spec.layout.margin;
    let mut builder = ChartBuilder::on(area);
    builder
        .caption(&spec.title, ("sans-serif", 16).into_font().color(&LABEL))
        .margin(margin.pad)
        .x_label_area_size(margin.b)
        .y_label_area_size(margin.l);
    builder
}

/// Axis range with one unit-wide band per category, centred on the index.
fn band_range(count: usize) -> Range<f64> {
    -0.5..(count.max(1) as f64 - 0.5)
}

/// Zero-based value axis up to a little above the largest finite value.
fn value_ceiling(values: &[f64]) -> f64 {
    let max = values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .fold(0.0_f64, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Range covering the finite `values`, widened by `pad` on both sides.
fn padded_span(values: impl Iterator<Item = f64>, pad: f64) -> Range<f64> {
    let bounds = values
        .filter(|value| value.is_finite())
        .fold(None, |range: Option<(f64, f64)>, value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        });
    match bounds {
        None => 0.0..1.0,
        Some((min, max)) => (min - pad)..(max + pad),
    }
}

/// Label for a tick at `position` on a band axis; ticks between bands are blank.
pub fn category_label(categories: &[String], position: f64) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    categories
        .get(rounded as usize)
        .cloned()
        .unwrap_or_default()
}

/// Diverging colour for a correlation in `[-1, 1]`: blue for negative,
/// red for positive. Missing values are grey.
pub fn heat_color(value: f64) -> RGBColor {
    if !value.is_finite() {
        return NO_DATA;
    }
    let clamped = value.clamp(-1.0, 1.0);
    let fade = (255.0 * (1.0 - clamped.abs())).round() as u8;
    if clamped >= 0.0 {
        RGBColor(255, fade, fade)
    } else {
        RGBColor(fade, fade, 255)
    }
}

/// Bubble radius proportional to the square root of `size`, so areas track
/// counts.
pub fn bubble_radius(size: f64, max_size: f64) -> f64 {
    if !size.is_finite() || size <= 0.0 || max_size <= 0.0 {
        return 0.0;
    }
    (size / max_size).sqrt() * MAX_BUBBLE_RADIUS
}

fn draw_horizontal_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    categories: &[String],
    values: &[f64],
) -> Result<(), RenderError> {
    let mut chart = chart_builder(area, spec)
        .build_cartesian_2d(0.0..value_ceiling(values), band_range(categories.len()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .y_labels(categories.len().max(1))
        .y_label_formatter(&|y| category_label(categories, *y))
        .label_style(label_style())
        .axis_style(&AXIS)
        .draw()?;

    chart.draw_series(
        values
            .iter()
            .enumerate()
            .filter(|(_, value)| value.is_finite())
            .map(|(idx, value)| {
                let center = idx as f64;
                Rectangle::new(
                    [(0.0, center - BAR_HALF_WIDTH), (*value, center + BAR_HALF_WIDTH)],
                    BAR_FILL.filled(),
                )
            }),
    )?;
    Ok(())
}

fn draw_vertical_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    categories: &[String],
    values: &[f64],
) -> Result<(), RenderError> {
    let mut chart = chart_builder(area, spec)
        .build_cartesian_2d(band_range(categories.len()), 0.0..value_ceiling(values))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(categories.len().max(1))
        .x_label_formatter(&|x| category_label(categories, *x))
        .label_style(label_style())
        .axis_style(&AXIS)
        .draw()?;

    chart.draw_series(
        values
            .iter()
            .enumerate()
            .filter(|(_, value)| value.is_finite())
            .map(|(idx, value)| {
                let center = idx as f64;
                Rectangle::new(
                    [(center - BAR_HALF_WIDTH, 0.0), (center + BAR_HALF_WIDTH, *value)],
                    BAR_FILL.filled(),
                )
            }),
    )?;
    Ok(())
}

/// Finite values paired with their own position, so a gap leaves the
/// following points under their labels.
pub fn line_points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_finite())
        .map(|(idx, value)| (idx as f64, *value))
        .collect()
}

fn draw_line<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    labels: &[String],
    values: &[f64],
) -> Result<(), RenderError> {
    let points = line_points(values);
    let span = padded_span(points.iter().map(|(_, y)| *y), 1.0);

    let mut chart =
        chart_builder(area, spec).build_cartesian_2d(band_range(values.len()), span)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|x| category_label(labels, *x))
        .label_style(label_style())
        .axis_style(&AXIS)
        .draw()?;

    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        LINE_STROKE.stroke_width(2),
    ))?;
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, 4, MARKER_FILL.filled())),
    )?;
    Ok(())
}

fn draw_heatmap<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    labels: &[String],
    matrix: &[Vec<f64>],
) -> Result<(), RenderError> {
    let count = labels.len();
    // first row at the top
    let row_labels: Vec<String> = labels.iter().rev().cloned().collect();
    let row_center = |row: usize| count.saturating_sub(row + 1) as f64;

    let mut chart =
        chart_builder(area, spec).build_cartesian_2d(band_range(count), band_range(count))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(count.max(1))
        .y_labels(count.max(1))
        .x_label_formatter(&|x| category_label(labels, *x))
        .y_label_formatter(&|y| category_label(&row_labels, *y))
        .label_style(label_style())
        .axis_style(&AXIS)
        .draw()?;

    let cells = matrix.iter().enumerate().flat_map(|(row, values)| {
        values
            .iter()
            .enumerate()
            .map(move |(col, value)| (col as f64, row_center(row), *value))
    });

    chart.draw_series(cells.clone().map(|(x, y, value)| {
        Rectangle::new(
            [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
            heat_color(value).filled(),
        )
    }))?;
    chart.draw_series(
        cells
            .filter(|(_, _, value)| value.is_finite())
            .map(|(x, y, value)| {
                Text::new(
                    format!("{value:.2}"),
                    (x - 0.15, y),
                    ("sans-serif", 10).into_font().color(&CELL_TEXT),
                )
            }),
    )?;
    Ok(())
}

fn draw_bubbles<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    points: &[BubblePoint],
) -> Result<(), RenderError> {
    let x_span = padded_span(points.iter().map(|point| point.x), 0.5);
    let y_span = padded_span(points.iter().map(|point| point.y), 0.5);
    let max_size = points.iter().map(|point| point.size).fold(0.0_f64, f64::max);

    let mut chart = chart_builder(area, spec).build_cartesian_2d(x_span, y_span)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("bathrooms")
        .y_desc("bedrooms")
        .label_style(label_style())
        .axis_style(&AXIS)
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .filter(|point| point.x.is_finite() && point.y.is_finite())
            .map(|point| {
                let radius = bubble_radius(point.size, max_size).round() as i32;
                Circle::new((point.x, point.y), radius, BAR_FILL.mix(0.5).filled())
            }),
    )?;
    Ok(())
}
