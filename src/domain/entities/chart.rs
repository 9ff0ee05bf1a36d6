use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
    pub pad: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            l: 50,
            r: 50,
            b: 50,
            t: 50,
            pad: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
}

impl Layout {
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            margin: Margin::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubblePoint {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSeries {
    Bar {
        orientation: Orientation,
        categories: Vec<String>,
        values: Vec<f64>,
    },
    Line {
        x: Vec<String>,
        y: Vec<f64>,
    },
    Heatmap {
        labels: Vec<String>,
        matrix: Vec<Vec<f64>>,
    },
    Bubble {
        points: Vec<BubblePoint>,
    },
}

/// Everything a renderer needs for one figure. Opaque to the query engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub series: ChartSeries,
    pub layout: Layout,
}
