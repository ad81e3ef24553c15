mod builders;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use builders::{customer_chart, for_table, month_chart, product_chart};

/// Logical raster size a rendering collaborator is expected to produce.
pub const RENDER_WIDTH_PX: u32 = 800;
pub const RENDER_HEIGHT_PX: u32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    GroupedBar,
    BarLineDualAxis
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Bar,
    Line
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Primary,
    Secondary
}

/// How a renderer should print the point labels of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelFormat {
    /// Rounded to an integer, e.g. `1250`.
    WholeNumber,
    /// Rounded to a whole percentage, e.g. `42%`.
    WholePercent
}

/// One plotted series of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub axis: Axis,
    /// One value per category, in category order.
    pub values: Vec<f64>,
    /// Hex color, e.g. `#2B3DD1`.
    pub color: String,
    pub labels: LabelFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_size: Option<f64>
}

/// Abstract description of one chart: series, axes and labels, but no
/// pixels. A rendering collaborator turns this into a raster image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Stable identifier, used as the handoff file name.
    pub slug: String,
    pub title: String,
    pub kind: ChartKind,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub primary_axis_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_axis_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_axis_suffix: Option<String>,
    pub dual_axis: bool,
    pub horizontal_legend: bool,
    pub centered_title: bool,
    /// Raster size the rendering collaborator is asked to produce.
    pub render_width_px: u32,
    pub render_height_px: u32
}

/// Failure of the external rendering collaborator.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("No rendered image is available for chart [{slug}]")]
    MissingImage {
        slug: String
    },
    #[error("Renderer failed for chart [{slug}]: {detail}")]
    RendererFailure {
        slug: String,
        detail: String
    }
}

impl ChartError {
    pub fn missing_image(spec: &ChartSpec) -> Self {
        Self::MissingImage {
            slug: spec.slug.clone()
        }
    }

    pub fn renderer_failure(spec: &ChartSpec, detail: impl Into<String>) -> Self {
        Self::RendererFailure {
            slug: spec.slug.clone(),
            detail: detail.into()
        }
    }
}

/// External capability that rasterizes a chart description.
///
/// The pipeline only ever sees the returned PNG bytes; keeping the engine
/// behind this seam means the aggregation and KPI logic is testable without
/// any rendering stack.
pub trait ChartRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<Vec<u8>, ChartError>;
}
