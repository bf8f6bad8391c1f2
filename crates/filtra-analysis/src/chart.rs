//! Chart.js-shaped export of response series.
//!
//! Each series becomes `{labels, datasets: [{label, data, type, fill}]}`
//! after downsampling, keyed by `filter_<response name>`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::downsample::downsample;
use crate::series::{PlotType, ResponseBundle, ResponseSeries};

/// Label used when a series has no title.
pub const DEFAULT_LABEL: &str = "Plot";

/// One dataset of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Legend label, the series title or [`DEFAULT_LABEL`].
    pub label: String,
    /// Y values, one per chart label.
    pub data: Vec<f64>,
    /// Chart type, serialized as `type`.
    #[serde(rename = "type")]
    pub plot_type: PlotType,
    /// Whether the area under the line is filled.
    pub fill: bool,
}

/// Chart payload for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// X values shared by every dataset.
    pub labels: Vec<f64>,
    /// Datasets drawn against `labels`.
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// Converts a series as-is, without reducing it.
    pub fn from_series(series: &ResponseSeries) -> Self {
        let label = if series.title.is_empty() {
            DEFAULT_LABEL.to_string()
        } else {
            series.title.clone()
        };
        Self {
            labels: series.x_axis.clone(),
            datasets: vec![Dataset {
                label,
                data: series.y_axis.clone(),
                plot_type: series.plot_type,
                fill: series.plot_type == PlotType::Area,
            }],
        }
    }
}

/// Chart payloads keyed by `filter_frequency_response` and friends.
pub type ChartBundle = BTreeMap<String, ChartData>;

/// Downsamples every series in `bundle` to `max_points` and converts it.
pub fn export(bundle: &ResponseBundle, max_points: usize) -> ChartBundle {
    bundle
        .iter()
        .map(|(name, series)| {
            let reduced = downsample(series, max_points);
            (name.chart_key().to_string(), ChartData::from_series(&reduced))
        })
        .collect()
}
