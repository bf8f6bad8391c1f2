//! Labelled x/y series and the bundle they are collected into.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How a series should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotType {
    /// Connected line (default)
    #[default]
    Line,
    /// Vertical bars
    Bar,
    /// Line with the area below it filled
    Area,
    /// Unconnected points
    Scatter,
}

/// One plottable series with axis labels and a title.
///
/// `x_axis` and `y_axis` always have the same length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseSeries {
    /// Horizontal coordinates (Hz or seconds).
    pub x_axis: Vec<f64>,
    /// Vertical coordinates.
    pub y_axis: Vec<f64>,
    /// Horizontal axis label.
    pub x_label: String,
    /// Vertical axis label.
    pub y_label: String,
    /// Plot title.
    pub title: String,
    /// How the series should be drawn.
    pub plot_type: PlotType,
}

impl ResponseSeries {
    /// Builds a line series from paired axes.
    ///
    /// # Panics
    ///
    /// Panics if the axes differ in length.
    pub fn line(
        x_axis: Vec<f64>,
        y_axis: Vec<f64>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        assert_eq!(
            x_axis.len(),
            y_axis.len(),
            "series axes must have equal length"
        );
        Self {
            x_axis,
            y_axis,
            x_label: x_label.into(),
            y_label: y_label.into(),
            title: title.into(),
            plot_type: PlotType::Line,
        }
    }

    /// Changes how the series is drawn.
    pub fn with_plot_type(mut self, plot_type: PlotType) -> Self {
        self.plot_type = plot_type;
        self
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.y_axis.len()
    }

    /// True when the series has no points.
    pub fn is_empty(&self) -> bool {
        self.y_axis.is_empty()
    }

    /// Iterates `(x, y)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x_axis.iter().copied().zip(self.y_axis.iter().copied())
    }
}

/// Names of the series an analysis run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseName {
    /// Magnitude against frequency
    FrequencyResponse,
    /// Filter output for a unit impulse
    ImpulseResponse,
    /// Filtered signal against time
    TimeDomainResponse,
}

impl ResponseName {
    /// All names, in display order.
    pub const ALL: [ResponseName; 3] = [
        ResponseName::FrequencyResponse,
        ResponseName::ImpulseResponse,
        ResponseName::TimeDomainResponse,
    ];

    /// Key used inside a [`ResponseBundle`].
    pub fn key(self) -> &'static str {
        match self {
            ResponseName::FrequencyResponse => "frequency_response",
            ResponseName::ImpulseResponse => "impulse_response",
            ResponseName::TimeDomainResponse => "time_domain_response",
        }
    }

    /// Key used in exported chart data.
    pub fn chart_key(self) -> &'static str {
        match self {
            ResponseName::FrequencyResponse => "filter_frequency_response",
            ResponseName::ImpulseResponse => "filter_impulse_response",
            ResponseName::TimeDomainResponse => "filter_time_domain_response",
        }
    }
}

impl std::fmt::Display for ResponseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Named response series, filled in incrementally.
///
/// Merging replaces only the entries present in the incoming bundle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseBundle {
    entries: BTreeMap<ResponseName, ResponseSeries>,
}

impl ResponseBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `series` under `name`, returning the series it replaced.
    pub fn insert(&mut self, name: ResponseName, series: ResponseSeries) -> Option<ResponseSeries> {
        self.entries.insert(name, series)
    }

    /// The series stored under `name`.
    pub fn get(&self, name: ResponseName) -> Option<&ResponseSeries> {
        self.entries.get(&name)
    }

    /// True when a series is stored under `name`.
    pub fn contains(&self, name: ResponseName) -> bool {
        self.entries.contains_key(&name)
    }

    /// Overwrites the entries named in `other`, keeping everything else.
    pub fn merge(&mut self, other: ResponseBundle) {
        self.entries.extend(other.entries);
    }

    /// Iterates entries in [`ResponseName`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ResponseName, &ResponseSeries)> {
        self.entries.iter().map(|(name, series)| (*name, series))
    }

    /// Number of stored series.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no series has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
