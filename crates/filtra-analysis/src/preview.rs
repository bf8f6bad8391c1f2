//! Waveform preview images.
//!
//! The first channel is normalized to a peak of 1, reduced with the
//! peak-preserving downsampler and drawn as a line into an RGB bitmap,
//! which is PNG-encoded and returned as base64 text.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use plotters::prelude::*;
use thiserror::Error;

use crate::downsample::downsample;
use crate::series::ResponseSeries;

/// Errors from rendering a preview.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Width or height is zero.
    #[error("invalid preview size {width}x{height}")]
    InvalidSize {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// The plotting backend failed.
    #[error("failed to draw waveform: {0}")]
    Render(String),

    /// PNG encoding failed.
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Image size for a rendered preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 400,
        }
    }
}

/// Samples scaled by their peak magnitude, against time in seconds.
///
/// A silent signal stays at zero.
pub fn normalized_waveform(samples: &[f64], sample_rate: u32) -> ResponseSeries {
    let peak = samples
        .iter()
        .filter(|s| s.is_finite())
        .fold(0.0_f64, |acc, s| acc.max(s.abs()));
    let scale = if peak > 0.0 { 1.0 / peak } else { 0.0 };
    let rate = f64::from(sample_rate);

    ResponseSeries::line(
        (0..samples.len()).map(|i| i as f64 / rate).collect(),
        samples.iter().map(|s| s * scale).collect(),
        "Time [seconds]",
        "Amplitude [normalized]",
        "Normalized Waveform",
    )
}

/// Draws `series` as a line plot and returns the PNG bytes.
///
/// The y range is fixed to `[-1.05, 1.05]`, matching [`normalized_waveform`].
pub fn render_png(series: &ResponseSeries, options: PreviewOptions) -> Result<Vec<u8>, PreviewError> {
    let PreviewOptions { width, height } = options;
    if width == 0 || height == 0 {
        return Err(PreviewError::InvalidSize { width, height });
    }

    // Two points per horizontal pixel is all a line plot can show.
    let reduced = downsample(series, 2 * width as usize);
    let x_end = reduced
        .x_axis
        .last()
        .copied()
        .filter(|x| *x > 0.0)
        .unwrap_or(1.0);

    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(8)
            .build_cartesian_2d(0.0..x_end, -1.05..1.05)
            .map_err(render_error)?;

        chart
            .draw_series(LineSeries::new([(0.0, 0.0), (x_end, 0.0)], &BLACK.mix(0.2)))
            .map_err(render_error)?;
        chart
            .draw_series(LineSeries::new(
                reduced.points().filter(|(_, y)| y.is_finite()),
                &BLUE,
            ))
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
    }

    let mut encoded = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut encoded, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&pixels)?;
        writer.finish()?;
    }
    Ok(encoded)
}

/// Normalized waveform preview of `samples` as base64-encoded PNG.
pub fn waveform_png_base64(
    samples: &[f64],
    sample_rate: u32,
    options: PreviewOptions,
) -> Result<String, PreviewError> {
    let png = render_png(&normalized_waveform(samples, sample_rate), options)?;
    Ok(STANDARD.encode(png))
}

fn render_error(err: impl std::fmt::Display) -> PreviewError {
    PreviewError::Render(err.to_string())
}
