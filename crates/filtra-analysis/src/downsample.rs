//! Peak-preserving point reduction.
//!
//! Long series are split into contiguous buckets and each bucket is reduced
//! to its minimum and maximum points, so transients survive the reduction.

use crate::series::ResponseSeries;

/// Reduces `series` to at most `max_points` points.
///
/// Series that already fit are returned unchanged. Otherwise the series is
/// cut into at most `max_points / 2` buckets of `ceil(len / (max_points / 2))`
/// points and every bucket contributes its min and max point, in their
/// original order. When one point is both the min and the max it is emitted
/// twice. NaN values are skipped; an all-NaN bucket contributes its first
/// point twice.
///
/// `max_points` below 2 is treated as 2.
pub fn downsample(series: &ResponseSeries, max_points: usize) -> ResponseSeries {
    let len = series.len();
    if len <= max_points {
        return series.clone();
    }

    let half = max_points.max(2) / 2;
    let bucket_size = len.div_ceil(half);
    let capacity = 2 * len.div_ceil(bucket_size);

    let mut x_axis = Vec::with_capacity(capacity);
    let mut y_axis = Vec::with_capacity(capacity);

    for (start, bucket) in (0..len).step_by(bucket_size).zip(series.y_axis.chunks(bucket_size)) {
        let (lo, hi) = extrema(bucket);
        let (first, second) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        for idx in [start + first, start + second] {
            x_axis.push(series.x_axis[idx]);
            y_axis.push(series.y_axis[idx]);
        }
    }

    ResponseSeries {
        x_axis,
        y_axis,
        x_label: series.x_label.clone(),
        y_label: series.y_label.clone(),
        title: series.title.clone(),
        plot_type: series.plot_type,
    }
}

/// Indices of the first minimum and first maximum, ignoring NaN.
fn extrema(values: &[f64]) -> (usize, usize) {
    let mut found: Option<(usize, usize)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        found = Some(match found {
            None => (i, i),
            Some((lo, hi)) => (
                if v < values[lo] { i } else { lo },
                if v > values[hi] { i } else { hi },
            ),
        });
    }
    found.unwrap_or((0, 0))
}
