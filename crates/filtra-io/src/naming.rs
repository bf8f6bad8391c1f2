//! Output file names.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use filtra_core::FilterSpec;

/// `strftime` pattern for the timestamp part of a suggested name.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H-%M-%S";

/// Name for a filtered download: `{stem}_{type}_{cutoff}Hz_{timestamp}.wav`.
///
/// Band cutoffs are joined with `-`, e.g. `voice_band_300-3000Hz_20240102_13-04-05.wav`.
pub fn suggested_filename<Tz: TimeZone>(
    stem: &str,
    spec: &FilterSpec,
    timestamp: &DateTime<Tz>,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{stem}_{}_{}Hz_{}.wav",
        spec.kind.short_name(),
        spec.cutoff,
        timestamp.format(TIMESTAMP_FORMAT)
    )
}

/// Sibling of `source` with `_filtered` or `_original` before the extension.
pub fn default_output_path(source: &Path, filtered: bool) -> PathBuf {
    let suffix = if filtered { "filtered" } else { "original" };
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string());
    source.with_file_name(format!("{stem}_{suffix}.wav"))
}
