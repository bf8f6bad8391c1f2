//! Filter descriptions and their validation.
//!
//! A [`FilterSpec`] is built per operation from either typed values
//! ([`FilterSpec::lowpass`] and friends) or the primitive strings a transport
//! layer receives ([`FilterSpec::from_params`]). [`FilterSpec::validate`]
//! checks every invariant before any numeric work happens.

#[cfg(not(feature = "std"))]
use alloc::string::ToString;

use core::str::FromStr;

use crate::error::FilterError;

/// Response shape of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Passes frequencies below the cutoff.
    Lowpass,
    /// Passes frequencies above the cutoff.
    Highpass,
    /// Passes frequencies between two cutoffs.
    Bandpass,
    /// Rejects frequencies between two cutoffs.
    Bandstop,
}

impl FilterKind {
    /// All supported kinds.
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Lowpass,
        FilterKind::Highpass,
        FilterKind::Bandpass,
        FilterKind::Bandstop,
    ];

    /// Short lowercase name (`low`, `high`, `band`, `bandstop`).
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Lowpass => "low",
            Self::Highpass => "high",
            Self::Bandpass => "band",
            Self::Bandstop => "bandstop",
        }
    }

    /// Capitalized short name, as used in chart titles.
    pub fn title_name(self) -> &'static str {
        match self {
            Self::Lowpass => "Low",
            Self::Highpass => "High",
            Self::Bandpass => "Band",
            Self::Bandstop => "Bandstop",
        }
    }

    /// True for kinds defined by a `(low, high)` band.
    pub fn is_band(self) -> bool {
        matches!(self, Self::Bandpass | Self::Bandstop)
    }

    /// Number of cutoff frequencies this kind requires.
    pub fn cutoff_count(self) -> usize {
        if self.is_band() { 2 } else { 1 }
    }
}

impl core::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "lowpass" | "lp" => Ok(Self::Lowpass),
            "high" | "highpass" | "hp" => Ok(Self::Highpass),
            "band" | "bandpass" | "bp" => Ok(Self::Bandpass),
            "bandstop" | "notch" | "bs" => Ok(Self::Bandstop),
            _ => Err(FilterError::UnknownFilterType(s.to_string())),
        }
    }
}

/// Analog prototype family used by the designer.
///
/// Only Butterworth is implemented; consumers dispatch through
/// [`design`](crate::design::design) and never match on the family directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterFamily {
    /// Maximally flat passband magnitude.
    #[default]
    Butterworth,
}

/// Cutoff frequency specification in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cutoff {
    /// Single corner frequency (lowpass/highpass).
    Single(f64),
    /// Band edges `(low, high)` (bandpass/bandstop).
    Band(f64, f64),
}

impl Cutoff {
    /// Parses a scalar (`"1000"`) or comma-joined pair (`"300,3000"`).
    pub fn parse(text: &str) -> Result<Self, FilterError> {
        let parse_one = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| FilterError::InvalidNumber {
                    field: "cutoff",
                    value: text.to_string(),
                })
        };

        let mut parts = text.split(',');
        let first = parts.next().map(parse_one).transpose()?;
        let second = parts.next().map(parse_one).transpose()?;
        if parts.next().is_some() {
            return Err(FilterError::InvalidNumber {
                field: "cutoff",
                value: text.to_string(),
            });
        }

        match (first, second) {
            (Some(f), None) => Ok(Self::Single(f)),
            (Some(low), Some(high)) => Ok(Self::Band(low, high)),
            _ => Err(FilterError::InvalidNumber {
                field: "cutoff",
                value: text.to_string(),
            }),
        }
    }

    /// Number of frequencies carried.
    pub fn count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Band(..) => 2,
        }
    }
}

impl core::fmt::Display for Cutoff {
    /// Formats for filenames: `1000` or `300-3000`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Single(hz) => write!(f, "{hz}"),
            Self::Band(low, high) => write!(f, "{low}-{high}"),
        }
    }
}

impl From<f64> for Cutoff {
    fn from(hz: f64) -> Self {
        Self::Single(hz)
    }
}

impl From<(f64, f64)> for Cutoff {
    fn from((low, high): (f64, f64)) -> Self {
        Self::Band(low, high)
    }
}

/// Complete description of a digital filter to design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    /// Response shape.
    pub kind: FilterKind,
    /// Prototype family.
    pub family: FilterFamily,
    /// Filter order (number of prototype poles).
    pub order: usize,
    /// Cutoff frequency or band edges in Hz.
    pub cutoff: Cutoff,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl FilterSpec {
    /// Creates a Butterworth spec. Call [`validate`](Self::validate) or
    /// [`design`](crate::design::design) to check it.
    pub fn new(kind: FilterKind, order: usize, cutoff: impl Into<Cutoff>, sample_rate: u32) -> Self {
        Self {
            kind,
            family: FilterFamily::Butterworth,
            order,
            cutoff: cutoff.into(),
            sample_rate,
        }
    }

    /// Butterworth lowpass.
    pub fn lowpass(order: usize, cutoff_hz: f64, sample_rate: u32) -> Self {
        Self::new(FilterKind::Lowpass, order, cutoff_hz, sample_rate)
    }

    /// Butterworth highpass.
    pub fn highpass(order: usize, cutoff_hz: f64, sample_rate: u32) -> Self {
        Self::new(FilterKind::Highpass, order, cutoff_hz, sample_rate)
    }

    /// Butterworth bandpass.
    pub fn bandpass(order: usize, low_hz: f64, high_hz: f64, sample_rate: u32) -> Self {
        Self::new(FilterKind::Bandpass, order, (low_hz, high_hz), sample_rate)
    }

    /// Butterworth bandstop.
    pub fn bandstop(order: usize, low_hz: f64, high_hz: f64, sample_rate: u32) -> Self {
        Self::new(FilterKind::Bandstop, order, (low_hz, high_hz), sample_rate)
    }

    /// Builds a validated spec from transport-layer primitives.
    ///
    /// `kind` is a filter type name, `order` an integer and `cutoff` either a
    /// scalar or a comma-joined `low,high` pair.
    ///
    /// ```rust
    /// use filtra_core::{Cutoff, FilterKind, FilterSpec};
    ///
    /// let spec = FilterSpec::from_params("band", "6", "300,3000", 16000).unwrap();
    /// assert_eq!(spec.kind, FilterKind::Bandpass);
    /// assert_eq!(spec.cutoff, Cutoff::Band(300.0, 3000.0));
    ///
    /// assert!(FilterSpec::from_params("comb", "2", "1000", 16000).is_err());
    /// ```
    pub fn from_params(
        kind: &str,
        order: &str,
        cutoff: &str,
        sample_rate: u32,
    ) -> Result<Self, FilterError> {
        let kind: FilterKind = kind.parse()?;
        let order: i64 = order
            .trim()
            .parse()
            .map_err(|_| FilterError::InvalidNumber {
                field: "order",
                value: order.to_string(),
            })?;
        if order < 1 {
            return Err(FilterError::InvalidOrder(order));
        }
        let cutoff = Cutoff::parse(cutoff)?;

        let spec = Self::new(kind, order as usize, cutoff, sample_rate);
        spec.validate()?;
        Ok(spec)
    }

    /// Nyquist frequency (`sample_rate / 2`) in Hz.
    pub fn nyquist(&self) -> f64 {
        f64::from(self.sample_rate) / 2.0
    }

    /// Checks order, cutoff arity, range and band ordering.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.order < 1 {
            return Err(FilterError::InvalidOrder(self.order as i64));
        }
        if self.sample_rate == 0 {
            return Err(FilterError::InvalidSampleRate(self.sample_rate));
        }

        let expected = self.kind.cutoff_count();
        if self.cutoff.count() != expected {
            return Err(FilterError::CutoffArity {
                kind: self.kind,
                expected,
                found: self.cutoff.count(),
            });
        }

        let nyquist = self.nyquist();
        let in_range = |hz: f64| hz.is_finite() && hz > 0.0 && hz < nyquist;
        match self.cutoff {
            Cutoff::Single(hz) => {
                if !in_range(hz) {
                    return Err(FilterError::CutoffOutOfRange { cutoff: hz, nyquist });
                }
            }
            Cutoff::Band(low, high) => {
                for hz in [low, high] {
                    if !in_range(hz) {
                        return Err(FilterError::CutoffOutOfRange { cutoff: hz, nyquist });
                    }
                }
                if low >= high {
                    return Err(FilterError::CutoffOrder { low, high });
                }
            }
        }
        Ok(())
    }

    /// Cutoff(s) divided by the Nyquist frequency, each in `(0, 1)`.
    ///
    /// This is the single normalization rule used for every filter kind.
    pub fn normalized_cutoff(&self) -> Cutoff {
        let nyquist = self.nyquist();
        match self.cutoff {
            Cutoff::Single(hz) => Cutoff::Single(hz / nyquist),
            Cutoff::Band(low, high) => Cutoff::Band(low / nyquist, high / nyquist),
        }
    }
}
