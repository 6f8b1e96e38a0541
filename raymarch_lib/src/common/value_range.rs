use std::ops::Range;

/// Range of scalar sample values, `[low, high)`.
///
/// Used as the domain of a transfer function and to report the
/// range of samples stored in a volume.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ValueRange {
    /// Lower bound, inclusive
    pub low: f32,
    /// Upper bound, exclusive
    pub high: f32,
}

impl ValueRange {
    /// Constructs range `[low, high)`.
    pub fn new(low: f32, high: f32) -> ValueRange {
        ValueRange { low, high }
    }

    /// Constructs new, empty range.
    pub fn empty() -> ValueRange {
        ValueRange {
            low: f32::NAN,
            high: f32::NAN,
        }
    }

    /// Constructs minimal range spanning all samples of an iterator.
    /// Upper bound is the largest sample, so the result is closed on both ends.
    pub fn from_samples(iter: impl IntoIterator<Item = f32>) -> ValueRange {
        let mut range = ValueRange::empty();
        for val in iter {
            range.extend(val);
        }
        range
    }

    /// Extend the range with new value.
    pub fn extend(&mut self, val: f32) {
        if self.is_empty() {
            self.low = val;
            self.high = val;
        }

        if val > self.high {
            self.high = val;
        }

        if val < self.low {
            self.low = val;
        }
    }

    /// Range has no elements.
    pub fn is_empty(&self) -> bool {
        self.low.is_nan() || self.high.is_nan()
    }

    /// Both bounds are finite and `low < high`.
    pub fn is_valid(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low < self.high
    }

    /// Distance between bounds.
    pub fn width(&self) -> f32 {
        self.high - self.low
    }

    /// Check if value is inside `[low, high)`.
    pub fn contains(&self, val: f32) -> bool {
        self.low <= val && val < self.high
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::empty()
    }
}

/// Conversion from standard library type.
/// Unlocks simple syntax:
/// ```
/// # use raymarch_lib::common::ValueRange;
/// let range: ValueRange = (0.0..45.5).into();
/// ```
impl From<Range<f32>> for ValueRange {
    fn from(range: Range<f32>) -> Self {
        ValueRange {
            low: range.start,
            high: range.end,
        }
    }
}
