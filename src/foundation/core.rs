use std::fmt;

use crate::foundation::error::{SplicerError, SplicerResult};

/// A point or span on a media timeline, in seconds.
///
/// `Display` prints integral values without a fractional part (`2`, not `2.0`) so rendered
/// filter graphs stay stable and readable.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Secs(pub f64);

impl Secs {
    /// Zero seconds.
    pub const ZERO: Self = Self(0.0);

    /// Create a value, rejecting NaN and infinities.
    pub fn new(v: f64) -> SplicerResult<Self> {
        if !v.is_finite() {
            return Err(SplicerError::config(format!(
                "time value must be finite, got {v}"
            )));
        }
        Ok(Self(v))
    }

    /// Raw seconds.
    pub fn get(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl std::ops::Add for Secs {
    type Output = Secs;

    fn add(self, rhs: Secs) -> Secs {
        Secs(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Secs {
    type Output = Secs;

    fn sub(self, rhs: Secs) -> Secs {
        Secs(self.0 - rhs.0)
    }
}

impl From<u32> for Secs {
    fn from(v: u32) -> Self {
        Self(f64::from(v))
    }
}

impl fmt::Display for Secs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64's Display already drops a trailing ".0"; normalise negative zero.
        if self.0 == 0.0 {
            return f.write_str("0");
        }
        write!(f, "{}", self.0)
    }
}

/// Half-open time window `[start, end)` in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeRange {
    /// Inclusive start.
    pub start: Secs,
    /// Exclusive end.
    pub end: Secs,
}

impl TimeRange {
    /// Create a range without validating it; see [`TimeRange::check`].
    pub fn new(start: impl Into<Secs>, end: impl Into<Secs>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Length of the window. Negative for inverted ranges.
    pub fn duration(self) -> Secs {
        self.end - self.start
    }

    /// Return a human readable reason when the window is unusable.
    pub fn check(self) -> Result<(), String> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(format!(
                "bounds must be finite (start={}, end={})",
                self.start.0, self.end.0
            ));
        }
        if self.start.0 < 0.0 {
            return Err(format!("start must be non-negative, got {}", self.start));
        }
        if self.end.0 <= self.start.0 {
            return Err(format!(
                "end ({}) must be greater than start ({})",
                self.end, self.start
            ));
        }
        Ok(())
    }
}

impl From<f64> for Secs {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> SplicerResult<Self> {
        if den == 0 {
            return Err(SplicerError::config("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SplicerError::config("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Render in ffmpeg's rate syntax (`30` or `30000/1001`).
    pub fn to_ffmpeg(self) -> String {
        if self.den == 1 {
            self.num.to_string()
        } else {
            format!("{}/{}", self.num, self.den)
        }
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
