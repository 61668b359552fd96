use crate::foundation::{
    core::{Secs, TimeRange},
    error::{SplicerError, SplicerResult},
};

/// Default length of the synthetic title clip, in seconds.
pub const DEFAULT_TITLE_DURATION: Secs = Secs(3.0);

/// A caller-supplied window, before labels are assigned.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Window {
    pub range: TimeRange,
    /// `true` for the generated title clip.
    #[serde(default)]
    pub synthetic: bool,
}

impl Window {
    /// A window of source material.
    pub fn content(start: impl Into<Secs>, end: impl Into<Secs>) -> Self {
        Self {
            range: TimeRange::new(start, end),
            synthetic: false,
        }
    }

    /// The title clip window `[0, duration)`.
    pub fn title(duration: impl Into<Secs>) -> Self {
        Self {
            range: TimeRange::new(Secs::ZERO, duration),
            synthetic: true,
        }
    }
}

impl From<(f64, f64)> for Window {
    fn from((start, end): (f64, f64)) -> Self {
        Self::content(start, end)
    }
}

/// One labelled, validated time window of the timeline.
///
/// Immutable after construction. The label is the stringified position, which is what makes
/// every generated pad name unique.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Segment {
    index: usize,
    label: String,
    range: TimeRange,
    is_synthetic: bool,
}

impl Segment {
    /// Build a source segment at `index`.
    pub fn new(index: usize, range: TimeRange) -> SplicerResult<Self> {
        Self::build(index, range, false)
    }

    /// Build the synthetic title segment; it always sits at index 0.
    pub fn title(duration: Secs) -> SplicerResult<Self> {
        Self::build(0, TimeRange::new(Secs::ZERO, duration), true)
    }

    pub(crate) fn from_window(index: usize, window: Window) -> SplicerResult<Self> {
        if window.synthetic && index != 0 {
            return Err(SplicerError::invalid_segment(
                index.to_string(),
                "a synthetic title segment may only appear at index 0",
            ));
        }
        Self::build(index, window.range, window.synthetic)
    }

    fn build(index: usize, range: TimeRange, is_synthetic: bool) -> SplicerResult<Self> {
        let label = index.to_string();
        range
            .check()
            .map_err(|reason| SplicerError::invalid_segment(label.clone(), reason))?;
        if is_synthetic && range.start != Secs::ZERO {
            return Err(SplicerError::invalid_segment(
                label,
                format!("the title segment must start at 0, got {}", range.start),
            ));
        }
        Ok(Self {
            index,
            label,
            range,
            is_synthetic,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn start(&self) -> Secs {
        self.range.start
    }

    pub fn end(&self) -> Secs {
        self.range.end
    }

    /// `end - start`, always positive.
    pub fn duration(&self) -> Secs {
        self.range.duration()
    }

    pub fn is_synthetic(&self) -> bool {
        self.is_synthetic
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/segment.rs"]
mod tests;
