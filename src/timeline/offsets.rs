use crate::{
    foundation::core::Secs,
    foundation::error::{SplicerError, SplicerResult},
    timeline::segment::Segment,
};

/// Default crossfade length, in seconds.
pub const DEFAULT_CROSSFADE: Secs = Secs(1.0);

/// Compute the crossfade start for every transition `i -> i+1`.
///
/// Offsets accumulate across the whole chain:
///
/// ```text
/// offset_i = duration_i + offset_{i-1} - crossfade      (offset_{-1} = 0)
/// ```
///
/// so each value is measured from the origin of the first segment, which is what the shifted
/// fade-in stream expects downstream. The result has `segments.len() - 1` entries (none for a
/// single segment).
///
/// Segments that are not strictly longer than `crossfade` are rejected: the overlap would
/// otherwise consume the whole clip and drive offsets backwards.
pub fn transition_offsets(segments: &[Segment], crossfade: Secs) -> SplicerResult<Vec<Secs>> {
    if segments.len() < 2 {
        return Ok(Vec::new());
    }

    if let Some(short) = segments.iter().find(|s| s.duration() <= crossfade) {
        return Err(SplicerError::invalid_segment(
            short.label(),
            format!(
                "duration {} must be longer than the {} crossfade",
                short.duration(),
                crossfade
            ),
        ));
    }

    let offsets = segments[..segments.len() - 1]
        .iter()
        .scan(Secs::ZERO, |prev_offset, seg| {
            *prev_offset = seg.duration() + *prev_offset - crossfade;
            Some(*prev_offset)
        })
        .collect();

    Ok(offsets)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/offsets.rs"]
mod tests;
