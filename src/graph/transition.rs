use crate::{
    foundation::core::Secs,
    graph::model::{Node, NodeKind, Pad},
};

/// Input streams for one crossfade: the outgoing `a` pair and the incoming `b` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionInputs {
    pub video_a: Pad,
    pub audio_a: Pad,
    pub video_b: Pad,
    pub audio_b: Pad,
}

/// Emit the four nodes that crossfade `a` into `b`.
///
/// Outputs are `{out_label}v` and `{out_label}a`. Node order matters: each later node reads a
/// pad produced by an earlier one.
///
/// 1. audio crossfade `audio_a` + `audio_b` -> `{out_label}a`
/// 2. timestamp reset `video_a` -> `{video_a}_pts`
/// 3. fade-in then shift by `offset` on `video_b` -> `{video_b}_pts`
/// 4. overlay `{video_b}_pts` over `{video_a}_pts` -> `{out_label}v`
///
/// Because `a` is rebased to zero, `b` has to be pushed forward by the point at which the
/// crossfade starts on the accumulated timeline, which is exactly `offset`.
pub fn build_transition(
    inputs: &TransitionInputs,
    out_label: &str,
    offset: Secs,
    crossfade: Secs,
) -> [Node; 4] {
    let out_video = Pad::video(out_label);
    let out_audio = Pad::audio(out_label);
    let a_pts = inputs.video_a.pts();
    let b_pts = inputs.video_b.pts();

    [
        Node::new(
            NodeKind::Crossfade {
                duration: crossfade,
            },
            vec![inputs.audio_a.clone(), inputs.audio_b.clone()],
            vec![out_audio],
        ),
        Node::new(
            NodeKind::ResetTimestamps,
            vec![inputs.video_a.clone()],
            vec![a_pts.clone()],
        ),
        Node::new(
            NodeKind::FadeIn {
                duration: crossfade,
                shift: offset,
            },
            vec![inputs.video_b.clone()],
            vec![b_pts.clone()],
        ),
        Node::new(NodeKind::Overlay, vec![a_pts, b_pts], vec![out_video]),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/graph/transition.rs"]
mod tests;
