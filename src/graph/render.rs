//! Rendering of structured graphs into ffmpeg `-filter_complex` text.
//!
//! This is purely mechanical: all timing and naming decisions were made by the assembler.

use std::fmt::Write as _;

use crate::graph::model::{Graph, Node, NodeKind, Pad};

/// Render every node as one or more filter chains joined by `;`.
pub fn render_filtergraph(graph: &Graph) -> String {
    graph
        .nodes()
        .iter()
        .flat_map(render_node)
        .collect::<Vec<_>>()
        .join(";")
}

/// Render a single node. Trim nodes produce two chains (video, audio), or fewer when built
/// with fewer pads.
pub fn render_node(node: &Node) -> Vec<String> {
    match &node.kind {
        NodeKind::Trim { window } => {
            let (start, end) = (window.start, window.end);
            let video = format!("trim=start={start}:end={end},setpts=PTS-STARTPTS");
            let audio = format!("atrim=start={start}:end={end},asetpts=PTS-STARTPTS");
            // Stream 0 is video and stream 1 audio; a stream missing on either side is skipped.
            [video, audio]
                .iter()
                .enumerate()
                .filter_map(|(i, filter)| {
                    let input = node.inputs.get(i..=i)?;
                    let output = node.outputs.get(i..=i)?;
                    Some(chain(input, filter, output))
                })
                .collect()
        }
        NodeKind::ResetTimestamps => {
            vec![chain(&node.inputs, "setpts=PTS-STARTPTS", &node.outputs)]
        }
        NodeKind::FadeIn { duration, shift } => vec![chain(
            &node.inputs,
            &format!("fade=in:st=0:d={duration}:alpha=1,setpts=PTS-STARTPTS+({shift}/TB)"),
            &node.outputs,
        )],
        NodeKind::Crossfade { duration } => vec![chain(
            &node.inputs,
            &format!("acrossfade=d={duration}"),
            &node.outputs,
        )],
        NodeKind::Overlay => vec![chain(&node.inputs, "overlay", &node.outputs)],
    }
}

/// `[in0][in1]filter[out0]`.
fn chain(inputs: &[Pad], filter: &str, outputs: &[Pad]) -> String {
    let mut s = String::new();
    write_labels(&mut s, inputs);
    s.push_str(filter);
    write_labels(&mut s, outputs);
    s
}

fn write_labels(out: &mut String, pads: &[Pad]) {
    for pad in pads {
        let _ = write!(out, "[{pad}]");
    }
}

/// `-map` argument for a terminal pad.
pub fn map_label(pad: &Pad) -> String {
    format!("[{pad}]")
}

#[cfg(test)]
#[path = "../../tests/unit/graph/render.rs"]
mod tests;
