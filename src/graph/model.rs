use std::{collections::BTreeSet, fmt};

use crate::foundation::{
    core::{Secs, TimeRange},
    error::{SplicerError, SplicerResult},
};

/// Name of one logical audio or video stream in a graph.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Pad(String);

impl Pad {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Video pad `{label}v`.
    pub fn video(label: &str) -> Self {
        Self(format!("{label}v"))
    }

    /// Audio pad `{label}a`.
    pub fn audio(label: &str) -> Self {
        Self(format!("{label}a"))
    }

    /// `{self}_pts`: the same stream after a timestamp rewrite.
    pub fn pts(&self) -> Self {
        Self(format!("{}_pts", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a node does to its inputs.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    /// Cut `[start, end)` from a video/audio source pair and reset timestamps to zero.
    ///
    /// Inputs: `[video, audio]`. Outputs: `[video, audio]`.
    Trim { window: TimeRange },
    /// Rebase presentation timestamps to start at zero.
    ResetTimestamps,
    /// Alpha fade-in from local time zero, then shift timestamps forward by `shift`.
    FadeIn { duration: Secs, shift: Secs },
    /// Audio crossfade of two streams.
    Crossfade { duration: Secs },
    /// Composite the second video input over the first.
    Overlay,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Trim { .. } => "trim",
            NodeKind::ResetTimestamps => "reset_timestamps",
            NodeKind::FadeIn { .. } => "fade_in",
            NodeKind::Crossfade { .. } => "crossfade",
            NodeKind::Overlay => "overlay",
        }
    }
}

/// One processing step: kind plus ordered input and output pads.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    pub inputs: Vec<Pad>,
    pub outputs: Vec<Pad>,
}

impl Node {
    pub fn new(kind: NodeKind, inputs: Vec<Pad>, outputs: Vec<Pad>) -> Self {
        Self {
            kind,
            inputs,
            outputs,
        }
    }
}

/// A processing graph: declared source pads plus nodes in execution order.
///
/// Nodes can only be appended through [`Graph::push`], which refuses inputs that do not exist
/// yet and outputs that already exist. Every graph is therefore acyclic, with each node pad
/// written once and read at most once. Source pads are engine inputs and may be read by any
/// number of nodes.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Graph {
    sources: Vec<Pad>,
    nodes: Vec<Node>,
    #[serde(skip)]
    source_set: BTreeSet<Pad>,
    #[serde(skip)]
    available: BTreeSet<Pad>,
    #[serde(skip)]
    seen: BTreeSet<Pad>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an external input stream (e.g. `1:v`).
    ///
    /// Declaring the same source twice is a no-op.
    pub fn declare_source(&mut self, pad: Pad) {
        if self.seen.insert(pad.clone()) {
            self.source_set.insert(pad.clone());
            self.sources.push(pad);
        }
    }

    /// Append a node, consuming its inputs and producing its outputs.
    pub fn push(&mut self, node: Node) -> SplicerResult<()> {
        for input in &node.inputs {
            if !self.source_set.contains(input) && !self.available.contains(input) {
                return Err(SplicerError::duplicate_label(format!(
                    "{} node reads '{input}' which is not available",
                    node.kind.name()
                )));
            }
        }
        for (i, out) in node.outputs.iter().enumerate() {
            if self.seen.contains(out) || node.outputs[..i].contains(out) {
                return Err(SplicerError::duplicate_label(format!(
                    "{} node writes '{out}' which already exists",
                    node.kind.name()
                )));
            }
        }

        for input in &node.inputs {
            self.available.remove(input);
        }
        for out in &node.outputs {
            self.seen.insert(out.clone());
            self.available.insert(out.clone());
        }
        self.nodes.push(node);
        Ok(())
    }

    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) -> SplicerResult<()> {
        for node in nodes {
            self.push(node)?;
        }
        Ok(())
    }

    pub fn sources(&self) -> &[Pad] {
        &self.sources
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// `true` when `pad` was produced by a node and nothing has consumed it yet.
    pub fn is_unconsumed(&self, pad: &Pad) -> bool {
        self.available.contains(pad)
    }

    /// Replay the node list from scratch and check that every input was produced earlier and
    /// every output is written exactly once.
    pub fn verify_topology(&self) -> SplicerResult<()> {
        let mut replay = Graph::new();
        for src in &self.sources {
            replay.declare_source(src.clone());
        }
        replay.extend(self.nodes.iter().cloned())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/model.rs"]
mod tests;
