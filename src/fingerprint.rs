use std::fmt;

use xxhash_rust::xxh3::Xxh3;

use crate::graph::{
    assemble::{Assembly, SourceLayout},
    model::{Node, NodeKind, Pad},
};

const XXH3_SEED: u64 = 0x5ec7_a11e_c0ff_ee01;

/// Stable fingerprint of an assembled graph.
///
/// Two assemblies with equal fingerprints render to the same ffmpeg invocation, which lets the
/// batch driver log and compare plans without diffing filter text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct GraphFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl fmt::Display for GraphFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

pub fn fingerprint_assembly(assembly: &Assembly) -> GraphFingerprint {
    let mut h = StableHasher::new();
    h.write_u8(match assembly.layout {
        SourceLayout::Direct => 0,
        SourceLayout::Extracted => 1,
    });
    h.write_u64(assembly.graph.sources().len() as u64);
    for src in assembly.graph.sources() {
        h.write_pad(src);
    }
    h.write_u64(assembly.graph.nodes().len() as u64);
    for node in assembly.graph.nodes() {
        write_node(&mut h, node);
    }
    h.write_pad(&assembly.terminal_video);
    h.write_pad(&assembly.terminal_audio);
    h.finish()
}

fn write_node(h: &mut StableHasher, node: &Node) {
    match &node.kind {
        NodeKind::Trim { window } => {
            h.write_u8(0);
            h.write_f64(window.start.0);
            h.write_f64(window.end.0);
        }
        NodeKind::ResetTimestamps => h.write_u8(1),
        NodeKind::FadeIn { duration, shift } => {
            h.write_u8(2);
            h.write_f64(duration.0);
            h.write_f64(shift.0);
        }
        NodeKind::Crossfade { duration } => {
            h.write_u8(3);
            h.write_f64(duration.0);
        }
        NodeKind::Overlay => h.write_u8(4),
    }
    h.write_u64(node.inputs.len() as u64);
    for pad in &node.inputs {
        h.write_pad(pad);
    }
    h.write_u64(node.outputs.len() as u64);
    for pad in &node.outputs {
        h.write_pad(pad);
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_pad(&mut self, pad: &Pad) {
        let s = pad.as_str();
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> GraphFingerprint {
        let v = self.inner.digest128();
        GraphFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/fingerprint.rs"]
mod tests;
