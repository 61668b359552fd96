//! splicer stitches segments of a source recording, preceded by a generated title card, into
//! one video with a crossfade at every boundary.
//!
//! # Pipeline overview
//!
//! 1. **Segment**: `(start, end)` windows become labelled, validated [`Segment`]s
//! 2. **Offsets**: the crossfade start of every transition on the accumulated output timeline
//! 3. **Assemble**: trim nodes plus four nodes per transition, as one acyclic [`Graph`]
//! 4. **Render**: the graph as an ffmpeg `-filter_complex` string, run by the system `ffmpeg`
//!
//! Steps 1-3 are pure and deterministic; the same input always yields the same graph.
#![forbid(unsafe_code)]

pub mod batch;
pub mod config;
pub mod encode;
pub mod fingerprint;
mod foundation;
pub mod graph;
pub mod timeline;

pub use batch::{JobOutcome, JobPlan, plan_all, plan_job, render_all, render_commands, render_job};
pub use config::manifest::{Defaults, Manifest, VideoJob};
pub use encode::ffmpeg::{
    EncodeSettings, FfmpegCommand, ensure_parent_dir, extract_clip_command, is_ffmpeg_on_path,
    join_command,
};
pub use encode::title::{TitleCard, TitleCardOpts, escape_drawtext, title_card_command};
pub use fingerprint::{GraphFingerprint, fingerprint_assembly};
pub use foundation::core::{Fps, Secs, TimeRange};
pub use foundation::error::{SplicerError, SplicerResult};
pub use graph::assemble::{Assembly, SourceLayout, TimelineOpts, assemble};
pub use graph::model::{Graph, Node, NodeKind, Pad};
pub use graph::render::{render_filtergraph, render_node};
pub use graph::transition::{TransitionInputs, build_transition};
pub use timeline::offsets::{DEFAULT_CROSSFADE, transition_offsets};
pub use timeline::segment::{DEFAULT_TITLE_DURATION, Segment, Window};
