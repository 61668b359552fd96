use crate::{
    foundation::core::{Secs, TimeRange},
    foundation::error::{SplicerError, SplicerResult},
    graph::model::{Graph, Node, NodeKind, Pad},
    graph::transition::{TransitionInputs, build_transition},
    timeline::offsets::{DEFAULT_CROSSFADE, transition_offsets},
    timeline::segment::{DEFAULT_TITLE_DURATION, Segment, Window},
};

/// How segments map onto the media engine's input streams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceLayout {
    /// Input 0 is the rendered title clip, input 1 the full source recording. Content
    /// segments are cut out of input 1 at their own `[start, end)` window.
    #[default]
    Direct,
    /// Every segment was extracted to its own file beforehand; input `i` holds segment `i`
    /// and is trimmed over `[0, duration)`.
    Extracted,
}

impl SourceLayout {
    /// Engine input index a segment is read from.
    pub fn input_index(self, seg: &Segment) -> usize {
        match self {
            SourceLayout::Direct => usize::from(!seg.is_synthetic()),
            SourceLayout::Extracted => seg.index(),
        }
    }

    /// Window of the engine input the segment's trim node keeps.
    pub fn trim_window(self, seg: &Segment) -> TimeRange {
        match self {
            SourceLayout::Direct => seg.range(),
            SourceLayout::Extracted => TimeRange::new(Secs::ZERO, seg.duration()),
        }
    }

    /// Number of engine inputs needed for `segments`.
    pub fn input_count(self, segments: &[Segment]) -> usize {
        segments
            .iter()
            .map(|s| self.input_index(s) + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Timing knobs for one timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineOpts {
    /// Length of every crossfade.
    pub crossfade: Secs,
    /// Length of the title clip. A caller-supplied title window must have this length.
    pub title_duration: Secs,
    pub layout: SourceLayout,
}

impl Default for TimelineOpts {
    fn default() -> Self {
        Self {
            crossfade: DEFAULT_CROSSFADE,
            title_duration: DEFAULT_TITLE_DURATION,
            layout: SourceLayout::default(),
        }
    }
}

impl TimelineOpts {
    pub fn validate(&self) -> SplicerResult<()> {
        if !self.crossfade.is_finite() || self.crossfade.0 <= 0.0 {
            return Err(SplicerError::config(format!(
                "crossfade must be a positive number of seconds, got {}",
                self.crossfade.0
            )));
        }
        if !self.title_duration.is_finite() || self.title_duration.0 <= 0.0 {
            return Err(SplicerError::config(format!(
                "title_duration must be a positive number of seconds, got {}",
                self.title_duration.0
            )));
        }
        Ok(())
    }
}

/// Result of [`assemble`]: the graph plus everything needed to run it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Assembly {
    pub segments: Vec<Segment>,
    /// One entry per transition, `offsets[i]` belongs to `i -> i+1`.
    pub offsets: Vec<Secs>,
    pub graph: Graph,
    pub terminal_video: Pad,
    pub terminal_audio: Pad,
    pub layout: SourceLayout,
}

impl Assembly {
    /// Number of engine inputs the graph reads.
    pub fn input_count(&self) -> usize {
        self.layout.input_count(&self.segments)
    }

    /// Length of the composed output: every segment minus one crossfade per transition.
    pub fn output_duration(&self, crossfade: Secs) -> Secs {
        let total = self
            .segments
            .iter()
            .fold(Secs::ZERO, |acc, s| acc + s.duration());
        total - Secs(crossfade.0 * self.offsets.len() as f64)
    }
}

fn trim_label(seg: &Segment) -> String {
    format!("s{}", seg.label())
}

fn transition_label(next_index: usize) -> String {
    format!("x{next_index}")
}

/// Build the complete crossfade graph for an ordered list of windows.
///
/// A title window is prepended unless the first window is already synthetic, in which case
/// its length must equal `opts.title_duration`. Each segment gets
/// a trim pair `s{i}v`/`s{i}a`; transition `i -> i+1` writes `x{i+1}v`/`x{i+1}a` and feeds the
/// next transition. With only a title the trim pads are the terminal pads.
///
/// Nothing is returned unless the whole graph is valid.
#[tracing::instrument(skip(windows, opts), fields(windows = windows.len()))]
pub fn assemble(windows: &[Window], opts: &TimelineOpts) -> SplicerResult<Assembly> {
    opts.validate()?;
    if windows.is_empty() {
        return Err(SplicerError::EmptyTimeline);
    }

    if windows[0].synthetic && windows[0].range.duration() != opts.title_duration {
        return Err(SplicerError::config(format!(
            "title window is {}s long but title_duration is {}s",
            windows[0].range.duration(),
            opts.title_duration
        )));
    }

    let title = (!windows[0].synthetic).then(|| Window::title(opts.title_duration));
    let segments = title
        .into_iter()
        .chain(windows.iter().copied())
        .enumerate()
        .map(|(i, w)| Segment::from_window(i, w))
        .collect::<SplicerResult<Vec<_>>>()?;

    let offsets = transition_offsets(&segments, opts.crossfade)?;

    let mut graph = Graph::new();
    for seg in &segments {
        let input = opts.layout.input_index(seg);
        let src_video = Pad::new(format!("{input}:v"));
        let src_audio = Pad::new(format!("{input}:a"));
        graph.declare_source(src_video.clone());
        graph.declare_source(src_audio.clone());

        let label = trim_label(seg);
        graph.push(Node::new(
            NodeKind::Trim {
                window: opts.layout.trim_window(seg),
            },
            vec![src_video, src_audio],
            vec![Pad::video(&label), Pad::audio(&label)],
        ))?;
    }

    let first = trim_label(&segments[0]);
    let (terminal_video, terminal_audio) = offsets.iter().enumerate().try_fold(
        (Pad::video(&first), Pad::audio(&first)),
        |(video_a, audio_a), (i, &offset)| {
            let incoming = trim_label(&segments[i + 1]);
            let inputs = TransitionInputs {
                video_a,
                audio_a,
                video_b: Pad::video(&incoming),
                audio_b: Pad::audio(&incoming),
            };
            let out_label = transition_label(i + 1);
            graph.extend(build_transition(&inputs, &out_label, offset, opts.crossfade))?;
            Ok::<_, SplicerError>((Pad::video(&out_label), Pad::audio(&out_label)))
        },
    )?;

    tracing::debug!(
        segments = segments.len(),
        transitions = offsets.len(),
        nodes = graph.nodes().len(),
        terminal_video = %terminal_video,
        terminal_audio = %terminal_audio,
        "assembled crossfade graph"
    );

    Ok(Assembly {
        segments,
        offsets,
        graph,
        terminal_video,
        terminal_audio,
        layout: opts.layout,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/graph/assemble.rs"]
mod tests;
