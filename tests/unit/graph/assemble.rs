use std::collections::BTreeSet;

use super::*;

fn windows(spans: &[(f64, f64)]) -> Vec<Window> {
    spans.iter().map(|&(s, e)| Window::content(s, e)).collect()
}

fn assemble_default(spans: &[(f64, f64)]) -> Assembly {
    assemble(&windows(spans), &TimelineOpts::default()).unwrap()
}

#[test]
fn empty_timeline_is_rejected() {
    let err = assemble(&[], &TimelineOpts::default()).unwrap_err();
    assert!(matches!(err, SplicerError::EmptyTimeline));
}

#[test]
fn title_only_has_no_transitions() {
    let a = assemble(&[Window::title(3.0)], &TimelineOpts::default()).unwrap();
    assert_eq!(a.segments.len(), 1);
    assert!(a.offsets.is_empty());
    assert_eq!(a.graph.nodes().len(), 1);
    assert_eq!(a.graph.nodes()[0].kind.name(), "trim");
    assert_eq!(a.terminal_video, Pad::new("s0v"));
    assert_eq!(a.terminal_audio, Pad::new("s0a"));
    assert_eq!(a.input_count(), 1);
}

#[test]
fn title_is_prepended_once() {
    let a = assemble_default(&[(0.0, 98.0)]);
    assert_eq!(a.segments.len(), 2);
    assert!(a.segments[0].is_synthetic());
    assert_eq!(a.segments[0].duration(), Secs(3.0));

    let mut with_title = vec![Window::title(3.0)];
    with_title.extend(windows(&[(0.0, 98.0)]));
    let b = assemble(&with_title, &TimelineOpts::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn first_transition_offset_is_title_minus_crossfade() {
    let a = assemble_default(&[(0.0, 98.0)]);
    assert_eq!(a.offsets, vec![Secs(2.0)]);
    assert_eq!(a.terminal_video, Pad::new("x1v"));
    assert_eq!(a.terminal_audio, Pad::new("x1a"));
}

#[test]
fn offsets_accumulate_across_transitions() {
    let a = assemble_default(&[(145.0, 233.0), (0.0, 98.0)]);
    assert_eq!(a.offsets, vec![Secs(2.0), Secs(89.0)]);

    let fade_shifts: Vec<Secs> = a
        .graph
        .nodes()
        .iter()
        .filter_map(|n| match n.kind {
            NodeKind::FadeIn { shift, .. } => Some(shift),
            _ => None,
        })
        .collect();
    assert_eq!(fade_shifts, a.offsets);
}

#[test]
fn second_transition_reads_first_transition_outputs() {
    let a = assemble_default(&[(0.0, 98.0), (145.0, 233.0)]);
    let nodes = a.graph.nodes();
    // 3 trims, then 4 nodes per transition.
    assert_eq!(nodes.len(), 3 + 2 * 4);
    let second = &nodes[3 + 4..];
    assert_eq!(second[0].inputs, vec![Pad::new("x1a"), Pad::new("s2a")]);
    assert_eq!(second[1].inputs, vec![Pad::new("x1v")]);
    assert_eq!(second[1].outputs, vec![Pad::new("x1v_pts")]);
    assert_eq!(second[2].inputs, vec![Pad::new("s2v")]);
    assert_eq!(a.terminal_video, Pad::new("x2v"));
}

#[test]
fn every_graph_is_topologically_valid() {
    for n in 1..12 {
        let spans: Vec<(f64, f64)> = (0..n)
            .map(|i| (i as f64 * 10.0, i as f64 * 10.0 + 2.0 + i as f64))
            .collect();
        let a = assemble_default(&spans);
        a.graph.verify_topology().unwrap();
        assert!(a.graph.is_unconsumed(&a.terminal_video));
        assert!(a.graph.is_unconsumed(&a.terminal_audio));
    }
}

#[test]
fn no_output_pad_collisions_for_long_timelines() {
    let spans: Vec<(f64, f64)> = (0..60)
        .map(|i| (i as f64 * 5.0, i as f64 * 5.0 + 4.0))
        .collect();
    let a = assemble_default(&spans);
    let mut outputs = BTreeSet::new();
    for node in a.graph.nodes() {
        for out in &node.outputs {
            assert!(outputs.insert(out.clone()), "pad {out} produced twice");
        }
    }
    assert_eq!(a.offsets.len(), 60);
}

#[test]
fn assembly_is_idempotent() {
    let spans = [(0.0, 85.0), (125.0, 137.0), (175.0, 297.0), (336.0, 410.0)];
    let a = assemble_default(&spans);
    let b = assemble_default(&spans);
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn zero_length_segment_fails_before_any_graph() {
    let err = assemble(&windows(&[(0.0, 98.0), (50.0, 50.0)]), &TimelineOpts::default())
        .unwrap_err();
    match err {
        SplicerError::InvalidSegment { label, .. } => assert_eq!(label, "2"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn misplaced_title_is_rejected() {
    let ws = vec![Window::content(0.0, 10.0), Window::title(3.0)];
    assert!(matches!(
        assemble(&ws, &TimelineOpts::default()),
        Err(SplicerError::InvalidSegment { .. })
    ));
}

#[test]
fn direct_layout_trims_source_windows() {
    let a = assemble_default(&[(27.0, 95.0), (106.0, 112.0)]);
    assert_eq!(a.input_count(), 2);
    let trims: Vec<&Node> = a
        .graph
        .nodes()
        .iter()
        .filter(|n| n.kind.name() == "trim")
        .collect();
    assert_eq!(trims.len(), 3);
    assert_eq!(trims[0].inputs, vec![Pad::new("0:v"), Pad::new("0:a")]);
    assert_eq!(trims[2].inputs, vec![Pad::new("1:v"), Pad::new("1:a")]);
    assert_eq!(
        trims[2].kind,
        NodeKind::Trim {
            window: TimeRange::new(106.0, 112.0)
        }
    );
}

#[test]
fn extracted_layout_reads_one_input_per_segment() {
    let opts = TimelineOpts {
        layout: SourceLayout::Extracted,
        ..TimelineOpts::default()
    };
    let a = assemble(&windows(&[(27.0, 95.0), (106.0, 112.0)]), &opts).unwrap();
    assert_eq!(a.input_count(), 3);
    let last_trim = &a.graph.nodes()[2];
    assert_eq!(last_trim.inputs, vec![Pad::new("2:v"), Pad::new("2:a")]);
    assert_eq!(
        last_trim.kind,
        NodeKind::Trim {
            window: TimeRange::new(0.0, 6.0)
        }
    );
}

#[test]
fn output_duration_subtracts_one_crossfade_per_transition() {
    let a = assemble_default(&[(0.0, 98.0), (145.0, 233.0)]);
    assert_eq!(a.output_duration(Secs(1.0)), Secs(3.0 + 98.0 + 88.0 - 2.0));
}

#[test]
fn invalid_opts_are_rejected() {
    let opts = TimelineOpts {
        crossfade: Secs(0.0),
        ..TimelineOpts::default()
    };
    assert!(matches!(
        assemble(&windows(&[(0.0, 5.0)]), &opts),
        Err(SplicerError::Config(_))
    ));
}

#[test]
fn supplied_title_must_match_title_duration() {
    let ws = vec![Window::title(5.0), Window::content(0.0, 98.0)];
    assert!(matches!(
        assemble(&ws, &TimelineOpts::default()),
        Err(SplicerError::Config(_))
    ));

    let opts = TimelineOpts {
        title_duration: Secs(5.0),
        ..TimelineOpts::default()
    };
    let a = assemble(&ws, &opts).unwrap();
    assert_eq!(a.segments[0].duration(), Secs(5.0));
    assert_eq!(a.offsets, vec![Secs(4.0)]);
}

#[test]
fn shifted_title_window_is_rejected() {
    let ws = vec![
        Window {
            range: TimeRange::new(5.0, 8.0),
            synthetic: true,
        },
        Window::content(0.0, 98.0),
    ];
    match assemble(&ws, &TimelineOpts::default()).unwrap_err() {
        SplicerError::InvalidSegment { label, .. } => assert_eq!(label, "0"),
        other => panic!("unexpected error: {other}"),
    }
}
