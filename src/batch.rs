//! Planning and rendering of manifest jobs.
//!
//! Planning is pure and runs for all jobs in parallel. Rendering shells out to `ffmpeg` and is
//! done one job at a time; a failed job does not stop the batch.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::{
    config::manifest::{Defaults, Manifest, VideoJob},
    encode::ffmpeg::{FfmpegCommand, extract_clip_command, join_command},
    encode::title::title_card_command,
    fingerprint::{GraphFingerprint, fingerprint_assembly},
    foundation::error::SplicerResult,
    graph::assemble::{Assembly, SourceLayout, assemble},
    graph::render::render_filtergraph,
    timeline::segment::Window,
};

/// Everything needed to render one job, computed up front.
#[derive(Clone, Debug)]
pub struct JobPlan {
    pub job: VideoJob,
    pub assembly: Assembly,
    pub filtergraph: String,
    pub fingerprint: GraphFingerprint,
    pub output: PathBuf,
}

/// Assemble the graph for one job. Every job opens with its title card, so a job without
/// segments still yields a (title-only) plan.
pub fn plan_job(job: &VideoJob, defaults: &Defaults) -> SplicerResult<JobPlan> {
    let windows: Vec<Window> = std::iter::once(Window::title(defaults.title_duration))
        .chain(job.windows())
        .collect();
    let assembly = assemble(&windows, &defaults.timeline_opts())?;
    let filtergraph = render_filtergraph(&assembly.graph);
    let fingerprint = fingerprint_assembly(&assembly);
    let output = defaults
        .out_dir
        .join(format!("{}.mp4", job.output_name()));
    Ok(JobPlan {
        job: job.clone(),
        assembly,
        filtergraph,
        fingerprint,
        output,
    })
}

/// Plan every job of `manifest` in parallel. Results keep manifest order.
pub fn plan_all(manifest: &Manifest) -> Vec<SplicerResult<JobPlan>> {
    manifest
        .videos
        .par_iter()
        .map(|job| plan_job(job, &manifest.defaults))
        .collect()
}

fn scratch_clip(scratch: &Path, index: usize) -> PathBuf {
    scratch.join(format!("segment_{index}.mp4"))
}

/// The ffmpeg invocations that render `plan`, in execution order.
///
/// Scratch clips (the title card and, for [`SourceLayout::Extracted`], every segment) are
/// written under `scratch`.
pub fn render_commands(
    plan: &JobPlan,
    defaults: &Defaults,
    scratch: &Path,
) -> SplicerResult<Vec<FfmpegCommand>> {
    let segments = &plan.assembly.segments;
    let title_clip = scratch_clip(scratch, 0);

    let mut commands = vec![title_card_command(
        &plan.job.title_card(),
        &defaults.title,
        segments[0].duration(),
        &title_clip,
        &defaults.encode,
    )?];

    let mut inputs = vec![title_clip];
    match plan.assembly.layout {
        SourceLayout::Direct => {
            if segments.len() > 1 {
                inputs.push(plan.job.source.clone());
            }
        }
        SourceLayout::Extracted => {
            for seg in &segments[1..] {
                let clip = scratch_clip(scratch, seg.index());
                commands.push(extract_clip_command(
                    &plan.job.source,
                    seg.range(),
                    &clip,
                    defaults.encode.overwrite,
                ));
                inputs.push(clip);
            }
        }
    }

    commands.push(join_command(
        &plan.assembly,
        &inputs,
        &plan.filtergraph,
        &plan.output,
        &defaults.encode,
    )?);
    Ok(commands)
}

/// Render one planned job. Scratch clips are removed when this returns.
#[tracing::instrument(skip(plan, defaults), fields(output = %plan.output.display()))]
pub fn render_job(plan: &JobPlan, defaults: &Defaults) -> SplicerResult<PathBuf> {
    let scratch = tempfile::Builder::new()
        .prefix("splicer-")
        .tempdir()
        .context("failed to create scratch directory")?;

    let commands = render_commands(plan, defaults, scratch.path())?;
    tracing::info!(
        fingerprint = %plan.fingerprint,
        steps = commands.len(),
        transitions = plan.assembly.offsets.len(),
        "rendering job"
    );
    for cmd in &commands {
        cmd.run()?;
    }
    Ok(plan.output.clone())
}

/// Outcome of one job in a batch run.
#[derive(Debug)]
pub struct JobOutcome {
    pub name: String,
    pub result: SplicerResult<PathBuf>,
}

/// Plan and render every job, calling `on_done` after each one.
pub fn render_all(
    manifest: &Manifest,
    mut on_done: impl FnMut(&JobOutcome),
) -> Vec<JobOutcome> {
    let plans = plan_all(manifest);
    let mut outcomes = Vec::with_capacity(plans.len());
    for (job, plan) in manifest.videos.iter().zip(plans) {
        let name = job.output_name();
        let result = plan.and_then(|p| render_job(&p, &manifest.defaults));
        if let Err(e) = &result {
            tracing::warn!(job = %name, error = %e, "job failed");
        }
        let outcome = JobOutcome { name, result };
        on_done(&outcome);
        outcomes.push(outcome);
    }
    outcomes
}

#[cfg(test)]
#[path = "../tests/unit/batch.rs"]
mod tests;
