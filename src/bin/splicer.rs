use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "splicer", version)]
struct Cli {
    /// More log output (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the crossfade filter graph of every job without running ffmpeg.
    Plan(PlanArgs),
    /// Render every job to MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Job manifest (TOML).
    #[arg(long)]
    manifest: PathBuf,

    /// Emit the full assembly as JSON instead of filter text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Job manifest (TOML).
    #[arg(long)]
    manifest: PathBuf,

    /// Print the ffmpeg commands instead of running them.
    #[arg(long)]
    dry_run: bool,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<ExitCode> {
    let manifest = splicer::Manifest::load(&args.manifest)?;
    let mut failed = 0usize;

    for (job, plan) in manifest.videos.iter().zip(splicer::plan_all(&manifest)) {
        let plan = match plan {
            Ok(p) => p,
            Err(e) => {
                eprintln!("{}: {e}", job.output_name());
                failed += 1;
                continue;
            }
        };

        if args.json {
            let text = serde_json::to_string_pretty(&plan.assembly)
                .with_context(|| format!("serialize assembly for '{}'", job.output_name()))?;
            println!("{text}");
        } else {
            println!("# {} ({})", plan.output.display(), plan.fingerprint);
            println!("{}", plan.filtergraph);
            println!(
                "# map [{}] [{}]",
                plan.assembly.terminal_video, plan.assembly.terminal_audio
            );
        }
    }

    Ok(exit_code(failed))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<ExitCode> {
    let manifest = splicer::Manifest::load(&args.manifest)?;

    if args.dry_run {
        let mut failed = 0usize;
        let scratch = std::env::temp_dir().join("splicer-dry-run");
        for (job, plan) in manifest.videos.iter().zip(splicer::plan_all(&manifest)) {
            let cmds = plan.and_then(|p| splicer::render_commands(&p, &manifest.defaults, &scratch));
            match cmds {
                Ok(cmds) => cmds.iter().for_each(|c| println!("{c}")),
                Err(e) => {
                    eprintln!("{}: {e}", job.output_name());
                    failed += 1;
                }
            }
        }
        return Ok(exit_code(failed));
    }

    if !splicer::is_ffmpeg_on_path() {
        anyhow::bail!("ffmpeg is required for rendering, but was not found on PATH");
    }

    let bar = ProgressBar::new(manifest.videos.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("Progress: |{bar:40}| {percent}% ({pos}/{len}) {msg}")
            .context("progress bar template")?
            .progress_chars("█-"),
    );
    bar.enable_steady_tick(Duration::from_millis(200));
    if let Some(first) = manifest.videos.first() {
        bar.set_message(format!("Creating: {}.mp4", first.output_name()));
    }

    let names: Vec<String> = manifest.videos.iter().map(|v| v.output_name()).collect();
    let outcomes = splicer::render_all(&manifest, |outcome| {
        bar.inc(1);
        let next = names.get(bar.position() as usize);
        if let Some(next) = next {
            bar.set_message(format!("Creating: {next}.mp4"));
        }
        if let Err(e) = &outcome.result {
            bar.println(format!("failed: {}: {e}", outcome.name));
        }
    });
    bar.finish_with_message("done");

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    for o in &outcomes {
        if let Ok(path) = &o.result {
            eprintln!("wrote {}", path.display());
        }
    }
    if failed > 0 {
        eprintln!("{failed} of {} job(s) failed", outcomes.len());
    }
    Ok(exit_code(failed))
}

fn exit_code(failed: usize) -> ExitCode {
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
