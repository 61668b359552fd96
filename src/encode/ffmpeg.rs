use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{
    foundation::core::TimeRange,
    foundation::error::{SplicerError, SplicerResult},
    graph::{assemble::Assembly, render::map_label},
};

/// Output codec settings for the final join.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EncodeSettings {
    pub video_codec: String,
    pub pix_fmt: String,
    pub audio_codec: String,
    pub overwrite: bool,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            pix_fmt: "yuv420p".to_string(),
            audio_codec: "aac".to_string(),
            overwrite: true,
        }
    }
}

impl EncodeSettings {
    pub(crate) fn push_output_args(&self, cmd: &mut FfmpegCommand) {
        cmd.args(["-c:v", self.video_codec.as_str()]);
        cmd.args(["-pix_fmt", self.pix_fmt.as_str()]);
        cmd.args(["-c:a", self.audio_codec.as_str(), "-movflags", "+faststart"]);
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> SplicerResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// One `ffmpeg` invocation, built as an argument vector.
///
/// Arguments are passed straight to the process (no shell), so paths and filter text need no
/// shell quoting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FfmpegCommand {
    args: Vec<OsString>,
    output: PathBuf,
}

impl FfmpegCommand {
    pub fn new(overwrite: bool) -> Self {
        let mut cmd = Self {
            args: Vec::new(),
            output: PathBuf::new(),
        };
        cmd.args(["-hide_banner", "-loglevel", "error"]);
        cmd.arg(if overwrite { "-y" } else { "-n" });
        cmd
    }

    pub fn arg(&mut self, a: impl Into<OsString>) -> &mut Self {
        self.args.push(a.into());
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn input(&mut self, path: &Path) -> &mut Self {
        self.arg("-i").arg(path.as_os_str())
    }

    /// Set the output file; it is appended last.
    pub fn output(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.output = path.into();
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Full argument list, output last.
    pub fn to_args(&self) -> Vec<OsString> {
        let mut out = self.args.clone();
        out.push(self.output.clone().into_os_string());
        out
    }

    /// Run to completion. A non-zero exit becomes
    /// [`SplicerError::BackendExecutionFailed`] carrying ffmpeg's stderr.
    #[tracing::instrument(skip(self), fields(output = %self.output.display()))]
    pub fn run(&self) -> SplicerResult<()> {
        if self.output.as_os_str().is_empty() {
            return Err(SplicerError::config("ffmpeg command has no output path"));
        }
        ensure_parent_dir(&self.output)?;

        tracing::debug!(command = %self, "spawning ffmpeg");
        let output = Command::new("ffmpeg")
            .args(self.to_args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                SplicerError::backend(
                    "spawn failed",
                    format!("failed to spawn ffmpeg (is it installed and on PATH?): {e}"),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SplicerError::backend(
                output.status.to_string(),
                stderr.trim(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for FfmpegCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ffmpeg")?;
        for a in self.to_args() {
            let a = a.to_string_lossy();
            if a.is_empty() || a.contains(|c: char| c.is_whitespace() || "\"'[];|&".contains(c))
            {
                write!(f, " '{}'", a.replace('\'', r"'\''"))?;
            } else {
                write!(f, " {a}")?;
            }
        }
        Ok(())
    }
}

/// Stream-copy `range` of `source` into its own file.
pub fn extract_clip_command(
    source: &Path,
    range: TimeRange,
    out: impl Into<PathBuf>,
    overwrite: bool,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new(overwrite);
    cmd.args(["-ss".to_string(), range.start.to_string()])
        .input(source)
        .args(["-t".to_string(), range.duration().to_string()])
        .args(["-c", "copy"])
        .output(out);
    cmd
}

/// Run the assembled graph over `inputs` and mux the terminal pads into `out`.
///
/// `inputs[i]` becomes engine input `i`; the count must match what the graph reads.
pub fn join_command(
    assembly: &Assembly,
    inputs: &[PathBuf],
    filtergraph: &str,
    out: impl Into<PathBuf>,
    settings: &EncodeSettings,
) -> SplicerResult<FfmpegCommand> {
    let expected = assembly.input_count();
    if inputs.len() != expected {
        return Err(SplicerError::config(format!(
            "graph reads {expected} input(s) but {} were supplied",
            inputs.len()
        )));
    }

    let mut cmd = FfmpegCommand::new(settings.overwrite);
    for input in inputs {
        cmd.input(input);
    }
    cmd.arg("-filter_complex").arg(filtergraph);
    cmd.arg("-map").arg(map_label(&assembly.terminal_video));
    cmd.arg("-map").arg(map_label(&assembly.terminal_audio));
    settings.push_output_args(&mut cmd);
    cmd.output(out);
    Ok(cmd)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
