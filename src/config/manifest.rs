//! Batch job manifest.
//!
//! One `[[video]]` table per output file:
//!
//! ```toml
//! [defaults]
//! crossfade = 1
//! out_dir = "out"
//!
//! [[video]]
//! first_line = "Nishant Dash"
//! second_line = "PA1"
//! source = "nishant.MP4"
//! segments = [[27, 95], [106, 112]]
//! output = "nishant_poomsae"
//! ```

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    encode::ffmpeg::EncodeSettings,
    encode::title::{TitleCard, TitleCardOpts},
    foundation::core::Secs,
    foundation::error::{SplicerError, SplicerResult},
    graph::assemble::{SourceLayout, TimelineOpts},
    timeline::offsets::DEFAULT_CROSSFADE,
    timeline::segment::{DEFAULT_TITLE_DURATION, Window},
};

/// Settings shared by every job in a manifest.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    pub crossfade: Secs,
    pub title_duration: Secs,
    pub layout: SourceLayout,
    pub out_dir: PathBuf,
    pub title: TitleCardOpts,
    pub encode: EncodeSettings,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            crossfade: DEFAULT_CROSSFADE,
            title_duration: DEFAULT_TITLE_DURATION,
            layout: SourceLayout::default(),
            out_dir: PathBuf::from("."),
            title: TitleCardOpts::default(),
            encode: EncodeSettings::default(),
        }
    }
}

impl Defaults {
    pub fn timeline_opts(&self) -> TimelineOpts {
        TimelineOpts {
            crossfade: self.crossfade,
            title_duration: self.title_duration,
            layout: self.layout,
        }
    }
}

/// One output video: a title card plus the segments cut from `source`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VideoJob {
    pub first_line: String,
    #[serde(default)]
    pub second_line: String,
    pub source: PathBuf,
    #[serde(default)]
    pub segments: Vec<(f64, f64)>,
    /// Output file stem; derived from the title lines when absent.
    #[serde(default)]
    pub output: Option<String>,
}

impl VideoJob {
    /// Output file stem. Defaults to `{second_line}_{first_line}` with spaces replaced by `_`.
    pub fn output_name(&self) -> String {
        match &self.output {
            Some(name) => name.clone(),
            None => format!("{}_{}", self.second_line, self.first_line).replace(' ', "_"),
        }
    }

    pub fn title_card(&self) -> TitleCard {
        TitleCard {
            first_line: self.first_line.clone(),
            second_line: self.second_line.clone(),
        }
    }

    pub fn windows(&self) -> Vec<Window> {
        self.segments.iter().copied().map(Window::from).collect()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(rename = "video", default)]
    pub videos: Vec<VideoJob>,
}

impl Manifest {
    /// Parse manifest text. Relative `source` and `out_dir` paths resolve against `base_dir`.
    pub fn from_toml_str(text: &str, base_dir: &Path) -> SplicerResult<Self> {
        let mut manifest: Manifest = toml::from_str(text)
            .map_err(|e| SplicerError::serde(format!("invalid manifest: {e}")))?;

        for job in &mut manifest.videos {
            if job.source.is_relative() {
                job.source = base_dir.join(&job.source);
            }
        }
        if manifest.defaults.out_dir.is_relative() {
            manifest.defaults.out_dir = base_dir.join(&manifest.defaults.out_dir);
        }

        manifest.validate()?;
        Ok(manifest)
    }

    pub fn load(path: &Path) -> SplicerResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest '{}'", path.display()))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let manifest = Self::from_toml_str(&text, base_dir)?;
        tracing::info!(
            path = %path.display(),
            jobs = manifest.videos.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    pub fn validate(&self) -> SplicerResult<()> {
        if self.videos.is_empty() {
            return Err(SplicerError::config(
                "manifest must contain at least one [[video]] entry",
            ));
        }
        self.defaults.timeline_opts().validate()?;
        self.defaults.title.validate()?;

        let mut names = BTreeSet::new();
        for (i, job) in self.videos.iter().enumerate() {
            if job.first_line.trim().is_empty() {
                return Err(SplicerError::config(format!(
                    "video #{i}: first_line must be non-empty"
                )));
            }
            let name = job.output_name();
            if name.trim().is_empty() || name.contains(['/', '\\']) {
                return Err(SplicerError::config(format!(
                    "video #{i}: output name '{name}' must be a plain file stem"
                )));
            }
            if !names.insert(name.clone()) {
                return Err(SplicerError::config(format!(
                    "video #{i}: output name '{name}' is used more than once"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/manifest.rs"]
mod tests;
