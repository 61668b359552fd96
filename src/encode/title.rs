use std::path::PathBuf;

use crate::{
    encode::ffmpeg::{EncodeSettings, FfmpegCommand},
    foundation::core::{Fps, Secs},
    foundation::error::{SplicerError, SplicerResult},
};

/// Two centred lines of text shown over a solid background before the first segment.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TitleCard {
    pub first_line: String,
    pub second_line: String,
}

/// Look of the title clip.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TitleCardOpts {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
    pub background: String,
    pub font_color: String,
    pub font_size: u32,
    pub sample_rate: u32,
}

impl Default for TitleCardOpts {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: Fps::default(),
            background: "black".to_string(),
            font_color: "white".to_string(),
            font_size: 96,
            sample_rate: 48_000,
        }
    }
}

impl TitleCardOpts {
    pub fn validate(&self) -> SplicerResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SplicerError::config("title width/height must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // yuv420p needs even dimensions.
            return Err(SplicerError::config(
                "title width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.font_size == 0 {
            return Err(SplicerError::config("title font_size must be non-zero"));
        }
        if self.sample_rate == 0 {
            return Err(SplicerError::config("title sample_rate must be non-zero"));
        }
        for (name, v) in [
            ("background", &self.background),
            ("font_color", &self.font_color),
        ] {
            if v.trim().is_empty() || v.contains([':', ',', ';', '[', ']', '\'']) {
                return Err(SplicerError::config(format!(
                    "title {name} '{v}' is not a plain ffmpeg color"
                )));
            }
        }
        Ok(())
    }
}

/// Pad names the title filter writes.
pub const TITLE_VIDEO_PAD: &str = "titlev";
pub const TITLE_AUDIO_PAD: &str = "titlea";

/// Escape text for a `drawtext=text=` value inside a filtergraph.
///
/// Two levels apply: the option value (`\`, `'`, `:` and `%` expansion) and then the
/// filtergraph itself (`\`, `'`, `[`, `]`, `,`, `;`).
pub fn escape_drawtext(text: &str) -> String {
    let mut value = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '\'' | ':' | '%') {
            value.push('\\');
        }
        value.push(c);
    }

    let mut graph = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '\'' | '[' | ']' | ',' | ';') {
            graph.push('\\');
        }
        graph.push(c);
    }
    graph
}

fn drawtext(input: &str, text: &str, y: &str, opts: &TitleCardOpts, output: &str) -> String {
    let options = [
        format!("text={}", escape_drawtext(text)),
        "x=(w-text_w)/2".to_string(),
        format!("y={y}"),
        format!("fontcolor={}", opts.font_color),
        format!("fontsize={}", opts.font_size),
    ];
    format!("[{input}]drawtext={}[{output}]", options.join(":"))
}

/// Filtergraph drawing both lines onto input 0 and passing input 1's silence through.
pub fn title_filter(card: &TitleCard, opts: &TitleCardOpts) -> String {
    [
        drawtext("0:v", &card.first_line, "(h-4*text_h)/2", opts, "firstline"),
        drawtext(
            "firstline",
            &card.second_line,
            "(h-text_h)/2",
            opts,
            TITLE_VIDEO_PAD,
        ),
        format!("[1:a]anull[{TITLE_AUDIO_PAD}]"),
    ]
    .join(";")
}

/// Render the title clip: a solid color source plus silent audio, both `duration` long.
pub fn title_card_command(
    card: &TitleCard,
    opts: &TitleCardOpts,
    duration: Secs,
    out: impl Into<PathBuf>,
    settings: &EncodeSettings,
) -> SplicerResult<FfmpegCommand> {
    opts.validate()?;
    if !duration.is_finite() || duration.0 <= 0.0 {
        return Err(SplicerError::config(format!(
            "title duration must be positive, got {}",
            duration.0
        )));
    }

    let d = duration.to_string();
    let mut cmd = FfmpegCommand::new(settings.overwrite);
    cmd.args(["-f", "lavfi", "-t", d.as_str(), "-r"])
        .arg(opts.fps.to_ffmpeg())
        .arg("-i")
        .arg(format!(
            "color={}:{}x{}",
            opts.background, opts.width, opts.height
        ));
    cmd.args(["-f", "lavfi", "-t", d.as_str(), "-i"]).arg(format!(
        "anullsrc=channel_layout=stereo:sample_rate={}",
        opts.sample_rate
    ));
    cmd.arg("-filter_complex").arg(title_filter(card, opts));
    cmd.args(["-map".to_string(), format!("[{TITLE_VIDEO_PAD}]")]);
    cmd.args(["-map".to_string(), format!("[{TITLE_AUDIO_PAD}]")]);
    settings.push_output_args(&mut cmd);
    cmd.output(out);
    Ok(cmd)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/title.rs"]
mod tests;
