pub mod ffmpeg;
pub mod title;
