mod browser;
mod command;
mod ffmpeg;

pub use browser::{Chrome, PageDriver};
pub use ffmpeg::{ClipExtractor, Ffmpeg};
