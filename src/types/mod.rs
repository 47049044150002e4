mod extension;
mod timestamp;
mod video;
mod window;

pub use extension::VideoExtension;
pub use timestamp::Timestamp;
pub use video::SourceVideo;
pub use window::TrimWindow;
