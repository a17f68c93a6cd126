// Adapters - concrete implementations of the media ports

pub mod media_opencv;
pub mod remux_ffmpeg;

pub use media_opencv::OpencvBackend;
pub use remux_ffmpeg::FfmpegRemuxer;
