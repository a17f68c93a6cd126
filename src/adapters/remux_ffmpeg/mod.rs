//! FFmpeg-backed remux of the transport-stream source into MP4
//!
//! Stream copy only: packets are rewritten into the new container with
//! rescaled timestamps, the essence is untouched. The produced file is an
//! intermediate owned by the pipeline and deleted at finalization.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ffmpeg_next::media;
use tracing::{debug, info};

use crate::error::{HudError, HudResult};
use crate::ports::MediaConverter;

/// [`MediaConverter`] backed by libav stream copy.
pub struct FfmpegRemuxer;

impl FfmpegRemuxer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FfmpegRemuxer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaConverter for FfmpegRemuxer {
    async fn convert(&self, source: &Path) -> HudResult<PathBuf> {
        if !source.exists() {
            return Err(HudError::Remux {
                path: source.to_path_buf(),
                message: "source file not found".to_string(),
            });
        }

        let target = remux_target(source);
        info!(
            source = %source.display(),
            target = %target.display(),
            "remuxing transport stream"
        );

        let src = source.to_path_buf();
        let dst = target.clone();
        tokio::task::spawn_blocking(move || remux(&src, &dst))
            .await
            .map_err(|e| HudError::Remux {
                path: source.to_path_buf(),
                message: format!("remux task failed: {e}"),
            })??;

        Ok(target)
    }
}

/// Intermediate path alongside the source: `clip.ts` -> `clip.remux.mp4`.
/// Never collides with the user's original input.
fn remux_target(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "source".to_string());
    source.with_file_name(format!("{stem}.remux.mp4"))
}

fn remux(source: &Path, target: &Path) -> HudResult<()> {
    let fail = |message: String| HudError::Remux {
        path: source.to_path_buf(),
        message,
    };

    let mut ictx = ffmpeg_next::format::input(&source)
        .map_err(|e| fail(format!("failed to open input: {e}")))?;
    let mut octx = ffmpeg_next::format::output(&target)
        .map_err(|e| fail(format!("failed to create output: {e}")))?;

    // Map every copyable stream to an output index; everything else (data
    // streams the MP4 muxer cannot carry) is dropped.
    let mut stream_mapping = vec![usize::MAX; ictx.nb_streams() as usize];
    let mut output_index = 0usize;
    for (index, stream) in ictx.streams().enumerate() {
        let medium = stream.parameters().medium();
        if !matches!(
            medium,
            media::Type::Video | media::Type::Audio | media::Type::Subtitle
        ) {
            continue;
        }

        let mut ost = octx
            .add_stream(ffmpeg_next::codec::encoder::find(ffmpeg_next::codec::Id::None))
            .map_err(|e| fail(format!("failed to add output stream: {e}")))?;
        ost.set_parameters(stream.parameters());
        // The source container's codec tag is meaningless in MP4.
        unsafe {
            (*ost.parameters().as_mut_ptr()).codec_tag = 0;
        }

        stream_mapping[index] = output_index;
        output_index += 1;
    }

    if output_index == 0 {
        return Err(fail("no copyable streams in source".to_string()));
    }

    octx.write_header()
        .map_err(|e| fail(format!("failed to write output header: {e}")))?;

    let mut packets = 0u64;
    for (stream, mut packet) in ictx.packets() {
        let out = stream_mapping[stream.index()];
        if out == usize::MAX {
            continue;
        }

        let ost_time_base = octx
            .stream(out)
            .map(|s| s.time_base())
            .ok_or_else(|| fail(format!("output stream {out} vanished")))?;
        packet.rescale_ts(stream.time_base(), ost_time_base);
        packet.set_stream(out);
        packet.set_position(-1);

        packet
            .write_interleaved(&mut octx)
            .map_err(|e| fail(format!("failed to write packet: {e}")))?;
        packets += 1;
    }

    octx.write_trailer()
        .map_err(|e| fail(format!("failed to write output trailer: {e}")))?;

    debug!(packets, "remux complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_sits_alongside_source_with_remux_suffix() {
        let target = remux_target(Path::new("/data/trip/20240511_1403.ts"));
        assert_eq!(
            target,
            PathBuf::from("/data/trip/20240511_1403.remux.mp4")
        );
    }

    #[test]
    fn target_never_equals_source() {
        let source = Path::new("/data/trip/clip.ts");
        assert_ne!(remux_target(source), source);
    }
}
