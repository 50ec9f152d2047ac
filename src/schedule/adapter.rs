use std::{
    future::Future,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use anyhow::Context as _;

use crate::foundation::{
    core::FrameRGBA,
    error::{DlIconError, DlIconResult},
};

/// Boundary to whatever ultimately shows the icon (toolbar, tray, files).
///
/// Both calls may fail; the controller logs and swallows those failures so
/// a broken frame never stops the loop.
pub trait PresentationAdapter: Send + Sync + 'static {
    fn present(&self, frame: &FrameRGBA) -> impl Future<Output = DlIconResult<()>> + Send;
    fn reset_to_default(&self) -> impl Future<Output = DlIconResult<()>> + Send;
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAdapter;

impl PresentationAdapter for NullAdapter {
    async fn present(&self, _frame: &FrameRGBA) -> DlIconResult<()> {
        Ok(())
    }

    async fn reset_to_default(&self) -> DlIconResult<()> {
        Ok(())
    }
}

/// Writes presented frames as `frame_NNNNN.png` and resets as
/// `reset_NNNNN.marker` into one directory. Both share a counter so the
/// directory listing replays the presentation order.
#[derive(Debug)]
pub struct PngSequenceAdapter {
    dir: PathBuf,
    counter: AtomicU64,
}

impl PngSequenceAdapter {
    pub fn new(dir: impl Into<PathBuf>) -> DlIconResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        Ok(Self {
            dir,
            counter: AtomicU64::new(0),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Entries written so far (frames and reset markers).
    pub fn written(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    fn next_path(&self, prefix: &str, ext: &str) -> PathBuf {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!("{prefix}_{n:05}.{ext}"))
    }
}

impl PresentationAdapter for PngSequenceAdapter {
    async fn present(&self, frame: &FrameRGBA) -> DlIconResult<()> {
        let path = self.next_path("frame", "png");
        let (width, height) = (frame.width, frame.height);
        let rgba = frame.to_straight_rgba8();
        tokio::task::spawn_blocking(move || write_png(&path, &rgba, width, height))
            .await
            .map_err(|e| DlIconError::presentation(format!("png writer task: {e}")))?
    }

    async fn reset_to_default(&self) -> DlIconResult<()> {
        let path = self.next_path("reset", "marker");
        tokio::fs::write(&path, b"reset\n")
            .await
            .map_err(|e| DlIconError::presentation(format!("write '{}': {e}", path.display())))
    }
}

pub(crate) fn write_png(path: &Path, rgba: &[u8], width: u32, height: u32) -> DlIconResult<()> {
    image::save_buffer_with_format(
        path,
        rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| DlIconError::presentation(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/adapter.rs"]
mod tests;
