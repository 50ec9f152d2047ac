use super::*;
use crate::foundation::core::IconSize;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dlicon-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[tokio::test]
async fn png_adapter_writes_frames_and_markers_in_order() {
    let dir = scratch_dir("png-adapter");
    let adapter = PngSequenceAdapter::new(&dir).unwrap();
    let frame = FrameRGBA::transparent(IconSize::new(16).unwrap());

    adapter.present(&frame).await.unwrap();
    adapter.reset_to_default().await.unwrap();
    adapter.present(&frame).await.unwrap();

    assert_eq!(adapter.written(), 3);
    assert!(dir.join("frame_00000.png").is_file());
    assert!(dir.join("reset_00001.marker").is_file());
    assert!(dir.join("frame_00002.png").is_file());

    let decoded = image::open(dir.join("frame_00000.png")).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (16, 16));
    assert!(decoded.pixels().all(|p| p.0[3] == 0));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn png_adapter_reports_write_failures_as_presentation_errors() {
    let dir = scratch_dir("png-adapter-gone");
    let adapter = PngSequenceAdapter::new(&dir).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    let frame = FrameRGBA::transparent(IconSize::new(16).unwrap());
    let err = adapter.present(&frame).await.unwrap_err();
    assert!(matches!(err, DlIconError::Presentation(_)));
}

#[tokio::test]
async fn null_adapter_accepts_everything() {
    let frame = FrameRGBA::transparent(IconSize::default());
    NullAdapter.present(&frame).await.unwrap();
    NullAdapter.reset_to_default().await.unwrap();
}
