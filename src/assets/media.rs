use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

/// Container-level duration of a video or audio file, in seconds.
///
/// Returns `Ok(None)` when the container does not report a usable duration; the caller falls
/// back to the per-kind default.
#[cfg(feature = "media-ffmpeg")]
pub fn probe_duration(source_path: &Path) -> ReelResult<Option<f64>> {
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        format: Option<ProbeFormat>,
    }

    let out = std::process::Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_format"])
        .arg(source_path)
        .output()
        .map_err(|e| ReelError::Other(anyhow::anyhow!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(ReelError::Other(anyhow::anyhow!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| ReelError::serde(format!("ffprobe json parse failed: {e}")))?;
    Ok(parsed
        .format
        .and_then(|f| f.duration)
        .and_then(|s| s.parse::<f64>().ok()))
}

/// Without the `media-ffmpeg` feature no container is inspected and durations stay unknown.
#[cfg(not(feature = "media-ffmpeg"))]
pub fn probe_duration(_source_path: &Path) -> ReelResult<Option<f64>> {
    Ok(None)
}

/// Pixel dimensions of an image file, read from its header.
pub fn probe_image(source_path: &Path) -> ReelResult<(u32, u32)> {
    image::image_dimensions(source_path).map_err(|e| {
        ReelError::Other(anyhow::anyhow!(
            "image decode failed for '{}': {e}",
            source_path.display()
        ))
    })
}

/// `true` when an `ffprobe` binary can be executed.
pub fn is_ffprobe_on_path() -> bool {
    std::process::Command::new("ffprobe")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
