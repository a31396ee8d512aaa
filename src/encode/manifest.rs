use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    encode::sink::{ExportProgress, Exporter},
    foundation::core::Fps,
    foundation::error::{ReelError, ReelResult},
    timeline::audio::AudioMode,
    timeline::schedule::{Schedule, TimelineEntry},
};

/// Exporter writing the schedule as JSON Lines: one header line, then one line per entry.
///
/// Downstream render farms consume the file entry by entry; progress advances per line.
#[derive(Clone, Debug)]
pub struct ManifestExporter {
    out_path: PathBuf,
    overwrite: bool,
}

#[derive(serde::Serialize)]
struct ManifestHeader {
    total_secs: f64,
    total_frames: u64,
    fps: Fps,
    audio_mode: AudioMode,
    visual_entries: usize,
    audio_entries: usize,
}

impl ManifestExporter {
    /// Exporter writing to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite,
        }
    }

    /// Destination file.
    pub fn out_path(&self) -> &Path {
        &self.out_path
    }

    fn write_line<T: serde::Serialize>(out: &mut impl Write, value: &T) -> ReelResult<()> {
        serde_json::to_writer(&mut *out, value)
            .map_err(|e| ReelError::serde(format!("manifest line: {e}")))?;
        out.write_all(b"\n")
            .map_err(|e| ReelError::export(format!("write manifest: {e}")))
    }
}

impl Exporter for ManifestExporter {
    fn export(
        &mut self,
        schedule: &Schedule,
        progress: &mut dyn FnMut(ExportProgress),
    ) -> ReelResult<()> {
        if !self.overwrite && self.out_path.exists() {
            return Err(ReelError::export(format!(
                "output file '{}' already exists",
                self.out_path.display()
            )));
        }
        ensure_parent_dir(&self.out_path)?;

        let file = File::create(&self.out_path).map_err(|e| {
            ReelError::export(format!("create '{}': {e}", self.out_path.display()))
        })?;
        let mut out = BufWriter::new(file);

        let entries: Vec<&TimelineEntry> = schedule
            .visual_entries()
            .iter()
            .chain(schedule.audio_entries())
            .collect();
        let total = entries.len() as u64 + 1;

        Self::write_line(
            &mut out,
            &ManifestHeader {
                total_secs: schedule.total_secs(),
                total_frames: schedule.total_frames(),
                fps: schedule.fps(),
                audio_mode: schedule.audio_mode(),
                visual_entries: schedule.visual_entries().len(),
                audio_entries: schedule.audio_entries().len(),
            },
        )?;
        progress(ExportProgress::new(1, total));

        for (i, entry) in entries.into_iter().enumerate() {
            Self::write_line(&mut out, entry)?;
            progress(ExportProgress::new(i as u64 + 2, total));
        }

        out.flush()
            .map_err(|e| ReelError::export(format!("flush manifest: {e}")))
    }
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/manifest.rs"]
mod tests;
