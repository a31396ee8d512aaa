use crate::{foundation::error::ReelResult, timeline::schedule::Schedule};

/// Progress reported by an exporter: `done` out of `total` work units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportProgress {
    /// Units completed.
    pub done: u64,
    /// Units in total.
    pub total: u64,
}

impl ExportProgress {
    /// Build a progress value.
    pub fn new(done: u64, total: u64) -> Self {
        Self { done, total }
    }

    /// Completed fraction in `[0, 1]`; 0 when `total` is 0.
    pub fn fraction(self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        ((self.done as f64) / (self.total as f64)).clamp(0.0, 1.0)
    }

    /// Completed fraction as a whole percentage.
    pub fn percent(self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }
}

/// Export collaborator. Receives the schedule unmodified.
pub trait Exporter {
    /// Export `schedule`, calling `progress` as work completes.
    fn export(
        &mut self,
        schedule: &Schedule,
        progress: &mut dyn FnMut(ExportProgress),
    ) -> ReelResult<()>;
}

/// Run an exporter and surface its progress; a successful export always ends at 100%.
pub fn run_export(
    exporter: &mut dyn Exporter,
    schedule: &Schedule,
    on_progress: &mut dyn FnMut(ExportProgress),
) -> ReelResult<()> {
    let mut last = ExportProgress::default();
    exporter.export(schedule, &mut |p| {
        last = p;
        on_progress(p);
    })?;
    if last.total == 0 || last.done < last.total {
        on_progress(ExportProgress::new(1, 1));
    }
    tracing::info!(total_frames = schedule.total_frames(), "export finished");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
