use std::path::Path;

use crate::{
    assets::source::SourceLoader,
    assets::store::load_sources,
    compile::plan::{Compositor, LayerPlan, compile_layers, mount_plan},
    foundation::error::{ReelError, ReelResult},
    playlist::model::{MediaConfig, VisualKind},
    timeline::schedule::{Schedule, build_schedule},
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Build progress as shown to the user. Every build ends in `Ready` or `Failed`.
pub enum BuildStatus {
    /// Work in progress, with a human-readable stage.
    Loading(String),
    /// The composition is mounted and playable.
    Ready,
    /// The build stopped; nothing was mounted.
    Failed(String),
}

impl BuildStatus {
    /// `true` for `Ready` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading(_))
    }
}

/// Output of a successful build.
#[derive(Clone, Debug)]
pub struct Composed {
    /// The document the build started from.
    pub config: MediaConfig,
    /// Compiled timeline.
    pub schedule: Schedule,
    /// Layer requests that were mounted.
    pub plan: LayerPlan,
}

/// Read the playlist document at `path`, then [`compose`] it.
#[tracing::instrument(skip(loader, compositor, on_status))]
pub fn compose_from_path(
    path: &Path,
    loader: &dyn SourceLoader,
    compositor: &mut dyn Compositor,
    on_status: &mut dyn FnMut(&BuildStatus),
) -> ReelResult<Composed> {
    on_status(&BuildStatus::Loading(
        "Loading media configuration...".to_string(),
    ));
    let config = match MediaConfig::from_path(path) {
        Ok(config) => config,
        Err(e) => return Err(fail(e, on_status)),
    };
    compose(config, loader, compositor, on_status)
}

/// Load sources, compile the schedule and mount it on `compositor`.
///
/// No layer is created before the whole plan has compiled, so a failure never leaves a partial
/// composition behind. `on_status` always receives a terminal status last.
pub fn compose(
    config: MediaConfig,
    loader: &dyn SourceLoader,
    compositor: &mut dyn Compositor,
    on_status: &mut dyn FnMut(&BuildStatus),
) -> ReelResult<Composed> {
    match try_compose(config, loader, compositor, on_status) {
        Ok(composed) => {
            on_status(&BuildStatus::Ready);
            tracing::info!(
                total_secs = composed.schedule.total_secs(),
                layers = composed.plan.layers.len(),
                "composition ready"
            );
            Ok(composed)
        }
        Err(e) => Err(fail(e, on_status)),
    }
}

fn try_compose(
    config: MediaConfig,
    loader: &dyn SourceLoader,
    compositor: &mut dyn Compositor,
    on_status: &mut dyn FnMut(&BuildStatus),
) -> ReelResult<Composed> {
    config.validate()?;

    on_status(&BuildStatus::Loading(format!(
        "Loading {} videos, {} images, {} audio tracks...",
        config.count_of(VisualKind::Video),
        config.count_of(VisualKind::Image),
        config.tracks.len()
    )));
    let sources = load_sources(&config, loader)?;

    on_status(&BuildStatus::Loading(
        "Creating clips and layers...".to_string(),
    ));
    let schedule = build_schedule(&config, &sources)?;
    let plan = compile_layers(&schedule);

    on_status(&BuildStatus::Loading(
        "Mounting composition to player...".to_string(),
    ));
    mount_plan(&plan, compositor)?;

    Ok(Composed {
        config,
        schedule,
        plan,
    })
}

fn fail(e: ReelError, on_status: &mut dyn FnMut(&BuildStatus)) -> ReelError {
    tracing::error!(error = %e, "composition build failed");
    on_status(&BuildStatus::Failed(e.to_string()));
    e
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
