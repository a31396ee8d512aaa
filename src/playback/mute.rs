use crate::foundation::error::ReelResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A place a mute toggle can be applied to.
pub enum MuteSurface {
    /// A mute flag on the composition itself.
    CompositionFlag,
    /// Every media element the player mounted.
    MediaElements,
    /// The composition's master volume (0 when muted, restored after).
    MasterVolume,
}

/// Probe order used unless overridden.
pub const DEFAULT_MUTE_PROBES: [MuteSurface; 3] = [
    MuteSurface::CompositionFlag,
    MuteSurface::MediaElements,
    MuteSurface::MasterVolume,
];

/// Mute capabilities exposed by the active player.
pub trait AudioSurfaces {
    /// Whether `surface` is available.
    fn supports(&self, surface: MuteSurface) -> bool;
    /// Apply the mute state to `surface`.
    fn apply_mute(&mut self, surface: MuteSurface, muted: bool) -> ReelResult<()>;
}

/// Mute state plus the ordered capability probes used to apply it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MuteControl {
    muted: bool,
    probes: Vec<MuteSurface>,
}

impl MuteControl {
    /// Control starting in the given state with [`DEFAULT_MUTE_PROBES`].
    pub fn new(start_muted: bool) -> Self {
        Self {
            muted: start_muted,
            probes: DEFAULT_MUTE_PROBES.to_vec(),
        }
    }

    /// Control for a host; constrained (mobile) hosts start muted.
    pub fn for_host(constrained_host: bool) -> Self {
        Self::new(constrained_host)
    }

    /// Replace the probe order.
    pub fn with_probes(mut self, probes: impl Into<Vec<MuteSurface>>) -> Self {
        self.probes = probes.into();
        self
    }

    /// Current state.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Change state and apply it. Returns the surface used, or `None` if the state was already
    /// set or no surface is supported.
    pub fn set_muted(
        &mut self,
        surfaces: &mut dyn AudioSurfaces,
        muted: bool,
    ) -> ReelResult<Option<MuteSurface>> {
        if self.muted == muted {
            return Ok(None);
        }
        let used = self.apply_state(surfaces, muted)?;
        self.muted = muted;
        Ok(used)
    }

    /// Apply the current state to the first supported surface.
    pub fn apply(&self, surfaces: &mut dyn AudioSurfaces) -> ReelResult<Option<MuteSurface>> {
        self.apply_state(surfaces, self.muted)
    }

    // State only changes once a surface accepted it.
    fn apply_state(
        &self,
        surfaces: &mut dyn AudioSurfaces,
        muted: bool,
    ) -> ReelResult<Option<MuteSurface>> {
        let Some(surface) = self.probes.iter().copied().find(|s| surfaces.supports(*s)) else {
            tracing::warn!(muted, "no mute surface supported by player");
            return Ok(None);
        };
        surfaces.apply_mute(surface, muted)?;
        tracing::debug!(?surface, muted, "mute state applied");
        Ok(Some(surface))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/mute.rs"]
mod tests;
