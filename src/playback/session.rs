use crate::{
    foundation::core::FrameIndex,
    foundation::error::ReelResult,
    timeline::frames::FrameClock,
    timeline::schedule::Schedule,
};

/// Step used by skip-back / skip-forward.
pub const SKIP_SECS: f64 = 5.0;

/// Player collaborator: the surface a mounted composition is played on.
pub trait Player {
    /// Start playback.
    fn play(&mut self) -> ReelResult<()>;
    /// Pause playback.
    fn pause(&mut self) -> ReelResult<()>;
    /// Jump to a frame.
    fn seek_frame(&mut self, frame: FrameIndex) -> ReelResult<()>;
}

/// Playback position state driven by player notifications and user seeks.
///
/// The most recent call wins: a seek overwrites whatever position the last frame notification
/// reported, and vice versa. Ordering between the two is the player's concern.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackSession {
    clock: FrameClock,
    current_secs: f64,
    playing: bool,
}

impl PlaybackSession {
    /// Session positioned at 0 for `schedule`.
    pub fn new(schedule: &Schedule) -> Self {
        Self::from_clock(schedule.clock())
    }

    /// Session positioned at 0 for an explicit clock.
    pub fn from_clock(clock: FrameClock) -> Self {
        Self {
            clock,
            current_secs: 0.0,
            playing: false,
        }
    }

    /// Frame mapping in use.
    pub fn clock(&self) -> FrameClock {
        self.clock
    }

    /// Current position in seconds.
    pub fn current_secs(&self) -> f64 {
        self.current_secs
    }

    /// Whether the player last reported playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Player reported that playback started.
    pub fn on_play(&mut self) {
        self.playing = true;
    }

    /// Player reported that playback paused.
    pub fn on_pause(&mut self) {
        self.playing = false;
    }

    /// Player reported its current frame; returns the new position in seconds.
    pub fn on_current_frame(&mut self, frame: FrameIndex) -> f64 {
        self.current_secs = self.clock.frame_to_secs(frame);
        self.current_secs
    }

    /// Move to `secs` (clamped to the composition) and return the frame to seek the player to.
    pub fn seek_target(&mut self, secs: f64) -> FrameIndex {
        self.current_secs = self.clock.clamp_secs(secs);
        self.clock.seek_frame(self.current_secs)
    }

    /// Seek to a fraction of the composition, as from a click on a progress bar.
    pub fn seek_fraction_target(&mut self, fraction: f64) -> FrameIndex {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.seek_target(fraction * self.clock.total_secs())
    }

    /// Seek [`SKIP_SECS`] back.
    pub fn skip_back_target(&mut self) -> FrameIndex {
        self.seek_target(self.current_secs - SKIP_SECS)
    }

    /// Seek [`SKIP_SECS`] forward.
    pub fn skip_forward_target(&mut self) -> FrameIndex {
        self.seek_target(self.current_secs + SKIP_SECS)
    }

    /// Position as a percentage in `[0, 100]`; 0 for an empty composition.
    pub fn progress_percent(&self) -> f64 {
        self.clock.fraction(self.current_secs) * 100.0
    }

    /// `"mm:ss / mm:ss"` label for the current position and total length.
    pub fn time_label(&self) -> String {
        format!(
            "{} / {}",
            format_time(self.current_secs),
            format_time(self.clock.total_secs())
        )
    }
}

/// Format seconds as zero-padded `mm:ss`, truncating fractions.
pub fn format_time(secs: f64) -> String {
    let whole = if secs.is_finite() {
        secs.max(0.0).floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

/// A [`PlaybackSession`] bound to the player it drives.
#[derive(Debug)]
pub struct PlaybackController<P: Player> {
    session: PlaybackSession,
    player: P,
}

impl<P: Player> PlaybackController<P> {
    /// Bind `player` to a fresh session for `schedule`.
    pub fn new(schedule: &Schedule, player: P) -> Self {
        Self {
            session: PlaybackSession::new(schedule),
            player,
        }
    }

    /// Position state.
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    /// Underlying player.
    pub fn player(&self) -> &P {
        &self.player
    }

    /// Mutable access to the underlying player.
    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    /// Ask the player to start, unless it already reported playing.
    pub fn play(&mut self) -> ReelResult<()> {
        if self.session.is_playing() {
            return Ok(());
        }
        self.player.play()
    }

    /// Ask the player to pause, if it reported playing.
    pub fn pause(&mut self) -> ReelResult<()> {
        if !self.session.is_playing() {
            return Ok(());
        }
        self.player.pause()
    }

    /// Seek to `secs`.
    pub fn seek(&mut self, secs: f64) -> ReelResult<FrameIndex> {
        let frame = self.session.seek_target(secs);
        self.player.seek_frame(frame)?;
        Ok(frame)
    }

    /// Seek to a fraction of the composition.
    pub fn seek_fraction(&mut self, fraction: f64) -> ReelResult<FrameIndex> {
        let frame = self.session.seek_fraction_target(fraction);
        self.player.seek_frame(frame)?;
        Ok(frame)
    }

    /// Seek [`SKIP_SECS`] back.
    pub fn skip_back(&mut self) -> ReelResult<FrameIndex> {
        let frame = self.session.skip_back_target();
        self.player.seek_frame(frame)?;
        Ok(frame)
    }

    /// Seek [`SKIP_SECS`] forward.
    pub fn skip_forward(&mut self) -> ReelResult<FrameIndex> {
        let frame = self.session.skip_forward_target();
        self.player.seek_frame(frame)?;
        Ok(frame)
    }

    /// Forward a play notification.
    pub fn on_play(&mut self) {
        self.session.on_play();
    }

    /// Forward a pause notification.
    pub fn on_pause(&mut self) {
        self.session.on_pause();
    }

    /// Forward a current-frame notification.
    pub fn on_current_frame(&mut self, frame: FrameIndex) -> f64 {
        self.session.on_current_frame(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/session.rs"]
mod tests;
