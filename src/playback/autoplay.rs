use crate::{
    foundation::error::{ReelError, ReelResult},
    playback::session::Player,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Where the start-of-playback handshake stands.
pub enum AutoplayState {
    /// Programmatic start not yet answered.
    #[default]
    AttemptingAutoplay,
    /// The host refused programmatic start; waiting for a user action.
    AwaitingUserGesture,
    /// Playback started.
    Playing,
}

/// `AttemptingAutoplay -> (rejected) -> AwaitingUserGesture -> (user action) -> Playing`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AutoplayFlow {
    state: AutoplayState,
}

impl AutoplayFlow {
    /// Flow in [`AutoplayState::AttemptingAutoplay`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> AutoplayState {
        self.state
    }

    /// Try a programmatic start. A [`ReelError::Playback`] refusal moves to
    /// [`AutoplayState::AwaitingUserGesture`]; other errors propagate.
    pub fn attempt(&mut self, player: &mut dyn Player) -> ReelResult<AutoplayState> {
        if self.state != AutoplayState::AttemptingAutoplay {
            return Ok(self.state);
        }
        match player.play() {
            Ok(()) => self.state = AutoplayState::Playing,
            Err(ReelError::Playback(reason)) => {
                tracing::info!(%reason, "autoplay refused, waiting for user gesture");
                self.state = AutoplayState::AwaitingUserGesture;
            }
            Err(e) => return Err(e),
        }
        Ok(self.state)
    }

    /// A user action arrived; start playback if it was being held back.
    pub fn on_user_gesture(&mut self, player: &mut dyn Player) -> ReelResult<AutoplayState> {
        if self.state == AutoplayState::AwaitingUserGesture {
            player.play()?;
            self.state = AutoplayState::Playing;
        }
        Ok(self.state)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/autoplay.rs"]
mod tests;
