pub(crate) mod autoplay;
pub(crate) mod mute;
pub(crate) mod session;
