pub(crate) mod audio;
pub(crate) mod duration;
pub(crate) mod frames;
pub(crate) mod schedule;
pub(crate) mod visual;
