pub(crate) mod media;
pub(crate) mod source;
pub(crate) mod store;
