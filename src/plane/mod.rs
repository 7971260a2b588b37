pub(crate) mod buffer;
pub(crate) mod image;
pub(crate) mod region;
pub(crate) mod tile;
