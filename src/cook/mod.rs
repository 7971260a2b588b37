pub(crate) mod area;
pub(crate) mod context;
pub(crate) mod engine;
pub(crate) mod params;
pub(crate) mod provider;
