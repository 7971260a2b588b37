pub(crate) mod edge;
