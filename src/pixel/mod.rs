pub(crate) mod channel;
pub(crate) mod convert;
