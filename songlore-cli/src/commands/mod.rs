pub(crate) mod config;
pub(crate) mod enrich;
pub(crate) mod topics;
