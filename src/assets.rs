//! Remote asset materialization, scoped storage, and media probing.

pub(crate) mod fetch;
pub(crate) mod media;
pub(crate) mod workspace;
