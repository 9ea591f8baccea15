//! Request extractors handing handlers their dependencies: the database pool, the
//! settings, and validated request input. Every rejection is a [`crate::Error`] so
//! that it is rendered with the common error envelope.

pub(crate) mod db_conn;
pub(crate) mod pagination;
pub(crate) mod settings;
pub(crate) mod validated;
