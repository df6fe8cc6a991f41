//! CLI commands.

pub(crate) mod check;
pub(crate) mod classify;
pub(crate) mod config;
pub(crate) mod env;
