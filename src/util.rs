//! Shared utility modules used across the engines.

pub(crate) mod rank;
