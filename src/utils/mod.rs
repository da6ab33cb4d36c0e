//! Shared utilities.

pub mod csv;
