//! Library components of the `scdb` command-line dashboard.

pub mod filters;
pub mod logging;
pub mod render;
