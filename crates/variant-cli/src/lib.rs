//! Library side of the `variant` command-line tool.

pub mod commands;
pub mod logging;
pub mod report;
