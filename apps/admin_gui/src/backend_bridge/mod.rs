//! Backend worker bridge: commands queued by the UI and the thread that runs them.

pub mod commands;
pub mod runtime;
