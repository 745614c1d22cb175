//! Terminal helpers shared by the commands.

pub mod progress;
