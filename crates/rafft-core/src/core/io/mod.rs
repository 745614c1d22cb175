//! Provides readers and writers for the text formats exchanged with other tools.
//!
//! Sequence and structure records use a FASTA-like layout, fold trajectories
//! use the block-based batch format read by trajectory analysis tools, and
//! benchmark results are written as CSV rows. The line-oriented formats share
//! the [`traits::TextFormat`] interface.

pub mod fasta;
pub mod report;
pub mod traits;
pub mod trajectory;
