//! # Workflows Module
//!
//! High-level entry points that tie the [`crate::engine`] search to the
//! [`crate::core`] models and energy interfaces.
//!
//! - **Fold Workflow** ([`fold`]) - Runs the search on one sequence and
//!   assembles the structure, its energy and the optional fold trajectory.
//! - **Benchmark Workflow** ([`benchmark`]) - Compares a prediction with a
//!   reference folder and produces a report row.

pub mod benchmark;
pub mod fold;
