//! # Core Module
//!
//! Stateless building blocks of the structure search.
//!
//! ## Overview
//!
//! - **Molecular Representation** ([`models`]) - Sequences, base pairs and
//!   dot-bracket structures
//! - **Strand Encoding** ([`encoding`]) - Forward and mirrored complementary
//!   matrices consumed by the correlation search
//! - **Energy Interfaces** ([`energy`]) - Pluggable energy models, reference
//!   folders and a built-in stacking model
//! - **File I/O** ([`io`]) - Sequence records, fold trajectories and benchmark
//!   reports
//!
//! Nothing in this module holds search state; the [`crate::engine`] layer
//! owns the recursion and threads these values through it.

pub mod encoding;
pub mod energy;
pub mod io;
pub mod models;
