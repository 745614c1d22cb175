//! # Engine Module
//!
//! The correlation-guided recursive search.
//!
//! ## Overview
//!
//! A segment of active positions is encoded, its offsets are ranked by the
//! [`correlation`] profile, each candidate offset is scanned by the
//! [`window`] refiner for its best contiguous run of pairs, and the
//! [`partition`] step commits the best run as a stem before recursing on the
//! remaining [`segment`]s.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Search and encoding parameters with a validating builder
//! - **Correlation** ([`correlation`]) - Direct and FFT convolution, normalization and ranking
//! - **Refinement** ([`window`]) - Diagonal scan of one offset
//! - **Segments** ([`segment`]) - Position bookkeeping and matrix slicing
//! - **Recursion** ([`partition`]) - Stem selection, commitment and splitting
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - The umbrella error returned by workflows
//!
//! With the `parallel` feature the two branches of a nested split run on the
//! rayon thread pool; their outcomes are merged outer first, so the result
//! does not depend on scheduling.

pub mod config;
pub mod correlation;
pub mod error;
pub mod partition;
pub mod progress;
pub mod segment;
pub mod window;
