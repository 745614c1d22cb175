//! # RAFFT Core Library
//!
//! Predicts RNA secondary structures by correlating a sequence with its own
//! mirrored complementary encoding. Offsets where the two strands correlate
//! strongly point at helices; the best contiguous helix is committed and the
//! search recurses on the regions it leaves.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Stateless models (`Sequence`, `PairList`,
//!   `Structure`), strand encodings, energy interfaces and file formats.
//!
//! - **[`engine`]: The Logic Core.** Correlation profiles, the window refiner
//!   and the recursive partitioner, configured through an immutable
//!   `FoldConfig`.
//!
//! - **[`workflows`]: The Public API.** `fold::run` folds a sequence and
//!   `benchmark::compare` scores a prediction against a reference.
//!
//! ```no_run
//! use rafft::core::models::sequence::Sequence;
//! use rafft::engine::config::{CandidateStrategy, FoldConfigBuilder};
//! use rafft::engine::progress::ProgressReporter;
//! use rafft::workflows::fold;
//!
//! let sequence = Sequence::new("GGGGAAAACCCC")?;
//! let config = FoldConfigBuilder::new()
//!     .min_stem_length(2)
//!     .min_loop_size(3)
//!     .strategy(CandidateStrategy::Shortlist { size: 20 })
//!     .padding(1.0)
//!     .build()?;
//! let result = fold::run(&sequence, &config, None, &ProgressReporter::new())?;
//! println!("{}", result.structure.dot_bracket);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
