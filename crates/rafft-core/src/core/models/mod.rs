//! # Core Models Module
//!
//! Plain data types shared by every layer of the folding pipeline.
//!
//! ## Key Components
//!
//! - [`sequence`] - Normalized nucleotide sequences and the [`sequence::Nucleotide`] alphabet
//! - [`pairs`] - Base pairs and the append-only pair list built during the search
//! - [`structure`] - Dot-bracket rendering and parsing, plus structure distances
//!
//! All models are immutable once built, except [`pairs::PairList`], which only
//! ever grows.

pub mod pairs;
pub mod sequence;
pub mod structure;
