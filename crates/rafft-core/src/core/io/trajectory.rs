//! The batch output format consumed by trajectory analysis tools.
//!
//! ```text
//! GGGGAAAACCCC
//! # --------------------
//! ............ 0.00
//! # --------------------
//! ((((....)))) -4.18
//! ```
//!
//! The first line is the sequence. Each marker line opens a new block, and each
//! block lists `structure energy` lines.

use super::traits::TextFormat;
use crate::core::models::structure::{StructureError, parse_dot_bracket};
use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use thiserror::Error;

pub const BLOCK_MARKER: &str = "# --";
const BLOCK_SEPARATOR: &str = "# --------------------";

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Missing sequence line")]
    MissingSequence,
    #[error("Line {line}: structure listed before the first block marker")]
    EntryOutsideBlock { line: usize },
    #[error("Line {line}: expected 'structure energy', found '{content}'")]
    MalformedEntry { line: usize, content: String },
    #[error("Line {line}: invalid energy '{value}'")]
    InvalidEnergy { line: usize, value: String },
    #[error("Line {line}: structure length {found} differs from sequence length {expected}")]
    LengthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid structure in block {step}: {source}")]
    Structure {
        step: usize,
        #[source]
        source: StructureError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryEntry {
    pub structure: String,
    pub energy: f64,
}

/// An edge between a structure of one block and a structure of the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    /// Index of the later block.
    pub step: usize,
    /// Index of the structure in block `step - 1`.
    pub from: usize,
    /// Index of the structure in block `step`.
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    pub sequence: String,
    pub steps: Vec<Vec<TrajectoryEntry>>,
}

impl Trajectory {
    pub fn new(sequence: impl Into<String>) -> Self {
        Self {
            sequence: sequence.into(),
            steps: Vec::new(),
        }
    }

    pub fn push_step(&mut self, entries: Vec<TrajectoryEntry>) {
        self.steps.push(entries);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Links every structure to the structures of the previous block whose
    /// pairs it fully contains.
    pub fn connections(&self) -> Result<Vec<Connection>, TrajectoryError> {
        let pair_sets = self
            .steps
            .iter()
            .enumerate()
            .map(|(step, entries)| {
                entries
                    .iter()
                    .map(|e| {
                        parse_dot_bracket(&e.structure)
                            .map(|pairs| pairs.into_iter().collect::<HashSet<_>>())
                            .map_err(|source| TrajectoryError::Structure { step, source })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut connections = Vec::new();
        for step in 1..pair_sets.len() {
            for (to, current) in pair_sets[step].iter().enumerate() {
                for (from, previous) in pair_sets[step - 1].iter().enumerate() {
                    if previous.is_subset(current) {
                        connections.push(Connection { step, from, to });
                    }
                }
            }
        }
        Ok(connections)
    }
}

impl TextFormat for Trajectory {
    type Error = TrajectoryError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error> {
        let mut lines = reader.lines().enumerate();

        let sequence = loop {
            match lines.next() {
                Some((_, line)) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break line.trim().to_string();
                    }
                }
                None => return Err(TrajectoryError::MissingSequence),
            }
        };
        let expected = sequence.chars().count();
        let mut trajectory = Trajectory::new(sequence);

        for (line_num, line_res) in lines {
            let line = line_res?;
            let line_num = line_num + 1;
            let trimmed = line.trim();

            if trimmed.starts_with(BLOCK_MARKER) {
                trajectory.steps.push(Vec::new());
                continue;
            }
            if trimmed.is_empty() {
                continue;
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            let [structure, energy] = fields.as_slice() else {
                return Err(TrajectoryError::MalformedEntry {
                    line: line_num,
                    content: trimmed.to_string(),
                });
            };
            let energy: f64 = energy.parse().map_err(|_| TrajectoryError::InvalidEnergy {
                line: line_num,
                value: energy.to_string(),
            })?;
            let found = structure.chars().count();
            if found != expected {
                return Err(TrajectoryError::LengthMismatch {
                    line: line_num,
                    expected,
                    found,
                });
            }

            let block = trajectory
                .steps
                .last_mut()
                .ok_or(TrajectoryError::EntryOutsideBlock { line: line_num })?;
            block.push(TrajectoryEntry {
                structure: structure.to_string(),
                energy,
            });
        }

        Ok(trajectory)
    }

    fn write_to(&self, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "{}", self.sequence)?;
        for step in &self.steps {
            writeln!(writer, "{}", BLOCK_SEPARATOR)?;
            for entry in step {
                writeln!(writer, "{} {:.2}", entry.structure, entry.energy)?;
            }
        }
        Ok(())
    }
}
