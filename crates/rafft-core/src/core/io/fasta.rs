use super::traits::TextFormat;
use std::io::{self, BufRead, Write};
use thiserror::Error;

pub const HEADER_MARKER: char = '>';

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Record '{name}' (line {line}) has no content")]
    EmptyRecord { name: String, line: usize },
    #[error("File contains no records")]
    NoRecords,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub name: String,
    /// Content lines concatenated without their line breaks.
    pub content: String,
}

/// A multi-record file where each record starts with a `>` header line.
///
/// Content lines before the first header form an unnamed record, so plain
/// one-line sequence or structure files are accepted as well. No alphabet
/// normalization happens here; sequences are normalized when they are turned
/// into [`crate::core::models::sequence::Sequence`] values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FastaFile {
    pub records: Vec<FastaRecord>,
}

impl FastaFile {
    /// Content of all records joined together, ignoring headers.
    pub fn concatenated(&self) -> String {
        self.records.iter().map(|r| r.content.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&FastaRecord> {
        self.records.iter().find(|r| r.name == name)
    }
}

impl TextFormat for FastaFile {
    type Error = FastaError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error> {
        let mut records: Vec<(FastaRecord, usize)> = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let trimmed = line.trim();

            if let Some(header) = trimmed.strip_prefix(HEADER_MARKER) {
                records.push((
                    FastaRecord {
                        name: header.trim().to_string(),
                        content: String::new(),
                    },
                    line_num,
                ));
                continue;
            }
            if trimmed.is_empty() {
                continue;
            }
            if records.is_empty() {
                records.push((
                    FastaRecord {
                        name: String::new(),
                        content: String::new(),
                    },
                    line_num,
                ));
            }
            if let Some((record, _)) = records.last_mut() {
                record.content.push_str(trimmed);
            }
        }

        if records.is_empty() {
            return Err(FastaError::NoRecords);
        }
        if let Some((record, line)) = records.iter().find(|(r, _)| r.content.is_empty()) {
            return Err(FastaError::EmptyRecord {
                name: record.name.clone(),
                line: *line,
            });
        }

        Ok(Self {
            records: records.into_iter().map(|(r, _)| r).collect(),
        })
    }

    fn write_to(&self, writer: &mut impl Write) -> Result<(), Self::Error> {
        for record in &self.records {
            writeln!(writer, "{}{}", HEADER_MARKER, record.name)?;
            writeln!(writer, "{}", record.content)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn parse(content: &str) -> Result<FastaFile, FastaError> {
        FastaFile::read_from(&mut Cursor::new(content))
    }

    #[test]
    fn reads_multiple_records_and_joins_lines() {
        let file = parse(">first hairpin\nGGGG\nAAAACCCC\n\n>second\nACGU\n").unwrap();
        assert_eq!(file.records.len(), 2);
        assert_eq!(file.records[0].name, "first hairpin");
        assert_eq!(file.records[0].content, "GGGGAAAACCCC");
        assert_eq!(file.get("second").unwrap().content, "ACGU");
    }

    #[test]
    fn headerless_content_becomes_unnamed_record() {
        let file = parse("GGGAAACCC\nUUU\n").unwrap();
        assert_eq!(file.records.len(), 1);
        assert_eq!(file.records[0].name, "");
        assert_eq!(file.concatenated(), "GGGAAACCCUUU");
    }

    #[test]
    fn empty_record_is_reported_with_its_line() {
        let result = parse(">a\nACGU\n>b\n>c\nGG\n");
        assert!(matches!(
            result,
            Err(FastaError::EmptyRecord { ref name, line: 3 }) if name == "b"
        ));
    }

    #[test]
    fn empty_file_has_no_records() {
        assert!(matches!(parse("\n\n"), Err(FastaError::NoRecords)));
    }

    #[test]
    fn path_round_trip_preserves_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seqs.fa");
        let original = FastaFile {
            records: vec![
                FastaRecord {
                    name: "x".into(),
                    content: "GGGAAACCC".into(),
                },
                FastaRecord {
                    name: "y".into(),
                    content: "(((...)))".into(),
                },
            ],
        };
        original.write_to_path(&path).unwrap();
        assert_eq!(FastaFile::read_from_path(&path).unwrap(), original);
    }
}
