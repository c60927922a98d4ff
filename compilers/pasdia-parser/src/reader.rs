use std::io::BufRead;

use pasdia_protocol::{Head, Segment, SegmentId, Sentence};

use crate::error::{FormatError, ReadError};

pub const EOS_MARKER: &str = "EOS";
pub const HEADER_MARKER: char = '*';

/// Number of space-separated fields in a segment header (`* 0 2D 0/1 1.234`).
const HEADER_FIELDS: usize = 5;

/// Id and head decoded from a segment header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentHeader {
    pub id: SegmentId,
    pub head: Head,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    EndOfSentence,
    Header(SegmentHeader),
    /// A morpheme record, trailing whitespace removed.
    Morph(&'a str),
}

/// Classify one input line. Only header lines can fail.
pub fn classify_line(line: &str, line_no: usize) -> Result<Line<'_>, FormatError> {
    let line = line.trim_end();

    if line.starts_with(EOS_MARKER) {
        return Ok(Line::EndOfSentence);
    }
    if line.starts_with(HEADER_MARKER) {
        return parse_header(line, line_no).map(Line::Header);
    }
    Ok(Line::Morph(line))
}

fn parse_header(line: &str, line_no: usize) -> Result<SegmentHeader, FormatError> {
    // Split on single spaces: doubled spaces count as empty fields
    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() != HEADER_FIELDS {
        return Err(FormatError::FieldCount {
            line_no,
            found: fields.len(),
            line: line.to_string(),
        });
    }

    // "2D" -> head "2", direction 'D'
    let head_field = fields[2];
    let head_raw = match head_field.chars().last() {
        Some(dir) if dir.is_alphabetic() => &head_field[..head_field.len() - dir.len_utf8()],
        _ => {
            return Err(FormatError::MissingDirection {
                line_no,
                line: line.to_string(),
            })
        }
    };

    let invalid = |field: &str| FormatError::InvalidNumber {
        line_no,
        field: field.to_string(),
        line: line.to_string(),
    };

    let id = fields[1]
        .parse::<u32>()
        .map(SegmentId)
        .map_err(|_| invalid(fields[1]))?;
    let head = head_raw
        .parse::<i64>()
        .ok()
        .and_then(Head::from_raw)
        .ok_or_else(|| invalid(head_raw))?;

    Ok(SegmentHeader { id, head })
}

/// Incremental line-by-line reader state.
#[derive(Debug, Default)]
pub struct TreeReader {
    sentences: Vec<Sentence>,
    segments: Vec<Segment>,
    current: Option<Segment>,
    line_no: usize,
}

impl TreeReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: &str) -> Result<(), FormatError> {
        self.line_no += 1;

        match classify_line(line, self.line_no)? {
            Line::EndOfSentence => {
                if let Some(segment) = self.current.take() {
                    self.segments.push(segment);
                }
                let segments = std::mem::take(&mut self.segments);
                self.sentences.push(Sentence::new(segments));
            }
            Line::Header(header) => {
                if let Some(segment) = self.current.take() {
                    self.segments.push(segment);
                }
                self.current = Some(Segment::new(header.id, header.head));
            }
            Line::Morph(record) => match self.current.as_mut() {
                Some(segment) => segment.add(record.to_string()),
                None => {
                    tracing::debug!(line_no = self.line_no, "morpheme outside any segment, dropped");
                }
            },
        }
        Ok(())
    }

    /// Completed sentences. Anything after the last `EOS` is discarded.
    pub fn finish(self) -> Vec<Sentence> {
        if self.current.is_some() || !self.segments.is_empty() {
            tracing::debug!("input ended without EOS, trailing segments dropped");
        }
        self.sentences
    }
}

/// Read a whole tree-format stream into sentences.
pub fn read_deptree<R: BufRead>(input: R) -> Result<Vec<Sentence>, ReadError> {
    let mut reader = TreeReader::new();
    for line in input.lines() {
        reader.feed(&line?)?;
    }
    let sentences = reader.finish();
    tracing::debug!(count = sentences.len(), "read sentences");
    Ok(sentences)
}

/// Same as [`read_deptree`] for input already in memory.
pub fn parse_deptree(input: &str) -> Result<Vec<Sentence>, FormatError> {
    let mut reader = TreeReader::new();
    for line in input.lines() {
        reader.feed(line)?;
    }
    Ok(reader.finish())
}
