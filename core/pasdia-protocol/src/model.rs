use alloc::string::String;
use alloc::vec::Vec;

use crate::ids::SegmentId;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Separator between deptext columns.
pub const COLUMN_SEPARATOR: &str = " \\& ";
/// Terminator of a deptext row.
pub const ROW_TERMINATOR: &str = " \\\\";

/// Join cells into a deptext row: `a \& b \\`.
pub fn deptext_row<'a, I>(cells: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut row = String::new();
    for (i, cell) in cells.into_iter().enumerate() {
        if i > 0 {
            row.push_str(COLUMN_SEPARATOR);
        }
        row.push_str(cell);
    }
    row.push_str(ROW_TERMINATOR);
    row
}

/// Where a segment attaches in the dependency tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum Head {
    /// Encoded as `-1` in the tree format.
    Root,
    Segment(SegmentId),
}

impl Head {
    pub const ROOT_SENTINEL: i64 = -1;

    /// Decode the numeric head field. Negative values other than the sentinel are rejected.
    pub fn from_raw(raw: i64) -> Option<Self> {
        if raw == Self::ROOT_SENTINEL {
            return Some(Head::Root);
        }
        u32::try_from(raw).ok().map(|id| Head::Segment(SegmentId(id)))
    }

    /// 1-based column of the head; the root sits at column 0.
    pub fn column(self) -> usize {
        match self {
            Head::Root => 0,
            Head::Segment(id) => id.column(),
        }
    }
}

/// A bunsetsu: header-derived id/head plus its raw morpheme lines.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Segment {
    pub id: SegmentId,
    pub head: Head,
    /// Morpheme records exactly as read (surface, tab, features).
    pub morphs: Vec<String>,
}

impl Segment {
    pub fn new(id: SegmentId, head: Head) -> Self {
        Self {
            id,
            head,
            morphs: Vec::new(),
        }
    }

    pub fn add(&mut self, morph: String) {
        self.morphs.push(morph);
    }

    pub fn is_root(&self) -> bool {
        self.head == Head::Root
    }

    /// Surface text: the first tab field of every morpheme, concatenated in order.
    pub fn surface(&self) -> String {
        self.morphs
            .iter()
            .map(|m| m.split('\t').next().unwrap_or_default())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Sentence {
    pub segments: Vec<Segment>,
}

impl Sentence {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn roots(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.is_root())
    }

    /// The deptext row over every segment surface.
    pub fn text_row(&self) -> String {
        let surfaces: Vec<String> = self.segments.iter().map(Segment::surface).collect();
        deptext_row(surfaces.iter().map(String::as_str))
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a Segment;
    type IntoIter = core::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
