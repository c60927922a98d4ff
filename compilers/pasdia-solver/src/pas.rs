use indexmap::IndexMap;
use pasdia_parser::feature::{parse_features, payload};
use pasdia_protocol::{deptext_row, ArgumentId, RoleSet, Segment, Sentence};

#[cfg(feature = "serde")]
use serde::Serialize;

/// What one segment contributes to its sentence's predicate-argument structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasRecord {
    pub surface: String,
    /// Set when the segment declares `ID="n"`.
    pub argument: Option<ArgumentId>,
    /// Set when the segment is `type="pred"`; may hold no roles.
    pub predicate: Option<RoleSet>,
}

impl PasRecord {
    pub fn contributes(&self) -> bool {
        !self.surface.is_empty() && (self.argument.is_some() || self.predicate.is_some())
    }
}

/// Extract a segment's annotations, scanning morphemes last to first.
/// The first `ID` and the first `type="pred"` met in that order win.
pub fn to_pas(segment: &Segment) -> PasRecord {
    let mut argument = None;
    let mut predicate = None;

    for morph in segment.morphs.iter().rev() {
        let features = parse_features(payload(morph));

        if argument.is_none() {
            argument = features.id;
        }
        if predicate.is_none() && features.is_predicate {
            predicate = Some(features.roles);
        }
        if argument.is_some() && predicate.is_some() {
            break;
        }
    }

    PasRecord {
        surface: segment.surface(),
        argument,
        predicate,
    }
}

/// Per-sentence aggregates, all keyed by surface text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PasSummary {
    /// Surfaces of contributing segments, in segment order.
    pub predicates: Vec<String>,
    /// Argument id -> surface of the segment declaring it.
    pub arguments: IndexMap<ArgumentId, String>,
    /// Predicate surface -> its role tokens.
    pub roles: IndexMap<String, RoleSet>,
}

impl PasSummary {
    /// 1-based column of the first entry with this surface.
    ///
    /// Two contributing segments with the same surface are indistinguishable
    /// here; the earlier one always wins.
    pub fn column_of(&self, surface: &str) -> Option<usize> {
        self.predicates.iter().position(|p| p == surface).map(|i| i + 1)
    }

    /// Deptext row over the contributing segments only.
    pub fn text_row(&self) -> String {
        deptext_row(self.predicates.iter().map(String::as_str))
    }
}

pub fn sentence_to_pas(sentence: &Sentence) -> PasSummary {
    let mut summary = PasSummary::default();

    for segment in sentence {
        let record = to_pas(segment);
        if !record.contributes() {
            continue;
        }

        if let Some(id) = record.argument {
            summary.arguments.insert(id, record.surface.clone());
        }
        if let Some(roles) = record.predicate {
            tracing::trace!(surface = %record.surface, roles = ?roles.flags(), "predicate");
            summary.roles.insert(record.surface.clone(), roles);
        }
        summary.predicates.push(record.surface);
    }

    summary
}
