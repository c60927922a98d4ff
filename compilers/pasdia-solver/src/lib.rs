pub mod graph;
pub mod layout;
pub mod pas;

pub use graph::{DependencyTree, TreeIssue};
pub use layout::{backbone_edges, role_edges, BackboneEdge, LayoutState, RoleEdge, OFFSET_STEP};
pub use pas::{sentence_to_pas, to_pas, PasRecord, PasSummary};

use pasdia_protocol::Sentence;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Everything needed to draw one sentence.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SentenceLayout {
    pub pas: PasSummary,
    pub backbone: Vec<BackboneEdge>,
    pub roles: Vec<RoleEdge>,
}

/// Sentence -> PAS aggregates -> both edge families.
pub fn layout_sentence(sentence: &Sentence) -> SentenceLayout {
    let pas = sentence_to_pas(sentence);
    let backbone = backbone_edges(sentence);
    let roles = role_edges(&pas);

    tracing::debug!(
        segments = sentence.len(),
        contributing = pas.predicates.len(),
        backbone = backbone.len(),
        roles = roles.len(),
        "laid out sentence"
    );

    SentenceLayout { pas, backbone, roles }
}
