use std::collections::HashMap;

use pasdia_protocol::{Head, SegmentId, Sentence};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::Directed;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeIssue {
    #[error("sentence has no root segment")]
    NoRoot,
    #[error("sentence has {0} root segments")]
    MultipleRoots(usize),
    #[error("segment id {0} appears more than once")]
    DuplicateId(SegmentId),
    #[error("segment {segment} attaches to missing segment {head}")]
    DanglingHead { segment: SegmentId, head: SegmentId },
    #[error("head links form a cycle")]
    Cycle,
}

/// Head -> dependent graph over the segments of one sentence.
pub struct DependencyTree {
    graph: Graph<SegmentId, (), Directed>,
    roots: Vec<SegmentId>,
    duplicates: Vec<SegmentId>,
    dangling: Vec<(SegmentId, SegmentId)>,
}

impl DependencyTree {
    pub fn from_sentence(sentence: &Sentence) -> Self {
        let mut graph = Graph::new();
        let mut index_map: HashMap<SegmentId, NodeIndex> = HashMap::new();
        let mut roots = Vec::new();
        let mut duplicates = Vec::new();
        let mut dangling = Vec::new();

        // 1. One node per segment
        for segment in sentence {
            if index_map.contains_key(&segment.id) {
                duplicates.push(segment.id);
                continue;
            }
            let idx = graph.add_node(segment.id);
            index_map.insert(segment.id, idx);
        }

        // 2. One edge per head link
        for segment in sentence {
            match segment.head {
                Head::Root => roots.push(segment.id),
                Head::Segment(head) => match (index_map.get(&head), index_map.get(&segment.id)) {
                    (Some(&from), Some(&to)) => {
                        graph.add_edge(from, to, ());
                    }
                    _ => dangling.push((segment.id, head)),
                },
            }
        }

        Self {
            graph,
            roots,
            duplicates,
            dangling,
        }
    }

    pub fn roots(&self) -> &[SegmentId] {
        &self.roots
    }

    /// Every structural problem found, root count first.
    pub fn issues(&self) -> Vec<TreeIssue> {
        let mut issues = Vec::new();

        match self.roots.len() {
            1 => {}
            0 => issues.push(TreeIssue::NoRoot),
            n => issues.push(TreeIssue::MultipleRoots(n)),
        }
        issues.extend(self.duplicates.iter().copied().map(TreeIssue::DuplicateId));
        issues.extend(
            self.dangling
                .iter()
                .map(|&(segment, head)| TreeIssue::DanglingHead { segment, head }),
        );
        if is_cyclic_directed(&self.graph) {
            issues.push(TreeIssue::Cycle);
        }

        issues
    }

    pub fn is_well_formed(&self) -> bool {
        self.issues().is_empty()
    }
}
