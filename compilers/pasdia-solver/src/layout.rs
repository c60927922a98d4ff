use std::fmt;

use pasdia_protocol::{CaseRole, Sentence};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::pas::PasSummary;

/// Horizontal nudge, in points, between connectors sharing an endpoint.
pub const OFFSET_STEP: i32 = 5;

const ROLE_LABEL_STYLE: &str =
    "rounded corners=0, draw=black, top color=cyan, bottom color=cyan, text=black, below";

/// Plain connector from a segment to its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BackboneEdge {
    /// Column of the dependent.
    pub from: usize,
    /// Column of the head.
    pub to: usize,
    pub offset: i32,
}

impl fmt::Display for BackboneEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\\depedge[edge style={{black}}, edge end x offset={}]{{{}}}{{{}}}{{}}",
            self.offset, self.from, self.to
        )
    }
}

/// Backbone connectors for every non-root segment, in segment order.
///
/// The offset drops by one step each time a segment's head column is already
/// the end of an emitted connector, so arcs stacking onto one head fan out.
pub fn backbone_edges(sentence: &Sentence) -> Vec<BackboneEdge> {
    let mut edges: Vec<BackboneEdge> = Vec::new();
    let mut offset = 0;

    for segment in sentence {
        let head_column = segment.head.column();
        if edges.iter().any(|e| e.to == head_column) {
            offset -= OFFSET_STEP;
        }
        if !segment.is_root() {
            edges.push(BackboneEdge {
                from: segment.id.column(),
                to: head_column,
                offset,
            });
        }
    }

    edges
}

/// Coloured, labelled connector from a predicate to one of its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RoleEdge {
    pub role: CaseRole,
    /// Predicate column.
    pub start: usize,
    /// Argument column.
    pub end: usize,
    pub soffset: i32,
    pub eoffset: i32,
}

impl fmt::Display for RoleEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\\depedge[style={{{}}}, edge start x offset={}pt, edge end x offset={}pt, edge below, label style={{{}}}]{{{}}}{{{}}}{{{}}}",
            self.role.edge_style(),
            self.soffset,
            self.eoffset,
            ROLE_LABEL_STYLE,
            self.start,
            self.end,
            self.role.label()
        )
    }
}

/// Running offsets for the role edges of one sentence.
#[derive(Debug, Clone, Default)]
pub struct LayoutState {
    soffset: i32,
    eoffset: i32,
    emitted: Vec<RoleEdge>,
}

impl LayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a connector from `start` (predicate) to `end` (argument), updating
    /// the running offsets. Self-loops are not placed.
    pub fn place(&mut self, role: CaseRole, start: usize, end: usize) -> Option<RoleEdge> {
        if start == end {
            return None;
        }

        if self.emitted.iter().any(|e| e.start == start) {
            // Signed gap: arguments to the right of the predicate always step down
            if start as i64 - end as i64 > 1 {
                self.soffset = if self.soffset >= 0 {
                    self.soffset + OFFSET_STEP
                } else {
                    OFFSET_STEP
                };
            } else {
                self.soffset -= OFFSET_STEP;
            }
        }
        if self.emitted.iter().any(|e| e.end == end) {
            self.eoffset -= OFFSET_STEP;
        }

        let edge = RoleEdge {
            role,
            start,
            end,
            soffset: self.soffset,
            eoffset: self.eoffset,
        };
        self.emitted.push(edge);
        Some(edge)
    }

    pub fn into_edges(self) -> Vec<RoleEdge> {
        self.emitted
    }
}

/// Role connectors for a sentence: predicates in insertion order, then roles
/// in `ga, o, ni` order. Unresolvable references are skipped.
pub fn role_edges(summary: &PasSummary) -> Vec<RoleEdge> {
    let mut state = LayoutState::new();

    for (predicate, roles) in &summary.roles {
        for role in CaseRole::ALL {
            for link in roles.for_role(role) {
                let Some(argument) = summary.arguments.get(&link.argument) else {
                    continue;
                };
                let (Some(end), Some(start)) = (summary.column_of(argument), summary.column_of(predicate)) else {
                    continue;
                };
                state.place(role, start, end);
            }
        }
    }

    state.into_edges()
}

/// Backbone directives, one per line.
pub fn backbone_block(edges: &[BackboneEdge]) -> String {
    edges
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Role directives, each on its own line after a leading newline.
pub fn role_block(edges: &[RoleEdge]) -> String {
    let mut block = String::from("\n");
    for edge in edges {
        block.push('\n');
        block.push_str(&edge.to_string());
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasdia_protocol::{ArgumentId, Head, RoleLink, RoleSet, Segment, SegmentId};

    fn sentence(heads: &[i64]) -> Sentence {
        Sentence::new(
            heads
                .iter()
                .enumerate()
                .map(|(i, &h)| Segment::new(SegmentId(i as u32), Head::from_raw(h).unwrap()))
                .collect(),
        )
    }

    #[test]
    fn test_backbone_skips_root() {
        let edges = backbone_edges(&sentence(&[1, -1]));
        assert_eq!(edges, vec![BackboneEdge { from: 1, to: 2, offset: 0 }]);
        assert_eq!(
            edges[0].to_string(),
            "\\depedge[edge style={black}, edge end x offset=0]{1}{2}{}"
        );
    }

    #[test]
    fn test_backbone_offsets_for_shared_head() {
        // 0 -> 3, 1 -> 3, 2 -> 3, 3 root
        let edges = backbone_edges(&sentence(&[3, 3, 3, -1]));
        let offsets: Vec<i32> = edges.iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0, -5, -10]);
    }

    #[test]
    fn test_backbone_offset_is_cumulative() {
        // 0 -> 1, 1 -> 3, 2 -> 3, 3 root: only segment 2 shares a head
        let edges = backbone_edges(&sentence(&[1, 3, 3, -1]));
        let offsets: Vec<i32> = edges.iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0, 0, -5]);
    }

    #[test]
    fn test_self_loop_not_placed() {
        let mut state = LayoutState::new();
        assert_eq!(state.place(CaseRole::Ga, 2, 2), None);
        // The skipped loop leaves no endpoint behind
        let edge = state.place(CaseRole::Ga, 3, 2).unwrap();
        assert_eq!((edge.soffset, edge.eoffset), (0, 0));
    }

    #[test]
    fn test_start_offset_grows_for_distant_arguments() {
        let mut state = LayoutState::new();
        let s: Vec<i32> = [1, 2, 3]
            .into_iter()
            .filter_map(|arg| state.place(CaseRole::Ga, 5, arg))
            .map(|e| e.soffset)
            .collect();
        assert_eq!(s, vec![0, 5, 10]);
    }

    #[test]
    fn test_start_offset_shrinks_for_adjacent_or_right_arguments() {
        let mut state = LayoutState::new();
        let s: Vec<i32> = [4, 6, 7]
            .into_iter()
            .filter_map(|arg| state.place(CaseRole::O, 5, arg))
            .map(|e| e.soffset)
            .collect();
        assert_eq!(s, vec![0, -5, -10]);
    }

    #[test]
    fn test_start_offset_resets_when_sign_flips() {
        let mut state = LayoutState::new();
        state.place(CaseRole::Ga, 5, 6);
        let edge = state.place(CaseRole::Ga, 5, 7).unwrap();
        assert_eq!(edge.soffset, -5);
        // Distant argument on the left resets to one positive step
        let edge = state.place(CaseRole::Ni, 5, 1).unwrap();
        assert_eq!(edge.soffset, 5);
    }

    #[test]
    fn test_end_offset_for_shared_argument() {
        let mut state = LayoutState::new();
        state.place(CaseRole::Ga, 3, 1);
        let edge = state.place(CaseRole::O, 4, 1).unwrap();
        assert_eq!((edge.soffset, edge.eoffset), (0, -5));
    }

    fn summary(predicates: &[&str], arguments: &[(u32, &str)], roles: &[(&str, Vec<(CaseRole, u32)>)]) -> PasSummary {
        PasSummary {
            predicates: predicates.iter().map(|s| s.to_string()).collect(),
            arguments: arguments.iter().map(|&(id, s)| (ArgumentId(id), s.to_string())).collect(),
            roles: roles
                .iter()
                .map(|(p, links)| {
                    let set: RoleSet = links
                        .iter()
                        .map(|&(role, id)| RoleLink::new(role, ArgumentId(id)))
                        .collect();
                    (p.to_string(), set)
                })
                .collect(),
        }
    }

    #[test]
    fn test_role_edges_follow_fixed_role_order() {
        let s = summary(
            &["太郎が", "花子に", "本を", "渡した"],
            &[(1, "太郎が"), (2, "花子に"), (3, "本を")],
            &[("渡した", vec![(CaseRole::Ga, 1), (CaseRole::O, 3), (CaseRole::Ni, 2)])],
        );

        let edges = role_edges(&s);
        let order: Vec<(CaseRole, usize, usize)> = edges.iter().map(|e| (e.role, e.start, e.end)).collect();
        assert_eq!(
            order,
            vec![(CaseRole::Ga, 4, 1), (CaseRole::O, 4, 3), (CaseRole::Ni, 4, 2)]
        );
        // gap 1 for the accusative steps down, gap 2 for the dative resets upward
        let soffsets: Vec<i32> = edges.iter().map(|e| e.soffset).collect();
        assert_eq!(soffsets, vec![0, -5, 5]);
    }

    #[test]
    fn test_unresolved_references_are_skipped() {
        let s = summary(
            &["犬が", "走る"],
            &[(1, "犬が"), (2, "どこか")],
            &[("走る", vec![(CaseRole::Ga, 9), (CaseRole::O, 2), (CaseRole::Ni, 1)])],
        );

        let edges = role_edges(&s);
        assert_eq!(edges.len(), 1);
        assert_eq!((edges[0].role, edges[0].start, edges[0].end), (CaseRole::Ni, 2, 1));
    }

    #[test]
    fn test_role_edge_directive() {
        let edge = RoleEdge {
            role: CaseRole::O,
            start: 3,
            end: 1,
            soffset: 5,
            eoffset: -5,
        };
        assert_eq!(
            edge.to_string(),
            "\\depedge[style={cyan, dashed}, edge start x offset=5pt, edge end x offset=-5pt, edge below, \
             label style={rounded corners=0, draw=black, top color=cyan, bottom color=cyan, text=black, below}]{3}{1}{ACC}"
        );
    }

    #[test]
    fn test_blocks() {
        let backbone = vec![
            BackboneEdge { from: 1, to: 2, offset: 0 },
            BackboneEdge { from: 2, to: 3, offset: 0 },
        ];
        assert_eq!(backbone_block(&backbone).lines().count(), 2);
        assert_eq!(role_block(&[]), "\n");
    }
}
