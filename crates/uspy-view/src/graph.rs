//! Prerequisite graph around a subject.
//!
//! Three columns: subjects required before the center one, the center
//! itself, and subjects that require it. Layout and arrow drawing are left to
//! the front-end.

use uspy_model::{SubjectInfo, SubjectRelations};

use crate::{messages, view::RelationsState};

const ROW_HEIGHT: u32 = 50;
const CARD_PADDING: u32 = 30;

/// Directed edge between two subject codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementsGraph {
    center: String,
    predecessors: Vec<String>,
    successors: Vec<String>,
}

impl RequirementsGraph {
    pub fn new(center: impl Into<String>, relations: &SubjectRelations) -> Self {
        let codes = |list: &[SubjectInfo]| list.iter().map(|s| s.code.clone()).collect();

        Self {
            center: center.into(),
            predecessors: codes(&relations.predecessors),
            successors: codes(&relations.successors),
        }
    }

    pub fn center(&self) -> &str {
        &self.center
    }

    pub fn predecessors(&self) -> &[String] {
        &self.predecessors
    }

    pub fn successors(&self) -> &[String] {
        &self.successors
    }

    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty() && self.successors.is_empty()
    }

    /// Predecessor -> center, then center -> successor
    pub fn edges(&self) -> Vec<Edge> {
        let incoming = self.predecessors.iter().map(|code| Edge {
            from: code.clone(),
            to: self.center.clone(),
        });
        let outgoing = self.successors.iter().map(|code| Edge {
            from: self.center.clone(),
            to: code.clone(),
        });

        incoming.chain(outgoing).collect()
    }

    /// Height in pixels of the card holding the three columns
    pub fn card_height(&self) -> u32 {
        let rows = self.predecessors.len().max(self.successors.len()).max(1);
        u32::try_from(rows)
            .unwrap_or(u32::MAX / ROW_HEIGHT)
            .saturating_mul(ROW_HEIGHT)
            .saturating_add(CARD_PADDING)
    }
}

/// What the graph area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphPanel {
    Loading,
    Empty { message: &'static str },
    Graph(RequirementsGraph),
}

impl GraphPanel {
    pub fn from_state(center: &str, relations: &RelationsState) -> Self {
        let empty = Self::Empty {
            message: messages::NO_RELATIONS,
        };

        match relations {
            RelationsState::Loading => Self::Loading,
            RelationsState::Unavailable => empty,
            RelationsState::Ready(relations) => {
                let graph = RequirementsGraph::new(center, relations);
                if graph.is_empty() {
                    empty
                } else {
                    Self::Graph(graph)
                }
            }
        }
    }
}
