use serde::{Deserialize, Serialize};

use crate::acl::AclMap;
use crate::content::ContentNode;

/// One listed node with its per-role ACL summary.
///
/// `child_nodes` is `None` when the node was not expanded (depth limit reached or no
/// matching children); it is never `Some(vec![])` for a freshly materialized tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedNodeRecord {
    pub node_identifier: String,
    pub node_path: String,
    pub node_label: String,
    pub node_type: String,
    pub node_level: u32,
    pub acl: AclMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_nodes: Option<Vec<AnnotatedNodeRecord>>,
}

impl AnnotatedNodeRecord {
    pub fn from_node(node: &dyn ContentNode, acl: AclMap) -> Self {
        Self {
            node_identifier: node.identifier().to_string(),
            node_path: node.path().to_string(),
            node_label: node.label().to_string(),
            node_type: node.node_type().to_string(),
            node_level: node.depth(),
            acl,
            child_nodes: None,
        }
    }

    pub fn children(&self) -> &[AnnotatedNodeRecord] {
        self.child_nodes.as_deref().unwrap_or(&[])
    }

    /// Depth-first search by path through this record and its expanded descendants.
    pub fn find(&self, path: &str) -> Option<&AnnotatedNodeRecord> {
        if self.node_path == path {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(path))
    }
}

/// Search a forest by node path.
pub fn find_record<'a>(forest: &'a [AnnotatedNodeRecord], path: &str) -> Option<&'a AnnotatedNodeRecord> {
    forest.iter().find_map(|r| r.find(path))
}

/// Total number of records in a forest, expanded descendants included.
pub fn count_records(forest: &[AnnotatedNodeRecord]) -> usize {
    forest.iter().map(|r| 1 + count_records(r.children())).sum()
}
