//! Depth-bounded, permission-annotated materialization of a node tree.
//!
//! Every call returns its own owned forest; children are composed into the parent's
//! record by the caller, so no accumulator is shared across recursion levels.

use tracing::debug;

use super::record::AnnotatedNodeRecord;
use crate::acl::{AclEvaluator, AclMap};
use crate::config::AclAnchor;
use crate::content::{ContentNode, NodeStore, TypeFilter};
use crate::error::InspectorResult;
use crate::policy::PolicyStore;

pub const DEFAULT_START_LEVEL: u32 = 1;

pub struct TreeMaterializer<'a, S: NodeStore, P: PolicyStore> {
    nodes: &'a S,
    acl: AclEvaluator<'a, P>,
    anchor: AclAnchor,
}

impl<'a, S: NodeStore, P: PolicyStore> TreeMaterializer<'a, S, P> {
    pub fn new(nodes: &'a S, policies: &'a P) -> Self {
        Self { nodes, acl: AclEvaluator::new(policies), anchor: AclAnchor::Parent }
    }

    pub fn with_anchor(mut self, anchor: AclAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_create_subject_type(mut self, include_node_type: bool) -> Self {
        self.acl = self.acl.with_create_subject_type(include_node_type);
        self
    }

    /// List the children of `root` (under `filter`) as annotated records, expanding
    /// grandchildren while `level < max_depth`, or always when `max_depth == 0`.
    ///
    /// With `AclAnchor::Parent` the policy store is asked once per listing and the
    /// summary is cloned into every sibling record.
    pub fn materialize(
        &self,
        root: &S::Node,
        roles: &[P::Role],
        max_depth: u32,
        filter: TypeFilter<'_>,
        level: u32,
    ) -> InspectorResult<Vec<AnnotatedNodeRecord>> {
        let children = self.nodes.child_nodes(root, filter)?;
        if children.is_empty() {
            return Ok(Vec::new());
        }

        // With the parent anchor every sibling shares the same summary
        let parent_acl = match self.anchor {
            AclAnchor::Parent => Some(self.acl.summarize(root, roles)),
            AclAnchor::Node => None,
        };
        let expand = max_depth == 0 || level < max_depth;

        let mut out = Vec::with_capacity(children.len());
        for child in &children {
            let acl = match &parent_acl {
                Some(acl) => acl.clone(),
                None => self.acl.summarize(child, roles),
            };
            let mut record = AnnotatedNodeRecord::from_node(child, acl);

            if expand && self.nodes.has_child_nodes(child, filter)? {
                debug!(target: "acl_inspector::tree", "expanding {} at level {}", child.path(), level);
                record.child_nodes = Some(self.materialize(child, roles, max_depth, filter, level + 1)?);
            } else if !expand {
                debug!(target: "acl_inspector::tree", "depth limit {} reached at {} (level {})", max_depth, child.path(), level);
            }
            out.push(record);
        }
        Ok(out)
    }

    /// Content below a node: for documents, each exact-typed content collection is
    /// listed with its own summary, immediately followed by its unfiltered descendants
    /// in the same flat sequence. Other nodes have their children listed directly.
    pub fn materialize_content_area(
        &self,
        node: &S::Node,
        roles: &[P::Role],
        max_depth: u32,
        document_type: &str,
        collection_type: &str,
    ) -> InspectorResult<Vec<AnnotatedNodeRecord>> {
        if !self.nodes.is_of_type(node, document_type) {
            return self.materialize(node, roles, max_depth, TypeFilter::Any, DEFAULT_START_LEVEL);
        }

        let mut out = Vec::new();
        for collection in self.nodes.child_nodes(node, TypeFilter::Exact(collection_type))? {
            let acl: AclMap = self.acl.summarize(&collection, roles);
            out.push(AnnotatedNodeRecord::from_node(&collection, acl));
            out.extend(self.materialize(&collection, roles, max_depth, TypeFilter::Any, DEFAULT_START_LEVEL)?);
        }
        Ok(out)
    }
}
