//! ACL checker service: resolves roles and entry nodes, then delegates to the tree
//! materializer and the ACL evaluator. Collaborators are injected once at construction.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::acl::{AclEvaluator, AclMap, PrivilegeCheckResult};
use crate::config::InspectorConfig;
use crate::content::{ContentNode, NodeStore, TypeFilter};
use crate::error::InspectorResult;
use crate::policy::{PolicyStore, Role};
use crate::tree::{AnnotatedNodeRecord, TreeMaterializer, DEFAULT_START_LEVEL};

/// Request for a document tree view. Without a depth the configured
/// `node_tree_loading_depth` applies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AclCheckerRequest {
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_tree_loading_depth: Option<u32>,
}

pub struct AclCheckerService<S: NodeStore, P: PolicyStore> {
    nodes: S,
    policies: P,
    config: InspectorConfig,
}

impl<S: NodeStore, P: PolicyStore> AclCheckerService<S, P> {
    pub fn new(nodes: S, policies: P, config: InspectorConfig) -> Self {
        Self { nodes, policies, config }
    }

    pub fn nodes(&self) -> &S { &self.nodes }
    pub fn config(&self) -> &InspectorConfig { &self.config }

    fn materializer(&self) -> TreeMaterializer<'_, S, P> {
        TreeMaterializer::new(&self.nodes, &self.policies)
            .with_anchor(self.config.acl_anchor)
            .with_create_subject_type(self.config.create_subject_includes_node_type)
    }

    fn evaluator(&self) -> AclEvaluator<'_, P> {
        AclEvaluator::new(&self.policies).with_create_subject_type(self.config.create_subject_includes_node_type)
    }

    fn effective_depth(&self, requested: u32) -> u32 {
        let depth = self.config.clamp_depth(requested);
        if depth != requested {
            warn!(target: "acl_inspector::service", "requested tree depth {} clamped to {}", requested, depth);
        }
        depth
    }

    /// Resolve role identifiers in order. Unknown identifiers are dropped; any other
    /// policy store failure is returned.
    pub fn resolve_roles<I: AsRef<str>>(&self, identifiers: &[I]) -> InspectorResult<Vec<P::Role>> {
        let mut roles = Vec::with_capacity(identifiers.len());
        for id in identifiers {
            match self.policies.role(id.as_ref()) {
                Ok(role) => roles.push(role),
                Err(e) if e.is_role_not_found() => {
                    debug!(target: "acl_inspector::service", "skipping unknown role '{}'", id.as_ref());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(roles)
    }

    /// Document tree below the default entry node for the given roles.
    pub fn build_acl_tree<I: AsRef<str>>(&self, role_identifiers: &[I], max_depth: u32) -> InspectorResult<Vec<AnnotatedNodeRecord>> {
        let roles = self.resolve_roles(role_identifiers)?;
        let entry = self.nodes.default_entry_node()?;
        let depth = self.effective_depth(max_depth);
        info!(
            target: "acl_inspector::service",
            "building acl tree from {} for {} role(s), depth={}",
            entry.path(), roles.len(), depth
        );
        self.materializer().materialize(
            &entry,
            &roles,
            depth,
            TypeFilter::Only(&self.config.document_node_type),
            DEFAULT_START_LEVEL,
        )
    }

    pub fn resolve_request(&self, request: &AclCheckerRequest) -> InspectorResult<Vec<AnnotatedNodeRecord>> {
        let depth = request.node_tree_loading_depth.unwrap_or(self.config.node_tree_loading_depth);
        self.build_acl_tree(request.roles.as_slice(), depth)
    }

    /// Content area below `node` (content collections for documents).
    pub fn build_acl_tree_for_content_area(&self, node: &S::Node, roles: &[P::Role], max_depth: u32) -> InspectorResult<Vec<AnnotatedNodeRecord>> {
        let depth = self.effective_depth(max_depth);
        info!(
            target: "acl_inspector::service",
            "building content acl tree for {} with {} role(s), depth={}",
            node.path(), roles.len(), depth
        );
        self.materializer().materialize_content_area(
            node,
            roles,
            depth,
            &self.config.document_node_type,
            &self.config.content_collection_node_type,
        )
    }

    /// Content area using the configured default content depth.
    pub fn build_default_content_tree(&self, node: &S::Node, roles: &[P::Role]) -> InspectorResult<Vec<AnnotatedNodeRecord>> {
        self.build_acl_tree_for_content_area(node, roles, self.config.content_tree_loading_depth)
    }

    pub fn summarize(&self, node: &S::Node, roles: &[P::Role]) -> AclMap {
        self.evaluator().summarize(node, roles)
    }

    pub fn check_privilege_targets(&self, node: &S::Node, roles: &[P::Role]) -> PrivilegeCheckResult {
        let result = self.evaluator().check_privilege_targets(node, roles);
        debug!(
            target: "acl_inspector::service",
            "privilege targets for {}: granted={} denied={} abstained={} (roles: {})",
            node.path(),
            result.granted.len(),
            result.denied.len(),
            result.abstained.len(),
            roles.iter().map(|r| r.identifier()).collect::<Vec<_>>().join(",")
        );
        result
    }
}
