//! Per-node, per-role permission questions answered through the policy store.
//! Nothing is cached here; the store is expected to memoize if it needs to.

use tracing::debug;

use super::types::{AclMap, PermissionSummary, PrivilegeCheckResult, PrivilegeTargetMatch};
use crate::content::ContentNode;
use crate::policy::{PolicyStore, Privilege, PrivilegeKind, PrivilegeSubject, Role};

pub struct AclEvaluator<'p, P: PolicyStore> {
    policies: &'p P,
    /// When set, the create check asks "may this role create a child of the node's own
    /// type here"; otherwise the subject carries no creation type at all.
    create_subject_includes_node_type: bool,
}

impl<'p, P: PolicyStore> AclEvaluator<'p, P> {
    pub fn new(policies: &'p P) -> Self {
        Self { policies, create_subject_includes_node_type: true }
    }

    pub fn with_create_subject_type(mut self, include_node_type: bool) -> Self {
        self.create_subject_includes_node_type = include_node_type;
        self
    }

    /// Four fixed checks per role, each scoped to that single role.
    pub fn summarize(&self, node: &dyn ContentNode, roles: &[P::Role]) -> AclMap {
        let plain = PrivilegeSubject::node(node);
        let create = if self.create_subject_includes_node_type {
            PrivilegeSubject::create(node, node.node_type())
        } else {
            plain
        };

        let mut out = AclMap::new();
        for role in roles {
            let single = [role];
            let summary = PermissionSummary {
                edit_node: self.policies.is_granted_for_roles(&single, PrivilegeKind::EditNode, &plain),
                remove_node: self.policies.is_granted_for_roles(&single, PrivilegeKind::RemoveNode, &plain),
                create_node_of_type: self.policies.is_granted_for_roles(&single, PrivilegeKind::CreateNode, &create),
                show_in_tree: self.policies.is_granted_for_roles(&single, PrivilegeKind::NodeTree, &plain),
            };
            out.insert(role.identifier(), summary);
        }
        out
    }

    /// Every node-applicable rule of every role that matches `node`, bucketed by outcome.
    pub fn check_privilege_targets(&self, node: &dyn ContentNode, roles: &[P::Role]) -> PrivilegeCheckResult {
        let mut result = PrivilegeCheckResult::default();

        for role in roles {
            for privilege in role.privileges() {
                let kind = privilege.kind();
                if !kind.applies_to_nodes() {
                    continue;
                }
                let subject = if kind.needs_creation_type() {
                    PrivilegeSubject::create(node, node.node_type())
                } else {
                    PrivilegeSubject::node(node)
                };
                if !privilege.matches_subject(&subject) {
                    continue;
                }

                let hit = PrivilegeTargetMatch {
                    privilege: privilege.target_identifier().to_string(),
                    role: role.identifier().to_string(),
                };
                debug!(target: "acl_inspector::acl", "privilege '{}' of role '{}' matches {}", hit.privilege, hit.role, node.path());
                // Outcomes are not guaranteed exclusive by the store; record every one reported.
                if privilege.is_denied() {
                    result.denied.push(hit.clone());
                }
                if privilege.is_abstained() {
                    result.abstained.push(hit.clone());
                }
                if privilege.is_granted() {
                    result.granted.push(hit);
                }
            }
        }
        result
    }
}
