//! Policy contract: roles, their privilege rules, and the policy store that decides them.

use serde::{Deserialize, Serialize};

use crate::content::ContentNode;
use crate::error::InspectorResult;

/// Closed set of privilege rule kinds the policy store can report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum PrivilegeKind {
    ReadNode,
    EditNode,
    RemoveNode,
    CreateNode,
    /// Visibility of the node in the backend tree.
    NodeTree,
    ReadNodeProperty,
    EditNodeProperty,
    MethodInvocation,
    EntityRead,
}

impl PrivilegeKind {
    /// Read-node plus the generic node-privilege family. Everything else is never
    /// evaluated against a node subject.
    pub fn applies_to_nodes(self) -> bool {
        match self {
            PrivilegeKind::ReadNode
            | PrivilegeKind::EditNode
            | PrivilegeKind::RemoveNode
            | PrivilegeKind::CreateNode
            | PrivilegeKind::NodeTree
            | PrivilegeKind::ReadNodeProperty
            | PrivilegeKind::EditNodeProperty => true,
            PrivilegeKind::MethodInvocation | PrivilegeKind::EntityRead => false,
        }
    }

    /// Create-node rules match against a subject that also names the type to create.
    pub fn needs_creation_type(self) -> bool { matches!(self, PrivilegeKind::CreateNode) }

    pub fn as_str(self) -> &'static str {
        match self {
            PrivilegeKind::ReadNode => "readNode",
            PrivilegeKind::EditNode => "editNode",
            PrivilegeKind::RemoveNode => "removeNode",
            PrivilegeKind::CreateNode => "createNode",
            PrivilegeKind::NodeTree => "nodeTree",
            PrivilegeKind::ReadNodeProperty => "readNodeProperty",
            PrivilegeKind::EditNodeProperty => "editNodeProperty",
            PrivilegeKind::MethodInvocation => "methodInvocation",
            PrivilegeKind::EntityRead => "entityRead",
        }
    }
}

/// What a privilege rule is evaluated against: a node, and for create checks the
/// type of node that would be created.
#[derive(Clone, Copy)]
pub struct PrivilegeSubject<'a> {
    pub node: &'a dyn ContentNode,
    pub creation_node_type: Option<&'a str>,
}

impl<'a> PrivilegeSubject<'a> {
    pub fn node(node: &'a dyn ContentNode) -> Self {
        Self { node, creation_node_type: None }
    }

    pub fn create(node: &'a dyn ContentNode, creation_node_type: &'a str) -> Self {
        Self { node, creation_node_type: Some(creation_node_type) }
    }
}

impl std::fmt::Debug for PrivilegeSubject<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivilegeSubject")
            .field("node", &self.node.path())
            .field("creation_node_type", &self.creation_node_type)
            .finish()
    }
}

/// One privilege rule carried by a role.
///
/// The three outcome predicates are independent; callers must not assume exactly one
/// of them holds.
pub trait Privilege {
    fn target_identifier(&self) -> &str;
    fn kind(&self) -> PrivilegeKind;
    fn matches_subject(&self, subject: &PrivilegeSubject<'_>) -> bool;
    fn is_granted(&self) -> bool;
    fn is_denied(&self) -> bool;
    fn is_abstained(&self) -> bool;
}

pub trait Role {
    type Privilege: Privilege;

    fn identifier(&self) -> &str;
    /// Rules in the role's own order.
    fn privileges(&self) -> &[Self::Privilege];
}

pub trait PolicyStore {
    type Role: Role;

    /// Resolve a role. Unknown identifiers must yield `InspectorError::RoleNotFound`.
    fn role(&self, identifier: &str) -> InspectorResult<Self::Role>;

    /// Decide `kind` on `subject` for exactly the given roles (no role composition).
    fn is_granted_for_roles(&self, roles: &[&Self::Role], kind: PrivilegeKind, subject: &PrivilegeSubject<'_>) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_family_is_applicable() {
        let applicable: Vec<PrivilegeKind> = [
            PrivilegeKind::ReadNode,
            PrivilegeKind::EditNode,
            PrivilegeKind::RemoveNode,
            PrivilegeKind::CreateNode,
            PrivilegeKind::NodeTree,
            PrivilegeKind::ReadNodeProperty,
            PrivilegeKind::EditNodeProperty,
        ]
        .into_iter()
        .filter(|k| k.applies_to_nodes())
        .collect();
        assert_eq!(applicable.len(), 7);
        assert!(!PrivilegeKind::MethodInvocation.applies_to_nodes());
        assert!(!PrivilegeKind::EntityRead.applies_to_nodes());
    }

    #[test]
    fn only_create_needs_creation_type() {
        assert!(PrivilegeKind::CreateNode.needs_creation_type());
        assert!(!PrivilegeKind::EditNode.needs_creation_type());
        assert!(!PrivilegeKind::ReadNode.needs_creation_type());
    }

    #[test]
    fn kind_serde_names() {
        let k: PrivilegeKind = serde_json::from_str("\"nodeTree\"").unwrap();
        assert_eq!(k, PrivilegeKind::NodeTree);
        assert_eq!(serde_json::to_string(&PrivilegeKind::CreateNode).unwrap(), "\"createNode\"");
        assert_eq!(PrivilegeKind::EditNodeProperty.as_str(), "editNodeProperty");
    }
}
