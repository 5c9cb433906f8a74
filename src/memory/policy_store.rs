//! Static policy store: roles and privilege rules declared up front, matched with path
//! globs and node type lists. Decisions use deny precedence across the given roles.

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{InspectorError, InspectorResult};
use crate::policy::{PolicyStore, Privilege, PrivilegeKind, PrivilegeSubject, Role};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Grant,
    Deny,
    Abstain,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticPrivilege {
    pub target: String,
    pub kind: PrivilegeKind,
    pub permission: Permission,
    /// Glob over node paths: `*` stays within a segment, `**` crosses segments.
    #[serde(default)]
    pub path_pattern: Option<String>,
    /// Node types the rule applies to; empty means any.
    #[serde(default)]
    pub node_types: Vec<String>,
    /// For create rules: node types that may be created; empty means any.
    #[serde(default)]
    pub creation_node_types: Vec<String>,
    #[serde(skip)]
    compiled: OnceCell<Option<Regex>>,
}

fn glob_to_regex(pattern: &str) -> Option<Regex> {
    // Escape regex meta, then restore wildcards: ** -> .*, * -> [^/]*
    let mut s = regex::escape(pattern);
    s = s.replace("\\*\\*", ".*");
    s = s.replace("\\*", "[^/]*");
    Regex::new(&format!("^{}$", s)).ok()
}

impl StaticPrivilege {
    pub fn new(target: &str, kind: PrivilegeKind, permission: Permission) -> Self {
        Self {
            target: target.to_string(),
            kind,
            permission,
            path_pattern: None,
            node_types: Vec::new(),
            creation_node_types: Vec::new(),
            compiled: OnceCell::new(),
        }
    }

    pub fn on_paths(mut self, pattern: &str) -> Self {
        self.path_pattern = Some(pattern.to_string());
        self.compiled = OnceCell::new();
        self
    }

    pub fn on_types(mut self, types: &[&str]) -> Self {
        self.node_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn creating(mut self, types: &[&str]) -> Self {
        self.creation_node_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    fn path_matches(&self, path: &str) -> bool {
        let Some(pattern) = self.path_pattern.as_deref() else { return true; };
        match self.compiled.get_or_init(|| glob_to_regex(pattern)) {
            Some(rx) => rx.is_match(path),
            None => false,
        }
    }
}

impl Privilege for StaticPrivilege {
    fn target_identifier(&self) -> &str { &self.target }
    fn kind(&self) -> PrivilegeKind { self.kind }

    fn matches_subject(&self, subject: &PrivilegeSubject<'_>) -> bool {
        if !self.path_matches(subject.node.path()) {
            return false;
        }
        if !self.node_types.is_empty() && !self.node_types.iter().any(|t| t == subject.node.node_type()) {
            return false;
        }
        if self.kind.needs_creation_type() && !self.creation_node_types.is_empty() {
            // A create subject without a creation type only matches unrestricted rules
            return match subject.creation_node_type {
                Some(t) => self.creation_node_types.iter().any(|c| c == t),
                None => false,
            };
        }
        true
    }

    fn is_granted(&self) -> bool { self.permission == Permission::Grant }
    fn is_denied(&self) -> bool { self.permission == Permission::Deny }
    fn is_abstained(&self) -> bool { self.permission == Permission::Abstain }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticRole {
    pub identifier: String,
    #[serde(default)]
    pub privileges: Vec<StaticPrivilege>,
}

impl StaticRole {
    pub fn new(identifier: &str, privileges: Vec<StaticPrivilege>) -> Self {
        Self { identifier: identifier.to_string(), privileges }
    }
}

impl Role for StaticRole {
    type Privilege = StaticPrivilege;

    fn identifier(&self) -> &str { &self.identifier }
    fn privileges(&self) -> &[StaticPrivilege] { &self.privileges }
}

#[derive(Debug, Clone, Default)]
pub struct StaticPolicyStore {
    roles: Vec<StaticRole>,
}

impl StaticPolicyStore {
    pub fn new(roles: Vec<StaticRole>) -> Self { Self { roles } }
}

impl PolicyStore for StaticPolicyStore {
    type Role = StaticRole;

    fn role(&self, identifier: &str) -> InspectorResult<StaticRole> {
        self.roles
            .iter()
            .find(|r| r.identifier == identifier)
            .cloned()
            .ok_or_else(|| InspectorError::RoleNotFound(identifier.to_string()))
    }

    fn is_granted_for_roles(&self, roles: &[&StaticRole], kind: PrivilegeKind, subject: &PrivilegeSubject<'_>) -> bool {
        let mut granted = false;
        for role in roles {
            for p in role.privileges.iter().filter(|p| p.kind == kind) {
                if !p.matches_subject(subject) {
                    continue;
                }
                // Deny precedence: any matching deny blocks immediately
                match p.permission {
                    Permission::Deny => return false,
                    Permission::Grant => granted = true,
                    Permission::Abstain => {}
                }
            }
        }
        granted
    }
}
