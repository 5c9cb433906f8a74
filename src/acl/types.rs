//! Result shapes of the ACL evaluator. Serialized field names are part of the output
//! contract consumed by tree renderers.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSummary {
    pub edit_node: bool,
    pub remove_node: bool,
    pub create_node_of_type: bool,
    pub show_in_tree: bool,
}

/// Role identifier -> summary, kept in first-insertion order.
///
/// Inserting an identifier that is already present replaces its summary but keeps
/// its position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AclMap {
    entries: Vec<(String, PermissionSummary)>,
}

impl AclMap {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, role: impl Into<String>, summary: PermissionSummary) {
        let role = role.into();
        match self.entries.iter_mut().find(|(k, _)| *k == role) {
            Some((_, slot)) => *slot = summary,
            None => self.entries.push((role, summary)),
        }
    }

    pub fn get(&self, role: &str) -> Option<&PermissionSummary> {
        self.entries.iter().find(|(k, _)| k == role).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl Serialize for AclMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (role, summary) in &self.entries {
            map.serialize_entry(role, summary)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AclMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AclMapVisitor;

        impl<'de> Visitor<'de> for AclMapVisitor {
            type Value = AclMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of role identifiers to permission summaries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<AclMap, A::Error> {
                let mut out = AclMap::new();
                while let Some((role, summary)) = access.next_entry::<String, PermissionSummary>()? {
                    out.insert(role, summary);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(AclMapVisitor)
    }
}

/// A privilege rule that matched a node, reported by target and owning role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrivilegeTargetMatch {
    pub privilege: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PrivilegeCheckResult {
    pub denied: Vec<PrivilegeTargetMatch>,
    pub abstained: Vec<PrivilegeTargetMatch>,
    pub granted: Vec<PrivilegeTargetMatch>,
}

impl PrivilegeCheckResult {
    pub fn is_empty(&self) -> bool {
        self.denied.is_empty() && self.abstained.is_empty() && self.granted.is_empty()
    }
}
