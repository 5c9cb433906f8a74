//! JSON fixture format describing a content tree, its type hierarchy and a role set.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::node_store::MemoryNodeStore;
use super::policy_store::{StaticPolicyStore, StaticRole};
use crate::error::{InspectorError, InspectorResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FixtureNode {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub children: Vec<FixtureNode>,
}

impl FixtureNode {
    pub fn new(name: &str, node_type: &str) -> Self {
        Self { name: name.to_string(), node_type: node_type.to_string(), ..Default::default() }
    }

    pub fn with_children(mut self, children: Vec<FixtureNode>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    /// Path of the default site entry node, e.g. `/sites/acme`.
    #[serde(default)]
    pub entry: Option<String>,
    /// Node type -> direct supertypes.
    #[serde(default)]
    pub node_types: HashMap<String, Vec<String>>,
    /// Children of the repository root.
    #[serde(default)]
    pub nodes: Vec<FixtureNode>,
    #[serde(default)]
    pub roles: Vec<StaticRole>,
}

impl Fixture {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let fixture: Fixture = serde_json::from_str(text).context("fixture is not valid JSON")?;
        Ok(fixture)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading fixture '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn into_stores(self) -> InspectorResult<(MemoryNodeStore, StaticPolicyStore)> {
        let nodes = MemoryNodeStore::build(&self.nodes, self.node_types, self.entry.as_deref())?;
        let mut seen: Vec<&str> = Vec::new();
        for role in &self.roles {
            if seen.contains(&role.identifier.as_str()) {
                return Err(InspectorError::fixture(format!("duplicate role '{}'", role.identifier)));
            }
            seen.push(&role.identifier);
        }
        let policies = StaticPolicyStore::new(self.roles);
        Ok((nodes, policies))
    }
}
