use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{InspectorError, InspectorResult};

/// Which node a listed record's `acl` summary is computed against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AclAnchor {
    /// The node that owns the listing (the record's parent). Long-standing behavior.
    #[default]
    Parent,
    /// The node the record describes.
    Node,
}

impl std::str::FromStr for AclAnchor {
    type Err = InspectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parent" => Ok(AclAnchor::Parent),
            "node" => Ok(AclAnchor::Node),
            other => Err(InspectorError::config(format!("unknown acl anchor '{}'", other))),
        }
    }
}

/// Inspector settings. Unspecified file values fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InspectorConfig {
    /// Type (or supertype) of nodes listed in the document tree.
    pub document_node_type: String,
    /// Exact type of content collections inside documents.
    pub content_collection_node_type: String,
    /// Depth for the document tree; 0 expands everything.
    pub node_tree_loading_depth: u32,
    /// Depth for content areas below a document.
    pub content_tree_loading_depth: u32,
    pub acl_anchor: AclAnchor,
    /// Create checks in summaries name the node's own type as the type to create.
    pub create_subject_includes_node_type: bool,
    /// Ceiling applied by the service when a caller asks for 0 (unlimited) or more.
    /// `Some(0)` is treated as no ceiling.
    pub max_tree_depth: Option<u32>,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            document_node_type: "Neos.Neos:Document".to_string(),
            content_collection_node_type: "Neos.Neos:ContentCollection".to_string(),
            node_tree_loading_depth: 0,
            content_tree_loading_depth: 4,
            acl_anchor: AclAnchor::Parent,
            create_subject_includes_node_type: true,
            max_tree_depth: None,
        }
    }
}

/// Environment overrides, read from `ACL_INSPECTOR_*` variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub document_node_type: Option<String>,
    pub content_collection_node_type: Option<String>,
    pub node_tree_loading_depth: Option<u32>,
    pub content_tree_loading_depth: Option<u32>,
    pub acl_anchor: Option<AclAnchor>,
    pub create_subject_includes_node_type: Option<bool>,
    pub max_tree_depth: Option<u32>,
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: Option<String>) -> InspectorResult<Option<T>> {
    match raw {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Ok(None),
        Some(v) => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| InspectorError::config(format!("{} has invalid value '{}'", name, v))),
    }
}

impl EnvOverrides {
    /// Build overrides from an arbitrary lookup so tests need not touch the process env.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(get: F) -> InspectorResult<Self> {
        let non_empty = |k: &str| get(k).filter(|v| !v.trim().is_empty());
        Ok(Self {
            document_node_type: non_empty("ACL_INSPECTOR_DOCUMENT_TYPE"),
            content_collection_node_type: non_empty("ACL_INSPECTOR_COLLECTION_TYPE"),
            node_tree_loading_depth: parse_var("ACL_INSPECTOR_TREE_DEPTH", get("ACL_INSPECTOR_TREE_DEPTH"))?,
            content_tree_loading_depth: parse_var("ACL_INSPECTOR_CONTENT_DEPTH", get("ACL_INSPECTOR_CONTENT_DEPTH"))?,
            acl_anchor: parse_var("ACL_INSPECTOR_ACL_ANCHOR", get("ACL_INSPECTOR_ACL_ANCHOR"))?,
            create_subject_includes_node_type: parse_var("ACL_INSPECTOR_CREATE_OWN_TYPE", get("ACL_INSPECTOR_CREATE_OWN_TYPE"))?,
            max_tree_depth: parse_var("ACL_INSPECTOR_MAX_DEPTH", get("ACL_INSPECTOR_MAX_DEPTH"))?,
        })
    }

    pub fn from_env() -> InspectorResult<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }
}

impl InspectorConfig {
    pub fn from_json_str(text: &str) -> InspectorResult<Self> {
        serde_json::from_str(text).map_err(|e| InspectorError::config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> InspectorResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| InspectorError::config(format!("reading '{}': {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    /// Defaults, then the optional file, then environment overrides.
    pub fn from_layers(file: Option<&InspectorConfig>, env: &EnvOverrides) -> Self {
        let mut cfg = file.cloned().unwrap_or_default();
        if let Some(v) = &env.document_node_type { cfg.document_node_type = v.clone(); }
        if let Some(v) = &env.content_collection_node_type { cfg.content_collection_node_type = v.clone(); }
        if let Some(v) = env.node_tree_loading_depth { cfg.node_tree_loading_depth = v; }
        if let Some(v) = env.content_tree_loading_depth { cfg.content_tree_loading_depth = v; }
        if let Some(v) = env.acl_anchor { cfg.acl_anchor = v; }
        if let Some(v) = env.create_subject_includes_node_type { cfg.create_subject_includes_node_type = v; }
        if env.max_tree_depth.is_some() { cfg.max_tree_depth = env.max_tree_depth; }
        debug!(target: "acl_inspector::config", "effective config: {:?}", cfg);
        cfg
    }

    /// Convenience used by the CLI: optional file plus process environment.
    pub fn load(path: Option<&Path>) -> InspectorResult<Self> {
        let file = match path {
            Some(p) => Some(Self::from_file(p)?),
            None => None,
        };
        Ok(Self::from_layers(file.as_ref(), &EnvOverrides::from_env()?))
    }

    /// Depth to use for a request, after applying `max_tree_depth`.
    pub fn clamp_depth(&self, requested: u32) -> u32 {
        match self.max_tree_depth {
            Some(ceiling) if ceiling > 0 && (requested == 0 || requested > ceiling) => ceiling,
            _ => requested,
        }
    }
}

#[cfg(test)]
mod config_tests;
