//! In-memory content repository backed by a fixture tree.

use std::collections::{HashMap, HashSet};

use super::fixture::FixtureNode;
use crate::content::{ContentNode, NodeStore, TypeFilter};
use crate::error::{InspectorError, InspectorResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryNode {
    index: usize,
    identifier: String,
    path: String,
    label: String,
    node_type: String,
    depth: u32,
}

impl ContentNode for MemoryNode {
    fn identifier(&self) -> &str { &self.identifier }
    fn path(&self) -> &str { &self.path }
    fn label(&self) -> &str { &self.label }
    fn node_type(&self) -> &str { &self.node_type }
    fn depth(&self) -> u32 { self.depth }
}

#[derive(Debug, Clone)]
struct Slot {
    node: MemoryNode,
    children: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct MemoryNodeStore {
    slots: Vec<Slot>,
    by_path: HashMap<String, usize>,
    supertypes: HashMap<String, Vec<String>>,
    entry: Option<usize>,
    failing: HashSet<String>,
}

pub const ROOT_NODE_TYPE: &str = "unstructured";

fn child_path(parent: &str, name: &str) -> String {
    if parent == "/" { format!("/{}", name) } else { format!("{}/{}", parent, name) }
}

impl MemoryNodeStore {
    pub fn build(nodes: &[FixtureNode], supertypes: HashMap<String, Vec<String>>, entry: Option<&str>) -> InspectorResult<Self> {
        let root = MemoryNode {
            index: 0,
            identifier: "root".to_string(),
            path: "/".to_string(),
            label: String::new(),
            node_type: ROOT_NODE_TYPE.to_string(),
            depth: 0,
        };
        let mut store = Self {
            slots: vec![Slot { node: root, children: Vec::new() }],
            by_path: HashMap::from([("/".to_string(), 0)]),
            supertypes,
            entry: None,
            failing: HashSet::new(),
        };
        for n in nodes {
            store.insert(0, n)?;
        }
        if let Some(p) = entry {
            let idx = store.by_path.get(p).copied()
                .ok_or_else(|| InspectorError::fixture(format!("entry node '{}' is not part of the tree", p)))?;
            store.entry = Some(idx);
        }
        Ok(store)
    }

    fn insert(&mut self, parent: usize, n: &FixtureNode) -> InspectorResult<()> {
        if n.name.is_empty() || n.name.contains('/') {
            return Err(InspectorError::fixture(format!("invalid node name '{}'", n.name)));
        }
        let parent_node = &self.slots[parent].node;
        let path = child_path(&parent_node.path, &n.name);
        if self.by_path.contains_key(&path) {
            return Err(InspectorError::fixture(format!("duplicate node path '{}'", path)));
        }
        let index = self.slots.len();
        let node = MemoryNode {
            index,
            identifier: n.identifier.clone().unwrap_or_else(|| path.clone()),
            label: n.label.clone().unwrap_or_else(|| n.name.clone()),
            node_type: n.node_type.clone(),
            depth: parent_node.depth + 1,
            path: path.clone(),
        };
        self.slots.push(Slot { node, children: Vec::new() });
        self.slots[parent].children.push(index);
        self.by_path.insert(path, index);
        for c in &n.children {
            self.insert(index, c)?;
        }
        Ok(())
    }

    pub fn node(&self, path: &str) -> InspectorResult<MemoryNode> {
        self.by_path
            .get(path)
            .map(|&i| self.slots[i].node.clone())
            .ok_or_else(|| InspectorError::NodeNotFound(path.to_string()))
    }

    /// Make every child query on `path` fail, simulating a node removed mid-traversal.
    pub fn fail_on(&mut self, path: &str) {
        self.failing.insert(path.to_string());
    }

    fn type_inherits(&self, node_type: &str, wanted: &str) -> bool {
        let mut stack = vec![node_type];
        let mut seen: HashSet<&str> = HashSet::new();
        while let Some(t) = stack.pop() {
            if t == wanted {
                return true;
            }
            if !seen.insert(t) {
                continue;
            }
            if let Some(parents) = self.supertypes.get(t) {
                stack.extend(parents.iter().map(String::as_str));
            }
        }
        false
    }

    fn accepts(&self, node: &MemoryNode, filter: TypeFilter<'_>) -> bool {
        match filter {
            TypeFilter::Any => true,
            TypeFilter::Only(t) => self.type_inherits(&node.node_type, t),
            TypeFilter::Exact(t) => node.node_type == t,
        }
    }

    fn slot(&self, node: &MemoryNode) -> InspectorResult<&Slot> {
        if self.failing.contains(&node.path) {
            return Err(InspectorError::store(format!("node '{}' is no longer available", node.path)));
        }
        self.slots
            .get(node.index)
            .filter(|s| s.node.path == node.path)
            .ok_or_else(|| InspectorError::NodeNotFound(node.path.clone()))
    }
}

impl NodeStore for MemoryNodeStore {
    type Node = MemoryNode;

    fn child_nodes(&self, node: &MemoryNode, filter: TypeFilter<'_>) -> InspectorResult<Vec<MemoryNode>> {
        let slot = self.slot(node)?;
        Ok(slot
            .children
            .iter()
            .map(|&i| &self.slots[i].node)
            .filter(|c| self.accepts(c, filter))
            .cloned()
            .collect())
    }

    fn has_child_nodes(&self, node: &MemoryNode, filter: TypeFilter<'_>) -> InspectorResult<bool> {
        let slot = self.slot(node)?;
        Ok(slot.children.iter().any(|&i| self.accepts(&self.slots[i].node, filter)))
    }

    fn is_of_type(&self, node: &MemoryNode, type_name: &str) -> bool {
        self.type_inherits(&node.node_type, type_name)
    }

    fn default_entry_node(&self) -> InspectorResult<MemoryNode> {
        match self.entry {
            Some(i) => Ok(self.slots[i].node.clone()),
            None => Err(InspectorError::NodeNotFound("default entry node".to_string())),
        }
    }
}
