#![forbid(unsafe_code)]

//! Directed follows-graph container used by `shoal`.
//!
//! The container stores nodes (string handles) in insertion order, and per
//! node an insertion-ordered, duplicate-free list of outgoing edge targets.
//! Iteration order is stable across [`Clone`] and [`alg::transpose`], which
//! makes every derived computation (notably [`alg::strongly_connected_components`])
//! deterministic for a given mutation history.
//!
//! Handles are normalized by trimming surrounding whitespace; an empty
//! trimmed handle is rejected. Any richer naming convention (such as a
//! leading `@`) is a caller-side policy and deliberately not enforced here.

use rustc_hash::FxBuildHasher;

pub mod alg;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type IndexMap<K, V> = indexmap::IndexMap<K, V, FxBuildHasher>;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("handle is empty after trimming whitespace")]
    InvalidHandle,

    #[error("unknown node: {handle}")]
    UnknownNode { handle: String },
}

/// Trims `handle` and rejects handles that are empty afterwards.
///
/// This is the only validation the container itself performs; callers with
/// stricter naming rules layer them on top of this check.
pub fn validate_handle(handle: &str) -> Result<&str> {
    let trimmed = handle.trim();
    if trimmed.is_empty() {
        return Err(GraphError::InvalidHandle);
    }
    Ok(trimmed)
}

#[derive(Debug, Clone)]
pub(crate) struct NodeEntry {
    pub(crate) handle: String,
    pub(crate) out: Vec<String>,
}

/// Immutable point-in-time snapshot of a graph's adjacency.
///
/// Pairs the node insertion order with a deep copy of every outgoing-edge
/// sequence, so traversal code never observes (or triggers) iterator
/// invalidation on the live container.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyView {
    entries: IndexMap<String, Vec<String>>,
}

impl AdjacencyView {
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Outgoing targets of `handle` in insertion order; empty for unknown
    /// handles.
    pub fn neighbors(&self, handle: &str) -> &[String] {
        self.entries
            .get(handle.trim())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn node_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mutable directed graph keyed by handle.
///
/// Single-writer: the container performs no internal locking. Callers that
/// share one instance across threads must serialize mutation externally;
/// long-running read-side work should operate on [`Graph::adjacency_view`] or
/// a [`Clone`] instead of the live instance.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<NodeEntry>,
    pub(crate) node_index: HashMap<String, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with no outgoing edges. Returns `false` (and changes
    /// nothing) when the node already exists.
    pub fn add_node(&mut self, handle: &str) -> Result<bool> {
        let handle = validate_handle(handle)?;
        if self.node_index.contains_key(handle) {
            return Ok(false);
        }
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            handle: handle.to_string(),
            out: Vec::new(),
        });
        self.node_index.insert(handle.to_string(), idx);
        Ok(true)
    }

    /// Removes a node together with every edge that targets it. Returns
    /// `false` when the node does not exist.
    pub fn remove_node(&mut self, handle: &str) -> Result<bool> {
        let handle = validate_handle(handle)?;
        let Some(idx) = self.node_index.remove(handle) else {
            return Ok(false);
        };
        self.nodes.remove(idx);
        for i in idx..self.nodes.len() {
            let shifted = self.nodes[i].handle.as_str();
            if let Some(slot) = self.node_index.get_mut(shifted) {
                *slot = i;
            }
        }
        // No dangling edges survive a node removal.
        for entry in &mut self.nodes {
            entry.out.retain(|target| target != handle);
        }
        Ok(true)
    }

    /// Appends a directed edge to `from`'s outgoing list. Both endpoints must
    /// already exist; the container never auto-creates nodes on edge
    /// insertion. Returns `false` when the edge is already present.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<bool> {
        let from = validate_handle(from)?;
        let to = validate_handle(to)?;
        let Some(&from_idx) = self.node_index.get(from) else {
            return Err(GraphError::UnknownNode {
                handle: from.to_string(),
            });
        };
        if !self.node_index.contains_key(to) {
            return Err(GraphError::UnknownNode {
                handle: to.to_string(),
            });
        }
        let out = &mut self.nodes[from_idx].out;
        if out.iter().any(|target| target == to) {
            return Ok(false);
        }
        out.push(to.to_string());
        Ok(true)
    }

    /// Returns `false` when `from` is unknown or the edge does not exist.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> Result<bool> {
        let from = validate_handle(from)?;
        let to = validate_handle(to)?;
        let Some(&from_idx) = self.node_index.get(from) else {
            return Ok(false);
        };
        let out = &mut self.nodes[from_idx].out;
        let Some(pos) = out.iter().position(|target| target == to) else {
            return Ok(false);
        };
        out.remove(pos);
        Ok(true)
    }

    /// Outgoing targets of `handle` in insertion order; empty (not an error)
    /// for unknown handles.
    pub fn neighbors(&self, handle: &str) -> &[String] {
        self.node_index
            .get(handle.trim())
            .map(|&idx| self.nodes[idx].out.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        let to = to.trim();
        self.neighbors(from).iter().any(|target| target == to)
    }

    pub fn contains_node(&self, handle: &str) -> bool {
        self.node_index.contains_key(handle.trim())
    }

    /// Node handles in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.handle.as_str())
    }

    pub fn node_handles(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.handle.clone()).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.out.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Deep-copied snapshot of the adjacency, never a live view into the
    /// container's internal state.
    pub fn adjacency_view(&self) -> AdjacencyView {
        let mut entries =
            IndexMap::with_capacity_and_hasher(self.nodes.len(), FxBuildHasher);
        for entry in &self.nodes {
            entries.insert(entry.handle.clone(), entry.out.clone());
        }
        AdjacencyView { entries }
    }

    /// Creates every handle not already present, with no outgoing edges.
    /// Idempotent; existing nodes are left untouched.
    pub fn ensure_nodes_present<I>(&mut self, handles: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for handle in handles {
            self.add_node(handle.as_ref())?;
        }
        Ok(())
    }
}
