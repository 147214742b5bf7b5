//! Orchestration over a single mutable graph: loading, saving, guarded
//! mutations and SCC computation.
//!
//! The service owns the graph (single-writer; no internal locking) and layers
//! the application policies the container deliberately does not enforce:
//! `@`-sigil handles, must-exist-before-relate, self-follow rejection, and
//! promotion of silent no-ops to policy errors. Every successful mutation
//! marks the unsaved-changes flag and invalidates the cached SCC result.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use shoal_graphlib::{Graph, alg};

use crate::parse::{self, ParseOutcome};
use crate::tracker::UnsavedChangesTracker;
use crate::{Error, Result, handle, write};

/// A single directed follows relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub from: String,
    pub to: String,
}

/// Result of an SCC computation: the components in deterministic order plus
/// the handle-to-component-index mapping derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct SccComputation {
    pub components: Vec<Vec<String>>,
    pub mapping: IndexMap<String, usize>,
}

/// What a caller gets back after loading a graph from text or a file.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub snapshot: Graph,
    pub warnings: Vec<String>,
    pub auto_created: Vec<String>,
    pub source: Option<PathBuf>,
    pub user_count: usize,
    pub relation_count: usize,
}

#[derive(Default)]
pub struct GraphService {
    graph: Graph,
    current_file: Option<PathBuf>,
    tracker: UnsavedChangesTracker,
    last_components: Vec<Vec<String>>,
    last_mapping: IndexMap<String, usize>,
}

impl GraphService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_path(&mut self, path: &Path) -> Result<LoadReport> {
        let outcome = parse::parse_graph_file(path)?;
        Ok(self.apply_loaded(outcome, Some(path.to_path_buf())))
    }

    /// Loads from already-read text (e.g. an embedded sample graph).
    pub fn load_from_str(&mut self, text: &str) -> Result<LoadReport> {
        let outcome = parse::parse_graph(text)?;
        Ok(self.apply_loaded(outcome, None))
    }

    /// Writes to the associated file; fails with [`Error::NoCurrentFile`]
    /// when the graph was never loaded from or saved to a path.
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.current_file.clone() else {
            return Err(Error::NoCurrentFile);
        };
        self.save_as(&path)
    }

    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        write::write_graph_file(path, &self.graph)?;
        tracing::debug!(path = %path.display(), "saved follows graph");
        self.current_file = Some(path.to_path_buf());
        self.tracker.mark_clean();
        Ok(())
    }

    /// Discards the current state in favor of a fresh empty graph.
    pub fn new_graph(&mut self) {
        self.graph = Graph::new();
        self.current_file = None;
        self.reset_scc_state();
        self.tracker.mark_clean();
    }

    pub fn add_user(&mut self, user: &str) -> Result<()> {
        let user = handle::validate_handle(user)?;
        if !self.graph.add_node(user)? {
            return Err(Error::DuplicateUser {
                handle: user.to_string(),
            });
        }
        self.mark_dirty();
        Ok(())
    }

    pub fn remove_user(&mut self, user: &str) -> Result<()> {
        let user = handle::validate_handle(user)?;
        if !self.graph.remove_node(user)? {
            return Err(Error::UnknownUser {
                handle: user.to_string(),
            });
        }
        self.mark_dirty();
        Ok(())
    }

    pub fn add_relation(&mut self, from: &str, to: &str) -> Result<()> {
        let from = handle::validate_handle(from)?;
        let to = handle::validate_handle(to)?;
        if from.to_lowercase() == to.to_lowercase() {
            return Err(Error::SelfFollow {
                handle: from.to_string(),
            });
        }
        self.ensure_user_exists(from)?;
        self.ensure_user_exists(to)?;
        if !self.graph.add_edge(from, to)? {
            return Err(Error::DuplicateRelation {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.mark_dirty();
        Ok(())
    }

    pub fn remove_relation(&mut self, from: &str, to: &str) -> Result<()> {
        let from = handle::validate_handle(from)?;
        let to = handle::validate_handle(to)?;
        if !self.graph.remove_edge(from, to)? {
            return Err(Error::UnknownRelation {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.mark_dirty();
        Ok(())
    }

    /// Runs the solver on the current graph and caches the result until the
    /// next mutation.
    pub fn compute_components(&mut self) -> SccComputation {
        let components = alg::strongly_connected_components(&self.graph);
        let mut mapping: IndexMap<String, usize> = IndexMap::new();
        for (component_id, component) in components.iter().enumerate() {
            for user in component {
                mapping.insert(user.clone(), component_id);
            }
        }
        tracing::debug!(components = components.len(), "computed strongly connected components");
        self.last_components = components.clone();
        self.last_mapping = mapping.clone();
        SccComputation {
            components,
            mapping,
        }
    }

    /// Deep copy of the current graph, safe to hand to read-side consumers.
    pub fn graph_snapshot(&self) -> Graph {
        self.graph.clone()
    }

    pub fn user_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn relation_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn users(&self) -> Vec<String> {
        self.graph.node_handles()
    }

    pub fn relations(&self) -> Vec<Relation> {
        let mut relations = Vec::with_capacity(self.graph.edge_count());
        for (from, targets) in self.graph.adjacency_view().iter() {
            for to in targets {
                relations.push(Relation {
                    from: from.to_string(),
                    to: to.clone(),
                });
            }
        }
        relations
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.tracker.has_unsaved_changes()
    }

    /// Components from the most recent [`GraphService::compute_components`]
    /// call; empty after any mutation.
    pub fn last_components(&self) -> &[Vec<String>] {
        &self.last_components
    }

    pub fn last_mapping(&self) -> &IndexMap<String, usize> {
        &self.last_mapping
    }

    pub fn on_dirty_change(&mut self, listener: impl Fn(bool) + 'static) {
        self.tracker.on_change(listener);
    }

    fn apply_loaded(&mut self, outcome: ParseOutcome, source: Option<PathBuf>) -> LoadReport {
        self.graph = outcome.graph;
        self.current_file = source.clone();
        self.reset_scc_state();
        self.tracker.mark_clean();
        tracing::debug!(
            users = self.graph.node_count(),
            relations = self.graph.edge_count(),
            "loaded follows graph"
        );
        LoadReport {
            snapshot: self.graph.clone(),
            warnings: outcome.warnings,
            auto_created: outcome.auto_created,
            source,
            user_count: self.graph.node_count(),
            relation_count: self.graph.edge_count(),
        }
    }

    fn ensure_user_exists(&self, user: &str) -> Result<()> {
        if !self.graph.contains_node(user) {
            return Err(Error::UnknownUser {
                handle: user.to_string(),
            });
        }
        Ok(())
    }

    fn mark_dirty(&mut self) {
        self.tracker.mark_dirty();
        self.reset_scc_state();
    }

    fn reset_scc_state(&mut self) {
        self.last_components.clear();
        self.last_mapping.clear();
    }
}
