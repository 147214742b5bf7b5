//! Parser for the two-section follows-graph text format.
//!
//! The format is line-oriented. A `users` marker opens a section of one
//! handle per line; a `relations` marker opens a section of `@from, @to`
//! pairs. Both markers must appear. Recoverable findings (duplicate users,
//! self-referential relations, content outside any section) become warnings;
//! a relation line that is not a comma-separated pair is a hard error.
//!
//! Relation endpoints that were never declared in the `users` section are
//! auto-created. That policy belongs to this layer, not to the graph
//! container, which always rejects edges between unknown nodes.

use std::path::Path;

use indexmap::IndexSet;
use shoal_graphlib::Graph;

use crate::{Error, Result, handle};

pub(crate) const SECTION_USERS: &str = "users";
pub(crate) const SECTION_RELATIONS: &str = "relations";

/// Outcome of a successful parse.
#[derive(Debug)]
pub struct ParseOutcome {
    pub graph: Graph,
    pub warnings: Vec<String>,
    /// Handles created from relation endpoints that were never declared.
    pub auto_created: Vec<String>,
}

pub fn parse_graph(text: &str) -> Result<ParseOutcome> {
    parse_graph_with_origin(text, None)
}

/// Parses `text`, tagging warnings with `origin` and a line number when an
/// origin path is known.
pub fn parse_graph_with_origin(text: &str, origin: Option<&Path>) -> Result<ParseOutcome> {
    let mut acc = Accumulator::new(origin);
    for line in text.lines() {
        acc.accept(line)?;
    }
    acc.build()
}

pub fn parse_graph_file(path: &Path) -> Result<ParseOutcome> {
    let text = std::fs::read_to_string(path)?;
    parse_graph_with_origin(&text, Some(path))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Users,
    Relations,
}

fn section_marker(line: &str) -> Option<Section> {
    if line.eq_ignore_ascii_case(SECTION_USERS) {
        return Some(Section::Users);
    }
    if line.eq_ignore_ascii_case(SECTION_RELATIONS) {
        return Some(Section::Relations);
    }
    None
}

#[derive(Debug)]
struct RelationLine {
    from: String,
    to: String,
}

struct Accumulator<'a> {
    origin: Option<&'a Path>,
    users: IndexSet<String>,
    relations: Vec<RelationLine>,
    warnings: Vec<String>,
    section: Section,
    users_seen: bool,
    relations_seen: bool,
    line_number: usize,
}

impl<'a> Accumulator<'a> {
    fn new(origin: Option<&'a Path>) -> Self {
        Self {
            origin,
            users: IndexSet::new(),
            relations: Vec::new(),
            warnings: Vec::new(),
            section: Section::None,
            users_seen: false,
            relations_seen: false,
            line_number: 0,
        }
    }

    fn accept(&mut self, raw: &str) -> Result<()> {
        self.line_number += 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        if let Some(section) = section_marker(trimmed) {
            self.enter_section(section);
            return Ok(());
        }
        match self.section {
            Section::Users => self.accept_user(trimmed),
            Section::Relations => self.accept_relation(trimmed)?,
            Section::None => self.warn(format!(
                "line ignored before the '{SECTION_USERS}' section: {trimmed}"
            )),
        }
        Ok(())
    }

    fn enter_section(&mut self, section: Section) {
        self.section = section;
        match section {
            Section::Users => self.users_seen = true,
            Section::Relations => self.relations_seen = true,
            Section::None => {}
        }
    }

    fn accept_user(&mut self, line: &str) {
        match handle::validate_handle(line) {
            Ok(validated) => {
                if !self.users.insert(validated.to_string()) {
                    self.warn(format!("duplicate user ignored: {validated}"));
                }
            }
            Err(err) => self.warn(err.to_string()),
        }
    }

    fn accept_relation(&mut self, line: &str) -> Result<()> {
        let tokens: Vec<&str> = line.split(',').collect();
        if tokens.len() != 2 {
            return Err(Error::MalformedRelation {
                line: self.line_number,
                text: line.to_string(),
            });
        }
        let from = handle::validate_handle(tokens[0])?;
        let to = handle::validate_handle(tokens[1])?;
        if from.to_lowercase() == to.to_lowercase() {
            self.warn(format!("self-referential relation ignored: {line}"));
            return Ok(());
        }
        self.relations.push(RelationLine {
            from: from.to_string(),
            to: to.to_string(),
        });
        Ok(())
    }

    fn build(mut self) -> Result<ParseOutcome> {
        if !self.users_seen || !self.relations_seen {
            return Err(Error::MissingSections);
        }
        if self.users.is_empty() {
            self.warnings
                .push(format!("no users declared in the '{SECTION_USERS}' section"));
        }

        let mut graph = Graph::new();
        for user in &self.users {
            graph.add_node(user)?;
        }
        let mut auto_created: IndexSet<String> = IndexSet::new();
        for relation in &self.relations {
            if !graph.contains_node(&relation.from) {
                auto_created.insert(relation.from.clone());
                graph.add_node(&relation.from)?;
            }
            if !graph.contains_node(&relation.to) {
                auto_created.insert(relation.to.clone());
                graph.add_node(&relation.to)?;
            }
            graph.add_edge(&relation.from, &relation.to)?;
        }
        for handle in &auto_created {
            self.warnings
                .push(format!("user auto-created from relations: {handle}"));
        }

        tracing::debug!(
            users = graph.node_count(),
            relations = graph.edge_count(),
            warnings = self.warnings.len(),
            "parsed follows graph"
        );

        Ok(ParseOutcome {
            graph,
            warnings: self.warnings,
            auto_created: auto_created.into_iter().collect(),
        })
    }

    fn warn(&mut self, message: String) {
        let formatted = match self.origin {
            Some(path) => format!("{}:{}: {message}", path.display(), self.line_number),
            None => format!("line {}: {message}", self.line_number),
        };
        self.warnings.push(formatted);
    }
}
