//! Serializer reproducing the two-section text format.
//!
//! Output round-trips with [`crate::parse`]: users in node insertion order,
//! then one `from, to` line per edge in adjacency order.

use std::path::Path;

use shoal_graphlib::Graph;

use crate::Result;
use crate::parse::{SECTION_RELATIONS, SECTION_USERS};

pub fn write_graph(graph: &Graph) -> String {
    let mut out = String::new();
    out.push_str(SECTION_USERS);
    out.push('\n');
    for handle in graph.nodes() {
        out.push_str(handle);
        out.push('\n');
    }
    out.push_str(SECTION_RELATIONS);
    out.push('\n');
    for (from, targets) in graph.adjacency_view().iter() {
        for to in targets {
            out.push_str(from);
            out.push_str(", ");
            out.push_str(to);
            out.push('\n');
        }
    }
    out
}

pub fn write_graph_file(path: &Path, graph: &Graph) -> Result<()> {
    std::fs::write(path, write_graph(graph))?;
    Ok(())
}
