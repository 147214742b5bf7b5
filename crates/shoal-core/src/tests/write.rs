use crate::*;

#[test]
fn writes_the_two_section_format() {
    let text = "users\n@alice\n@bob\nrelations\n@alice, @bob\n";
    let outcome = parse_graph(text).unwrap();
    assert_eq!(write_graph(&outcome.graph), text);
}

#[test]
fn empty_graph_still_writes_both_markers() {
    let g = Graph::new();
    assert_eq!(write_graph(&g), "users\nrelations\n");
}

#[test]
fn output_round_trips_through_the_parser() {
    let text = "users\n@alice\n@bob\n@carol\nrelations\n@alice, @bob\n@bob, @alice\n@carol, @alice\n";
    let first = parse_graph(text).unwrap();
    let written = write_graph(&first.graph);
    let second = parse_graph(&written).unwrap();

    assert_eq!(first.graph.node_handles(), second.graph.node_handles());
    assert_eq!(first.graph.edge_count(), second.graph.edge_count());
    for user in first.graph.nodes() {
        assert_eq!(first.graph.neighbors(user), second.graph.neighbors(user));
    }
    assert!(second.warnings.is_empty());
}

#[test]
fn auto_created_users_become_declared_on_rewrite() {
    let text = "users\n@alice\nrelations\n@alice, @ghost\n";
    let outcome = parse_graph(text).unwrap();
    let written = write_graph(&outcome.graph);

    let reparsed = parse_graph(&written).unwrap();
    assert!(reparsed.auto_created.is_empty());
    assert_eq!(reparsed.graph.node_handles(), vec!["@alice", "@ghost"]);
}
