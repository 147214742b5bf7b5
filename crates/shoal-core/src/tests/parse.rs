use std::path::Path;

use crate::*;

#[test]
fn parse_basic_graph() {
    let text = "users\n@alice\n@bob\n@carol\nrelations\n@alice, @bob\n@bob, @carol\n";
    let outcome = parse_graph(text).unwrap();

    assert_eq!(
        outcome.graph.node_handles(),
        vec!["@alice", "@bob", "@carol"]
    );
    assert_eq!(outcome.graph.edge_count(), 2);
    assert!(outcome.graph.has_edge("@alice", "@bob"));
    assert!(outcome.graph.has_edge("@bob", "@carol"));
    assert!(outcome.warnings.is_empty());
    assert!(outcome.auto_created.is_empty());
}

#[test]
fn section_markers_are_case_insensitive() {
    let text = "Users\n@alice\nRELATIONS\n";
    let outcome = parse_graph(text).unwrap();
    assert_eq!(outcome.graph.node_handles(), vec!["@alice"]);
}

#[test]
fn duplicate_users_are_reported_and_ignored() {
    let text = "users\n@alice\n@alice\nrelations\n";
    let outcome = parse_graph(text).unwrap();

    assert_eq!(outcome.graph.node_count(), 1);
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("duplicate user ignored: @alice"));
    assert!(outcome.warnings[0].starts_with("line 3:"));
}

#[test]
fn invalid_user_lines_become_warnings() {
    let text = "users\nalice\n@bob\nrelations\n";
    let outcome = parse_graph(text).unwrap();

    assert_eq!(outcome.graph.node_handles(), vec!["@bob"]);
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("must start with '@'"));
}

#[test]
fn content_before_any_section_is_ignored_with_a_warning() {
    let text = "@stray\nusers\n@alice\nrelations\n";
    let outcome = parse_graph(text).unwrap();

    assert_eq!(outcome.graph.node_handles(), vec!["@alice"]);
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("line ignored before the 'users' section"));
}

#[test]
fn both_sections_are_required() {
    assert!(matches!(
        parse_graph("users\n@alice\n"),
        Err(Error::MissingSections)
    ));
    assert!(matches!(
        parse_graph("relations\n"),
        Err(Error::MissingSections)
    ));
    assert!(matches!(parse_graph(""), Err(Error::MissingSections)));
}

#[test]
fn malformed_relation_lines_are_hard_errors() {
    let text = "users\n@alice\nrelations\n@alice @bob\n";
    match parse_graph(text) {
        Err(Error::MalformedRelation { line, text }) => {
            assert_eq!(line, 4);
            assert_eq!(text, "@alice @bob");
        }
        other => panic!("expected MalformedRelation, got {other:?}"),
    }

    let text = "users\n@alice\nrelations\n@alice, @bob, @carol\n";
    assert!(matches!(
        parse_graph(text),
        Err(Error::MalformedRelation { .. })
    ));
}

#[test]
fn relation_endpoints_must_carry_the_sigil() {
    let text = "users\n@alice\nrelations\n@alice, bob\n";
    assert!(matches!(
        parse_graph(text),
        Err(Error::MissingSigil { handle }) if handle == "bob"
    ));
}

#[test]
fn self_referential_relations_are_skipped_with_a_warning() {
    let text = "users\n@Alice\nrelations\n@Alice, @alice\n";
    let outcome = parse_graph(text).unwrap();

    assert_eq!(outcome.graph.edge_count(), 0);
    assert!(
        outcome
            .warnings
            .iter()
            .any(|w| w.contains("self-referential relation ignored"))
    );
}

#[test]
fn undeclared_relation_endpoints_are_auto_created() {
    let text = "users\n@alice\nrelations\n@alice, @ghost\n@phantom, @alice\n";
    let outcome = parse_graph(text).unwrap();

    assert_eq!(
        outcome.graph.node_handles(),
        vec!["@alice", "@ghost", "@phantom"]
    );
    assert!(outcome.graph.has_edge("@alice", "@ghost"));
    assert!(outcome.graph.has_edge("@phantom", "@alice"));
    assert_eq!(outcome.auto_created, vec!["@ghost", "@phantom"]);
    assert_eq!(
        outcome
            .warnings
            .iter()
            .filter(|w| w.contains("auto-created"))
            .count(),
        2
    );
}

#[test]
fn empty_users_section_is_a_warning_not_an_error() {
    let outcome = parse_graph("users\nrelations\n").unwrap();
    assert!(outcome.graph.is_empty());
    assert!(outcome.warnings.iter().any(|w| w.contains("no users declared")));
}

#[test]
fn warnings_carry_the_origin_path_when_known() {
    let text = "users\n@alice\n@alice\nrelations\n";
    let outcome = parse_graph_with_origin(text, Some(Path::new("net.follows"))).unwrap();
    assert!(outcome.warnings[0].starts_with("net.follows:3:"));
}

#[test]
fn duplicate_relation_lines_collapse_to_one_edge() {
    let text = "users\n@alice\n@bob\nrelations\n@alice, @bob\n@alice, @bob\n";
    let outcome = parse_graph(text).unwrap();
    assert_eq!(outcome.graph.edge_count(), 1);
}
