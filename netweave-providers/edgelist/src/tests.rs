use rstest::rstest;

use netweave_core::{NetworkErrorCode, NodeKind};

use super::{EdgeListError, EdgeListErrorCode, EdgeListNetwork};

const CAMPUS: &str = "\
# three-site campus
node core server
node north
node south client

link core north 4.0 10.0
link core south 6.0 8.0
link north south 1.5 2.0
";

#[test]
fn parses_nodes_links_and_kinds() {
    let parsed = EdgeListNetwork::parse("campus", CAMPUS).expect("fixture is valid");
    assert_eq!(parsed.name(), "campus");
    assert_eq!(parsed.network().node_count(), 3);
    assert_eq!(parsed.network().link_count(), 3);
    assert_eq!(parsed.labels(), &["core", "north", "south"]);
    assert_eq!(parsed.kind(0), Some(NodeKind::Server));
    assert_eq!(parsed.kind(1), Some(NodeKind::Client));
    assert_eq!(parsed.node_id("south"), Some(2));
    assert_eq!(parsed.node_id("absent"), None);
}

#[test]
fn label_lookup_round_trips_node_ids() {
    let parsed = EdgeListNetwork::parse("campus", CAMPUS).expect("fixture is valid");
    for (id, label) in parsed.labels().iter().enumerate() {
        assert_eq!(parsed.node_id(label), Some(id));
        assert_eq!(parsed.label(id), Some(label.as_str()));
    }
    assert_eq!(parsed.label(99), None);
    assert_eq!(parsed.kind(99), None);
}

#[test]
fn blank_lines_and_comments_are_ignored() {
    let text = "\n\n# nothing but comments\n   # indented too\n";
    let parsed = EdgeListNetwork::parse("empty", text).expect("comments are ignored");
    assert_eq!(parsed.network().node_count(), 0);
    assert_eq!(parsed.network().link_count(), 0);
}

#[rstest]
#[case::directive("route a b\n", EdgeListErrorCode::UnknownDirective)]
#[case::missing_label("node\n", EdgeListErrorCode::MissingField)]
#[case::bad_kind("node a router\n", EdgeListErrorCode::UnknownKind)]
#[case::duplicate("node a\nnode a\n", EdgeListErrorCode::DuplicateLabel)]
#[case::unknown_label("node a\nlink a b 1.0 1.0\n", EdgeListErrorCode::UnknownLabel)]
#[case::missing_number("node a\nnode b\nlink a b 1.0\n", EdgeListErrorCode::MissingField)]
#[case::bad_number("node a\nnode b\nlink a b one 1.0\n", EdgeListErrorCode::InvalidNumber)]
fn malformed_input_is_rejected(#[case] text: &str, #[case] expected: EdgeListErrorCode) {
    let err = EdgeListNetwork::parse("bad", text).expect_err("input is malformed");
    assert_eq!(err.code(), expected);
}

#[test]
fn errors_carry_the_offending_line_number() {
    let text = "node a\nnode b\nlink a c 1.0 1.0\n";
    let err = EdgeListNetwork::parse("bad", text).expect_err("label c is undeclared");
    assert_eq!(
        err,
        EdgeListError::UnknownLabel {
            line: 3,
            label: "c".into(),
        }
    );
}

#[test]
fn network_validation_failures_surface_unchanged() {
    let text = "node a\nnode b\nlink a b 1.0 0.0\n";
    let err = EdgeListNetwork::parse("bad", text).expect_err("zero bandwidth is invalid");
    let EdgeListError::Network(inner) = err else {
        panic!("expected a network validation error");
    };
    assert_eq!(inner.code(), NetworkErrorCode::NonPositiveBandwidth);
}
