use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use meeting_graph::config::LayoutConfig;
use meeting_graph::graph::{ColorClass, MeetingGraph, build_graph};
use meeting_graph::ir::{Direction, MeetingRecord};
use meeting_graph::layout::{PositionedNode, layout_graph};
use meeting_graph::layout_dump::GraphDump;

fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
}

fn load_fixture(path: &Path) -> Vec<MeetingRecord> {
    let input = std::fs::read_to_string(path).expect("fixture read failed");
    serde_json::from_str(&input).expect("fixture parse failed")
}

fn assert_graph_invariants(records: &[MeetingRecord], graph: &MeetingGraph, fixture: &str) {
    assert_eq!(
        graph.nodes.len(),
        records.len(),
        "{fixture}: expected one node per record"
    );
    let ids: HashSet<&str> = graph.nodes.iter().map(|node| node.id.as_str()).collect();
    for edge in &graph.edges {
        assert!(
            ids.contains(edge.source.as_str()),
            "{fixture}: edge source `{}` left dangling",
            edge.source
        );
        assert!(
            ids.contains(edge.target.as_str()),
            "{fixture}: edge target `{}` left dangling",
            edge.target
        );
    }
}

fn assert_layout_invariants(graph: &MeetingGraph, placed: &[PositionedNode], fixture: &str) {
    assert_eq!(
        placed.len(),
        graph.nodes.len(),
        "{fixture}: layout dropped a node"
    );
    let mut seen = HashSet::new();
    for node in placed {
        assert!(
            node.x.is_finite() && node.y.is_finite(),
            "{fixture}: non-finite coordinate"
        );
        assert!(
            seen.insert((node.x.to_bits(), node.y.to_bits())),
            "{fixture}: two nodes share a position"
        );
    }
}

fn assert_rank_invariant(graph: &MeetingGraph, placed: &[PositionedNode], fixture: &str) {
    let ranks: HashMap<&str, usize> = placed
        .iter()
        .map(|node| (node.node.id.as_str(), node.rank))
        .collect();
    for edge in &graph.edges {
        if edge.source == edge.target {
            continue;
        }
        assert!(
            ranks[edge.target.as_str()] > ranks[edge.source.as_str()],
            "{fixture}: edge {} -> {} violates rank order",
            edge.source,
            edge.target
        );
    }
}

#[test]
fn fixtures_build_and_lay_out() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");

    // Keep this list explicit so new fixture shapes must be added intentionally.
    // The bool marks fixtures whose edge set is acyclic (rank order must hold).
    let candidates = [
        ("chain.json", true),
        ("branching.json", true),
        ("cycle.json", false),
        ("dangling.json", true),
        ("disconnected.json", true),
        ("empty.json", true),
    ];

    for (rel, acyclic) in candidates {
        let path = root.join(rel);
        assert!(path.exists(), "fixture missing: {rel}");
        let records = load_fixture(&path);
        let graph = build_graph(&records, fixture_now()).expect("build failed");
        assert_graph_invariants(&records, &graph, rel);

        for direction in [Direction::TopDown, Direction::LeftRight] {
            let placed = layout_graph(&graph, direction, &LayoutConfig::default());
            assert_layout_invariants(&graph, &placed, rel);
            if acyclic {
                assert_rank_invariant(&graph, &placed, rel);
            }
        }
    }
}

#[test]
fn dangling_references_never_reach_the_edge_set() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dangling.json");
    let records = load_fixture(&root);
    let graph = build_graph(&records, fixture_now()).unwrap();
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].source, "standup");
    assert_eq!(graph.edges[0].target, "planning");
}

#[test]
fn repeated_runs_produce_identical_dumps() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/branching.json");
    let records = load_fixture(&root);
    let config = LayoutConfig::default();

    let render = || {
        let graph = build_graph(&records, fixture_now()).unwrap();
        let placed = layout_graph(&graph, Direction::LeftRight, &config);
        let dump = GraphDump::from_graph(&graph, &placed, Direction::LeftRight, &config);
        serde_json::to_string(&dump).unwrap()
    };

    assert_eq!(render(), render());
}

#[test]
fn end_to_end_scenario() {
    let records: Vec<MeetingRecord> = serde_json::from_str(
        r#"[
            {
                "id": "a",
                "name": "Coaching Session A",
                "startTime": "2025-03-03T10:00:00Z",
                "status": "completed",
                "coachScore": 70,
                "nextConnectedMeetings": ["b"]
            },
            {
                "id": "b",
                "name": "Coaching Session B",
                "startTime": "2025-03-06T10:00:00Z",
                "status": "completed",
                "coachScore": 85
            }
        ]"#,
    )
    .unwrap();

    let graph = build_graph(&records, fixture_now()).unwrap();
    assert_eq!(graph.edges.len(), 1);
    let edge = &graph.edges[0];
    assert_eq!(edge.id, "e-a-b");
    assert_eq!(edge.score_delta, Some(15));
    assert_eq!(edge.color_class, ColorClass::Improving);
    assert!(!edge.animated);

    let config = LayoutConfig::default();
    let placed = layout_graph(&graph, Direction::LeftRight, &config);
    let a = placed.iter().find(|p| p.node.id == "a").unwrap();
    let b = placed.iter().find(|p| p.node.id == "b").unwrap();
    assert!(b.x > a.x, "successor must land strictly to the right");

    let dump = GraphDump::from_graph(&graph, &placed, Direction::LeftRight, &config);
    assert_eq!(dump.direction, "LR");
    assert_eq!(dump.node_count, 2);
    assert_eq!(dump.edge_count, 1);
    assert_eq!(dump.edges[0].time_gap, "3d");
    assert_eq!(dump.edges[0].color_class, "improving");
}
