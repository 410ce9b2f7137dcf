use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::graph::MeetingGraph;
use crate::ir::Direction;
use crate::layout::PositionedNode;

/// Serialized handoff to the rendering layer: every positioned node plus
/// every annotated edge, with enum fields flattened to the strings the
/// dashboard's renderer keys on.
#[derive(Debug, Serialize)]
pub struct GraphDump {
    pub direction: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub label: String,
    pub start_time: String,
    pub status: String,
    pub score: Option<i32>,
    pub people_count: usize,
    pub rank: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub id: String,
    pub source: String,
    pub target: String,
    pub time_gap: String,
    pub score_delta: Option<i32>,
    pub action_item_count: usize,
    pub animated: bool,
    pub stroke_weight: String,
    pub color_class: String,
    pub source_status: String,
    pub target_status: String,
}

impl GraphDump {
    pub fn from_graph(
        graph: &MeetingGraph,
        positioned: &[PositionedNode],
        direction: Direction,
        config: &LayoutConfig,
    ) -> Self {
        let nodes = positioned
            .iter()
            .map(|placed| NodeDump {
                id: placed.node.id.clone(),
                label: placed.node.label.clone(),
                start_time: placed.node.start_time.to_rfc3339(),
                status: placed.node.status.as_str().to_string(),
                score: placed.node.score,
                people_count: placed.node.people_count,
                rank: placed.rank,
                x: placed.x,
                y: placed.y,
                width: config.node_width,
                height: config.node_height,
            })
            .collect();

        let edges: Vec<EdgeDump> = graph
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                time_gap: edge.time_gap.to_string(),
                score_delta: edge.score_delta,
                action_item_count: edge.action_item_count,
                animated: edge.animated,
                stroke_weight: edge.stroke_weight.as_str().to_string(),
                color_class: edge.color_class.as_str().to_string(),
                source_status: edge.source_status.as_str().to_string(),
                target_status: edge.target_status.as_str().to_string(),
            })
            .collect();

        GraphDump {
            direction: match direction {
                Direction::TopDown => "TB".to_string(),
                Direction::LeftRight => "LR".to_string(),
            },
            node_count: graph.nodes.len(),
            edge_count: graph.edges.len(),
            nodes,
            edges,
        }
    }
}

/// Writes the dump as pretty-printed JSON to `path`, or to stdout when no
/// path is given.
pub fn write_graph_dump(dump: &GraphDump, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, dump)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, dump)?;
            handle.write_all(b"\n")?;
        }
    }
    Ok(())
}
