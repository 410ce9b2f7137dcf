mod ranking;

use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::graph::{MeetingGraph, MeetingNode};
use crate::ir::Direction;

/// A meeting node with its layer and its box's top-left render coordinate.
#[derive(Debug, Clone)]
pub struct PositionedNode {
    pub node: MeetingNode,
    pub rank: usize,
    pub x: f32,
    pub y: f32,
}

fn is_horizontal(direction: Direction) -> bool {
    matches!(direction, Direction::LeftRight)
}

/// Layered placement of the meeting graph.
///
/// Every node is re-emitted in input order with rank and coordinates
/// populated; edges are untouched (the renderer draws them between node
/// boxes). Ranks follow edge direction wherever the edge set allows it;
/// cyclic chains are broken deterministically instead of erroring. Identical
/// inputs yield bit-identical coordinates.
pub fn layout_graph(
    graph: &MeetingGraph,
    direction: Direction,
    config: &LayoutConfig,
) -> Vec<PositionedNode> {
    if graph.nodes.is_empty() {
        return Vec::new();
    }

    let node_ids: Vec<String> = graph.nodes.iter().map(|node| node.id.clone()).collect();
    let node_order: HashMap<String, usize> = node_ids
        .iter()
        .enumerate()
        .map(|(idx, id)| (id.clone(), idx))
        .collect();

    let ranks = ranking::compute_ranks(&node_ids, &graph.edges, &node_order);

    let mut max_rank = 0usize;
    for rank in ranks.values() {
        max_rank = max_rank.max(*rank);
    }
    let mut rank_nodes: Vec<Vec<String>> = vec![Vec::new(); max_rank + 1];
    for id in &node_ids {
        let rank = *ranks.get(id).unwrap_or(&0);
        if let Some(bucket) = rank_nodes.get_mut(rank) {
            bucket.push(id.clone());
        }
    }

    ranking::order_rank_nodes(&mut rank_nodes, &graph.edges, &node_order, config.order_passes);

    let positions = assign_positions(&rank_nodes, direction, config);

    graph
        .nodes
        .iter()
        .filter_map(|node| {
            positions
                .get(&node.id)
                .map(|&(rank, x, y)| PositionedNode {
                    node: node.clone(),
                    rank,
                    x,
                    y,
                })
        })
        .collect()
}

/// Walks ranks along the main axis and rank members along the cross axis.
/// Box centers step by box dimension plus the matching separation; the
/// stored coordinate is the center minus half the box.
fn assign_positions(
    rank_nodes: &[Vec<String>],
    direction: Direction,
    config: &LayoutConfig,
) -> HashMap<String, (usize, f32, f32)> {
    let horizontal = is_horizontal(direction);
    let (main_size, cross_size) = if horizontal {
        (config.node_width, config.node_height)
    } else {
        (config.node_height, config.node_width)
    };

    let mut positions = HashMap::new();
    let mut main_cursor = 0.0f32;
    for (rank, bucket) in rank_nodes.iter().enumerate() {
        let mut cross_cursor = 0.0f32;
        for node_id in bucket {
            let center_main = main_cursor + main_size * 0.5;
            let center_cross = cross_cursor + cross_size * 0.5;
            let (center_x, center_y) = if horizontal {
                (center_main, center_cross)
            } else {
                (center_cross, center_main)
            };
            positions.insert(
                node_id.clone(),
                (
                    rank,
                    center_x - config.node_width * 0.5,
                    center_y - config.node_height * 0.5,
                ),
            );
            cross_cursor += cross_size + config.node_spacing;
        }
        main_cursor += main_size + config.rank_spacing;
    }
    positions
}
