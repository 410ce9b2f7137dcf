use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::graph::ConnectionEdge;

/// Longest-path layering over a deterministic topological order.
///
/// Nodes are swept Kahn-style with ties resolved by input position, so
/// identical inputs always produce identical ranks. When a cycle blocks the
/// sweep, the earliest unplaced node restarts it and its remaining incoming
/// edges become back-edges: ignored for layering, kept for rendering.
pub(super) fn compute_ranks(
    node_ids: &[String],
    edges: &[ConnectionEdge],
    node_order: &HashMap<String, usize>,
) -> HashMap<String, usize> {
    let known: HashSet<&str> = node_ids.iter().map(String::as_str).collect();

    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut indegree: HashMap<&str, usize> = HashMap::new();
    for id in node_ids {
        indegree.insert(id.as_str(), 0);
    }
    for edge in edges {
        // A self-loop can never satisfy rank(target) > rank(source).
        if edge.source == edge.target {
            continue;
        }
        if !known.contains(edge.source.as_str()) || !known.contains(edge.target.as_str()) {
            continue;
        }
        successors
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
        *indegree.entry(edge.target.as_str()).or_default() += 1;
    }

    let order_key = |id: &str| node_order.get(id).copied().unwrap_or(usize::MAX);

    let mut ready: BinaryHeap<Reverse<(usize, &str)>> = BinaryHeap::new();
    for id in node_ids {
        if *indegree.get(id.as_str()).unwrap_or(&0) == 0 {
            ready.push(Reverse((order_key(id), id.as_str())));
        }
    }

    let mut topo: Vec<&str> = Vec::with_capacity(node_ids.len());
    let mut placed: HashSet<&str> = HashSet::new();
    loop {
        while let Some(Reverse((_key, id))) = ready.pop() {
            if placed.contains(id) {
                continue;
            }
            placed.insert(id);
            topo.push(id);
            if let Some(nexts) = successors.get(id) {
                for &next in nexts {
                    if placed.contains(next) {
                        continue;
                    }
                    if let Some(degree) = indegree.get_mut(next) {
                        *degree = degree.saturating_sub(1);
                        if *degree == 0 {
                            ready.push(Reverse((order_key(next), next)));
                        }
                    }
                }
            }
        }

        if placed.len() >= node_ids.len() {
            break;
        }

        let next = node_ids
            .iter()
            .map(String::as_str)
            .filter(|id| !placed.contains(id))
            .min_by_key(|id| order_key(id));
        let Some(next) = next else {
            break;
        };
        log::debug!("cyclic successor chain, restarting layering at `{next}`");
        ready.push(Reverse((order_key(next), next)));
    }

    let topo_index: HashMap<&str, usize> = topo
        .iter()
        .enumerate()
        .map(|(idx, id)| (*id, idx))
        .collect();

    let mut ranks: HashMap<String, usize> = HashMap::new();
    for &id in &topo {
        let rank = *ranks.get(id).unwrap_or(&0);
        ranks.entry(id.to_string()).or_insert(rank);
        let Some(nexts) = successors.get(id) else {
            continue;
        };
        let from_idx = *topo_index.get(id).unwrap_or(&0);
        for &next in nexts {
            let to_idx = *topo_index.get(next).unwrap_or(&from_idx);
            if to_idx <= from_idx {
                // Back-edge relative to the chosen order.
                continue;
            }
            let entry = ranks.entry(next.to_string()).or_insert(0);
            *entry = (*entry).max(rank + 1);
        }
    }

    ranks
}

/// Median-based crossing reduction: alternating down (by predecessors) and
/// up (by successors) sweeps, `passes` times.
pub(super) fn order_rank_nodes(
    rank_nodes: &mut [Vec<String>],
    edges: &[ConnectionEdge],
    node_order: &HashMap<String, usize>,
    passes: usize,
) {
    if rank_nodes.len() <= 1 {
        return;
    }

    let mut incoming: HashMap<String, Vec<String>> = HashMap::new();
    let mut outgoing: HashMap<String, Vec<String>> = HashMap::new();
    for edge in edges {
        if edge.source == edge.target {
            continue;
        }
        outgoing
            .entry(edge.source.clone())
            .or_default()
            .push(edge.target.clone());
        incoming
            .entry(edge.target.clone())
            .or_default()
            .push(edge.source.clone());
    }

    let mut positions: HashMap<String, usize> = HashMap::new();
    let update_positions =
        |rank_nodes: &mut [Vec<String>], positions: &mut HashMap<String, usize>| {
            positions.clear();
            for bucket in rank_nodes.iter() {
                for (idx, node_id) in bucket.iter().enumerate() {
                    positions.insert(node_id.clone(), idx);
                }
            }
        };

    update_positions(rank_nodes, &mut positions);

    let sort_bucket = |bucket: &mut Vec<String>,
                       neighbors: &HashMap<String, Vec<String>>,
                       positions: &HashMap<String, usize>| {
        let current_positions: HashMap<String, usize> = bucket
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();
        bucket.sort_by(|a, b| {
            let a_score = median_position(a, neighbors, positions, &current_positions);
            let b_score = median_position(b, neighbors, positions, &current_positions);
            match a_score.partial_cmp(&b_score) {
                Some(std::cmp::Ordering::Equal) | None => {
                    let a_pos = current_positions.get(a).copied().unwrap_or(0);
                    let b_pos = current_positions.get(b).copied().unwrap_or(0);
                    match a_pos.cmp(&b_pos) {
                        std::cmp::Ordering::Equal => node_order
                            .get(a)
                            .copied()
                            .unwrap_or(usize::MAX)
                            .cmp(&node_order.get(b).copied().unwrap_or(usize::MAX)),
                        other => other,
                    }
                }
                Some(ordering) => ordering,
            }
        });
    };

    let passes = passes.max(1);
    for _ in 0..passes {
        for rank in 1..rank_nodes.len() {
            if rank_nodes[rank].len() <= 1 {
                continue;
            }
            sort_bucket(&mut rank_nodes[rank], &incoming, &positions);
            update_positions(rank_nodes, &mut positions);
        }
        for rank in (0..rank_nodes.len().saturating_sub(1)).rev() {
            if rank_nodes[rank].len() <= 1 {
                continue;
            }
            sort_bucket(&mut rank_nodes[rank], &outgoing, &positions);
            update_positions(rank_nodes, &mut positions);
        }
    }
}

fn median_position(
    node_id: &str,
    neighbors: &HashMap<String, Vec<String>>,
    positions: &HashMap<String, usize>,
    current_positions: &HashMap<String, usize>,
) -> f32 {
    let Some(list) = neighbors.get(node_id) else {
        return *current_positions.get(node_id).unwrap_or(&0) as f32;
    };
    let mut values = Vec::new();
    for neighbor in list {
        if let Some(pos) = positions.get(neighbor) {
            values.push(*pos as f32);
        }
    }
    if values.is_empty() {
        return *current_positions.get(node_id).unwrap_or(&0) as f32;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) * 0.5
    }
}
