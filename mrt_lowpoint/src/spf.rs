// MRT-Lowpoint: Computing Maximally Redundant Trees for IP Fast Reroute
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # SPF variants
//!
//! Three Dijkstra flavours share the same heap discipline: a min-heap keyed by
//! (metric, router number), duplicate entries tolerated by skipping already visited routers,
//! and equal-cost paths merged into the next-hop set.
//!
//! - the block-restricted SPF walks only OUTGOING ("increasing") or only INCOMING
//!   ("decreasing") interfaces inside the source's block and never traverses through the block
//!   root,
//! - the normal SPF computes primary next-hops over the full topology,
//! - the island-marking SPF additionally remembers whether any shortest path crossed the MRT
//!   island, which the proxy subsystem uses to find loop-free island neighbours.

use crate::topology::types::{IntfId, LinkMetric, NodeId, RouterId, MAX_METRIC};
use crate::topology::Topology;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Direction of the block-restricted SPF
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpfDirection {
    /// Follow only OUTGOING interfaces; settled routers become HIGHER with blue next-hops.
    Increasing,
    /// Follow only INCOMING interfaces; settled routers become LOWER with red next-hops.
    Decreasing,
}

type SpfHeap = BinaryHeap<Reverse<(LinkMetric, NodeId, RouterId)>>;

fn push(heap: &mut SpfHeap, topo: &Topology, r: RouterId) {
    heap.push(Reverse((topo.node(r).state.spf_metric, topo.node(r).node_id, r)));
}

fn add_if_new(target: &mut Vec<IntfId>, item: IntfId) {
    if !target.contains(&item) {
        target.push(item);
    }
}

/// Relax one interface out of `min_node`. Returns true if the remote router got a new, strictly
/// better metric (and must be pushed onto the heap again).
fn relax(topo: &mut Topology, min_node: RouterId, spf_root: RouterId, intf_id: IntfId) -> bool {
    let intf = topo.intf(intf_id);
    let remote = intf.remote_node;
    let path_metric = topo.node(min_node).state.spf_metric.saturating_add(intf.metric);
    let remote_metric = topo.node(remote).state.spf_metric;
    if path_metric < remote_metric {
        let next_hops = if min_node == spf_root {
            vec![intf_id]
        } else {
            topo.node(min_node).state.next_hops.clone()
        };
        let state = &mut topo.node_mut(remote).state;
        state.spf_metric = path_metric;
        state.next_hops = next_hops;
        true
    } else if path_metric == remote_metric {
        if min_node == spf_root {
            let state = &mut topo.node_mut(remote).state;
            add_if_new(&mut state.next_hops, intf_id);
        } else {
            let min_next_hops = topo.node(min_node).state.next_hops.clone();
            let state = &mut topo.node_mut(remote).state;
            for nh_intf in min_next_hops {
                add_if_new(&mut state.next_hops, nh_intf);
            }
        }
        false
    } else {
        false
    }
}

/// Block-restricted SPF from `spf_root`, walking only interfaces of the requested direction,
/// staying inside the root's common block, and never relaxing out of `block_root`. Settled
/// routers are flagged HIGHER (increasing) or LOWER (decreasing) and their paths recorded as
/// blue respectively red next-hop candidates.
pub(crate) fn spf_no_traverse_block_root(
    topo: &mut Topology,
    spf_root: RouterId,
    block_root: Option<RouterId>,
    direction: SpfDirection,
) {
    for y in topo.island_node_list.clone() {
        let state = &mut topo.node_mut(y).state;
        state.spf_metric = MAX_METRIC;
        state.next_hops = Vec::new();
        state.spf_visited = false;
    }
    topo.node_mut(spf_root).state.spf_metric = 0;
    let mut spf_heap = SpfHeap::new();
    push(&mut spf_heap, topo, spf_root);
    while let Some(Reverse((_, _, min_node))) = spf_heap.pop() {
        if topo.node(min_node).state.spf_visited {
            continue;
        }
        topo.node_mut(min_node).state.spf_visited = true;
        {
            let state = &mut topo.node_mut(min_node).state;
            match direction {
                SpfDirection::Increasing => {
                    state.higher = true;
                    state.blue_next_hops = state.next_hops.clone();
                }
                SpfDirection::Decreasing => {
                    state.lower = true;
                    state.red_next_hops = state.next_hops.clone();
                }
            }
        }
        if min_node != spf_root && Some(min_node) == block_root {
            continue;
        }
        for intf_id in topo.node(min_node).state.island_intf_list.clone() {
            let eligible = match direction {
                SpfDirection::Increasing => topo.intf(intf_id).state.outgoing,
                SpfDirection::Decreasing => topo.intf(intf_id).state.incoming,
            };
            if !eligible || !topo.in_common_block(spf_root, topo.intf(intf_id).remote_node) {
                continue;
            }
            if relax(topo, min_node, spf_root, intf_id) {
                push(&mut spf_heap, topo, topo.intf(intf_id).remote_node);
            }
        }
    }
}

/// Unrestricted SPF over the full topology, producing primary next-hops and metrics for every
/// router.
pub(crate) fn normal_spf(topo: &mut Topology, spf_root: RouterId) {
    for y in topo.routers() {
        let state = &mut topo.node_mut(y).state;
        state.spf_metric = MAX_METRIC;
        state.next_hops = Vec::new();
        state.primary_spf_metric = MAX_METRIC;
        state.primary_next_hops = Vec::new();
        state.spf_visited = false;
    }
    topo.node_mut(spf_root).state.spf_metric = 0;
    let mut spf_heap = SpfHeap::new();
    push(&mut spf_heap, topo, spf_root);
    while let Some(Reverse((_, _, min_node))) = spf_heap.pop() {
        if topo.node(min_node).state.spf_visited {
            continue;
        }
        {
            let state = &mut topo.node_mut(min_node).state;
            state.spf_visited = true;
            state.primary_spf_metric = state.spf_metric;
            state.primary_next_hops = state.next_hops.clone();
        }
        for intf_id in topo.node(min_node).intf_list.clone() {
            if relax(topo, min_node, spf_root, intf_id) {
                push(&mut spf_heap, topo, topo.intf(intf_id).remote_node);
            }
        }
    }
}

/// SPF over the full topology that additionally tracks, per settled router, whether any
/// shortest path from `spf_root` to it crosses an MRT island router. Returns the
/// (metric, path-hits-island) pair for every reached router number.
pub(crate) fn island_marking_spf(
    topo: &mut Topology,
    spf_root: RouterId,
) -> HashMap<NodeId, (LinkMetric, bool)> {
    for y in topo.routers() {
        let state = &mut topo.node_mut(y).state;
        state.spf_metric = MAX_METRIC;
        state.next_hops = Vec::new();
        state.spf_visited = false;
        state.path_hits_island = false;
    }
    topo.node_mut(spf_root).state.spf_metric = 0;
    let mut marking: HashMap<NodeId, (LinkMetric, bool)> = HashMap::new();
    let mut spf_heap = SpfHeap::new();
    push(&mut spf_heap, topo, spf_root);
    while let Some(Reverse((_, _, min_node))) = spf_heap.pop() {
        if topo.node(min_node).state.spf_visited {
            continue;
        }
        topo.node_mut(min_node).state.spf_visited = true;
        marking.insert(
            topo.node(min_node).node_id,
            (topo.node(min_node).state.spf_metric, topo.node(min_node).state.path_hits_island),
        );
        for intf_id in topo.node(min_node).intf_list.clone() {
            let remote = topo.intf(intf_id).remote_node;
            let improved = relax(topo, min_node, spf_root, intf_id);
            let path_metric =
                topo.node(min_node).state.spf_metric.saturating_add(topo.intf(intf_id).metric);
            if improved {
                let hits = topo.node(remote).state.in_mrt_island
                    || topo.node(min_node).state.path_hits_island;
                topo.node_mut(remote).state.path_hits_island = hits;
                push(&mut spf_heap, topo, remote);
            } else if path_metric == topo.node(remote).state.spf_metric {
                let hits = topo.node(remote).state.in_mrt_island
                    || topo.node(remote).state.path_hits_island
                    || topo.node(min_node).state.path_hits_island;
                topo.node_mut(remote).state.path_hits_island = hits;
            }
        }
    }
    marking
}
