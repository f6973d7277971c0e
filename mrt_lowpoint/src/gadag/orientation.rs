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

//! Orientation completion: direct every interface the ear decomposition left undirected.

use crate::topology::types::{IntfId, RouterId};
use crate::topology::Topology;
use std::collections::VecDeque;

/// Aggregate directional state of a set of parallel interfaces to the same neighbour.
#[derive(Debug)]
struct Bundle {
    undirected: bool,
    outgoing: bool,
    incoming: bool,
}

/// Direct all remaining undirected interfaces: first the bundles hanging off block roots, then
/// everything else based on a topological order of the directed skeleton.
pub(crate) fn add_undirected_links(topo: &mut Topology) {
    initialize_temporary_interface_flags(topo);
    add_undirected_block_root_links(topo);
    run_topological_sort_gadag(topo);
    set_other_undirected_links_based_on_topo_order(topo);
}

fn initialize_temporary_interface_flags(topo: &mut Topology) {
    for r in topo.island_node_list.clone() {
        for intf_id in topo.node(r).state.island_intf_list.clone() {
            let state = &mut topo.intf_mut(intf_id).state;
            state.processed = false;
            state.incoming_stored = false;
            state.outgoing_stored = false;
        }
    }
}

/// For each block root (cut vertex or the GADAG root), orient the undirected interface bundles
/// towards its block children: a fully undirected bundle becomes outgoing, a partly directed
/// bundle mirrors the existing direction, and a mixed bundle becomes a cut-link carrying both
/// directions.
fn add_undirected_block_root_links(topo: &mut Topology) {
    for r in topo.island_node_list.clone() {
        if !topo.node(r).state.is_cut_vertex && Some(r) != topo.gadag_root {
            continue;
        }
        for intf_id in topo.node(r).state.island_intf_list.clone() {
            let remote = topo.intf(intf_id).remote_node;
            if topo.node(remote).state.localroot != Some(r)
                || topo.intf(intf_id).state.processed
            {
                continue;
            }
            let mut bundle_list: Vec<IntfId> = Vec::new();
            let mut bundle = Bundle { undirected: true, outgoing: false, incoming: false };
            for intf2_id in topo.node(r).state.island_intf_list.clone() {
                if topo.intf(intf2_id).remote_node != remote {
                    continue;
                }
                bundle_list.push(intf2_id);
                let state = &topo.intf(intf2_id).state;
                if !state.undirected {
                    bundle.undirected = false;
                    if state.incoming {
                        bundle.incoming = true;
                    }
                    if state.outgoing {
                        bundle.outgoing = true;
                    }
                }
            }
            if bundle.undirected {
                for intf3_id in bundle_list {
                    orient_bundle_member(topo, intf3_id, true, false);
                }
            } else if bundle.outgoing && bundle.incoming {
                for intf3_id in bundle_list {
                    orient_bundle_member(topo, intf3_id, true, true);
                }
            } else if bundle.outgoing {
                for intf3_id in bundle_list {
                    orient_bundle_member(topo, intf3_id, true, false);
                }
            } else if bundle.incoming {
                for intf3_id in bundle_list {
                    orient_bundle_member(topo, intf3_id, false, true);
                }
            }
        }
    }
}

fn orient_bundle_member(topo: &mut Topology, intf_id: IntfId, outgoing: bool, incoming: bool) {
    let twin_id = topo.intf(intf_id).remote_intf;
    {
        let state = &mut topo.intf_mut(intf_id).state;
        state.undirected = false;
        state.processed = true;
        if outgoing {
            state.outgoing = true;
        }
        if incoming {
            state.incoming = true;
        }
    }
    let state = &mut topo.intf_mut(twin_id).state;
    state.undirected = false;
    state.processed = true;
    if outgoing {
        state.incoming = true;
    }
    if incoming {
        state.outgoing = true;
    }
}

/// Temporarily clear INCOMING on all edges arriving at a block root from inside its own block,
/// remembering them in the STORED flags, so that the root is the only source of the directed
/// skeleton.
fn modify_block_root_incoming_links(topo: &mut Topology) {
    for r in topo.island_node_list.clone() {
        if !topo.node(r).state.is_cut_vertex && Some(r) != topo.gadag_root {
            continue;
        }
        for intf_id in topo.node(r).state.island_intf_list.clone() {
            let remote = topo.intf(intf_id).remote_node;
            if topo.node(remote).state.localroot != Some(r) {
                continue;
            }
            if topo.intf(intf_id).state.incoming {
                let twin_id = topo.intf(intf_id).remote_intf;
                let state = &mut topo.intf_mut(intf_id).state;
                state.incoming = false;
                state.incoming_stored = true;
                let twin_state = &mut topo.intf_mut(twin_id).state;
                twin_state.outgoing = false;
                twin_state.outgoing_stored = true;
            }
        }
    }
}

fn revert_block_root_incoming_links(topo: &mut Topology) {
    for r in topo.island_node_list.clone() {
        if !topo.node(r).state.is_cut_vertex && Some(r) != topo.gadag_root {
            continue;
        }
        for intf_id in topo.node(r).state.island_intf_list.clone() {
            let remote = topo.intf(intf_id).remote_node;
            if topo.node(remote).state.localroot != Some(r) {
                continue;
            }
            if topo.intf(intf_id).state.incoming_stored {
                let twin_id = topo.intf(intf_id).remote_intf;
                let state = &mut topo.intf_mut(intf_id).state;
                state.incoming = true;
                state.incoming_stored = false;
                let twin_state = &mut topo.intf_mut(twin_id).state;
                twin_state.outgoing = true;
                twin_state.outgoing_stored = false;
            }
        }
    }
}

/// Kahn-style topological sort of the directed skeleton, starting at the GADAG root. Assigns
/// every island router a topo_order starting at 1.
fn run_topological_sort_gadag(topo: &mut Topology) {
    modify_block_root_incoming_links(topo);
    for r in topo.island_node_list.clone() {
        let mut unvisited = 0;
        for intf_id in topo.node(r).state.island_intf_list.clone() {
            if topo.intf(intf_id).state.incoming {
                unvisited += 1;
            }
        }
        topo.node_mut(r).state.unvisited = unvisited;
    }
    let mut working_list: VecDeque<RouterId> = VecDeque::new();
    let mut topo_order_list: Vec<RouterId> = Vec::new();
    if let Some(root) = topo.gadag_root {
        working_list.push_back(root);
    }
    while let Some(y) = working_list.pop_front() {
        topo_order_list.push(y);
        for intf_id in topo.node(y).state.island_intf_list.clone() {
            if topo.intf(intf_id).state.outgoing {
                let remote = topo.intf(intf_id).remote_node;
                let state = &mut topo.node_mut(remote).state;
                state.unvisited -= 1;
                if state.unvisited == 0 {
                    working_list.push_back(remote);
                }
            }
        }
    }
    for (i, y) in topo_order_list.into_iter().enumerate() {
        topo.node_mut(y).state.topo_order = i as u32 + 1;
    }
    revert_block_root_incoming_links(topo);
}

/// Orient every interface that is still undirected from the lower topo_order towards the
/// higher.
fn set_other_undirected_links_based_on_topo_order(topo: &mut Topology) {
    for r in topo.island_node_list.clone() {
        for intf_id in topo.node(r).state.island_intf_list.clone() {
            if !topo.intf(intf_id).state.undirected {
                continue;
            }
            let remote = topo.intf(intf_id).remote_node;
            let twin_id = topo.intf(intf_id).remote_intf;
            let local_order = topo.node(r).state.topo_order;
            let remote_order = topo.node(remote).state.topo_order;
            if local_order < remote_order {
                let state = &mut topo.intf_mut(intf_id).state;
                state.outgoing = true;
                state.undirected = false;
                let twin_state = &mut topo.intf_mut(twin_id).state;
                twin_state.incoming = true;
                twin_state.undirected = false;
            } else {
                let state = &mut topo.intf_mut(intf_id).state;
                state.incoming = true;
                state.undirected = false;
                let twin_state = &mut topo.intf_mut(twin_id).state;
                twin_state.outgoing = true;
                twin_state.undirected = false;
            }
        }
    }
}
