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

//! Lowpoint DFS over the MRT island.

use crate::topology::types::{IntfId, RouterId};
use crate::topology::Topology;

/// Run the lowpoint DFS from the GADAG root: assign DFS numbers, record DFS parents and
/// children, and compute per-router lowpoint numbers together with the parent and interface
/// that achieve them.
pub(crate) fn run_lowpoint(topo: &mut Topology) {
    if let Some(root) = topo.gadag_root {
        let mut dfs_counter = 0;
        lowpoint_visit(topo, root, None, None, &mut dfs_counter);
    }
}

fn lowpoint_visit(
    topo: &mut Topology,
    x: RouterId,
    parent: Option<RouterId>,
    intf_p_to_x: Option<IntfId>,
    dfs_counter: &mut u32,
) {
    let dfs_parent_intf = intf_p_to_x.map(|i| topo.intf(i).remote_intf);
    {
        let state = &mut topo.node_mut(x).state;
        state.dfs_number = Some(*dfs_counter);
        state.lowpoint_number = *dfs_counter;
        *dfs_counter += 1;
        state.dfs_parent = parent;
        state.dfs_parent_intf = dfs_parent_intf;
        state.lowpoint_parent = None;
    }
    if let Some(p) = parent {
        topo.node_mut(p).state.dfs_child_list.push(x);
    }
    for intf_id in topo.node(x).state.island_intf_list.clone() {
        let remote = topo.intf(intf_id).remote_node;
        match topo.node(remote).state.dfs_number {
            None => {
                lowpoint_visit(topo, remote, Some(x), Some(intf_id), dfs_counter);
                let remote_lowpoint = topo.node(remote).state.lowpoint_number;
                let state = &mut topo.node_mut(x).state;
                if remote_lowpoint < state.lowpoint_number {
                    state.lowpoint_number = remote_lowpoint;
                    state.lowpoint_parent = Some(remote);
                    state.lowpoint_parent_intf = Some(intf_id);
                }
            }
            Some(remote_dfs) if Some(remote) != parent => {
                // back-edge to a non-parent ancestor
                let state = &mut topo.node_mut(x).state;
                if remote_dfs < state.lowpoint_number {
                    state.lowpoint_number = remote_dfs;
                    state.lowpoint_parent = Some(remote);
                    state.lowpoint_parent_intf = Some(intf_id);
                }
            }
            Some(_) => {}
        }
    }
}

/// Routers without any back-edge keep their lowpoint parent unset by the DFS; they inherit
/// their DFS parent instead, so the ear construction always has an interface to walk along.
pub(crate) fn assign_remaining_lowpoint_parents(topo: &mut Topology) {
    for r in topo.island_node_list.clone() {
        if Some(r) == topo.gadag_root || topo.node(r).state.lowpoint_parent.is_some() {
            continue;
        }
        if let Some(parent) = topo.node(r).state.dfs_parent {
            let parent_dfs = topo.node(parent).state.dfs_number.unwrap_or(0);
            let parent_intf = topo.node(r).state.dfs_parent_intf;
            let state = &mut topo.node_mut(r).state;
            state.lowpoint_parent = Some(parent);
            state.lowpoint_parent_intf = parent_intf;
            state.lowpoint_number = parent_dfs;
        }
    }
}
