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

//! GADAG construction by ear decomposition, and block identifier assignment.

use crate::topology::types::{IntfId, RouterId};
use crate::topology::Topology;
use log::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EarType {
    /// The ear starts over a DFS tree edge; the walk follows lowpoint parents.
    Child,
    /// The ear starts over a non-tree edge; the walk follows DFS parents.
    Neighbor,
}

/// Grow the GADAG from the root by repeatedly attaching ears: directed paths that start and end
/// at routers already in the GADAG, with all interior routers new. A CHILD ear that closes back
/// at its start router makes that router a cut vertex and the local root of the new block;
/// every other ear inherits the local root of its closing endpoint.
pub(crate) fn construct_gadag_via_lowpoint(topo: &mut Topology) {
    let gadag_root = match topo.gadag_root {
        Some(r) => r,
        None => return,
    };
    topo.node_mut(gadag_root).state.in_gadag = true;
    topo.node_mut(gadag_root).state.localroot = None;
    let mut stack = vec![gadag_root];
    while let Some(x) = stack.pop() {
        for intf_id in topo.node(x).state.island_intf_list.clone() {
            let remote = topo.intf(intf_id).remote_node;
            if !topo.node(remote).state.in_gadag
                && topo.node(remote).state.dfs_parent == Some(x)
            {
                construct_ear(topo, x, &mut stack, intf_id, EarType::Child);
            }
        }
        for intf_id in topo.node(x).state.island_intf_list.clone() {
            let remote = topo.intf(intf_id).remote_node;
            if !topo.node(remote).state.in_gadag
                && topo.node(remote).state.dfs_parent != Some(x)
            {
                construct_ear(topo, x, &mut stack, intf_id, EarType::Neighbor);
            }
        }
    }
}

fn construct_ear(
    topo: &mut Topology,
    x: RouterId,
    stack: &mut Vec<RouterId>,
    intf: IntfId,
    ear_type: EarType,
) {
    let mut ear_list: Vec<RouterId> = Vec::new();
    let mut cur_intf = intf;
    loop {
        let twin = topo.intf(cur_intf).remote_intf;
        {
            let state = &mut topo.intf_mut(cur_intf).state;
            state.undirected = false;
            state.outgoing = true;
        }
        {
            let state = &mut topo.intf_mut(twin).state;
            state.undirected = false;
            state.incoming = true;
        }
        let remote = topo.intf(cur_intf).remote_node;
        if topo.node(remote).state.in_gadag {
            break;
        }
        topo.node_mut(remote).state.in_gadag = true;
        ear_list.push(remote);
        let next_intf = match ear_type {
            EarType::Child => topo.node(remote).state.lowpoint_parent_intf,
            EarType::Neighbor => topo.node(remote).state.dfs_parent_intf,
        };
        match next_intf {
            Some(i) => cur_intf = i,
            None => {
                warn!(
                    "Ear walk stuck at router {} without a parent interface",
                    topo.node_id_of(remote)
                );
                break;
            }
        }
    }

    let localroot = if ear_type == EarType::Child && topo.intf(cur_intf).remote_node == x {
        // x is a cut vertex and the local root for the block in which the ear is computed
        topo.node_mut(x).state.is_cut_vertex = true;
        Some(x)
    } else {
        // inherit the local root from the end of the ear
        let closing = topo.intf(cur_intf).remote_node;
        topo.node(closing).state.localroot
    };

    while let Some(y) = ear_list.pop() {
        topo.node_mut(y).state.localroot = localroot;
        stack.push(y);
    }
}

/// Walk the DFS tree from the root and assign block identifiers: a DFS child whose local root
/// is its parent starts a fresh block, everyone else stays in the parent's block.
pub(crate) fn run_assign_block_id(topo: &mut Topology) {
    if let Some(root) = topo.gadag_root {
        let mut max_block_id = 0;
        assign_block_id(topo, root, 0, &mut max_block_id);
    }
}

fn assign_block_id(topo: &mut Topology, x: RouterId, cur_block_id: u32, max_block_id: &mut u32) {
    topo.node_mut(x).state.block_id = Some(cur_block_id);
    for c in topo.node(x).state.dfs_child_list.clone() {
        if topo.node(c).state.localroot == Some(x) {
            *max_block_id += 1;
            let fresh = *max_block_id;
            assign_block_id(topo, c, fresh, max_block_id);
        } else {
            assign_block_id(topo, c, cur_block_id, max_block_id);
        }
    }
}
