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

//! Blue and red next-hop assembly for one source, from the two block-restricted SPF runs.

use crate::spf::{spf_no_traverse_block_root, SpfDirection};
use crate::topology::types::RouterId;
use crate::topology::Topology;
use log::*;

/// Compute the blue and red next-hops of source `x` towards every island destination.
///
/// Destinations inside x's block are classified HIGHER / LOWER / unordered by the two SPF runs
/// and complete their missing colour (or both) from the block root's own next-hops.
/// Destinations in other blocks inherit both colours along the localroot chain, recording the
/// inherited ancestor as their order proxy.
pub(crate) fn compute_mrt_nh_for_one_src_to_island_dests(topo: &mut Topology, x: RouterId) {
    for y in topo.island_node_list.clone() {
        let state = &mut topo.node_mut(y).state;
        state.higher = false;
        state.lower = false;
        state.red_next_hops = Vec::new();
        state.blue_next_hops = Vec::new();
        state.order_proxy = Some(y);
    }
    let localroot = topo.node(x).state.localroot;
    spf_no_traverse_block_root(topo, x, localroot, SpfDirection::Increasing);
    spf_no_traverse_block_root(topo, x, localroot, SpfDirection::Decreasing);

    let x_block = topo.node(x).state.block_id;
    for y in topo.island_node_list.clone() {
        if y == x || topo.node(y).state.block_id != x_block {
            continue;
        }
        debug_assert!(
            topo.node(y).state.localroot != Some(x) && topo.node(x).state.localroot != Some(y)
        );
        debug_assert!(!(topo.node(y).state.higher && topo.node(y).state.lower));
        let l = match localroot {
            Some(l) => l,
            None => {
                // the root's own block contains no other routers
                warn!("Router in the GADAG root's block while assembling next-hops");
                continue;
            }
        };
        let l_blue = topo.node(l).state.blue_next_hops.clone();
        let l_red = topo.node(l).state.red_next_hops.clone();
        let state = &mut topo.node_mut(y).state;
        if state.higher {
            state.red_next_hops = l_red;
        } else if state.lower {
            state.blue_next_hops = l_blue;
        } else {
            state.blue_next_hops = l_red;
            state.red_next_hops = l_blue;
        }
    }

    // Inherit x's MRT next-hops to reach the GADAG root from x's next-hops to reach its local
    // root, unless x is the root itself or directly below it (in which case the SPF already
    // settled the root).
    if let (Some(root), Some(l)) = (topo.gadag_root, localroot) {
        if x != root && Some(root) != localroot {
            let l_blue = topo.node(l).state.blue_next_hops.clone();
            let l_red = topo.node(l).state.red_next_hops.clone();
            let root_state = &mut topo.node_mut(root).state;
            root_state.blue_next_hops = l_blue;
            root_state.red_next_hops = l_red;
            root_state.order_proxy = Some(l);
        }
    }

    // Resolve next-hops and order proxies for all remaining blocks
    for y in topo.island_node_list.clone() {
        if Some(y) != topo.gadag_root && y != x {
            set_edge(topo, y);
        }
    }
}

/// Follow the localroot chain upward until a router with next-hops is found, then adopt its
/// blue and red sets and its order proxy.
fn set_edge(topo: &mut Topology, y: RouterId) {
    if !topo.node(y).state.blue_next_hops.is_empty()
        || !topo.node(y).state.red_next_hops.is_empty()
    {
        return;
    }
    let localroot = match topo.node(y).state.localroot {
        Some(l) => l,
        None => {
            warn!("Router {} has no localroot to inherit next-hops from", topo.node_id_of(y));
            return;
        }
    };
    set_edge(topo, localroot);
    let blue = topo.node(localroot).state.blue_next_hops.clone();
    let red = topo.node(localroot).state.red_next_hops.clone();
    let order_proxy = topo.node(localroot).state.order_proxy;
    let state = &mut topo.node_mut(y).state;
    state.blue_next_hops = blue;
    state.red_next_hops = red;
    state.order_proxy = order_proxy;
}

/// Store the per-run blue and red next-hops of all island destinations into x's accumulated
/// result tables.
pub(crate) fn store_mrt_nexthops_for_one_src_to_island_dests(topo: &mut Topology, x: RouterId) {
    for y in topo.island_node_list.clone() {
        if y == x {
            continue;
        }
        let dest = topo.node(y).node_id;
        let blue = topo.node(y).state.blue_next_hops.clone();
        let red = topo.node(y).state.red_next_hops.clone();
        let results = &mut topo.node_mut(x).results;
        results.blue_next_hops_dict.insert(dest, blue);
        results.red_next_hops_dict.insert(dest, red);
    }
}

/// Store the per-run primary next-hops and alternates of all island destinations into x's
/// accumulated result tables.
pub(crate) fn store_primary_and_alts_for_one_src_to_island_dests(
    topo: &mut Topology,
    x: RouterId,
) {
    for y in topo.island_node_list.clone() {
        let dest = topo.node(y).node_id;
        let pnh = topo.node(y).state.primary_next_hops.clone();
        let alts = topo.node(y).state.alt_list.clone();
        let results = &mut topo.node_mut(x).results;
        results.pnh_dict.insert(dest, pnh);
        results.alt_dict.insert(dest, alts);
    }
}

/// Store the per-run primary next-hops of every router (island or not) into x's accumulated
/// result tables. Used for sources that only run the plain SPF.
pub(crate) fn store_primary_nhs_for_one_source_to_nodes(topo: &mut Topology, x: RouterId) {
    for y in topo.routers() {
        let dest = topo.node(y).node_id;
        let pnh = topo.node(y).state.primary_next_hops.clone();
        topo.node_mut(x).results.pnh_dict.insert(dest, pnh);
    }
}
