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

//! MRT island identification and GADAG root election.

use crate::topology::types::{AreaId, IntfId, ProfileId, RouterId};
use crate::topology::Topology;
use log::*;
use petgraph::visit::EdgeRef;

/// Flood-fill the MRT island of the computing router: the subgraph reachable over interfaces
/// that are MRT-eligible on both twins, not IGP-excluded, in the requested area, and whose
/// remote router participates in the requested profile. Marks routers and both interface twins
/// with the island flag. If the computing router itself does not participate in the profile, its
/// island stays empty.
pub(crate) fn mrt_island_identification(
    topo: &mut Topology,
    computing_rtr: RouterId,
    profile_id: ProfileId,
    area: AreaId,
) {
    if !topo.node(computing_rtr).profile_id_list.contains(&profile_id) {
        return;
    }
    topo.node_mut(computing_rtr).state.in_mrt_island = true;
    let mut explore_list = vec![computing_rtr];
    while let Some(next_rtr) = explore_list.pop() {
        let intf_ids: Vec<IntfId> = topo.graph.edges(next_rtr).map(|e| *e.weight()).collect();
        for intf_id in intf_ids {
            let intf = topo.intf(intf_id);
            let twin_id = intf.remote_intf;
            let remote = intf.remote_node;
            if intf.mrt_ineligible
                || topo.intf(twin_id).mrt_ineligible
                || intf.igp_excluded
                || intf.area != area
            {
                continue;
            }
            if topo.node(remote).profile_id_list.contains(&profile_id) {
                topo.intf_mut(intf_id).state.in_mrt_island = true;
                topo.intf_mut(twin_id).state.in_mrt_island = true;
                if !topo.node(remote).state.in_mrt_island {
                    topo.node_mut(remote).state.in_mrt_island = true;
                    explore_list.push(remote);
                }
            }
        }
    }
}

/// Collect the island node list (ordered by router number) and, per island router, the list of
/// island interfaces.
pub(crate) fn set_island_intf_and_node_lists(topo: &mut Topology) {
    topo.island_node_list =
        topo.routers().into_iter().filter(|r| topo.node(*r).state.in_mrt_island).collect();
    for r in topo.island_node_list.clone() {
        let island_intfs: Vec<IntfId> = topo
            .node(r)
            .intf_list
            .iter()
            .copied()
            .filter(|i| topo.intf(*i).state.in_mrt_island)
            .collect();
        topo.node_mut(r).state.island_intf_list = island_intfs;
    }
}

/// Stably order every island router's interface list by (metric, remote router number). All
/// later stages depend on this order for reproducibility.
pub(crate) fn sort_interfaces(topo: &mut Topology) {
    for r in topo.island_node_list.clone() {
        let mut intfs = topo.node(r).state.island_intf_list.clone();
        intfs.sort_by_key(|i| {
            let intf = topo.intf(*i);
            (intf.metric, topo.node(intf.remote_node).node_id)
        });
        topo.node_mut(r).state.island_intf_list = intfs;
    }
}

/// Elect the GADAG root of the current island: the router with the lexicographically highest
/// (selection priority, router number).
pub(crate) fn set_gadag_root(topo: &mut Topology) {
    topo.gadag_root = topo
        .island_node_list
        .iter()
        .copied()
        .max_by_key(|r| (topo.node(*r).gr_sel_priority, topo.node(*r).node_id));
    match topo.gadag_root {
        Some(root) => debug!("GADAG root is {}", topo.node_id_of(root)),
        None => warn!("Empty MRT island, no GADAG root elected"),
    }
}
