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

//! Test the GADAG construction: lowpoint DFS, ears, blocks and orientation.

use super::common::example_topology;
use crate::compute::run_basic_mrt_for_one_source;
use crate::topology::{IntfId, Topology};
use rand::prelude::*;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0)
}

/// # Triangle
///
/// ```text
/// 1 ---- 2
///  \    /
///   \  /
///    3
/// ```
///
/// All metrics 10, root 1 (raised priority). The GADAG must be the single cycle
/// 1 -> 2 -> 3 -> 1.
fn triangle() -> Topology {
    let mut topo = Topology::new();
    topo.add_link(1, 2, 10, None).unwrap();
    topo.add_link(2, 3, 10, None).unwrap();
    topo.add_link(3, 1, 10, None).unwrap();
    topo.raise_gadag_root_selection_priority(1).unwrap();
    topo.set_test_gadag_root(1).unwrap();
    topo
}

#[test]
fn test_triangle_gadag() {
    let mut topo = triangle();
    let r1 = topo.router(1).unwrap();
    let r2 = topo.router(2).unwrap();
    let r3 = topo.router(3).unwrap();
    topo.reset_computed_state();
    run_basic_mrt_for_one_source(&mut topo, r1, &mut rng());

    assert_eq!(topo.gadag_root, Some(r1));
    assert_eq!(topo.node(r1).state.dfs_number, Some(0));
    assert_eq!(topo.node(r2).state.dfs_number, Some(1));
    assert_eq!(topo.node(r3).state.dfs_number, Some(2));
    // 3 has a back-edge to the root, and 2 inherits its lowpoint
    assert_eq!(topo.node(r3).state.lowpoint_number, 0);
    assert_eq!(topo.node(r2).state.lowpoint_number, 0);

    // the ear closed back at the root, which becomes the cut vertex of the single block
    assert!(topo.node(r1).state.is_cut_vertex);
    assert_eq!(topo.node(r2).state.localroot, Some(r1));
    assert_eq!(topo.node(r3).state.localroot, Some(r1));
    assert_eq!(topo.node(r1).state.block_id, Some(0));
    assert_eq!(topo.node(r2).state.block_id, Some(1));
    assert_eq!(topo.node(r3).state.block_id, Some(1));

    // the cycle 1 -> 2 -> 3 -> 1: interfaces 0 (1->2), 2 (2->3) and 4 (3->1) are outgoing,
    // their twins incoming, and nothing is a cut-link
    for (intf, outgoing) in
        [(0, true), (1, false), (2, true), (3, false), (4, true), (5, false)].iter().copied()
    {
        let intf = IntfId(intf);
        assert!(!topo.intf(intf).state.undirected);
        assert_eq!(topo.intf(intf).state.outgoing, outgoing);
        assert_eq!(topo.intf(intf).state.incoming, !outgoing);
        assert!(!topo.intf(intf).is_cut_link());
    }

    // topological order follows the cycle
    assert_eq!(topo.node(r1).state.topo_order, 1);
    assert_eq!(topo.node(r2).state.topo_order, 2);
    assert_eq!(topo.node(r3).state.topo_order, 3);
    assert!(topo.node(r1).state.in_gadag);
    assert!(topo.node(r2).state.in_gadag);
    assert!(topo.node(r3).state.in_gadag);
}

#[test]
fn test_two_node_cut_link() {
    // a single link between two routers is a cut-link: both directions on both twins
    let mut topo = Topology::new();
    topo.add_link(1, 2, 10, None).unwrap();
    topo.set_test_gadag_root(1).unwrap();
    let r1 = topo.router(1).unwrap();
    let r2 = topo.router(2).unwrap();
    topo.reset_computed_state();
    run_basic_mrt_for_one_source(&mut topo, r1, &mut rng());

    // without raised priorities, the highest router number wins the root election
    assert_eq!(topo.gadag_root, Some(r2));
    assert!(topo.node(r2).state.is_cut_vertex);
    assert_eq!(topo.node(r1).state.localroot, Some(r2));
    for i in 0..topo.num_intfs() {
        assert!(topo.intf(IntfId(i)).is_cut_link());
        assert!(!topo.intf(IntfId(i)).state.undirected);
    }
}

#[test]
fn test_parallel_cut_links_form_bundle() {
    // two parallel links between the same routers: the bundle orientation turns both into
    // cut-links
    let mut topo = Topology::new();
    topo.add_link(1, 2, 10, None).unwrap();
    topo.add_link(1, 2, 15, None).unwrap();
    topo.set_test_gadag_root(1).unwrap();
    let r1 = topo.router(1).unwrap();
    topo.reset_computed_state();
    run_basic_mrt_for_one_source(&mut topo, r1, &mut rng());

    for i in 0..topo.num_intfs() {
        assert!(topo.intf(IntfId(i)).is_cut_link(), "interface {} is not a cut-link", i);
        assert!(!topo.intf(IntfId(i)).state.undirected);
    }
}

#[test]
fn test_example_topology_topo_order_unique() {
    // every island router gets a unique topological order in 1..=|island|
    let mut topo = example_topology();
    let r3 = topo.router(3).unwrap();
    topo.reset_computed_state();
    run_basic_mrt_for_one_source(&mut topo, r3, &mut rng());

    let island = topo.island_node_list.clone();
    assert_eq!(island.len(), 21);
    let mut orders: Vec<u32> =
        island.iter().map(|r| topo.node(*r).state.topo_order).collect();
    orders.sort_unstable();
    let expected: Vec<u32> = (1..=island.len() as u32).collect();
    assert_eq!(orders, expected);
}

#[test]
fn test_example_topology_direction_invariants() {
    // every island interface ends up directed, and the twin states mirror each other
    let mut topo = example_topology();
    let r1 = topo.router(1).unwrap();
    topo.reset_computed_state();
    run_basic_mrt_for_one_source(&mut topo, r1, &mut rng());

    for r in topo.island_node_list.clone() {
        for intf_id in topo.node(r).state.island_intf_list.clone() {
            let intf = topo.intf(intf_id);
            let twin = topo.intf(intf.remote_intf);
            assert!(!intf.state.undirected);
            assert_eq!(intf.state.outgoing, twin.state.incoming);
            assert_eq!(intf.state.incoming, twin.state.outgoing);
        }
    }
}
