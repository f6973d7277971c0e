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

//! Test the topology model and the file readers, without running the MRT computation.

use crate::gadag::island::{
    mrt_island_identification, set_island_intf_and_node_lists, sort_interfaces,
};
use crate::io::reader::{parse_prefixes, parse_profiles, parse_topology};
use crate::topology::{IntfId, Topology, TopologyError};

#[test]
fn test_twin_invariants() {
    let mut topo = Topology::new();
    topo.add_link(1, 2, 10, None).unwrap();
    topo.add_link(2, 3, 30, None).unwrap();
    topo.add_link(1, 2, 15, None).unwrap();

    assert_eq!(topo.num_nodes(), 3);
    assert_eq!(topo.num_intfs(), 6);

    // twin(twin(i)) == i, and the endpoints mirror each other
    for i in 0..topo.num_intfs() {
        let intf_id = IntfId(i);
        let twin_id = topo.intf(intf_id).remote_intf;
        assert_eq!(topo.intf(twin_id).remote_intf, intf_id);
        assert_eq!(topo.intf(intf_id).local_node(), topo.intf(twin_id).remote_node());
        assert_eq!(topo.intf(intf_id).remote_node(), topo.intf(twin_id).local_node());
        assert_eq!(topo.intf(intf_id).area, topo.intf(twin_id).area);
    }

    // link_data counts the interfaces of the local router in insertion order
    let r1 = topo.router(1).unwrap();
    let intfs_of_1 = &topo.node(r1).intf_list;
    assert_eq!(intfs_of_1.len(), 2);
    assert_eq!(topo.intf(intfs_of_1[0]).link_data(), 0);
    assert_eq!(topo.intf(intfs_of_1[1]).link_data(), 1);
}

#[test]
fn test_node_id_range() {
    let mut topo = Topology::new();
    assert_eq!(topo.add_link(1, 1000, 10, None), Err(TopologyError::NodeIdOutOfRange(1000)));
    assert_eq!(topo.router(999).ok(), None);
    topo.add_link(0, 999, 10, None).unwrap();
    assert!(topo.router(999).is_ok());
}

#[test]
fn test_parse_topology() {
    let topo = parse_topology("01,05,10\r\n05,02,30\n02,01,15\n").unwrap();
    assert_eq!(topo.num_nodes(), 3);
    assert_eq!(topo.num_intfs(), 6);
    let r1 = topo.router(1).unwrap();
    let r5 = topo.router(5).unwrap();
    // symmetric metrics on both twins
    let intf = topo.node(r1).intf_list[0];
    assert_eq!(topo.intf(intf).metric(), 10);
    assert_eq!(topo.intf(intf).remote_node(), r5);
    assert_eq!(topo.intf(topo.intf(intf).remote_intf).metric(), 10);
}

#[test]
fn test_parse_topology_asymmetric() {
    let topo = parse_topology("04,05,10,20\n").unwrap();
    let r4 = topo.router(4).unwrap();
    let intf = topo.node(r4).intf_list[0];
    assert_eq!(topo.intf(intf).metric(), 10);
    assert_eq!(topo.intf(topo.intf(intf).remote_intf).metric(), 20);
}

#[test]
fn test_parse_topology_rejects_large_node_id() {
    assert!(parse_topology("01,1000,10\n").is_err());
    assert!(parse_topology("junk\n").is_err());
}

#[test]
fn test_profiles() {
    let mut topo = parse_topology("1,2,10\n2,3,10\n").unwrap();
    // without a profile file, every router participates in profile 0
    let r1 = topo.router(1).unwrap();
    assert_eq!(topo.node(r1).profile_id_list, vec![0]);

    // the profile file replaces the default membership entirely
    parse_profiles(&mut topo, "1,0\n1,7\n2,0\n").unwrap();
    let r1 = topo.router(1).unwrap();
    let r3 = topo.router(3).unwrap();
    assert_eq!(topo.node(r1).profile_id_list, vec![0, 7]);
    assert!(topo.node(r3).profile_id_list.is_empty());
}

#[test]
fn test_prefixes() {
    let mut topo = parse_topology("1,2,10\n").unwrap();
    // out-of-range prefixes are skipped, valid ones recorded
    parse_prefixes(&mut topo, "1500,1,100\n2001,1,100\n3000,2,50\n").unwrap();
    let r1 = topo.router(1).unwrap();
    let r2 = topo.router(2).unwrap();
    assert_eq!(topo.node(r1).prefix_cost_dict.get(&2001), Some(&100));
    assert_eq!(topo.node(r1).prefix_cost_dict.get(&1500), None);
    assert!(topo.node(r2).prefix_cost_dict.is_empty());
    // advertising from an unknown router is an error
    assert!(parse_prefixes(&mut topo, "2002,9,10\n").is_err());
}

#[test]
fn test_island_identification_and_intf_order() {
    let mut topo = Topology::new();
    topo.add_link(1, 2, 10, None).unwrap();
    topo.add_link(1, 3, 5, None).unwrap();
    topo.add_link(2, 3, 10, None).unwrap();
    topo.add_link(3, 4, 10, None).unwrap();
    // router 4 leaves the MRT profile
    topo.clear_profile_ids();
    for n in [1, 2, 3].iter().copied() {
        topo.add_profile_id(n, 0).unwrap();
    }

    let r1 = topo.router(1).unwrap();
    mrt_island_identification(&mut topo, r1, 0, 0);
    set_island_intf_and_node_lists(&mut topo);
    sort_interfaces(&mut topo);

    let island: Vec<u32> =
        topo.island_node_list.iter().map(|r| topo.node_id_of(*r)).collect();
    assert_eq!(island, vec![1, 2, 3]);

    // the link 3-4 is not part of the island
    let r3 = topo.router(3).unwrap();
    assert_eq!(topo.node(r3).state.island_intf_list.len(), 2);
    let r4 = topo.router(4).unwrap();
    assert!(!topo.node(r4).state.in_mrt_island);

    // island interfaces are ordered by (metric, remote node_id)
    let order: Vec<(u32, u32)> = topo
        .node(r3)
        .state
        .island_intf_list
        .iter()
        .map(|i| (topo.intf(*i).metric(), topo.node_id_of(topo.intf(*i).remote_node())))
        .collect();
    assert_eq!(order, vec![(5, 1), (10, 2)]);
}

#[test]
fn test_island_skips_ineligible_interfaces() {
    let mut topo = Topology::new();
    topo.add_link(1, 2, 10, None).unwrap();
    topo.add_link(2, 3, 10, None).unwrap();
    // marking one twin is enough to keep the link out of the island
    let r2 = topo.router(2).unwrap();
    let intf_2_3 = topo.node(r2).intf_list[1];
    topo.intf_mut(intf_2_3).mrt_ineligible = true;

    let r1 = topo.router(1).unwrap();
    mrt_island_identification(&mut topo, r1, 0, 0);
    let r3 = topo.router(3).unwrap();
    assert!(topo.node(r2).state.in_mrt_island);
    assert!(!topo.node(r3).state.in_mrt_island);
    assert!(!topo.intf(intf_2_3).state.in_mrt_island);
}

#[test]
fn test_island_respects_area() {
    let mut topo = Topology::new();
    topo.add_link(1, 2, 10, None).unwrap();
    topo.add_link_in_area(2, 3, 10, None, 1).unwrap();

    let r1 = topo.router(1).unwrap();
    mrt_island_identification(&mut topo, r1, 0, 0);
    let r2 = topo.router(2).unwrap();
    let r3 = topo.router(3).unwrap();
    assert!(topo.node(r2).state.in_mrt_island);
    assert!(!topo.node(r3).state.in_mrt_island);
}

#[test]
fn test_island_empty_without_profile() {
    let mut topo = Topology::new();
    topo.add_link(1, 2, 10, None).unwrap();
    topo.clear_profile_ids();
    topo.add_profile_id(2, 0).unwrap();
    let r1 = topo.router(1).unwrap();
    // the computing router itself is not in the profile, so nothing is flooded
    mrt_island_identification(&mut topo, r1, 0, 0);
    assert!(!topo.node(r1).state.in_mrt_island);
    let r2 = topo.router(2).unwrap();
    assert!(!topo.node(r2).state.in_mrt_island);
}
