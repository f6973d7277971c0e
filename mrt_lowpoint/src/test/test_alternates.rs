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

//! Test the alternate selection decision tables.

use super::common::example_topology;
use crate::alternates::{AltInfo, Fec, Protection};
use crate::compute::{run_basic_mrt_for_all_sources, run_basic_mrt_for_one_source};
use crate::topology::Topology;
use rand::prelude::*;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0)
}

#[test]
fn test_single_cut_link_has_no_alternate() {
    // two routers, one link: the only primary fails onto nothing
    let mut topo = Topology::new();
    topo.add_link(1, 2, 10, None).unwrap();
    topo.set_test_gadag_root(1).unwrap();
    run_basic_mrt_for_all_sources(&mut topo, 0);

    let alts = topo.results_of(1).unwrap().alternates(2).unwrap().clone();
    assert_eq!(alts.len(), 1);
    let alt = &alts[0];
    assert_eq!(topo.intf_endpoints(alt.failed_intf()), (1, 2));
    assert_eq!(alt.fec(), Fec::NoAlternate);
    assert_eq!(alt.protection(), Protection::NoProtection);
    assert_eq!(alt.nh_list(), &[None]);
}

#[test]
fn test_parallel_cut_link_green_alternate() {
    // two parallel links: the lower metric is primary, the other one is the GREEN alternate
    let mut topo = Topology::new();
    topo.add_link(1, 2, 10, None).unwrap();
    topo.add_link(1, 2, 15, None).unwrap();
    topo.set_test_gadag_root(1).unwrap();
    run_basic_mrt_for_all_sources(&mut topo, 0);

    let alts = topo.results_of(1).unwrap().alternates(2).unwrap().clone();
    assert_eq!(alts.len(), 1);
    let alt = &alts[0];
    assert_eq!(topo.intf(alt.failed_intf()).metric(), 10);
    assert_eq!(alt.fec(), Fec::Green);
    assert_eq!(alt.protection(), Protection::ParallelCutlink);
    let nh = alt.nh_list();
    assert_eq!(nh.len(), 1);
    let green = nh[0].expect("the parallel link must be the alternate");
    assert_eq!(topo.intf(green).metric(), 15);
    assert_eq!(topo.intf_endpoints(green), (1, 2));
}

/// # Ring of four
///
/// ```text
/// 1 ---- 2
/// |      |
/// 4 ---- 3
/// ```
///
/// All metrics 10, root 4, GADAG 4 -> 1 -> 2 -> 3 -> 4. From router 1, the path to 3 is an
/// equal-cost split over 2 and 4, exercising several decision-table rows at once.
fn ring() -> Topology {
    let mut topo = Topology::new();
    topo.add_link(1, 2, 10, None).unwrap();
    topo.add_link(2, 3, 10, None).unwrap();
    topo.add_link(3, 4, 10, None).unwrap();
    topo.add_link(4, 1, 10, None).unwrap();
    topo.set_test_gadag_root(4).unwrap();
    topo
}

#[test]
fn test_ring_node_protecting_alternates() {
    let mut topo = ring();
    let r1 = topo.router(1).unwrap();
    topo.reset_computed_state();
    run_basic_mrt_for_one_source(&mut topo, r1, &mut rng());

    let r3 = topo.router(3).unwrap();
    let alts = topo.node(r3).state.alt_list.clone();
    assert_eq!(alts.len(), 2);
    for alt in alts {
        match topo.intf_endpoints(alt.failed_intf()) {
            // D is HIGHER and F=2 is HIGHER with a smaller topological order: go red,
            // backwards over the root
            (1, 2) => {
                assert_eq!(alt.info, AltInfo::UseRed);
                assert_eq!(alt.fec(), Fec::Red);
                assert_eq!(alt.protection(), Protection::NodeProtection);
                let nhs: Vec<_> =
                    alt.nh_list().iter().map(|i| topo.intf_endpoints(i.unwrap())).collect();
                assert_eq!(nhs, vec![(1, 4)]);
            }
            // D is HIGHER and F=4 is the block root (both HIGHER and LOWER): go blue
            (1, 4) => {
                assert_eq!(alt.info, AltInfo::UseBlue);
                assert_eq!(alt.fec(), Fec::Blue);
                assert_eq!(alt.protection(), Protection::NodeProtection);
                let nhs: Vec<_> =
                    alt.nh_list().iter().map(|i| topo.intf_endpoints(i.unwrap())).collect();
                assert_eq!(nhs, vec![(1, 2)]);
            }
            other => panic!("unexpected primary interface {:?}", other),
        }
    }
}

#[test]
fn test_ring_link_protection_when_failure_is_destination() {
    let mut topo = ring();
    let r1 = topo.router(1).unwrap();
    topo.reset_computed_state();
    run_basic_mrt_for_one_source(&mut topo, r1, &mut rng());

    // D = 2 = F over the primary 1 -> 2: the red path avoids the link, not the router
    let r2 = topo.router(2).unwrap();
    let alts = topo.node(r2).state.alt_list.clone();
    assert_eq!(alts.len(), 1);
    let alt = &alts[0];
    assert_eq!(alt.info, AltInfo::PrimaryIsDestination);
    assert_eq!(alt.fec(), Fec::Red);
    assert_eq!(alt.protection(), Protection::LinkProtection);
    let nhs: Vec<_> = alt.nh_list().iter().map(|i| topo.intf_endpoints(i.unwrap())).collect();
    assert_eq!(nhs, vec![(1, 4)]);

    // D = 4 = F over the primary 1 -> 4: the blue path survives
    let r4 = topo.router(4).unwrap();
    let alts = topo.node(r4).state.alt_list.clone();
    assert_eq!(alts.len(), 1);
    let alt = &alts[0];
    assert_eq!(alt.info, AltInfo::PrimaryIsDestination);
    assert_eq!(alt.fec(), Fec::Blue);
    assert_eq!(alt.protection(), Protection::LinkProtection);
    let nhs: Vec<_> = alt.nh_list().iter().map(|i| topo.intf_endpoints(i.unwrap())).collect();
    assert_eq!(nhs, vec![(1, 2)]);
}

#[test]
fn test_example_topology_every_primary_is_protected() {
    // on the example topology, every (source, destination, primary) either carries an
    // alternate or is an honest NO_ALTERNATE verdict
    let mut topo = example_topology();
    run_basic_mrt_for_all_sources(&mut topo, 0);
    for src in topo.island_node_list_for_test_gr.clone() {
        let src_id = topo.node_id_of(src);
        for (dest, alts) in topo.node(src).results().alt_dict.clone() {
            if dest == src_id {
                continue;
            }
            for alt in alts {
                if alt.fec() == Fec::NoAlternate {
                    assert_eq!(alt.protection(), Protection::NoProtection);
                } else {
                    assert!(
                        !alt.nh_list().is_empty(),
                        "empty alternate from {} to {}",
                        src_id,
                        dest
                    );
                    assert_ne!(alt.protection(), Protection::NoProtection);
                }
            }
        }
    }
}

#[test]
fn test_alternate_avoids_failed_router() {
    // NODE_PROTECTION alternates must not use the failed router as next-hop
    let mut topo = example_topology();
    run_basic_mrt_for_all_sources(&mut topo, 0);
    for src in topo.island_node_list_for_test_gr.clone() {
        let src_id = topo.node_id_of(src);
        for (dest, alts) in topo.node(src).results().alt_dict.clone() {
            for alt in alts {
                if alt.protection() != Protection::NodeProtection {
                    continue;
                }
                let (_, failed_remote) = topo.intf_endpoints(alt.failed_intf());
                for nh in alt.nh_list().iter().flatten() {
                    assert_ne!(
                        topo.intf_endpoints(*nh).1,
                        failed_remote,
                        "alternate from {} to {} forwards into the failure",
                        src_id,
                        dest
                    );
                }
            }
        }
    }
}
