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

//! Test the named-proxy subsystem on the complex scenario: routers 52 and 53 stay outside the
//! island, prefix 2001 is advertised from inside only, and prefix 2003 from both sides.

use super::common::complex_topology;
use crate::compute::{run_mrt_for_all_sources, run_mrt_for_all_sources_parallel};
use crate::io::writer::{alternates_csv, blue_csv, gadag_csv, red_csv};

fn pnar_ids(topo: &crate::Topology, prefix: u32) -> Vec<u32> {
    topo.stored_named_proxies()[&prefix]
        .attachment_routers()
        .iter()
        .map(|r| topo.node_id_of(*r))
        .collect()
}

#[test]
fn test_island_excludes_unprofiled_routers() {
    let topo = complex_topology();
    let island: Vec<u32> =
        topo.island_node_list_for_test_gr.iter().map(|r| topo.node_id_of(*r)).collect();
    assert!(!island.contains(&52));
    assert!(!island.contains(&53));
    assert_eq!(island.len(), 19);
}

#[test]
fn test_implicit_prefixes_for_non_island_routers() {
    let topo = complex_topology();
    let r52 = topo.router(52).unwrap();
    let r53 = topo.router(53).unwrap();
    assert_eq!(topo.node(r52).prefix_cost_dict.get(&1052), Some(&0));
    assert_eq!(topo.node(r53).prefix_cost_dict.get(&1053), Some(&0));
    // island routers get no implicit prefix
    let r1 = topo.router(1).unwrap();
    assert_eq!(topo.node(r1).prefix_cost_dict.get(&1001), None);
}

#[test]
fn test_attachment_router_election() {
    let mut topo = complex_topology();
    run_mrt_for_all_sources(&mut topo, 0);

    // 2001 is advertised from inside the island only; the two cheapest advertisers win
    assert_eq!(pnar_ids(&topo, 2001), vec![5, 7]);
    // 2002 has exactly two island advertisers
    assert_eq!(pnar_ids(&topo, 2002), vec![13, 15]);
    // 2003 is reachable directly over the island advertiser 78 (cost 100) and over the border
    // router 51 handing off to the loop-free neighbour 52 (10 + 100)
    assert_eq!(pnar_ids(&topo, 2003), vec![78, 51]);
    // the implicit prefix of router 52 is reachable over border routers only
    assert_eq!(pnar_ids(&topo, 1052), vec![51, 3]);
}

#[test]
fn test_lfin_costs() {
    let mut topo = complex_topology();
    run_mrt_for_all_sources(&mut topo, 0);

    // for 2003, the neighbour 52 reaches the advertiser 52 at cost 100 without touching the
    // island, and 53 adds the 53-52 link
    let p = &topo.stored_named_proxies()[&2003];
    let mut lfins: Vec<(u32, u32)> =
        p.lfin_list.iter().map(|(r, c)| (topo.node_id_of(*r), *c)).collect();
    lfins.sort_unstable();
    assert_eq!(lfins, vec![(52, 100), (53, 110)]);

    // for 2001 every path from outside crosses the island, so there is no LFIN at all
    assert!(topo.stored_named_proxies()[&2001].lfin_list.is_empty());
}

#[test]
fn test_proxy_next_hops_present_for_all_island_sources() {
    let mut topo = complex_topology();
    run_mrt_for_all_sources(&mut topo, 0);

    for src in topo.island_node_list_for_test_gr.clone() {
        let src_id = topo.node_id_of(src);
        for prefix in [2001u32, 2002, 2003].iter().copied() {
            // an attachment router of the prefix hands the traffic off itself, so its own
            // next-hop sets may stay empty
            let is_pnar = pnar_ids(&topo, prefix).contains(&src_id);
            let results = topo.node(src).results();
            let blue = results.blue_next_hops(prefix);
            let red = results.red_next_hops(prefix);
            assert!(blue.is_some(), "no blue next-hops from {} to {}", src_id, prefix);
            assert!(red.is_some(), "no red next-hops from {} to {}", src_id, prefix);
            if !is_pnar {
                assert!(
                    !blue.unwrap().is_empty(),
                    "empty blue next-hops from {} to {}",
                    src_id,
                    prefix
                );
                assert!(
                    !red.unwrap().is_empty(),
                    "empty red next-hops from {} to {}",
                    src_id,
                    prefix
                );
            }
            assert!(
                results.primary_next_hops(prefix).is_some(),
                "no primaries from {} to {}",
                src_id,
                prefix
            );
        }
    }
}

#[test]
fn test_proxy_primaries_choose_cheapest_advertiser() {
    let mut topo = complex_topology();
    run_mrt_for_all_sources(&mut topo, 0);

    // from router 6, prefix 2001 is cheapest over the advertiser 5 (metric 10 + cost 100,
    // against 10 + 120 over 7)
    let r6 = topo.router(6).unwrap();
    let pnh = topo.node(r6).results().primary_next_hops(2001).unwrap().clone();
    let links: Vec<(u32, u32)> = pnh.iter().map(|i| topo.intf_endpoints(*i)).collect();
    assert_eq!(links, vec![(6, 5)]);
}

#[test]
fn test_non_island_sources_still_compute_primaries() {
    let mut topo = complex_topology();
    run_mrt_for_all_sources(&mut topo, 0);

    // router 52 is outside the island: no MRT results, but shortest paths to everything
    let results = topo.results_of(52).unwrap();
    assert!(results.blue_next_hops(2001).is_none());
    assert!(results.primary_next_hops(2001).is_some());
    assert!(results.primary_next_hops(1053).is_some());
    let pnh_53 = results.primary_next_hops(53).unwrap().clone();
    let links: Vec<(u32, u32)> = pnh_53.iter().map(|i| topo.intf_endpoints(*i)).collect();
    assert_eq!(links, vec![(52, 53)]);
}

#[test]
fn test_parallel_driver_matches_serial() {
    let mut serial = complex_topology();
    run_mrt_for_all_sources(&mut serial, 17);
    let mut parallel = complex_topology();
    run_mrt_for_all_sources_parallel(&mut parallel, 17, Some(3));

    assert_eq!(gadag_csv(&serial), gadag_csv(&parallel));
    assert_eq!(blue_csv(&serial), blue_csv(&parallel));
    assert_eq!(red_csv(&serial), red_csv(&parallel));
    assert_eq!(alternates_csv(&serial), alternates_csv(&parallel));
}
