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

//! # Per-source orchestration
//!
//! One MRT computation per source: reset the scratch state, identify the island, elect the
//! GADAG root, sort the interfaces, run the lowpoint DFS, grow the ears, assign block
//! identifiers, complete the orientation, run the two restricted SPFs, assemble next-hops,
//! pick alternates, and attach the named proxies. The all-sources drivers repeat this for
//! every router and capture the GADAG direction flags and the named proxies exactly once, when
//! the designated test root acts as the source.

use crate::alternates::select_alts_for_one_src_to_island_dests;
use crate::gadag::construct::{construct_gadag_via_lowpoint, run_assign_block_id};
use crate::gadag::island::{
    mrt_island_identification, set_gadag_root, set_island_intf_and_node_lists, sort_interfaces,
};
use crate::gadag::lowpoint::{assign_remaining_lowpoint_parents, run_lowpoint};
use crate::gadag::orientation::add_undirected_links;
use crate::next_hops::{
    compute_mrt_nh_for_one_src_to_island_dests, store_mrt_nexthops_for_one_src_to_island_dests,
    store_primary_and_alts_for_one_src_to_island_dests, store_primary_nhs_for_one_source_to_nodes,
};
use crate::proxy::{
    attach_named_proxy_nodes, compute_mrt_nhs_for_one_src_to_named_proxy_nodes,
    compute_primary_nhs_for_one_src_to_named_proxy_nodes, create_basic_named_proxy_nodes,
    select_alts_for_one_src_to_named_proxy_nodes, store_alts_for_one_src_to_named_proxy_nodes,
    store_mrt_nhs_for_one_src_to_named_proxy_nodes,
    store_primary_nhs_for_one_src_to_named_proxy_nodes,
};
use crate::spf::normal_spf;
use crate::topology::types::RouterId;
use crate::topology::{NodeResults, Topology};
use log::*;
use rand::prelude::*;
use std::thread;

/// Derive the per-source random source from the base seed and the source's router number, so
/// serial and parallel runs resolve every USE_RED_OR_BLUE identically.
fn rng_for_source(topo: &Topology, seed: u64, src: RouterId) -> StdRng {
    StdRng::seed_from_u64(seed ^ u64::from(topo.node(src).node_id))
}

/// Build the GADAG of the source's island (everything up to and including orientation
/// completion).
fn build_gadag_for_one_source(topo: &mut Topology, src: RouterId) {
    mrt_island_identification(topo, src, 0, 0);
    set_island_intf_and_node_lists(topo);
    set_gadag_root(topo);
    sort_interfaces(topo);
    run_lowpoint(topo);
    assign_remaining_lowpoint_parents(topo);
    construct_gadag_via_lowpoint(topo);
    run_assign_block_id(topo);
    add_undirected_links(topo);
}

/// Run the MRT computation for one source, without the named-proxy stages.
pub fn run_basic_mrt_for_one_source(topo: &mut Topology, src: RouterId, rng: &mut StdRng) {
    build_gadag_for_one_source(topo, src);
    compute_mrt_nh_for_one_src_to_island_dests(topo, src);
    store_mrt_nexthops_for_one_src_to_island_dests(topo, src);
    select_alts_for_one_src_to_island_dests(topo, src, rng);
    store_primary_and_alts_for_one_src_to_island_dests(topo, src);
}

/// Run the full MRT computation for one source, including the named-proxy stages.
pub fn run_mrt_for_one_source(topo: &mut Topology, src: RouterId, rng: &mut StdRng) {
    run_basic_mrt_for_one_source(topo, src, rng);
    create_basic_named_proxy_nodes(topo);
    attach_named_proxy_nodes(topo);
    compute_mrt_nhs_for_one_src_to_named_proxy_nodes(topo, src);
    store_mrt_nhs_for_one_src_to_named_proxy_nodes(topo, src);
    compute_primary_nhs_for_one_src_to_named_proxy_nodes(topo);
    store_primary_nhs_for_one_src_to_named_proxy_nodes(topo, src);
    select_alts_for_one_src_to_named_proxy_nodes(topo, src, rng);
    store_alts_for_one_src_to_named_proxy_nodes(topo, src);
}

/// Sources outside the test root's island still compute plain shortest paths, for all routers
/// and all proxies.
pub fn run_prim_spf_for_one_source(topo: &mut Topology, src: RouterId) {
    normal_spf(topo, src);
    store_primary_nhs_for_one_source_to_nodes(topo, src);
    create_basic_named_proxy_nodes(topo);
    compute_primary_nhs_for_one_src_to_named_proxy_nodes(topo);
    store_primary_nhs_for_one_src_to_named_proxy_nodes(topo, src);
}

/// Capture the GADAG direction of every interface and the current named proxies. Called
/// exactly once per run, when the designated root is the computing source.
fn store_gadag_and_named_proxies_once(topo: &mut Topology) {
    for i in 0..topo.num_intfs() {
        let outgoing = topo.intfs[i].state.outgoing;
        topo.intfs[i].simulation_outgoing = outgoing;
    }
    topo.stored_named_proxy_dict = topo.named_proxy_dict.clone();
}

/// Run the basic (proxy-less) MRT computation for every router in turn.
pub fn run_basic_mrt_for_all_sources(topo: &mut Topology, seed: u64) {
    for src in topo.routers() {
        topo.reset_computed_state();
        let mut rng = rng_for_source(topo, seed, src);
        run_basic_mrt_for_one_source(topo, src, &mut rng);
        if Some(src) == topo.gadag_root {
            store_gadag_and_named_proxies_once(topo);
        }
    }
}

/// Run the full MRT computation for every router in turn. Routers inside the test root's
/// island get the complete MRT treatment; all others only compute primary shortest paths.
pub fn run_mrt_for_all_sources(topo: &mut Topology, seed: u64) {
    for src in topo.routers() {
        topo.reset_computed_state();
        if topo.island_node_list_for_test_gr.contains(&src) {
            let mut rng = rng_for_source(topo, seed, src);
            run_mrt_for_one_source(topo, src, &mut rng);
            if Some(src) == topo.gadag_root {
                store_gadag_and_named_proxies_once(topo);
            }
        } else {
            run_prim_spf_for_one_source(topo, src);
        }
    }
}

/// Worker result of the parallel driver: the computed sources with their result tables, plus
/// the captured GADAG snapshot if this worker processed the root.
type WorkerOutput = (Vec<(RouterId, NodeResults)>, Option<GadagCapture>);

#[derive(Debug, Clone)]
struct GadagCapture {
    gadag_root: Option<RouterId>,
    simulation_outgoing: Vec<bool>,
    stored_named_proxies: std::collections::HashMap<u32, crate::proxy::NamedProxyNode>,
}

/// Run the full MRT computation with the sources partitioned over `n_threads` workers
/// (defaulting to the number of CPUs). Every worker owns a clone of the topology and computes
/// a disjoint subset of sources, so each result table has exactly one writer; the per-source
/// seeding makes the outcome identical to the serial driver.
pub fn run_mrt_for_all_sources_parallel(topo: &mut Topology, seed: u64, n_threads: Option<usize>) {
    let n_threads = n_threads.unwrap_or_else(num_cpus::get).max(1);
    info!("Spawning {} worker threads", n_threads);
    let sources = topo.routers();

    let handles = (0..n_threads)
        .map(|worker| {
            let mut t = topo.clone();
            let my_sources: Vec<RouterId> =
                sources.iter().skip(worker).step_by(n_threads).copied().collect();
            thread::spawn(move || -> WorkerOutput {
                let mut results = Vec::with_capacity(my_sources.len());
                let mut capture = None;
                for src in my_sources {
                    t.reset_computed_state();
                    if t.island_node_list_for_test_gr.contains(&src) {
                        let mut rng = rng_for_source(&t, seed, src);
                        run_mrt_for_one_source(&mut t, src, &mut rng);
                        if Some(src) == t.gadag_root {
                            store_gadag_and_named_proxies_once(&mut t);
                            capture = Some(GadagCapture {
                                gadag_root: t.gadag_root,
                                simulation_outgoing: t
                                    .intfs
                                    .iter()
                                    .map(|i| i.simulation_outgoing)
                                    .collect(),
                                stored_named_proxies: t.stored_named_proxy_dict.clone(),
                            });
                        }
                    } else {
                        run_prim_spf_for_one_source(&mut t, src);
                    }
                    results.push((src, t.node(src).results.clone()));
                }
                (results, capture)
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let (results, capture) = handle.join().unwrap();
        for (src, res) in results {
            topo.node_mut(src).results = res;
        }
        if let Some(capture) = capture {
            topo.gadag_root = capture.gadag_root;
            for (i, outgoing) in capture.simulation_outgoing.into_iter().enumerate() {
                topo.intfs[i].simulation_outgoing = outgoing;
            }
            topo.stored_named_proxy_dict = capture.stored_named_proxies;
        }
    }
}
