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

//! Module defining a router of the topology.

use crate::alternates::Alternate;
use crate::topology::types::{
    IntfId, LinkMetric, NodeId, PrefixId, ProfileId, RouterId, DEFAULT_GR_SEL_PRIORITY,
    MAX_METRIC,
};
use std::collections::{HashMap, HashSet};

/// A router of the topology. The stable fields are set at load time; the per-run scratch values
/// live in `NodeState` and are wiped before every source computation, while the per-source
/// result tables in [`NodeResults`] accumulate over the whole simulation.
#[derive(Debug, Clone)]
pub struct Node {
    /// Externally visible router number (0..=999)
    pub(crate) node_id: NodeId,
    /// All interfaces of this router, in insertion order
    pub(crate) intf_list: Vec<IntfId>,
    /// MRT profiles this router participates in
    pub(crate) profile_id_list: Vec<ProfileId>,
    /// GADAG root selection priority (128 by default, 255 when raised)
    pub(crate) gr_sel_priority: u8,
    /// Prefixes advertised by this router, with their advertisement cost
    pub(crate) prefix_cost_dict: HashMap<PrefixId, LinkMetric>,
    /// Accumulated results of this router acting as the computing source
    pub(crate) results: NodeResults,
    /// Per-run scratch state
    pub(crate) state: NodeState,
}

/// Result tables of one router acting as the computing source, keyed by destination `node_id`
/// (which may be a named-proxy prefix identifier). These survive the per-run reset and accumulate
/// over all sources.
#[derive(Debug, Clone, Default)]
pub struct NodeResults {
    /// Blue MRT next-hops towards every destination
    pub(crate) blue_next_hops_dict: HashMap<NodeId, Vec<IntfId>>,
    /// Red MRT next-hops towards every destination
    pub(crate) red_next_hops_dict: HashMap<NodeId, Vec<IntfId>>,
    /// Primary (shortest-path) next-hops towards every destination
    pub(crate) pnh_dict: HashMap<NodeId, Vec<IntfId>>,
    /// Alternates for every (destination, failed primary interface) combination
    pub(crate) alt_dict: HashMap<NodeId, Vec<Alternate>>,
    /// Proxies whose blue path exits the island over a loop-free island neighbour
    pub(crate) blue_to_green_nh_set: HashSet<NodeId>,
    /// Proxies whose red path exits the island over a loop-free island neighbour
    pub(crate) red_to_green_nh_set: HashSet<NodeId>,
}

/// Per-run scratch state of one router. All of this is recomputed from scratch for every source.
#[derive(Debug, Clone)]
pub(crate) struct NodeState {
    /// Interfaces with both endpoints inside the current MRT island, ordered by
    /// (metric, remote node_id)
    pub(crate) island_intf_list: Vec<IntfId>,
    pub(crate) in_mrt_island: bool,
    pub(crate) in_gadag: bool,
    pub(crate) dfs_number: Option<u32>,
    pub(crate) dfs_parent: Option<RouterId>,
    pub(crate) dfs_parent_intf: Option<IntfId>,
    pub(crate) dfs_child_list: Vec<RouterId>,
    pub(crate) lowpoint_number: u32,
    pub(crate) lowpoint_parent: Option<RouterId>,
    pub(crate) lowpoint_parent_intf: Option<IntfId>,
    /// Root of this router's block: a cut vertex, or None for the GADAG root itself
    pub(crate) localroot: Option<RouterId>,
    pub(crate) block_id: Option<u32>,
    pub(crate) is_cut_vertex: bool,
    /// Reachable from the source via OUTGOING edges only
    pub(crate) higher: bool,
    /// Reachable from the source via INCOMING edges only
    pub(crate) lower: bool,
    /// The ancestor standing in for this router in alternate selection when it lives outside the
    /// source's block
    pub(crate) order_proxy: Option<RouterId>,
    pub(crate) topo_order: u32,
    /// Remaining unvisited incoming edges during the topological sort
    pub(crate) unvisited: u32,
    pub(crate) spf_metric: LinkMetric,
    pub(crate) spf_visited: bool,
    /// Next-hop candidate set of the currently running SPF
    pub(crate) next_hops: Vec<IntfId>,
    /// Set when the island-marking SPF saw an island router on the path here
    pub(crate) path_hits_island: bool,
    pub(crate) primary_spf_metric: LinkMetric,
    pub(crate) primary_next_hops: Vec<IntfId>,
    pub(crate) blue_next_hops: Vec<IntfId>,
    pub(crate) red_next_hops: Vec<IntfId>,
    pub(crate) alt_list: Vec<Alternate>,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            island_intf_list: Vec::new(),
            in_mrt_island: false,
            in_gadag: false,
            dfs_number: None,
            dfs_parent: None,
            dfs_parent_intf: None,
            dfs_child_list: Vec::new(),
            lowpoint_number: 0,
            lowpoint_parent: None,
            lowpoint_parent_intf: None,
            localroot: None,
            block_id: None,
            is_cut_vertex: false,
            higher: false,
            lower: false,
            order_proxy: None,
            topo_order: 0,
            unvisited: 0,
            spf_metric: MAX_METRIC,
            spf_visited: false,
            next_hops: Vec::new(),
            path_hits_island: false,
            primary_spf_metric: MAX_METRIC,
            primary_next_hops: Vec::new(),
            blue_next_hops: Vec::new(),
            red_next_hops: Vec::new(),
            alt_list: Vec::new(),
        }
    }
}

impl Node {
    pub(crate) fn new(node_id: NodeId) -> Self {
        Self {
            node_id,
            intf_list: Vec::new(),
            profile_id_list: vec![0],
            gr_sel_priority: DEFAULT_GR_SEL_PRIORITY,
            prefix_cost_dict: HashMap::new(),
            results: NodeResults::default(),
            state: NodeState::default(),
        }
    }

    /// Reset all per-run scratch state, keeping the accumulated result tables.
    pub(crate) fn reset(&mut self) {
        self.state = NodeState::default();
    }

    /// Returns the externally visible router number.
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Returns the accumulated per-source result tables of this router.
    pub fn results(&self) -> &NodeResults {
        &self.results
    }
}

impl NodeResults {
    /// Returns the blue MRT next-hops towards `dest`, if any were computed.
    pub fn blue_next_hops(&self, dest: NodeId) -> Option<&Vec<IntfId>> {
        self.blue_next_hops_dict.get(&dest)
    }

    /// Returns the red MRT next-hops towards `dest`, if any were computed.
    pub fn red_next_hops(&self, dest: NodeId) -> Option<&Vec<IntfId>> {
        self.red_next_hops_dict.get(&dest)
    }

    /// Returns the primary next-hops towards `dest`, if any were computed.
    pub fn primary_next_hops(&self, dest: NodeId) -> Option<&Vec<IntfId>> {
        self.pnh_dict.get(&dest)
    }

    /// Returns the alternates for all primary interfaces towards `dest`.
    pub fn alternates(&self, dest: NodeId) -> Option<&Vec<Alternate>> {
        self.alt_dict.get(&dest)
    }
}
