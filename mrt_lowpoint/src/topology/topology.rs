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

//! # Top-level Topology module
//!
//! This module represents the network topology: an arena of routers (owned by a petgraph
//! [`StableGraph`](petgraph::stable_graph::StableGraph), so router handles stay valid forever)
//! and an arena of interface half-edges. All bidirectional references between routers and
//! interfaces are expressed as indices into these two arenas.

use crate::gadag::island;
use crate::proxy::NamedProxyNode;
use crate::topology::interface::Interface;
use crate::topology::node::Node;
use crate::topology::types::{
    AreaId, IntfId, LinkMetric, MrtGraph, NodeId, PrefixId, RouterId, TopologyError,
    DEFAULT_GR_SEL_PRIORITY, MAX_NODE_ID, RAISED_GR_SEL_PRIORITY,
};
use std::collections::{HashMap, HashSet};

/// # Topology struct
///
/// The struct owns all routers and interfaces of the simulated network, together with the
/// per-run state of the MRT computation (the current source's island, the chosen GADAG root)
/// and the state that survives across sources (the designated test root and its island, and the
/// named proxies captured when the test root acted as the source).
#[derive(Debug, Clone)]
pub struct Topology {
    pub(crate) graph: MrtGraph,
    pub(crate) intfs: Vec<Interface>,
    pub(crate) node_dict: HashMap<NodeId, RouterId>,
    /// GADAG root of the current source's island
    pub(crate) gadag_root: Option<RouterId>,
    /// Island of the current computing source
    pub(crate) island_node_list: Vec<RouterId>,
    /// The designated root whose island the output files are restricted to
    pub(crate) test_gr: Option<RouterId>,
    pub(crate) island_node_list_for_test_gr: Vec<RouterId>,
    /// Non-island routers with at least one interface into the current island
    pub(crate) island_nbr_set: HashSet<RouterId>,
    /// Island routers with at least one interface to an island neighbour
    pub(crate) island_border_set: HashSet<RouterId>,
    /// Named proxies of the current source computation
    pub(crate) named_proxy_dict: HashMap<PrefixId, NamedProxyNode>,
    /// Named proxies captured once, when the test root ran as the source
    pub(crate) stored_named_proxy_dict: HashMap<PrefixId, NamedProxyNode>,
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}

impl Topology {
    /// Generate an empty topology.
    pub fn new() -> Self {
        Self {
            graph: MrtGraph::default(),
            intfs: Vec::new(),
            node_dict: HashMap::new(),
            gadag_root: None,
            island_node_list: Vec::new(),
            test_gr: None,
            island_node_list_for_test_gr: Vec::new(),
            island_nbr_set: HashSet::new(),
            island_border_set: HashSet::new(),
            named_proxy_dict: HashMap::new(),
            stored_named_proxy_dict: HashMap::new(),
        }
    }

    /// Add a router with the given external number, or return the existing handle.
    pub fn add_node(&mut self, node_id: NodeId) -> Result<RouterId, TopologyError> {
        if node_id > MAX_NODE_ID {
            return Err(TopologyError::NodeIdOutOfRange(node_id));
        }
        if let Some(r) = self.node_dict.get(&node_id) {
            return Ok(*r);
        }
        let r = self.graph.add_node(Node::new(node_id));
        self.node_dict.insert(node_id, r);
        Ok(r)
    }

    /// Add a bidirectional link between routers `a` and `b`. The routers are created if they do
    /// not exist yet. `metric` applies in the direction a -> b; `reverse_metric` (defaulting to
    /// `metric`) in the direction b -> a. Parallel links are allowed and kept apart by their
    /// `link_data` insertion index.
    pub fn add_link(
        &mut self,
        a: NodeId,
        b: NodeId,
        metric: LinkMetric,
        reverse_metric: Option<LinkMetric>,
    ) -> Result<(), TopologyError> {
        self.add_link_in_area(a, b, metric, reverse_metric, 0)
    }

    /// Same as [`Topology::add_link`], placing the link into the given IGP area.
    pub fn add_link_in_area(
        &mut self,
        a: NodeId,
        b: NodeId,
        metric: LinkMetric,
        reverse_metric: Option<LinkMetric>,
        area: AreaId,
    ) -> Result<(), TopologyError> {
        let ra = self.add_node(a)?;
        let rb = self.add_node(b)?;
        let ia = IntfId(self.intfs.len());
        let ib = IntfId(self.intfs.len() + 1);
        let link_data_a = self.graph[ra].intf_list.len() as u32;
        let link_data_b = self.graph[rb].intf_list.len() as u32;
        self.intfs.push(Interface::new(metric, area, ra, rb, ib, link_data_a));
        self.intfs.push(Interface::new(
            reverse_metric.unwrap_or(metric),
            area,
            rb,
            ra,
            ia,
            link_data_b,
        ));
        self.graph[ra].intf_list.push(ia);
        self.graph[rb].intf_list.push(ib);
        self.graph.add_edge(ra, rb, ia);
        self.graph.add_edge(rb, ra, ib);
        Ok(())
    }

    /// Returns the handle of the router with the given external number.
    pub fn router(&self, node_id: NodeId) -> Result<RouterId, TopologyError> {
        self.node_dict.get(&node_id).copied().ok_or(TopologyError::NodeNotFound(node_id))
    }

    /// Returns all router handles, ordered by their external number for reproducibility.
    pub fn routers(&self) -> Vec<RouterId> {
        let mut r: Vec<RouterId> = self.graph.node_indices().collect();
        r.sort_by_key(|x| self.graph[*x].node_id);
        r
    }

    /// Returns the number of routers in the topology.
    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of interface half-edges in the topology.
    pub fn num_intfs(&self) -> usize {
        self.intfs.len()
    }

    pub(crate) fn node(&self, r: RouterId) -> &Node {
        &self.graph[r]
    }

    pub(crate) fn node_mut(&mut self, r: RouterId) -> &mut Node {
        &mut self.graph[r]
    }

    pub(crate) fn intf(&self, i: IntfId) -> &Interface {
        &self.intfs[i.0]
    }

    pub(crate) fn intf_mut(&mut self, i: IntfId) -> &mut Interface {
        &mut self.intfs[i.0]
    }

    /// Returns the external number of the given router.
    pub fn node_id_of(&self, r: RouterId) -> NodeId {
        self.graph[r].node_id
    }

    /// Returns the external numbers of the local and remote routers of an interface.
    pub fn intf_endpoints(&self, i: IntfId) -> (NodeId, NodeId) {
        let intf = self.intf(i);
        (self.node_id_of(intf.local_node), self.node_id_of(intf.remote_node))
    }

    /// Reset all per-run scratch state (router and interface), the current island and the
    /// current named proxies. The accumulated result tables, the test-root island and the
    /// captured proxies survive.
    pub fn reset_computed_state(&mut self) {
        self.island_node_list.clear();
        self.named_proxy_dict.clear();
        self.island_nbr_set.clear();
        self.island_border_set.clear();
        let indices: Vec<RouterId> = self.graph.node_indices().collect();
        for r in indices {
            self.graph[r].reset();
        }
        for intf in self.intfs.iter_mut() {
            intf.reset();
        }
    }

    /// Prefer the given router in the GADAG root election by raising its selection priority
    /// to 255.
    pub fn raise_gadag_root_selection_priority(
        &mut self,
        node_id: NodeId,
    ) -> Result<(), TopologyError> {
        let r = self.router(node_id)?;
        self.graph[r].gr_sel_priority = RAISED_GR_SEL_PRIORITY;
        Ok(())
    }

    /// Reset the given router's GADAG root selection priority to the default of 128.
    pub fn lower_gadag_root_selection_priority(
        &mut self,
        node_id: NodeId,
    ) -> Result<(), TopologyError> {
        let r = self.router(node_id)?;
        self.graph[r].gr_sel_priority = DEFAULT_GR_SEL_PRIORITY;
        Ok(())
    }

    /// Designate the router whose MRT island the output files are restricted to, and compute
    /// that island once (profile 0, area 0).
    pub fn set_test_gadag_root(&mut self, node_id: NodeId) -> Result<(), TopologyError> {
        let r = self.router(node_id)?;
        self.reset_computed_state();
        self.test_gr = Some(r);
        island::mrt_island_identification(self, r, 0, 0);
        self.island_node_list_for_test_gr =
            self.routers().into_iter().filter(|x| self.graph[*x].state.in_mrt_island).collect();
        Ok(())
    }

    /// Add a profile membership to a router. Used by the `.profile` file reader; the first call
    /// for a router replaces the implicit default membership in profile 0.
    pub fn add_profile_id(&mut self, node_id: NodeId, profile_id: u32) -> Result<(), TopologyError> {
        let r = self.router(node_id)?;
        self.graph[r].profile_id_list.push(profile_id);
        Ok(())
    }

    /// Clear the profile memberships of all routers (the `.profile` file becomes the only
    /// source of truth).
    pub fn clear_profile_ids(&mut self) {
        let indices: Vec<RouterId> = self.graph.node_indices().collect();
        for r in indices {
            self.graph[r].profile_id_list.clear();
        }
    }

    /// Record that the given router advertises `prefix_id` at the given cost.
    pub fn add_prefix_advertisement(
        &mut self,
        prefix_id: PrefixId,
        node_id: NodeId,
        cost: LinkMetric,
    ) -> Result<(), TopologyError> {
        let r = self.router(node_id)?;
        self.graph[r].prefix_cost_dict.insert(prefix_id, cost);
        Ok(())
    }

    /// Give every router outside the test root's island an implicit prefix `node_id + 1000`
    /// at cost 0, so island sources can compute proxies for it. Must run after
    /// [`Topology::set_test_gadag_root`], which leaves the island marking in place.
    pub fn add_prefixes_for_non_island_nodes(&mut self) {
        let indices: Vec<RouterId> = self.graph.node_indices().collect();
        for r in indices {
            let node = &mut self.graph[r];
            if node.state.in_mrt_island {
                continue;
            }
            let prefix_id = node.node_id + 1000;
            node.prefix_cost_dict.insert(prefix_id, 0);
        }
    }

    /// Two routers are in a common block iff they share a block identifier or one is the
    /// other's localroot.
    pub(crate) fn in_common_block(&self, x: RouterId, y: RouterId) -> bool {
        let sx = &self.graph[x].state;
        let sy = &self.graph[y].state;
        (sx.block_id.is_some() && sx.block_id == sy.block_id)
            || sy.localroot == Some(x)
            || sx.localroot == Some(y)
    }

    /// The router standing in for `y` in ordering decisions (itself inside the source's block).
    pub(crate) fn order_proxy_of(&self, y: RouterId) -> RouterId {
        self.graph[y].state.order_proxy.unwrap_or(y)
    }

    /// Returns the accumulated results of the router with the given external number.
    pub fn results_of(&self, node_id: NodeId) -> Result<&crate::topology::node::NodeResults, TopologyError> {
        Ok(self.node(self.router(node_id)?).results())
    }

    /// Returns the blue MRT next-hops from `src` to `dest` as (local, remote) router number
    /// pairs. Empty if nothing was computed for this pair.
    pub fn blue_next_hop_links(&self, src: NodeId, dest: NodeId) -> Vec<(NodeId, NodeId)> {
        self.next_hop_links(src, dest, true)
    }

    /// Returns the red MRT next-hops from `src` to `dest` as (local, remote) router number
    /// pairs. Empty if nothing was computed for this pair.
    pub fn red_next_hop_links(&self, src: NodeId, dest: NodeId) -> Vec<(NodeId, NodeId)> {
        self.next_hop_links(src, dest, false)
    }

    fn next_hop_links(&self, src: NodeId, dest: NodeId, blue: bool) -> Vec<(NodeId, NodeId)> {
        let r = match self.node_dict.get(&src) {
            Some(r) => *r,
            None => return Vec::new(),
        };
        let results = &self.graph[r].results;
        let nhs = if blue {
            results.blue_next_hops_dict.get(&dest)
        } else {
            results.red_next_hops_dict.get(&dest)
        };
        nhs.map(|l| l.iter().map(|i| self.intf_endpoints(*i)).collect()).unwrap_or_default()
    }

    /// Returns the named proxies captured when the test root acted as the computing source.
    pub fn stored_named_proxies(&self) -> &HashMap<PrefixId, NamedProxyNode> {
        &self.stored_named_proxy_dict
    }
}
