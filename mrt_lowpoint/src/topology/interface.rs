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

//! Module defining a directed interface half-edge.

use crate::topology::types::{AreaId, IntfId, LinkMetric, RouterId};

/// A directed interface half-edge. Every link of the topology consists of two interfaces which
/// are twins of each other (`remote_intf`), carrying potentially asymmetric metrics but the same
/// area. The stable fields are set once when the topology is loaded; everything the per-source
/// MRT computation scribbles on lives in `IntfState`.
#[derive(Debug, Clone)]
pub struct Interface {
    /// Metric of this interface in the direction local -> remote
    pub(crate) metric: LinkMetric,
    /// IGP area of the link (identical on both twins)
    pub(crate) area: AreaId,
    /// The router owning this interface
    pub(crate) local_node: RouterId,
    /// The router at the far end of the link
    pub(crate) remote_node: RouterId,
    /// The twin half-edge in the reverse direction
    pub(crate) remote_intf: IntfId,
    /// Index of this interface in the local router's interface list at insertion time
    pub(crate) link_data: u32,
    /// Administratively excluded from MRT computation
    pub(crate) mrt_ineligible: bool,
    /// Excluded from the IGP topology altogether
    pub(crate) igp_excluded: bool,
    /// GADAG direction captured once, when the designated test root runs (the per-run OUTGOING
    /// flag keeps changing with every later source)
    pub(crate) simulation_outgoing: bool,
    /// Per-run scratch flags
    pub(crate) state: IntfState,
}

/// Per-run direction and bookkeeping flags of an interface. Reset before every source
/// computation.
#[derive(Debug, Clone)]
pub(crate) struct IntfState {
    /// Not yet oriented by the GADAG construction
    pub(crate) undirected: bool,
    /// Oriented remote -> local
    pub(crate) incoming: bool,
    /// Oriented local -> remote
    pub(crate) outgoing: bool,
    /// INCOMING was temporarily suppressed for the topological sort
    pub(crate) incoming_stored: bool,
    /// OUTGOING was temporarily suppressed for the topological sort
    pub(crate) outgoing_stored: bool,
    /// Both ends of the link are part of the current MRT island
    pub(crate) in_mrt_island: bool,
    /// Already handled by the block-root bundle orientation
    pub(crate) processed: bool,
}

impl Default for IntfState {
    fn default() -> Self {
        Self {
            undirected: true,
            incoming: false,
            outgoing: false,
            incoming_stored: false,
            outgoing_stored: false,
            in_mrt_island: false,
            processed: false,
        }
    }
}

impl Interface {
    pub(crate) fn new(
        metric: LinkMetric,
        area: AreaId,
        local_node: RouterId,
        remote_node: RouterId,
        remote_intf: IntfId,
        link_data: u32,
    ) -> Self {
        Self {
            metric,
            area,
            local_node,
            remote_node,
            remote_intf,
            link_data,
            mrt_ineligible: false,
            igp_excluded: false,
            simulation_outgoing: false,
            state: IntfState::default(),
        }
    }

    /// Reset all per-run scratch flags.
    pub(crate) fn reset(&mut self) {
        self.state = IntfState::default();
    }

    /// An interface that is both OUTGOING and INCOMING is a cut-link of the GADAG.
    pub(crate) fn is_cut_link(&self) -> bool {
        self.state.outgoing && self.state.incoming
    }

    /// Returns the metric of this interface.
    pub fn metric(&self) -> LinkMetric {
        self.metric
    }

    /// Returns the router owning this interface.
    pub fn local_node(&self) -> RouterId {
        self.local_node
    }

    /// Returns the router at the far end of the link.
    pub fn remote_node(&self) -> RouterId {
        self.remote_node
    }

    /// Returns the insertion index of this interface at its local router (the OSPF-style "link
    /// data" that disambiguates parallel links).
    pub fn link_data(&self) -> u32 {
        self.link_data
    }
}
