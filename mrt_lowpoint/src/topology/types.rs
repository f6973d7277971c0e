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

//! Module containing all type definitions

use crate::topology::node::Node;
use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use thiserror::Error;

pub(crate) type IndexType = u32;
/// Router Identification (and index into the graph)
pub type RouterId = NodeIndex<IndexType>;
/// Externally visible router number, as it appears in the topology file (0..=999). Named proxy
/// nodes use the range 2000..=2999, and implicit prefixes of non-island routers use
/// `node_id + 1000`.
pub type NodeId = u32;
/// Prefix identification (2000..=2999)
pub type PrefixId = u32;
/// MRT profile identification
pub type ProfileId = u32;
/// IGP area identification
pub type AreaId = u32;
/// Link metric of a single interface
pub type LinkMetric = u32;
/// Topology graph: one node per router, one directed edge per interface half-edge. The edge
/// weight is the index of the interface in the interface arena.
pub type MrtGraph = StableGraph<Node, IntfId, Directed, IndexType>;

/// Index of an interface in the topology's interface arena
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct IntfId(pub(crate) usize);

impl IntfId {
    /// Returns the raw index into the interface arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Metric treated as infinity (2^31 - 1, like the reference algorithm)
pub const MAX_METRIC: LinkMetric = 2_147_483_647;

/// Largest allowed router number in a topology file
pub const MAX_NODE_ID: NodeId = 999;

/// Smallest allowed prefix identifier
pub const MIN_PREFIX_ID: PrefixId = 2000;

/// Largest allowed prefix identifier
pub const MAX_PREFIX_ID: PrefixId = 2999;

/// Default GADAG root selection priority
pub const DEFAULT_GR_SEL_PRIORITY: u8 = 128;

/// GADAG root selection priority of a router that was explicitly preferred
pub const RAISED_GR_SEL_PRIORITY: u8 = 255;

/// Topology Errors
#[derive(Error, Debug, PartialEq)]
pub enum TopologyError {
    /// A router number outside of 0..=999 was given
    #[error("node_id must be between 0 and 999, got {0}")]
    NodeIdOutOfRange(NodeId),
    /// A router number does not exist in the topology
    #[error("Router {0} is not present in the topology")]
    NodeNotFound(NodeId),
    /// A line of an input file could not be parsed
    #[error("Cannot parse input line: {0}")]
    InvalidLine(String),
}
