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

//! # Topology model
//!
//! Routers, bidirectional interface half-edges and the topology container. Routers live in a
//! petgraph arena and are addressed by [`RouterId`]; interfaces live in a plain arena and are
//! addressed by [`IntfId`]. Every interface knows its twin (`remote_intf`), which carries the
//! reverse direction of the same link.

pub(crate) mod interface;
pub(crate) mod node;
#[allow(clippy::module_inception)]
pub(crate) mod topology;
pub(crate) mod types;

pub use interface::Interface;
pub use node::{Node, NodeResults};
pub use topology::Topology;
pub use types::{
    AreaId, IntfId, LinkMetric, NodeId, PrefixId, ProfileId, RouterId, TopologyError,
    DEFAULT_GR_SEL_PRIORITY, MAX_METRIC, MAX_NODE_ID, MAX_PREFIX_ID, MIN_PREFIX_ID,
    RAISED_GR_SEL_PRIORITY,
};
