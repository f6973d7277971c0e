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

#![deny(missing_docs)]

//! # MRT-Lowpoint: Maximally Redundant Trees for IP Fast Reroute
//!
//! This library computes Maximally Redundant Trees (MRTs) for an IP/IGP network, following the
//! Lowpoint construction of the IETF MRT-FRR algorithm draft. For every source router it
//! produces a pair of next-hop forwarding tables (the "blue" and the "red" MRT) and, per
//! (destination, failed link) combination, an alternate next-hop that provides fast reroute
//! around any single link or router failure.
//!
//! ## Structure
//!
//! - **[`topology`]**: the graph model. Routers and interface half-edges live in two arenas
//!   and reference each other by stable indices; see [`Topology`](topology::Topology).
//!
//! - **`gadag`**: turns the source's MRT island into a Generalised Almost-Directed Acyclic
//!   Graph: island identification, lowpoint DFS, ear decomposition (cut vertices, local roots,
//!   block identifiers) and orientation completion via topological sort.
//!
//! - **`spf`**: the SPF variants: block-restricted increasing / decreasing Dijkstra, the
//!   unrestricted primary SPF, and the island-marking SPF of the proxy subsystem.
//!
//! - **`next_hops`** and **[`alternates`]**: blue/red next-hop assembly from the HIGHER /
//!   LOWER ordering, and the decision tables picking the surviving colour per failure.
//!
//! - **[`proxy`]**: named proxy nodes for prefixes advertised outside the island, attached
//!   over up to two Proxy Node Attachment Routers.
//!
//! - **[`compute`]**: the per-source pipeline and the all-sources drivers (serial and
//!   partitioned-parallel).
//!
//! - **[`io`]**: CSV readers for the topology and its companion files, and the four sorted
//!   CSV output writers.
//!
//! ## Example
//!
//! ```rust
//! use mrt_lowpoint::compute::run_basic_mrt_for_all_sources;
//! use mrt_lowpoint::Error;
//! use mrt_lowpoint::Topology;
//!
//! fn main() -> Result<(), Error> {
//!     // a triangle with symmetric metrics, rooted at router 1
//!     let mut topo = Topology::new();
//!     topo.add_link(1, 2, 10, None)?;
//!     topo.add_link(2, 3, 10, None)?;
//!     topo.add_link(3, 1, 10, None)?;
//!     topo.raise_gadag_root_selection_priority(1)?;
//!     topo.set_test_gadag_root(1)?;
//!
//!     run_basic_mrt_for_all_sources(&mut topo, 0);
//!
//!     // the GADAG is 1 -> 2 -> 3 -> 1, so router 2 reaches 3 directly on blue and over
//!     // router 1 on red
//!     assert_eq!(topo.blue_next_hop_links(2, 3), vec![(2, 3)]);
//!     assert_eq!(topo.red_next_hop_links(2, 3), vec![(2, 1)]);
//!     Ok(())
//! }
//! ```

pub mod alternates;
pub mod compute;
mod error;
pub(crate) mod gadag;
pub mod io;
pub(crate) mod next_hops;
pub mod proxy;
pub(crate) mod spf;
mod test;
pub mod topology;

pub use error::Error;
pub use topology::{RouterId, Topology};
