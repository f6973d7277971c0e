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

//! # File input and output
//!
//! Thin collaborators around the MRT core: the topology / profile / prefix readers populate
//! the in-memory [`Topology`](crate::topology::Topology), the writers serialise the computed
//! results into the four sorted CSV files.

pub mod reader;
pub mod writer;

pub use reader::{apply_prefix_file, apply_profile_file, read_topology};
pub use writer::write_output_files;
