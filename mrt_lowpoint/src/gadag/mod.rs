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

//! # GADAG construction
//!
//! Everything needed to turn the current source's MRT island into a Generalised Almost-Directed
//! Acyclic Graph: island identification, the lowpoint DFS, the ear decomposition (which also
//! yields cut vertices, local roots and block identifiers), and the orientation completion that
//! directs the remaining undirected links with a topological sort.

pub(crate) mod construct;
pub(crate) mod island;
pub(crate) mod lowpoint;
pub(crate) mod orientation;
