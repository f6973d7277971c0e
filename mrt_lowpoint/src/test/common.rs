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

//! Shared topologies for the test modules, built once and cloned into each test.

use crate::topology::Topology;
use lazy_static::lazy_static;

lazy_static! {
    /// The links of the example topology shipped with the algorithm draft: a ring of routers
    /// 1..7 with three parallel links between 6 and 7, an asymmetric link 4-5, and three
    /// appendix rings over 51..53, 12..17 and 76..79.
    static ref EXAMPLE_LINKS: Vec<(u32, u32, u32, Option<u32>)> = vec![
        (1, 2, 10, None),
        (2, 3, 10, None),
        (3, 4, 11, None),
        (4, 5, 10, Some(20)),
        (5, 6, 10, None),
        (6, 7, 10, None),
        (6, 7, 10, None),
        (6, 7, 15, None),
        (7, 1, 10, None),
        (7, 51, 10, None),
        (51, 52, 10, None),
        (52, 53, 10, None),
        (53, 3, 10, None),
        (1, 55, 10, None),
        (55, 6, 10, None),
        (4, 12, 10, None),
        (12, 13, 10, None),
        (13, 14, 10, None),
        (14, 15, 10, None),
        (15, 16, 10, None),
        (16, 17, 10, None),
        (17, 4, 10, None),
        (5, 76, 10, None),
        (76, 77, 10, None),
        (77, 78, 10, None),
        (78, 79, 10, None),
        (79, 77, 10, None),
    ];

    /// The example topology with the test GADAG root 3 preferred, as in the basic scenario.
    static ref EXAMPLE_TOPOLOGY: Topology = {
        let mut topo = Topology::new();
        for (a, b, metric, reverse) in EXAMPLE_LINKS.iter().copied() {
            topo.add_link(a, b, metric, reverse).unwrap();
        }
        topo.raise_gadag_root_selection_priority(3).unwrap();
        topo.set_test_gadag_root(3).unwrap();
        topo
    };

    /// The complex scenario: the example links plus a profile file that leaves routers 52 and
    /// 53 outside the island, and three prefixes advertised from inside and outside the
    /// island.
    static ref COMPLEX_TOPOLOGY: Topology = {
        let mut topo = Topology::new();
        for (a, b, metric, reverse) in EXAMPLE_LINKS.iter().copied() {
            topo.add_link(a, b, metric, reverse).unwrap();
        }
        topo.clear_profile_ids();
        for node_id in
            [1, 2, 3, 4, 5, 6, 7, 51, 55, 12, 13, 14, 15, 16, 17, 76, 77, 78, 79].iter().copied()
        {
            topo.add_profile_id(node_id, 0).unwrap();
        }
        for (prefix, node_id, cost) in [
            (2001, 5, 100),
            (2001, 7, 120),
            (2001, 3, 130),
            (2002, 13, 100),
            (2002, 15, 110),
            (2003, 52, 100),
            (2003, 78, 100),
        ]
        .iter()
        .copied()
        {
            topo.add_prefix_advertisement(prefix, node_id, cost).unwrap();
        }
        topo.raise_gadag_root_selection_priority(3).unwrap();
        topo.set_test_gadag_root(3).unwrap();
        topo.add_prefixes_for_non_island_nodes();
        topo
    };
}

/// A fresh copy of the basic example topology.
pub fn example_topology() -> Topology {
    EXAMPLE_TOPOLOGY.clone()
}

/// A fresh copy of the complex scenario topology.
pub fn complex_topology() -> Topology {
    COMPLEX_TOPOLOGY.clone()
}
