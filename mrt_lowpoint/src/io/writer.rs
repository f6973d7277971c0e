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

//! The four CSV output writers.
//!
//! All files share the same conventions: router numbers zero-padded to width 4, link data to
//! width 3, data lines lexicographically sorted below the header, and results restricted to
//! the test root's island.

use crate::error::Error;
use crate::topology::types::IntfId;
use crate::topology::Topology;
use itertools::Itertools;
use log::*;
use std::fs;
use std::path::Path;

/// Which MRT a `*_to_all.csv` file describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MrtColor {
    Blue,
    Red,
}

impl MrtColor {
    fn tag(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Red => "red",
        }
    }
}

fn fmt_intf(topo: &Topology, intf_id: IntfId) -> String {
    let (local, remote) = topo.intf_endpoints(intf_id);
    format!("{:04},{:04},{:03}", local, remote, topo.intf(intf_id).link_data())
}

/// The `<prefix>_gadag.csv` contents: one line per interface whose GADAG direction was
/// captured as outgoing at the designated root.
pub(crate) fn gadag_csv(topo: &Topology) -> String {
    let mut out = String::from("local_node,remote_node,local_intf_link_data\n");
    let lines = (0..topo.num_intfs())
        .map(IntfId)
        .filter(|i| topo.intf(*i).simulation_outgoing)
        .map(|i| fmt_intf(topo, i))
        .sorted();
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// The `<prefix>_{blue,red}_to_all.csv` contents: one line per
/// (source, destination, next-hop interface).
fn mrt_csv(topo: &Topology, color: MrtColor) -> String {
    let mut out = String::from("gadag_root,dest,local_node,remote_node,link_data\n");
    let root_id = match topo.gadag_root {
        Some(r) => topo.node_id_of(r),
        None => {
            warn!("No GADAG root, writing an empty {} MRT file", color.tag());
            return out;
        }
    };
    let mut edge_list: Vec<String> = Vec::new();
    for node in topo.island_node_list_for_test_gr.iter() {
        let results = topo.node(*node).results();
        let dict = match color {
            MrtColor::Blue => &results.blue_next_hops_dict,
            MrtColor::Red => &results.red_next_hops_dict,
        };
        for (dest, next_hops) in dict.iter() {
            for intf_id in next_hops.iter() {
                edge_list.push(format!("{:04},{:04},{}", root_id, dest, fmt_intf(topo, *intf_id)));
            }
        }
    }
    for line in edge_list.into_iter().sorted() {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub(crate) fn blue_csv(topo: &Topology) -> String {
    mrt_csv(topo, MrtColor::Blue)
}

pub(crate) fn red_csv(topo: &Topology) -> String {
    mrt_csv(topo, MrtColor::Red)
}

/// The `<prefix>_alts_to_all.csv` contents: one line per
/// (source, destination, primary interface, alternate interface), with the literal string
/// `None` for the fields of an absent alternate.
pub(crate) fn alternates_csv(topo: &Topology) -> String {
    let mut out = String::from(
        "gadag_root,dest,prim_nh.local_node,prim_nh.remote_node,prim_nh.link_data,\
         alt_nh.local_node,alt_nh.remote_node,alt_nh.link_data,alt_nh.fec\n",
    );
    let root_id = match topo.gadag_root {
        Some(r) => topo.node_id_of(r),
        None => {
            warn!("No GADAG root, writing an empty alternates file");
            return out;
        }
    };
    let mut edge_list: Vec<String> = Vec::new();
    for x in topo.island_node_list_for_test_gr.iter() {
        for (dest, alt_list) in topo.node(*x).results().alt_dict.iter() {
            for alt in alt_list.iter() {
                for alt_intf in alt.nh_list().iter() {
                    let alt_fields = match alt_intf {
                        Some(i) => fmt_intf(topo, *i),
                        None => String::from("None,None,None"),
                    };
                    edge_list.push(format!(
                        "{:04},{:04},{},{},{}",
                        root_id,
                        dest,
                        fmt_intf(topo, alt.failed_intf()),
                        alt_fields,
                        alt.fec()
                    ));
                }
            }
        }
    }
    for line in edge_list.into_iter().sorted() {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Write the four output files `<prefix>_gadag.csv`, `<prefix>_blue_to_all.csv`,
/// `<prefix>_red_to_all.csv` and `<prefix>_alts_to_all.csv`.
pub fn write_output_files<P: AsRef<Path>>(topo: &Topology, file_prefix: P) -> Result<(), Error> {
    let prefix = file_prefix.as_ref().as_os_str().to_string_lossy().into_owned();
    info!("Writing output files with prefix {}", prefix);
    fs::write(format!("{}_gadag.csv", prefix), gadag_csv(topo))?;
    fs::write(format!("{}_blue_to_all.csv", prefix), blue_csv(topo))?;
    fs::write(format!("{}_red_to_all.csv", prefix), red_csv(topo))?;
    fs::write(format!("{}_alts_to_all.csv", prefix), alternates_csv(topo))?;
    Ok(())
}
