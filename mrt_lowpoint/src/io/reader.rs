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

//! Topology, profile and prefix file readers.
//!
//! The topology lives in `<base>.csv`, one link per line:
//!
//! ```text
//! local_node,remote_node,metric[,reverse_metric]
//! ```
//!
//! The optional `<base>.profile` file assigns routers to MRT profiles (one
//! `node_id,profile_id` pair per line, a router may appear several times); without it, every
//! router participates in profile 0. The optional `<base>.prefix` file carries
//! `prefix_id,advertising_node_id,prefix_cost` lines with prefix identifiers in 2000..=2999.

use crate::error::Error;
use crate::topology::{Topology, TopologyError, MAX_NODE_ID, MAX_PREFIX_ID, MIN_PREFIX_ID};
use log::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

fn parse_field(line: &str, field: &str) -> Result<u32, TopologyError> {
    field.trim().parse::<u32>().map_err(|_| TopologyError::InvalidLine(line.to_string()))
}

/// Parse a topology from the contents of a `.csv` link file. Router numbers above 999 are
/// fatal.
pub fn parse_topology(content: &str) -> Result<Topology, Error> {
    let mut topo = Topology::new();
    let mut node_id_set: BTreeSet<u32> = BTreeSet::new();
    let mut links: Vec<(u32, u32, u32, Option<u32>)> = Vec::new();
    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let cols: Vec<&str> = line.split(',').collect();
        if cols.len() < 3 {
            return Err(TopologyError::InvalidLine(line.to_string()).into());
        }
        let nodea = parse_field(line, cols[0])?;
        let nodeb = parse_field(line, cols[1])?;
        let metric = parse_field(line, cols[2])?;
        let reverse_metric =
            if cols.len() > 3 { Some(parse_field(line, cols[3])?) } else { None };
        if nodea > MAX_NODE_ID {
            return Err(TopologyError::NodeIdOutOfRange(nodea).into());
        }
        if nodeb > MAX_NODE_ID {
            return Err(TopologyError::NodeIdOutOfRange(nodeb).into());
        }
        node_id_set.insert(nodea);
        node_id_set.insert(nodeb);
        links.push((nodea, nodeb, metric, reverse_metric));
    }
    for node_id in node_id_set {
        topo.add_node(node_id)?;
    }
    for (a, b, metric, reverse_metric) in links {
        topo.add_link(a, b, metric, reverse_metric)?;
    }
    Ok(topo)
}

/// Read the topology from `<base>.csv`.
pub fn read_topology<P: AsRef<Path>>(base: P) -> Result<Topology, Error> {
    let filename = base.as_ref().with_extension("csv");
    debug!("Reading topology from {:?}", filename);
    parse_topology(&fs::read_to_string(filename)?)
}

/// Apply profile memberships from the contents of a `.profile` file. The file becomes the only
/// source of truth: routers it does not mention end up without any profile.
pub fn parse_profiles(topo: &mut Topology, content: &str) -> Result<(), Error> {
    topo.clear_profile_ids();
    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let cols: Vec<&str> = line.split(',').collect();
        if cols.len() < 2 {
            return Err(TopologyError::InvalidLine(line.to_string()).into());
        }
        let node_id = parse_field(line, cols[0])?;
        let profile_id = parse_field(line, cols[1])?;
        topo.add_profile_id(node_id, profile_id)?;
    }
    Ok(())
}

/// Apply `<base>.profile` if it exists; a missing file leaves every router in profile 0.
pub fn apply_profile_file<P: AsRef<Path>>(topo: &mut Topology, base: P) -> Result<(), Error> {
    let filename = base.as_ref().with_extension("profile");
    if !filename.exists() {
        debug!("No profile file {:?}, all routers stay in profile 0", filename);
        return Ok(());
    }
    parse_profiles(topo, &fs::read_to_string(filename)?)
}

/// Apply prefix advertisements from the contents of a `.prefix` file. Lines with a prefix
/// identifier outside 2000..=2999 are skipped with a logged message.
pub fn parse_prefixes(topo: &mut Topology, content: &str) -> Result<(), Error> {
    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let cols: Vec<&str> = line.split(',').collect();
        if cols.len() < 3 {
            return Err(TopologyError::InvalidLine(line.to_string()).into());
        }
        let prefix_id = parse_field(line, cols[0])?;
        if !(MIN_PREFIX_ID..=MAX_PREFIX_ID).contains(&prefix_id) {
            warn!(
                "Skipping prefix line {:?}: prefix id must be between {} and {}",
                line, MIN_PREFIX_ID, MAX_PREFIX_ID
            );
            continue;
        }
        let node_id = parse_field(line, cols[1])?;
        let prefix_cost = parse_field(line, cols[2])?;
        topo.add_prefix_advertisement(prefix_id, node_id, prefix_cost)?;
    }
    Ok(())
}

/// Apply `<base>.prefix` if it exists; a missing file simply means no explicit prefixes.
pub fn apply_prefix_file<P: AsRef<Path>>(topo: &mut Topology, base: P) -> Result<(), Error> {
    let filename = base.as_ref().with_extension("prefix");
    if !filename.exists() {
        debug!("No prefix file {:?}", filename);
        return Ok(());
    }
    parse_prefixes(topo, &fs::read_to_string(filename)?)
}
