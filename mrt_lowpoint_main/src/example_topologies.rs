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

//! The example topology of the algorithm draft, written out as input files so the program can
//! read them back in, exactly like a user-provided scenario.

use std::fs;
use std::io;

const EXAMPLE_LINKS: &[&str] = &[
    "1,2,10",
    "2,3,10",
    "3,4,11",
    "4,5,10,20",
    "5,6,10",
    "6,7,10",
    "6,7,10",
    "6,7,15",
    "7,1,10",
    "7,51,10",
    "51,52,10",
    "52,53,10",
    "53,3,10",
    "1,55,10",
    "55,6,10",
    "4,12,10",
    "12,13,10",
    "13,14,10",
    "14,15,10",
    "15,16,10",
    "16,17,10",
    "17,4,10",
    "5,76,10",
    "76,77,10",
    "77,78,10",
    "78,79,10",
    "79,77,10",
];

/// The profile file of the complex scenario: routers 52 and 53 are left out, so they fall
/// outside the MRT island.
const COMPLEX_PROFILES: &[&str] = &[
    "1,0", "2,0", "3,0", "4,0", "5,0", "6,0", "7,0", "51,0", "55,0", "12,0", "13,0", "14,0",
    "15,0", "16,0", "17,0", "76,0", "77,0", "78,0", "79,0",
];

/// The prefix file of the complex scenario: 2001 advertised from inside the island, 2003 from
/// both sides of the island border.
const COMPLEX_PREFIXES: &[&str] = &[
    "2001,5,100",
    "2001,7,120",
    "2001,3,130",
    "2002,13,100",
    "2002,15,110",
    "2003,52,100",
    "2003,78,100",
];

fn write_lines(filename: String, lines: &[&str]) -> io::Result<()> {
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(filename, content)
}

/// Write `<base>.csv` for the basic scenario.
pub fn write_basic_topology_input(base: &str) -> io::Result<()> {
    write_lines(format!("{}.csv", base), EXAMPLE_LINKS)
}

/// Write `<base>.csv`, `<base>.profile` and `<base>.prefix` for the complex scenario.
pub fn write_complex_topology_input(base: &str) -> io::Result<()> {
    write_lines(format!("{}.csv", base), EXAMPLE_LINKS)?;
    write_lines(format!("{}.profile", base), COMPLEX_PROFILES)?;
    write_lines(format!("{}.prefix", base), COMPLEX_PREFIXES)
}
