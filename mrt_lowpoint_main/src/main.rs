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

use mrt_lowpoint::compute::{
    run_basic_mrt_for_all_sources, run_mrt_for_all_sources, run_mrt_for_all_sources_parallel,
};
use mrt_lowpoint::io::{apply_prefix_file, apply_profile_file, read_topology, write_output_files};
use mrt_lowpoint::Topology;

use clap::{Parser, Subcommand};
use log::*;
use std::error::Error;

mod example_topologies;

#[derive(Parser, Debug)]
#[clap(name = "mrt_lowpoint_main", about = "Compute Maximally Redundant Trees for a topology")]
struct CommandLineArguments {
    #[clap(subcommand)]
    cmd: MainCommand,
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Generate the basic example topology, run the MRT computation for every source, and
    /// write the four result files.
    Basic {
        /// Base name of the generated input files
        #[clap(long, default_value = "basic_topo_input")]
        input: String,
        /// Prefix of the four output files
        #[clap(long, default_value = "basic_topo")]
        output: String,
        /// Seed for the USE_RED_OR_BLUE tie-break
        #[clap(long, default_value_t = 0)]
        seed: u64,
    },
    /// Generate the complex example scenario (profiles and prefixes on top of the same links)
    /// and run the full computation including named proxies.
    Complex {
        /// Base name of the generated input files
        #[clap(long, default_value = "complex_topo_input")]
        input: String,
        /// Prefix of the four output files
        #[clap(long, default_value = "complex_topo")]
        output: String,
        /// Seed for the USE_RED_OR_BLUE tie-break
        #[clap(long, default_value_t = 0)]
        seed: u64,
    },
    /// Run the full computation on a user-provided topology (`<input>.csv`, with optional
    /// `<input>.profile` and `<input>.prefix` companions).
    Run {
        /// Base name of the input files
        input: String,
        /// The designated test GADAG root; outputs are restricted to its island
        #[clap(long)]
        root: u32,
        /// Prefix of the four output files (defaults to the input base name)
        #[clap(long)]
        output: Option<String>,
        /// Seed for the USE_RED_OR_BLUE tie-break
        #[clap(long, default_value_t = 0)]
        seed: u64,
        /// Partition the sources over this many worker threads
        #[clap(long)]
        threads: Option<usize>,
        /// Leave the root's GADAG election priority at the default instead of raising it
        #[clap(long)]
        no_root_priority: bool,
    },
}

fn prepare(input: &str, root: u32, raise_priority: bool) -> Result<Topology, Box<dyn Error>> {
    let mut topo = read_topology(input)?;
    apply_profile_file(&mut topo, input)?;
    apply_prefix_file(&mut topo, input)?;
    topo.set_test_gadag_root(root)?;
    topo.add_prefixes_for_non_island_nodes();
    if raise_priority {
        topo.raise_gadag_root_selection_priority(root)?;
    }
    Ok(topo)
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let args = CommandLineArguments::parse();

    match args.cmd {
        MainCommand::Basic { input, output, seed } => {
            example_topologies::write_basic_topology_input(&input)?;
            let mut topo = read_topology(&input)?;
            topo.set_test_gadag_root(3)?;
            topo.raise_gadag_root_selection_priority(3)?;
            info!("Running the basic MRT computation for {} routers", topo.num_nodes());
            run_basic_mrt_for_all_sources(&mut topo, seed);
            write_output_files(&topo, &output)?;
        }
        MainCommand::Complex { input, output, seed } => {
            example_topologies::write_complex_topology_input(&input)?;
            let mut topo = prepare(&input, 3, true)?;
            info!("Running the full MRT computation for {} routers", topo.num_nodes());
            run_mrt_for_all_sources(&mut topo, seed);
            write_output_files(&topo, &output)?;
        }
        MainCommand::Run { input, root, output, seed, threads, no_root_priority } => {
            let mut topo = prepare(&input, root, !no_root_priority)?;
            info!(
                "Running the full MRT computation for {} routers, rooted at {}",
                topo.num_nodes(),
                root
            );
            match threads {
                Some(n) if n > 1 => run_mrt_for_all_sources_parallel(&mut topo, seed, Some(n)),
                _ => run_mrt_for_all_sources(&mut topo, seed),
            }
            write_output_files(&topo, output.as_ref().unwrap_or(&input))?;
        }
    }
    Ok(())
}
