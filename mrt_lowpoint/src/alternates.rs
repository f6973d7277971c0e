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

//! # Alternate selection
//!
//! Given a destination D and a failed primary interface towards F, decide which MRT (blue or
//! red) survives the failure. The decision is a pure function of the HIGHER / LOWER /
//! topological-order relation of D's order proxy and of F with respect to the source, with a
//! designed fallback to an arbitrary colour when the primary interface was excluded from the
//! MRT computation. Arms that are unreachable for a correctly built GADAG abort in debug
//! builds and degrade to the arbitrary-colour choice in release builds.

use crate::spf::normal_spf;
use crate::topology::types::{IntfId, RouterId, MAX_METRIC};
use crate::topology::Topology;
use log::*;
use rand::prelude::*;
use std::fmt;

/// Forwarding equivalence class an alternate forwards into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fec {
    /// The blue MRT
    Blue,
    /// The red MRT
    Red,
    /// Plain shortest-path forwarding (used over parallel cut-links)
    Green,
    /// No alternate exists
    NoAlternate,
}

impl fmt::Display for Fec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blue => write!(f, "BLUE"),
            Self::Red => write!(f, "RED"),
            Self::Green => write!(f, "GREEN"),
            Self::NoAlternate => write!(f, "NO_ALTERNATE"),
        }
    }
}

/// Protection level an alternate provides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    /// The alternate avoids the failed router entirely
    NodeProtection,
    /// The alternate avoids the failed link, but not necessarily the router behind it
    LinkProtection,
    /// The alternate is a parallel cut-link to the same neighbour
    ParallelCutlink,
    /// Nothing protects this failure
    NoProtection,
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeProtection => write!(f, "NODE_PROTECTION"),
            Self::LinkProtection => write!(f, "LINK_PROTECTION"),
            Self::ParallelCutlink => write!(f, "PARALLEL_CUTLINK"),
            Self::NoProtection => write!(f, "NO_PROTECTION"),
        }
    }
}

/// Verdict of the decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltChoice {
    /// Forward over the blue MRT
    UseBlue,
    /// Forward over the red MRT
    UseRed,
    /// Both MRTs avoid the failure; pick one at random
    UseRedOrBlue,
}

/// Decision-rule label recorded on an alternate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltInfo {
    /// The blue MRT avoids the failure
    UseBlue,
    /// The red MRT avoids the failure
    UseRed,
    /// Either MRT avoids the failure
    UseRedOrBlue,
    /// The primary next-hop lies in a different block than the source
    PrimaryInDifferentBlock,
    /// The failed router is the destination itself (or its order proxy)
    PrimaryIsDestination,
    /// The failed router is the order proxy of both proxy attachment routers
    PrimaryIsBothAttachRouters,
    /// The primary next-hop towards a proxy leaves the MRT island
    PrimaryNotInIsland,
    /// The prefix has no attachment router at all
    NoAttachmentRouters,
    /// The source itself is an attachment router of the prefix
    SourceIsAttachRouter,
}

impl From<AltChoice> for AltInfo {
    fn from(c: AltChoice) -> Self {
        match c {
            AltChoice::UseBlue => Self::UseBlue,
            AltChoice::UseRed => Self::UseRed,
            AltChoice::UseRedOrBlue => Self::UseRedOrBlue,
        }
    }
}

/// An alternate next-hop protecting one primary interface towards one destination.
#[derive(Debug, Clone)]
pub struct Alternate {
    /// The protected primary interface
    pub(crate) failed_intf: IntfId,
    /// Interfaces to forward over instead; a single `None` entry records an explicit
    /// "no alternate exists"
    pub(crate) nh_list: Vec<Option<IntfId>>,
    /// Forwarding equivalence class of the chosen alternate
    pub(crate) fec: Fec,
    /// Protection level of the chosen alternate
    pub(crate) prot: Protection,
    /// The decision rule that produced this alternate
    pub(crate) info: AltInfo,
    /// Outcome of the random tie-break, when the decision was UseRedOrBlue
    pub(crate) red_or_blue: Option<AltChoice>,
}

impl Alternate {
    pub(crate) fn new(failed_intf: IntfId, info: AltInfo) -> Self {
        Self {
            failed_intf,
            nh_list: Vec::new(),
            fec: Fec::NoAlternate,
            prot: Protection::NoProtection,
            info,
            red_or_blue: None,
        }
    }

    /// Returns the protected primary interface.
    pub fn failed_intf(&self) -> IntfId {
        self.failed_intf
    }

    /// Returns the forwarding equivalence class of this alternate.
    pub fn fec(&self) -> Fec {
        self.fec
    }

    /// Returns the protection level of this alternate.
    pub fn protection(&self) -> Protection {
        self.prot
    }

    /// Returns the interfaces to forward over, `None` entries marking an absent alternate.
    pub fn nh_list(&self) -> &[Option<IntfId>] {
        &self.nh_list
    }
}

/// Check the designed escape hatch: the decision table may only fall through its ordered arms
/// when the primary interface was excluded from the MRT computation on either twin.
fn check_primary_ineligible(topo: &Topology, primary_intf: IntfId) {
    let twin = topo.intf(primary_intf).remote_intf;
    if !topo.intf(primary_intf).mrt_ineligible && !topo.intf(twin).mrt_ineligible {
        debug_assert!(false, "decision table fell through with an MRT-eligible primary");
        warn!("Decision table fell through with an MRT-eligible primary interface");
    }
}

fn impossible_arm() -> AltChoice {
    debug_assert!(false, "unreachable decision-table arm");
    warn!("Unreachable decision-table arm hit, degrading to USE_RED_OR_BLUE");
    AltChoice::UseRedOrBlue
}

/// The 16-row decision table for island destinations, parameterised by the order relation of
/// D's proxy (lower / higher / unordered and its topological order) and of the failed router F
/// with respect to the source.
pub(crate) fn select_alternates_internal(
    topo: &Topology,
    f: RouterId,
    primary_intf: IntfId,
    d_lower: bool,
    d_higher: bool,
    d_topo_order: u32,
) -> AltChoice {
    let f_state = &topo.node(f).state;
    let (f_higher, f_lower, f_topo_order) = (f_state.higher, f_state.lower, f_state.topo_order);
    let p_state = &topo.intf(primary_intf).state;
    if d_higher && d_lower {
        if f_higher && f_lower {
            if f_topo_order > d_topo_order {
                return AltChoice::UseBlue;
            }
            return AltChoice::UseRed;
        }
        if f_higher {
            return AltChoice::UseRed;
        }
        if f_lower {
            return AltChoice::UseBlue;
        }
        check_primary_ineligible(topo, primary_intf);
        AltChoice::UseRedOrBlue
    } else if d_higher {
        if f_higher && f_lower {
            return AltChoice::UseBlue;
        }
        if f_lower {
            return AltChoice::UseBlue;
        }
        if f_higher {
            if f_topo_order > d_topo_order {
                return AltChoice::UseBlue;
            }
            if f_topo_order < d_topo_order {
                return AltChoice::UseRed;
            }
            return impossible_arm();
        }
        check_primary_ineligible(topo, primary_intf);
        AltChoice::UseRedOrBlue
    } else if d_lower {
        if f_higher && f_lower {
            return AltChoice::UseRed;
        }
        if f_higher {
            return AltChoice::UseRed;
        }
        if f_lower {
            if f_topo_order > d_topo_order {
                return AltChoice::UseBlue;
            }
            if f_topo_order < d_topo_order {
                return AltChoice::UseRed;
            }
            return impossible_arm();
        }
        check_primary_ineligible(topo, primary_intf);
        AltChoice::UseRedOrBlue
    } else {
        // D is unordered with respect to the source
        if f_higher && f_lower {
            if p_state.outgoing && p_state.incoming {
                // the primary next-hop is a cut-link into a different block
                return AltChoice::UseRedOrBlue;
            }
            if p_state.outgoing {
                return AltChoice::UseBlue;
            }
            if p_state.incoming {
                return AltChoice::UseRed;
            }
            // with the lowpoint GADAG construction, red is safe even though an arbitrary
            // GADAG would guarantee neither colour
            check_primary_ineligible(topo, primary_intf);
            return AltChoice::UseRed;
        }
        if f_lower {
            return AltChoice::UseRed;
        }
        if f_higher {
            return AltChoice::UseBlue;
        }
        check_primary_ineligible(topo, primary_intf);
        if f_topo_order > d_topo_order {
            AltChoice::UseBlue
        } else {
            AltChoice::UseRed
        }
    }
}

/// Classify the failure of `primary_intf` towards F on the way from its local router to D, and
/// consult the decision table for the ordinary case.
pub(crate) fn select_alternates(
    topo: &Topology,
    d: RouterId,
    f: RouterId,
    primary_intf: IntfId,
) -> AltInfo {
    let s = topo.intf(primary_intf).local_node;
    if !topo.in_common_block(f, s) {
        return AltInfo::PrimaryInDifferentBlock;
    }
    if d == f || topo.order_proxy_of(d) == f {
        return AltInfo::PrimaryIsDestination;
    }
    let op = topo.order_proxy_of(d);
    let op_state = &topo.node(op).state;
    let (d_lower, d_higher, d_topo_order) = (op_state.lower, op_state.higher, op_state.topo_order);
    select_alternates_internal(topo, f, primary_intf, d_lower, d_higher, d_topo_order).into()
}

/// Remote-router membership test on a next-hop list. Interface identity is not enough here: an
/// MRT-ineligible primary interface never appears in the blue or red sets even though its
/// remote router does.
pub(crate) fn is_remote_node_in_nh_list(topo: &Topology, node: RouterId, nh_list: &[IntfId]) -> bool {
    nh_list.iter().any(|i| topo.intf(*i).remote_node == node)
}

/// Search the source's parallel island interfaces to the same neighbour for the lowest-metric
/// replacements of a failed cut-link. Returns the GREEN candidate list, or a single `None` when
/// the cut-link has no parallel companion.
pub(crate) fn parallel_cutlink_candidates(
    topo: &Topology,
    src: RouterId,
    failed_intf: IntfId,
) -> Vec<Option<IntfId>> {
    let failed_remote = topo.intf(failed_intf).remote_node;
    let mut cand_alt_list: Vec<Option<IntfId>> = vec![None];
    let mut min_metric = MAX_METRIC;
    for intf_id in topo.node(src).state.island_intf_list.iter().copied() {
        if intf_id == failed_intf || topo.intf(intf_id).remote_node != failed_remote {
            continue;
        }
        let metric = topo.intf(intf_id).metric;
        if metric < min_metric {
            cand_alt_list = vec![Some(intf_id)];
            min_metric = metric;
        } else if metric == min_metric {
            cand_alt_list.push(Some(intf_id));
        }
    }
    cand_alt_list
}

/// Resolve a UseRedOrBlue verdict with the injected random source.
pub(crate) fn choose_red_or_blue(rng: &mut StdRng) -> AltChoice {
    if rng.gen() {
        AltChoice::UseRed
    } else {
        AltChoice::UseBlue
    }
}

/// Compute the alternates of source `x` towards every island destination: run the normal SPF
/// for primaries, then protect every primary interface with the decision table (or the
/// cut-link rules when the failure is the destination itself).
pub(crate) fn select_alts_for_one_src_to_island_dests(
    topo: &mut Topology,
    x: RouterId,
    rng: &mut StdRng,
) {
    normal_spf(topo, x);
    for d in topo.island_node_list.clone() {
        topo.node_mut(d).state.alt_list = Vec::new();
        if d == x {
            continue;
        }
        for failed_intf in topo.node(d).state.primary_next_hops.clone() {
            let f = topo.intf(failed_intf).remote_node;
            // F must be tested for island membership (not the interface): the primary could
            // run over an MRT-ineligible interface towards an island router.
            let info = if topo.node(f).state.in_mrt_island {
                select_alternates(topo, d, f, failed_intf)
            } else {
                // the primary next-hop is not even in the GADAG, so either colour avoids it
                AltInfo::UseRedOrBlue
            };
            let mut alt = Alternate::new(failed_intf, info);
            if info == AltInfo::UseRedOrBlue {
                alt.red_or_blue = Some(choose_red_or_blue(rng));
            }
            if info == AltInfo::UseBlue || alt.red_or_blue == Some(AltChoice::UseBlue) {
                alt.nh_list =
                    topo.node(d).state.blue_next_hops.iter().map(|i| Some(*i)).collect();
                alt.fec = Fec::Blue;
                alt.prot = Protection::NodeProtection;
            }
            if info == AltInfo::UseRed || alt.red_or_blue == Some(AltChoice::UseRed) {
                alt.nh_list = topo.node(d).state.red_next_hops.iter().map(|i| Some(*i)).collect();
                alt.fec = Fec::Red;
                alt.prot = Protection::NodeProtection;
            }
            if info == AltInfo::PrimaryInDifferentBlock {
                alt.fec = Fec::NoAlternate;
                alt.prot = Protection::NoProtection;
            }
            if info == AltInfo::PrimaryIsDestination {
                if topo.intf(failed_intf).is_cut_link() {
                    let cand = parallel_cutlink_candidates(topo, x, failed_intf);
                    if cand != vec![None] {
                        alt.fec = Fec::Green;
                        alt.prot = Protection::ParallelCutlink;
                    } else {
                        alt.fec = Fec::NoAlternate;
                        alt.prot = Protection::NoProtection;
                    }
                    alt.nh_list = cand;
                } else if is_remote_node_in_nh_list(topo, f, &topo.node(d).state.red_next_hops) {
                    alt.nh_list =
                        topo.node(d).state.blue_next_hops.iter().map(|i| Some(*i)).collect();
                    alt.fec = Fec::Blue;
                    alt.prot = Protection::LinkProtection;
                } else {
                    if !is_remote_node_in_nh_list(topo, f, &topo.node(d).state.blue_next_hops) {
                        warn!("Failed router is on neither the blue nor the red next-hops");
                    }
                    alt.nh_list =
                        topo.node(d).state.red_next_hops.iter().map(|i| Some(*i)).collect();
                    alt.fec = Fec::Red;
                    alt.prot = Protection::LinkProtection;
                }
            }
            topo.node_mut(d).state.alt_list.push(alt);
        }
    }
}
