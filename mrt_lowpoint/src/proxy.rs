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

//! # Named proxy nodes
//!
//! Prefixes advertised outside the MRT island (or by several routers at once) become virtual
//! destinations attached to the GADAG through up to two Proxy Node Attachment Routers (PNARs):
//! in-island advertisers, or island border routers that can hand the traffic to a Loop-Free
//! Island Neighbour (LFIN) whose shortest path to the advertiser stays clear of the island.

use crate::alternates::{
    choose_red_or_blue, parallel_cutlink_candidates, select_alternates, AltChoice, AltInfo,
    Alternate, Fec, Protection,
};
use crate::spf::island_marking_spf;
use crate::topology::types::{IntfId, LinkMetric, NodeId, PrefixId, RouterId, MAX_METRIC};
use crate::topology::Topology;
use log::*;
use rand::prelude::*;
use std::collections::HashMap;

/// A candidate attachment router of a named proxy: either an in-island advertiser of the
/// prefix, or an island border router together with its best LFIN hand-off.
#[derive(Debug, Clone)]
pub struct PnarCandidate {
    /// The attachment router itself
    pub(crate) node: RouterId,
    /// Cost of reaching the prefix through this attachment
    pub(crate) named_proxy_cost: LinkMetric,
    /// The LFIN the traffic is handed to, for border-router attachments
    pub(crate) min_lfin: Option<RouterId>,
    /// Minimum-metric interface bundle from the border router to the LFIN
    pub(crate) nh_intf_list: Vec<IntfId>,
}

/// A virtual destination representing a prefix advertised by one or more routers.
#[derive(Debug, Clone)]
pub struct NamedProxyNode {
    /// The prefix identifier, doubling as the proxy's node number (2000..=2999 or
    /// `node_id + 1000` for implicit prefixes)
    pub(crate) node_id: PrefixId,
    /// Advertising routers with their advertisement cost
    pub(crate) node_prefix_cost_list: Vec<(RouterId, LinkMetric)>,
    /// Loop-free island neighbours able to reach the prefix without transiting the island
    pub(crate) lfin_list: Vec<(RouterId, LinkMetric)>,
    /// Cheapest attachment router
    pub(crate) pnar1: Option<PnarCandidate>,
    /// Second-cheapest attachment router on a different node
    pub(crate) pnar2: Option<PnarCandidate>,
    /// The attachment pair ordered by router number (X carries the lower number)
    pub(crate) pnar_x: Option<RouterId>,
    /// The attachment pair ordered by router number (Y carries the higher number)
    pub(crate) pnar_y: Option<RouterId>,
    /// Blue MRT next-hops of the current source towards this proxy
    pub(crate) blue_next_hops: Vec<IntfId>,
    /// Red MRT next-hops of the current source towards this proxy
    pub(crate) red_next_hops: Vec<IntfId>,
    /// Primary next-hops of the current source towards this proxy
    pub(crate) primary_next_hops: Vec<IntfId>,
    /// Alternates of the current source towards this proxy
    pub(crate) alt_list: Vec<Alternate>,
}

impl NamedProxyNode {
    fn new(node_id: PrefixId) -> Self {
        Self {
            node_id,
            node_prefix_cost_list: Vec::new(),
            lfin_list: Vec::new(),
            pnar1: None,
            pnar2: None,
            pnar_x: None,
            pnar_y: None,
            blue_next_hops: Vec::new(),
            red_next_hops: Vec::new(),
            primary_next_hops: Vec::new(),
            alt_list: Vec::new(),
        }
    }

    /// Returns the prefix identifier of this proxy.
    pub fn prefix_id(&self) -> PrefixId {
        self.node_id
    }

    /// Returns the chosen attachment routers, cheapest first.
    pub fn attachment_routers(&self) -> Vec<RouterId> {
        self.pnar1.iter().chain(self.pnar2.iter()).map(|p| p.node).collect()
    }
}

fn sorted_prefixes(topo: &Topology) -> Vec<PrefixId> {
    let mut prefixes: Vec<PrefixId> = topo.named_proxy_dict.keys().copied().collect();
    prefixes.sort_unstable();
    prefixes
}

/// Create one named proxy per advertised prefix, collecting all advertising routers. The
/// routers are scanned in node-number order and their prefixes in prefix order, so the
/// advertiser lists are reproducible.
pub(crate) fn create_basic_named_proxy_nodes(topo: &mut Topology) {
    for r in topo.routers() {
        let mut prefixes: Vec<(PrefixId, LinkMetric)> =
            topo.node(r).prefix_cost_dict.iter().map(|(p, c)| (*p, *c)).collect();
        prefixes.sort_unstable();
        for (prefix, prefix_cost) in prefixes {
            let proxy = topo
                .named_proxy_dict
                .entry(prefix)
                .or_insert_with(|| NamedProxyNode::new(prefix));
            proxy.node_prefix_cost_list.push((r, prefix_cost));
        }
    }
}

/// Attach every named proxy to the GADAG: find the loop-free island neighbours per prefix,
/// the best LFIN hand-off per island border router, and finally the two cheapest attachment
/// routers.
pub(crate) fn attach_named_proxy_nodes(topo: &mut Topology) {
    compute_loop_free_island_neighbors(topo);
    let ibr_tables = compute_island_border_router_lfin_pairs(topo);
    choose_proxy_node_attachment_routers(topo, &ibr_tables);
}

/// Compute, per prefix, the island neighbours whose shortest path to the cheapest advertiser
/// does not transit the MRT island.
fn compute_loop_free_island_neighbors(topo: &mut Topology) {
    topo.island_nbr_set.clear();
    topo.island_border_set.clear();
    for r in topo.routers() {
        if topo.node(r).state.in_mrt_island {
            continue;
        }
        for intf_id in topo.node(r).intf_list.clone() {
            let remote = topo.intf(intf_id).remote_node;
            if topo.node(remote).state.in_mrt_island {
                topo.island_nbr_set.insert(r);
                topo.island_border_set.insert(remote);
            }
        }
    }

    let mut nbr_list: Vec<RouterId> = topo.island_nbr_set.iter().copied().collect();
    nbr_list.sort_by_key(|r| topo.node(*r).node_id);
    let mut marking: HashMap<RouterId, HashMap<NodeId, (LinkMetric, bool)>> = HashMap::new();
    for nbr in nbr_list.iter().copied() {
        let m = island_marking_spf(topo, nbr);
        marking.insert(nbr, m);
    }

    for prefix in sorted_prefixes(topo) {
        let advertisers = topo.named_proxy_dict[&prefix].node_prefix_cost_list.clone();
        let mut lfin_list: Vec<(RouterId, LinkMetric)> = Vec::new();
        for nbr in nbr_list.iter().copied() {
            let mut min_cost_and_hits: Option<(LinkMetric, bool)> = None;
            for (adv_node, prefix_cost) in advertisers.iter() {
                let adv_node_id = topo.node(*adv_node).node_id;
                let (adv_cost, path_hits_island) = match marking[&nbr].get(&adv_node_id) {
                    Some(entry) => *entry,
                    None => continue,
                };
                let cost = adv_cost.saturating_add(*prefix_cost);
                min_cost_and_hits = match min_cost_and_hits {
                    None => Some((cost, path_hits_island)),
                    Some((min_cost, _)) if cost < min_cost => Some((cost, path_hits_island)),
                    Some((min_cost, min_hits)) if cost == min_cost => {
                        Some((min_cost, min_hits || path_hits_island))
                    }
                    keep => keep,
                };
            }
            if let Some((cost, false)) = min_cost_and_hits {
                lfin_list.push((nbr, cost));
            }
        }
        if let Some(p) = topo.named_proxy_dict.get_mut(&prefix) {
            p.lfin_list = lfin_list;
        }
    }
}

#[derive(Debug, Clone)]
struct IbrPrefixLfin {
    min_lfin: Option<RouterId>,
    cost: LinkMetric,
    nh_intf_list: Vec<IntfId>,
}

/// Compute, per island border router and prefix, the LFIN minimising the total hand-off cost,
/// together with the minimum-metric interface bundle towards that LFIN.
fn compute_island_border_router_lfin_pairs(
    topo: &mut Topology,
) -> HashMap<RouterId, HashMap<PrefixId, IbrPrefixLfin>> {
    let mut ibr_list: Vec<RouterId> = topo.island_border_set.iter().copied().collect();
    ibr_list.sort_by_key(|r| topo.node(*r).node_id);

    let mut tables: HashMap<RouterId, HashMap<PrefixId, IbrPrefixLfin>> = HashMap::new();
    for ibr in ibr_list {
        let mut min_intf_metric: HashMap<RouterId, LinkMetric> = HashMap::new();
        let mut min_intf_list: HashMap<RouterId, Vec<IntfId>> = HashMap::new();
        for intf_id in topo.node(ibr).intf_list.clone() {
            let remote = topo.intf(intf_id).remote_node;
            if !topo.island_nbr_set.contains(&remote) {
                continue;
            }
            let metric = topo.intf(intf_id).metric;
            match min_intf_metric.get(&remote) {
                None => {
                    min_intf_metric.insert(remote, metric);
                    min_intf_list.insert(remote, vec![intf_id]);
                }
                Some(min) if metric < *min => {
                    min_intf_metric.insert(remote, metric);
                    min_intf_list.insert(remote, vec![intf_id]);
                }
                Some(min) if metric == *min => {
                    if let Some(l) = min_intf_list.get_mut(&remote) {
                        l.push(intf_id);
                    }
                }
                Some(_) => {}
            }
        }

        let mut prefix_lfin: HashMap<PrefixId, IbrPrefixLfin> = HashMap::new();
        for prefix in sorted_prefixes(topo) {
            let mut min_cost = MAX_METRIC;
            let mut min_lfin: Option<RouterId> = None;
            for (lfin, lfin_to_pref_cost) in topo.named_proxy_dict[&prefix].lfin_list.iter() {
                let intf_metric = match min_intf_metric.get(lfin) {
                    Some(m) => *m,
                    None => continue,
                };
                let cost = intf_metric.saturating_add(*lfin_to_pref_cost);
                if cost < min_cost {
                    min_cost = cost;
                    min_lfin = Some(*lfin);
                }
            }
            let nh_intf_list = min_lfin
                .and_then(|l| min_intf_list.get(&l).cloned())
                .unwrap_or_default();
            prefix_lfin.insert(prefix, IbrPrefixLfin { min_lfin, cost: min_cost, nh_intf_list });
        }
        tables.insert(ibr, prefix_lfin);
    }
    tables
}

/// Pick, per prefix, the two cheapest attachment routers on distinct nodes among the in-island
/// advertisers and the LFIN-capable border routers.
fn choose_proxy_node_attachment_routers(
    topo: &mut Topology,
    ibr_tables: &HashMap<RouterId, HashMap<PrefixId, IbrPrefixLfin>>,
) {
    let mut ibr_list: Vec<RouterId> = topo.island_border_set.iter().copied().collect();
    ibr_list.sort_by_key(|r| topo.node(*r).node_id);

    for prefix in sorted_prefixes(topo) {
        let mut pnar_candidate_list: Vec<PnarCandidate> = Vec::new();
        for (node, prefix_cost) in topo.named_proxy_dict[&prefix].node_prefix_cost_list.clone() {
            if !topo.node(node).state.in_mrt_island {
                continue;
            }
            pnar_candidate_list.push(PnarCandidate {
                node,
                named_proxy_cost: prefix_cost,
                min_lfin: None,
                nh_intf_list: Vec::new(),
            });
        }
        for ibr in ibr_list.iter().copied() {
            let entry = match ibr_tables.get(&ibr).and_then(|t| t.get(&prefix)) {
                Some(e) => e,
                None => continue,
            };
            if entry.min_lfin.is_none() {
                continue;
            }
            pnar_candidate_list.push(PnarCandidate {
                node: ibr,
                named_proxy_cost: entry.cost,
                min_lfin: entry.min_lfin,
                nh_intf_list: entry.nh_intf_list.clone(),
            });
        }
        pnar_candidate_list.sort_by_key(|p| {
            (p.named_proxy_cost, topo.node(p.node).node_id, p.min_lfin.is_some())
        });

        let mut candidates = pnar_candidate_list.into_iter();
        let first_pnar = candidates.next();
        let second_pnar = match &first_pnar {
            Some(first) => candidates.find(|c| c.node != first.node),
            None => None,
        };
        if first_pnar.is_none() {
            warn!("Prefix {} has no attachment router at all", prefix);
        }
        if let Some(p) = topo.named_proxy_dict.get_mut(&prefix) {
            p.pnar1 = first_pnar;
            p.pnar2 = second_pnar;
        }
    }
}

/// Colour of the next-hop set taken from one attachment router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Blue,
    Red,
}

fn pick_next_hops(topo: &Topology, node: RouterId, color: Color) -> Vec<IntfId> {
    match color {
        Color::Blue => topo.node(node).state.blue_next_hops.clone(),
        Color::Red => topo.node(node).state.red_next_hops.clone(),
    }
}

/// The proxy next-hop table: with X/Y the node-number-ordered attachment pair and A/B their
/// order proxies, decide which colour of X feeds the proxy's blue set and which colour of Y
/// feeds its red set, based on the position of A and B relative to the source's block root.
fn proxy_nh_case(topo: &Topology, a: RouterId, b: RouterId, s: RouterId) -> (Color, Color) {
    let s_localroot = topo.node(s).state.localroot;
    let a_is_localroot = Some(a) == s_localroot;
    let b_is_localroot = Some(b) == s_localroot;
    let (a_lower, a_higher, a_topo) = {
        let st = &topo.node(a).state;
        (st.lower, st.higher, st.topo_order)
    };
    let (b_lower, b_higher, b_topo) = {
        let st = &topo.node(b).state;
        (st.lower, st.higher, st.topo_order)
    };
    if a_is_localroot && b_is_localroot {
        (Color::Blue, Color::Red)
    } else if a_is_localroot {
        if b_lower {
            (Color::Blue, Color::Red)
        } else if b_higher {
            (Color::Red, Color::Blue)
        } else {
            (Color::Red, Color::Red)
        }
    } else if b_is_localroot {
        if a_lower {
            (Color::Red, Color::Blue)
        } else if a_higher {
            (Color::Blue, Color::Red)
        } else {
            (Color::Red, Color::Red)
        }
    } else if topo.node(a).state.localroot == Some(s) || topo.node(b).state.localroot == Some(s) {
        if a_topo < b_topo {
            (Color::Blue, Color::Red)
        } else {
            (Color::Red, Color::Blue)
        }
    } else if a_lower {
        if b_higher {
            (Color::Red, Color::Blue)
        } else if b_lower {
            if a_topo < b_topo {
                (Color::Blue, Color::Red)
            } else {
                (Color::Red, Color::Blue)
            }
        } else {
            (Color::Red, Color::Red)
        }
    } else if a_higher {
        if b_higher {
            if a_topo < b_topo {
                (Color::Blue, Color::Red)
            } else {
                (Color::Red, Color::Blue)
            }
        } else if b_lower {
            (Color::Blue, Color::Red)
        } else {
            (Color::Blue, Color::Blue)
        }
    } else if b_lower {
        (Color::Red, Color::Red)
    } else if b_higher {
        (Color::Blue, Color::Blue)
    } else if a_topo < b_topo {
        (Color::Blue, Color::Red)
    } else {
        (Color::Red, Color::Blue)
    }
}

/// Apply the proxy next-hop table to a prefix with two attachment routers, filling the proxy's
/// blue and red sets and recording the node-number-ordered X/Y pair.
fn select_proxy_node_nhs(topo: &mut Topology, prefix: PrefixId, s: RouterId) {
    let (n1, n2) = match (&topo.named_proxy_dict[&prefix].pnar1, &topo.named_proxy_dict[&prefix].pnar2)
    {
        (Some(p1), Some(p2)) => (p1.node, p2.node),
        _ => return,
    };
    let (x, y) = if topo.node(n1).node_id < topo.node(n2).node_id { (n1, n2) } else { (n2, n1) };
    let a = topo.order_proxy_of(x);
    let b = topo.order_proxy_of(y);
    let (color_x, color_y) = proxy_nh_case(topo, a, b, s);
    let blue = pick_next_hops(topo, x, color_x);
    let red = pick_next_hops(topo, y, color_y);
    if let Some(p) = topo.named_proxy_dict.get_mut(&prefix) {
        p.pnar_x = Some(x);
        p.pnar_y = Some(y);
        p.blue_next_hops = blue;
        p.red_next_hops = red;
    }
}

/// Compute the blue and red next-hops of source `s` towards every named proxy. A proxy with a
/// single attachment inherits that router's MRTs; a proxy with two attachments goes through the
/// next-hop table. When the source itself is an attachment router, the empty colour(s) are
/// redirected over the LFIN hand-off bundle and flagged as leaving the island.
pub(crate) fn compute_mrt_nhs_for_one_src_to_named_proxy_nodes(topo: &mut Topology, s: RouterId) {
    for prefix in sorted_prefixes(topo) {
        let pnar1 = topo.named_proxy_dict[&prefix].pnar1.clone();
        let pnar2 = topo.named_proxy_dict[&prefix].pnar2.clone();
        let proxy_node_id = topo.named_proxy_dict[&prefix].node_id;
        match (pnar1, pnar2) {
            (None, _) => {
                // no attachment at all; leave the next-hop sets empty
                if let Some(p) = topo.named_proxy_dict.get_mut(&prefix) {
                    p.blue_next_hops = Vec::new();
                    p.red_next_hops = Vec::new();
                }
            }
            (Some(p1), None) => {
                if s == p1.node {
                    // the only attachment router itself forwards over the LFIN hand-off
                    if let Some(p) = topo.named_proxy_dict.get_mut(&prefix) {
                        p.blue_next_hops = p1.nh_intf_list.clone();
                        p.red_next_hops = p1.nh_intf_list.clone();
                    }
                    let results = &mut topo.node_mut(s).results;
                    results.blue_to_green_nh_set.insert(proxy_node_id);
                    results.red_to_green_nh_set.insert(proxy_node_id);
                } else {
                    let blue = topo.node(p1.node).state.blue_next_hops.clone();
                    let red = topo.node(p1.node).state.red_next_hops.clone();
                    if let Some(p) = topo.named_proxy_dict.get_mut(&prefix) {
                        p.blue_next_hops = blue;
                        p.red_next_hops = red;
                    }
                }
            }
            (Some(p1), Some(p2)) => {
                select_proxy_node_nhs(topo, prefix, s);
                let this_pnar = if s == p1.node {
                    p1
                } else if s == p2.node {
                    p2
                } else {
                    continue;
                };
                let (blue_empty, red_empty) = {
                    let p = &topo.named_proxy_dict[&prefix];
                    (p.blue_next_hops.is_empty(), p.red_next_hops.is_empty())
                };
                if blue_empty {
                    if let Some(p) = topo.named_proxy_dict.get_mut(&prefix) {
                        p.blue_next_hops = this_pnar.nh_intf_list.clone();
                    }
                    topo.node_mut(s).results.blue_to_green_nh_set.insert(proxy_node_id);
                }
                if red_empty {
                    if let Some(p) = topo.named_proxy_dict.get_mut(&prefix) {
                        p.red_next_hops = this_pnar.nh_intf_list.clone();
                    }
                    topo.node_mut(s).results.red_to_green_nh_set.insert(proxy_node_id);
                }
            }
        }
    }
}

/// Compute the primary next-hops of the current source towards every proxy: the advertiser
/// minimising (shortest-path metric + advertisement cost), with equal-cost unions.
pub(crate) fn compute_primary_nhs_for_one_src_to_named_proxy_nodes(topo: &mut Topology) {
    for prefix in sorted_prefixes(topo) {
        let advertisers = topo.named_proxy_dict[&prefix].node_prefix_cost_list.clone();
        let mut min_total_pref_cost = MAX_METRIC;
        let mut primary_next_hops: Vec<IntfId> = Vec::new();
        for (adv_node, prefix_cost) in advertisers {
            let metric = topo.node(adv_node).state.primary_spf_metric;
            let total = metric.saturating_add(prefix_cost);
            if total < min_total_pref_cost {
                min_total_pref_cost = total;
                primary_next_hops = topo.node(adv_node).state.primary_next_hops.clone();
            } else if total == min_total_pref_cost {
                for nh_intf in topo.node(adv_node).state.primary_next_hops.clone() {
                    if !primary_next_hops.contains(&nh_intf) {
                        primary_next_hops.push(nh_intf);
                    }
                }
            }
        }
        if let Some(p) = topo.named_proxy_dict.get_mut(&prefix) {
            p.primary_next_hops = primary_next_hops;
        }
    }
}

/// Resolve the expected (X, Y) alternate pattern of one proxy table case: both matching means
/// either colour works, a single match picks the colour that still reaches its attachment.
fn resolve_pnar_alts(ax: AltInfo, ay: AltInfo, expect_x: AltChoice, expect_y: AltChoice) -> AltInfo {
    let ex: AltInfo = expect_x.into();
    let ey: AltInfo = expect_y.into();
    if ax == ex && ay == ey {
        AltInfo::UseRedOrBlue
    } else if ax == ex {
        AltInfo::UseBlue
    } else if ay == ey {
        AltInfo::UseRed
    } else {
        debug_assert!(false, "unreachable proxy decision-table arm");
        warn!("Unreachable proxy decision-table arm hit, degrading to USE_RED_OR_BLUE");
        AltInfo::UseRedOrBlue
    }
}

/// The proxy alternate decision table: classify the failure of `primary_intf` towards F on the
/// way to proxy P, layered over the plain decision table applied to both attachment routers.
pub(crate) fn select_alternates_proxy_node(
    topo: &Topology,
    prefix: PrefixId,
    f: RouterId,
    primary_intf: IntfId,
) -> AltInfo {
    let s = topo.intf(primary_intf).local_node;
    let p = &topo.named_proxy_dict[&prefix];
    let (x, y) = match (p.pnar_x, p.pnar_y) {
        (Some(x), Some(y)) => (x, y),
        _ => {
            warn!("Proxy {} alternates requested without an attachment pair", prefix);
            return AltInfo::UseRedOrBlue;
        }
    };
    let a = topo.order_proxy_of(x);
    let b = topo.order_proxy_of(y);
    if f == a && f == b {
        return AltInfo::PrimaryIsBothAttachRouters;
    }
    if f == a {
        return AltInfo::UseRed;
    }
    if f == b {
        return AltInfo::UseBlue;
    }
    if !topo.in_common_block(a, b) {
        if topo.in_common_block(f, a) {
            return AltInfo::UseRed;
        } else if topo.in_common_block(f, b) {
            return AltInfo::UseBlue;
        } else {
            return AltInfo::UseRedOrBlue;
        }
    }
    if !topo.in_common_block(f, a) && !topo.in_common_block(f, b) {
        return AltInfo::UseRedOrBlue;
    }

    let alt_to_x = select_alternates(topo, x, f, primary_intf);
    let alt_to_y = select_alternates(topo, y, f, primary_intf);

    if alt_to_x == AltInfo::UseRedOrBlue && alt_to_y == AltInfo::UseRedOrBlue {
        return AltInfo::UseRedOrBlue;
    }
    if alt_to_x == AltInfo::UseRedOrBlue {
        return AltInfo::UseBlue;
    }
    if alt_to_y == AltInfo::UseRedOrBlue {
        return AltInfo::UseRed;
    }

    let s_localroot = topo.node(s).state.localroot;
    let a_is_localroot = Some(a) == s_localroot;
    let b_is_localroot = Some(b) == s_localroot;
    let (a_lower, a_higher, a_topo) = {
        let st = &topo.node(a).state;
        (st.lower, st.higher, st.topo_order)
    };
    let (b_lower, b_higher, b_topo) = {
        let st = &topo.node(b).state;
        (st.lower, st.higher, st.topo_order)
    };
    let (f_lower, f_higher, f_topo) = {
        let st = &topo.node(f).state;
        (st.lower, st.higher, st.topo_order)
    };

    if a_is_localroot && b_is_localroot {
        resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseBlue, AltChoice::UseRed)
    } else if a_is_localroot {
        if b_lower {
            resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseBlue, AltChoice::UseRed)
        } else if b_higher {
            resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseRed, AltChoice::UseBlue)
        } else {
            resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseRed, AltChoice::UseRed)
        }
    } else if b_is_localroot {
        if a_lower {
            resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseRed, AltChoice::UseBlue)
        } else if a_higher {
            resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseBlue, AltChoice::UseRed)
        } else {
            resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseRed, AltChoice::UseRed)
        }
    } else if topo.node(a).state.localroot == Some(s) || topo.node(b).state.localroot == Some(s) {
        if a_topo < b_topo {
            resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseBlue, AltChoice::UseRed)
        } else {
            resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseRed, AltChoice::UseBlue)
        }
    } else if a_lower {
        if b_higher {
            resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseRed, AltChoice::UseBlue)
        } else if b_lower {
            if a_topo < b_topo {
                resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseBlue, AltChoice::UseRed)
            } else {
                resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseRed, AltChoice::UseBlue)
            }
        } else if f_lower && !f_higher && f_topo > a_topo {
            AltInfo::UseRed
        } else {
            AltInfo::UseBlue
        }
    } else if a_higher {
        if b_higher {
            if a_topo < b_topo {
                resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseBlue, AltChoice::UseRed)
            } else {
                resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseRed, AltChoice::UseBlue)
            }
        } else if b_lower {
            resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseBlue, AltChoice::UseRed)
        } else if f_higher && !f_lower && f_topo < a_topo {
            AltInfo::UseRed
        } else {
            AltInfo::UseBlue
        }
    } else if b_lower {
        if f_lower && !f_higher && f_topo > b_topo {
            AltInfo::UseBlue
        } else {
            AltInfo::UseRed
        }
    } else if b_higher {
        if f_higher && !f_lower && f_topo < b_topo {
            AltInfo::UseBlue
        } else {
            AltInfo::UseRed
        }
    } else if a_topo < b_topo {
        resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseBlue, AltChoice::UseRed)
    } else {
        resolve_pnar_alts(alt_to_x, alt_to_y, AltChoice::UseRed, AltChoice::UseBlue)
    }
}

/// Compute the alternates of source `src` towards every named proxy.
pub(crate) fn select_alts_for_one_src_to_named_proxy_nodes(
    topo: &mut Topology,
    src: RouterId,
    rng: &mut StdRng,
) {
    for prefix in sorted_prefixes(topo) {
        let (pnar1, pnar2, primary_next_hops, proxy_blue, proxy_red, proxy_node_id) = {
            let p = &topo.named_proxy_dict[&prefix];
            (
                p.pnar1.clone(),
                p.pnar2.clone(),
                p.primary_next_hops.clone(),
                p.blue_next_hops.clone(),
                p.red_next_hops.clone(),
                p.node_id,
            )
        };
        let mut alt_list: Vec<Alternate> = Vec::new();
        for failed_intf in primary_next_hops {
            let f = topo.intf(failed_intf).remote_node;
            let in_island = topo.node(src).state.island_intf_list.contains(&failed_intf);
            let info = if !in_island {
                AltInfo::PrimaryNotInIsland
            } else if pnar1.is_none() {
                AltInfo::NoAttachmentRouters
            } else if Some(src) == pnar1.as_ref().map(|p| p.node)
                || Some(src) == pnar2.as_ref().map(|p| p.node)
            {
                AltInfo::SourceIsAttachRouter
            } else if pnar2.is_none() {
                // inherit alternates from the only attachment router
                match &pnar1 {
                    Some(p1) => select_alternates(topo, p1.node, f, failed_intf),
                    None => AltInfo::NoAttachmentRouters,
                }
            } else {
                select_alternates_proxy_node(topo, prefix, f, failed_intf)
            };

            let mut alt = Alternate::new(failed_intf, info);
            if info == AltInfo::UseRedOrBlue {
                alt.red_or_blue = Some(choose_red_or_blue(rng));
            }
            if info == AltInfo::UseBlue || alt.red_or_blue == Some(AltChoice::UseBlue) {
                alt.nh_list = proxy_blue.iter().map(|i| Some(*i)).collect();
                alt.fec = Fec::Blue;
                alt.prot = Protection::NodeProtection;
            } else if info == AltInfo::UseRed || alt.red_or_blue == Some(AltChoice::UseRed) {
                alt.nh_list = proxy_red.iter().map(|i| Some(*i)).collect();
                alt.fec = Fec::Red;
                alt.prot = Protection::NodeProtection;
            } else if info == AltInfo::PrimaryIsDestination
                || info == AltInfo::PrimaryIsBothAttachRouters
            {
                if topo.intf(failed_intf).is_cut_link() {
                    let cand = parallel_cutlink_candidates(topo, src, failed_intf);
                    if cand != vec![None] {
                        alt.fec = Fec::Green;
                        alt.prot = Protection::ParallelCutlink;
                    } else {
                        alt.fec = Fec::NoAlternate;
                        alt.prot = Protection::NoProtection;
                    }
                    alt.nh_list = cand;
                } else {
                    // inherit from the cheapest attachment router when the failure is its
                    // order proxy, and from the proxy itself when it shadows both
                    let (z_blue, z_red) = if info == AltInfo::PrimaryIsDestination {
                        match &pnar1 {
                            Some(p1) => (
                                topo.node(p1.node).state.blue_next_hops.clone(),
                                topo.node(p1.node).state.red_next_hops.clone(),
                            ),
                            None => (Vec::new(), Vec::new()),
                        }
                    } else {
                        (proxy_blue.clone(), proxy_red.clone())
                    };
                    if z_red.contains(&failed_intf) {
                        alt.nh_list = z_blue.iter().map(|i| Some(*i)).collect();
                        alt.fec = Fec::Blue;
                        alt.prot = Protection::LinkProtection;
                    } else {
                        debug_assert!(z_blue.contains(&failed_intf));
                        alt.nh_list = z_red.iter().map(|i| Some(*i)).collect();
                        alt.fec = Fec::Red;
                        alt.prot = Protection::LinkProtection;
                    }
                }
            } else if info == AltInfo::PrimaryNotInIsland {
                let src_is_only_pnar =
                    pnar2.is_none() && Some(src) == pnar1.as_ref().map(|p| p.node);
                if pnar1.is_none() || src_is_only_pnar {
                    // the MRT island is singly connected to the destination
                    alt.fec = Fec::NoAlternate;
                    alt.prot = Protection::NoProtection;
                } else if topo.node(src).results.blue_to_green_nh_set.contains(&proxy_node_id) {
                    // blue exits over the failed LFIN hand-off, use red
                    alt.nh_list = proxy_red.iter().map(|i| Some(*i)).collect();
                    alt.fec = Fec::Red;
                    alt.prot = Protection::LinkProtection;
                } else if topo.node(src).results.red_to_green_nh_set.contains(&proxy_node_id) {
                    // red exits over the failed LFIN hand-off, use blue
                    alt.nh_list = proxy_blue.iter().map(|i| Some(*i)).collect();
                    alt.fec = Fec::Blue;
                    alt.prot = Protection::LinkProtection;
                } else {
                    alt.nh_list = proxy_blue.iter().map(|i| Some(*i)).collect();
                    alt.fec = Fec::Blue;
                    alt.prot = Protection::LinkProtection;
                }
            }
            alt_list.push(alt);
        }
        if let Some(p) = topo.named_proxy_dict.get_mut(&prefix) {
            p.alt_list = alt_list;
        }
    }
}

/// Store the current source's proxy blue and red next-hops into its accumulated result tables.
pub(crate) fn store_mrt_nhs_for_one_src_to_named_proxy_nodes(topo: &mut Topology, x: RouterId) {
    for prefix in sorted_prefixes(topo) {
        let (dest, blue, red) = {
            let p = &topo.named_proxy_dict[&prefix];
            (p.node_id, p.blue_next_hops.clone(), p.red_next_hops.clone())
        };
        let results = &mut topo.node_mut(x).results;
        results.blue_next_hops_dict.insert(dest, blue);
        results.red_next_hops_dict.insert(dest, red);
    }
}

/// Store the current source's proxy alternates into its accumulated result tables.
pub(crate) fn store_alts_for_one_src_to_named_proxy_nodes(topo: &mut Topology, x: RouterId) {
    for prefix in sorted_prefixes(topo) {
        let (dest, alts) = {
            let p = &topo.named_proxy_dict[&prefix];
            (p.node_id, p.alt_list.clone())
        };
        topo.node_mut(x).results.alt_dict.insert(dest, alts);
    }
}

/// Store the current source's proxy primary next-hops into its accumulated result tables.
pub(crate) fn store_primary_nhs_for_one_src_to_named_proxy_nodes(topo: &mut Topology, x: RouterId) {
    for prefix in sorted_prefixes(topo) {
        let (dest, pnh) = {
            let p = &topo.named_proxy_dict[&prefix];
            (p.node_id, p.primary_next_hops.clone())
        };
        topo.node_mut(x).results.pnh_dict.insert(dest, pnh);
    }
}
