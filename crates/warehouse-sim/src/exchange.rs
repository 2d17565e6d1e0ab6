//! The load-balancing item exchange.
//!
//! A single synchronous round before planning: over-loaded agents each offer
//! one pending item, under-loaded agents bid on the offers they can afford,
//! and each offer's originator nominates one bidder.  There are no retries
//! and no atomicity across offers — a transfer whose item has already
//! vanished (an earlier transfer in the same round mutated the map) is
//! silently skipped rather than treated as an error.

use tracing::debug;

use warehouse_core::{
    AcceptStrategy, AgentId, NominateStrategy, Pos, RequestStrategy, SimConfig, SimRng,
};
use warehouse_map::MapIndex;
use warehouse_state::{AgentState, ItemMap};

/// One completed item hand-over.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub from: AgentId,
    pub to:   AgentId,
    pub item: Pos,
}

/// An agent's outstanding-work surrogate: the depot distance of every
/// pending item (weighted by count) plus the depot distance of the agent
/// itself when it is carrying.
///
/// Unreachable cells contribute nothing — an undeliverable item is dead
/// weight, not work.
pub fn agent_load(state: AgentState, items: &ItemMap, map: &MapIndex) -> f64 {
    let depot = map.depot();
    let mut load = 0.0;
    for (pos, count) in items.iter() {
        let d = map.dist(depot, pos);
        if d != u32::MAX {
            load += count as f64 * d as f64;
        }
    }
    if state.has_item {
        let d = map.dist(depot, state.pos);
        if d != u32::MAX {
            load += d as f64;
        }
    }
    load
}

struct Request {
    owner: usize,
    item:  Pos,
    dist:  u32,
}

/// Run one exchange round, mutating `items` and moving the matching units of
/// `items_count`.  Returns the transfers that actually happened.
pub fn run_exchange(
    states:      &[AgentState],
    items:       &mut [ItemMap],
    items_count: &mut [u64],
    map:         &MapIndex,
    cfg:         &SimConfig,
    rng:         &mut SimRng,
) -> Vec<Transfer> {
    let n = states.len();
    if n < 2 {
        return Vec::new();
    }
    let depot = map.depot();
    let loads: Vec<f64> = (0..n)
        .map(|i| agent_load(states[i], &items[i], map))
        .collect();
    let avg = loads.iter().sum::<f64>() / n as f64;

    // ── Request phase ─────────────────────────────────────────────────────
    //
    // Over-loaded agents offer one item whose removal keeps them at or above
    // the average (giving away more would just invert the imbalance).
    let mut requests: Vec<Request> = Vec::new();
    for i in 0..n {
        if loads[i] <= avg {
            continue;
        }
        let eligible: Vec<(Pos, u32)> = items[i]
            .iter()
            .filter_map(|(pos, _)| {
                let d = map.dist(depot, pos);
                (d != u32::MAX && loads[i] - d as f64 >= avg).then_some((pos, d))
            })
            .collect();
        if eligible.is_empty() {
            continue;
        }
        let (item, dist) = match cfg.request_strategy {
            RequestStrategy::NearestFromDepot => {
                *eligible.iter().min_by_key(|(pos, d)| (*d, *pos)).unwrap()
            }
            RequestStrategy::FarthestFromDepot => {
                *eligible.iter().max_by_key(|(pos, d)| (*d, *pos)).unwrap()
            }
            RequestStrategy::Random => eligible[rng.gen_range(0..eligible.len())],
        };
        requests.push(Request { owner: i, item, dist });
    }
    if requests.is_empty() {
        return Vec::new();
    }

    // ── Bid phase ─────────────────────────────────────────────────────────
    //
    // Under-loaded agents survey the offers that fit within their slack and
    // nominate exactly one.
    let mut bids: Vec<Vec<usize>> = vec![Vec::new(); requests.len()];
    for i in 0..n {
        if loads[i] >= avg {
            continue;
        }
        let slack = avg - loads[i];
        let affordable: Vec<usize> = (0..requests.len())
            .filter(|&r| requests[r].dist as f64 <= slack)
            .collect();
        if affordable.is_empty() {
            continue;
        }
        let chosen = match cfg.accept_strategy {
            AcceptStrategy::NearestFromDepot => *affordable
                .iter()
                .min_by_key(|&&r| (requests[r].dist, requests[r].item))
                .unwrap(),
            AcceptStrategy::FarthestFromDepot => *affordable
                .iter()
                .max_by_key(|&&r| (requests[r].dist, requests[r].item))
                .unwrap(),
            AcceptStrategy::Random => affordable[rng.gen_range(0..affordable.len())],
        };
        bids[chosen].push(i);
    }

    // ── Nomination phase ──────────────────────────────────────────────────
    let mut transfers = Vec::new();
    for (request, bidders) in requests.iter().zip(&bids) {
        if bidders.is_empty() {
            continue;
        }
        let acceptor = match cfg.nominate_strategy {
            NominateStrategy::LowestLoad => *bidders
                .iter()
                .min_by(|&&a, &&b| loads[a].total_cmp(&loads[b]).then(a.cmp(&b)))
                .unwrap(),
            NominateStrategy::HighestLoad => *bidders
                .iter()
                .max_by(|&&a, &&b| loads[a].total_cmp(&loads[b]).then(b.cmp(&a)))
                .unwrap(),
            NominateStrategy::Random => bidders[rng.gen_range(0..bidders.len())],
        };
        // The offered item can already be gone if an earlier transfer in this
        // round rearranged the owner's map; that race is skipped silently.
        if !items[request.owner].remove_one(request.item) {
            continue;
        }
        items[acceptor].add(request.item);
        items_count[request.owner] -= 1;
        items_count[acceptor] += 1;
        debug!(
            from = request.owner,
            to = acceptor,
            item = %request.item,
            "exchange transfer"
        );
        transfers.push(Transfer {
            from: AgentId(request.owner as u32),
            to:   AgentId(acceptor as u32),
            item: request.item,
        });
    }
    transfers
}
