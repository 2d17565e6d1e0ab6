//! The greedy rollout policy.
//!
//! A myopic navigator: head for the nearest item (or the depot when
//! carrying), pick up / clear when standing on the goal, otherwise take a
//! uniformly random step that strictly shortens the BFS distance to the
//! target.  Other agents are ignored entirely — the transition kernel may
//! still revert the chosen move on collision.
//!
//! Used both for self-rollout and as the proxy for every other agent during
//! a searching agent's tree descent.

use warehouse_core::{Action, AgentRng, Pos};
use warehouse_map::MapIndex;
use warehouse_state::{AgentState, ItemMap};

/// The actions agent may take in `state`: the map's movement set plus
/// `Pickup` / `Clear` where their preconditions hold.
pub fn legal_actions(state: AgentState, items: &ItemMap, map: &MapIndex) -> Vec<Action> {
    let mut actions = map.valid_moves(state.pos).to_vec();
    if !state.has_item && items.count(state.pos) > 0 {
        actions.push(Action::Pickup);
    }
    if state.has_item && state.pos == map.depot() {
        actions.push(Action::Clear);
    }
    actions
}

/// Pick agent `id`'s next action.
///
/// `targets[id]` persists across calls within one rollout trajectory: once a
/// goal cell is chosen the agent keeps walking toward it until it arrives,
/// then re-targets.  Unreachable cells (`dist == u32::MAX`) are never
/// selected as targets; an agent with nothing reachable to do moves
/// uniformly at random.
pub fn greedy(
    id:      usize,
    states:  &[AgentState],
    items:   &[ItemMap],
    targets: &mut [Pos],
    map:     &MapIndex,
    rng:     &mut AgentRng,
) -> Action {
    let state = states[id];
    let valid = legal_actions(state, &items[id], map);
    if targets[id] == state.pos {
        targets[id] = Pos::NONE;
    }
    if targets[id].is_none() {
        if state.has_item {
            if state.pos == map.depot() {
                return Action::Clear;
            }
            targets[id] = map.depot();
        } else {
            if items[id].count(state.pos) > 0 {
                return Action::Pickup;
            }
            let mut best = u32::MAX;
            for (pos, _) in items[id].iter() {
                let d = map.dist(state.pos, pos);
                if d < best {
                    best = d;
                    targets[id] = pos;
                }
            }
            if targets[id].is_none() {
                // Nothing reachable to chase: wander.
                return *rng.choose(&valid).expect("Stay is always legal");
            }
        }
    }

    let target = targets[id];
    let cur = map.dist(state.pos, target);
    let descending: Vec<Action> = valid
        .iter()
        .copied()
        .filter(|&a| map.dist(map.next_pos(state.pos, a), target) < cur)
        .collect();
    *rng
        .choose(&descending)
        .unwrap_or_else(|| panic!("agent {id} at {} cannot approach target {target}", state.pos))
}
