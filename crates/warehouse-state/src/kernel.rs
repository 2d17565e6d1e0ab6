//! The joint transition kernel: joint action → joint next state.
//!
//! One public entry point ([`step`]) built from three internal phases:
//!
//! 1. movement with collision resolution over the non-skipped agents,
//! 2. reward and inventory updates (pickup / clear / stay),
//! 3. stochastic item spawning.
//!
//! Agents with `skip[i] == true` are "ghosts": their tentative move is
//! accepted unconditionally and they are invisible to everyone else's
//! collision checks.  The planner uses this to simulate rollout agents in
//! isolation against the tree-bound ones.

use rand::Rng;
use rand::rngs::SmallRng;

use warehouse_core::{Action, Pos, SimConfig};
use warehouse_map::MapIndex;

use crate::{AgentState, ItemMap};

/// What happened to one agent during a [`step`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Reverted to its pre-step cell and earned the collision penalty.
    pub collided:  bool,
    /// Executed a valid `Pickup` (carry flag flipped, count decremented).
    pub picked_up: bool,
    /// Executed a valid `Clear` at the depot.
    pub cleared:   bool,
    /// A new item spawned in this agent's map.
    pub new_item:  bool,
}

/// Joint result of one kernel application.
pub struct StepResult {
    pub next_states: Vec<AgentState>,
    pub rewards:     Vec<f64>,
    pub outcomes:    Vec<StepOutcome>,
}

/// Advance the joint state by one tick.
///
/// `items` is mutated in place (pickups decrement, spawns increment);
/// callers that must not see the mutation pass clones.  Deterministic for a
/// given RNG stream and inputs.
pub fn step(
    states:        &[AgentState],
    actions:       &[Action],
    skip:          &[bool],
    items:         &mut [ItemMap],
    map:           &MapIndex,
    cfg:           &SimConfig,
    new_item_prob: f64,
    rng:           &mut SmallRng,
) -> StepResult {
    let n = states.len();
    debug_assert_eq!(actions.len(), n);
    debug_assert_eq!(skip.len(), n);
    debug_assert_eq!(items.len(), n);

    let (next_pos, collided) = resolve_moves(states, actions, skip, map);

    let mut next_states = Vec::with_capacity(n);
    let mut rewards = vec![0.0; n];
    let mut outcomes = vec![StepOutcome::default(); n];

    for i in 0..n {
        let mut has_item = states[i].has_item;
        if collided[i] {
            rewards[i] += cfg.penalty;
            outcomes[i].collided = true;
        }
        apply_inventory(
            states[i].pos,
            actions[i],
            &mut has_item,
            &mut items[i],
            &mut rewards[i],
            &mut outcomes[i],
            map,
            cfg,
        );
        spawn_item(&mut items[i], &mut outcomes[i], map, new_item_prob, rng);
        next_states.push(AgentState::new(next_pos[i], has_item));
    }

    StepResult { next_states, rewards, outcomes }
}

// ── Phase 1: movement ─────────────────────────────────────────────────────────

const UNVISITED: u8 = 0;
const ON_CHAIN:  u8 = 1;
const DONE:      u8 = 2;

/// Resolve tentative moves into final positions and collision flags.
///
/// Over the non-skipped agents, two failure modes are detected:
///
/// - *vertex*: two agents target the same cell — both collide;
/// - *chain/cycle*: agent `i`'s target is currently occupied by agent `j`
///   (its predecessor).  If the predecessor chain reaches a cycle, every
///   agent on the cycle collides; a collided predecessor taints every
///   follower behind it.
///
/// Collided agents revert to their pre-step cell.
fn resolve_moves(
    states:  &[AgentState],
    actions: &[Action],
    skip:    &[bool],
    map:     &MapIndex,
) -> (Vec<Pos>, Vec<bool>) {
    let n = states.len();
    let mut next_pos: Vec<Pos> = (0..n)
        .map(|i| map.next_pos(states[i].pos, actions[i]))
        .collect();
    let mut collided = vec![false; n];
    let mut visited = vec![UNVISITED; n];
    let mut pred: Vec<Option<usize>> = vec![None; n];

    // Vertex collisions and predecessor edges, ghosts excluded.
    for i in 0..n {
        if skip[i] {
            visited[i] = DONE;
            continue;
        }
        for j in 0..n {
            if i == j || skip[j] {
                continue;
            }
            if next_pos[i] == states[j].pos {
                pred[i] = Some(j);
            }
            if next_pos[i] == next_pos[j] {
                collided[i] = true;
                visited[i] = DONE;
            }
        }
    }

    // Walk each follow chain once, then unwind it top-down so a collided
    // predecessor taints every follower — including late-discovered cycles.
    let mut chain = Vec::new();
    for start in 0..n {
        if visited[start] != UNVISITED {
            continue;
        }
        chain.clear();
        let mut cur = start;
        loop {
            visited[cur] = ON_CHAIN;
            chain.push(cur);
            match pred[cur] {
                None => break,
                Some(j) => match visited[j] {
                    UNVISITED => cur = j,
                    ON_CHAIN => {
                        // Cycle: the chain head collides; the unwind below
                        // spreads it to the rest of the cycle and followers.
                        collided[cur] = true;
                        break;
                    }
                    _ => break,
                },
            }
        }
        while let Some(i) = chain.pop() {
            if !collided[i]
                && let Some(j) = pred[i]
                && collided[j]
            {
                collided[i] = true;
            }
            visited[i] = DONE;
        }
    }

    for i in 0..n {
        if collided[i] {
            next_pos[i] = states[i].pos;
        }
    }
    (next_pos, collided)
}

// ── Phase 2: inventory ────────────────────────────────────────────────────────

/// Apply pickup / clear / stay effects at the agent's **pre-move** position.
/// Invalid pickups and clears are silent no-ops.
#[allow(clippy::too_many_arguments)]
fn apply_inventory(
    pos:      Pos,
    action:   Action,
    has_item: &mut bool,
    items:    &mut ItemMap,
    reward:   &mut f64,
    outcome:  &mut StepOutcome,
    map:      &MapIndex,
    cfg:      &SimConfig,
) {
    match action {
        Action::Stay => {
            *reward += cfg.stay_penalty;
        }
        Action::Pickup => {
            if !*has_item && items.count(pos) > 0 {
                *has_item = true;
                items.remove_one(pos);
                *reward += cfg.pickup_reward;
                outcome.picked_up = true;
            }
        }
        Action::Clear => {
            if *has_item && pos == map.depot() {
                *has_item = false;
                *reward += cfg.clear_reward;
                outcome.cleared = true;
            }
        }
        _ => {}
    }
}

// ── Phase 3: item spawn ───────────────────────────────────────────────────────

/// With probability `p`, add one item at a uniformly drawn floor cell.
fn spawn_item(
    items:   &mut ItemMap,
    outcome: &mut StepOutcome,
    map:     &MapIndex,
    p:       f64,
    rng:     &mut SmallRng,
) {
    if p > 0.0 && rng.gen_bool(p.clamp(0.0, 1.0)) {
        let floor = map.floor_cells();
        let pos = floor[rng.gen_range(0..floor.len())];
        items.add(pos);
        outcome.new_item = true;
    }
}
