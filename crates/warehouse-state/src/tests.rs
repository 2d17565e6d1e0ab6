//! Unit tests for warehouse-state.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use warehouse_core::{Action, Pos, SimConfig};
use warehouse_map::MapIndex;

use crate::{AgentState, ItemMap, step};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn cfg() -> SimConfig {
    SimConfig {
        num_agents:        2,
        last_turn:         10,
        new_item_prob:     0.0,
        num_iters:         1,
        max_depth:         1,
        expand_thresh:     1,
        pickup_reward:     1.0,
        clear_reward:      5.0,
        penalty:           -2.0,
        stay_penalty:      -0.1,
        discount_factor:   0.95,
        decay_rate:        1.0,
        rand_seed:         0,
        enable_exchange:   false,
        request_strategy:  Default::default(),
        accept_strategy:   Default::default(),
        nominate_strategy: Default::default(),
    }
}

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(99)
}

/// One row of four floor cells with the depot at the right end.
fn corridor() -> MapIndex {
    MapIndex::from_text("....D\n").unwrap()
}

/// 2×2 open block plus a depot appendix.
fn block() -> MapIndex {
    MapIndex::from_text("..\n..\nD#\n").unwrap()
}

fn run_step(
    map: &MapIndex,
    states: &[AgentState],
    actions: &[Action],
    skip: &[bool],
    items: &mut [ItemMap],
) -> crate::StepResult {
    step(states, actions, skip, items, map, &cfg(), 0.0, &mut rng())
}

fn floors(states: &[(u16, u16)]) -> Vec<AgentState> {
    states
        .iter()
        .map(|&(r, c)| AgentState::new(Pos::new(r, c), false))
        .collect()
}

// ── ItemMap ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod item_map {
    use super::*;

    #[test]
    fn counts_stay_canonical() {
        let mut m = ItemMap::new();
        let p = Pos::new(0, 1);
        assert_eq!(m.count(p), 0);
        m.add(p);
        m.add(p);
        assert_eq!(m.count(p), 2);
        assert!(m.remove_one(p));
        assert_eq!(m.count(p), 1);
        assert!(m.remove_one(p));
        assert_eq!(m.count(p), 0);
        assert_eq!(m.cell_count(), 0, "zero counts must drop the key");
    }

    #[test]
    fn remove_from_empty_is_noop() {
        let mut m = ItemMap::new();
        assert!(!m.remove_one(Pos::new(0, 0)));
        assert!(m.is_empty());
    }

    #[test]
    fn total_sums_all_cells() {
        let mut m = ItemMap::new();
        m.add(Pos::new(0, 0));
        m.add(Pos::new(0, 0));
        m.add(Pos::new(1, 1));
        assert_eq!(m.total(), 3);
        assert_eq!(m.cell_count(), 2);
    }
}

// ── Movement and collisions ───────────────────────────────────────────────────

#[cfg(test)]
mod collisions {
    use super::*;

    #[test]
    fn all_stay_is_identity_on_positions() {
        let map = corridor();
        let states = floors(&[(0, 0), (0, 2)]);
        let mut items = vec![ItemMap::new(), ItemMap::new()];
        let result = run_step(
            &map,
            &states,
            &[Action::Stay, Action::Stay],
            &[false, false],
            &mut items,
        );
        assert_eq!(result.next_states, states);
        for (i, r) in result.rewards.iter().enumerate() {
            assert_eq!(*r, cfg().stay_penalty, "agent {i} earns the stay penalty");
            assert!(!result.outcomes[i].collided);
        }
    }

    #[test]
    fn head_on_vertex_collision_reverts_both() {
        let map = corridor();
        let states = floors(&[(0, 0), (0, 2)]);
        let mut items = vec![ItemMap::new(), ItemMap::new()];
        let result = run_step(
            &map,
            &states,
            &[Action::Right, Action::Left],
            &[false, false],
            &mut items,
        );
        assert_eq!(result.next_states[0].pos, Pos::new(0, 0));
        assert_eq!(result.next_states[1].pos, Pos::new(0, 2));
        for i in 0..2 {
            assert!(result.outcomes[i].collided);
            assert_eq!(result.rewards[i], cfg().penalty);
        }
    }

    #[test]
    fn swap_collides_and_reverts_both() {
        let map = corridor();
        let states = floors(&[(0, 0), (0, 1)]);
        let mut items = vec![ItemMap::new(), ItemMap::new()];
        let result = run_step(
            &map,
            &states,
            &[Action::Right, Action::Left],
            &[false, false],
            &mut items,
        );
        assert!(result.outcomes[0].collided);
        assert!(result.outcomes[1].collided);
        assert_eq!(result.next_states[0].pos, Pos::new(0, 0));
        assert_eq!(result.next_states[1].pos, Pos::new(0, 1));
    }

    #[test]
    fn follow_chain_advances_without_collision() {
        let map = corridor();
        let states = floors(&[(0, 0), (0, 1), (0, 2)]);
        let mut items = vec![ItemMap::new(), ItemMap::new(), ItemMap::new()];
        let result = run_step(
            &map,
            &states,
            &[Action::Right, Action::Right, Action::Right],
            &[false, false, false],
            &mut items,
        );
        for i in 0..3 {
            assert!(!result.outcomes[i].collided, "agent {i} should move freely");
            assert_eq!(result.next_states[i].pos, Pos::new(0, i as u16 + 1));
        }
    }

    #[test]
    fn collided_predecessor_taints_followers() {
        // Agents 1 and 2 meet head-on; agent 0 follows agent 1 and must be
        // blocked even though its own target is otherwise free.
        let map = corridor();
        let states = floors(&[(0, 0), (0, 1), (0, 3)]);
        let mut items = vec![ItemMap::new(); 3];
        let result = run_step(
            &map,
            &states,
            &[Action::Right, Action::Right, Action::Left],
            &[false, false, false],
            &mut items,
        );
        for i in 0..3 {
            assert!(result.outcomes[i].collided, "agent {i} must collide");
            assert_eq!(result.next_states[i].pos, states[i].pos);
        }
    }

    #[test]
    fn four_agent_rotation_is_a_cycle_collision() {
        // All four cells of the 2×2 block occupied, everyone rotating one
        // step clockwise.  The predecessor graph is a pure cycle: all revert.
        let map = block();
        let states = floors(&[(0, 0), (0, 1), (1, 1), (1, 0)]);
        let mut items = vec![ItemMap::new(); 4];
        let result = run_step(
            &map,
            &states,
            &[Action::Right, Action::Down, Action::Left, Action::Up],
            &[false; 4],
            &mut items,
        );
        for i in 0..4 {
            assert!(result.outcomes[i].collided, "agent {i} is on the cycle");
            assert_eq!(result.next_states[i].pos, states[i].pos);
        }
    }

    #[test]
    fn moving_into_a_staying_agent_collides_both() {
        let map = corridor();
        let states = floors(&[(0, 0), (0, 1)]);
        let mut items = vec![ItemMap::new(); 2];
        let result = run_step(
            &map,
            &states,
            &[Action::Right, Action::Stay],
            &[false, false],
            &mut items,
        );
        assert!(result.outcomes[0].collided);
        assert!(result.outcomes[1].collided);
        assert_eq!(result.next_states[0].pos, Pos::new(0, 0));
    }

    #[test]
    fn ghosts_bypass_collision_checks() {
        // Same swap as above, but agent 1 is skipped: both moves go through
        // and the agents overlap (rollout isolation semantics).
        let map = corridor();
        let states = floors(&[(0, 0), (0, 1)]);
        let mut items = vec![ItemMap::new(); 2];
        let result = run_step(
            &map,
            &states,
            &[Action::Right, Action::Left],
            &[false, true],
            &mut items,
        );
        assert!(!result.outcomes[0].collided);
        assert!(!result.outcomes[1].collided);
        assert_eq!(result.next_states[0].pos, Pos::new(0, 1));
        assert_eq!(result.next_states[1].pos, Pos::new(0, 0));
    }
}

// ── Inventory ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod inventory {
    use super::*;

    #[test]
    fn pickup_decrements_and_sets_carry() {
        let map = corridor();
        let states = floors(&[(0, 1)]);
        let mut items = vec![ItemMap::new()];
        items[0].add(Pos::new(0, 1));
        items[0].add(Pos::new(0, 1));
        let result = run_step(&map, &states, &[Action::Pickup], &[false], &mut items);
        assert!(result.outcomes[0].picked_up);
        assert!(result.next_states[0].has_item);
        assert_eq!(result.rewards[0], cfg().pickup_reward);
        assert_eq!(items[0].count(Pos::new(0, 1)), 1);
    }

    #[test]
    fn pickup_without_item_is_noop() {
        let map = corridor();
        let states = floors(&[(0, 1)]);
        let mut items = vec![ItemMap::new()];
        let result = run_step(&map, &states, &[Action::Pickup], &[false], &mut items);
        assert!(!result.outcomes[0].picked_up);
        assert!(!result.next_states[0].has_item);
        assert_eq!(result.rewards[0], 0.0);
    }

    #[test]
    fn pickup_while_carrying_is_noop() {
        let map = corridor();
        let states = vec![AgentState::new(Pos::new(0, 1), true)];
        let mut items = vec![ItemMap::new()];
        items[0].add(Pos::new(0, 1));
        let result = run_step(&map, &states, &[Action::Pickup], &[false], &mut items);
        assert!(!result.outcomes[0].picked_up);
        assert_eq!(items[0].count(Pos::new(0, 1)), 1, "count must not change");
    }

    #[test]
    fn clear_at_depot_drops_carry() {
        let map = corridor();
        let states = vec![AgentState::new(Pos::new(0, 4), true)];
        let mut items = vec![ItemMap::new()];
        let result = run_step(&map, &states, &[Action::Clear], &[false], &mut items);
        assert!(result.outcomes[0].cleared);
        assert!(!result.next_states[0].has_item);
        assert_eq!(result.rewards[0], cfg().clear_reward);
    }

    #[test]
    fn clear_away_from_depot_is_noop() {
        let map = corridor();
        let states = vec![AgentState::new(Pos::new(0, 2), true)];
        let mut items = vec![ItemMap::new()];
        let result = run_step(&map, &states, &[Action::Clear], &[false], &mut items);
        assert!(!result.outcomes[0].cleared);
        assert!(result.next_states[0].has_item);
        assert_eq!(result.rewards[0], 0.0);
    }
}

// ── Item spawning ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod spawning {
    use super::*;

    #[test]
    fn probability_one_spawns_every_agent() {
        let map = corridor();
        let states = floors(&[(0, 0), (0, 2)]);
        let mut items = vec![ItemMap::new(), ItemMap::new()];
        let mut rng = SmallRng::seed_from_u64(7);
        let result = step(
            &states,
            &[Action::Stay, Action::Stay],
            &[false, false],
            &mut items,
            &map,
            &cfg(),
            1.0,
            &mut rng,
        );
        for i in 0..2 {
            assert!(result.outcomes[i].new_item);
            assert_eq!(items[i].total(), 1);
            let (pos, _) = items[i].iter().next().unwrap();
            assert!(map.floor_cells().contains(&pos), "spawns land on floor only");
        }
    }

    #[test]
    fn probability_zero_never_spawns() {
        let map = corridor();
        let states = floors(&[(0, 0)]);
        let mut items = vec![ItemMap::new()];
        let result = run_step(&map, &states, &[Action::Stay], &[false], &mut items);
        assert!(!result.outcomes[0].new_item);
        assert!(items[0].is_empty());
    }

    #[test]
    fn same_seed_same_outcome() {
        let map = corridor();
        let states = floors(&[(0, 0), (0, 2)]);
        let actions = [Action::Right, Action::Stay];
        let mut items_a = vec![ItemMap::new(), ItemMap::new()];
        let mut items_b = vec![ItemMap::new(), ItemMap::new()];
        let mut rng_a = SmallRng::seed_from_u64(5);
        let mut rng_b = SmallRng::seed_from_u64(5);
        let a = step(&states, &actions, &[false, false], &mut items_a, &map, &cfg(), 0.5, &mut rng_a);
        let b = step(&states, &actions, &[false, false], &mut items_b, &map, &cfg(), 0.5, &mut rng_b);
        assert_eq!(a.next_states, b.next_states);
        assert_eq!(a.rewards, b.rewards);
        assert_eq!(items_a, items_b);
    }
}
