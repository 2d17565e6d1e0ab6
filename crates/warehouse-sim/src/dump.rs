//! Human-readable trace dump for verbose runs.

use std::io::{self, Write};

use warehouse_core::Pos;

use crate::Simulator;

impl Simulator {
    /// Write the current world state: the grid with agents overlaid as
    /// digits, then one block per agent with its last action, position,
    /// carry flag, pending items and running counters.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "TURN {}:", self.turn)?;
        for r in 0..self.map.height() {
            let mut row = String::with_capacity(self.map.width() as usize);
            for c in 0..self.map.width() {
                let pos = Pos::new(r, c);
                let here = self.states.iter().position(|s| s.pos == pos);
                row.push(match here {
                    Some(i) => char::from_digit((i % 10) as u32, 10).unwrap_or('?'),
                    None => self.map.tile(pos).to_char(),
                });
            }
            writeln!(out, "{row}")?;
        }
        for i in 0..self.cfg.num_agents {
            writeln!(out, "[AGENT {i}]")?;
            if let Some(action) = self.last_actions.get(i) {
                writeln!(out, "last action: {action}")?;
            }
            writeln!(out, "pos: {}", self.states[i].pos)?;
            writeln!(out, "has item: {}", self.states[i].has_item)?;
            writeln!(out, "pending items: {}", self.items[i].total())?;
            writeln!(
                out,
                "items count: {} pickup count: {} clear count: {}",
                self.items_count[i], self.pickup_count[i], self.clear_count[i]
            )?;
        }
        Ok(())
    }
}
