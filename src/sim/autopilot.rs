//! Attract-mode autopilot
//!
//! Produces the same [`TickInput`] a player would, so demo play goes through
//! the regular simulation path.

use std::cmp::Ordering;

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::*;

/// How close (NDC) the turret must be to its aim point before it stops moving
const DEAD_ZONE: f32 = 0.02;

/// Pick an input for this frame: chase the lowest ghost and shoot when lined up
pub fn steer(state: &GameState) -> TickInput {
    if state.is_over() {
        return TickInput {
            restart: true,
            ..Default::default()
        };
    }

    // The lowest ghost is the most dangerous one
    let target = state
        .ghosts
        .iter()
        .filter(|g| g.alive)
        .min_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal));

    let Some(target) = target else {
        return TickInput::default();
    };

    // Lead the target by the bullet's flight time (ignores bounces)
    let muzzle = state.player.muzzle();
    let flight = ((target.pos.y - muzzle.y) / BULLET_SPEED).max(0.0);
    let half = PLAYER_W * 0.5;
    let aim = (target.pos.x + target.vx * flight).clamp(-1.0 + half, 1.0 - half);

    let dx = aim - state.player.x;
    TickInput {
        move_left: dx < -DEAD_ZONE,
        move_right: dx > DEAD_ZONE,
        fire: dx.abs() < GHOST_W * 0.5,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Ghost};
    use glam::Vec2;

    fn still_ghost(x: f32, y: f32) -> Ghost {
        Ghost {
            pos: Vec2::new(x, y),
            vx: 0.0,
            alive: true,
            phase: 0.0,
        }
    }

    #[test]
    fn test_restarts_after_game_over() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::GameOver;
        assert!(steer(&state).restart);
    }

    #[test]
    fn test_chases_lowest_ghost() {
        let mut state = GameState::new(1);
        state.ghosts = vec![still_ghost(-0.6, 0.8), still_ghost(0.6, 0.3)];
        let input = steer(&state);
        assert!(input.move_right);
        assert!(!input.move_left);
        assert!(!input.fire);
    }

    #[test]
    fn test_fires_when_aligned() {
        let mut state = GameState::new(1);
        state.ghosts = vec![still_ghost(0.01, 0.5)];
        let input = steer(&state);
        assert!(input.fire);
        assert!(!input.move_left && !input.move_right);
    }

    #[test]
    fn test_idle_without_targets() {
        let mut state = GameState::new(1);
        for g in &mut state.ghosts {
            g.alive = false;
        }
        assert_eq!(steer(&state), TickInput::default());
    }
}
