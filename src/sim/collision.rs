//! Collision detection and scoring
//!
//! Ghosts are resolved one at a time, in collection order, right after they
//! move. A ghost that reaches the baseline is resolved before the bullet is
//! considered, so it can never register twice.

use glam::Vec2;

use super::state::{Bullet, GameEvent, GamePhase, GameState, Ghost};
use crate::consts::*;

/// Center/extent overlap test between two axis-aligned boxes
#[inline]
pub fn aabb_hit(a_center: Vec2, a_size: Vec2, b_center: Vec2, b_size: Vec2) -> bool {
    let delta = (a_center - b_center).abs() * 2.0;
    let extent = a_size + b_size;
    delta.x < extent.x && delta.y < extent.y
}

pub fn bullet_size() -> Vec2 {
    Vec2::new(BULLET_W, BULLET_H)
}

pub fn ghost_size() -> Vec2 {
    Vec2::new(GHOST_W, GHOST_H)
}

/// What happens to a living ghost this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostOutcome {
    Untouched,
    ReachedBaseline,
    Shot,
}

/// Classify a living ghost against the baseline and the bullet
pub fn check_ghost(ghost: &Ghost, bullet: &Bullet) -> GhostOutcome {
    if ghost.reached_baseline() {
        GhostOutcome::ReachedBaseline
    } else if bullet.active && aabb_hit(bullet.pos, bullet_size(), ghost.pos, ghost_size()) {
        GhostOutcome::Shot
    } else {
        GhostOutcome::Untouched
    }
}

/// Resolve collisions for the ghost at `index` and apply the consequences
pub fn resolve_ghost(state: &mut GameState, index: usize) -> GhostOutcome {
    let ghost = state.ghosts[index];
    if !ghost.alive {
        return GhostOutcome::Untouched;
    }

    let outcome = check_ghost(&ghost, &state.bullet);
    match outcome {
        GhostOutcome::ReachedBaseline => {
            state.ghosts[index].alive = false;
            lose_life(state);
        }
        GhostOutcome::Shot => {
            state.ghosts[index].alive = false;
            award_kill(state, ghost.pos);
        }
        GhostOutcome::Untouched => {}
    }
    outcome
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    log::debug!("Ghost reached the baseline, {} lives left", state.lives);
    state.events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });

    if state.lives == 0 && state.phase == GamePhase::Playing {
        state.phase = GamePhase::GameOver;
        log::info!("Game over with score {}", state.score);
        state.events.push(GameEvent::GameOver { score: state.score });
    }

    let (duration, strength) = LIFE_LOST_SHAKE;
    state.shake.trigger(duration, strength);
}

fn award_kill(state: &mut GameState, at: Vec2) {
    state.bullet.active = false;
    state.score += KILL_SCORE;

    // Survivors speed up a little on every kill
    for ghost in state.ghosts.iter_mut().filter(|g| g.alive) {
        ghost.vx *= KILL_SPEED_RAMP;
    }

    state.spawn_burst(at);
    state.events.push(GameEvent::GhostDestroyed { pos: at });

    let (duration, strength) = KILL_SHAKE;
    state.shake.trigger(duration, strength);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ghost(x: f32, y: f32) -> Ghost {
        Ghost {
            pos: Vec2::new(x, y),
            vx: 0.5,
            alive: true,
            phase: 0.0,
        }
    }

    fn bullet_at(x: f32, y: f32) -> Bullet {
        Bullet {
            active: true,
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_aabb_hit_overlapping() {
        assert!(aabb_hit(
            Vec2::ZERO,
            Vec2::new(0.02, 0.06),
            Vec2::new(0.01, 0.02),
            Vec2::new(0.10, 0.10),
        ));
    }

    #[test]
    fn test_aabb_miss_far_apart() {
        assert!(!aabb_hit(
            Vec2::ZERO,
            Vec2::new(0.02, 0.06),
            Vec2::new(0.5, 0.5),
            Vec2::new(0.10, 0.10),
        ));
    }

    #[test]
    fn test_aabb_is_symmetric() {
        let cases = [
            (Vec2::ZERO, Vec2::new(0.01, 0.02)),
            (Vec2::ZERO, Vec2::new(0.5, 0.5)),
            (Vec2::new(0.3, -0.2), Vec2::new(0.35, -0.15)),
        ];
        let a_size = Vec2::new(0.02, 0.06);
        let b_size = Vec2::new(0.10, 0.10);
        for (a, b) in cases {
            assert_eq!(aabb_hit(a, a_size, b, b_size), aabb_hit(b, b_size, a, a_size));
        }
    }

    #[test]
    fn test_aabb_touching_edges_is_not_a_hit() {
        // |dx| * 2 == w1 + w2 exactly
        assert!(!aabb_hit(
            Vec2::ZERO,
            Vec2::new(0.5, 0.5),
            Vec2::new(0.5, 0.0),
            Vec2::new(0.5, 0.5),
        ));
    }

    #[test]
    fn test_check_ghost_baseline_wins_over_bullet() {
        let g = ghost(0.0, crate::baseline());
        let b = bullet_at(0.0, crate::baseline());
        assert_eq!(check_ghost(&g, &b), GhostOutcome::ReachedBaseline);
    }

    #[test]
    fn test_check_ghost_inactive_bullet_never_hits() {
        let g = ghost(0.0, 0.5);
        let mut b = bullet_at(0.0, 0.5);
        b.active = false;
        assert_eq!(check_ghost(&g, &b), GhostOutcome::Untouched);
    }

    #[test]
    fn test_resolve_kill_applies_rewards() {
        let mut state = GameState::new(1);
        state.ghosts = vec![ghost(0.0, 0.5), ghost(0.5, 0.5), ghost(-0.5, 0.5)];
        state.ghosts[2].alive = false;
        state.bullet = bullet_at(0.0, 0.5);
        state.particles.clear();

        assert_eq!(resolve_ghost(&mut state, 0), GhostOutcome::Shot);
        assert_eq!(state.score, KILL_SCORE);
        assert!(!state.bullet.active);
        assert!(!state.ghosts[0].alive);
        assert!((state.ghosts[1].vx - 0.5 * KILL_SPEED_RAMP).abs() < 1e-6);
        assert_eq!(state.particles.len(), BURST_COUNT);
        assert!(state.particles.iter().all(|p| p.life == 1.0));
        assert_eq!(state.shake.timer, KILL_SHAKE.0);
    }

    #[test]
    fn test_resolve_baseline_costs_life() {
        let mut state = GameState::new(1);
        state.ghosts = vec![ghost(0.0, -0.8)];
        assert_eq!(resolve_ghost(&mut state, 0), GhostOutcome::ReachedBaseline);
        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.shake.timer, LIFE_LOST_SHAKE.0);
        assert_eq!(state.shake.strength, LIFE_LOST_SHAKE.1);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = GameState::new(1);
        state.lives = 1;
        state.ghosts = vec![ghost(0.0, -0.8), ghost(0.3, -0.8)];
        state.events.clear();

        resolve_ghost(&mut state, 0);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0 }));

        // A second crossing in the same tick cannot push lives below zero
        resolve_ghost(&mut state, 1);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_dead_ghost_is_not_resolved_again() {
        let mut state = GameState::new(1);
        state.ghosts = vec![ghost(0.0, 0.5)];
        state.ghosts[0].alive = false;
        state.bullet = bullet_at(0.0, 0.5);
        assert_eq!(resolve_ghost(&mut state, 0), GhostOutcome::Untouched);
        assert!(state.bullet.active);
        assert_eq!(state.score, 0);
    }
}
