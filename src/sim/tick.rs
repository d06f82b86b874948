//! Per-frame simulation step
//!
//! Core game loop that advances the world by one variable-length frame.

use super::collision::resolve_ghost;
use super::state::{GameEvent, GameState};
use super::wave::next_wave;
use crate::consts::*;

/// Player intent for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    /// Only honored while the game is over
    pub restart: bool,
    /// Exit request; handled by the platform layer, ignored by the simulation
    pub quit: bool,
}

impl TickInput {
    /// Horizontal steering direction in [-1, 1]
    pub fn direction(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Guard against stalls (tab switches, debugger pauses) and bad clocks
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };

    state.events.clear();
    state.time += dt;
    state.shoot_timer += dt;

    // Shake keeps decaying even while the game is over
    state.shake.decay(dt);

    if input.restart && state.is_over() {
        state.events.push(GameEvent::Restarted);
        state.reset();
    }

    // Entities are frozen while the game is over
    if state.is_over() {
        return;
    }

    steer_player(state, input, dt);
    state.bullet.advance(dt);
    step_ghosts(state, dt);

    // All ghosts cleared -> next wave
    if !state.is_over() && state.alive_ghosts() == 0 {
        next_wave(state);
    }

    step_particles(state, dt);
    step_stars(state, dt);
}

fn steer_player(state: &mut GameState, input: &TickInput, dt: f32) {
    state.player.steer(input.direction(), dt);

    // Single bullet on screen, gated by the cooldown
    if input.fire && !state.bullet.active && state.shoot_timer >= SHOOT_COOLDOWN {
        let muzzle = state.player.muzzle();
        state.bullet.fire(muzzle);
        state.shoot_timer = 0.0;
        state.events.push(GameEvent::Fired);
    }
}

fn step_ghosts(state: &mut GameState, dt: f32) {
    let time = state.time;
    for i in 0..state.ghosts.len() {
        if !state.ghosts[i].alive {
            continue;
        }
        state.ghosts[i].drift(time, dt);
        resolve_ghost(state, i);
    }
}

fn step_particles(state: &mut GameState, dt: f32) {
    for particle in state.particles.iter_mut() {
        particle.step(dt);
    }
    state.particles.retain(|p| p.life > 0.0);
}

fn step_stars(state: &mut GameState, dt: f32) {
    let GameState { stars, rng, .. } = state;
    for star in stars.iter_mut() {
        star.scroll(dt, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Ghost};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn parked_ghost(x: f32) -> Ghost {
        Ghost {
            pos: Vec2::new(x, 0.6),
            vx: 0.0,
            alive: true,
            phase: 0.0,
        }
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut state = GameState::new(12345);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        // Cooldown has not elapsed on the first frame of a fresh game
        tick(&mut state, &fire, DT);
        assert!(!state.bullet.active);

        state.shoot_timer = SHOOT_COOLDOWN;
        tick(&mut state, &fire, DT);
        assert!(state.bullet.active);
        assert!(state.events.contains(&GameEvent::Fired));
        assert_eq!(state.shoot_timer, 0.0);
    }

    #[test]
    fn test_single_bullet_on_screen() {
        let mut state = GameState::new(12345);
        state.ghosts = vec![parked_ghost(0.9)];
        state.shoot_timer = SHOOT_COOLDOWN;
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, DT);
        let first = state.bullet.pos;

        state.shoot_timer = 10.0;
        tick(&mut state, &fire, DT);
        // Same bullet moved on; no new one was spawned at the muzzle
        assert!(state.bullet.pos.y > first.y);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = GameState::new(1);
        state.score = 40;
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, DT);
        assert_eq!(state.score, 40);
        assert!(!state.events.contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_game_over_freezes_entities_but_not_shake() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::GameOver;
        state.shake.trigger(0.25, 0.025);
        let ghosts_before = state.ghosts.clone();
        let stars_before = state.stars.clone();
        let player_before = state.player;

        let input = TickInput {
            move_right: true,
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.05);

        assert_eq!(state.ghosts, ghosts_before);
        assert_eq!(state.stars, stars_before);
        assert_eq!(state.player, player_before);
        assert!(!state.bullet.active);
        assert!((state.shake.timer - 0.20).abs() < 1e-6);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::default(), 5.0);
        assert!((state.time - MAX_FRAME_DT).abs() < 1e-6);

        tick(&mut state, &TickInput::default(), f32::NAN);
        assert!((state.time - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                move_left: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                move_right: true,
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, DT);
                tick(&mut state2, input, DT);
            }
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.ghosts, state2.ghosts);
        assert_eq!(state1.particles, state2.particles);
        assert_eq!(state1.player, state2.player);
    }
}
