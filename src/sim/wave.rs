//! Wave spawning and difficulty policy

use glam::Vec2;

use super::state::{GameEvent, GameState, Ghost};
use crate::consts::*;

/// Size and speed of the next wave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavePlan {
    pub count: usize,
    pub speed_scale: f32,
}

impl WavePlan {
    /// Difficulty follows cumulative score, not wave number
    pub fn for_score(score: u32) -> Self {
        let count = (WAVE_BASE_COUNT + score / WAVE_SCORE_PER_GHOST) as usize;
        Self {
            count: count.min(MAX_GHOSTS),
            speed_scale: 1.0 + score as f32 / WAVE_SCORE_PER_SPEED,
        }
    }
}

/// Replace the whole ghost collection with a fresh wave
///
/// `count` is clamped to [`MAX_GHOSTS`].
pub fn spawn_wave(state: &mut GameState, count: usize, speed_scale: f32) {
    let count = count.min(MAX_GHOSTS);
    state.ghosts.clear();

    for _ in 0..count {
        let x = state.rng.range(-GHOST_SPAWN_X, GHOST_SPAWN_X);
        let y = state.rng.range(GHOST_SPAWN_Y_MIN, GHOST_SPAWN_Y_MAX);
        let speed = state.rng.range(GHOST_SPEED_MIN, GHOST_SPEED_MAX) * speed_scale;
        let vx = if state.rng.coin() { speed } else { -speed };
        let phase = state.rng.angle();

        state.ghosts.push(Ghost {
            pos: Vec2::new(x, y),
            vx,
            alive: true,
            phase,
        });
    }

    log::info!("Wave spawned: {} ghosts, speed x{:.2}", count, speed_scale);
    state.events.push(GameEvent::WaveSpawned { count, speed_scale });
}

/// Spawn the wave that follows a cleared one
pub fn next_wave(state: &mut GameState) {
    let plan = WavePlan::for_score(state.score);
    spawn_wave(state, plan.count, plan.speed_scale);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_at_zero_score() {
        let plan = WavePlan::for_score(0);
        assert_eq!(plan.count, 4);
        assert!((plan.speed_scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_plan_at_sixty() {
        let plan = WavePlan::for_score(60);
        assert_eq!(plan.count, 7);
        assert!((plan.speed_scale - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_plan_count_caps_at_max() {
        let plan = WavePlan::for_score(10_000);
        assert_eq!(plan.count, MAX_GHOSTS);
        assert!((plan.speed_scale - 101.0).abs() < 1e-3);
    }

    #[test]
    fn test_plan_is_monotonic() {
        let mut prev = WavePlan::for_score(0);
        for score in (10..500).step_by(10) {
            let plan = WavePlan::for_score(score);
            assert!(plan.count >= prev.count);
            assert!(plan.speed_scale >= prev.speed_scale);
            prev = plan;
        }
    }

    #[test]
    fn test_spawn_clamps_count() {
        let mut state = GameState::new(5);
        spawn_wave(&mut state, 50, 1.0);
        assert_eq!(state.ghosts.len(), MAX_GHOSTS);
    }

    #[test]
    fn test_spawn_discards_previous_wave() {
        let mut state = GameState::new(5);
        for ghost in &mut state.ghosts {
            ghost.alive = false;
        }
        spawn_wave(&mut state, 3, 1.0);
        assert_eq!(state.ghosts.len(), 3);
        assert!(state.ghosts.iter().all(|g| g.alive));
    }

    #[test]
    fn test_spawned_ghosts_in_bands() {
        let mut state = GameState::new(11);
        let scale = 1.5;
        for _ in 0..20 {
            spawn_wave(&mut state, MAX_GHOSTS, scale);
            for g in &state.ghosts {
                assert!(g.pos.x >= -GHOST_SPAWN_X && g.pos.x < GHOST_SPAWN_X);
                assert!(g.pos.y >= GHOST_SPAWN_Y_MIN && g.pos.y < GHOST_SPAWN_Y_MAX);
                let speed = g.vx.abs();
                assert!(speed >= GHOST_SPEED_MIN * scale - 1e-5);
                assert!(speed <= GHOST_SPEED_MAX * scale + 1e-5);
                assert!((0.0..std::f32::consts::TAU).contains(&g.phase));
            }
        }
    }

    #[test]
    fn test_spawn_records_event() {
        let mut state = GameState::new(5);
        state.events.clear();
        spawn_wave(&mut state, 4, 1.2);
        assert_eq!(
            state.events,
            vec![GameEvent::WaveSpawned {
                count: 4,
                speed_scale: 1.2
            }]
        );
    }
}
