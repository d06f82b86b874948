//! Scene description for one frame
//!
//! [`build_frame`] reads the game state and produces an ordered list of
//! colored, glowing rectangles. It never touches the GPU, so it runs the
//! same in tests, in the headless native build and in the browser.

use glam::Vec2;

use super::vertex::colors;
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::GameState;

/// One rectangle to rasterize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub center: Vec2,
    pub size: Vec2,
    pub color: [f32; 4],
    /// Color multiplier: 1.0 = normal, >1 brighter
    pub glow: f32,
}

impl DrawCommand {
    pub fn new(center: Vec2, size: Vec2, color: [f32; 4], glow: f32) -> Self {
        Self {
            center,
            size,
            color,
            glow,
        }
    }
}

/// Vertical background gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub top: [f32; 3],
    pub bottom: [f32; 3],
}

/// Everything the backend needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub background: Gradient,
    /// Translation applied to every command (screen shake)
    pub view_offset: Vec2,
    pub commands: Vec<DrawCommand>,
}

fn rgba(rgb: [f32; 3], a: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], a]
}

/// Build the draw list for the current state
///
/// `jitter` is a random sample in [-1, 1]² supplied by the caller; it is
/// scaled by the current shake magnitude to produce the view offset.
pub fn build_frame(state: &GameState, settings: &Settings, jitter: Vec2) -> Frame {
    let t = state.time;
    let glow_on = settings.glow;
    let glow = |g: f32| if glow_on { g } else { 1.0 };

    let view_offset = if settings.effective_screen_shake() {
        jitter.clamp(Vec2::splat(-1.0), Vec2::splat(1.0)) * state.shake.magnitude()
    } else {
        Vec2::ZERO
    };

    let mut commands = Vec::with_capacity(
        STAR_COUNT + state.ghosts.len() * 3 + state.particles.len() + 8,
    );

    // Parallax stars, twinkling
    if settings.quality.starfield_enabled() {
        for s in &state.stars {
            let twinkle = 0.85 + 0.15 * (t * (2.0 + s.speed * 6.0) + s.pos.x * 10.0).sin();
            commands.push(DrawCommand::new(
                s.pos,
                Vec2::splat(s.size),
                rgba(colors::STAR, s.alpha * twinkle),
                glow(1.2),
            ));
        }
    }

    // Divider just above the player's row
    commands.push(DrawCommand::new(
        Vec2::new(0.0, crate::baseline() + 0.02),
        Vec2::new(2.0, 0.01),
        colors::DIVIDER,
        1.0,
    ));

    // Turret pulses right after a shot
    let cooling = (SHOOT_COOLDOWN - state.shoot_timer).max(0.0) / SHOOT_COOLDOWN;
    let pulse = glow(1.0 + 0.25 * cooling);
    let px = state.player.x;
    commands.push(DrawCommand::new(
        Vec2::new(px, PLAYER_Y),
        Vec2::new(PLAYER_W, PLAYER_H),
        colors::PLAYER,
        pulse,
    ));
    commands.push(DrawCommand::new(
        Vec2::new(px, PLAYER_Y + PLAYER_H * 0.35),
        Vec2::new(PLAYER_W * 0.35, PLAYER_H * 0.6),
        colors::PLAYER,
        pulse,
    ));

    // Bullet with a fading two-quad trail
    if state.bullet.active {
        let b = state.bullet.pos;
        commands.push(DrawCommand::new(
            b,
            Vec2::new(BULLET_W, BULLET_H),
            rgba(colors::BULLET, 1.0),
            glow(1.2),
        ));
        commands.push(DrawCommand::new(
            Vec2::new(b.x, b.y - BULLET_H * 0.8),
            Vec2::new(BULLET_W * 0.9, BULLET_H * 0.6),
            rgba(colors::BULLET, 0.6),
            1.0,
        ));
        commands.push(DrawCommand::new(
            Vec2::new(b.x, b.y - BULLET_H * 1.5),
            Vec2::new(BULLET_W * 0.8, BULLET_H * 0.4),
            rgba(colors::BULLET, 0.35),
            glow(0.9),
        ));
    }

    // Ghost bodies pulse; eyes stay flat
    let eye_off = Vec2::new(GHOST_W * 0.18, GHOST_H * 0.10);
    let eye_size = Vec2::new(GHOST_W * 0.14, GHOST_H * 0.14);
    for g in state.ghosts.iter().filter(|g| g.alive) {
        let body_glow = glow(0.85 + 0.35 * (t * 3.0 + g.phase).sin());
        commands.push(DrawCommand::new(
            g.pos,
            Vec2::new(GHOST_W, GHOST_H),
            colors::GHOST,
            body_glow,
        ));
        commands.push(DrawCommand::new(
            g.pos + Vec2::new(-eye_off.x, eye_off.y),
            eye_size,
            colors::EYES,
            1.0,
        ));
        commands.push(DrawCommand::new(g.pos + eye_off, eye_size, colors::EYES, 1.0));
    }

    // Explosion sparks fade with life
    for p in state.particles.iter().take(settings.max_particles()) {
        let a = p.life.clamp(0.0, 1.0);
        commands.push(DrawCommand::new(
            p.pos,
            Vec2::splat(p.size),
            rgba(colors::SPARK, a),
            glow(1.0 + 0.5 * a),
        ));
    }

    Frame {
        background: Gradient {
            top: colors::BG_TOP,
            bottom: colors::BG_BOTTOM,
        },
        view_offset,
        commands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QualityPreset;

    fn quiet_state() -> GameState {
        let mut state = GameState::new(3);
        state.shoot_timer = SHOOT_COOLDOWN;
        state
    }

    #[test]
    fn test_command_count_for_fresh_game() {
        let state = quiet_state();
        let frame = build_frame(&state, &Settings::default(), Vec2::ZERO);
        // stars + divider + turret (2) + 6 ghosts * 3
        assert_eq!(frame.commands.len(), STAR_COUNT + 1 + 2 + 6 * 3);
        assert_eq!(frame.background.top, colors::BG_TOP);
    }

    #[test]
    fn test_bullet_adds_trail() {
        let mut state = quiet_state();
        let base = build_frame(&state, &Settings::default(), Vec2::ZERO).commands.len();
        state.bullet.fire(Vec2::new(0.0, 0.0));
        let with_bullet = build_frame(&state, &Settings::default(), Vec2::ZERO);
        assert_eq!(with_bullet.commands.len(), base + 3);
    }

    #[test]
    fn test_dead_ghosts_are_not_drawn() {
        let mut state = quiet_state();
        for g in &mut state.ghosts {
            g.alive = false;
        }
        let frame = build_frame(&state, &Settings::default(), Vec2::ZERO);
        assert_eq!(frame.commands.len(), STAR_COUNT + 3);
    }

    #[test]
    fn test_shake_offset_scales_with_timer() {
        let mut state = quiet_state();
        state.shake.trigger(SHAKE_DURATION, 0.02);
        let frame = build_frame(&state, &Settings::default(), Vec2::new(1.0, -1.0));
        assert!((frame.view_offset - Vec2::new(0.02, -0.02)).length() < 1e-6);

        state.shake.timer = SHAKE_DURATION * 0.5;
        let frame = build_frame(&state, &Settings::default(), Vec2::new(1.0, -1.0));
        assert!((frame.view_offset - Vec2::new(0.01, -0.01)).length() < 1e-6);
    }

    #[test]
    fn test_reduced_motion_kills_shake() {
        let mut state = quiet_state();
        state.shake.trigger(SHAKE_DURATION, 0.02);
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let frame = build_frame(&state, &settings, Vec2::ONE);
        assert_eq!(frame.view_offset, Vec2::ZERO);
    }

    #[test]
    fn test_turret_pulses_after_shot() {
        let mut state = quiet_state();
        state.shoot_timer = 0.0;
        let frame = build_frame(&state, &Settings::default(), Vec2::ZERO);
        let turret = frame
            .commands
            .iter()
            .find(|c| c.center == Vec2::new(state.player.x, PLAYER_Y))
            .unwrap();
        assert!((turret.glow - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_particle_alpha_follows_life() {
        let mut state = quiet_state();
        state.spawn_burst(Vec2::ZERO);
        for p in &mut state.particles {
            p.life = 0.5;
        }
        let frame = build_frame(&state, &Settings::default(), Vec2::ZERO);
        let sparks: Vec<_> = frame
            .commands
            .iter()
            .filter(|c| c.color[..3] == colors::SPARK)
            .collect();
        assert_eq!(sparks.len(), BURST_COUNT);
        assert!(sparks.iter().all(|c| c.color[3] == 0.5 && c.glow == 1.25));
    }

    #[test]
    fn test_low_quality_skips_stars_and_glow() {
        let state = quiet_state();
        let settings = Settings::from_preset(QualityPreset::Low);
        let frame = build_frame(&state, &settings, Vec2::ZERO);
        assert_eq!(frame.commands.len(), 1 + 2 + 6 * 3);
        assert!(frame.commands.iter().all(|c| c.glow == 1.0));
    }
}
