//! Ghost Busters - A single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Frame simulation (movement, collisions, scoring, waves)
//! - `renderer`: Draw-command generation and the WebGPU backend
//! - `input`: Keyboard state to per-frame intent
//! - `hud`: Status line for the window title
//! - `settings`: Visual/audio preferences
//! - `audio`: Event sounds (Web Audio in the browser)

pub mod audio;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// World units are normalized device coordinates: the play field spans
/// [-1, 1] on both axes.
pub mod consts {
    /// Longest frame step the simulation accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player turret
    pub const PLAYER_W: f32 = 0.18;
    pub const PLAYER_H: f32 = 0.06;
    pub const PLAYER_Y: f32 = -0.85;
    pub const PLAYER_SPEED: f32 = 1.7;
    pub const START_LIVES: u32 = 3;

    /// Bullet
    pub const BULLET_W: f32 = 0.02;
    pub const BULLET_H: f32 = 0.06;
    pub const BULLET_SPEED: f32 = 2.6;
    /// Bullet is retired once it climbs past this height
    pub const BULLET_TOP: f32 = 1.1;
    pub const SHOOT_COOLDOWN: f32 = 0.22;

    /// Ghosts
    pub const MAX_GHOSTS: usize = 8;
    pub const GHOST_W: f32 = 0.10;
    pub const GHOST_H: f32 = 0.10;
    pub const GHOST_SPEED_MIN: f32 = 0.35;
    pub const GHOST_SPEED_MAX: f32 = 0.75;
    pub const GHOST_DROP: f32 = 0.04;
    /// Spawn band (x is symmetric around 0)
    pub const GHOST_SPAWN_X: f32 = 0.85;
    pub const GHOST_SPAWN_Y_MIN: f32 = 0.20;
    pub const GHOST_SPAWN_Y_MAX: f32 = 0.90;
    /// Bob oscillation layered on the linear drift
    pub const GHOST_BOB_FREQ: f32 = 2.0;
    pub const GHOST_BOB_AMPLITUDE: f32 = 0.12;
    /// Velocity multiplier applied to survivors on every kill
    pub const KILL_SPEED_RAMP: f32 = 1.035;
    pub const KILL_SCORE: u32 = 10;

    /// Wave sizing
    pub const INITIAL_WAVE_SIZE: usize = 6;
    pub const WAVE_BASE_COUNT: u32 = 4;
    /// Score needed per extra ghost in a wave
    pub const WAVE_SCORE_PER_GHOST: u32 = 20;
    /// Score needed per +1.0 of wave speed scale
    pub const WAVE_SCORE_PER_SPEED: f32 = 100.0;

    /// Particle bursts
    pub const BURST_COUNT: usize = 24;
    pub const PARTICLE_SPEED_MIN: f32 = 0.25;
    pub const PARTICLE_SPEED_MAX: f32 = 1.0;
    pub const PARTICLE_SIZE_MIN: f32 = 0.012;
    pub const PARTICLE_SIZE_MAX: f32 = 0.028;
    pub const PARTICLE_DECAY: f32 = 1.4;
    pub const PARTICLE_DRAG: f32 = 0.9;

    /// Parallax star field
    pub const STAR_COUNT: usize = 120;
    /// Stars wrap from below this height back to `STAR_WRAP`
    pub const STAR_WRAP: f32 = 1.05;

    /// Screen shake
    pub const SHAKE_DURATION: f32 = 0.25;
    pub const LIFE_LOST_SHAKE: (f32, f32) = (0.25, 0.025);
    pub const KILL_SHAKE: (f32, f32) = (0.15, 0.015);
}

/// Top edge of the player's sprite; ghosts touching it cost a life
#[inline]
pub fn baseline() -> f32 {
    consts::PLAYER_Y + consts::PLAYER_H * 0.5
}
