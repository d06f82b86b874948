//! Game state and entity records
//!
//! Every piece of mutable game data lives in [`GameState`]; the step
//! functions receive it by exclusive reference.

use glam::Vec2;

use super::rng::GameRng;
use super::wave::spawn_wave;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Lives exhausted, waiting for restart input
    GameOver,
}

/// Something noteworthy that happened during a tick
///
/// Consumed by the platform layer for audio and logging; never read back by
/// the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Fired,
    GhostDestroyed { pos: Vec2 },
    LifeLost { lives_left: u32 },
    WaveSpawned { count: usize, speed_scale: f32 },
    GameOver { score: u32 },
    Restarted,
}

/// The player's turret
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Player {
    /// Horizontal center (NDC)
    pub x: f32,
}

impl Player {
    /// Move by `dir * PLAYER_SPEED * dt` and keep the sprite on screen
    pub fn steer(&mut self, dir: f32, dt: f32) {
        self.x += dir * PLAYER_SPEED * dt;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        let half = PLAYER_W * 0.5;
        self.x = self.x.clamp(-1.0 + half, 1.0 - half);
    }

    /// Where a freshly fired bullet appears
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.x, PLAYER_Y + PLAYER_H * 0.5 + BULLET_H * 0.6)
    }
}

/// The single on-screen projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    pub active: bool,
    pub pos: Vec2,
}

impl Default for Bullet {
    fn default() -> Self {
        Self {
            active: false,
            pos: Vec2::new(0.0, -1.5),
        }
    }
}

impl Bullet {
    pub fn fire(&mut self, from: Vec2) {
        self.active = true;
        self.pos = from;
    }

    /// Advance upward; retires once past the top of the field
    pub fn advance(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.pos.y += BULLET_SPEED * dt;
        if self.pos.y > BULLET_TOP {
            self.active = false;
        }
    }
}

/// A ghost enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ghost {
    pub pos: Vec2,
    /// Horizontal velocity; sign gives direction
    pub vx: f32,
    pub alive: bool,
    /// Per-ghost offset for the bob and glow oscillations
    pub phase: f32,
}

impl Ghost {
    /// Drift horizontally with bob, bouncing off the side walls.
    ///
    /// Returns true if the ghost bounced this step.
    pub fn drift(&mut self, time: f32, dt: f32) -> bool {
        self.pos.x += self.vx * dt;

        // Bob is integrated as a position offset scaled by dt
        let bob = (time * GHOST_BOB_FREQ + self.phase).sin() * GHOST_BOB_AMPLITUDE;
        self.pos.x += bob * dt;

        let half = GHOST_W * 0.5;
        if self.pos.x + half > 1.0 {
            self.pos.x = 1.0 - half;
            self.vx = -self.vx.abs();
            self.pos.y -= GHOST_DROP;
            true
        } else if self.pos.x - half < -1.0 {
            self.pos.x = -1.0 + half;
            self.vx = self.vx.abs();
            self.pos.y -= GHOST_DROP;
            true
        } else {
            false
        }
    }

    /// Lower edge has reached the player's row
    pub fn reached_baseline(&self) -> bool {
        self.pos.y - GHOST_H * 0.5 <= crate::baseline()
    }
}

/// A visual-only explosion fragment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at birth, removed at or below 0
    pub life: f32,
    pub size: f32,
}

impl Particle {
    pub fn step(&mut self, dt: f32) {
        self.life -= dt * PARTICLE_DECAY;
        self.pos += self.vel * dt;
        self.vel *= 1.0 - PARTICLE_DRAG * dt;
    }
}

/// A parallax background star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    /// Downward drift speed
    pub speed: f32,
    pub size: f32,
    pub alpha: f32,
}

impl Star {
    /// A star anywhere on screen; deeper layers are slower, smaller, dimmer
    pub fn random(rng: &mut GameRng) -> Self {
        let pos = Vec2::new(rng.range(-1.0, 1.0), rng.range(-1.0, 1.0));
        let layer = rng.range(0.0, 1.0);
        Self {
            pos,
            speed: 0.05 + layer * 0.25,
            size: 0.004 + layer * 0.01,
            alpha: 0.5 + layer * 0.5,
        }
    }

    /// Drift down, recycling to the top once off screen
    pub fn scroll(&mut self, dt: f32, rng: &mut GameRng) {
        self.pos.y -= self.speed * dt;
        if self.pos.y < -STAR_WRAP {
            self.pos.y = STAR_WRAP;
            self.pos.x = rng.range(-1.0, 1.0);
            self.alpha = 0.5 + rng.range(0.0, 0.5);
            self.size = 0.004 + rng.range(0.0, 0.01);
        }
    }
}

/// Camera shake timer; concurrent triggers keep the strongest, never sum
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Shake {
    pub timer: f32,
    pub strength: f32,
}

impl Shake {
    pub fn trigger(&mut self, duration: f32, strength: f32) {
        self.timer = self.timer.max(duration);
        self.strength = self.strength.max(strength);
    }

    pub fn decay(&mut self, dt: f32) {
        if self.timer > 0.0 {
            self.timer = (self.timer - dt).max(0.0);
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }

    /// Maximum view offset this frame
    pub fn magnitude(&self) -> f32 {
        if self.is_active() {
            self.strength * (self.timer / SHAKE_DURATION)
        } else {
            0.0
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: GameRng,
    pub score: u32,
    pub lives: u32,
    pub phase: GamePhase,
    /// Seconds simulated since process start (drives bob and glow)
    pub time: f32,
    /// Seconds since the last shot
    pub shoot_timer: f32,
    pub player: Player,
    pub bullet: Bullet,
    /// Current wave; dead ghosts stay until the wave is replaced
    pub ghosts: Vec<Ghost>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub shake: Shake,
    /// Events recorded during the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed, ready to play
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: GameRng::new(seed),
            score: 0,
            lives: START_LIVES,
            phase: GamePhase::Playing,
            time: 0.0,
            shoot_timer: 0.0,
            player: Player::default(),
            bullet: Bullet::default(),
            ghosts: Vec::with_capacity(MAX_GHOSTS),
            particles: Vec::new(),
            stars: Vec::with_capacity(STAR_COUNT),
            shake: Shake::default(),
            events: Vec::new(),
        };
        state.reset();
        state
    }

    /// Reinitialize everything except the clock and the RNG stream
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.phase = GamePhase::Playing;
        self.player = Player::default();
        self.bullet = Bullet::default();
        self.shoot_timer = 0.0;
        self.shake = Shake::default();
        self.particles.clear();
        self.seed_stars();
        spawn_wave(self, INITIAL_WAVE_SIZE, 1.0);
        log::info!("Game reset (seed {})", self.seed);
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn alive_ghosts(&self) -> usize {
        self.ghosts.iter().filter(|g| g.alive).count()
    }

    fn seed_stars(&mut self) {
        self.stars.clear();
        for _ in 0..STAR_COUNT {
            let star = Star::random(&mut self.rng);
            self.stars.push(star);
        }
    }

    /// Spray a full-life particle burst from `origin`
    pub fn spawn_burst(&mut self, origin: Vec2) {
        self.particles.reserve(BURST_COUNT);
        for _ in 0..BURST_COUNT {
            let angle = self.rng.angle();
            let speed = self.rng.range(PARTICLE_SPEED_MIN, PARTICLE_SPEED_MAX);
            let size = self.rng.range(PARTICLE_SIZE_MIN, PARTICLE_SIZE_MAX);
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 1.0,
                size,
            });
        }
    }
}
