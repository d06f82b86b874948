//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects, one per gameplay event. The event
//! mapping is platform independent; playback only exists in the browser.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bullet leaves the turret
    Shoot,
    /// Ghost destroyed
    GhostPop,
    /// Ghost slipped past the baseline
    LifeLost,
    /// New wave entered
    WaveStart,
    /// Last life gone
    GameOver,
    /// Fresh game after game over
    Restart,
}

impl SoundEffect {
    /// The sound that accompanies a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Fired => Some(SoundEffect::Shoot),
            GameEvent::GhostDestroyed { .. } => Some(SoundEffect::GhostPop),
            // The game-over jingle covers the last life
            GameEvent::LifeLost { lives_left: 0 } => None,
            GameEvent::LifeLost { .. } => Some(SoundEffect::LifeLost),
            GameEvent::WaveSpawned { .. } => Some(SoundEffect::WaveStart),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::Restarted => Some(SoundEffect::Restart),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Creation fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Pick up volume/mute changes
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Shoot => self.play_shoot(ctx, vol),
                SoundEffect::GhostPop => self.play_ghost_pop(ctx, vol),
                SoundEffect::LifeLost => self.play_life_lost(ctx, vol),
                SoundEffect::WaveStart => self.play_wave_start(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
                SoundEffect::Restart => self.play_restart(ctx, vol),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short rising zap
        fn play_shoot(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 700.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.12, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency().set_value_at_time(700.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(1400.0, t + 0.06)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Descending pop with a noisy crack on top
        fn play_ghost_pop(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 520.0, OscillatorType::Triangle) {
                gain.gain().set_value_at_time(vol * 0.35, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.frequency().set_value_at_time(520.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(90.0, t + 0.2)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.25).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 2200.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.1, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.06)
                    .ok();
                osc.frequency().set_value_at_time(2200.0, t).ok();
                osc.frequency().set_value_at_time(3400.0, t + 0.02).ok();
                osc.frequency().set_value_at_time(1600.0, t + 0.04).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.08).ok();
            }
        }

        /// Low thud with a falling tail
        fn play_life_lost(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.45)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.45)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }

        /// Rising arpeggio
        fn play_wave_start(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [330.0, 440.0, 550.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.22, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.25).ok();
                }
            }
        }

        /// Sad descending
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }

        /// Upward sweep
        fn play_restart(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency().set_value_at_time(200.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(800.0, t + 0.2)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_every_gameplay_event_is_audible() {
        let cases = [
            (GameEvent::Fired, SoundEffect::Shoot),
            (
                GameEvent::GhostDestroyed { pos: Vec2::ZERO },
                SoundEffect::GhostPop,
            ),
            (GameEvent::LifeLost { lives_left: 2 }, SoundEffect::LifeLost),
            (
                GameEvent::WaveSpawned {
                    count: 4,
                    speed_scale: 1.0,
                },
                SoundEffect::WaveStart,
            ),
            (GameEvent::GameOver { score: 30 }, SoundEffect::GameOver),
            (GameEvent::Restarted, SoundEffect::Restart),
        ];
        for (event, effect) in cases {
            assert_eq!(SoundEffect::for_event(&event), Some(effect));
        }
    }

    #[test]
    fn test_last_life_defers_to_game_over() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::LifeLost { lives_left: 0 }),
            None
        );
    }
}
