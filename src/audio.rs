//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Everything here is best-effort: a missing AudioContext or a failed node
//! call just means silence.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{GameEvent, SceneKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bullet fired
    Gunshot,
    /// Bullet hit an enemy that survived
    EnemyHit,
    /// Enemy destroyed
    EnemyKill,
    /// Enemy rammed the car
    PlayerHit,
    /// Fuel canister collected
    Pickup,
    /// Low fuel warning raised
    LowFuel,
    MissionStart,
    MissionComplete,
    /// Health ran out
    Death,
}

/// Vibration pulse per shot (ms)
const SHOT_VIBRATION_MS: u32 = 40;
/// Engine drone pitch (Hz)
const ENGINE_FREQ: f32 = 80.0;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Running engine drone, if started
    engine: Option<(OscillatorNode, GainNode)>,
    master_volume: f32,
    sfx_volume: f32,
    engine_volume: f32,
    muted: bool,
    haptics: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            engine: None,
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            engine_volume: settings.engine_volume,
            muted: settings.muted,
            haptics: settings.haptics,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// React to a simulation event with sound and vibration
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SceneChanged(SceneKind::Play) => self.start_engine(),
            GameEvent::SceneChanged(_) => self.stop_engine(),
            GameEvent::Shot { .. } => {
                self.play(SoundEffect::Gunshot);
                self.vibrate(SHOT_VIBRATION_MS);
            }
            GameEvent::EnemyHit { .. } => self.play(SoundEffect::EnemyHit),
            GameEvent::EnemyKilled { .. } => self.play(SoundEffect::EnemyKill),
            GameEvent::PlayerHit { .. } => self.play(SoundEffect::PlayerHit),
            GameEvent::FuelCollected { .. } => self.play(SoundEffect::Pickup),
            GameEvent::LowFuel => self.play(SoundEffect::LowFuel),
            GameEvent::MissionStarted { .. } => self.play(SoundEffect::MissionStart),
            GameEvent::MissionCompleted => self.play(SoundEffect::MissionComplete),
            GameEvent::PlayerDied => {
                self.stop_engine();
                self.play(SoundEffect::Death);
            }
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Gunshot => self.play_gunshot(ctx, vol),
            SoundEffect::EnemyHit => self.play_tone(ctx, vol * 0.3, 300.0, 0.06),
            SoundEffect::EnemyKill => self.play_kill(ctx, vol),
            SoundEffect::PlayerHit => self.play_thump(ctx, vol),
            SoundEffect::Pickup => self.play_arpeggio(ctx, vol, &[523.25, 659.25, 783.99]),
            SoundEffect::LowFuel => self.play_warning(ctx, vol),
            SoundEffect::MissionStart => self.play_arpeggio(ctx, vol * 0.6, &[392.0, 523.25]),
            SoundEffect::MissionComplete => {
                self.play_arpeggio(ctx, vol, &[523.25, 659.25, 783.99, 1046.50])
            }
            SoundEffect::Death => self.play_death(ctx, vol),
        }
    }

    /// Start the continuous engine drone. No-op if already running.
    pub fn start_engine(&mut self) {
        if self.engine.is_some() || self.muted {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        let Some((osc, gain)) = create_osc(ctx, ENGINE_FREQ, OscillatorType::Sawtooth) else {
            return;
        };
        let vol = self.master_volume * self.engine_volume * 0.1;
        gain.gain().set_value_at_time(vol, ctx.current_time()).ok();
        if osc.start().is_ok() {
            log::debug!("Engine drone started");
            self.engine = Some((osc, gain));
        }
    }

    pub fn stop_engine(&mut self) {
        if let Some((osc, _gain)) = self.engine.take() {
            let _ = osc.stop();
            log::debug!("Engine drone stopped");
        }
    }

    /// Short vibration pulse, if the device supports it and haptics are on
    pub fn vibrate(&self, ms: u32) {
        if !self.haptics {
            return;
        }
        if let Some(window) = web_sys::window() {
            let _ = window.navigator().vibrate_with_duration(ms);
        }
    }

    // === Sound generators ===

    /// Gunshot - sharp square blip
    fn play_gunshot(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 1000.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Single decaying tone
    fn play_tone(&self, ctx: &AudioContext, vol: f32, freq: f32, length: f64) {
        let Some((osc, gain)) = create_osc(ctx, freq, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + length)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + length + 0.02).ok();
    }

    /// Enemy destroyed - falling crunch
    fn play_kill(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 400.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();
        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.25)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Collision - low thump
    fn play_thump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 150.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Rising notes, one after another
    fn play_arpeggio(&self, ctx: &AudioContext, vol: f32, notes: &[f32]) {
        let t = ctx.current_time();

        for (i, &freq) in notes.iter().enumerate() {
            let Some((osc, gain)) = create_osc(ctx, freq, OscillatorType::Sine) else {
                continue;
            };
            let start = t + i as f64 * 0.08;

            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.3, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.2)
                .ok();

            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.25).ok();
        }
    }

    /// Low fuel - two short beeps
    fn play_warning(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        for i in 0..2 {
            let Some((osc, gain)) = create_osc(ctx, 880.0, OscillatorType::Square) else {
                continue;
            };
            let start = t + i as f64 * 0.18;

            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.15, start).ok();
            gain.gain().set_value_at_time(0.0, start + 0.1).ok();

            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.12).ok();
        }
    }

    /// Death - long descending slide
    fn play_death(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 300.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.8)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(40.0, t + 0.8)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.85).ok();
    }
}

/// Create an oscillator routed through its own gain node
fn create_osc(
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
