//! Procedurally synthesized sound effects.
//!
//! Every sound is a static table of [`ToneSpec`]s: oscillator waveform, a
//! frequency trajectory, a gain envelope, and start/stop offsets relative to
//! the trigger instant. Playback walks the table and schedules one
//! oscillator+gain pair per entry on a shared, lazily created AudioContext.
//! There is no feedback and no runtime audio state beyond these tables; the
//! only branch is the boss hurt grunt, which picks among three parameter sets
//! by remaining health.

use std::cell::RefCell;

use web_sys::{AudioContext, OscillatorType};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Sawtooth,
}

/// Ramp shape for a trajectory segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ramp {
    Exp,
    Lin,
}

/// One trajectory segment: ramp to `target` by `at` seconds after trigger.
#[derive(Clone, Copy, Debug)]
pub struct Seg {
    pub ramp: Ramp,
    pub target: f64,
    pub at: f64,
}

/// A single scheduled oscillator: initial frequency/gain applied at `start`,
/// trajectory segments after that, stopped at `stop` (seconds from trigger).
pub struct ToneSpec {
    pub wave: Wave,
    pub freq: f64,
    pub freq_ramp: &'static [Seg],
    pub gain: f64,
    pub gain_ramp: &'static [Seg],
    pub start: f64,
    pub stop: f64,
}

// --- Weapon sounds -----------------------------------------------------------

/// Punch: short low thump.
pub static PUNCH: [ToneSpec; 1] = [ToneSpec {
    wave: Wave::Sine,
    freq: 100.0,
    freq_ramp: &[Seg { ramp: Ramp::Exp, target: 40.0, at: 0.1 }],
    gain: 0.3,
    gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 0.1 }],
    start: 0.0,
    stop: 0.1,
}];

/// Bat: swing whoosh, up then down.
pub static BAT: [ToneSpec; 1] = [ToneSpec {
    wave: Wave::Sawtooth,
    freq: 200.0,
    freq_ramp: &[
        Seg { ramp: Ramp::Exp, target: 800.0, at: 0.08 },
        Seg { ramp: Ramp::Exp, target: 100.0, at: 0.15 },
    ],
    gain: 0.2,
    gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 0.15 }],
    start: 0.0,
    stop: 0.15,
}];

/// Hammer: heavy thud.
pub static HAMMER: [ToneSpec; 1] = [ToneSpec {
    wave: Wave::Sine,
    freq: 80.0,
    freq_ramp: &[Seg { ramp: Ramp::Exp, target: 30.0, at: 0.2 }],
    gain: 0.4,
    gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 0.2 }],
    start: 0.0,
    stop: 0.2,
}];

/// Knife: sharp slash.
pub static KNIFE: [ToneSpec; 1] = [ToneSpec {
    wave: Wave::Sawtooth,
    freq: 1000.0,
    freq_ramp: &[
        Seg { ramp: Ramp::Exp, target: 2000.0, at: 0.05 },
        Seg { ramp: Ramp::Exp, target: 500.0, at: 0.1 },
    ],
    gain: 0.2,
    gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 0.1 }],
    start: 0.0,
    stop: 0.1,
}];

/// Gun: bang.
pub static GUN: [ToneSpec; 1] = [ToneSpec {
    wave: Wave::Square,
    freq: 500.0,
    freq_ramp: &[Seg { ramp: Ramp::Exp, target: 100.0, at: 0.05 }],
    gain: 0.3,
    gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 0.05 }],
    start: 0.0,
    stop: 0.05,
}];

/// Bomb: rumbling explosion.
pub static BOMB: [ToneSpec; 1] = [ToneSpec {
    wave: Wave::Sawtooth,
    freq: 100.0,
    freq_ramp: &[Seg { ramp: Ramp::Exp, target: 40.0, at: 0.3 }],
    gain: 0.5,
    gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 0.3 }],
    start: 0.0,
    stop: 0.3,
}];

/// Lightning: electric zap with a held middle.
pub static LIGHTNING: [ToneSpec; 1] = [ToneSpec {
    wave: Wave::Square,
    freq: 2000.0,
    freq_ramp: &[Seg { ramp: Ramp::Exp, target: 100.0, at: 0.15 }],
    gain: 0.3,
    gain_ramp: &[
        Seg { ramp: Ramp::Lin, target: 0.1, at: 0.1 },
        Seg { ramp: Ramp::Exp, target: 0.01, at: 0.15 },
    ],
    start: 0.0,
    stop: 0.15,
}];

/// Rocket: whoosh, then a delayed boom layered on top.
pub static ROCKET: [ToneSpec; 2] = [
    ToneSpec {
        wave: Wave::Sawtooth,
        freq: 400.0,
        freq_ramp: &[Seg { ramp: Ramp::Exp, target: 1200.0, at: 0.2 }],
        gain: 0.2,
        gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 0.2 }],
        start: 0.0,
        stop: 0.2,
    },
    ToneSpec {
        wave: Wave::Sawtooth,
        freq: 150.0,
        freq_ramp: &[Seg { ramp: Ramp::Exp, target: 50.0, at: 0.4 }],
        gain: 0.5,
        gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 0.4 }],
        start: 0.15,
        stop: 0.4,
    },
];

// --- Boss reaction sounds ----------------------------------------------------

/// Light grunt, healthy boss.
pub static HURT_LIGHT: [ToneSpec; 1] = [ToneSpec {
    wave: Wave::Sawtooth,
    freq: 200.0,
    freq_ramp: &[Seg { ramp: Ramp::Exp, target: 120.0, at: 0.15 }],
    gain: 0.25,
    gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 0.15 }],
    start: 0.0,
    stop: 0.15,
}];

/// Moderate pain grunt, below 60% health.
pub static HURT_MODERATE: [ToneSpec; 1] = [ToneSpec {
    wave: Wave::Sawtooth,
    freq: 250.0,
    freq_ramp: &[Seg { ramp: Ramp::Exp, target: 150.0, at: 0.2 }],
    gain: 0.3,
    gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 0.2 }],
    start: 0.0,
    stop: 0.2,
}];

/// Desperate scream, below 30% health: pitch rises before it falls.
pub static HURT_DESPERATE: [ToneSpec; 1] = [ToneSpec {
    wave: Wave::Sawtooth,
    freq: 300.0,
    freq_ramp: &[
        Seg { ramp: Ramp::Lin, target: 450.0, at: 0.1 },
        Seg { ramp: Ramp::Exp, target: 200.0, at: 0.3 },
    ],
    gain: 0.4,
    gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 0.3 }],
    start: 0.0,
    stop: 0.3,
}];

/// Defeat: long descending scream, a sine wobble underneath, final thud.
pub static DEATH: [ToneSpec; 3] = [
    ToneSpec {
        wave: Wave::Sawtooth,
        freq: 400.0,
        freq_ramp: &[Seg { ramp: Ramp::Exp, target: 100.0, at: 0.8 }],
        gain: 0.4,
        gain_ramp: &[
            Seg { ramp: Ramp::Lin, target: 0.3, at: 0.4 },
            Seg { ramp: Ramp::Exp, target: 0.01, at: 0.8 },
        ],
        start: 0.0,
        stop: 0.8,
    },
    ToneSpec {
        wave: Wave::Sine,
        freq: 350.0,
        freq_ramp: &[Seg { ramp: Ramp::Exp, target: 80.0, at: 0.8 }],
        gain: 0.3,
        gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 0.8 }],
        start: 0.0,
        stop: 0.8,
    },
    ToneSpec {
        wave: Wave::Sine,
        freq: 60.0,
        freq_ramp: &[Seg { ramp: Ramp::Exp, target: 30.0, at: 1.0 }],
        gain: 0.5,
        gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 1.0 }],
        start: 0.8,
        stop: 1.0,
    },
];

/// Deep dramatic drone when finish-him mode engages.
pub static FINISH_HIM: [ToneSpec; 1] = [ToneSpec {
    wave: Wave::Sawtooth,
    freq: 200.0,
    freq_ramp: &[Seg { ramp: Ramp::Exp, target: 50.0, at: 1.0 }],
    gain: 0.4,
    gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 1.0 }],
    start: 0.0,
    stop: 1.0,
}];

/// Finisher fanfare: rising square sting, then a delayed explosion.
pub static FATALITY: [ToneSpec; 2] = [
    ToneSpec {
        wave: Wave::Square,
        freq: 400.0,
        freq_ramp: &[Seg { ramp: Ramp::Exp, target: 800.0, at: 0.5 }],
        gain: 0.3,
        gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 0.5 }],
        start: 0.0,
        stop: 0.5,
    },
    ToneSpec {
        wave: Wave::Sawtooth,
        freq: 100.0,
        freq_ramp: &[Seg { ramp: Ramp::Exp, target: 30.0, at: 1.5 }],
        gain: 0.5,
        gain_ramp: &[Seg { ramp: Ramp::Exp, target: 0.01, at: 1.5 }],
        start: 0.5,
        stop: 1.5,
    },
];

// --- Lookup ------------------------------------------------------------------

/// Sound table for a catalog weapon id; unknown ids are silent.
pub fn weapon_sound(id: &str) -> &'static [ToneSpec] {
    match id {
        "punch" => &PUNCH,
        "bat" => &BAT,
        "hammer" => &HAMMER,
        "knife" => &KNIFE,
        "gun" => &GUN,
        "bomb" => &BOMB,
        "lightning" => &LIGHTNING,
        "rocket" => &ROCKET,
        _ => &[],
    }
}

/// Hurt grunt parameter set for the boss's remaining health percentage; the
/// boss gets louder and higher-pitched the closer it is to death.
pub fn hurt_sound(health_pct: f64) -> &'static [ToneSpec] {
    if health_pct < 30.0 {
        &HURT_DESPERATE
    } else if health_pct < 60.0 {
        &HURT_MODERATE
    } else {
        &HURT_LIGHT
    }
}

// --- Playback ----------------------------------------------------------------

thread_local! {
    // Created on first use: browsers refuse AudioContexts before a gesture.
    static AUDIO_CTX: RefCell<Option<AudioContext>> = const { RefCell::new(None) };
}

/// Schedule a tone table on the shared AudioContext.
pub fn play(specs: &[ToneSpec]) {
    AUDIO_CTX.with(|cell| {
        if cell.borrow().is_none() {
            if let Ok(ctx) = AudioContext::new() {
                *cell.borrow_mut() = Some(ctx);
            }
        }
        if let Some(ctx) = cell.borrow().as_ref() {
            let now = ctx.current_time();
            for spec in specs {
                schedule(ctx, spec, now);
            }
        }
    });
}

fn schedule(ctx: &AudioContext, spec: &ToneSpec, now: f64) {
    let Ok(osc) = ctx.create_oscillator() else {
        return;
    };
    let Ok(gain) = ctx.create_gain() else {
        return;
    };

    osc.set_type(match spec.wave {
        Wave::Sine => OscillatorType::Sine,
        Wave::Square => OscillatorType::Square,
        Wave::Sawtooth => OscillatorType::Sawtooth,
    });

    let freq = osc.frequency();
    freq.set_value_at_time(spec.freq as f32, now + spec.start).ok();
    for seg in spec.freq_ramp {
        match seg.ramp {
            Ramp::Exp => freq
                .exponential_ramp_to_value_at_time(seg.target as f32, now + seg.at)
                .ok(),
            Ramp::Lin => freq
                .linear_ramp_to_value_at_time(seg.target as f32, now + seg.at)
                .ok(),
        };
    }

    let level = gain.gain();
    level.set_value_at_time(spec.gain as f32, now + spec.start).ok();
    for seg in spec.gain_ramp {
        match seg.ramp {
            Ramp::Exp => level
                .exponential_ramp_to_value_at_time(seg.target as f32, now + seg.at)
                .ok(),
            Ramp::Lin => level
                .linear_ramp_to_value_at_time(seg.target as f32, now + seg.at)
                .ok(),
        };
    }

    osc.connect_with_audio_node(&gain).ok();
    gain.connect_with_audio_node(&ctx.destination()).ok();
    osc.start_with_when(now + spec.start).ok();
    osc.stop_with_when(now + spec.stop).ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::weapons::CATALOG;

    fn all_sounds() -> Vec<(&'static str, &'static [ToneSpec])> {
        vec![
            ("punch", &PUNCH),
            ("bat", &BAT),
            ("hammer", &HAMMER),
            ("knife", &KNIFE),
            ("gun", &GUN),
            ("bomb", &BOMB),
            ("lightning", &LIGHTNING),
            ("rocket", &ROCKET),
            ("hurt_light", &HURT_LIGHT),
            ("hurt_moderate", &HURT_MODERATE),
            ("hurt_desperate", &HURT_DESPERATE),
            ("death", &DEATH),
            ("finish_him", &FINISH_HIM),
            ("fatality", &FATALITY),
        ]
    }

    #[test]
    fn every_catalog_weapon_has_a_sound() {
        for w in &CATALOG {
            assert!(!weapon_sound(w.id).is_empty(), "silent weapon {}", w.id);
        }
        assert!(weapon_sound("no-such-weapon").is_empty());
    }

    #[test]
    fn hurt_sound_tiers_by_health() {
        assert!(std::ptr::eq(hurt_sound(95.0).as_ptr(), HURT_LIGHT.as_ptr()));
        assert!(std::ptr::eq(hurt_sound(60.0).as_ptr(), HURT_LIGHT.as_ptr()));
        assert!(std::ptr::eq(hurt_sound(59.9).as_ptr(), HURT_MODERATE.as_ptr()));
        assert!(std::ptr::eq(hurt_sound(30.0).as_ptr(), HURT_MODERATE.as_ptr()));
        assert!(std::ptr::eq(hurt_sound(29.9).as_ptr(), HURT_DESPERATE.as_ptr()));
        assert!(std::ptr::eq(hurt_sound(1.0).as_ptr(), HURT_DESPERATE.as_ptr()));
    }

    #[test]
    fn tone_tables_are_well_formed() {
        for (name, specs) in all_sounds() {
            assert!(!specs.is_empty(), "{name}");
            for spec in specs {
                assert!(spec.stop > spec.start, "{name}");
                assert!(spec.freq > 0.0 && spec.gain > 0.0, "{name}");
                // exponential ramps cannot reach zero, and every trajectory
                // must resolve within the oscillator's lifetime
                for seg in spec.freq_ramp.iter().chain(spec.gain_ramp) {
                    assert!(seg.target > 0.0, "{name}");
                    assert!(seg.at > spec.start && seg.at <= spec.stop, "{name}");
                }
                // segments are scheduled in order
                for w in [spec.freq_ramp, spec.gain_ramp] {
                    for pair in w.windows(2) {
                        assert!(pair[0].at <= pair[1].at, "{name}");
                    }
                }
            }
        }
    }
}
