// Finisher table and the fixed text palette for the death sequence.
// Selection is a pure function of a caller-supplied roll so the wasm layer
// can feed it real randomness while tests stay deterministic.

/// A named death animation: CSS animation identifier plus how long the
/// on-screen text stays before the game-over transition.
pub struct Finisher {
    pub name: &'static str,
    pub animation: &'static str,
    pub duration_ms: u32,
}

pub static FINISHERS: [Finisher; 5] = [
    Finisher {
        name: "FATALITY!",
        animation: "fatality-move",
        duration_ms: 2500,
    },
    Finisher {
        name: "K.O.!",
        animation: "ko-move",
        duration_ms: 2000,
    },
    Finisher {
        name: "DESTROYED!",
        animation: "destroyed-move",
        duration_ms: 2300,
    },
    Finisher {
        name: "OVERKILL!",
        animation: "overkill-move",
        duration_ms: 2500,
    },
    Finisher {
        name: "REKT!",
        animation: "rekt-move",
        duration_ms: 2200,
    },
];

/// Colors the finisher text cycles through, one picked at random per defeat.
pub static TEXT_COLORS: [&str; 5] = ["#FFD700", "#FF0000", "#00FF00", "#FF00FF", "#00FFFF"];

pub fn pick(roll: usize) -> &'static Finisher {
    &FINISHERS[roll % FINISHERS.len()]
}

pub fn pick_color(roll: usize) -> &'static str {
    TEXT_COLORS[roll % TEXT_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_wraps_around_the_table() {
        assert_eq!(pick(0).name, "FATALITY!");
        assert_eq!(pick(FINISHERS.len()).name, "FATALITY!");
        assert_eq!(pick(3).name, "OVERKILL!");
        assert_eq!(pick_color(7), TEXT_COLORS[2]);
    }

    #[test]
    fn every_finisher_display_fits_the_climax_window() {
        for f in &FINISHERS {
            assert!((2000..=2500).contains(&f.duration_ms), "{}", f.name);
            assert!(!f.animation.is_empty());
            assert!(f.name.ends_with('!'));
        }
    }
}
