//! Hit-burst particle simulation drawn onto the overlay canvas.
//!
//! Pure point sprites: burst-spawned radially at the click point, advanced
//! once per animation frame, discarded when their life runs out. Every
//! particle is independent; no spatial structure, no collision.

use std::f64::consts::TAU;

/// Downward acceleration applied to `vy` every frame.
pub const GRAVITY: f64 = 0.2;
/// Life drained per frame; a fresh particle lasts about 50 frames.
pub const LIFE_DECAY: f64 = 0.02;

/// A single burst particle. Color and size are fixed at spawn; the draw pass
/// uses the remaining `life` as opacity.
#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub life: f64,
    pub max_life: f64,
    pub color: &'static str,
    pub size: f64,
}

/// Spawn `count` particles arranged radially around (x, y).
///
/// `rand01` supplies values in [0, 1) for the speed and size spread so tests
/// can pin the outcome.
pub fn spawn_burst(
    out: &mut Vec<Particle>,
    x: f64,
    y: f64,
    color: &'static str,
    count: usize,
    mut rand01: impl FnMut() -> f64,
) {
    for i in 0..count {
        let angle = TAU * i as f64 / count as f64;
        let speed = 2.0 + rand01() * 4.0;
        out.push(Particle {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            life: 1.0,
            max_life: 1.0,
            color,
            size: 3.0 + rand01() * 5.0,
        });
    }
}

/// Advance every particle one frame and drop the expired ones.
pub fn step(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| {
        p.x += p.vx;
        p.y += p.vy;
        p.vy += GRAVITY;
        p.life -= LIFE_DECAY;
        p.life > 0.0
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_spawns_radially_with_pinned_randomness() {
        let mut field = Vec::new();
        spawn_burst(&mut field, 10.0, 20.0, "#fff", 4, || 0.0);
        assert_eq!(field.len(), 4);
        // rand01 pinned to 0 means speed 2 and size 3 for everyone
        for p in &field {
            assert!(((p.vx * p.vx + p.vy * p.vy).sqrt() - 2.0).abs() < 1e-9);
            assert_eq!(p.size, 3.0);
            assert_eq!(p.life, 1.0);
            assert_eq!((p.x, p.y), (10.0, 20.0));
        }
        // quarter turns: right, down, left, up (canvas y grows downward)
        assert!((field[0].vx - 2.0).abs() < 1e-9 && field[0].vy.abs() < 1e-9);
        assert!(field[1].vx.abs() < 1e-9 && (field[1].vy - 2.0).abs() < 1e-9);
        assert!((field[2].vx + 2.0).abs() < 1e-9);
        assert!((field[3].vy + 2.0).abs() < 1e-9);
    }

    #[test]
    fn step_integrates_velocity_gravity_and_decay() {
        let mut field = vec![Particle {
            x: 0.0,
            y: 0.0,
            vx: 1.0,
            vy: -2.0,
            life: 1.0,
            max_life: 1.0,
            color: "#fff",
            size: 4.0,
        }];
        step(&mut field);
        let p = &field[0];
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, -2.0);
        assert!((p.vy - (-2.0 + GRAVITY)).abs() < 1e-12);
        assert!((p.life - 0.98).abs() < 1e-12);
    }

    #[test]
    fn step_removes_exactly_the_expired_particles() {
        let mut field = Vec::new();
        spawn_burst(&mut field, 0.0, 0.0, "#fff", 3, || 0.5);
        field[1].life = LIFE_DECAY; // crosses zero on the next step
        field[2].life = LIFE_DECAY / 2.0;
        step(&mut field);
        assert_eq!(field.len(), 1);
        assert!((field[0].life - (1.0 - LIFE_DECAY)).abs() < 1e-12);
    }

    #[test]
    fn fresh_particle_lives_about_fifty_frames() {
        let mut field = Vec::new();
        spawn_burst(&mut field, 0.0, 0.0, "#fff", 1, || 0.0);
        for _ in 0..49 {
            step(&mut field);
        }
        assert_eq!(field.len(), 1);
        // one or two more frames depending on float drift around zero
        step(&mut field);
        step(&mut field);
        assert!(field.is_empty());
    }
}
