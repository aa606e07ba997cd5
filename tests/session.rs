// Integration tests (native) for the `boss-basher` crate.
// These tests avoid wasm-specific functionality and exercise the pure session
// rules through the public API so they run under `cargo test` on the host.

use boss_basher::{GameSession, CATALOG};

#[test]
fn fresh_session_matches_the_catalog_baseline() {
    let session = GameSession::new();
    assert_eq!(session.health, 100);
    assert_eq!(session.money, 1000);
    assert_eq!(session.total_damage, 0);
    assert_eq!(session.combo_count, 0);
    assert!(!session.is_game_over);
    assert!(!session.is_finish_him_mode);
    assert!(session.particles.is_empty());
    assert_eq!(session.selected_weapon().id, "punch");
    assert_eq!(session.weapons.len(), CATALOG.len());
}

#[test]
fn one_starter_hit_end_to_end() {
    // starting money 1000, base weapon damage 5, no prior combo
    let mut session = GameSession::new();
    let outcome = session.resolve_hit(50_000.0).expect("boss is alive");
    assert_eq!(outcome.damage, 5);
    assert_eq!(session.health, 95);
    assert_eq!(session.total_damage, 5);
    assert_eq!(session.money, 1005);
    assert!(!outcome.died);
    assert!(!outcome.finish_him_activated);
}

#[test]
fn health_never_leaves_its_bounds_over_a_long_rally() {
    let mut session = GameSession::new();
    session.purchase(1); // bat
    let mut clock = 1000.0;
    for _ in 0..200 {
        clock += 90.0;
        if let Some(outcome) = session.resolve_hit(clock) {
            assert!(session.health <= session.max_health);
            if outcome.died {
                assert_eq!(session.health, 0);
            }
        } else {
            // latched: nothing moves any more
            let (h, t, m) = (session.health, session.total_damage, session.money);
            clock += 90.0;
            assert!(session.resolve_hit(clock).is_none());
            assert_eq!((h, t, m), (session.health, session.total_damage, session.money));
            return;
        }
    }
    panic!("a 200-hit bat rally must finish a 100 hp boss");
}

#[test]
fn finish_him_fires_once_on_the_way_down() {
    let mut session = GameSession::new();
    let mut activations = 0;
    let mut clock = 1000.0;
    loop {
        clock += 100.0;
        match session.resolve_hit(clock) {
            Some(outcome) => {
                if outcome.finish_him_activated {
                    activations += 1;
                    // latched inside the (0, 7] band
                    let pct = session.health_percent();
                    assert!(pct > 0.0 && pct <= 7.0);
                }
                if outcome.died {
                    break;
                }
            }
            None => break,
        }
    }
    assert!(activations <= 1);
    assert!(session.is_game_over);
}

#[test]
fn money_funds_upgrades_and_restart_restores_prices() {
    let mut session = GameSession::new();
    assert!(session.purchase(3)); // knife, 500
    assert_eq!(session.selected_weapon().id, "knife");
    assert_eq!(session.money, 500);
    assert_eq!(session.weapons[3].cost, 0);
    // still short for the bomb: silent no-op, selection stays put
    assert!(!session.purchase(5));
    assert_eq!(session.selected_weapon().id, "knife");
    assert_eq!(session.money, 500);
    // re-buying the knife is free now
    assert!(session.purchase(3));
    assert_eq!(session.money, 500);
    // restart is the only way back to the price tag
    session.restart();
    assert_eq!(session.weapons[3].cost, 500);
    assert_eq!(session.selected_weapon().id, "punch");
}

#[test]
fn particles_decay_independently_of_combat() {
    let mut session = GameSession::new();
    boss_basher::game::particles::spawn_burst(
        &mut session.particles,
        50.0,
        50.0,
        "#ff6b6b",
        12,
        || 0.25,
    );
    assert_eq!(session.particles.len(), 12);
    session.step_particles();
    assert_eq!(session.particles.len(), 12);
    for _ in 0..60 {
        session.step_particles();
    }
    assert!(session.particles.is_empty());
}
