// Additional integration tests for catalog / finisher / sound data invariants.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use boss_basher::game::{audio, finisher};
use boss_basher::CATALOG;

#[test]
fn weapon_ids_are_unique_and_lowercase() {
    let mut seen = HashSet::new();
    for w in &CATALOG {
        assert!(seen.insert(w.id), "duplicate weapon id '{}'", w.id);
        assert!(!w.id.is_empty());
        assert!(
            w.id.chars().all(|c| c.is_ascii_lowercase()),
            "weapon id '{}' is not a lowercase slug",
            w.id
        );
        assert!(!w.name.is_empty() && !w.icon.is_empty());
    }
}

#[test]
fn catalog_escalates_in_damage_and_price() {
    assert_eq!(CATALOG.len(), 8);
    // the starter weapon is free; everything after costs money
    assert_eq!(CATALOG[0].cost, 0);
    assert_eq!(CATALOG[0].damage, 5);
    for pair in CATALOG.windows(2) {
        assert!(pair[0].damage < pair[1].damage, "damage must escalate");
        assert!(pair[0].cost < pair[1].cost, "price must escalate");
    }
}

#[test]
fn weapon_rarities_come_from_the_fixed_tier_set() {
    let tiers = ["Common", "Uncommon", "Rare", "Epic", "Legendary"];
    for w in &CATALOG {
        assert!(tiers.contains(&w.rarity), "unknown rarity '{}'", w.rarity);
        assert!(w.particle_count > 0, "weapon '{}' would spawn no burst", w.id);
        assert!(w.color.starts_with('#'), "weapon '{}' color is not a hex value", w.id);
    }
}

#[test]
fn every_weapon_and_reaction_has_a_tone_table() {
    for w in &CATALOG {
        assert!(!audio::weapon_sound(w.id).is_empty(), "weapon '{}' is silent", w.id);
    }
    for pct in [95.0, 45.0, 10.0] {
        assert!(!audio::hurt_sound(pct).is_empty());
    }
    assert!(!audio::DEATH.is_empty());
    assert!(!audio::FINISH_HIM.is_empty());
    assert!(!audio::FATALITY.is_empty());
}

#[test]
fn finisher_names_are_unique_and_every_pick_resolves() {
    let mut seen = HashSet::new();
    for f in &finisher::FINISHERS {
        assert!(seen.insert(f.name), "duplicate finisher '{}'", f.name);
    }
    for roll in 0..32 {
        let f = finisher::pick(roll);
        assert!((2000..=2500).contains(&f.duration_ms));
        assert!(finisher::pick_color(roll).starts_with('#'));
    }
}
