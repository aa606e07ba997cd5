//! Boss Basher core crate.
//!
//! A clicker boss fight: the player clicks the boss element to deal damage
//! with the selected weapon, earns money from the damage dealt, and escalates
//! through combo multipliers into finish-him mode and a randomized finisher.
//! All gameplay rules and the DOM/canvas/audio glue live under [`game`]; this
//! file only hosts the wasm entrypoints and convenience re-exports so native
//! tests can reach the pure logic.

use wasm_bindgen::prelude::*;

pub mod game;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Second init (e.g. hot reload) fails; that is fine.
    let _ = console_log::init_with_level(log::Level::Info);
}

pub use game::session::{GameSession, HitOutcome, Weapon};
pub use game::weapons::CATALOG;

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    // Wire the arena DOM, listeners and the frame loop.
    game::start_arena_mode()
}
