//! Arena mode: the clicker boss fight.
//!
//! This module owns the glue between the pure session rules and the page:
//! element lookups, event-listener closures, the requestAnimationFrame loop
//! that drives the particle canvas, and the one-shot timers behind transient
//! visuals (damage numbers, screen flash, finisher text). All mutable state
//! lives in a single thread-local cell; callbacks never preempt each other so
//! plain `RefCell` borrows are enough.
//!
//! Page contract: markup and styling belong to the host page. The crate only
//! looks elements up by id (`boss`, `health-bar`, `weapons-grid`, ...),
//! toggles classes and rewrites text. See `start_arena_mode` and the helpers
//! below for the full id list.

use std::cell::{Cell, RefCell};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{window, CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement};

pub mod audio;
pub mod finisher;
pub mod particles;
pub mod session;
pub mod weapons;

use session::{GameSession, HitOutcome};

// --- Presentation timing constants -------------------------------------------

/// Delay before the boss reacts audibly to a hit.
const HURT_SOUND_DELAY_MS: i32 = 100;
/// How long a floating damage number stays in the DOM.
const DAMAGE_NUMBER_MS: i32 = 1000;
/// Full-screen flash when finish-him mode engages.
const FLASH_MS: i32 = 500;
/// How long the finish-him banner stays up.
const BANNER_MS: i32 = 3000;
/// Global screen shake on high combos.
const SCREEN_SHAKE_MS: i32 = 300;
/// Gap between the finisher text disappearing and the summary panel.
const SUMMARY_DELAY_MS: i32 = 1000;
/// Combo count from which the on-screen counter shows up.
const COMBO_DISPLAY_MIN: u32 = 3;

// --- Runtime state ------------------------------------------------------------

/// Everything the presentation layer needs per event: the pure session plus
/// the handles painted every frame and the one cancellable timer.
struct ArenaState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    boss: HtmlElement,
    session: GameSession,
    /// Pending combo-reset timeout; rearmed (cleared + reset) on every hit.
    combo_timer: Option<i32>,
    /// Keeps the combo closure alive between rearms; replacing it frees the
    /// previous one.
    combo_closure: Option<Closure<dyn FnMut()>>,
}

thread_local! {
    static ARENA: RefCell<Option<ArenaState>> = const { RefCell::new(None) };
    static RNG_STATE: Cell<usize> = const { Cell::new(0) };
}

type FrameCallback = std::rc::Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

// --- Small platform helpers ---------------------------------------------------

fn document() -> Result<Document, JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn element(doc: &Document, id: &str) -> Result<Element, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

// Linear congruential step over a performance.now() seed (not crypto secure,
// plenty for visual/audio variety).
fn next_rand() -> usize {
    RNG_STATE.with(|s| {
        let mut v = s.get();
        if v == 0 {
            v = performance_now() as u64 as usize | 1;
        }
        v = v.wrapping_mul(1664525).wrapping_add(1013904223);
        s.set(v);
        v
    })
}

fn rand_index(len: usize) -> usize {
    if len == 0 { 0 } else { next_rand() % len }
}

fn rand01() -> f64 {
    (next_rand() % 10_000) as f64 / 10_000.0
}

/// Fire-and-forget one-shot timer; the closure frees itself after running.
fn set_timeout(f: impl FnOnce() + 'static, ms: i32) -> Option<i32> {
    let win = window()?;
    let cb = Closure::once_into_js(f);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
        .ok()
}

// --- Startup -------------------------------------------------------------------

/// Wire the arena: canvas sizing, session state, HUD, listeners, frame loop.
pub fn start_arena_mode() -> Result<(), JsValue> {
    let doc = document()?;

    let canvas: HtmlCanvasElement = element(&doc, "game-canvas")?.dyn_into()?;
    let container = element(&doc, "boss-container")?;
    canvas.set_width(container.client_width().max(0) as u32);
    canvas.set_height(container.client_height().max(0) as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let boss: HtmlElement = element(&doc, "boss")?.dyn_into()?;

    ARENA.with(|cell| {
        cell.replace(Some(ArenaState {
            canvas: canvas.clone(),
            ctx,
            boss: boss.clone(),
            session: GameSession::new(),
            combo_timer: None,
            combo_closure: None,
        }))
    });

    render_hud(&doc)?;
    wire_listeners(&doc, &boss, &canvas)?;
    start_arena_loop();

    log::info!(
        "arena ready: {} weapons in the catalog, boss at {} hp",
        weapons::CATALOG.len(),
        session::MAX_HEALTH
    );
    Ok(())
}

/// First paint of every HUD element from the fresh session.
fn render_hud(doc: &Document) -> Result<(), JsValue> {
    ARENA.with(|cell| {
        if let Some(state) = cell.borrow().as_ref() {
            update_health(doc, state.session.health_percent());
            update_total_damage(doc, state.session.total_damage);
            update_money(doc, state.session.money);
            if let Ok(icon) = element(doc, "current-weapon-icon") {
                icon.set_text_content(Some(state.session.selected_weapon().icon));
            }
            render_weapon_grid(doc, &state.session)?;
        }
        Ok(())
    })
}

fn wire_listeners(doc: &Document, boss: &HtmlElement, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    // Boss clicks are the one gameplay input.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            on_boss_hit(&evt);
        }) as Box<dyn FnMut(_)>);
        boss.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keep the particle canvas matched to its container.
    {
        let canvas_resize = canvas.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if let Ok(doc) = document() {
                if let Ok(container) = element(&doc, "boss-container") {
                    canvas_resize.set_width(container.client_width().max(0) as u32);
                    canvas_resize.set_height(container.client_height().max(0) as u32);
                }
            }
        }) as Box<dyn FnMut(_)>);
        window()
            .ok_or_else(|| JsValue::from_str("no window"))?
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // One delegated listener on the grid handles every weapon card; cards
    // carry their catalog index in a data attribute, so the innerHTML
    // re-render never leaks per-card closures.
    {
        let grid = element(doc, "weapons-grid")?;
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            on_weapon_card_click(&evt);
        }) as Box<dyn FnMut(_)>);
        grid.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Restart plus the weapons panel open/close controls.
    wire_click(doc, "restart-btn", on_restart)?;
    wire_click(doc, "weapon-selector-btn", || {
        if let Ok(doc) = document() {
            open_weapons_panel(&doc);
        }
    })?;
    wire_click(doc, "close-weapons-btn", || {
        if let Ok(doc) = document() {
            close_weapons_panel(&doc);
        }
    })?;
    wire_click(doc, "weapons-overlay", || {
        if let Ok(doc) = document() {
            close_weapons_panel(&doc);
        }
    })?;

    Ok(())
}

fn wire_click(doc: &Document, id: &str, handler: impl Fn() + 'static) -> Result<(), JsValue> {
    let target = element(doc, id)?;
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        handler();
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// --- Frame loop ----------------------------------------------------------------

fn start_arena_loop() {
    let f: FrameCallback = std::rc::Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        ARENA.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                arena_tick(state);
            }
        });
        if let Some(w) = window() {
            let _ = w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

/// Per-frame work: advance the particle field and repaint it.
fn arena_tick(state: &mut ArenaState) {
    state.session.step_particles();

    let w = f64::from(state.canvas.width());
    let h = f64::from(state.canvas.height());
    state.ctx.clear_rect(0.0, 0.0, w, h);
    for p in &state.session.particles {
        state.ctx.set_global_alpha(p.life.clamp(0.0, 1.0));
        state.ctx.set_fill_style_str(p.color);
        state.ctx.begin_path();
        state
            .ctx
            .arc(p.x, p.y, p.size, 0.0, std::f64::consts::TAU)
            .ok();
        state.ctx.fill();
    }
    state.ctx.set_global_alpha(1.0);
}

// --- Combat presentation --------------------------------------------------------

fn on_boss_hit(evt: &web_sys::MouseEvent) {
    let Ok(doc) = document() else {
        return;
    };
    let now = performance_now();
    ARENA.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            // None once game-over latched: dead bosses ignore clicks.
            let Some(outcome) = state.session.resolve_hit(now) else {
                return;
            };
            present_hit(&doc, state, evt, &outcome);
        }
    });
}

fn present_hit(doc: &Document, state: &mut ArenaState, evt: &web_sys::MouseEvent, outcome: &HitOutcome) {
    let weapon = state.session.selected_weapon().clone();
    let pct = state.session.health_percent();

    rearm_combo_timer(state);

    // Weapon report first, then the boss reacts (only while it still lives).
    audio::play(audio::weapon_sound(weapon.id));
    if !outcome.died {
        set_timeout(move || audio::play(audio::hurt_sound(pct)), HURT_SOUND_DELAY_MS);
    }

    // Radial burst on the overlay canvas, doubled while finish-him mode runs.
    let count = weapon.particle_count * if state.session.is_finish_him_mode { 2 } else { 1 };
    let x = f64::from(evt.offset_x() + state.boss.offset_left());
    let y = f64::from(evt.offset_y() + state.boss.offset_top());
    particles::spawn_burst(&mut state.session.particles, x, y, weapon.color, count, rand01);

    show_damage_number(doc, evt.client_x(), evt.client_y(), outcome.damage, weapon.color);
    shake_boss(state, pct);
    update_combo_display(doc, outcome.combo);
    if outcome.combo >= session::COMBO_CAP {
        screen_shake(doc);
    }

    update_health(doc, pct);
    update_total_damage(doc, state.session.total_damage);
    update_money(doc, state.session.money);
    render_weapon_grid(doc, &state.session).ok();

    if outcome.finish_him_activated {
        activate_finish_him(doc);
    }
    if outcome.died {
        perform_finisher(doc, state);
    }
}

/// The combo timer is the only cancellable one: every hit clears the pending
/// reset and arms a fresh 1.5s window.
fn rearm_combo_timer(state: &mut ArenaState) {
    let Some(win) = window() else {
        return;
    };
    if let Some(handle) = state.combo_timer.take() {
        win.clear_timeout_with_handle(handle);
    }
    let closure = Closure::wrap(Box::new(move || {
        ARENA.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.session.reset_combo();
                state.combo_timer = None;
            }
        });
        if let Ok(doc) = document() {
            if let Ok(display) = element(&doc, "combo-display") {
                display.class_list().remove_2("active", "mega").ok();
            }
        }
    }) as Box<dyn FnMut()>);
    state.combo_timer = win
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            session::COMBO_WINDOW_MS as i32,
        )
        .ok();
    state.combo_closure = Some(closure);
}

fn show_damage_number(doc: &Document, x: i32, y: i32, damage: u32, color: &str) {
    let Ok(container) = element(doc, "damage-numbers") else {
        return;
    };
    let Ok(num) = doc.create_element("div") else {
        return;
    };
    num.set_class_name("damage-number");
    num.set_text_content(Some(&format!("-{damage}")));
    num.set_attribute("style", &format!("left:{x}px; top:{y}px; color:{color};"))
        .ok();
    container.append_child(&num).ok();
    set_timeout(move || num.remove(), DAMAGE_NUMBER_MS);
}

fn shake_boss(state: &mut ArenaState, health_pct: f64) {
    // Clear the inline animation first so the shake restarts from frame zero.
    state.boss.set_attribute("style", "animation:none;").ok();
    let boss = state.boss.clone();
    set_timeout(
        move || {
            boss.set_attribute("style", "animation:shake 0.3s;").ok();
        },
        10,
    );

    // Expression worsens with the health tier.
    if health_pct < 30.0 {
        state.boss.class_list().add_1("hurt").ok();
    } else if health_pct < 60.0 {
        state.boss.class_list().add_1("damaged").ok();
    }
}

fn update_combo_display(doc: &Document, combo: u32) {
    if combo < COMBO_DISPLAY_MIN {
        return;
    }
    if let Ok(number) = element(doc, "combo-number") {
        number.set_text_content(Some(&combo.to_string()));
    }
    if let Ok(display) = element(doc, "combo-display") {
        let classes = display.class_list();
        classes.add_1("active").ok();
        if combo >= session::COMBO_CAP {
            classes.add_1("mega").ok();
        }
    }
}

fn screen_shake(doc: &Document) {
    if let Some(body) = doc.body() {
        body.class_list().add_1("screen-shake").ok();
        set_timeout(
            move || {
                body.class_list().remove_1("screen-shake").ok();
            },
            SCREEN_SHAKE_MS,
        );
    }
}

// --- HUD ------------------------------------------------------------------------

fn update_health(doc: &Document, pct: f64) {
    if let Ok(bar) = element(doc, "health-bar") {
        let color = if pct < 30.0 {
            "#e74c3c"
        } else if pct < 60.0 {
            "#f39c12"
        } else {
            "#2ecc71"
        };
        bar.set_attribute("style", &format!("width:{pct}%; background-color:{color};"))
            .ok();
    }
    if let Ok(text) = element(doc, "health-text") {
        text.set_text_content(Some(&format!("{}%", pct.round() as i64)));
    }
}

fn update_total_damage(doc: &Document, total: u64) {
    if let Ok(el) = element(doc, "total-damage") {
        el.set_text_content(Some(&total.to_string()));
    }
}

fn update_money(doc: &Document, money: u64) {
    if let Ok(el) = element(doc, "money") {
        el.set_text_content(Some(&format!("${money}")));
    }
}

/// Rebuild the weapon grid from the session's catalog copy. Selection and
/// affordability are plain classes; the host stylesheet does the rest.
fn render_weapon_grid(doc: &Document, session: &GameSession) -> Result<(), JsValue> {
    let grid = element(doc, "weapons-grid")?;
    let mut html = String::new();
    for (i, weapon) in session.weapons.iter().enumerate() {
        let rarity_class = weapon.rarity.to_ascii_lowercase();
        let mut card_classes = String::from("weapon-card");
        if i == session.selected {
            card_classes.push_str(" selected");
        }
        if !session.can_afford(i) {
            card_classes.push_str(" locked");
        }
        let cost = if weapon.cost == 0 {
            "<span class=\"free-tag\">FREE</span>".to_string()
        } else {
            format!("${}", weapon.cost)
        };
        html.push_str(&format!(
            concat!(
                "<div class=\"{card}\" data-index=\"{i}\" data-rarity=\"{rarity}\">",
                "<div class=\"weapon-header\"><span class=\"weapon-rarity {rarity}\">{rarity_label}</span></div>",
                "<div class=\"weapon-icon-container\"><div class=\"weapon-icon\">{icon}</div>",
                "<div class=\"weapon-glow\" style=\"background:{color};\"></div></div>",
                "<div class=\"weapon-info\"><div class=\"weapon-name\">{name}</div>",
                "<div class=\"weapon-description\">{description}</div></div>",
                "<div class=\"weapon-stats\">",
                "<div class=\"stat-row\"><span class=\"stat-label\">Damage</span><span class=\"stat-value\">{damage}</span></div>",
                "<div class=\"stat-row\"><span class=\"stat-label\">Speed</span><span class=\"stat-value\">{fire_rate}</span></div>",
                "<div class=\"stat-row\"><span class=\"stat-label\">Impact</span><span class=\"stat-value\">{impact}</span></div>",
                "</div>",
                "<div class=\"weapon-footer\"><div class=\"weapon-cost\">{cost}</div></div>",
                "</div>"
            ),
            card = card_classes,
            i = i,
            rarity = rarity_class,
            rarity_label = weapon.rarity,
            icon = weapon.icon,
            color = weapon.color,
            name = weapon.name,
            description = weapon.description,
            damage = weapon.damage,
            fire_rate = weapon.fire_rate,
            impact = weapon.particle_count,
            cost = cost,
        ));
    }
    grid.set_inner_html(&html);
    Ok(())
}

// --- Weapons panel ---------------------------------------------------------------

fn open_weapons_panel(doc: &Document) {
    if let Ok(panel) = element(doc, "weapons-panel") {
        panel.class_list().add_1("open").ok();
    }
    if let Ok(overlay) = element(doc, "weapons-overlay") {
        overlay.class_list().add_1("active").ok();
    }
    if let Some(body) = doc.body() {
        body.class_list().add_1("no-scroll").ok();
    }
}

fn close_weapons_panel(doc: &Document) {
    if let Ok(panel) = element(doc, "weapons-panel") {
        panel.class_list().remove_1("open").ok();
    }
    if let Ok(overlay) = element(doc, "weapons-overlay") {
        overlay.class_list().remove_1("active").ok();
    }
    if let Some(body) = doc.body() {
        body.class_list().remove_1("no-scroll").ok();
    }
}

fn on_weapon_card_click(evt: &web_sys::MouseEvent) {
    let Some(target) = evt.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };
    let Ok(Some(card)) = target.closest(".weapon-card") else {
        return;
    };
    let Some(index) = card
        .get_attribute("data-index")
        .and_then(|v| v.parse::<usize>().ok())
    else {
        return;
    };
    let Ok(doc) = document() else {
        return;
    };
    ARENA.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            if state.session.purchase(index) {
                if let Ok(icon) = element(&doc, "current-weapon-icon") {
                    icon.set_text_content(Some(state.session.selected_weapon().icon));
                }
                update_money(&doc, state.session.money);
                render_weapon_grid(&doc, &state.session).ok();
                close_weapons_panel(&doc);
            }
            // A failed purchase is a silent no-op; the locked styling already
            // tells the player why.
        }
    });
}

// --- Finish him & finisher --------------------------------------------------------

/// One-way escalation when the boss drops into the red: banner, flash, drone,
/// doubled particle bursts from here on.
fn activate_finish_him(doc: &Document) {
    log::info!("finish-him mode engaged");
    audio::play(&audio::FINISH_HIM);
    if let Ok(banner) = element(doc, "finish-him-screen") {
        banner.class_list().add_1("active").ok();
        set_timeout(
            move || {
                banner.class_list().remove_1("active").ok();
            },
            BANNER_MS,
        );
    }
    if let Some(body) = doc.body() {
        body.class_list().add_1("finish-him-flash").ok();
        set_timeout(
            move || {
                body.class_list().remove_1("finish-him-flash").ok();
            },
            FLASH_MS,
        );
    }
}

/// Death sequence: random finisher animation and text, then the summary panel.
fn perform_finisher(doc: &Document, state: &mut ArenaState) {
    let pick = finisher::pick(rand_index(finisher::FINISHERS.len()));
    log::info!(
        "boss defeated by {}, finisher: {}",
        state.session.selected_weapon().name,
        pick.name
    );

    state.boss.class_list().add_1("fatality").ok();
    state
        .boss
        .set_attribute("style", &format!("animation:{} 2s ease-out;", pick.animation))
        .ok();
    audio::play(&audio::FATALITY);

    let Ok(container) = element(doc, "damage-numbers") else {
        return;
    };
    let Ok(text) = doc.create_element("div") else {
        return;
    };
    text.set_class_name("fatality-text");
    text.set_text_content(Some(pick.name));
    let color = finisher::pick_color(rand_index(finisher::TEXT_COLORS.len()));
    text.set_attribute("style", &format!("color:{color};")).ok();
    container.append_child(&text).ok();
    set_timeout(
        move || {
            text.remove();
            end_game();
        },
        pick.duration_ms as i32,
    );
}

/// Defeat aftermath: death sound, `defeated` styling, then the final stats.
fn end_game() {
    audio::play(&audio::DEATH);
    ARENA.with(|cell| {
        if let Some(state) = cell.borrow().as_ref() {
            state.boss.class_list().add_1("defeated").ok();
        }
    });
    set_timeout(
        || {
            let Ok(doc) = document() else {
                return;
            };
            ARENA.with(|cell| {
                if let Some(state) = cell.borrow().as_ref() {
                    if let Ok(panel) = element(&doc, "game-over-screen") {
                        panel.class_list().add_1("show").ok();
                    }
                    if let Ok(el) = element(&doc, "final-damage") {
                        el.set_text_content(Some(&state.session.total_damage.to_string()));
                    }
                    if let Ok(el) = element(&doc, "money-earned") {
                        el.set_text_content(Some(&format!("${}", state.session.money)));
                    }
                }
            });
        },
        SUMMARY_DELAY_MS,
    );
}

// --- Restart -----------------------------------------------------------------------

fn on_restart() {
    let Ok(doc) = document() else {
        return;
    };
    log::info!("restarting the fight");
    ARENA.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            if let Some(win) = window() {
                if let Some(handle) = state.combo_timer.take() {
                    win.clear_timeout_with_handle(handle);
                }
            }
            state.combo_closure = None;
            state.session.restart();

            let boss_classes = state.boss.class_list();
            boss_classes.remove_3("defeated", "hurt", "damaged").ok();
            boss_classes.remove_1("fatality").ok();
            state.boss.remove_attribute("style").ok();

            if let Ok(panel) = element(&doc, "game-over-screen") {
                panel.class_list().remove_1("show").ok();
            }
            if let Ok(display) = element(&doc, "combo-display") {
                display.class_list().remove_2("active", "mega").ok();
            }
            if let Ok(banner) = element(&doc, "finish-him-screen") {
                banner.class_list().remove_1("active").ok();
            }
            if let Ok(icon) = element(&doc, "current-weapon-icon") {
                icon.set_text_content(Some(state.session.selected_weapon().icon));
            }
            update_health(&doc, state.session.health_percent());
            update_total_damage(&doc, state.session.total_damage);
            update_money(&doc, state.session.money);
            render_weapon_grid(&doc, &state.session).ok();
        }
    });
}
