//! Per-frame draw routines for gameplay and the modal screens

use glam::Vec2;

use super::shapes::{charge_bar, spike_band, spike_triangles};
use super::{Anchor, Color, ImageId, Renderer};
use crate::highscores::{ScoreTable, format_entry};
use crate::sim::state::{Attempt, Viewport};

const HUD_MARGIN: f32 = 10.0;
const HUD_LINE: f32 = 30.0;
const SCOREBOARD_LINE: f32 = 28.0;

/// Numbers shown over the playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub remaining_secs: f32,
    /// Banked plus in-flight coins
    pub coins: u32,
    /// 1-based
    pub level_number: usize,
    pub level_count: usize,
    pub lives: u32,
}

/// Draw one gameplay frame. Back to front: spikes, platforms, obstacles,
/// coins, player, HUD.
pub fn draw_attempt(renderer: &mut dyn Renderer, attempt: &Attempt, hud: &Hud) {
    let vp = &attempt.viewport;
    renderer.begin_frame(Color::SKY);

    renderer.draw_rect(spike_band(&attempt.spikes, vp), Color::BLACK);
    for tri in spike_triangles(&attempt.spikes, vp) {
        renderer.draw_polygon(&tri, Color::GREY);
    }

    for p in &attempt.platforms {
        renderer.draw_rect(p.rect(), Color::GREEN);
    }
    for o in &attempt.obstacles {
        renderer.draw_image(ImageId::Obstacle(o.sprite), o.pos);
    }
    for c in &attempt.coins {
        renderer.draw_image(ImageId::Coin, c.pos);
    }
    renderer.draw_rect(attempt.player.rect(), Color::BLUE);

    draw_hud(renderer, vp, hud);

    if attempt.player.charging {
        let (outline, fill) = charge_bar(attempt.player.jump_charge, vp);
        renderer.draw_rect(outline, Color::WHITE);
        renderer.draw_rect(fill, Color::RED);
    }

    renderer.end_frame();
}

fn draw_hud(renderer: &mut dyn Renderer, vp: &Viewport, hud: &Hud) {
    let left = Vec2::new(HUD_MARGIN, HUD_MARGIN);
    renderer.draw_text(
        // Whole seconds left, rounded down
        &format!("Time: {}", hud.remaining_secs as u32),
        left,
        Color::BLACK,
        Anchor::TopLeft,
    );
    renderer.draw_text(
        &format!("Coins: {}", hud.coins),
        left + Vec2::new(0.0, HUD_LINE),
        Color::BLACK,
        Anchor::TopLeft,
    );

    let right = Vec2::new(vp.width - HUD_MARGIN, HUD_MARGIN);
    renderer.draw_text(
        &format!("Level: {}/{}", hud.level_number, hud.level_count),
        right,
        Color::BLACK,
        Anchor::TopRight,
    );
    renderer.draw_text(
        &format!("Lives: {}", hud.lives),
        right + Vec2::new(0.0, HUD_LINE),
        Color::BLACK,
        Anchor::TopRight,
    );
}

/// Black screen with a centred title and an optional second line
pub fn draw_message(
    renderer: &mut dyn Renderer,
    vp: &Viewport,
    title: &str,
    subtitle: Option<&str>,
) {
    let center = Vec2::new(vp.width / 2.0, vp.height / 2.0);
    renderer.begin_frame(Color::BLACK);
    renderer.draw_text(title, center, Color::WHITE, Anchor::Center);
    if let Some(line) = subtitle {
        let below = center + Vec2::new(0.0, HUD_LINE * 2.0);
        renderer.draw_text(line, below, Color::WHITE, Anchor::Center);
    }
    renderer.end_frame();
}

/// Initials entry: the typed letters so far, padded with underscores
pub fn draw_initials_prompt(
    renderer: &mut dyn Renderer,
    vp: &Viewport,
    typed: &str,
    score: u32,
) {
    let slots: String = typed
        .chars()
        .chain(std::iter::repeat('_'))
        .take(crate::consts::INITIALS_LEN)
        .collect();
    let center = Vec2::new(vp.width / 2.0, vp.height / 2.0);

    renderer.begin_frame(Color::BLACK);
    renderer.draw_text(
        &format!("Final score: {} coins", score),
        center - Vec2::new(0.0, HUD_LINE * 2.0),
        Color::WHITE,
        Anchor::Center,
    );
    renderer.draw_text("Enter your initials", center, Color::WHITE, Anchor::Center);
    renderer.draw_text(
        &slots,
        center + Vec2::new(0.0, HUD_LINE * 2.0),
        Color::WHITE,
        Anchor::Center,
    );
    renderer.end_frame();
}

/// Every row of the score table, with the just-recorded row highlighted
pub fn draw_scoreboard(
    renderer: &mut dyn Renderer,
    vp: &Viewport,
    table: &ScoreTable,
    highlight: Option<usize>,
) {
    let x = vp.width / 2.0;
    renderer.begin_frame(Color::BLACK);
    renderer.draw_text(
        "Scoreboard",
        Vec2::new(x, HUD_LINE * 2.0),
        Color::WHITE,
        Anchor::Center,
    );

    if table.is_empty() {
        let middle = Vec2::new(x, vp.height / 2.0);
        renderer.draw_text("No scores yet", middle, Color::WHITE, Anchor::Center);
    }
    for (i, entry) in table.entries().iter().enumerate() {
        let color = if highlight == Some(i) {
            Color::RED
        } else {
            Color::WHITE
        };
        let y = HUD_LINE * 4.0 + i as f32 * SCOREBOARD_LINE;
        renderer.draw_text(&format_entry(i + 1, entry), Vec2::new(x, y), color, Anchor::Center);
    }

    renderer.draw_text(
        "Press any key to play again",
        Vec2::new(x, vp.height - HUD_LINE * 2.0),
        Color::WHITE,
        Anchor::Center,
    );
    renderer.end_frame();
}
