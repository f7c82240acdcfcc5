//! Per-phase scene drawing
//!
//! Reads the session, never mutates it.

use super::surface::{Surface, TextAlign};
use crate::assets::{ImageId, ImageStatus};
use crate::consts::*;
use crate::sim::{Enemy, GamePhase, GameState, Player, mission_code};

const PURPLE: &str = "#7e01fd";
const GRASS: &str = "#2e8b57";
const JEET_GREEN: &str = "#556b2f";
const BLOOD_RED: &str = "#8b0000";
const WHITE: &str = "#ffffff";
const BLACK: &str = "#000000";
const YELLOW: &str = "#ffff00";

const LOGO_WIDTH: f32 = 200.0;
const LOGO_HEIGHT: f32 = 128.0;

const CENTER_X: f32 = CANVAS_WIDTH / 2.0;

/// Draw one frame for the current phase
pub fn render(state: &GameState, images: &ImageStatus, surface: &mut impl Surface) {
    match state.phase() {
        GamePhase::Start => draw_title(images, surface),
        GamePhase::Playing => draw_playing(state, images, surface),
        GamePhase::GameOver => draw_game_over(state, surface),
    }

    // Context flags reset every frame
    surface.set_image_smoothing(false);
    surface.set_text_align(TextAlign::Left);
}

/// Shown instead of the game until the fee is paid
pub fn render_paywall(surface: &mut impl Surface) {
    surface.set_fill(BLACK);
    surface.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
    surface.set_fill(WHITE);
    surface.set_font("24px monospace");
    surface.set_text_align(TextAlign::Center);
    surface.fill_text("PAY $PWN TO PLAY!", CENTER_X, CANVAS_HEIGHT / 2.0);
}

fn draw_title(images: &ImageStatus, surface: &mut impl Surface) {
    surface.set_fill(PURPLE);
    surface.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);

    if images.is_ready(ImageId::Logo) {
        surface.draw_image(
            ImageId::Logo,
            (CANVAS_WIDTH - LOGO_WIDTH) / 2.0,
            20.0,
            LOGO_WIDTH,
            LOGO_HEIGHT,
        );
    }

    surface.set_fill(WHITE);
    surface.set_font("36px monospace");
    surface.set_text_align(TextAlign::Center);
    surface.fill_text("JEET SHREDDER", CENTER_X, 180.0);
    surface.set_font("16px monospace");
    let lines = [
        ("MISSION 69420: PWN OR DIE", 220.0),
        ("Jeets have sacked the world - only the arcade stands.", 250.0),
        ("PWN the green monsters or humanity's wiped out!", 280.0),
        ("From #tonyhawkmaddengoldeneye69420 -> @pwnsolana", 340.0),
        ("Made with Grok 3 - Music by AdhesiveWombat & Delsus", 360.0),
    ];
    for (line, y) in lines {
        surface.fill_text(line, CENTER_X, y);
    }

    // Instruction box
    surface.set_fill(YELLOW);
    surface.fill_rect(CENTER_X - 200.0, 390.0, 400.0, 60.0);
    surface.set_fill(BLACK);
    surface.set_font("20px monospace");
    surface.fill_text("CLICK OR TAP JEETS", CENTER_X, 415.0);
    surface.fill_text("(GREEN MONSTERS) TO KILL!", CENTER_X, 440.0);
}

fn draw_playing(state: &GameState, images: &ImageStatus, surface: &mut impl Surface) {
    if images.is_ready(ImageId::Background) {
        surface.draw_image(ImageId::Background, 0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
    } else {
        surface.set_fill(GRASS);
        surface.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
    }

    if images.is_ready(ImageId::Logo) {
        surface.draw_image(
            ImageId::Logo,
            CANVAS_WIDTH - LOGO_WIDTH - 10.0,
            10.0,
            LOGO_WIDTH,
            LOGO_HEIGHT,
        );
    }

    for enemy in &state.enemies {
        draw_enemy(enemy, surface);
    }

    if images.is_ready(ImageId::Hero) {
        draw_player(&state.player, surface);
    }

    // Newest popup on top
    for popup in state.popups.iter().rev() {
        surface.set_fill(BLOOD_RED);
        surface.set_font("24px monospace");
        surface.set_text_align(TextAlign::Left);
        surface.fill_text(popup.text, popup.pos.x, popup.pos.y);
    }

    // HUD
    surface.set_fill(BLACK);
    surface.set_font("20px monospace");
    surface.fill_text(&format!("Pwned: {}", state.kills), 10.0, 30.0);
    surface.fill_text(&format!("Time: {}s", state.whole_seconds()), 10.0, 50.0);
}

/// Two-pose jeet: square body, or a hunched body with raised arms
fn draw_enemy(enemy: &Enemy, surface: &mut impl Surface) {
    let (x, y) = (enemy.pos.x, enemy.pos.y);
    let (w, h) = (enemy.size.x, enemy.size.y);
    surface.set_fill(JEET_GREEN);
    if enemy.anim_frame == 0 {
        surface.fill_rect(x, y, w, h);
        surface.set_fill(BLOOD_RED);
        surface.fill_rect(x + 8.0, y + 8.0, 4.0, 4.0);
        surface.fill_rect(x + 20.0, y + 8.0, 4.0, 4.0);
    } else {
        let lean = if enemy.walks_right() { 4.0 } else { -4.0 };
        surface.fill_rect(x + lean, y, w - 8.0, h);
        surface.fill_rect(x, y, 8.0, 8.0);
        surface.fill_rect(x + w - 8.0, y, 8.0, 8.0);
        surface.set_fill(BLOOD_RED);
        let (eye_a, eye_b) = if enemy.walks_right() {
            (12.0, 24.0)
        } else {
            (4.0, 16.0)
        };
        surface.fill_rect(x + eye_a, y + 8.0, 4.0, 4.0);
        surface.fill_rect(x + eye_b, y + 8.0, 4.0, 4.0);
    }
}

/// Sprite faces right; mirror it for the other way
fn draw_player(player: &Player, surface: &mut impl Surface) {
    let (x, y) = (player.pos.x, player.pos.y);
    let (w, h) = (player.size.x, player.size.y);
    if player.facing_right {
        surface.draw_image(ImageId::Hero, x, y, w, h);
    } else {
        surface.save();
        surface.scale(-1.0, 1.0);
        surface.draw_image(ImageId::Hero, -x - w, y, w, h);
        surface.restore();
    }
}

fn draw_game_over(state: &GameState, surface: &mut impl Surface) {
    surface.set_fill(PURPLE);
    surface.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);

    let seconds = state.whole_seconds();
    surface.set_fill(WHITE);
    surface.set_font("36px monospace");
    surface.set_text_align(TextAlign::Center);
    surface.fill_text("GAME OVER, AGENT!", CENTER_X, 150.0);
    surface.set_font("24px monospace");
    surface.fill_text(&format!("JEETS PWNED: {}", state.kills), CENTER_X, 220.0);
    surface.fill_text(&format!("SURVIVAL TIME: {}s", seconds), CENTER_X, 260.0);

    surface.set_font("16px monospace");
    let code = mission_code(state.kills, seconds);
    surface.fill_text(&format!("MISSION CODE: {}", code), CENTER_X, 300.0);
    surface.fill_text("SKATE BACK IN - TAP TO RETRY!", CENTER_X, 360.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::{DrawCommand, RecordingSurface};
    use crate::sim::{Enemy, Popup, Side, handle_tap};
    use glam::Vec2;

    fn playing() -> GameState {
        let mut state = GameState::new(8);
        handle_tap(&mut state, Vec2::ZERO, 0.0);
        state
    }

    #[test]
    fn test_title_screen() {
        let state = GameState::new(8);
        let mut surface = RecordingSurface::new();
        render(&state, &ImageStatus::new(), &mut surface);
        assert!(surface.texts().contains(&"JEET SHREDDER"));
        // No logo until it loads
        assert!(surface.images().is_empty());

        surface.clear();
        render(&state, &ImageStatus::all_ready(), &mut surface);
        assert_eq!(surface.images(), vec![ImageId::Logo]);
    }

    #[test]
    fn test_frame_ends_with_context_reset() {
        let state = GameState::new(8);
        let mut surface = RecordingSurface::new();
        render(&state, &ImageStatus::new(), &mut surface);
        let tail = &surface.commands[surface.commands.len() - 2..];
        assert_eq!(
            tail,
            &[DrawCommand::Smoothing(false), DrawCommand::Align(TextAlign::Left)]
        );
    }

    #[test]
    fn test_playing_fallback_background() {
        let state = playing();
        let mut surface = RecordingSurface::new();
        render(&state, &ImageStatus::new(), &mut surface);
        assert_eq!(surface.commands[0], DrawCommand::Fill(GRASS.to_string()));
        assert!(surface.images().is_empty());
        assert!(surface.texts().contains(&"Pwned: 0"));
        assert!(surface.texts().contains(&"Time: 0s"));
    }

    #[test]
    fn test_playing_draws_entities() {
        let mut state = playing();
        let enemy = Enemy::entering_from(Side::Left, 3.0);
        state.popups.push(Popup::for_kill(&enemy));
        state.enemies.push(enemy);
        state.player.facing_right = false;

        let mut surface = RecordingSurface::new();
        render(&state, &ImageStatus::all_ready(), &mut surface);
        assert_eq!(
            surface.images(),
            vec![ImageId::Background, ImageId::Logo, ImageId::Hero]
        );
        assert!(surface.commands.contains(&DrawCommand::Scale { x: -1.0, y: 1.0 }));
        assert!(surface.commands.contains(&DrawCommand::Rect {
            x: -32.0,
            y: ENEMY_Y,
            w: 32.0,
            h: 32.0
        }));
        assert_eq!(surface.text_position("Pwned!"), Some((-32.0, ENEMY_Y - 20.0)));
    }

    #[test]
    fn test_game_over_summary_centered() {
        let mut state = playing();
        state.kills = 5;
        state.seconds_played = 42.7;
        state.end_run();

        let mut surface = RecordingSurface::new();
        render(&state, &ImageStatus::all_ready(), &mut surface);
        assert!(surface.texts().contains(&"JEETS PWNED: 5"));
        assert!(surface.texts().contains(&"SURVIVAL TIME: 42s"));
        let expected = format!("MISSION CODE: {}", mission_code(5, 42));
        assert_eq!(surface.text_position(&expected), Some((320.0, 300.0)));
    }

    #[test]
    fn test_paywall() {
        let mut surface = RecordingSurface::new();
        render_paywall(&mut surface);
        assert_eq!(surface.text_position("PAY $PWN"), Some((320.0, 240.0)));
    }
}
