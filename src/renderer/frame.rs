//! Per-frame draw list

use glam::Vec2;

use super::shapes::{closed_polyline, filled_polygon};
use super::vertex::{Vertex, colors};
use crate::sim::{EntityKind, GamePhase, GameState, Rgba};

/// Score text height in pixels
pub const SCORE_TEXT_SIZE: f32 = 20.0;
/// Title text height in pixels
pub const TITLE_TEXT_SIZE: f32 = 70.0;
/// Title offset from the screen centre
pub const TITLE_OFFSET: Vec2 = Vec2::new(-155.0, -40.0);
pub const TITLE: &str = "Asteroids";
/// Horizontal spacing of the life icons
pub const LIFE_ICON_SPACING: f32 = 20.0;

/// One outline to draw, in screen coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPolygon {
    pub points: Vec<Vec2>,
    pub color: Rgba,
    /// Solid fill instead of an outline
    pub filled: bool,
}

/// A text label anchored at its top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct DrawText {
    pub text: String,
    pub position: Vec2,
    pub size: f32,
    pub color: Rgba,
}

/// Everything the host draws for one frame, in back-to-front order
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub clear_color: Rgba,
    pub polygons: Vec<DrawPolygon>,
    pub texts: Vec<DrawText>,
}

impl Frame {
    fn new() -> Self {
        Self {
            clear_color: colors::BACKGROUND,
            polygons: Vec::new(),
            texts: Vec::new(),
        }
    }

    fn outline(&mut self, points: Vec<Vec2>, color: Rgba) {
        self.polygons.push(DrawPolygon {
            points,
            color,
            filled: false,
        });
    }

    /// Line-list vertices for every outlined polygon
    pub fn line_vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .filter(|p| !p.filled)
            .flat_map(|p| closed_polyline(&p.points, p.color.to_f32()))
            .collect()
    }

    /// Triangle-list vertices for every filled polygon
    pub fn fill_vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .filter(|p| p.filled)
            .flat_map(|p| filled_polygon(&p.points, p.color.to_f32()))
            .collect()
    }
}

/// Build the draw list for the current state
///
/// Reads outlines without advancing rotation, so it may be called any
/// number of times per tick.
pub fn build_frame(state: &GameState) -> Frame {
    let mut frame = Frame::new();

    if state.phase != GamePhase::Running {
        frame.texts.push(DrawText {
            text: TITLE.to_string(),
            position: state.wait_screen.position + TITLE_OFFSET,
            size: TITLE_TEXT_SIZE,
            color: colors::TEXT,
        });
        return frame;
    }

    // HUD
    let hud = &state.hud;
    if let EntityKind::Hud { score, lives } = hud.kind {
        frame.texts.push(DrawText {
            text: format_score(score),
            position: hud.position,
            size: SCORE_TEXT_SIZE,
            color: hud.color,
        });
        for i in 0..lives {
            frame.outline(life_icon(hud.position, i), hud.color);
        }
    }

    // Ship
    let ship = state.player.current_outline().points;
    if state.is_stunned() {
        frame.polygons.push(DrawPolygon {
            points: ship,
            color: colors::HIT_FLASH,
            filled: true,
        });
    } else {
        frame.outline(ship, state.player.color);
    }

    for bullet in state.bullets.iter().filter(|b| b.is_alive()) {
        frame.outline(bullet.current_outline().points, bullet.color);
    }
    for asteroid in state.asteroids.iter().filter(|a| a.is_alive()) {
        frame.outline(asteroid.current_outline().points, asteroid.color);
    }

    frame
}

/// Six-digit zero-padded score
pub fn format_score(score: u32) -> String {
    format!("{score:06}")
}

/// Small ship glyph for the `index`-th remaining life
pub fn life_icon(origin: Vec2, index: u32) -> Vec<Vec2> {
    let x = index as f32 * LIFE_ICON_SPACING;
    [(10.0, 25.0), (0.0, 50.0), (10.0, 47.0), (20.0, 50.0)]
        .into_iter()
        .map(|(px, py)| origin + Vec2::new(px + x, py))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{InputEvent, Key};

    fn running() -> GameState {
        let mut state = GameState::new(Settings::default());
        state.start();
        state
    }

    #[test]
    fn test_idle_shows_only_title() {
        let state = GameState::new(Settings::default());
        let frame = build_frame(&state);
        assert!(frame.polygons.is_empty());
        assert_eq!(frame.texts.len(), 1);
        assert_eq!(frame.texts[0].text, "Asteroids");
        assert_eq!(frame.texts[0].position, Vec2::new(245.0, 260.0));
    }

    #[test]
    fn test_score_format() {
        assert_eq!(format_score(0), "000000");
        assert_eq!(format_score(4200), "004200");
        assert_eq!(format_score(1_234_567), "1234567");
    }

    #[test]
    fn test_hud_and_ship() {
        let state = running();
        let frame = build_frame(&state);
        assert_eq!(frame.texts[0].text, "000000");
        // Three life icons, then the ship
        assert_eq!(frame.polygons.len(), 4);
        assert_eq!(frame.polygons[3].color, Rgba::YELLOW);
        assert!(!frame.polygons[3].filled);

        let hud = state.hud.position;
        assert_eq!(frame.polygons[2].points[0], hud + Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_stunned_ship_is_filled_white() {
        let mut state = running();
        state.player_hit();
        let frame = build_frame(&state);
        let ship = frame.polygons.last().unwrap();
        assert!(ship.filled);
        assert_eq!(ship.color, Rgba::WHITE);
        // Filled ship: two fan triangles for four points
        assert_eq!(frame.fill_vertices().len(), 6);
    }

    #[test]
    fn test_render_does_not_spin() {
        let mut state = running();
        state.handle_input(InputEvent::KeyDown(Key::RotateRight));
        let a = build_frame(&state);
        let b = build_frame(&state);
        assert_eq!(a, b);
        assert_eq!(state.player.rotation, 0.0);
    }

    #[test]
    fn test_line_vertices_cover_outlines() {
        let mut state = running();
        state.handle_input(InputEvent::KeyDown(Key::Fire));
        let frame = build_frame(&state);
        // Life icons 3x4 edges, ship 4, bullet 4
        assert_eq!(frame.line_vertices().len(), (12 + 4 + 4) * 2);
    }
}
