use crate::app::Session;
use crate::draw::{Canvas, Rgba, Sprite, text_size};
use crate::game::Phase;
use crate::interp::cell_center;
use crate::pos::Pos;

const GRID_LINE: Rgba = (18, 18, 18, 255);
const FOOD_GLOW: (u8, u8, u8) = (220, 60, 60);
const FOOD_CORE: Rgba = (255, 80, 80, 255);
const BODY: Rgba = (30, 160, 30, 255);
const HEAD: Rgba = (100, 230, 100, 255);
const HEAD_RIM: Rgba = (30, 160, 30, 255);
const EYE: Rgba = (30, 30, 30, 255);
const SCORE_TEXT: Rgba = (220, 220, 220, 255);
const PAUSED_TEXT: Rgba = (255, 200, 0, 255);
const GAME_OVER_TEXT: Rgba = (220, 50, 50, 255);
const HINT_TEXT: Rgba = (200, 200, 200, 255);
const PANEL: Rgba = (0, 0, 0, 150);

const GLOW_RINGS: i32 = 8;
const GLOW_RING_ALPHA: u8 = 14;

const HUD_SCALE: u32 = 2;
const TITLE_SCALE: u32 = 4;
const PANEL_PAD: u32 = 16;

/// Draws a frame from session state. Never mutates the session.
pub struct Renderer {
    cell_size: u32,
    show_grid: bool,
    head: Sprite,
}

impl Renderer {
    pub fn new(cell_size: u32, show_grid: bool) -> Self {
        Self {
            cell_size,
            show_grid,
            head: head_sprite(cell_size),
        }
    }

    pub fn render(&self, canvas: &mut Canvas, session: &Session) {
        let game = &session.game;

        self.draw_background(canvas);
        if self.show_grid {
            self.draw_grid(canvas);
        }
        if let Some(food) = game.grid.food {
            self.draw_food(canvas, food);
        }
        self.draw_snake(canvas, session);

        for p in session.particles.iter() {
            let (r, g, b) = p.color;
            canvas.fill_circle(
                p.pos.x.round() as i32,
                p.pos.y.round() as i32,
                p.radius as i32,
                (r, g, b, p.alpha()),
            );
        }

        canvas.draw_text(&format!("SCORE: {}", game.score), 8, 8, HUD_SCALE, SCORE_TEXT);
        self.draw_overlay(canvas, game.phase);
    }

    fn draw_background(&self, canvas: &mut Canvas) {
        let (w, h) = (canvas.width(), canvas.height());
        for y in 0..h {
            let c = (12.0 + 40.0 * y as f32 / h as f32) as u8;
            canvas.fill_rect(0, y as i32, w, 1, (c, c, c, 255));
        }
    }

    fn draw_grid(&self, canvas: &mut Canvas) {
        let (w, h) = (canvas.width() as i32, canvas.height() as i32);
        let step = self.cell_size as usize;
        for gx in (0..w).step_by(step) {
            canvas.line((gx, 0), (gx, h - 1), GRID_LINE);
        }
        for gy in (0..h).step_by(step) {
            canvas.line((0, gy), (w - 1, gy), GRID_LINE);
        }
    }

    fn draw_food(&self, canvas: &mut Canvas, food: Pos) {
        let c = cell_center(food, self.cell_size);
        let (cx, cy) = (c.x as i32, c.y as i32);
        let glow_radius = (self.cell_size as f32 * 1.6) as i32;
        // Stacked translucent discs: brightest where they all overlap.
        let (r, g, b) = FOOD_GLOW;
        for ring in (1..=GLOW_RINGS).rev() {
            let radius = glow_radius * ring / GLOW_RINGS;
            canvas.fill_circle(cx, cy, radius, (r, g, b, GLOW_RING_ALPHA));
        }
        let core = (self.cell_size as i32 / 3).max(3);
        canvas.fill_circle(cx, cy, core, FOOD_CORE);
    }

    fn draw_snake(&self, canvas: &mut Canvas, session: &Session) {
        let positions = session.segments.positions();
        let body_radius = (self.cell_size as i32 / 2 - 1).max(3);
        // Tail first so nearer segments overlap the ones behind them.
        for p in positions.iter().skip(1).rev() {
            canvas.fill_circle(p.x.round() as i32, p.y.round() as i32, body_radius, BODY);
        }
        if let Some(head) = positions.first() {
            canvas.blit_rotated(&self.head, head.x, head.y, session.game.dir.angle());
        }
    }

    fn draw_overlay(&self, canvas: &mut Canvas, phase: Phase) {
        let cx = canvas.width() as i32 / 2;
        let cy = canvas.height() as i32 / 2;
        match phase {
            Phase::Running => {}
            Phase::Paused => {
                let (w, h) = text_size("PAUSED", TITLE_SCALE);
                draw_panel(canvas, cx, cy - h as i32 / 2, w, h, PAUSED_TEXT);
                canvas.draw_text_centered("PAUSED", cx, cy, TITLE_SCALE, PAUSED_TEXT);
            }
            Phase::GameOver => {
                let hint = "SPACE TO RESTART  ESC/Q TO QUIT";
                let (title_w, title_h) = text_size("GAME OVER", TITLE_SCALE);
                let (hint_w, hint_h) = text_size(hint, HUD_SCALE);
                let title_y = cy - 30;
                let hint_y = cy + 20;
                let top = title_y - title_h as i32 / 2;
                let bottom = hint_y + hint_h as i32 / 2;
                let w = title_w.max(hint_w);
                draw_panel(canvas, cx, top, w, (bottom - top) as u32, GAME_OVER_TEXT);
                canvas.draw_text_centered("GAME OVER", cx, title_y, TITLE_SCALE, GAME_OVER_TEXT);
                canvas.draw_text_centered(hint, cx, hint_y, HUD_SCALE, HINT_TEXT);
            }
        }
    }
}

/// Dimmed box with a border around `w` x `h` of content whose top edge is
/// at `top`, centred on column `cx`.
fn draw_panel(canvas: &mut Canvas, cx: i32, top: i32, w: u32, h: u32, border: Rgba) {
    let (w, h) = (w + 2 * PANEL_PAD, h + 2 * PANEL_PAD);
    let x = cx - w as i32 / 2;
    let y = top - PANEL_PAD as i32;
    canvas.fill_rect(x, y, w, h, PANEL);
    canvas.stroke_rect(x, y, w, h, border);
}

/// Round head with a darker rim and two eyes, facing +x.
fn head_sprite(size: u32) -> Sprite {
    let r = size as f32 / 2.0;
    let rim = (size / 12).max(1) as f32;
    let s = size as i32;
    // Half extents of each eye: short along the heading, wider across it.
    let half_along = (s / 12).max(2) / 2;
    let half_across = (s / 8).max(2) / 2;
    let eye_x = s / 2 + s / 6;
    let eye_ys = [s / 2 - s / 6, s / 2 + s / 6];

    Sprite::from_fn(size, |x, y| {
        let (xi, yi) = (x as i32, y as i32);
        let in_eye = (xi - eye_x).abs() <= half_along
            && eye_ys.iter().any(|&ey| (yi - ey).abs() <= half_across);
        let d = ((x as f32 + 0.5 - r).powi(2) + (y as f32 + 0.5 - r).powi(2)).sqrt();
        if d > r {
            (0, 0, 0, 0)
        } else if in_eye {
            EYE
        } else if d > r - rim {
            HEAD_RIM
        } else {
            HEAD
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::pos::Dir;
    use rand::SeedableRng;

    fn frame_for(config: &GameConfig) -> Vec<u8> {
        let (w, h) = config.window_size();
        vec![0; (w * h * 4) as usize]
    }

    #[test]
    fn head_sprite_is_round_with_eyes() {
        let sprite = head_sprite(20);
        assert_eq!(sprite.size(), 20);
        assert_eq!(sprite.get(0, 0), Some((0, 0, 0, 0)));
        assert_eq!(sprite.get(10, 10), Some(HEAD));
        let eye_count = (0..20)
            .flat_map(|y| (0..20).map(move |x| (x, y)))
            .filter(|&(x, y)| sprite.get(x, y) == Some(EYE))
            .count();
        assert!(eye_count >= 4);
        // Eyes are on the leading (+x) half.
        assert!((0..20).all(|y| (0..10).all(|x| sprite.get(x, y) != Some(EYE))));
    }

    #[test]
    fn draws_running_frame() {
        let config = GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        };
        let mut session = Session::new(config.clone());
        session.game.grid.food = Some(Pos::new(20, 20));
        let renderer = Renderer::new(config.cell_size, config.grid_visible());
        let mut frame = frame_for(&config);
        let (w, h) = config.window_size();
        let mut canvas = Canvas::new(&mut frame, w, h);
        renderer.render(&mut canvas, &session);

        // Background gradient: darker at the top than at the bottom.
        let top = canvas.pixel(w / 2 + 3, 1).unwrap();
        let bottom = canvas.pixel(w / 2 + 3, h - 2).unwrap();
        assert!(top.0 < bottom.0);

        // Body segment at (14, 15) is painted in body green.
        let body = cell_center(Pos::new(14, 15), config.cell_size);
        assert_eq!(canvas.pixel(body.x as u32, body.y as u32), Some(BODY));

        // Food core is solid.
        let food = cell_center(Pos::new(20, 20), config.cell_size);
        assert_eq!(canvas.pixel(food.x as u32, food.y as u32), Some(FOOD_CORE));
    }

    #[test]
    fn game_over_overlay_is_drawn() {
        let config = GameConfig {
            seed: Some(2),
            ..GameConfig::default()
        };
        let mut session = Session::new(config.clone());
        session.game.phase = Phase::GameOver;
        let renderer = Renderer::new(config.cell_size, false);
        let mut frame = frame_for(&config);
        let (w, h) = config.window_size();
        let mut canvas = Canvas::new(&mut frame, w, h);
        renderer.render(&mut canvas, &session);

        let (cx, cy) = (w / 2, h / 2 - 30);
        let red = (cx - 120..cx + 120)
            .flat_map(|x| (cy - 14..cy + 14).map(move |y| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == Some(GAME_OVER_TEXT))
            .count();
        assert!(red > 0);
    }

    fn render_session(session: &Session) -> Vec<u8> {
        let config = &session.config;
        let renderer = Renderer::new(config.cell_size, false);
        let mut frame = frame_for(config);
        let (w, h) = config.window_size();
        renderer.render(&mut Canvas::new(&mut frame, w, h), session);
        frame
    }

    fn quiet_session(seed: u64) -> Session {
        let mut session = Session::new(GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        });
        session.game.grid.food = Some(Pos::new(2, 25));
        session
    }

    #[test]
    fn paused_overlay_is_drawn() {
        let mut session = quiet_session(6);
        session.game.phase = Phase::Paused;
        let mut frame = render_session(&session);
        let (w, h) = session.config.window_size();
        let canvas = Canvas::new(&mut frame, w, h);

        let all: Vec<Rgba> = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .filter_map(|(x, y)| canvas.pixel(x, y))
            .collect();
        assert!(all.iter().any(|&c| c == PAUSED_TEXT));
        assert!(all.iter().all(|&c| c != GAME_OVER_TEXT));

        // Panel border top-left corner.
        let (tw, th) = text_size("PAUSED", TITLE_SCALE);
        let x = (w / 2) as i32 - (tw + 2 * PANEL_PAD) as i32 / 2;
        let y = (h / 2) as i32 - th as i32 / 2 - PANEL_PAD as i32;
        assert_eq!(canvas.pixel(x as u32, y as u32), Some(PAUSED_TEXT));
    }

    #[test]
    fn particles_fade_with_remaining_life() {
        let mut session = quiet_session(7);
        let origin = glam::Vec2::new(105.0, 505.0);
        let background = {
            let mut frame = render_session(&session);
            let (w, h) = session.config.window_size();
            Canvas::new(&mut frame, w, h).pixel(105, 505).unwrap()
        };

        let mut rng = rand::rngs::SmallRng::seed_from_u64(11);
        session.particles.spawn_burst(origin, 1, &mut rng);
        let spark = session.particles.iter().next().unwrap().clone();
        let a = spark.alpha();
        assert!(a > 0);

        let mut frame = render_session(&session);
        let (w, h) = session.config.window_size();
        let canvas = Canvas::new(&mut frame, w, h);
        let (a, ia) = (a as u16, 255 - a as u16);
        let mix = |c: u8, bg: u8| ((c as u16 * a + bg as u16 * ia) / 255) as u8;
        let (r, g, b) = spark.color;
        assert_eq!(
            canvas.pixel(105, 505),
            Some((mix(r, background.0), mix(g, background.1), mix(b, background.2), 255))
        );
    }

    fn eye_pixels(session: &Session) -> Vec<(i32, i32)> {
        let mut frame = render_session(session);
        let (w, h) = session.config.window_size();
        let canvas = Canvas::new(&mut frame, w, h);
        let head = cell_center(session.game.grid.head(), session.config.cell_size);
        let (hx, hy) = (head.x as i32, head.y as i32);
        (hy - 10..hy + 10)
            .flat_map(|y| (hx - 10..hx + 10).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x as u32, y as u32) == Some(EYE))
            .map(|(x, y)| (x - hx, y - hy))
            .collect()
    }

    #[test]
    fn head_faces_current_direction() {
        let mut session = quiet_session(8);
        let right = eye_pixels(&session);
        assert!(!right.is_empty());
        assert!(right.iter().all(|&(dx, _)| dx > 0));

        session.game.dir = Dir::Up;
        let up = eye_pixels(&session);
        assert!(!up.is_empty());
        assert!(up.iter().all(|&(_, dy)| dy < 0));

        session.game.dir = Dir::Left;
        let left = eye_pixels(&session);
        assert!(!left.is_empty());
        assert!(left.iter().all(|&(dx, _)| dx < 0));
    }
}
