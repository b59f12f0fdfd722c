//! GameView: draws a `GameSnapshot` into a terminal framebuffer.
//!
//! Pure (no I/O), so layout can be unit-tested.

use crate::core::{get_shape, ActiveSnapshot, GameSnapshot};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const BACKGROUND: Rgb = Rgb::new(18, 18, 24);
const WELL: Rgb = Rgb::new(30, 30, 44);
const GRID: Rgb = Rgb::new(40, 40, 55);
const TEXT: Rgb = Rgb::new(230, 230, 230);

/// Block color per piece kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0, 255, 255),
        PieceKind::O => Rgb::new(255, 255, 0),
        PieceKind::T => Rgb::new(160, 0, 240),
        PieceKind::S => Rgb::new(0, 200, 0),
        PieceKind::Z => Rgb::new(220, 0, 0),
        PieceKind::J => Rgb::new(0, 80, 220),
        PieceKind::L => Rgb::new(255, 140, 0),
    }
}

const CONTROLS: [&str; 6] = [
    "←/→  move",
    "↓    soft drop",
    "↑/X  rotate cw",
    "Z    rotate ccw",
    "Spc  hard drop",
    "Q    quit",
];

pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const RESTART_HINT: &str = "Space/Enter: restart";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the board frame sits, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub panel_x: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
    /// Terminal rows per board cell.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell roughly squares up typical terminal glyphs.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let frame_x = viewport.width.saturating_sub(frame_w) / 2;
        let frame_y = viewport.height.saturating_sub(frame_h) / 2;
        Layout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            panel_x: frame_x.saturating_add(frame_w).saturating_add(2),
        }
    }

    /// Terminal position of board cell (x, y), if it is on the board.
    pub fn cell_origin(&self, layout: &Layout, x: i8, y: i8) -> Option<(u16, u16)> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((
            layout.frame_x + 1 + x as u16 * self.cell_w,
            layout.frame_y + 1 + y as u16 * self.cell_h,
        ))
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::new(' ', Style::new(TEXT, BACKGROUND)));

        let layout = self.layout(viewport);
        self.draw_frame(fb, &layout);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                let glyph = match PieceKind::from_cell_value(value) {
                    Some(kind) => block(kind),
                    None => Glyph::new('·', Style::new(GRID, WELL).dim()),
                };
                self.fill_cell(fb, &layout, x as i8, y as i8, glyph);
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_y) = snap.ghost_y {
                self.draw_ghost(fb, &layout, &active, ghost_y);
            }
            for (x, y) in active.cells {
                self.fill_cell(fb, &layout, x, y, block(active.kind));
            }
        }

        self.draw_panel(fb, snap, &layout, viewport);

        if snap.game_over {
            self.draw_game_over(fb, &layout);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, layout: &Layout, x: i8, y: i8, glyph: Glyph) {
        if let Some((px, py)) = self.cell_origin(layout, x, y) {
            fb.fill_rect(px, py, self.cell_w, self.cell_h, glyph.ch, glyph.style);
        }
    }

    fn draw_frame(&self, fb: &mut FrameBuffer, layout: &Layout) {
        let style = Style::new(GRID, BACKGROUND);
        let Layout {
            frame_x: x,
            frame_y: y,
            frame_w: w,
            frame_h: h,
            ..
        } = *layout;

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_ghost(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        active: &ActiveSnapshot,
        ghost_y: i8,
    ) {
        let style = Style::new(piece_color(active.kind).scaled(96), WELL);
        for (x, y) in active.cells_at(ghost_y) {
            self.fill_cell(fb, layout, x, y, Glyph::new('░', style));
        }
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        layout: &Layout,
        viewport: Viewport,
    ) {
        let x = layout.panel_x;
        if x >= viewport.width {
            return;
        }
        let label = Style::new(TEXT, BACKGROUND).bold();
        let value = Style::new(TEXT, BACKGROUND);

        let mut y = layout.frame_y;
        let end = fb.put_str(x, y, "NEXT ", label);
        fb.put_str(end, y, snap.next.as_str(), value);
        y += 1;
        for (dx, dy) in get_shape(snap.next, Rotation::North) {
            let px = x + dx as u16 * self.cell_w;
            let py = y + dy as u16;
            let glyph = block(snap.next);
            fb.fill_rect(px, py, self.cell_w, 1, glyph.ch, glyph.style);
        }
        y += 4;

        for (name, n) in [
            ("SCORE", snap.score),
            ("LINES", snap.lines),
            ("LEVEL", snap.level),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, n, value);
            y += 3;
        }

        for line in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, line, value.dim());
            y += 1;
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, layout: &Layout) {
        let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let mid_y = layout.frame_y + layout.frame_h / 2;
        for (dy, text) in [(0, GAME_OVER_TEXT), (2, RESTART_HINT)] {
            let w = text.chars().count() as u16;
            let x = layout.frame_x + layout.frame_w.saturating_sub(w) / 2;
            fb.put_str(x, mid_y + dy, text, style);
        }
    }
}

fn block(kind: PieceKind) -> Glyph {
    Glyph::new('█', Style::new(piece_color(kind), WELL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Session;

    fn find(fb: &FrameBuffer, needle: &str) -> Option<(u16, usize)> {
        (0..fb.height()).find_map(|y| fb.row_text(y).find(needle).map(|i| (y, i)))
    }

    #[test]
    fn active_piece_is_drawn_in_its_color() {
        let view = GameView::default();
        let vp = Viewport::new(80, 24);
        let snap = Session::new(1).snapshot();
        let fb = view.render(&snap, vp);

        let layout = view.layout(vp);
        let active = snap.active.unwrap();
        for (x, y) in active.cells {
            let (px, py) = view.cell_origin(&layout, x, y).unwrap();
            let glyph = fb.get(px, py).unwrap();
            assert_eq!(glyph.ch, '█');
            assert_eq!(glyph.style.fg, piece_color(active.kind));
        }
    }

    #[test]
    fn ghost_marks_landing_cells() {
        let view = GameView::default();
        let vp = Viewport::new(80, 24);
        let snap = Session::new(2).snapshot();
        let fb = view.render(&snap, vp);

        let layout = view.layout(vp);
        let active = snap.active.unwrap();
        let ghost = active.cells_at(snap.ghost_y.unwrap());
        for (x, y) in ghost {
            let (px, py) = view.cell_origin(&layout, x, y).unwrap();
            assert_eq!(fb.get(px, py).unwrap().ch, '░');
        }
    }

    #[test]
    fn panel_shows_counters_and_controls() {
        let fb = GameView::default().render(&Session::new(3).snapshot(), Viewport::new(80, 30));
        for label in ["SCORE", "LINES", "LEVEL", "hard drop"] {
            assert!(find(&fb, label).is_some(), "missing {label}");
        }
        assert!(find(&fb, GAME_OVER_TEXT).is_none());
    }

    #[test]
    fn next_label_names_the_reserved_kind() {
        let mut snap = Session::new(3).snapshot();
        for kind in [PieceKind::S, PieceKind::L] {
            snap.next = kind;
            let fb = GameView::default().render(&snap, Viewport::new(80, 30));
            let expected = format!("NEXT {}", kind.as_str());
            assert!(find(&fb, &expected).is_some(), "missing {expected}");
        }
    }

    #[test]
    fn game_over_overlay_has_restart_hint() {
        let mut snap = Session::new(4).snapshot();
        snap.game_over = true;
        snap.active = None;
        snap.ghost_y = None;

        let fb = GameView::default().render(&snap, Viewport::new(80, 24));
        let (over_y, _) = find(&fb, GAME_OVER_TEXT).unwrap();
        let (hint_y, _) = find(&fb, RESTART_HINT).unwrap();
        assert_eq!(hint_y, over_y + 2);
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let fb = GameView::default().render(&GameSnapshot::default(), Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }
}
