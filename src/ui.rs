//! Layout and drawing: playfield, controls panel, line-clear flash.

use crate::board::Board;
use crate::game::GameState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use tachyonfx::{Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx};

/// Every block, settled or falling, is drawn with this glyph.
pub const BLOCK_GLYPH: &str = "X";
const BLOCK_FG: Color = Color::White;
const BORDER_FG: Color = Color::DarkGray;
const TITLE_FG: Color = Color::Yellow;

const SIDEBAR_WIDTH: u16 = 24;

/// Duration of the line-clear flash (TachyonFX) in ms.
const LINE_CLEAR_FADE_MS: u32 = 250;

/// Playfield size in terminal cells, border included.
fn playfield_outer_size(board: &Board) -> (u16, u16) {
    let side = |n: usize| u16::try_from(n).unwrap_or(u16::MAX).saturating_add(2);
    (side(board.width()), side(board.height()))
}

/// Split the centred game area into (playfield, sidebar).
fn game_layout(area: Rect, board: &Board) -> (Rect, Rect) {
    let (pw, ph) = playfield_outer_size(board);
    let total_w = pw.saturating_add(SIDEBAR_WIDTH);

    let horiz_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);

    let vert_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(ph),
            Constraint::Fill(1),
        ])
        .split(horiz_chunks[1]);

    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(pw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert_chunks[1]);
    (inner[0], inner[1])
}

/// Board cells rect (inside the border) for the given frame area.
pub fn board_rect(area: Rect, board: &Board) -> Rect {
    let (playfield, _) = game_layout(area, board);
    playfield_block().inner(playfield)
}

fn playfield_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER_FG))
        .title(Span::styled(" blocktui ", Style::default().fg(TITLE_FG)))
}

/// Flash played over the board after rows are cleared.
pub fn line_clear_effect() -> Effect {
    fx::fade_from_fg(Color::Yellow, (LINE_CLEAR_FADE_MS, Interpolation::QuadOut))
}

/// Draw one frame. A running `line_clear_effect` is advanced by `delta_ms`.
pub fn draw(
    frame: &mut Frame,
    state: &GameState,
    line_clear_effect: &mut Option<Effect>,
    delta_ms: u32,
) {
    let area = frame.area();
    let (playfield_area, sidebar_area) = game_layout(area, state.board());
    draw_playfield(frame, state, playfield_area);
    draw_sidebar(frame, state, sidebar_area);

    if let Some(effect) = line_clear_effect {
        let board_area = playfield_block().inner(playfield_area);
        frame.render_effect(effect, board_area, TfxDuration::from_millis(delta_ms));
    }
}

fn draw_playfield(frame: &mut Frame, state: &GameState, area: Rect) {
    let block = playfield_block();
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let buf = frame.buffer_mut();
    let style = Style::default().fg(BLOCK_FG);
    for (x, y) in state.visible_cells() {
        let rx = inner.x.saturating_add(x as u16);
        let ry = inner.y.saturating_add(y as u16);
        // Terminal smaller than the board: clip.
        if rx < inner.x + inner.width && ry < inner.y + inner.height {
            buf[(rx, ry)].set_symbol(BLOCK_GLYPH).set_style(style);
        }
    }
}

fn draw_sidebar(frame: &mut Frame, state: &GameState, area: Rect) {
    let text = Style::default().fg(Color::Gray);
    let falling = state
        .active()
        .map_or_else(|| "-".to_string(), |a| format!("{:?}", a.piece.kind()));
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!(" Piece: {falling}"), text)),
        Line::from(""),
        Line::from(Span::styled(" Controls ", Style::default().fg(TITLE_FG))),
        Line::from(""),
        Line::from(Span::styled(" a / ← / h   Left", text)),
        Line::from(Span::styled(" d / → / l   Right", text)),
        Line::from(Span::styled(" s / ↓ / j   Drop", text)),
        Line::from(Span::styled(" w / ↑ / k   Rotate", text)),
        Line::from(Span::styled(" q / Esc     Quit", text)),
    ];
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BORDER_FG)),
        )
        .render(area, frame.buffer_mut());
}
