use blockfall::core::{Board, EngineConfig, GameSnapshot, GameState};
use blockfall::term::{FrameBuffer, GameView, Rgb, ViewFlags, Viewport};
use blockfall::types::{PieceKind, Pos};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.extend(fb.row(y).iter().map(|c| c.ch));
        all.push('\n');
    }
    all
}

fn scripted(current: PieceKind, next: PieceKind) -> GameState {
    GameState::from_parts(EngineConfig::default(), Board::new(), current, next, 1).unwrap()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, ViewFlags::default(), Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_follows_board_size() {
    let config = EngineConfig::default()
        .with_board_size(6, 12)
        .with_spawn(Pos::new(1, 0));
    let snap = GameState::with_config(config, 3).unwrap().snapshot();
    let fb = GameView::default().render(&snap, ViewFlags::default(), Viewport::new(14, 14));

    assert_eq!(fb.get(13, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 13).unwrap().ch, '└');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    // Locked I block at bottom-left.
    snap.board[19 * 10] = Some(PieceKind::I);
    snap.active = None;
    snap.ghost_y = None;

    let fb = GameView::default().render(&snap, ViewFlags::default(), Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let (x0, y0) = (1, 1 + 19);
    for x in [x0, x0 + 1] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, Rgb::from(PieceKind::I.rgb()));
    }
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_and_ghost() {
    let snap = scripted(PieceKind::I, PieceKind::O).snapshot();
    let fb = GameView::default().render(&snap, ViewFlags::default(), Viewport::new(22, 22));

    // Flat I spans columns 3-6; live on row 1, ghost on row 19.
    for col in 3..7u16 {
        let px = 1 + col * 2;
        assert_eq!(fb.get(px, 1 + 1).unwrap().ch, '█');
        assert_eq!(fb.get(px, 1 + 19).unwrap().ch, '░');
    }
    assert_eq!(fb.get(1 + 2 * 2, 1 + 19).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = scripted(PieceKind::T, PieceKind::O).snapshot();
    snap.lines = 37;
    snap.hold = Some(PieceKind::J);

    let fb = GameView::default().render(&snap, ViewFlags::default(), Viewport::new(60, 22));
    let all = screen_text(&fb);

    assert!(all.contains("NEXT"), "{}", all);
    assert!(all.contains("HOLD"), "{}", all);
    assert!(all.contains("LINES"), "{}", all);
    assert!(all.contains("37"), "{}", all);

    // NEXT preview: the O is two blocks (four columns) wide, right under the label.
    let frame_x = (60 - 22) / 2;
    let panel_x = frame_x + 22 + 2;
    let label_y = (0..fb.height())
        .find(|&y| screen_text_row(&fb, y).contains("NEXT"))
        .unwrap();
    let preview: String = (panel_x..panel_x + 6)
        .map(|x| fb.get(x, label_y + 1).unwrap().ch)
        .collect();
    assert_eq!(preview, "  ████");
}

fn screen_text_row(fb: &FrameBuffer, y: u16) -> String {
    fb.row(y).iter().map(|c| c.ch).collect()
}

#[test]
fn term_view_skips_side_panel_when_narrow() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, ViewFlags::default(), Viewport::new(30, 22));
    assert!(!screen_text(&fb).contains("NEXT"));
}

#[test]
fn term_view_overlays() {
    let mut snap = GameState::new(1).snapshot();
    let view = GameView::default();

    let paused = view.render(&snap, ViewFlags { paused: true }, Viewport::new(22, 22));
    assert!(screen_text(&paused).contains("PAUSED"));

    snap.game_over = true;
    let over = view.render(&snap, ViewFlags::default(), Viewport::new(22, 22));
    assert!(screen_text(&over).contains("GAME OVER"));
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let snap = GameState::new(9).snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&snap, ViewFlags::default(), Viewport::new(40, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 24));
    let first = fb.clone();
    view.render_into(&snap, ViewFlags::default(), Viewport::new(40, 24), &mut fb);
    assert_eq!(fb, first);
}

#[test]
fn term_view_survives_boards_wider_than_the_terminal() {
    let snap = GameSnapshot {
        columns: 40_000,
        rows: 20,
        ..GameSnapshot::default()
    };
    let fb = GameView::default().render(&snap, ViewFlags::default(), Viewport::new(80, 24));
    assert_eq!((fb.width(), fb.height()), (80, 24));
    // The frame is clipped horizontally and centered vertically (22 rows in 24).
    assert_eq!(fb.get(0, 1).unwrap().ch, '┌');
    assert_eq!(fb.get(79, 1).unwrap().ch, '─');
}
