//! Conversion from crossterm events to engine input.
//!
//! Mouse motion becomes a pointer move; pressing or dragging with the left
//! button becomes a single-touch start or move. Terminal coordinates are
//! cells, so each event lands on the pixel center of its cell.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use glyphburst::InputEvent;

use crate::surface::CellSize;

/// Converts a crossterm mouse event into an engine input event.
///
/// Scrolls, releases and non-left buttons have no engine meaning and yield
/// `None`.
pub fn from_crossterm_mouse(event: MouseEvent, cell: CellSize) -> Option<InputEvent> {
    let point = cell.center_of(event.column, event.row);
    match event.kind {
        MouseEventKind::Moved => Some(InputEvent::PointerMove { client: point }),
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::TouchStart(vec![point])),
        MouseEventKind::Drag(MouseButton::Left) => Some(InputEvent::TouchMove(vec![point])),
        _ => None,
    }
}

/// Returns true for the keys that quit: `q`, `Esc` and `Ctrl+C`.
pub fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
