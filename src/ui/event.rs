use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Keys the page reacts to, independent of the terminal backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKey {
    Char(char),
    Backspace,
    Enter,
    Esc,
    Tab,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Input for the page, queued and consumed on the UI thread.
/// Coordinates are screen cells.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    PointerMoved { col: u16, row: u16 },
    PointerLeft,
    /// Positive deltas scroll forward (down / right)
    Wheel { col: u16, row: u16, delta: f32 },
    DragStarted { col: u16, row: u16 },
    DragMoved { col: u16, row: u16 },
    /// Release; a press released without movement counts as a click
    DragEnded,
    Key(PageKey),
    Resized { width: u16, height: u16 },
}

impl PageEvent {
    /// Translate a terminal event. Returns `None` for input the page ignores.
    pub fn from_terminal(event: &Event) -> Option<Self> {
        match event {
            Event::Key(key) => Self::from_key(key),
            Event::Mouse(mouse) => Self::from_mouse(mouse),
            Event::Resize(width, height) => Some(PageEvent::Resized {
                width: *width,
                height: *height,
            }),
            // The terminal does not report the pointer leaving it
            Event::FocusLost => Some(PageEvent::PointerLeft),
            _ => None,
        }
    }

    fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind == crossterm::event::KeyEventKind::Release {
            return None;
        }
        let key = match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => PageKey::Char(c),
            (KeyCode::Backspace, _) => PageKey::Backspace,
            (KeyCode::Enter, _) => PageKey::Enter,
            (KeyCode::Esc, _) => PageKey::Esc,
            (KeyCode::Tab, _) => PageKey::Tab,
            (KeyCode::Up, _) => PageKey::Up,
            (KeyCode::Down, _) => PageKey::Down,
            (KeyCode::Left, _) => PageKey::Left,
            (KeyCode::Right, _) => PageKey::Right,
            (KeyCode::PageUp, _) => PageKey::PageUp,
            (KeyCode::PageDown, _) => PageKey::PageDown,
            (KeyCode::Home, _) => PageKey::Home,
            (KeyCode::End, _) => PageKey::End,
            _ => return None,
        };
        Some(PageEvent::Key(key))
    }

    fn from_mouse(mouse: &MouseEvent) -> Option<Self> {
        let (col, row) = (mouse.column, mouse.row);
        let event = match mouse.kind {
            MouseEventKind::Moved => PageEvent::PointerMoved { col, row },
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => PageEvent::Wheel { col, row, delta: 1.0 },
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => PageEvent::Wheel { col, row, delta: -1.0 },
            MouseEventKind::Down(MouseButton::Left) => PageEvent::DragStarted { col, row },
            MouseEventKind::Drag(MouseButton::Left) => PageEvent::DragMoved { col, row },
            MouseEventKind::Up(MouseButton::Left) => PageEvent::DragEnded,
            _ => return None,
        };
        Some(event)
    }
}
