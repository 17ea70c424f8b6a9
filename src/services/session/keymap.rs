// Keyboard shortcuts for the undo history

/// A key press as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyPress {
    pub key: char,
    pub ctrl: bool,
    /// Cmd on macOS
    pub meta: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: char) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Undo,
    Redo,
}

/// Ctrl/Cmd+Z undoes; Ctrl/Cmd+Y and Ctrl/Cmd+Shift+Z redo.
pub fn history_action(press: &KeyPress) -> Option<HistoryAction> {
    if !(press.ctrl || press.meta) {
        return None;
    }

    match press.key.to_ascii_lowercase() {
        'z' if press.shift => Some(HistoryAction::Redo),
        'z' => Some(HistoryAction::Undo),
        'y' => Some(HistoryAction::Redo),
        _ => None,
    }
}
