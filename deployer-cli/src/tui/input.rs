/// Input modes for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Insert,
}

/// Field receiving keystrokes in Insert mode
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EditField {
    #[default]
    Name,
    Source,
}
