#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    Quit,

    // Navigation
    FocusNext,
    FocusPrevious,

    // Editing
    Input(char),
    Backspace,
    ClearField,
    Paste(String),
    NextGenre,
    PreviousGenre,

    // Actions
    Submit,
    TogglePlayback,
    StopPlayback,
    Download,
}
