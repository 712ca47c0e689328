#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    First,
    Last,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SelectRow(Direction),
    /// Kill bound to a table row's PID.
    KillRow(u32),
    FocusPidInput,
    LeavePidInput,
    UpdatePidInput(String),
    SubmitPidInput,
    DismissAlert,
    CycleTheme,
    ToggleHelp,
    Refresh,
    Click(u16, u16),
    None,
}
