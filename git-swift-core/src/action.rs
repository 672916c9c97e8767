/// Every user interaction produces an Action. The UI never calls git directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Esc: quit from the list, dismiss the delete dialog
    Cancel,

    // Branch list
    SwitchBranch,
    DeleteBranch,
    /// Alt+digit: select row `n` and switch to it
    QuickSwitch(u8),
    MoveSelection(i32),

    // Search input
    SearchPush(char),
    SearchPop,
    SearchDeleteWord,
    SearchDeleteToStart,
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,

    // Delete confirmation dialog
    ToggleChoice,
    Confirm,
}
