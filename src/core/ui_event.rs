//=========================================================================
// UI Events
//
// Interaction events reported by the display/UI layer.
//
// Hit-testing and raw pointer/keyboard polling happen on the host side;
// scenes only see what the player meant (a button press, a hit on the
// clickable target).
//
//=========================================================================

//=== UiEvent =============================================================

/// Player intent reported by the UI layer for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiEvent {
    /// The start button was pressed.
    StartPressed,

    /// The quit button was pressed.
    QuitPressed,

    /// Any key or button went down this frame.
    AnyKey,

    /// The clickable target was hit by a click or touch.
    TargetClicked,

    /// The reload button was pressed.
    ReloadPressed,
}
