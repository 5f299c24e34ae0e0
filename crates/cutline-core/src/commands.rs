//! Keyboard bindings.
//!
//! Keys are mapped to semantic [`EditorCommand`]s here; the editor decides
//! what each command does. Nothing fires while a text input has focus.

use serde::{Deserialize, Serialize};

/// Keys the timeline reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Delete,
    Backspace,
    Home,
    End,
    Char(char),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn meta() -> Self {
        Self {
            meta: true,
            ..Self::NONE
        }
    }

    /// Cmd on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeyContext {
    /// A text field has focus and owns the keyboard.
    pub input_focused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EditorCommand {
    TogglePlayback,
    /// Move the playhead by a whole number of frames.
    NudgeFrames(i32),
    JumpToPreviousEdge,
    JumpToNextEdge,
    SetInsertMode,
    SetOverwriteMode,
    TrimStartToPlayhead,
    TrimEndToPlayhead,
    LiftDelete,
    RippleDelete,
    ToggleLink,
    ToggleSnapping,
    ZoomIn,
    ZoomOut,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyDispatch {
    Command(EditorCommand),
    NoMatch,
    /// A binding exists but the keyboard belongs to a text field.
    Suppressed,
}

/// Map a key press to a command. `shift_nudge_frames` is how far a shifted
/// arrow moves the playhead.
pub fn command_for_key(
    key: Key,
    modifiers: Modifiers,
    context: &KeyContext,
    shift_nudge_frames: u32,
) -> KeyDispatch {
    let command = match key {
        Key::Space => Some(EditorCommand::TogglePlayback),
        Key::ArrowLeft | Key::ArrowRight => {
            let frames = if modifiers.shift {
                i32::try_from(shift_nudge_frames.max(1)).unwrap_or(i32::MAX)
            } else {
                1
            };
            let sign = if key == Key::ArrowLeft { -1 } else { 1 };
            Some(EditorCommand::NudgeFrames(sign * frames))
        }
        Key::ArrowUp => Some(EditorCommand::JumpToPreviousEdge),
        Key::ArrowDown => Some(EditorCommand::JumpToNextEdge),
        Key::Delete | Key::Backspace if modifiers.shift => Some(EditorCommand::RippleDelete),
        Key::Delete | Key::Backspace => Some(EditorCommand::LiftDelete),
        Key::Char(c) => match c.to_ascii_lowercase() {
            'l' if modifiers.command() => Some(EditorCommand::ToggleLink),
            _ if modifiers.command() => None,
            ',' => Some(EditorCommand::SetInsertMode),
            '.' => Some(EditorCommand::SetOverwriteMode),
            'q' => Some(EditorCommand::TrimStartToPlayhead),
            'w' => Some(EditorCommand::TrimEndToPlayhead),
            's' => Some(EditorCommand::ToggleSnapping),
            '+' | '=' => Some(EditorCommand::ZoomIn),
            '-' => Some(EditorCommand::ZoomOut),
            _ => None,
        },
        Key::Home | Key::End => None,
    };

    match command {
        None => KeyDispatch::NoMatch,
        Some(_) if context.input_focused => KeyDispatch::Suppressed,
        Some(command) => KeyDispatch::Command(command),
    }
}
