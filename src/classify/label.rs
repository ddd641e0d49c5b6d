//! Classification labels and stream identities.
//!
//! A [`Label`] is produced fresh every frame by exactly one classifier in
//! the battery and never mutated.  "No detection" is expressed as
//! `Option::<Label>::None` at every stage — no error type and no exception
//! crosses a component boundary for an abstaining classifier.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ControlCommand
// ---------------------------------------------------------------------------

/// Discrete control command recognized from a control gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlCommand {
    /// Remove the last composed character (one-hand pinch).
    Delete,
    /// Append a word separator (both open palms).
    Space,
    /// Clear the whole composed text (both fists).
    Clear,
}

impl ControlCommand {
    /// Short label for logs and display.
    pub fn label(&self) -> &'static str {
        match self {
            ControlCommand::Delete => "delete",
            ControlCommand::Space => "space",
            ControlCommand::Clear => "clear",
        }
    }
}

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// One per-frame classification result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// A single alphabet symbol.
    Letter(char),
    /// A two-character consonant+vowel syllable.
    Syllable(String),
    /// A whole word mapped from a single pose.
    Word(String),
    /// A control command.
    Control(ControlCommand),
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Letter(c) => write!(f, "{c}"),
            Label::Syllable(s) => write!(f, "{s}"),
            Label::Word(w) => write!(f, "{w}"),
            Label::Control(c) => write!(f, "<{}>", c.label()),
        }
    }
}

// ---------------------------------------------------------------------------
// StreamKind
// ---------------------------------------------------------------------------

/// Identifies which classifier stream produced a label.
///
/// Each stream owns its own stabilizer; the variants are listed in battery
/// priority order (highest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamKind {
    Controls,
    Words,
    Letters,
    Syllables,
}

impl StreamKind {
    pub const ALL: [StreamKind; 4] = [
        StreamKind::Controls,
        StreamKind::Words,
        StreamKind::Letters,
        StreamKind::Syllables,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StreamKind::Controls => "controls",
            StreamKind::Words => "words",
            StreamKind::Letters => "letters",
            StreamKind::Syllables => "syllables",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
