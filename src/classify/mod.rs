//! The classifier battery — four independent rule-based classifiers.
//!
//! # Architecture
//!
//! ```text
//! FeatureRecord(s)
//!   │
//!   ├─ 1. ControlClassifier   (two-hand Clear/Space, one-hand Delete)
//!   ├─ 2. WordClassifier      (single-pose word lexicon)
//!   ├─ 3. LetterClassifier    (A–Z cascade + count fallback)   ┐ one of the
//!   └─ 4. SyllableCombiner    (two-hand consonant + vowel)     ┘ two, by mode
//! ```
//!
//! Every classifier is a pure function `FeatureRecord(s) → Option<Label>`
//! with no shared state.  The orchestrator evaluates them in this strict
//! priority order per frame and stops at the first producer; abstention is
//! `None`, never an error.

pub mod controls;
pub mod label;
pub mod letters;
pub mod syllables;
pub mod words;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use controls::{ControlClassifier, ControlThresholds};
pub use label::{ControlCommand, Label, StreamKind};
pub use letters::{LetterClassifier, LetterThresholds, SUPPORTED_LETTERS};
pub use syllables::{SyllableCombiner, SyllableThresholds, SUPPORTED_SYLLABLES};
pub use words::{WordClassifier, WordLexicon, WordShape, WordThresholds};
