//! Two-hand syllable combination — consonant + vowel in one frame.
//!
//! [`SyllableCombiner`] reads a consonant shape from the left hand and a
//! vowel shape from the right, and concatenates them when the pair forms a
//! supported syllable ("MA", "PE", "LU", …).  When the straight assignment
//! yields nothing it retries with the roles swapped, so a signer with the
//! opposite hand dominance still resolves.
//!
//! Both hands must be present; a single hand always abstains.

use serde::{Deserialize, Serialize};

use crate::landmark::FeatureRecord;

use super::label::Label;

/// Consonants recognized on the consonant-role hand.
pub const CONSONANTS: [char; 5] = ['M', 'P', 'L', 'T', 'S'];

/// Vowels recognized on the vowel-role hand.
pub const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

/// The syllable inventory: {M, P, L} × {A, E, I, O, U}.
///
/// T and S are detectable consonant shapes but form no supported syllable,
/// matching the source material's inventory.
pub const SUPPORTED_SYLLABLES: [&str; 15] = [
    "MA", "ME", "MI", "MO", "MU", "PA", "PE", "PI", "PO", "PU", "LA", "LE", "LI", "LO", "LU",
];

// ---------------------------------------------------------------------------
// SyllableThresholds
// ---------------------------------------------------------------------------

/// Cutoffs for the vowel shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyllableThresholds {
    /// Maximum thumb–index distance closing the O ring.
    pub o_circle_max: f32,
    /// Maximum index–middle distance for the joined U.
    pub u_together_max: f32,
}

impl Default for SyllableThresholds {
    fn default() -> Self {
        Self {
            o_circle_max: 0.08,
            u_together_max: 0.05,
        }
    }
}

// ---------------------------------------------------------------------------
// SyllableCombiner
// ---------------------------------------------------------------------------

/// Pure per-frame syllable classifier over both hands' features.
#[derive(Debug, Clone)]
pub struct SyllableCombiner {
    thresholds: SyllableThresholds,
}

impl SyllableCombiner {
    pub fn new(thresholds: SyllableThresholds) -> Self {
        Self { thresholds }
    }

    /// Combine the two hands into a supported syllable, if any.
    pub fn classify(
        &self,
        left: Option<&FeatureRecord>,
        right: Option<&FeatureRecord>,
    ) -> Option<Label> {
        let left = left?;
        let right = right?;

        self.combine(self.consonant(left), self.vowel(right))
            // Retry with roles swapped when the straight reading fails.
            .or_else(|| self.combine(self.consonant(right), self.vowel(left)))
            .map(Label::Syllable)
    }

    /// Consonant shapes, most specific first.
    fn consonant(&self, rec: &FeatureRecord) -> Option<char> {
        if !rec.index_extended
            && !rec.middle_extended
            && !rec.ring_extended
            && rec.thumb_extended
        {
            Some('M')
        } else if rec.index_extended
            && rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended
        {
            Some('P')
        } else if rec.index_extended
            && !rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended
            && rec.thumb_extended
        {
            Some('L')
        } else if rec.fist_closed && rec.thumb_extended {
            Some('T')
        } else if rec.fist_closed {
            Some('S')
        } else {
            None
        }
    }

    /// Vowel shapes, most specific first.
    fn vowel(&self, rec: &FeatureRecord) -> Option<char> {
        let t = &self.thresholds;
        if rec.fist_closed && !rec.thumb_extended {
            Some('A')
        } else if !rec.index_extended && !rec.middle_extended && rec.thumb_extended {
            Some('E')
        } else if !rec.index_extended
            && !rec.middle_extended
            && !rec.ring_extended
            && rec.pinky_extended
        {
            Some('I')
        } else if rec.thumb_index_dist < t.o_circle_max && rec.extended_count <= 2 {
            Some('O')
        } else if rec.index_extended
            && rec.middle_extended
            && !rec.ring_extended
            && !rec.pinky_extended
            && rec.index_middle_dist < t.u_together_max
        {
            Some('U')
        } else {
            None
        }
    }

    fn combine(&self, consonant: Option<char>, vowel: Option<char>) -> Option<String> {
        let syllable: String = [consonant?, vowel?].iter().collect();
        SUPPORTED_SYLLABLES
            .contains(&syllable.as_str())
            .then_some(syllable)
    }
}

impl Default for SyllableCombiner {
    fn default() -> Self {
        Self::new(SyllableThresholds::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
