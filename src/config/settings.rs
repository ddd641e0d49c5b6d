//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and handed to the
//! pipeline at construction time.  The pipeline receives every threshold
//! through [`AppConfig`] — nothing is baked into classifier logic.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::classify::{ControlThresholds, LetterThresholds, SyllableThresholds, WordThresholds};
use crate::landmark::{FeatureConfig, QualityTuning};
use crate::stabilize::StabilizerConfig;

use super::AppPaths;

// ---------------------------------------------------------------------------
// PipelineMode
// ---------------------------------------------------------------------------

/// Selects which classifier occupies the final battery slot.
///
/// | Variant   | Battery                                       |
/// |-----------|-----------------------------------------------|
/// | Letters   | controls → words → letter cascade             |
/// | Syllables | controls → words → two-hand syllable combiner |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineMode {
    /// Letter-by-letter spelling on a single hand.
    Letters,
    /// Two-hand consonant+vowel syllables.
    Syllables,
}

impl Default for PipelineMode {
    fn default() -> Self {
        Self::Letters
    }
}

// ---------------------------------------------------------------------------
// ModeProfile
// ---------------------------------------------------------------------------

/// Per-mode threshold bundle consumed by the pipeline core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeProfile {
    /// Hard floor on the pose engine's per-hand detection confidence.
    pub detection_floor: f32,
    /// Final quality-score cutoff below which a hand is dropped.
    pub quality_cutoff: f32,
    /// Stabilizer tuning for the mode's primary stream.
    pub stability: StabilizerConfig,
    /// Ask the external pose engine for its slower, more precise model.
    pub high_precision: bool,
}

/// Defaults for letter spelling: moderate gates, a short snappy window.
fn letters_profile() -> ModeProfile {
    ModeProfile {
        detection_floor: 0.7,
        quality_cutoff: 0.5,
        stability: StabilizerConfig {
            window: 5,
            majority: 0.6,
            cooldown: 15,
        },
        high_precision: false,
    }
}

/// Defaults for syllables: both hands must track well, so the detector
/// floor rises while the quality cutoff relaxes, and the window lengthens.
fn syllables_profile() -> ModeProfile {
    ModeProfile {
        detection_floor: 0.8,
        quality_cutoff: 0.4,
        stability: StabilizerConfig {
            window: 8,
            majority: 0.6,
            cooldown: 20,
        },
        high_precision: true,
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use sign_to_text::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Active interpretation mode at startup.
    pub mode: PipelineMode,
    /// Threshold bundle used while in Letters mode.
    pub letters: ModeProfile,
    /// Threshold bundle used while in Syllables mode.
    pub syllables: ModeProfile,
    /// Stabilizer tuning for the word stream (long window, long cooldown —
    /// a word fires rarely and must not repeat).
    pub words: StabilizerConfig,
    /// Stabilizer tuning for the control stream (short window so commands
    /// feel immediate).
    pub controls: StabilizerConfig,
    /// Feature-extraction thresholds.
    pub features: FeatureConfig,
    /// Letter-cascade distance/angle cutoffs.
    pub letter_rules: LetterThresholds,
    /// Word-shape cutoffs.
    pub word_rules: WordThresholds,
    /// Control-gesture cutoffs.
    pub control_rules: ControlThresholds,
    /// Syllable vowel-shape cutoffs.
    pub syllable_rules: SyllableThresholds,
    /// Quality-filter tuning shared by both modes.
    pub quality: QualityTuning,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::default(),
            letters: letters_profile(),
            syllables: syllables_profile(),
            words: StabilizerConfig {
                window: 8,
                majority: 0.7,
                cooldown: 30,
            },
            controls: StabilizerConfig {
                window: 3,
                majority: 0.6,
                cooldown: 20,
            },
            features: FeatureConfig::default(),
            letter_rules: LetterThresholds::default(),
            word_rules: WordThresholds::default(),
            control_rules: ControlThresholds::default(),
            syllable_rules: SyllableThresholds::default(),
            quality: QualityTuning::default(),
        }
    }
}

impl AppConfig {
    /// The threshold bundle for `mode`.
    pub fn profile(&self, mode: PipelineMode) -> &ModeProfile {
        match mode {
            PipelineMode::Letters => &self.letters,
            PipelineMode::Syllables => &self.syllables,
        }
    }

    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns `true` when no `settings.toml` file exists yet — first-run
    /// detection.
    pub fn is_first_run() -> bool {
        !AppPaths::new().settings_file.exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
