//! Per-frame orchestration: quality filter → classifier battery → stabilizers.
//!
//! [`Pipeline::process`] is the single entry point per camera tick.  It is
//! synchronous, never blocks, and never fails — the worst outcome of any
//! malformed or low-quality input is "no event this frame".
//!
//! # Battery order
//!
//! Classifiers run in strict priority order and the first producer wins the
//! frame: controls, then words, then (depending on the active mode) the
//! letter cascade or the two-hand syllable combiner.  Single-hand
//! classifiers prefer the right hand when both are present.
//!
//! Every frame, the winning stream's stabilizer receives the raw label and
//! all other streams receive a `None` sample.  Confirmations are collected
//! in priority order and only the first is emitted, so at most one
//! [`ConfirmedEvent`] leaves the pipeline per frame.

use serde::{Deserialize, Serialize};

use crate::classify::{
    ControlClassifier, Label, LetterClassifier, StreamKind, SyllableCombiner, WordClassifier,
    WordLexicon,
};
use crate::config::{AppConfig, PipelineMode};
use crate::landmark::{FeatureExtractor, FeatureRecord, MultiHandFrame, QualityFilter};
use crate::stabilize::Stabilizer;

// ---------------------------------------------------------------------------
// ConfirmedEvent
// ---------------------------------------------------------------------------

/// The pipeline's output for one frame: a stabilized, debounced label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedEvent {
    /// Which classifier stream confirmed the label.
    pub stream: StreamKind,
    pub label: Label,
    /// Frame index since pipeline start (0-based).
    pub frame: u64,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// The real-time classification pipeline.
///
/// Owns all mutable state (quality history, stabilizer windows); constructed
/// once from an explicit [`AppConfig`] and driven frame by frame from a
/// single worker.  No ambient/global state anywhere.
#[derive(Debug)]
pub struct Pipeline {
    mode: PipelineMode,
    config: AppConfig,

    quality: QualityFilter,
    extractor: FeatureExtractor,

    controls: ControlClassifier,
    words: WordClassifier,
    letters: LetterClassifier,
    syllables: SyllableCombiner,

    controls_stab: Stabilizer,
    words_stab: Stabilizer,
    letters_stab: Stabilizer,
    syllables_stab: Stabilizer,

    frames: u64,
}

impl Pipeline {
    /// Build a pipeline from configuration.  All thresholds come in here;
    /// nothing is baked into classifier logic.
    pub fn new(config: &AppConfig) -> Self {
        let mode = config.mode;
        let profile = config.profile(mode);

        Self {
            mode,
            config: config.clone(),
            quality: QualityFilter::new(
                config.quality.clone(),
                profile.detection_floor,
                profile.quality_cutoff,
            ),
            extractor: FeatureExtractor::new(config.features.clone()),
            controls: ControlClassifier::new(config.control_rules.clone()),
            words: WordClassifier::new(config.word_rules.clone(), WordLexicon::builtin()),
            letters: LetterClassifier::new(config.letter_rules.clone()),
            syllables: SyllableCombiner::new(config.syllable_rules.clone()),
            controls_stab: Stabilizer::new(config.controls),
            words_stab: Stabilizer::new(config.words),
            letters_stab: Stabilizer::new(config.letters.stability),
            syllables_stab: Stabilizer::new(config.syllables.stability),
            frames: 0,
        }
    }

    pub fn mode(&self) -> PipelineMode {
        self.mode
    }

    /// Frames processed since start.
    pub fn frames_processed(&self) -> u64 {
        self.frames
    }

    /// Word lexicon, for binding custom words.
    pub fn word_lexicon_mut(&mut self) -> &mut WordLexicon {
        self.words.lexicon_mut()
    }

    /// Switch between letter and syllable interpretation.
    ///
    /// Atomically resets the mode-dependent stabilizers and the quality
    /// history so pre- and post-switch samples never mix.
    pub fn set_mode(&mut self, mode: PipelineMode) {
        if mode == self.mode {
            return;
        }
        log::info!("pipeline: mode switch {:?} → {:?}", self.mode, mode);
        self.mode = mode;

        let profile = self.config.profile(mode);
        self.quality.set_gates(profile.detection_floor, profile.quality_cutoff);
        self.quality.reset();
        self.letters_stab.reset();
        self.syllables_stab.reset();
    }

    /// Reset all per-stream state (explicit user action).
    pub fn reset(&mut self) {
        self.quality.reset();
        self.controls_stab.reset();
        self.words_stab.reset();
        self.letters_stab.reset();
        self.syllables_stab.reset();
    }

    /// Process one frame; returns at most one confirmed event.
    pub fn process(&mut self, frame: MultiHandFrame) -> Option<ConfirmedEvent> {
        let seq = self.frames;
        self.frames += 1;

        let filtered = self.quality.filter(&frame);
        let left = filtered
            .left
            .as_ref()
            .map(|h| self.extractor.extract(&h.landmarks));
        let right = filtered
            .right
            .as_ref()
            .map(|h| self.extractor.extract(&h.landmarks));

        let winner = self.run_battery(left.as_ref(), right.as_ref());
        if let Some((stream, label)) = &winner {
            log::trace!("frame {seq}: {} → {label}", stream.label());
        }

        // Feed every stream; the winner gets its label, the rest get None.
        let mut confirmed: Option<ConfirmedEvent> = None;
        for stream in StreamKind::ALL {
            let sample = match &winner {
                Some((s, label)) if *s == stream => Some(label.clone()),
                _ => None,
            };
            if let Some(label) = self.stabilizer_mut(stream).push(sample) {
                if confirmed.is_none() {
                    confirmed = Some(ConfirmedEvent {
                        stream,
                        label,
                        frame: seq,
                    });
                } else {
                    // Two streams confirmed on the same frame; the higher
                    // priority one already claimed it.
                    log::debug!(
                        "frame {seq}: dropping simultaneous {} confirmation of {label}",
                        stream.label()
                    );
                }
            }
        }

        if let Some(event) = &confirmed {
            log::debug!(
                "frame {seq}: confirmed {} on {} stream",
                event.label,
                event.stream.label()
            );
        }
        confirmed
    }

    /// Evaluate the battery in priority order; first producer wins.
    fn run_battery(
        &self,
        left: Option<&FeatureRecord>,
        right: Option<&FeatureRecord>,
    ) -> Option<(StreamKind, Label)> {
        if let Some(label) = self.controls.classify(left, right) {
            return Some((StreamKind::Controls, label));
        }

        for rec in [right, left].into_iter().flatten() {
            if let Some(label) = self.words.classify(rec) {
                return Some((StreamKind::Words, label));
            }
        }

        match self.mode {
            PipelineMode::Letters => {
                for rec in [right, left].into_iter().flatten() {
                    if let Some(label) = self.letters.classify(rec) {
                        return Some((StreamKind::Letters, label));
                    }
                }
            }
            PipelineMode::Syllables => {
                if let Some(label) = self.syllables.classify(left, right) {
                    return Some((StreamKind::Syllables, label));
                }
            }
        }

        None
    }

    fn stabilizer_mut(&mut self, stream: StreamKind) -> &mut Stabilizer {
        match stream {
            StreamKind::Controls => &mut self.controls_stab,
            StreamKind::Words => &mut self.words_stab,
            StreamKind::Letters => &mut self.letters_stab,
            StreamKind::Syllables => &mut self.syllables_stab,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ControlCommand;
    use crate::landmark::{fixtures, HandSide};

    fn pipeline(mode: PipelineMode) -> Pipeline {
        let mut config = AppConfig::default();
        config.mode = mode;
        Pipeline::new(&config)
    }

    fn letters_window() -> usize {
        AppConfig::default().letters.stability.window
    }

    /// A clean left-hand "A" fist at full confidence confirms exactly once,
    /// on the frame the letters window first fills, and not before.
    #[test]
    fn letter_a_confirms_at_window_fill() {
        let mut p = pipeline(PipelineMode::Letters);
        let window = letters_window() as u64;

        let mut events = Vec::new();
        for i in 0..window * 3 {
            let frame = fixtures::frame_one(HandSide::Left, fixtures::fist_a(), 0.95);
            if let Some(ev) = p.process(frame) {
                events.push((i, ev));
            }
        }

        assert_eq!(events.len(), 1, "exactly one confirmation: {events:?}");
        let (at, ev) = &events[0];
        assert_eq!(*at, window - 1, "confirmed when the majority first held");
        assert_eq!(ev.label, Label::Letter('A'));
        assert_eq!(ev.stream, StreamKind::Letters);
    }

    /// Both fists satisfy the letter cascade on each hand too; the control
    /// stream must preempt any letter interpretation.
    #[test]
    fn both_fists_confirm_clear_not_letters() {
        let mut p = pipeline(PipelineMode::Letters);
        let window = AppConfig::default().controls.window as u64;

        let mut events = Vec::new();
        for _ in 0..window * 3 {
            let frame = fixtures::frame_two(fixtures::fist_a(), 0.95, fixtures::fist_a(), 0.95);
            if let Some(ev) = p.process(frame) {
                events.push(ev);
            }
        }

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].label, Label::Control(ControlCommand::Clear));
        assert_eq!(events[0].stream, StreamKind::Controls);
        assert_eq!(events[0].frame, window - 1);
    }

    /// Both open palms confirm a Space.
    #[test]
    fn both_open_palms_confirm_space() {
        let mut p = pipeline(PipelineMode::Letters);

        let mut events = Vec::new();
        for _ in 0..20 {
            let frame =
                fixtures::frame_two(fixtures::open_palm(), 0.95, fixtures::open_palm(), 0.95);
            if let Some(ev) = p.process(frame) {
                events.push(ev);
            }
        }

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].label, Label::Control(ControlCommand::Space));
    }

    /// A perfect "A" pose below the detection floor never reaches any
    /// classifier: no event, ever.
    #[test]
    fn low_confidence_hand_yields_nothing() {
        let mut p = pipeline(PipelineMode::Letters);

        for _ in 0..40 {
            let frame = fixtures::frame_one(HandSide::Left, fixtures::fist_a(), 0.2);
            assert_eq!(p.process(frame), None);
        }
    }

    /// A word pose wins over its letter reading: a raised thumb over a fist
    /// says "HOLA", never the letter the fist would spell.
    #[test]
    fn word_preempts_letter_interpretation() {
        let mut p = pipeline(PipelineMode::Letters);

        let mut events = Vec::new();
        for _ in 0..40 {
            let frame = fixtures::frame_one(HandSide::Right, fixtures::thumbs_up(), 0.95);
            if let Some(ev) = p.process(frame) {
                events.push(ev);
            }
        }

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].label, Label::Word("HOLA".into()));
        assert_eq!(events[0].stream, StreamKind::Words);
    }

    /// Left "M" + right "A" held through the syllable window round-trips to
    /// a confirmed "MA".
    #[test]
    fn syllable_ma_round_trip() {
        let mut p = pipeline(PipelineMode::Syllables);
        let window = AppConfig::default().syllables.stability.window as u64;

        let mut events = Vec::new();
        for i in 0..window * 3 {
            let frame = fixtures::frame_two(fixtures::thumb_m(), 0.95, fixtures::fist_a(), 0.95);
            if let Some(ev) = p.process(frame) {
                events.push((i, ev));
            }
        }

        assert_eq!(events.len(), 1);
        let (at, ev) = &events[0];
        assert_eq!(*at, window - 1);
        assert_eq!(ev.label, Label::Syllable("MA".into()));
        assert_eq!(ev.stream, StreamKind::Syllables);
    }

    /// In syllables mode a single letter hand produces nothing — the letter
    /// stream is inactive and the combiner needs both hands.
    #[test]
    fn syllables_mode_ignores_single_letter_hand() {
        let mut p = pipeline(PipelineMode::Syllables);

        for _ in 0..30 {
            let frame = fixtures::frame_one(HandSide::Right, fixtures::fist_a(), 0.95);
            assert_eq!(p.process(frame), None);
        }
    }

    /// Switching modes resets the in-flight accumulation: frames signed
    /// before the switch never count toward a post-switch confirmation.
    #[test]
    fn mode_switch_resets_accumulation() {
        let mut p = pipeline(PipelineMode::Letters);
        let window = letters_window() as u64;

        // Accumulate just short of a letter confirmation.
        for _ in 0..window - 1 {
            let frame = fixtures::frame_one(HandSide::Left, fixtures::fist_a(), 0.95);
            assert_eq!(p.process(frame), None);
        }

        p.set_mode(PipelineMode::Syllables);
        p.set_mode(PipelineMode::Letters);

        // One more A-frame must not confirm — the window restarted.
        let frame = fixtures::frame_one(HandSide::Left, fixtures::fist_a(), 0.95);
        assert_eq!(p.process(frame), None);

        // A full fresh window does confirm.
        let mut events = Vec::new();
        for _ in 0..window {
            let frame = fixtures::frame_one(HandSide::Left, fixtures::fist_a(), 0.95);
            if let Some(ev) = p.process(frame) {
                events.push(ev);
            }
        }
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].label, Label::Letter('A'));
    }

    /// Empty frames are processed without events or errors.
    #[test]
    fn empty_frames_are_quiet() {
        let mut p = pipeline(PipelineMode::Letters);
        for _ in 0..10 {
            assert_eq!(p.process(MultiHandFrame::empty()), None);
        }
        assert_eq!(p.frames_processed(), 10);
    }

    /// Holding the pose after a confirmation stays quiet until a different
    /// symbol intervenes (end-to-end repeat guard).
    #[test]
    fn held_pose_does_not_refire() {
        let mut p = pipeline(PipelineMode::Letters);

        let mut count = 0;
        for _ in 0..200 {
            let frame = fixtures::frame_one(HandSide::Left, fixtures::fist_a(), 0.95);
            if p.process(frame).is_some() {
                count += 1;
            }
        }
        assert_eq!(count, 1, "a held pose fires exactly once");
    }
}
