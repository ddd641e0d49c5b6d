//! Landmark intake — frame model → feature extraction → quality filtering.
//!
//! # Pipeline position
//!
//! ```text
//! pose engine → RawFrame → MultiHandFrame → QualityFilter → FeatureExtractor
//!                                (validate)    (gate+smooth)   (FeatureRecord)
//! ```
//!
//! The modules here are the only part of the system that touches raw
//! geometry; everything downstream works on [`FeatureRecord`]s.

pub mod features;
pub mod frame;
pub mod quality;

pub use features::{FeatureConfig, FeatureExtractor, FeatureRecord};
pub use frame::{
    points, FrameError, HandObservation, HandSide, Landmark, LandmarkSet, MultiHandFrame,
    RawFrame, RawHand, FLAT_LEN, LANDMARK_COUNT,
};
pub use quality::{FilteredFrame, FilteredHand, QualityFilter, QualityTuning};

// ---------------------------------------------------------------------------
// Shared test fixtures
// ---------------------------------------------------------------------------

/// Synthetic hand poses used across the classifier and pipeline tests.
///
/// Geometry conventions: the wrist sits at `(0.50, 0.80)`, finger MCP rows
/// at `y = 0.60`, `y` grows downward and `z` is zero throughout.  Each pose
/// keeps every fingertip-to-base length inside the anatomical sanity range
/// so the quality filter scores it cleanly at full confidence.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::frame::{points, HandSide, Landmark, LandmarkSet, MultiHandFrame, LANDMARK_COUNT};

    fn lm(x: f32, y: f32) -> Landmark {
        Landmark::new(x, y, 0.0)
    }

    /// Replace a single point of a set (for targeted perturbations).
    pub fn with_point(set: LandmarkSet, index: usize, p: Landmark) -> LandmarkSet {
        let mut pts = [Landmark::default(); LANDMARK_COUNT];
        for (i, slot) in pts.iter_mut().enumerate() {
            *slot = if i == index { p } else { set.point(i) };
        }
        LandmarkSet::new(pts)
    }

    // Finger shapes, written into the four slots base→tip of one finger.

    fn set_chain(pts: &mut [Landmark; LANDMARK_COUNT], base: usize, chain: [Landmark; 4]) {
        pts[base] = chain[0];
        pts[base + 1] = chain[1];
        pts[base + 2] = chain[2];
        pts[base + 3] = chain[3];
    }

    /// Straight, fully extended finger in column `x`.
    fn extended(pts: &mut [Landmark; LANDMARK_COUNT], base: usize, x: f32) {
        set_chain(pts, base, [lm(x, 0.60), lm(x, 0.50), lm(x, 0.43), lm(x, 0.36)]);
    }

    /// Fully curled finger (tip folded back toward the palm).
    fn curled(pts: &mut [Landmark; LANDMARK_COUNT], base: usize, x: f32) {
        set_chain(pts, base, [lm(x, 0.60), lm(x, 0.52), lm(x, 0.56), lm(x, 0.54)]);
    }

    /// Half-curled "claw" finger: bent ~104° at the PIP, tip hanging level
    /// with the joint so the extension flag stays off.
    fn claw(pts: &mut [Landmark; LANDMARK_COUNT], base: usize, x: f32) {
        set_chain(
            pts,
            base,
            [lm(x, 0.60), lm(x, 0.50), lm(x + 0.05, 0.47), lm(x + 0.08, 0.48)],
        );
    }

    fn thumb(pts: &mut [Landmark; LANDMARK_COUNT], chain: [Landmark; 4]) {
        set_chain(pts, points::THUMB_CMC, chain);
    }

    /// Thumb resting beside the curled fingers (letter-A position).
    fn thumb_beside(pts: &mut [Landmark; LANDMARK_COUNT]) {
        thumb(pts, [lm(0.42, 0.72), lm(0.40, 0.66), lm(0.40, 0.62), lm(0.41, 0.58)]);
    }

    /// Thumb hanging low and neutral (no up/extended flags).
    fn thumb_neutral(pts: &mut [Landmark; LANDMARK_COUNT]) {
        thumb(pts, [lm(0.42, 0.72), lm(0.40, 0.66), lm(0.40, 0.62), lm(0.41, 0.60)]);
    }

    fn base_hand() -> [Landmark; LANDMARK_COUNT] {
        let mut pts = [Landmark::default(); LANDMARK_COUNT];
        pts[points::WRIST] = lm(0.50, 0.80);
        pts
    }

    /// Standard finger columns: index 0.44, middle 0.50, ring 0.56, pinky 0.62.
    const COLS: [(usize, f32); 4] = [
        (points::INDEX_MCP, 0.44),
        (points::MIDDLE_MCP, 0.50),
        (points::RING_MCP, 0.56),
        (points::PINKY_MCP, 0.62),
    ];

    fn all_curled(pts: &mut [Landmark; LANDMARK_COUNT]) {
        for (base, x) in COLS {
            curled(pts, base, x);
        }
    }

    // ---- Letter poses ------------------------------------------------------

    /// Closed fist, thumb beside the fingers — letter **A**.
    pub fn fist_a() -> LandmarkSet {
        let mut pts = base_hand();
        all_curled(&mut pts);
        thumb_beside(&mut pts);
        LandmarkSet::new(pts)
    }

    /// Closed fist, thumb crossed over the fingers — letter **S**.
    pub fn fist_s() -> LandmarkSet {
        let mut pts = base_hand();
        all_curled(&mut pts);
        thumb(&mut pts, [lm(0.48, 0.68), lm(0.54, 0.62), lm(0.60, 0.54), lm(0.62, 0.51)]);
        LandmarkSet::new(pts)
    }

    /// Four fingers extended and together, thumb folded — letter **B**.
    pub fn flat_b() -> LandmarkSet {
        let mut pts = base_hand();
        extended(&mut pts, points::INDEX_MCP, 0.47);
        extended(&mut pts, points::MIDDLE_MCP, 0.50);
        extended(&mut pts, points::RING_MCP, 0.53);
        extended(&mut pts, points::PINKY_MCP, 0.56);
        thumb(&mut pts, [lm(0.44, 0.70), lm(0.45, 0.66), lm(0.46, 0.62), lm(0.46, 0.60)]);
        LandmarkSet::new(pts)
    }

    /// Curved half-open hand — letter **C**.
    pub fn curved_c() -> LandmarkSet {
        let mut pts = base_hand();
        extended(&mut pts, points::INDEX_MCP, 0.44);
        extended(&mut pts, points::MIDDLE_MCP, 0.50);
        curled(&mut pts, points::RING_MCP, 0.56);
        curled(&mut pts, points::PINKY_MCP, 0.62);
        thumb(&mut pts, [lm(0.44, 0.68), lm(0.42, 0.62), lm(0.40, 0.56), lm(0.38, 0.50)]);
        LandmarkSet::new(pts)
    }

    /// Index extended, thumb touching the middle fingertip — letter **D**.
    pub fn point_d() -> LandmarkSet {
        let mut pts = base_hand();
        extended(&mut pts, points::INDEX_MCP, 0.44);
        curled(&mut pts, points::MIDDLE_MCP, 0.50);
        curled(&mut pts, points::RING_MCP, 0.56);
        curled(&mut pts, points::PINKY_MCP, 0.62);
        thumb(&mut pts, [lm(0.46, 0.70), lm(0.47, 0.64), lm(0.48, 0.58), lm(0.49, 0.55)]);
        LandmarkSet::new(pts)
    }

    /// All four fingers half-curled into a claw, thumb out — letter **E**.
    pub fn claw_e() -> LandmarkSet {
        let mut pts = base_hand();
        for (base, x) in COLS {
            claw(&mut pts, base, x);
        }
        thumb(&mut pts, [lm(0.42, 0.68), lm(0.44, 0.66), lm(0.46, 0.64), lm(0.52, 0.62)]);
        LandmarkSet::new(pts)
    }

    /// Index and thumb both extended wide apart — letter **G**.
    pub fn pistol_g() -> LandmarkSet {
        let mut pts = base_hand();
        extended(&mut pts, points::INDEX_MCP, 0.44);
        curled(&mut pts, points::MIDDLE_MCP, 0.50);
        curled(&mut pts, points::RING_MCP, 0.56);
        curled(&mut pts, points::PINKY_MCP, 0.62);
        thumb(&mut pts, [lm(0.44, 0.72), lm(0.40, 0.68), lm(0.34, 0.62), lm(0.28, 0.60)]);
        LandmarkSet::new(pts)
    }

    /// Index and middle extended close together — letter **H**.
    pub fn together_h() -> LandmarkSet {
        let mut pts = base_hand();
        extended(&mut pts, points::INDEX_MCP, 0.44);
        extended(&mut pts, points::MIDDLE_MCP, 0.48);
        curled(&mut pts, points::RING_MCP, 0.56);
        curled(&mut pts, points::PINKY_MCP, 0.62);
        thumb(&mut pts, [lm(0.44, 0.70), lm(0.43, 0.62), lm(0.43, 0.52), lm(0.43, 0.45)]);
        LandmarkSet::new(pts)
    }

    /// Only the pinky extended, thumb tucked — letter **I**.
    pub fn pinky_i() -> LandmarkSet {
        let mut pts = base_hand();
        curled(&mut pts, points::INDEX_MCP, 0.44);
        curled(&mut pts, points::MIDDLE_MCP, 0.50);
        curled(&mut pts, points::RING_MCP, 0.56);
        extended(&mut pts, points::PINKY_MCP, 0.62);
        thumb_neutral(&mut pts);
        LandmarkSet::new(pts)
    }

    /// Fist with the thumb laid across the palm — letter **M** (and the
    /// syllable consonant M on the left hand).
    pub fn thumb_m() -> LandmarkSet {
        let mut pts = base_hand();
        all_curled(&mut pts);
        thumb(&mut pts, [lm(0.44, 0.70), lm(0.48, 0.66), lm(0.52, 0.62), lm(0.61, 0.58)]);
        LandmarkSet::new(pts)
    }

    /// Index and middle extended in a wide V, thumb tucked high — letter **V**.
    pub fn victory_v() -> LandmarkSet {
        let mut pts = base_hand();
        extended(&mut pts, points::INDEX_MCP, 0.42);
        extended(&mut pts, points::MIDDLE_MCP, 0.52);
        curled(&mut pts, points::RING_MCP, 0.56);
        curled(&mut pts, points::PINKY_MCP, 0.62);
        thumb(&mut pts, [lm(0.44, 0.70), lm(0.43, 0.62), lm(0.42, 0.52), lm(0.41, 0.44)]);
        LandmarkSet::new(pts)
    }

    /// Index, middle and ring extended — letter **W**.
    pub fn three_w() -> LandmarkSet {
        let mut pts = base_hand();
        extended(&mut pts, points::INDEX_MCP, 0.44);
        extended(&mut pts, points::MIDDLE_MCP, 0.50);
        extended(&mut pts, points::RING_MCP, 0.56);
        curled(&mut pts, points::PINKY_MCP, 0.62);
        thumb(&mut pts, [lm(0.44, 0.70), lm(0.43, 0.62), lm(0.43, 0.52), lm(0.43, 0.45)]);
        LandmarkSet::new(pts)
    }

    /// Hooked index held just past the extension gap — letter **X**.
    pub fn hook_x() -> LandmarkSet {
        let mut pts = base_hand();
        set_chain(
            &mut pts,
            points::INDEX_MCP,
            [lm(0.44, 0.60), lm(0.44, 0.50), lm(0.49, 0.47), lm(0.53, 0.45)],
        );
        curled(&mut pts, points::MIDDLE_MCP, 0.50);
        curled(&mut pts, points::RING_MCP, 0.56);
        curled(&mut pts, points::PINKY_MCP, 0.62);
        thumb_beside(&mut pts);
        LandmarkSet::new(pts)
    }

    /// Fully open hand, fingers spread — finger-count fallback (`'5'`) and
    /// one half of the Space control.
    pub fn open_palm() -> LandmarkSet {
        let mut pts = base_hand();
        for (base, x) in COLS {
            extended(&mut pts, base, x);
        }
        thumb(&mut pts, [lm(0.40, 0.74), lm(0.36, 0.68), lm(0.32, 0.64), lm(0.27, 0.60)]);
        LandmarkSet::new(pts)
    }

    /// Four spread fingers, thumb folded — reaches the count fallback (`'B'`).
    pub fn spread_four() -> LandmarkSet {
        let mut pts = base_hand();
        for (base, x) in COLS {
            extended(&mut pts, base, x);
        }
        thumb(&mut pts, [lm(0.46, 0.70), lm(0.46, 0.68), lm(0.455, 0.64), lm(0.45, 0.62)]);
        LandmarkSet::new(pts)
    }

    // ---- Word poses --------------------------------------------------------

    /// Thumb raised high over a fist — word gesture THUMBS_UP ("HOLA").
    pub fn thumbs_up() -> LandmarkSet {
        let mut pts = base_hand();
        all_curled(&mut pts);
        thumb(&mut pts, [lm(0.44, 0.70), lm(0.42, 0.62), lm(0.42, 0.54), lm(0.42, 0.44)]);
        LandmarkSet::new(pts)
    }

    /// Thumb-index circle, remaining fingers up — word gesture OK_SIGN
    /// ("GRACIAS").
    pub fn ok_sign() -> LandmarkSet {
        let mut pts = base_hand();
        set_chain(
            &mut pts,
            points::INDEX_MCP,
            [lm(0.44, 0.60), lm(0.44, 0.50), lm(0.42, 0.48), lm(0.40, 0.47)],
        );
        extended(&mut pts, points::MIDDLE_MCP, 0.50);
        extended(&mut pts, points::RING_MCP, 0.56);
        extended(&mut pts, points::PINKY_MCP, 0.62);
        thumb(&mut pts, [lm(0.42, 0.70), lm(0.41, 0.64), lm(0.40, 0.55), lm(0.39, 0.46)]);
        LandmarkSet::new(pts)
    }

    /// Straight raised index, thumb clear of the other fingers — word
    /// gesture POINTING_UP ("NECESITO").
    pub fn pointing_up() -> LandmarkSet {
        let mut pts = base_hand();
        extended(&mut pts, points::INDEX_MCP, 0.44);
        curled(&mut pts, points::MIDDLE_MCP, 0.50);
        curled(&mut pts, points::RING_MCP, 0.56);
        curled(&mut pts, points::PINKY_MCP, 0.62);
        thumb(&mut pts, [lm(0.45, 0.70), lm(0.43, 0.67), lm(0.41, 0.63), lm(0.40, 0.60)]);
        LandmarkSet::new(pts)
    }

    // ---- Control poses -----------------------------------------------------

    /// Thumb and index tips pinched together, other fingers curled — the
    /// Delete control shape.
    pub fn pinch() -> LandmarkSet {
        let mut pts = base_hand();
        set_chain(
            &mut pts,
            points::INDEX_MCP,
            [lm(0.44, 0.60), lm(0.44, 0.50), lm(0.41, 0.48), lm(0.38, 0.46)],
        );
        curled(&mut pts, points::MIDDLE_MCP, 0.50);
        curled(&mut pts, points::RING_MCP, 0.56);
        curled(&mut pts, points::PINKY_MCP, 0.62);
        thumb(&mut pts, [lm(0.42, 0.72), lm(0.41, 0.65), lm(0.40, 0.55), lm(0.39, 0.47)]);
        LandmarkSet::new(pts)
    }

    // ---- Frame helpers -----------------------------------------------------

    pub fn frame_one(side: HandSide, set: LandmarkSet, confidence: f32) -> MultiHandFrame {
        MultiHandFrame::empty().with_hand(side, set, confidence)
    }

    pub fn frame_two(
        left: LandmarkSet,
        left_confidence: f32,
        right: LandmarkSet,
        right_confidence: f32,
    ) -> MultiHandFrame {
        MultiHandFrame::empty()
            .with_hand(HandSide::Left, left, left_confidence)
            .with_hand(HandSide::Right, right, right_confidence)
    }
}
