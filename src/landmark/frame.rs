//! Frame-level data model: landmarks, hands, and the per-tick frame.
//!
//! The external pose engine delivers, once per camera tick, up to two hands
//! as 21 normalized 3-D points each plus a detector confidence.  This module
//! defines the validated, fixed-shape types the pipeline consumes:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Landmark`] | one normalized 3-D point (`x`,`y` in image space, `z` relative depth) |
//! | [`LandmarkSet`] | exactly [`LANDMARK_COUNT`] ordered landmarks for one hand |
//! | [`HandSide`] | left / right label, assigned per frame |
//! | [`MultiHandFrame`] | zero, one or two `(side → hand)` entries for one tick |
//! | [`RawFrame`] | unvalidated wire-format frame; malformed hands are dropped |
//!
//! A hand arriving with fewer than 21 landmarks is not an error — it is
//! treated as absent for that frame ([`RawFrame::into_frame`]).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of landmarks per hand (MediaPipe hand topology).
pub const LANDMARK_COUNT: usize = 21;

/// Number of scalars in a flattened landmark set (`21 × 3`).
pub const FLAT_LEN: usize = LANDMARK_COUNT * 3;

// ---------------------------------------------------------------------------
// Landmark indices
// ---------------------------------------------------------------------------

/// Named indices into a [`LandmarkSet`], following the MediaPipe layout:
/// wrist at 0, then four joints per finger from base to tip.
pub mod points {
    pub const WRIST: usize = 0;

    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;

    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;

    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;

    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;

    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;

    /// Fingertip indices, thumb first.
    pub const TIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

    /// Finger base indices paired with [`TIPS`] for length sanity checks.
    pub const BASES: [usize; 5] = [THUMB_MCP, INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];
}

// ---------------------------------------------------------------------------
// FrameError
// ---------------------------------------------------------------------------

/// Reason a raw hand observation could not be converted into a [`LandmarkSet`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FrameError {
    /// The flattened coordinate slice does not hold 21 × 3 scalars.
    #[error("expected {FLAT_LEN} coordinates (21 landmarks × 3), got {0}")]
    WrongLength(usize),

    /// A coordinate was not a finite number.
    #[error("non-finite coordinate at index {0}")]
    NonFinite(usize),
}

// ---------------------------------------------------------------------------
// Landmark
// ---------------------------------------------------------------------------

/// One normalized 3-D hand key point.
///
/// `x` and `y` are in normalized image space (`[0, 1]` when inside the
/// frame, `y` growing downward); `z` is relative depth with the wrist as
/// reference.  Points may fall outside `[0, 1]` when the hand leaves the
/// image — the quality filter penalises that rather than rejecting it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other` in normalized space.
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Whether `x` and `y` lie inside the normalized image bounds.
    pub fn in_bounds(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

// ---------------------------------------------------------------------------
// LandmarkSet
// ---------------------------------------------------------------------------

/// Exactly 21 ordered landmarks describing one hand in one frame.
///
/// Immutable once captured; owned by the frame that produced it.  Use the
/// [`points`] constants to address individual joints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSet {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from a flattened `[x0, y0, z0, x1, y1, z1, …]` slice.
    ///
    /// Returns an error when the slice is not exactly 63 scalars long or
    /// contains non-finite values; callers treat that hand as absent.
    pub fn from_flat(coords: &[f32]) -> Result<Self, FrameError> {
        if coords.len() != FLAT_LEN {
            return Err(FrameError::WrongLength(coords.len()));
        }
        if let Some(i) = coords.iter().position(|c| !c.is_finite()) {
            return Err(FrameError::NonFinite(i));
        }

        let mut points = [Landmark::default(); LANDMARK_COUNT];
        for (i, chunk) in coords.chunks_exact(3).enumerate() {
            points[i] = Landmark::new(chunk[0], chunk[1], chunk[2]);
        }
        Ok(Self { points })
    }

    /// Landmark at `index` (see [`points`]).
    ///
    /// # Panics
    ///
    /// Panics when `index >= LANDMARK_COUNT`; all internal callers use the
    /// named constants, which are in range by construction.
    pub fn point(&self, index: usize) -> Landmark {
        self.points[index]
    }

    /// All 21 landmarks in order.
    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.points.iter()
    }

    /// Number of landmarks with `x`/`y` outside the normalized image bounds.
    pub fn out_of_bounds_count(&self) -> usize {
        self.points.iter().filter(|p| !p.in_bounds()).count()
    }
}

// ---------------------------------------------------------------------------
// HandSide
// ---------------------------------------------------------------------------

/// Left / right label assigned per detected hand per frame.
///
/// No persistent hand identity is guaranteed across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    /// Lower-case label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            HandSide::Left => "left",
            HandSide::Right => "right",
        }
    }
}

// ---------------------------------------------------------------------------
// MultiHandFrame
// ---------------------------------------------------------------------------

/// One observed hand: landmarks plus the detector's confidence for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandObservation {
    pub landmarks: LandmarkSet,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f32,
}

/// A frame-scoped value holding zero, one or two hands for one camera tick.
///
/// Produced once per tick by the external pose engine; consumed exactly once
/// by [`crate::pipeline::Pipeline::process`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiHandFrame {
    pub left: Option<HandObservation>,
    pub right: Option<HandObservation>,
}

impl MultiHandFrame {
    /// A frame with no hands.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder-style insertion of one hand.
    pub fn with_hand(mut self, side: HandSide, landmarks: LandmarkSet, confidence: f32) -> Self {
        let obs = HandObservation {
            landmarks,
            confidence,
        };
        match side {
            HandSide::Left => self.left = Some(obs),
            HandSide::Right => self.right = Some(obs),
        }
        self
    }

    /// The observation for `side`, if the hand was detected this frame.
    pub fn hand(&self, side: HandSide) -> Option<&HandObservation> {
        match side {
            HandSide::Left => self.left.as_ref(),
            HandSide::Right => self.right.as_ref(),
        }
    }

    /// `true` when no hand was detected this tick.
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

// ---------------------------------------------------------------------------
// RawFrame (wire format)
// ---------------------------------------------------------------------------

/// One unvalidated hand as it arrives on the wire: a flattened coordinate
/// list plus confidence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHand {
    /// Flattened `[x, y, z] × 21` coordinates.
    pub coords: Vec<f32>,
    /// Detector confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: f32,
}

/// Unvalidated frame as produced by the pose-engine collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFrame {
    #[serde(default)]
    pub left: Option<RawHand>,
    #[serde(default)]
    pub right: Option<RawHand>,
}

impl RawFrame {
    /// Validate into a [`MultiHandFrame`].
    ///
    /// A hand whose coordinate list is malformed is logged and treated as
    /// absent for this frame — never a fatal error.
    pub fn into_frame(self) -> MultiHandFrame {
        let mut frame = MultiHandFrame::empty();
        for (side, raw) in [(HandSide::Left, self.left), (HandSide::Right, self.right)] {
            let Some(raw) = raw else { continue };
            match LandmarkSet::from_flat(&raw.coords) {
                Ok(landmarks) => {
                    frame = frame.with_hand(side, landmarks, raw.confidence.clamp(0.0, 1.0));
                }
                Err(e) => {
                    log::warn!("dropping malformed {} hand: {e}", side.label());
                }
            }
        }
        frame
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
