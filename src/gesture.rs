//! Gesture classification from a single frame of hand landmarks.
//!
//! Three measurements drive every decision:
//! - thumb-index distance: thumb tip (4) to index knuckle (5), rescaled
//! - index curl: angle at landmark 6 between 5 and 8
//! - middle curl: angle at landmark 10 between 9 and 12
//!
//! Rules are tried top to bottom and the first match wins. Comparisons are
//! strict, so a measurement sitting exactly on a threshold matches nothing.

use crate::{
    constants::{BENT_ANGLE_MAX, PINCH_DISTANCE, STRAIGHT_ANGLE_MIN},
    geometry::{angle, distance},
    landmarks::{
        LandmarkSet, INDEX_FINGER_MCP, INDEX_FINGER_PIP, INDEX_FINGER_TIP, MIDDLE_FINGER_MCP,
        MIDDLE_FINGER_PIP, MIDDLE_FINGER_TIP, THUMB_TIP,
    },
};
use std::fmt;

/// Gesture recognised in one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Pointer follows the index fingertip
    Move,
    /// Left button click
    LeftClick,
    /// Right button click
    RightClick,
    /// Double click at the current pointer position
    DoubleClick,
    /// Full screen capture
    Screenshot,
    /// Nothing to do this frame
    None,
}

/// Text and BGR colour drawn on the camera view for a gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureLabel {
    pub text: &'static str,
    pub color: (f64, f64, f64),
}

impl Gesture {
    /// On-screen annotation, `None` for [`Gesture::None`]
    #[must_use]
    pub const fn label(self) -> Option<GestureLabel> {
        let (text, color) = match self {
            Self::Move => ("Move", (255.0, 255.0, 255.0)),
            Self::LeftClick => ("Left Click", (0.0, 255.0, 0.0)),
            Self::RightClick => ("Right Click", (0.0, 0.0, 255.0)),
            Self::DoubleClick => ("Double Click", (255.0, 0.0, 0.0)),
            Self::Screenshot => ("Screenshot Taken", (255.0, 255.0, 0.0)),
            Self::None => return None,
        };
        Some(GestureLabel { text, color })
    }

    /// Whether the gesture triggers an OS action
    #[must_use]
    pub const fn is_action(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Move => "move",
            Self::LeftClick => "left_click",
            Self::RightClick => "right_click",
            Self::DoubleClick => "double_click",
            Self::Screenshot => "screenshot",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// Measurements taken from one landmark set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureFeatures {
    pub thumb_index_dist: f64,
    pub index_angle: f64,
    pub middle_angle: f64,
}

impl GestureFeatures {
    /// Measure a landmark set, `None` if it is incomplete
    #[must_use]
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Option<Self> {
        if !landmarks.is_complete() {
            return None;
        }
        let point = |index| landmarks.get(index);

        let thumb_index_dist = distance(&[point(THUMB_TIP)?, point(INDEX_FINGER_MCP)?])?;
        let index_angle = angle(
            point(INDEX_FINGER_MCP)?,
            point(INDEX_FINGER_PIP)?,
            point(INDEX_FINGER_TIP)?,
        );
        let middle_angle = angle(
            point(MIDDLE_FINGER_MCP)?,
            point(MIDDLE_FINGER_PIP)?,
            point(MIDDLE_FINGER_TIP)?,
        );

        Some(Self {
            thumb_index_dist,
            index_angle,
            middle_angle,
        })
    }

    fn pinched(&self) -> bool {
        self.thumb_index_dist < PINCH_DISTANCE
    }

    fn spread(&self) -> bool {
        self.thumb_index_dist > PINCH_DISTANCE
    }

    fn index_bent(&self) -> bool {
        self.index_angle < BENT_ANGLE_MAX
    }

    fn index_straight(&self) -> bool {
        self.index_angle > STRAIGHT_ANGLE_MIN
    }

    fn middle_bent(&self) -> bool {
        self.middle_angle < BENT_ANGLE_MAX
    }

    fn middle_straight(&self) -> bool {
        self.middle_angle > STRAIGHT_ANGLE_MIN
    }
}

type Rule = (Gesture, fn(&GestureFeatures) -> bool);

/// Decision table in priority order
pub const RULES: [Rule; 5] = [
    (Gesture::Move, |f| f.pinched() && f.index_straight()),
    (Gesture::LeftClick, |f| {
        f.index_bent() && f.middle_straight() && f.spread()
    }),
    (Gesture::RightClick, |f| {
        f.index_straight() && f.middle_bent() && f.spread()
    }),
    (Gesture::DoubleClick, |f| {
        f.index_bent() && f.middle_bent() && f.spread()
    }),
    (Gesture::Screenshot, |f| {
        f.index_bent() && f.middle_bent() && f.pinched()
    }),
];

/// First gesture whose rule accepts the measurements
#[must_use]
pub fn classify_features(features: &GestureFeatures) -> Gesture {
    RULES
        .iter()
        .find(|(_, accepts)| accepts(features))
        .map_or(Gesture::None, |(gesture, _)| *gesture)
}

/// Classify one frame; incomplete landmark sets never produce a gesture
#[must_use]
pub fn classify(landmarks: &LandmarkSet) -> Gesture {
    GestureFeatures::from_landmarks(landmarks).map_or(Gesture::None, |features| classify_features(&features))
}
