//! Pose library categories

use serde::{Deserialize, Serialize};

/// Pose category shown in the pose library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pose {
    /// Standing poses
    Standing,
    /// Poses lying down
    LayingDown,
    /// Seated poses
    Sitting,
    /// Portrait close-ups
    CloseUp,
}

impl Pose {
    /// Every category, in display order
    pub const ALL: [Pose; 4] = [Pose::Standing, Pose::LayingDown, Pose::Sitting, Pose::CloseUp];

    /// Display title
    pub fn title(&self) -> &'static str {
        match self {
            Pose::Standing => "Standing",
            Pose::LayingDown => "Laying Down",
            Pose::Sitting => "Sitting",
            Pose::CloseUp => "Close-Up",
        }
    }

    /// Asset name of the cover photo
    pub fn cover_photo(&self) -> &'static str {
        match self {
            Pose::Standing => "full_length",
            Pose::LayingDown => "three_quarter",
            Pose::Sitting => "seated_pose",
            Pose::CloseUp => "close_up",
        }
    }

    /// Number of example photos in the category
    pub fn photo_count(&self) -> usize {
        match self {
            Pose::Sitting => 7,
            _ => 8,
        }
    }
}
