//! Shoot roles
//!
//! A plan is always made from the point of view of one participant. The role
//! decides which checklist a new plan starts with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::plans::TaskCategory;

/// Participant role in a shoot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person behind the camera
    Photographer,
    /// The person in front of the camera
    Model,
}

const PHOTOGRAPHER_TASKS: [&str; 8] = [
    "Charge the batteries",
    "Clear memory cards",
    "Prepare the camera and lenses",
    "Check tripod and lighting equipment",
    "Choose angles and plan shots",
    "Align concept with the model",
    "Gather pose references",
    "Bring spare batteries and cleaning supplies",
];

const MODEL_TASKS: [&str; 8] = [
    "Select outfit for the shoot",
    "Apply makeup and style hair",
    "Moisturize skin before the shoot",
    "Review pose references",
    "Bring makeup for touch-ups",
    "Prepare comfortable shoes",
    "Get enough sleep before the shoot",
    "Stay hydrated for a fresh look",
];

impl Role {
    /// Every role, in display order
    pub const ALL: [Role; 2] = [Role::Photographer, Role::Model];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Role::Photographer => "Photographer",
            Role::Model => "Model",
        }
    }

    /// Serialized identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Photographer => "photographer",
            Role::Model => "model",
        }
    }

    /// Checklist a new plan for this role starts with (all unchecked)
    pub fn default_tasks(&self) -> Vec<TaskCategory> {
        let names: &[&str] = match self {
            Role::Photographer => &PHOTOGRAPHER_TASKS,
            Role::Model => &MODEL_TASKS,
        };
        names.iter().map(|name| TaskCategory::new(*name)).collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "photographer" => Ok(Role::Photographer),
            "model" => Ok(Role::Model),
            other => Err(format!("unknown role: {other}")),
        }
    }
}
