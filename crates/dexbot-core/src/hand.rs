//! Detected hand and gripper types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown hand type '{0}', expected one of: UNKNOWN, HandF5D6_V1, HandF5D6_V2, DexGripper")]
pub struct ParseHandTypeError(pub String);

/// Hand type as reported by the robot's hand detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandType {
    #[serde(rename = "UNKNOWN")]
    Unknown,
    #[serde(rename = "HandF5D6_V1")]
    HandF5d6V1,
    /// V2 adds touch sensors
    #[serde(rename = "HandF5D6_V2")]
    HandF5d6V2,
    /// Single or double gripper
    #[serde(rename = "DexGripper")]
    DexGripper,
}

impl HandType {
    pub const ALL: [HandType; 4] = [
        HandType::Unknown,
        HandType::HandF5d6V1,
        HandType::HandF5d6V2,
        HandType::DexGripper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HandType::Unknown => "UNKNOWN",
            HandType::HandF5d6V1 => "HandF5D6_V1",
            HandType::HandF5d6V2 => "HandF5D6_V2",
            HandType::DexGripper => "DexGripper",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, HandType::Unknown)
    }
}

impl fmt::Display for HandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandType {
    type Err = ParseHandTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseHandTypeError(s.to_string()))
    }
}
