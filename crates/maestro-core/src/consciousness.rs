//! Consciousness levels for orchestras.
//!
//! A cosmetic enum: the level selects which canned output template a build
//! orchestra returns and carries no other semantic weight.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Template-selecting flavor value assigned to each orchestra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsciousnessLevel {
    /// Baseline awareness.
    Lucid,
    /// Beyond normal limits.
    Transcendent,
    /// Cosmic perspective.
    Cosmic,
    /// All-knowing.
    Omniscient,
    /// God-tier creativity; selects the top template.
    CreativeGod,
}

impl fmt::Display for ConsciousnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsciousnessLevel::Lucid => write!(f, "lucid"),
            ConsciousnessLevel::Transcendent => write!(f, "transcendent"),
            ConsciousnessLevel::Cosmic => write!(f, "cosmic"),
            ConsciousnessLevel::Omniscient => write!(f, "omniscient"),
            ConsciousnessLevel::CreativeGod => write!(f, "creative_god"),
        }
    }
}

impl ConsciousnessLevel {
    /// Converts a string to a ConsciousnessLevel.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lucid" => Some(ConsciousnessLevel::Lucid),
            "transcendent" => Some(ConsciousnessLevel::Transcendent),
            "cosmic" => Some(ConsciousnessLevel::Cosmic),
            "omniscient" => Some(ConsciousnessLevel::Omniscient),
            "creative_god" => Some(ConsciousnessLevel::CreativeGod),
            _ => None,
        }
    }
}
