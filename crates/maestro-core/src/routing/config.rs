//! Declarative routing rule table.
//!
//! All the routing constants the system depends on live here as data rather
//! than control flow: per-kind keyword lists, the asymmetric confidence
//! bonuses, the handled threshold, the candidate cap, and the trigger-phrase
//! fixed plans. The defaults preserve the observable behavior of the demo
//! system; a TOML file can override any of them.

use super::Probe;
use crate::orchestras::OrchestraKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Capability rule for one orchestra kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityRule {
    /// The orchestra kind this rule applies to.
    pub kind: OrchestraKind,
    /// Keywords matched as substrings of the lower-cased description.
    pub keywords: Vec<String>,
    /// Kind-specific confidence bonus added on top of the raw hit ratio.
    pub bonus: f64,
}

/// A trigger phrase that short-circuits plan construction to a fixed pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerPlan {
    /// Literal substring matched case-insensitively against the description.
    pub phrase: String,
    /// The fixed stage sequence to use when the phrase is present.
    pub stages: Vec<OrchestraKind>,
}

/// Routing configuration: the full rule table for plan construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Minimum raw hit ratio for an orchestra to qualify.
    #[serde(default = "default_threshold")]
    pub handled_threshold: f64,

    /// Maximum number of stages in a confidence-ordered plan.
    #[serde(default = "default_max_stages")]
    pub max_stages: usize,

    /// Capability rules, probed in listed order.
    #[serde(default = "default_rules")]
    pub rules: Vec<CapabilityRule>,

    /// Trigger-phrase overrides, checked before confidence ordering.
    #[serde(default = "default_trigger_plans")]
    pub trigger_plans: Vec<TriggerPlan>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            handled_threshold: default_threshold(),
            max_stages: default_max_stages(),
            rules: default_rules(),
            trigger_plans: default_trigger_plans(),
        }
    }
}

fn default_threshold() -> f64 {
    0.2
}

fn default_max_stages() -> usize {
    3
}

fn default_rules() -> Vec<CapabilityRule> {
    // The bonus asymmetry is inherited from the demo system and preserved
    // here as visible configuration.
    vec![
        CapabilityRule {
            kind: OrchestraKind::Search,
            keywords: keywords(&["find", "search", "existing", "similar", "lookup"]),
            bonus: 0.5,
        },
        CapabilityRule {
            kind: OrchestraKind::Build,
            keywords: keywords(&["create", "build", "generate", "develop", "implement"]),
            bonus: 0.6,
        },
        CapabilityRule {
            kind: OrchestraKind::Validate,
            keywords: keywords(&["test", "check", "verify", "validate", "review"]),
            bonus: 0.4,
        },
        CapabilityRule {
            kind: OrchestraKind::Optimize,
            keywords: keywords(&["optimize", "improve", "enhance", "performance", "faster"]),
            bonus: 0.4,
        },
    ]
}

fn default_trigger_plans() -> Vec<TriggerPlan> {
    vec![TriggerPlan {
        phrase: "todo app".to_string(),
        stages: OrchestraKind::ALL.to_vec(),
    }]
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

impl RoutingConfig {
    /// Looks up the capability rule for a kind.
    #[must_use]
    pub fn rule(&self, kind: OrchestraKind) -> Option<&CapabilityRule> {
        self.rules.iter().find(|r| r.kind == kind)
    }

    /// Builds the capability profile handed to an orchestra at construction.
    ///
    /// Kinds without a rule get an empty profile that never qualifies.
    #[must_use]
    pub fn profile(&self, kind: OrchestraKind) -> CapabilityProfile {
        self.rule(kind).map_or_else(
            || CapabilityProfile {
                keywords: Vec::new(),
                bonus: 0.0,
                threshold: self.handled_threshold,
            },
            |rule| CapabilityProfile {
                keywords: rule.keywords.clone(),
                bonus: rule.bonus,
                threshold: self.handled_threshold,
            },
        )
    }

    /// Returns the fixed stage sequence for the first trigger phrase present
    /// in the description, if any.
    #[must_use]
    pub fn trigger_plan(&self, description: &str) -> Option<&[OrchestraKind]> {
        let lower = description.to_lowercase();
        self.trigger_plans
            .iter()
            .find(|t| lower.contains(&t.phrase.to_lowercase()))
            .map(|t| t.stages.as_slice())
    }

    /// Parses a routing configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Loads a routing configuration from a TOML file.
    pub fn load(path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// The probe inputs for one orchestra: its keyword list, bonus, and the
/// shared handled threshold.
#[derive(Debug, Clone)]
pub struct CapabilityProfile {
    /// Keywords matched as substrings.
    pub keywords: Vec<String>,
    /// Confidence bonus for this kind.
    pub bonus: f64,
    /// Minimum raw hit ratio to qualify.
    pub threshold: f64,
}

impl CapabilityProfile {
    /// Scores a description against this profile.
    ///
    /// Raw confidence is `hits / keyword_count`; the orchestra qualifies when
    /// the raw score reaches the threshold. Reported confidence is the raw
    /// score plus the kind bonus, capped at 1.0. No keyword hit at all means
    /// confidence 0 and never qualifies, regardless of the bonus.
    #[must_use]
    pub fn probe(&self, description: &str) -> Probe {
        if self.keywords.is_empty() {
            return Probe::declined();
        }

        let lower = description.to_lowercase();
        let hits = self.keywords.iter().filter(|kw| lower.contains(kw.as_str())).count();
        if hits == 0 {
            return Probe::declined();
        }

        #[allow(clippy::cast_precision_loss)]
        let raw = hits as f64 / self.keywords.len() as f64;
        Probe {
            can_handle: raw >= self.threshold,
            confidence: (raw + self.bonus).min(1.0),
        }
    }
}
