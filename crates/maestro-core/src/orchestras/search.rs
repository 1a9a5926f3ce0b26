//! Search orchestra: finds existing reusable blocks.
//!
//! The stub matches a small catalog of blocks against domain words in the
//! description and reports each match with a fixed relevance score.

use crate::consciousness::ConsciousnessLevel;
use crate::error::OrchestraError;
use crate::orchestras::OrchestraKind;
use crate::routing::CapabilityProfile;
use crate::task::{FoundBlock, SearchReport, StageOutput, Task};
use crate::Orchestra;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const SEARCH_LATENCY: Duration = Duration::from_millis(100);

const CAPABILITIES: &[&str] = &["find_existing_blocks", "search_patterns", "analyze_requirements"];

/// Orchestra that surfaces existing blocks by keyword match.
pub struct SearchOrchestra {
    name: String,
    consciousness_level: ConsciousnessLevel,
    profile: CapabilityProfile,
}

impl SearchOrchestra {
    /// Creates a new search orchestra.
    #[must_use]
    pub fn new(
        name: String,
        consciousness_level: ConsciousnessLevel,
        profile: CapabilityProfile,
    ) -> Self {
        Self { name, consciousness_level, profile }
    }
}

#[async_trait]
impl Orchestra for SearchOrchestra {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> OrchestraKind {
        OrchestraKind::Search
    }

    fn consciousness_level(&self) -> ConsciousnessLevel {
        self.consciousness_level
    }

    fn capabilities(&self) -> &'static [&'static str] {
        CAPABILITIES
    }

    fn capability_profile(&self) -> &CapabilityProfile {
        &self.profile
    }

    async fn execute(&self, task: &Task) -> Result<StageOutput, OrchestraError> {
        debug!(orchestra = %self.name, task_id = %task.id, "Search executing");

        // Simulated search time; no real lookup happens.
        tokio::time::sleep(SEARCH_LATENCY).await;

        let description = task.description.to_lowercase();
        let mut found_blocks = Vec::new();

        if description.contains("frontend") {
            found_blocks.push(FoundBlock {
                id: "react_component_block".to_string(),
                description: "React component template with TypeScript".to_string(),
                block_type: "component".to_string(),
                language: "typescript".to_string(),
                relevance_score: 0.9,
            });
        }

        if description.contains("backend") {
            found_blocks.push(FoundBlock {
                id: "fastapi_endpoint_block".to_string(),
                description: "FastAPI REST endpoint template".to_string(),
                block_type: "function".to_string(),
                language: "python".to_string(),
                relevance_score: 0.8,
            });
        }

        if description.contains("database") {
            found_blocks.push(FoundBlock {
                id: "sqlalchemy_model_block".to_string(),
                description: "SQLAlchemy model with CRUD operations".to_string(),
                block_type: "class".to_string(),
                language: "python".to_string(),
                relevance_score: 0.85,
            });
        }

        debug!(orchestra = %self.name, total_found = found_blocks.len(), "Search completed");

        Ok(StageOutput::Search(SearchReport {
            total_found: found_blocks.len(),
            found_blocks,
            search_strategy: "keyword_matching".to_string(),
            confidence: 0.8,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RoutingConfig;
    use crate::task::Requirements;

    fn orchestra() -> SearchOrchestra {
        SearchOrchestra::new(
            "SearchMaster".to_string(),
            ConsciousnessLevel::Cosmic,
            RoutingConfig::default().profile(OrchestraKind::Search),
        )
    }

    #[tokio::test]
    async fn test_search_matches_domain_words() {
        let task = Task::new(
            "todo app with React frontend, FastAPI backend, and PostgreSQL database".to_string(),
            Requirements::new(),
        );
        let output = orchestra().execute(&task).await.unwrap();
        match output {
            StageOutput::Search(report) => {
                assert_eq!(report.total_found, 3);
                assert_eq!(report.found_blocks[0].id, "react_component_block");
                assert_eq!(report.found_blocks[1].relevance_score, 0.8);
                assert_eq!(report.found_blocks[2].language, "python");
            }
            _ => panic!("Expected search output"),
        }
    }

    #[tokio::test]
    async fn test_search_without_domain_words_finds_nothing() {
        let task = Task::new("find something".to_string(), Requirements::new());
        let output = orchestra().execute(&task).await.unwrap();
        match output {
            StageOutput::Search(report) => {
                assert_eq!(report.total_found, 0);
                assert!(report.found_blocks.is_empty());
                assert_eq!(report.search_strategy, "keyword_matching");
            }
            _ => panic!("Expected search output"),
        }
    }

    #[test]
    fn test_search_probe_uses_profile() {
        let task = Task::new("find existing similar code".to_string(), Requirements::new());
        let probe = orchestra().probe(&task);
        assert!(probe.can_handle);
        assert!(probe.confidence > 0.5);
    }
}
