//! Orchestra registry.
//!
//! Holds the orchestras created at system start. Backed by a Vec rather than
//! a map: registration order is the probe order, and the planner's stable
//! sort keeps that order for confidence ties.

use crate::orchestras::OrchestraKind;
use crate::Orchestra;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Registry of orchestras in registration order.
pub struct OrchestraRegistry {
    orchestras: RwLock<Vec<Arc<dyn Orchestra>>>,
}

impl fmt::Debug for OrchestraRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrchestraRegistry")
            .field("count", &self.orchestras.try_read().map(|o| o.len()).unwrap_or(0))
            .finish_non_exhaustive()
    }
}

impl OrchestraRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { orchestras: RwLock::new(Vec::new()) }
    }

    /// Registers an orchestra at the end of the probe order.
    ///
    /// Returns `true` if the orchestra was newly registered, `false` if it
    /// replaced an existing orchestra with the same name (order preserved).
    pub async fn register(&self, orchestra: Arc<dyn Orchestra>) -> bool {
        let name = orchestra.name().to_string();
        debug!(orchestra = %name, kind = %orchestra.kind(), "Registering orchestra");

        let mut orchestras = self.orchestras.write().await;
        if let Some(existing) = orchestras.iter_mut().find(|o| o.name() == name) {
            warn!(orchestra = %name, "Orchestra replaced in registry");
            *existing = orchestra;
            false
        } else {
            orchestras.push(orchestra);
            true
        }
    }

    /// Retrieves an orchestra by name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Orchestra>> {
        let orchestras = self.orchestras.read().await;
        orchestras.iter().find(|o| o.name() == name).cloned()
    }

    /// Retrieves the first orchestra of a kind.
    pub async fn by_kind(&self, kind: OrchestraKind) -> Option<Arc<dyn Orchestra>> {
        let orchestras = self.orchestras.read().await;
        orchestras.iter().find(|o| o.kind() == kind).cloned()
    }

    /// Returns all orchestras in registration order.
    pub async fn all(&self) -> Vec<Arc<dyn Orchestra>> {
        let orchestras = self.orchestras.read().await;
        orchestras.clone()
    }

    /// Returns the number of registered orchestras.
    pub async fn count(&self) -> usize {
        let orchestras = self.orchestras.read().await;
        orchestras.len()
    }
}

impl Default for OrchestraRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consciousness::ConsciousnessLevel;
    use crate::orchestras::{SearchOrchestra, ValidateOrchestra};
    use crate::routing::RoutingConfig;

    fn search(name: &str) -> Arc<dyn Orchestra> {
        Arc::new(SearchOrchestra::new(
            name.to_string(),
            ConsciousnessLevel::Cosmic,
            RoutingConfig::default().profile(OrchestraKind::Search),
        ))
    }

    #[tokio::test]
    async fn test_register_and_get() {
        let registry = OrchestraRegistry::new();
        assert!(registry.register(search("SearchMaster")).await);
        assert_eq!(registry.count().await, 1);

        let retrieved = registry.get("SearchMaster").await;
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().kind(), OrchestraKind::Search);
        assert!(registry.get("nonexistent").await.is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_replaces_in_place() {
        let registry = OrchestraRegistry::new();
        registry.register(search("SearchMaster")).await;
        let was_new = registry.register(search("SearchMaster")).await;
        assert!(!was_new);
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_registration_order_is_preserved() {
        let registry = OrchestraRegistry::new();
        registry.register(search("A")).await;
        registry
            .register(Arc::new(ValidateOrchestra::new(
                "B".to_string(),
                ConsciousnessLevel::Transcendent,
                RoutingConfig::default().profile(OrchestraKind::Validate),
            )))
            .await;
        registry.register(search("C")).await;

        let names: Vec<String> =
            registry.all().await.iter().map(|o| o.name().to_string()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_by_kind() {
        let registry = OrchestraRegistry::new();
        registry.register(search("SearchMaster")).await;
        assert!(registry.by_kind(OrchestraKind::Search).await.is_some());
        assert!(registry.by_kind(OrchestraKind::Build).await.is_none());
    }
}
