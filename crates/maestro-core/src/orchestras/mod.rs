//! Orchestra implementations.
//!
//! The four worker stubs: search, build, validate, optimize. Each implements
//! the [`Orchestra`](crate::Orchestra) trait with a canned execution body.

pub mod build;
pub mod optimize;
pub mod search;
pub mod validate;

pub use build::BuildOrchestra;
pub use optimize::OptimizeOrchestra;
pub use search::SearchOrchestra;
pub use validate::ValidateOrchestra;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of orchestra types.
///
/// The kind partitions the solution keys: each kind contributes its result
/// under its own fixed key, so aggregation never resolves conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrchestraKind {
    /// Finds existing reusable blocks.
    Search,
    /// Generates canned code components.
    Build,
    /// Produces a fixed quality report.
    Validate,
    /// Produces a fixed performance report.
    Optimize,
}

impl OrchestraKind {
    /// All kinds in their canonical pipeline order.
    pub const ALL: [OrchestraKind; 4] = [
        OrchestraKind::Search,
        OrchestraKind::Build,
        OrchestraKind::Validate,
        OrchestraKind::Optimize,
    ];

    /// Stage-name string for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OrchestraKind::Search => "search",
            OrchestraKind::Build => "build",
            OrchestraKind::Validate => "validate",
            OrchestraKind::Optimize => "optimize",
        }
    }
}

impl fmt::Display for OrchestraKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
