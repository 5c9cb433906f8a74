//! acl-inspector: permission-annotated views of hierarchical content trees.
//!
//! The crate walks a content tree supplied by a [`content::NodeStore`] and attaches,
//! per listed node, what each requested role may do according to a
//! [`policy::PolicyStore`]. Both stores are external; [`memory`] ships fixture-backed
//! implementations for the CLI and tests.

pub mod acl;
pub mod config;
pub mod content;
pub mod error;
pub mod memory;
pub mod policy;
pub mod service;
pub mod tree;

pub use acl::{AclEvaluator, AclMap, PermissionSummary, PrivilegeCheckResult, PrivilegeTargetMatch};
pub use config::{AclAnchor, EnvOverrides, InspectorConfig};
pub use content::{ContentNode, NodeStore, TypeFilter};
pub use error::{InspectorError, InspectorResult};
pub use policy::{PolicyStore, Privilege, PrivilegeKind, PrivilegeSubject, Role};
pub use service::{AclCheckerRequest, AclCheckerService};
pub use tree::{AnnotatedNodeRecord, TreeMaterializer};

// Test-only printing helper: expands to eprintln! during tests and debug builds.
// Usage in tests: tprintln!("debug: {}", value);
#[cfg(any(test, debug_assertions))]
#[macro_export]
macro_rules! tprintln {
    ($($arg:tt)*) => ( eprintln!($($arg)*) );
}

// In non-test builds, provide a no-op tprintln! so calls compile without effect.
#[cfg(not(any(test, debug_assertions)))]
#[macro_export]
macro_rules! tprintln {
    ($($arg:tt)*) => ({
        // Preserve formatting checks in release without producing code
        if false { let _ = format!($($arg)*); }
    });
}
