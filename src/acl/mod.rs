//! ACL evaluation for a (node, roles) pair: compact per-role summaries and the full
//! list of privilege targets that matched.

pub mod evaluator;
pub mod types;

pub use evaluator::AclEvaluator;
pub use types::{AclMap, PermissionSummary, PrivilegeCheckResult, PrivilegeTargetMatch};
