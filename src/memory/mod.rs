//! Fixture-backed node and policy stores for the CLI, tests and benches.
//! Hosts embed the inspector with their own `NodeStore`/`PolicyStore` instead.

pub mod fixture;
pub mod node_store;
pub mod policy_store;

pub use fixture::{Fixture, FixtureNode};
pub use node_store::{MemoryNode, MemoryNodeStore};
pub use policy_store::{Permission, StaticPolicyStore, StaticPrivilege, StaticRole};
