//! Error types for IPAM resolution

use thiserror::Error;

use crate::domain::{ScopeKind, ScopeRef};

/// Errors that can occur while building indexes or resolving queries
#[derive(Debug, Error)]
pub enum IpamError {
    /// A scope kind label that does not name any known topology kind
    #[error("Unknown scope kind: {0}")]
    UnknownScopeKind(String),

    /// A cluster scoped to a kind that cannot carry clusters
    #[error("Cluster {cluster} has invalid scope kind {kind}")]
    InvalidClusterScope { cluster: u32, kind: ScopeKind },

    /// A scope reference whose id is not present in the topology
    #[error("Unknown scope: {0}")]
    UnknownScope(ScopeRef),

    /// A parent or owner reference pointing at a missing record
    #[error("Dangling reference from {from} to {to}")]
    DanglingReference { from: String, to: ScopeRef },

    /// A self-referential tree whose parent chain loops back on itself
    #[error("Cycle in hierarchy at {0}")]
    CyclicHierarchy(ScopeRef),

    /// A non-topology record (device, VM, VLAN group) that does not exist
    #[error("Unknown {entity}: {id}")]
    UnknownEntity { entity: &'static str, id: u32 },

    /// Snapshot content error
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for IPAM operations
pub type IpamResult<T> = Result<T, IpamError>;

impl IpamError {
    /// Whether this error indicates corrupt or unsupported topology data
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            IpamError::UnknownScopeKind(_)
                | IpamError::InvalidClusterScope { .. }
                | IpamError::UnknownScope(_)
                | IpamError::DanglingReference { .. }
                | IpamError::CyclicHierarchy(_)
                | IpamError::UnknownEntity { .. }
        )
    }
}
