//! MySky permissions.
//!
//! An app (the requestor) is granted read or write access to a path in one
//! of three data categories. A grant on a path also covers everything below
//! it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::sanitize_path;

/// Data category a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermCategory {
    /// Unencrypted files anyone can find from the user id and path.
    Discoverable,
    /// Encrypted files under the user's path seed.
    Hidden,
    /// Raw SkyDB entries written before MySky existed.
    LegacySkyDb,
}

/// Kind of access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermType {
    Read,
    Write,
}

/// A single permission: `requestor` may `perm_type` data under `path` in
/// `category`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// The app domain asking for access.
    pub requestor: String,

    /// The path the permission applies to. Always sanitized.
    pub path: String,

    pub category: PermCategory,

    pub perm_type: PermType,
}

impl Permission {
    /// Create a permission, sanitizing the requestor domain and path.
    pub fn new(
        requestor: &str,
        path: &str,
        category: PermCategory,
        perm_type: PermType,
    ) -> Result<Self> {
        Ok(Self {
            requestor: requestor.trim().to_lowercase(),
            path: sanitize_path(path)?,
            category,
            perm_type,
        })
    }

    /// Whether holding `self` allows the `requested` permission.
    pub fn covers(&self, requested: &Permission) -> bool {
        self.requestor == requested.requestor
            && self.category == requested.category
            && self.perm_type == requested.perm_type
            && (requested.path == self.path
                || requested
                    .path
                    .strip_prefix(self.path.as_str())
                    .is_some_and(|rest| rest.starts_with('/')))
    }
}

/// Result of a permission check: which requested permissions are held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckPermissionsResponse {
    pub granted_permissions: Vec<Permission>,
    pub failed_permissions: Vec<Permission>,
}

impl CheckPermissionsResponse {
    /// True when nothing failed.
    pub fn all_granted(&self) -> bool {
        self.failed_permissions.is_empty()
    }
}

/// The set of permissions a user has granted.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    grants: HashSet<Permission>,
}

impl PermissionSet {
    /// Create an empty permission set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a permission. Returns false if it was already held.
    pub fn grant(&mut self, permission: Permission) -> bool {
        self.grants.insert(permission)
    }

    /// Revoke a previously granted permission.
    pub fn revoke(&mut self, permission: &Permission) -> bool {
        self.grants.remove(permission)
    }

    /// Check if any grant covers the permission.
    pub fn has(&self, permission: &Permission) -> bool {
        self.grants.iter().any(|g| g.covers(permission))
    }

    /// Split `requested` into held and missing permissions.
    pub fn check(&self, requested: &[Permission]) -> CheckPermissionsResponse {
        let (granted_permissions, failed_permissions): (Vec<_>, Vec<_>) =
            requested.iter().cloned().partition(|p| self.has(p));
        CheckPermissionsResponse {
            granted_permissions,
            failed_permissions,
        }
    }

    /// Number of grants.
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self {
            grants: iter.into_iter().collect(),
        }
    }
}
