// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for self-service routes.
//!
//! Gates only establish who the caller is. Routes under `/me` that address
//! a specific record must additionally check that the caller owns it.

use crate::auth::Identity;

use super::{records::Post, StoreError, StoreResult};

/// Trait for records that belong to a top-level account.
pub trait OwnedResource {
    /// Name used in errors and logs.
    const ENTITY: &'static str;

    fn id(&self) -> i64;

    /// Id of the owning account.
    fn owner_id(&self) -> i64;
}

impl OwnedResource for Post {
    const ENTITY: &'static str = "Post";

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> i64 {
        self.account_id
    }
}

/// Trait for enforcing ownership on storage operations.
pub trait OwnershipEnforcer {
    /// Verify that the identity owns this resource.
    ///
    /// # Errors
    /// Returns `StoreError::PermissionDenied` if the identity doesn't own the resource.
    fn verify_ownership(&self, identity: &Identity) -> StoreResult<()>;
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn verify_ownership(&self, identity: &Identity) -> StoreResult<()> {
        // Organization accounts live in their own id space.
        if identity.role.is_top_level() && self.owner_id() == identity.subject_id {
            Ok(())
        } else {
            Err(StoreError::PermissionDenied {
                subject_id: identity.subject_id,
                entity: T::ENTITY,
                id: self.id(),
            })
        }
    }
}

/// Extension trait to chain an ownership check onto a lookup.
///
/// ```rust,ignore
/// let post = state.db.get_post(id).verify_owner(&identity)?;
/// ```
pub trait OwnershipCheck<T> {
    /// Verify ownership and return the resource if authorized.
    fn verify_owner(self, identity: &Identity) -> StoreResult<T>;
}

impl<T: OwnedResource> OwnershipCheck<T> for StoreResult<T> {
    fn verify_owner(self, identity: &Identity) -> StoreResult<T> {
        let resource = self?;
        resource.verify_ownership(identity)?;
        Ok(resource)
    }
}
