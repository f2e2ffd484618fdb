//! User lookups required by the movement recorder.
//!
//! The recorder never queries users directly; callers hand it a
//! [`RoleDirectory`]. Production uses the PostgreSQL implementation in the db
//! crate; tests use an in-memory one.

use std::future::Future;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// A user as seen by the audit trail: an id and the name printed in audit text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRef {
    pub id: DbId,
    pub display_name: String,
}

/// Capability for resolving the responsible party of a movement.
///
/// "First" means lowest user id, so results are deterministic.
pub trait RoleDirectory: Send + Sync {
    /// Look up a user by id. `None` if the user no longer exists.
    fn find_user(
        &self,
        user_id: DbId,
    ) -> impl Future<Output = Result<Option<UserRef>, CoreError>> + Send;

    /// First user administratively linked to the given site.
    fn first_user_for_site(
        &self,
        site_id: DbId,
    ) -> impl Future<Output = Result<Option<UserRef>, CoreError>> + Send;

    /// First user holding the given role.
    fn first_user_with_role(
        &self,
        role: &str,
    ) -> impl Future<Output = Result<Option<UserRef>, CoreError>> + Send;
}
