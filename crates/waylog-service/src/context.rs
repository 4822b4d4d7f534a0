//! Per-request caller context for owner-scoped operations.

use uuid::Uuid;

/// Identity of the authenticated owner making a management request.
///
/// Constructed by the API layer after JWT verification; guest redemption
/// has no context at all.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    /// The authenticated owner's profile id.
    pub owner_id: Uuid,
}
