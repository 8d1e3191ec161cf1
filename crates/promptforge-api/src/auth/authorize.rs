//! Centralized organization-scoped authorization.
//!
//! Every org-scoped handler resolves the caller's membership and checks it
//! against a required role here, so the hierarchy comparison exists in
//! exactly one place.

use promptforge_core::models::{OrgRole, OrganizationMember};
use promptforge_core::AppError;
use promptforge_db::MembershipRepository;
use uuid::Uuid;

/// Check that a membership exists and carries at least the required role.
pub fn authorize(
    membership: Option<OrganizationMember>,
    required: OrgRole,
) -> Result<OrganizationMember, AppError> {
    let member = membership
        .ok_or_else(|| AppError::Forbidden("Not a member of this organization".to_string()))?;
    if !member.role.satisfies(required) {
        return Err(AppError::Forbidden(format!(
            "Requires {} role or higher",
            required
        )));
    }
    Ok(member)
}

/// Fetch the caller's membership and enforce the required role in one step.
pub async fn require_role(
    memberships: &MembershipRepository,
    org_id: Uuid,
    user_id: Uuid,
    required: OrgRole,
) -> Result<OrganizationMember, AppError> {
    let membership = memberships.find_membership(org_id, user_id).await?;
    authorize(membership, required)
}
