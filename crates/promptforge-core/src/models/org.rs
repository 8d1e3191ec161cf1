use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Organization (tenant) entity. Aggregate root for all tenant data:
/// prompts, generations, ledger entries, and provider keys cascade from it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

/// Member role within an organization, hierarchical:
/// owner ⊇ admin ⊇ member ⊇ viewer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "org_role", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum OrgRole {
    Owner,
    Admin,
    Member,
    Viewer,
}

impl OrgRole {
    /// Numeric hierarchy level: owner=4, admin=3, member=2, viewer=1.
    pub fn level(&self) -> u8 {
        match self {
            OrgRole::Owner => 4,
            OrgRole::Admin => 3,
            OrgRole::Member => 2,
            OrgRole::Viewer => 1,
        }
    }

    /// Whether this role meets or exceeds the required minimum role.
    pub fn satisfies(&self, required: OrgRole) -> bool {
        self.level() >= required.level()
    }
}

impl Display for OrgRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OrgRole::Owner => write!(f, "owner"),
            OrgRole::Admin => write!(f, "admin"),
            OrgRole::Member => write!(f, "member"),
            OrgRole::Viewer => write!(f, "viewer"),
        }
    }
}

impl FromStr for OrgRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(OrgRole::Owner),
            "admin" => Ok(OrgRole::Admin),
            "member" => Ok(OrgRole::Member),
            "viewer" => Ok(OrgRole::Viewer),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Membership of a user in an organization. At most one row per
/// (org_id, user_id), enforced by a unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrganizationMember {
    pub id: Uuid,
    pub org_id: Uuid,
    pub user_id: Uuid,
    pub role: OrgRole,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_hierarchy_ordering() {
        assert!(OrgRole::Owner.level() > OrgRole::Admin.level());
        assert!(OrgRole::Admin.level() > OrgRole::Member.level());
        assert!(OrgRole::Member.level() > OrgRole::Viewer.level());
    }

    #[test]
    fn test_role_satisfies() {
        assert!(OrgRole::Owner.satisfies(OrgRole::Member));
        assert!(OrgRole::Member.satisfies(OrgRole::Member));
        assert!(!OrgRole::Viewer.satisfies(OrgRole::Member));
        assert!(!OrgRole::Admin.satisfies(OrgRole::Owner));
    }

    #[test]
    fn test_role_round_trip_from_str() {
        for role in [
            OrgRole::Owner,
            OrgRole::Admin,
            OrgRole::Member,
            OrgRole::Viewer,
        ] {
            assert_eq!(role.to_string().parse::<OrgRole>().unwrap(), role);
        }
        assert!("superuser".parse::<OrgRole>().is_err());
    }
}
