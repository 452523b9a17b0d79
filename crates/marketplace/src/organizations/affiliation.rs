use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{OrganizationId, OrganizationRef};
use crate::users::UserRef;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AffiliationId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipType {
    Owner,
    Member,
}

impl MembershipType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Member => "MEMBER",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Member => "Member",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
    Active,
    Inactive,
    Pending,
}

/// Exact wire value match; anything else, including other casings, is `None`.
pub fn parse_membership_type(raw: &str) -> Option<MembershipType> {
    [MembershipType::Owner, MembershipType::Member]
        .into_iter()
        .find(|kind| kind.as_str() == raw)
}

/// Full membership record linking a user to an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    pub id: AffiliationId,
    pub created_at: DateTime<Utc>,
    pub user: UserRef,
    pub organization: OrganizationRef,
    pub membership_type: MembershipType,
    pub membership_status: MembershipStatus,
}

impl Affiliation {
    pub fn is_active(&self) -> bool {
        self.membership_status == MembershipStatus::Active
    }

    pub fn is_owner(&self) -> bool {
        self.membership_type == MembershipType::Owner
    }
}

/// One entry of the current user's affiliation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliationSlim {
    pub id: AffiliationId,
    pub membership_type: MembershipType,
    pub organization: OrganizationRef,
}

/// One member row on an organization's team list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliationMember {
    pub id: AffiliationId,
    pub membership_type: MembershipType,
    pub membership_status: MembershipStatus,
    pub user: UserRef,
}

/// A user may submit on an organization's behalf only through an active
/// affiliation; pending invitations and lapsed memberships do not count.
pub fn can_act_on_behalf_of(affiliations: &[Affiliation], organization: &OrganizationId) -> bool {
    affiliations
        .iter()
        .any(|affiliation| affiliation.is_active() && &affiliation.organization.id == organization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::UserId;

    fn affiliation(org: &str, status: MembershipStatus) -> Affiliation {
        Affiliation {
            id: AffiliationId(format!("aff-{org}")),
            created_at: Utc::now(),
            user: UserRef {
                id: UserId("u-1".to_string()),
                name: "Sam Patel".to_string(),
            },
            organization: OrganizationRef {
                id: OrganizationId(org.to_string()),
                legal_name: format!("{org} Ltd"),
            },
            membership_type: MembershipType::Member,
            membership_status: status,
        }
    }

    #[test]
    fn parses_only_exact_wire_values() {
        assert_eq!(parse_membership_type("OWNER"), Some(MembershipType::Owner));
        assert_eq!(parse_membership_type("MEMBER"), Some(MembershipType::Member));
        assert_eq!(parse_membership_type("owner"), None);
        assert_eq!(parse_membership_type(""), None);
    }

    #[test]
    fn only_active_affiliations_grant_authority() {
        let target = OrganizationId("org-a".to_string());
        let pending = vec![affiliation("org-a", MembershipStatus::Pending)];
        assert!(!can_act_on_behalf_of(&pending, &target));

        let mixed = vec![
            affiliation("org-b", MembershipStatus::Active),
            affiliation("org-a", MembershipStatus::Inactive),
        ];
        assert!(!can_act_on_behalf_of(&mixed, &target));

        let active = vec![affiliation("org-a", MembershipStatus::Active)];
        assert!(can_act_on_behalf_of(&active, &target));
    }

    #[test]
    fn membership_serializes_in_wire_form() {
        let member = AffiliationMember {
            id: AffiliationId("aff-1".to_string()),
            membership_type: MembershipType::Owner,
            membership_status: MembershipStatus::Active,
            user: UserRef {
                id: UserId("u-1".to_string()),
                name: "Sam Patel".to_string(),
            },
        };
        let json = serde_json::to_value(&member).expect("serialize");
        assert_eq!(json["membership_type"], "OWNER");
        assert_eq!(json["membership_status"], "ACTIVE");
    }
}
