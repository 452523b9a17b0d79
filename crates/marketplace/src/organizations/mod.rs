//! Vendor organizations: the public directory and membership records.

pub mod affiliation;
pub mod domain;
pub mod listing;
pub mod repository;
pub mod router;

pub use affiliation::{
    can_act_on_behalf_of, parse_membership_type, Affiliation, AffiliationId, AffiliationMember,
    AffiliationSlim, MembershipStatus, MembershipType,
};
pub use domain::{OrganizationId, OrganizationRef, OrganizationSlim};
pub use listing::{OrganizationListState, OrganizationListView};
pub use repository::{OrganizationRepository, OrganizationRepositoryError};
pub use router::{organization_router, OrganizationDirectory};
