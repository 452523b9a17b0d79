use serde::Serialize;

use super::domain::OrganizationSlim;
use crate::users::{SessionUser, UserType};

pub const LIST_TITLE: &str = "Digital Marketplace Organizations";

/// Organization directory as seen by one (possibly anonymous) viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizationListState {
    pub organizations: Vec<OrganizationSlim>,
    pub session: Option<SessionUser>,
}

impl OrganizationListState {
    pub fn init(mut organizations: Vec<OrganizationSlim>, session: Option<SessionUser>) -> Self {
        organizations.sort_by(|a, b| {
            a.legal_name
                .to_lowercase()
                .cmp(&b.legal_name.to_lowercase())
                .then_with(|| a.legal_name.cmp(&b.legal_name))
        });
        Self {
            organizations,
            session,
        }
    }

    /// Owners are listed for signed-in vendors and admins, never for
    /// anonymous visitors or government staff.
    pub fn shows_owner_column(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|user| user.user_type != UserType::Government)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListColumn {
    pub label: &'static str,
    pub min_width_px: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerCell {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizationRow {
    pub legal_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextualAction {
    pub text: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub outline: bool,
    pub dest: String,
}

pub fn head_cells(state: &OrganizationListState) -> Vec<ListColumn> {
    let mut cells = vec![ListColumn {
        label: "Organization Name",
        min_width_px: 240,
    }];
    if state.shows_owner_column() {
        cells.push(ListColumn {
            label: "Owner",
            min_width_px: 200,
        });
    }
    cells
}

pub fn body_rows(state: &OrganizationListState, placeholder: &str) -> Vec<OrganizationRow> {
    let show_owner = state.shows_owner_column();
    state
        .organizations
        .iter()
        .map(|organization| OrganizationRow {
            legal_name: organization.legal_name.clone(),
            edit_link: organization
                .owner
                .as_ref()
                .map(|_| format!("/organizations/{}/edit", organization.id)),
            owner: show_owner.then(|| match &organization.owner {
                Some(owner) => OwnerCell {
                    text: owner.name.clone(),
                    profile_link: Some(format!("/users/{}", owner.id.0)),
                },
                None => OwnerCell {
                    text: placeholder.to_string(),
                    profile_link: None,
                },
            }),
        })
        .collect()
}

/// Page-level actions; only vendors may create organizations.
pub fn contextual_actions(state: &OrganizationListState) -> Vec<ContextualAction> {
    match &state.session {
        Some(user) if user.user_type.is_vendor() => vec![
            ContextualAction {
                text: "Create Organization",
                icon: "plus-circle",
                color: "primary",
                outline: false,
                dest: "/organizations/create".to_string(),
            },
            ContextualAction {
                text: "My Organizations",
                icon: "building",
                color: "c-nav-fg-alt",
                outline: true,
                dest: format!("/users/{}?tab=organizations", user.id.0),
            },
        ],
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizationListView {
    pub title: &'static str,
    pub head_cells: Vec<ListColumn>,
    pub rows: Vec<OrganizationRow>,
    pub actions: Vec<ContextualAction>,
}

impl OrganizationListView {
    pub fn build(state: &OrganizationListState, placeholder: &str) -> Self {
        Self {
            title: LIST_TITLE,
            head_cells: head_cells(state),
            rows: body_rows(state, placeholder),
            actions: contextual_actions(state),
        }
    }
}
