use serde::{Deserialize, Serialize};

/// Identifier wrapper for marketplace users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Role of the person looking at a screen; drives labels and permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Vendor,
    #[default]
    Government,
    Admin,
}

impl UserType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Vendor, Self::Government, Self::Admin]
    }

    pub const fn is_vendor(self) -> bool {
        matches!(self, Self::Vendor)
    }

    pub const fn is_public_sector(self) -> bool {
        matches!(self, Self::Government | Self::Admin)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Vendor => "Vendor",
            Self::Government => "Public Sector Employee",
            Self::Admin => "Admin",
        }
    }
}

/// The signed-in user, as handed over by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    pub user_type: UserType,
}

/// Minimal user reference embedded in other records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
}
