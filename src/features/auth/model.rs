use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::shared::active_flag::ActiveFlag;

/// Kind of account a bearer token was issued for.
///
/// Admins and storefront customers live in separate tables; a customer token can never
/// reach admin routes, whatever its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    Admin,
    Customer,
}

/// Identity attached to a request by the auth middleware
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    pub id: i64,
    pub kind: PrincipalKind,
}

impl Principal {
    #[cfg(test)]
    pub fn admin(id: i64) -> Self {
        Self {
            id,
            kind: PrincipalKind::Admin,
        }
    }

    #[cfg(test)]
    pub fn customer(id: i64) -> Self {
        Self {
            id,
            kind: PrincipalKind::Customer,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.kind == PrincipalKind::Admin
    }
}

/// Admin row as loaded by the access gate
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct AdminAccount {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[sqlx(try_from = "ActiveFlag")]
    pub is_active: bool,
}

/// Claims carried by tokens from the identity service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub kind: PrincipalKind,
    pub exp: u64,
    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}
