use crate::security::errors::AuthError;
use crate::security::jwt::AccessClaims;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Buyer,
    Seller,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Buyer => "buyer",
            UserRole::Seller => "seller",
        }
    }
}

impl FromStr for UserRole {
    type Err = AuthError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buyer" => Ok(UserRole::Buyer),
            "seller" => Ok(UserRole::Seller),
            _ => Err(AuthError::UnknownRole),
        }
    }
}

/// Request-scoped identity handed into every service call. Built once
/// from the verified token; services never read ambient session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i32,
    pub role: UserRole,
}

impl Identity {
    pub fn is_seller(&self) -> bool {
        self.role == UserRole::Seller
    }
}

impl TryFrom<&AccessClaims> for Identity {
    type Error = AuthError;

    fn try_from(claims: &AccessClaims) -> Result<Self, Self::Error> {
        Ok(Identity {
            user_id: claims.sub as i32,
            role: claims.role.parse()?,
        })
    }
}
