use jsonwebtoken::TokenData;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::Claims;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for CustomerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered customer whose bearer token has been verified.
///
/// Outside of tests the only constructor is `From<TokenData<Claims>>`, which
/// `TokenVerifier::verify` calls once the signature and expiry check out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    customer_id: CustomerId,
}

impl Identity {
    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }
}

impl From<TokenData<Claims>> for Identity {
    fn from(t: TokenData<Claims>) -> Self {
        Self {
            customer_id: CustomerId::from(t.claims.sub),
        }
    }
}

#[cfg(test)]
impl Identity {
    pub(crate) fn for_customer(customer_id: CustomerId) -> Self {
        Self { customer_id }
    }
}
