use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::ops::Deref;
use uuid::Uuid;

use crate::CheckoutError;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub iss: String,
    pub exp: usize,
    pub iat: usize,
}

/// At the point where we have a `BearerToken` we aren't guaranteed that
/// the token is valid _(for that it has to go through `TokenVerifier::verify`)_.
/// We are guaranteed the caller sent a token in the expected
/// `Bearer {token}` format.
///
/// The wrapped String is just the token, the `Bearer ` prefix has been
/// stripped from it.
#[derive(Debug, Clone)]
pub struct BearerToken(String);

impl Deref for BearerToken {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<&str> for BearerToken {
    type Error = CheckoutError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut iter = s.split_whitespace();
        if let Some(prefix) = iter.next() {
            if !prefix.eq_ignore_ascii_case("bearer") {
                return Err(CheckoutError::InvalidToken(
                    "Invalid token format, expected `Bearer {token}`".to_string(),
                ));
            }
        }
        if let Some(token) = iter.next() {
            return Ok(Self(token.to_owned()));
        }
        Err(CheckoutError::InvalidToken("No token was found".to_string()))
    }
}
