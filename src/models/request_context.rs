use crate::models::BearerToken;
use crate::Result;
use std::convert::TryFrom;

/// Headers pulled off the HTTP request and attached to every GraphQL
/// request. Nothing in here has been verified yet.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    authorization: Option<String>,
    store: Option<String>,
}

impl RequestContext {
    pub fn new(authorization: Option<String>, store: Option<String>) -> Self {
        Self {
            authorization: authorization.filter(|h| !h.trim().is_empty()),
            store: store
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty()),
        }
    }

    /// `None` for guest callers, an error if a header was sent but isn't a
    /// bearer token
    pub fn bearer_token(&self) -> Result<Option<BearerToken>> {
        self.authorization
            .as_deref()
            .map(BearerToken::try_from)
            .transpose()
    }

    pub fn store(&self) -> Option<&str> {
        self.store.as_deref()
    }
}
