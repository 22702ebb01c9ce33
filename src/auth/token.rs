use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::error;

use crate::{
    auth::{ACCESS_TOKEN_DURATION_SECONDS, TOKEN_LEEWAY_SECONDS},
    configuration::AuthSettings,
    models::{BearerToken, Claims, CustomerId, Identity},
    CheckoutError, Result,
};

/// Verifies the bearer tokens handed out by the identity service.
///
/// Tokens are HS256 JWTs whose `sub` is the customer id. Issuing them is the
/// identity service's job; `encode_token` only exists so other services and
/// tests can mint tokens signed with the same secret.
#[derive(Clone)]
pub struct TokenVerifier {
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenVerifier {
    pub fn new(settings: &AuthSettings) -> Self {
        let secret = settings.token_secret.as_bytes();
        Self {
            issuer: settings.issuer.clone(),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    #[tracing::instrument(skip(self, token))]
    pub fn verify(&self, token: &BearerToken) -> Result<Identity> {
        if token.is_empty() {
            return Err(CheckoutError::InvalidToken("No token was found".to_owned()));
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = TOKEN_LEEWAY_SECONDS;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(Identity::from(token_data))
    }

    #[tracing::instrument(skip(self))]
    pub fn encode_token(&self, customer_id: CustomerId) -> Result<String> {
        let iat = Utc::now();
        let exp = iat + Duration::seconds(ACCESS_TOKEN_DURATION_SECONDS);
        let claims = Claims {
            sub: customer_id.as_uuid(),
            iss: self.issuer.clone(),
            exp: exp.timestamp() as usize,
            iat: iat.timestamp() as usize,
        };
        self.encode_claims(&claims)
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            error!(err = ?e, "failed to encode json web token");
            CheckoutError::ServerError("failed to encode json web token".to_owned())
        })
    }
}
