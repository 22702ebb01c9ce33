use async_graphql::Context;
use std::sync::Arc;
use tracing::error;

use crate::{
    auth::TokenVerifier,
    models::{Identity, RequestContext},
    payments::{PaymentCatalog, PaymentMethodRegistry, PaymentSelectionService},
    CheckoutError, Result,
};

/// State pulled off the GraphQL context for the cart resolvers
pub struct CheckoutContext<'a> {
    pub service: &'a PaymentSelectionService,
    pub registry: &'a PaymentMethodRegistry,
    pub identity: Option<Identity>,
}

/// Verifies the caller's bearer token (if one was sent) and resolves the
/// registry for the requested store
#[tracing::instrument(skip(context))]
pub fn extract_checkout_context<'a>(context: &Context<'a>) -> Result<CheckoutContext<'a>> {
    let service = context.data::<PaymentSelectionService>().map_err(|err| {
        error!(err = ?err, "failed to extract selection service from graphql context");
        CheckoutError::ServerError(err.message)
    })?;
    let registry = extract_store_registry(context)?;
    let identity = extract_identity(context)?;
    Ok(CheckoutContext {
        service,
        registry,
        identity,
    })
}

pub fn extract_identity(context: &Context<'_>) -> Result<Option<Identity>> {
    let token = match context.data_opt::<RequestContext>() {
        Some(request) => request.bearer_token()?,
        None => None,
    };
    match token {
        Some(token) => {
            let verifier = context.data::<TokenVerifier>().map_err(|err| {
                error!(err = ?err, "failed to extract token verifier from graphql context");
                CheckoutError::ServerError(err.message)
            })?;
            verifier.verify(&token).map(Some)
        }
        None => Ok(None),
    }
}

pub fn extract_store_registry<'a>(context: &Context<'a>) -> Result<&'a PaymentMethodRegistry> {
    let catalog = context.data::<Arc<PaymentCatalog>>().map_err(|err| {
        error!(err = ?err, "failed to extract payment catalog from graphql context");
        CheckoutError::ServerError(err.message)
    })?;
    let store = context
        .data_opt::<RequestContext>()
        .and_then(|request| request.store());
    catalog.for_store(store)
}
