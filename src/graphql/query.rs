use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::{
    graphql::{extract_checkout_context, extract_store_registry},
    models::{CartId, CartPaymentState, PaymentMethodDefinition},
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    #[tracing::instrument(skip(self, ctx))]
    async fn cart(&self, ctx: &Context<'_>, cart_id: String) -> Result<CartPaymentState> {
        let checkout = extract_checkout_context(ctx).map_err(|e| e.extend())?;
        let cart_id = cart_id.parse::<CartId>().map_err(|e| e.extend())?;
        checkout
            .service
            .guard()
            .authorize(cart_id, checkout.identity.as_ref())
            .await
            .map_err(|e| e.extend())
    }

    /// Methods enabled for the store named in the `Store` header
    #[tracing::instrument(skip(self, ctx))]
    async fn available_payment_methods(
        &self,
        ctx: &Context<'_>,
    ) -> Result<Vec<PaymentMethodDefinition>> {
        let registry = extract_store_registry(ctx).map_err(|e| e.extend())?;
        Ok(registry.list_all().to_vec())
    }
}
