use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::{
    graphql::{
        extract_checkout_context, SetPaymentMethodOnCartInput, SetPaymentMethodOnCartOutput,
    },
    models::CartId,
    payments::PaymentSelectionRequest,
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Selects a payment method for the cart, replacing any earlier selection
    #[tracing::instrument(skip(self, ctx, input), fields(cart_id = %input.cart_id))]
    async fn set_payment_method_on_cart(
        &self,
        ctx: &Context<'_>,
        input: SetPaymentMethodOnCartInput,
    ) -> Result<SetPaymentMethodOnCartOutput> {
        let checkout = extract_checkout_context(ctx).map_err(|e| e.extend())?;
        let cart_id = input.cart_id.parse::<CartId>().map_err(|e| e.extend())?;
        let request = PaymentSelectionRequest::from(input.payment_method);

        let (cart, _) = checkout
            .service
            .set_payment_method(
                cart_id,
                checkout.identity.as_ref(),
                checkout.registry,
                &request,
            )
            .await
            .map_err(|e| e.extend())?;
        Ok(SetPaymentMethodOnCartOutput { cart })
    }

    /// Returns the id of a new guest cart, or the customer's existing cart
    #[tracing::instrument(skip(self, ctx))]
    async fn create_empty_cart(&self, ctx: &Context<'_>) -> Result<String> {
        let checkout = extract_checkout_context(ctx).map_err(|e| e.extend())?;
        checkout
            .service
            .create_cart(checkout.identity.as_ref())
            .await
            .map(|cart| cart.id.to_string())
            .map_err(|e| e.extend())
    }
}
