use async_graphql::{InputObject, SimpleObject};

use crate::{
    models::{CartPaymentState, PURCHASE_ORDER_NUMBER},
    payments::PaymentSelectionRequest,
};

#[derive(Debug, InputObject)]
pub struct SetPaymentMethodOnCartInput {
    pub cart_id: String,
    pub payment_method: PaymentMethodInput,
}

#[derive(Debug, InputObject)]
pub struct PaymentMethodInput {
    pub code: String,
    /// Shorthand for the `purchase_order_number` extra field
    pub purchase_order_number: Option<String>,
    #[graphql(default)]
    pub extra_fields: Vec<ExtraFieldInput>,
}

#[derive(Debug, InputObject)]
pub struct ExtraFieldInput {
    pub name: String,
    pub value: String,
}

#[derive(SimpleObject)]
pub struct SetPaymentMethodOnCartOutput {
    pub cart: CartPaymentState,
}

impl From<PaymentMethodInput> for PaymentSelectionRequest {
    fn from(input: PaymentMethodInput) -> Self {
        let mut request = PaymentSelectionRequest::new(input.code);
        for field in input.extra_fields {
            request = request.with_field(field.name, field.value);
        }
        // The dedicated argument wins over the generic list
        if let Some(number) = input.purchase_order_number {
            request = request.with_field(PURCHASE_ORDER_NUMBER, number);
        }
        request
    }
}
