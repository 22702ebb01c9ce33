mod cart;
mod identity;
mod payment_method;
mod request_context;
mod token;

pub use cart::{CartId, CartPaymentState, CartType, ExtraFields};
pub use identity::{CustomerId, Identity};
pub use payment_method::{
    ExtraField, PaymentMethodDefinition, SelectedPaymentMethod, PURCHASE_ORDER_NUMBER,
};
pub use request_context::RequestContext;
pub use token::{BearerToken, Claims};
