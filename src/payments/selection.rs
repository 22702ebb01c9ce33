use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::{
    auth::CartAccessGuard,
    database::CartRepository,
    models::{
        CartId, CartPaymentState, CustomerId, ExtraField, ExtraFields, Identity,
        SelectedPaymentMethod,
    },
    payments::{CartLocks, PaymentMethodRegistry},
    CheckoutError, Result,
};

/// A caller's request to put a payment method on a cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSelectionRequest {
    pub code: String,
    pub extra_fields: ExtraFields,
}

impl PaymentSelectionRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            extra_fields: ExtraFields::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_fields.insert(name.into(), value.into());
        self
    }
}

/// Validates `request` against `registry` and replaces the selection on
/// `cart`.
///
/// Nothing on the cart changes unless every check passes. Fields the method
/// doesn't declare are dropped rather than rejected.
pub fn select(
    registry: &PaymentMethodRegistry,
    cart: &mut CartPaymentState,
    request: &PaymentSelectionRequest,
) -> Result<SelectedPaymentMethod> {
    let definition = registry.lookup(request.code.trim())?;

    let mut accepted = ExtraFields::new();
    let mut extra_fields = Vec::with_capacity(definition.required_fields().len());
    for name in definition.required_fields() {
        let value = request
            .extra_fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CheckoutError::MissingRequiredField(name.clone()))?;
        accepted.insert(name.clone(), value.to_owned());
        extra_fields.push(ExtraField {
            name: name.clone(),
            value: value.to_owned(),
        });
    }

    let dropped = request
        .extra_fields
        .keys()
        .filter(|k| !definition.declares(k))
        .count();
    if dropped > 0 {
        debug!(
            code = definition.code(),
            dropped, "ignoring extra fields the payment method doesn't declare"
        );
    }

    cart.replace_selection(definition.code().to_owned(), accepted);
    Ok(SelectedPaymentMethod {
        code: definition.code().to_owned(),
        title: definition.title().to_owned(),
        extra_fields,
    })
}

/// Applies selections to stored carts, one writer per cart at a time
#[derive(Clone)]
pub struct PaymentSelectionService {
    carts: Arc<dyn CartRepository>,
    guard: CartAccessGuard,
    locks: CartLocks,
    owner_locks: CartLocks<CustomerId>,
    storage_timeout: Duration,
}

impl PaymentSelectionService {
    pub fn new(carts: Arc<dyn CartRepository>, storage_timeout: Duration) -> Self {
        Self {
            guard: CartAccessGuard::new(Arc::clone(&carts), storage_timeout),
            carts,
            locks: CartLocks::new(),
            owner_locks: CartLocks::new(),
            storage_timeout,
        }
    }

    pub fn guard(&self) -> &CartAccessGuard {
        &self.guard
    }

    /// Authorizes the caller, validates the request and persists the new
    /// selection. Returns the updated cart together with the snapshot.
    ///
    /// The selection is worked out on a copy of the stored cart, so a failure
    /// at any point leaves storage exactly as it was.
    #[tracing::instrument(skip(self, identity, registry, request), fields(code = %request.code))]
    pub async fn set_payment_method(
        &self,
        cart_id: CartId,
        identity: Option<&Identity>,
        registry: &PaymentMethodRegistry,
        request: &PaymentSelectionRequest,
    ) -> Result<(CartPaymentState, SelectedPaymentMethod)> {
        let _lock = self.locks.lock(cart_id).await;

        let mut cart = self.guard.authorize(cart_id, identity).await?;
        let selection = select(registry, &mut cart, request)?;
        timeout(self.storage_timeout, self.carts.save_payment(&cart)).await??;

        info!(cart_id = %cart_id, code = %selection.code, "payment method set on cart");
        Ok((cart, selection))
    }

    /// Guests always get a fresh cart, customers get back the cart they
    /// already own if there is one.
    ///
    /// Lookup and creation run under the customer's lock so concurrent calls
    /// can't leave one customer with two carts.
    #[tracing::instrument(skip(self, identity))]
    pub async fn create_cart(&self, identity: Option<&Identity>) -> Result<CartPaymentState> {
        let owner = identity.map(|identity| identity.customer_id());
        let _lock = match owner {
            Some(owner) => Some(self.owner_locks.lock(owner).await),
            None => None,
        };
        if let Some(owner) = owner {
            let existing = timeout(self.storage_timeout, self.carts.find_by_owner(owner)).await??;
            if let Some(cart) = existing {
                return Ok(cart);
            }
        }
        let cart = CartPaymentState::new(owner);
        timeout(self.storage_timeout, self.carts.create(&cart)).await??;
        info!(cart_id = %cart.id, guest = cart.is_guest(), "created cart");
        Ok(cart)
    }
}
