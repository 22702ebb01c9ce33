use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;

use crate::{
    database::CartRepository,
    models::{CartId, CartPaymentState, Identity},
    CheckoutError, Result,
};

/// The only place deciding whether a caller may touch a cart.
///
/// A guest cart is only reachable without an identity, a customer's cart
/// only with that customer's identity.
#[derive(Clone)]
pub struct CartAccessGuard {
    carts: Arc<dyn CartRepository>,
    storage_timeout: Duration,
}

impl CartAccessGuard {
    pub fn new(carts: Arc<dyn CartRepository>, storage_timeout: Duration) -> Self {
        Self {
            carts,
            storage_timeout,
        }
    }

    #[tracing::instrument(skip(self, identity), fields(customer_id = tracing::field::Empty))]
    pub async fn authorize(
        &self,
        cart_id: CartId,
        identity: Option<&Identity>,
    ) -> Result<CartPaymentState> {
        if let Some(identity) = identity {
            tracing::Span::current()
                .record("customer_id", tracing::field::display(identity.customer_id()));
        }
        let cart = timeout(self.storage_timeout, self.carts.find_by_id(cart_id))
            .await??
            .ok_or_else(|| CheckoutError::CartNotFound(cart_id.to_string()))?;

        let caller = identity.map(|identity| identity.customer_id());
        if cart.owner != caller {
            warn!(
                cart_id = %cart_id,
                guest_cart = cart.is_guest(),
                "caller does not own the requested cart"
            );
            return Err(CheckoutError::AccessDenied(cart_id.to_string()));
        }
        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        database::InMemoryCartDatabase,
        models::CustomerId,
        test_helpers::{SlowCartDatabase, TEST_STORAGE_TIMEOUT},
    };
    use claims::assert_ok;
    use uuid::Uuid;

    async fn guard_with(cart: &CartPaymentState) -> CartAccessGuard {
        let db = InMemoryCartDatabase::new();
        db.create(cart).await.unwrap();
        CartAccessGuard::new(Arc::new(db), TEST_STORAGE_TIMEOUT)
    }

    fn customer() -> Identity {
        Identity::for_customer(CustomerId::from(Uuid::new_v4()))
    }

    #[tokio::test]
    async fn owner_can_access_their_cart() {
        let owner = customer();
        let cart = CartPaymentState::new(Some(owner.customer_id()));
        let guard = guard_with(&cart).await;

        let authorized = guard.authorize(cart.id, Some(&owner)).await;
        assert_ok!(&authorized);
        assert_eq!(authorized.unwrap().id, cart.id);
    }

    #[tokio::test]
    async fn guest_can_access_a_guest_cart() {
        let cart = CartPaymentState::new(None);
        let guard = guard_with(&cart).await;
        assert_ok!(guard.authorize(cart.id, None).await);
    }

    #[tokio::test]
    async fn unknown_cart_is_denied() {
        let guard = guard_with(&CartPaymentState::new(None)).await;
        let missing = CartId::new();
        assert_eq!(
            guard.authorize(missing, None).await.unwrap_err(),
            CheckoutError::CartNotFound(missing.to_string())
        );
    }

    #[tokio::test]
    async fn another_customer_is_denied() {
        let owner = customer();
        let cart = CartPaymentState::new(Some(owner.customer_id()));
        let guard = guard_with(&cart).await;

        assert_eq!(
            guard.authorize(cart.id, Some(&customer())).await.unwrap_err(),
            CheckoutError::AccessDenied(cart.id.to_string())
        );
    }

    #[tokio::test]
    async fn anonymous_caller_is_denied_a_customer_cart() {
        let cart = CartPaymentState::new(Some(customer().customer_id()));
        let guard = guard_with(&cart).await;
        assert_eq!(
            guard.authorize(cart.id, None).await.unwrap_err(),
            CheckoutError::AccessDenied(cart.id.to_string())
        );
    }

    #[tokio::test]
    async fn customer_is_denied_a_guest_cart() {
        let cart = CartPaymentState::new(None);
        let guard = guard_with(&cart).await;
        assert_eq!(
            guard.authorize(cart.id, Some(&customer())).await.unwrap_err(),
            CheckoutError::AccessDenied(cart.id.to_string())
        );
    }

    #[tokio::test]
    async fn slow_storage_is_a_transient_failure() {
        let cart = CartPaymentState::new(None);
        let db = SlowCartDatabase::new(Duration::from_secs(5));
        db.inner.create(&cart).await.unwrap();
        let guard = CartAccessGuard::new(Arc::new(db), Duration::from_millis(20));

        assert_eq!(
            guard.authorize(cart.id, None).await.unwrap_err(),
            CheckoutError::TransientStorageFailure
        );
    }
}
