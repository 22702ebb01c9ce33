use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::{
    database::CartRepository,
    models::{CartId, CartPaymentState, CustomerId},
    CheckoutError, Result,
};

/// Keeps carts in process memory. Every write replaces the whole cart
/// record, which gives `save_payment` its all-or-nothing behaviour.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCartDatabase {
    carts: Arc<DashMap<CartId, CartPaymentState>>,
}

impl InMemoryCartDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartDatabase {
    #[tracing::instrument(skip(self), fields(repository = "cart"))]
    async fn find_by_id(&self, id: CartId) -> Result<Option<CartPaymentState>> {
        Ok(self.carts.get(&id).map(|cart| cart.value().clone()))
    }

    #[tracing::instrument(skip(self), fields(repository = "cart"))]
    async fn find_by_owner(&self, owner: CustomerId) -> Result<Option<CartPaymentState>> {
        Ok(self
            .carts
            .iter()
            .find(|cart| cart.owner == Some(owner))
            .map(|cart| cart.value().clone()))
    }

    #[tracing::instrument(skip(self, cart), fields(repository = "cart", cart_id = %cart.id))]
    async fn create(&self, cart: &CartPaymentState) -> Result<()> {
        self.carts.insert(cart.id, cart.clone());
        Ok(())
    }

    #[tracing::instrument(skip(self, cart), fields(repository = "cart", cart_id = %cart.id))]
    async fn save_payment(&self, cart: &CartPaymentState) -> Result<()> {
        match self.carts.get_mut(&cart.id) {
            Some(mut stored) => {
                *stored = cart.clone();
                Ok(())
            }
            None => Err(CheckoutError::CartNotFound(cart.id.to_string())),
        }
    }
}
