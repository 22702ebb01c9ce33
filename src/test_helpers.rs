use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::{
    configuration::{AuthSettings, PaymentMethodSettings, PaymentSettings},
    database::{CartRepository, InMemoryCartDatabase},
    models::{CartId, CartPaymentState, CustomerId},
    Result,
};

pub const TEST_STORAGE_TIMEOUT: Duration = Duration::from_millis(500);

fn method(code: &str, title: &str, required_fields: &[&str]) -> PaymentMethodSettings {
    PaymentMethodSettings {
        code: code.to_owned(),
        title: title.to_owned(),
        required_fields: required_fields.iter().map(|f| f.to_string()).collect(),
        instructions: None,
        enabled: true,
    }
}

/// The four offline methods, all enabled, no store overrides
pub fn offline_payment_settings() -> PaymentSettings {
    PaymentSettings {
        methods: vec![
            method("checkmo", "Check / Money order", &[]),
            method("banktransfer", "Bank Transfer Payment", &[]),
            method("cashondelivery", "Cash On Delivery", &[]),
            method("purchaseorder", "Purchase Order", &["purchase_order_number"]),
        ],
        stores: HashMap::new(),
    }
}

// Only for local unit tests, the app reads its secret from configuration
pub fn test_auth_settings() -> AuthSettings {
    AuthSettings {
        token_secret: "unit-test-secret".to_owned(),
        issuer: "checkout-tests".to_owned(),
    }
}

/// Wraps the in-memory store and sleeps before every call, for exercising
/// the storage timeouts
pub struct SlowCartDatabase {
    pub inner: InMemoryCartDatabase,
    delay: Duration,
}

impl SlowCartDatabase {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: InMemoryCartDatabase::new(),
            delay,
        }
    }
}

#[async_trait]
impl CartRepository for SlowCartDatabase {
    async fn find_by_id(&self, id: CartId) -> Result<Option<CartPaymentState>> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_by_id(id).await
    }

    async fn find_by_owner(&self, owner: CustomerId) -> Result<Option<CartPaymentState>> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_by_owner(owner).await
    }

    async fn create(&self, cart: &CartPaymentState) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.create(cart).await
    }

    async fn save_payment(&self, cart: &CartPaymentState) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.save_payment(cart).await
    }
}
