use anyhow::Result;
use uuid::Uuid;

use checkout::models::CustomerId;

use crate::helpers::TestApp;

#[derive(Debug)]
pub struct KnownCustomer {
    pub customer_id: CustomerId,
    pub token: String,
}

/// A brand new customer with a token the app will accept
pub fn known_customer(app: &TestApp) -> Result<KnownCustomer> {
    let customer_id = CustomerId::from(Uuid::new_v4());
    let token = app.verifier.encode_token(customer_id)?;
    Ok(KnownCustomer { customer_id, token })
}
