use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query, query_as, types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::{
    models::{CartId, CartPaymentState, CustomerId, ExtraFields},
    CheckoutError, Result,
};

/// Storage collaborator for carts.
///
/// `save_payment` has to persist the selection and its extra fields as one
/// write, callers rely on a dropped future never leaving half a selection
/// behind.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn find_by_id(&self, id: CartId) -> Result<Option<CartPaymentState>>;
    async fn find_by_owner(&self, owner: CustomerId) -> Result<Option<CartPaymentState>>;
    async fn create(&self, cart: &CartPaymentState) -> Result<()>;
    async fn save_payment(&self, cart: &CartPaymentState) -> Result<()>;
}

pub struct CartDatabase {
    pool: PgPool,
}

impl CartDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SqlxCart {
    id: Uuid,
    owner_id: Option<Uuid>,
    selected_payment_method: Option<String>,
    payment_extra_fields: Json<ExtraFields>,
    created_at: DateTime<Utc>,
    last_modified: DateTime<Utc>,
}

impl From<SqlxCart> for CartPaymentState {
    fn from(cart: SqlxCart) -> Self {
        CartPaymentState::from_storage(
            CartId::from(cart.id),
            cart.owner_id.map(CustomerId::from),
            cart.selected_payment_method,
            cart.payment_extra_fields.0,
            cart.created_at,
            cart.last_modified,
        )
    }
}

const SELECT_CART: &str = r#"
    SELECT
        id, owner_id, selected_payment_method, payment_extra_fields,
        created_at, last_modified
    FROM carts
"#;

#[async_trait]
impl CartRepository for CartDatabase {
    #[tracing::instrument(skip(self), fields(repository = "cart"))]
    async fn find_by_id(&self, id: CartId) -> Result<Option<CartPaymentState>> {
        let cart = query_as::<_, SqlxCart>(&format!("{} WHERE id = $1", SELECT_CART))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(cart.map(CartPaymentState::from))
    }

    #[tracing::instrument(skip(self), fields(repository = "cart"))]
    async fn find_by_owner(&self, owner: CustomerId) -> Result<Option<CartPaymentState>> {
        let cart = query_as::<_, SqlxCart>(&format!("{} WHERE owner_id = $1", SELECT_CART))
            .bind(owner.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(cart.map(CartPaymentState::from))
    }

    #[tracing::instrument(skip(self, cart), fields(repository = "cart", cart_id = %cart.id))]
    async fn create(&self, cart: &CartPaymentState) -> Result<()> {
        query(
            r#"
            INSERT INTO carts (
                id, owner_id, selected_payment_method, payment_extra_fields,
                created_at, last_modified
            )
            VALUES ( $1, $2, $3, $4, $5, $6 )
            "#,
        )
        .bind(cart.id.as_uuid())
        .bind(cart.owner.map(|owner| owner.as_uuid()))
        .bind(cart.selected_method())
        .bind(Json(cart.extra_field_values()))
        .bind(cart.created_at)
        .bind(cart.last_modified)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, cart), fields(repository = "cart", cart_id = %cart.id))]
    async fn save_payment(&self, cart: &CartPaymentState) -> Result<()> {
        let result = query(
            r#"
            UPDATE carts
            SET selected_payment_method = $1, payment_extra_fields = $2, last_modified = $3
            WHERE id = $4
            "#,
        )
        .bind(cart.selected_method())
        .bind(Json(cart.extra_field_values()))
        .bind(cart.last_modified)
        .bind(cart.id.as_uuid())
        .execute(&self.pool)
        .await?;

        // The cart was removed after it was authorized
        if result.rows_affected() == 0 {
            return Err(CheckoutError::CartNotFound(cart.id.to_string()));
        }
        Ok(())
    }
}
