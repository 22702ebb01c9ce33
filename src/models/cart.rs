use async_graphql::{Context, Enum, ErrorExtensions, Object, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    graphql::extract_store_registry,
    models::{CustomerId, ExtraField, PaymentMethodDefinition, SelectedPaymentMethod},
    payments::PaymentCatalog,
    CheckoutError,
};

/// Field name to value, only ever holding fields declared by the selected method
pub type ExtraFields = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(Uuid);

impl CartId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CartId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CartId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Cart ids are handed out as 32 lowercase hex digits
impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// An id that doesn't parse can't belong to any cart, so it is reported the
/// same way as an unknown one.
impl FromStr for CartId {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| CheckoutError::CartNotFound(s.to_owned()))
    }
}

#[derive(Debug, Enum, Copy, Clone, Eq, PartialEq)]
pub enum CartType {
    Guest,
    Customer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartPaymentState {
    pub id: CartId,
    pub owner: Option<CustomerId>,
    selected_method: Option<String>,
    extra_field_values: ExtraFields,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl CartPaymentState {
    pub fn new(owner: Option<CustomerId>) -> Self {
        let now = Utc::now();
        Self {
            id: CartId::new(),
            owner,
            selected_method: None,
            extra_field_values: ExtraFields::new(),
            created_at: now,
            last_modified: now,
        }
    }

    /// Rebuilds a cart that was previously persisted
    pub(crate) fn from_storage(
        id: CartId,
        owner: Option<CustomerId>,
        selected_method: Option<String>,
        extra_field_values: ExtraFields,
        created_at: DateTime<Utc>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            selected_method,
            extra_field_values,
            created_at,
            last_modified,
        }
    }

    pub fn is_guest(&self) -> bool {
        self.owner.is_none()
    }

    pub fn selected_method(&self) -> Option<&str> {
        self.selected_method.as_deref()
    }

    pub fn extra_field_values(&self) -> &ExtraFields {
        &self.extra_field_values
    }

    /// Swaps the whole selection in one go, the previous method's fields
    /// never survive a reselection.
    pub(crate) fn replace_selection(&mut self, code: String, extra_field_values: ExtraFields) {
        self.selected_method = Some(code);
        self.extra_field_values = extra_field_values;
        self.last_modified = Utc::now();
    }

    /// Builds the snapshot for the stored selection using `definition`
    /// for the title and field order.
    pub fn describe_selection(
        &self,
        definition: &PaymentMethodDefinition,
    ) -> Option<SelectedPaymentMethod> {
        let code = self.selected_method()?;
        if code != definition.code() {
            return None;
        }
        let extra_fields = definition
            .required_fields()
            .iter()
            .filter_map(|name| {
                self.extra_field_values
                    .get(name)
                    .map(|value| ExtraField {
                        name: name.clone(),
                        value: value.clone(),
                    })
            })
            .collect();
        Some(SelectedPaymentMethod {
            code: code.to_owned(),
            title: definition.title().to_owned(),
            extra_fields,
        })
    }
}

/// Graphql Resolver
#[Object(name = "Cart")]
impl CartPaymentState {
    async fn id(&self) -> String {
        self.id.to_string()
    }

    async fn cart_type(&self) -> CartType {
        if self.is_guest() {
            CartType::Guest
        } else {
            CartType::Customer
        }
    }

    async fn selected_payment_method(
        &self,
        ctx: &Context<'_>,
    ) -> Result<Option<SelectedPaymentMethod>> {
        let catalog = ctx.data::<Arc<PaymentCatalog>>()?;
        Ok(catalog.describe(self))
    }

    /// Methods the current store accepts for this cart
    async fn available_payment_methods(
        &self,
        ctx: &Context<'_>,
    ) -> Result<Vec<PaymentMethodDefinition>> {
        let registry = extract_store_registry(ctx).map_err(|e| e.extend())?;
        Ok(registry.list_all().to_vec())
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    async fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }
}
