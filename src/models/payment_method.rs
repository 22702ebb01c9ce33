use async_graphql::{Object, SimpleObject};
use serde::Serialize;

/// Extra field carried by the purchase order method
pub const PURCHASE_ORDER_NUMBER: &str = "purchase_order_number";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethodDefinition {
    code: String,
    title: String,
    required_fields: Vec<String>,
    instructions: Option<String>,
}

impl PaymentMethodDefinition {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        required_fields: Vec<String>,
        instructions: Option<String>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            required_fields,
            instructions,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// In declaration order
    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    pub fn declares(&self, field: &str) -> bool {
        self.required_fields.iter().any(|f| f == field)
    }
}

/// Graphql Resolver
#[Object(name = "AvailablePaymentMethod")]
impl PaymentMethodDefinition {
    #[graphql(name = "code")]
    async fn graphql_code(&self) -> &str {
        &self.code
    }

    #[graphql(name = "title")]
    async fn graphql_title(&self) -> &str {
        &self.title
    }

    async fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    #[graphql(name = "requiredFields")]
    async fn graphql_required_fields(&self) -> &[String] {
        &self.required_fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct ExtraField {
    pub name: String,
    pub value: String,
}

/// What the caller gets back once a method is on the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedPaymentMethod {
    pub code: String,
    pub title: String,
    pub extra_fields: Vec<ExtraField>,
}

impl SelectedPaymentMethod {
    pub fn extra_field(&self, name: &str) -> Option<&str> {
        self.extra_fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

#[Object]
impl SelectedPaymentMethod {
    async fn code(&self) -> &str {
        &self.code
    }

    async fn title(&self) -> &str {
        &self.title
    }

    async fn purchase_order_number(&self) -> Option<&str> {
        self.extra_field(PURCHASE_ORDER_NUMBER)
    }

    async fn extra_fields(&self) -> &[ExtraField] {
        &self.extra_fields
    }
}
