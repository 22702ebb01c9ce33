use std::collections::{HashMap, HashSet};
use tracing::{error, info};

use crate::{
    configuration::PaymentSettings,
    models::{CartPaymentState, PaymentMethodDefinition, SelectedPaymentMethod},
    CheckoutError, Result,
};

/// The store used when a request doesn't name one
pub const DEFAULT_STORE: &str = "default";

/// The payment methods enabled for a single store, in configuration order.
///
/// Immutable once built. Disabled methods are simply not in here, so they
/// are indistinguishable from codes that were never registered.
#[derive(Debug, Clone, Default)]
pub struct PaymentMethodRegistry {
    methods: Vec<PaymentMethodDefinition>,
}

impl PaymentMethodRegistry {
    pub fn new(methods: Vec<PaymentMethodDefinition>) -> Result<Self> {
        let mut codes = HashSet::new();
        for method in &methods {
            if method.code().trim().is_empty() {
                return Err(misconfigured("a payment method has an empty code"));
            }
            if !codes.insert(method.code()) {
                return Err(misconfigured(&format!(
                    "payment method `{}` is registered twice",
                    method.code()
                )));
            }
            let mut fields = HashSet::new();
            for field in method.required_fields() {
                if field.trim().is_empty() || !fields.insert(field.as_str()) {
                    return Err(misconfigured(&format!(
                        "payment method `{}` declares an empty or duplicate field",
                        method.code()
                    )));
                }
            }
        }
        Ok(Self { methods })
    }

    pub fn lookup(&self, code: &str) -> Result<&PaymentMethodDefinition> {
        self.methods
            .iter()
            .find(|m| m.code() == code)
            .ok_or_else(|| CheckoutError::InvalidMethod(code.to_owned()))
    }

    pub fn list_all(&self) -> &[PaymentMethodDefinition] {
        &self.methods
    }
}

/// Every configured method plus the per store registries built from them
#[derive(Debug, Clone)]
pub struct PaymentCatalog {
    all_methods: PaymentMethodRegistry,
    default_store: PaymentMethodRegistry,
    stores: HashMap<String, PaymentMethodRegistry>,
}

impl PaymentCatalog {
    #[tracing::instrument(skip(settings))]
    pub fn from_settings(settings: &PaymentSettings) -> Result<Self> {
        let definitions: Vec<PaymentMethodDefinition> = settings
            .methods
            .iter()
            .map(|m| {
                PaymentMethodDefinition::new(
                    m.code.trim(),
                    m.title.clone(),
                    m.required_fields.clone(),
                    m.instructions.clone(),
                )
            })
            .collect();
        let all_methods = PaymentMethodRegistry::new(definitions)?;

        let enabled: Vec<&str> = settings
            .methods
            .iter()
            .filter(|m| m.enabled)
            .map(|m| m.code.trim())
            .collect();
        let default_store = all_methods.subset(|code| enabled.contains(&code));

        let mut stores = HashMap::new();
        for (store, store_settings) in &settings.stores {
            for code in &store_settings.disabled {
                if all_methods.lookup(code).is_err() {
                    return Err(misconfigured(&format!(
                        "store `{}` disables unknown payment method `{}`",
                        store, code
                    )));
                }
            }
            let registry = default_store.subset(|code| {
                !store_settings.disabled.iter().any(|disabled| disabled == code)
            });
            stores.insert(store.clone(), registry);
        }

        info!(
            methods = all_methods.list_all().len(),
            enabled = default_store.list_all().len(),
            stores = stores.len(),
            "payment catalog loaded"
        );
        Ok(Self {
            all_methods,
            default_store,
            stores,
        })
    }

    /// Registry for the requested store, the default store when `None`
    pub fn for_store(&self, store: Option<&str>) -> Result<&PaymentMethodRegistry> {
        match store {
            None | Some(DEFAULT_STORE) => Ok(&self.default_store),
            Some(code) => self
                .stores
                .get(code)
                .ok_or_else(|| CheckoutError::StoreNotFound(code.to_owned())),
        }
    }

    /// Describes whatever is stored on the cart. This looks at every
    /// configured method so a selection made before a method was switched off
    /// still renders with its title.
    pub fn describe(&self, cart: &CartPaymentState) -> Option<SelectedPaymentMethod> {
        let code = cart.selected_method()?;
        let definition = self.all_methods.lookup(code).ok()?;
        cart.describe_selection(definition)
    }
}

impl PaymentMethodRegistry {
    fn subset(&self, keep: impl Fn(&str) -> bool) -> Self {
        Self {
            methods: self
                .methods
                .iter()
                .filter(|m| keep(m.code()))
                .cloned()
                .collect(),
        }
    }
}

fn misconfigured(reason: &str) -> CheckoutError {
    error!(reason, "payment catalog is misconfigured");
    CheckoutError::ServerError(reason.to_owned())
}
