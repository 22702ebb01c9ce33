mod locks;
mod registry;
mod selection;

pub(crate) use locks::CartLocks;
pub use registry::{PaymentCatalog, PaymentMethodRegistry, DEFAULT_STORE};
pub use selection::{select, PaymentSelectionRequest, PaymentSelectionService};
