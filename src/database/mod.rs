mod cart;
mod memory;

pub use cart::{CartDatabase, CartRepository};
pub use memory::InMemoryCartDatabase;
