mod constants;
mod guard;
mod token;

pub use constants::*;
pub use guard::CartAccessGuard;
pub use token::TokenVerifier;
