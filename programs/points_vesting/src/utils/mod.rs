pub mod accounts;
pub mod token;

pub use accounts::*;
pub use token::*;
