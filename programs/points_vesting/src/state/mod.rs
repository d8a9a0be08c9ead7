pub mod ledger_state;
pub mod admin_state;
pub mod user_state;
pub mod claim_state;
pub mod directory_state;

pub use ledger_state::*;
pub use admin_state::*;
pub use user_state::*;
pub use claim_state::*;
pub use directory_state::*;
