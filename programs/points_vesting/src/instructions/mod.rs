pub mod initialize;
pub mod fund_reserve;
pub mod manage_admins;
pub mod configure;
pub mod accrue;
pub mod batch_accrue;
pub mod issue_claim;
pub mod withdraw;
pub mod batch_withdraw;
pub mod skip;
pub mod emergency_withdraw;
pub mod get_claims;
pub mod get_stats;

pub use initialize::*;
pub use fund_reserve::*;
pub use manage_admins::*;
pub use configure::*;
pub use accrue::*;
pub use batch_accrue::*;
pub use issue_claim::*;
pub use withdraw::*;
pub use batch_withdraw::*;
pub use skip::*;
pub use emergency_withdraw::*;
pub use get_claims::*;
pub use get_stats::*;
