use anchor_lang::prelude::*;
use crate::state::SkipMode;

/// Event emitted when a ledger is initialized
#[event]
pub struct LedgerInitialized {
    /// The ledger account public key
    pub ledger: Pubkey,
    /// Owner of the ledger
    pub owner: Pubkey,
    /// Reserve token mint
    pub token_mint: Pubkey,
    /// Reserve vault address
    pub token_vault: Pubkey,
    /// Initial lock period in seconds
    pub lock_period: i64,
    /// Opt-out strategy of this deployment
    pub skip_mode: SkipMode,
}

/// Event emitted when tokens are deposited into the reserve
#[event]
pub struct ReserveFunded {
    pub ledger: Pubkey,
    /// Depositor
    pub funder: Pubkey,
    pub amount: u64,
    /// Vault balance after the deposit
    pub reserve_balance: u64,
}

/// Event emitted when a user is added to the directory
#[event]
pub struct UserRegistered {
    pub ledger: Pubkey,
    pub user: Pubkey,
    /// Directory index assigned to the user
    pub index: u64,
}

/// Event emitted for every credited (user, amount) pair
#[event]
pub struct PointsAccrued {
    pub ledger: Pubkey,
    /// Admin or owner who credited the points
    pub authority: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    /// User balance after the credit
    pub points_balance: u64,
    /// Ledger-wide total distributed after the credit
    pub total_distributed: u64,
}

/// Event emitted when points are converted into a claim
#[event]
pub struct ClaimIssued {
    pub ledger: Pubkey,
    pub user: Pubkey,
    pub claim_id: u64,
    pub amount: u64,
    pub created_at: i64,
    pub unlock_at: i64,
}

/// Event emitted when a claim is paid out
#[event]
pub struct ClaimWithdrawn {
    pub ledger: Pubkey,
    pub user: Pubkey,
    pub claim_id: u64,
    pub amount: u64,
    /// User's lifetime claimed amount after this withdrawal
    pub user_total_claimed: u64,
    /// Ledger-wide total claimed after this withdrawal
    pub total_claimed: u64,
}

/// Summary event for batch_withdraw
#[event]
pub struct BatchWithdrawn {
    pub ledger: Pubkey,
    pub user: Pubkey,
    /// Number of ids submitted
    pub requested: u32,
    /// Ids actually withdrawn
    pub withdrawn_ids: Vec<u64>,
    /// Sum transferred from the reserve
    pub amount: u64,
}

/// Event emitted on a permanent opt-out
#[event]
pub struct UserSkipped {
    pub ledger: Pubkey,
    pub user: Pubkey,
    /// Balance zeroed by the opt-out
    pub forfeited: u64,
}

/// Event emitted when a toggleable opt-out changes
#[event]
pub struct SkipToggled {
    pub ledger: Pubkey,
    pub user: Pubkey,
    /// Flag after the toggle
    pub skipped: bool,
    /// Balance zeroed by the toggle (zero when opting back in)
    pub forfeited: u64,
}

/// Event emitted when an admin is added
#[event]
pub struct AdminAdded {
    pub ledger: Pubkey,
    pub admin: Pubkey,
}

/// Event emitted when an admin is removed
#[event]
pub struct AdminRemoved {
    pub ledger: Pubkey,
    pub admin: Pubkey,
}

/// Event emitted when the owner changes the lock period
#[event]
pub struct LockPeriodUpdated {
    pub ledger: Pubkey,
    pub old_lock_period: i64,
    pub new_lock_period: i64,
}

/// Event emitted when the pause flag changes
#[event]
pub struct PauseChanged {
    pub ledger: Pubkey,
    pub paused: bool,
}

/// Event emitted when the owner drains the reserve outside ledger bookkeeping
#[event]
pub struct EmergencyWithdrawn {
    pub ledger: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    /// Vault balance left behind
    pub reserve_balance: u64,
}
