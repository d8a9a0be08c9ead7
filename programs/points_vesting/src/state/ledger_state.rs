use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;

/// Opt-out strategy of a ledger, fixed at initialization.
///
/// The two strategies produce incompatible histories, so a ledger never switches
/// between them.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SkipMode {
    /// `skip` forfeits the balance and blocks claiming forever
    #[default]
    Permanent,
    /// `toggle_skip` flips the flag; enabling forfeits the balance
    Toggleable,
}

/**
 * Ledger configuration and global accounting
 *
 * Singleton per reserve mint holding the role state (owner, pause flag, lock period)
 * and the global counters the conservation invariant is stated over:
 *
 * `total_distributed - total_claimed - total_forfeited == Σ points_balance + Σ unwithdrawn claim amounts`
 *
 * Derivation: ["ledger", token_mint]
 *
 * Lifecycle:
 * 1. Created by initialize
 * 2. Counters updated by accrue / withdraw / skip
 * 3. Role state updated by owner instructions
 */
#[account]
#[derive(Default, Debug)]
pub struct LedgerConfig {
    /// Bump seed for PDA derivation
    /// - Needed to sign vault transfers
    pub bump: u8,

    /// Owner of the ledger
    /// - Manages admins, lock period and pause
    /// - Always authorized for admin-gated instructions
    pub owner: Pubkey,

    /// Reserve token mint
    pub token_mint: Pubkey,

    /// Reserve vault token account
    /// - Derived from: ["vault", ledger_key]
    pub token_vault: Pubkey,

    /// Lock period applied to newly issued claims (seconds)
    /// - Snapshotted into each claim's unlock_at, later changes do not touch existing claims
    pub lock_period: i64,

    /// Opt-out strategy for this deployment
    pub skip_mode: SkipMode,

    /// Global pause flag
    /// - Blocks accrual, issuance, withdrawal and skip while set
    pub paused: bool,

    /// Lifetime sum of all accruals
    pub total_distributed: u64,

    /// Lifetime sum of all completed withdrawals
    pub total_claimed: u64,

    /// Lifetime sum of balances forfeited by skipping
    pub total_forfeited: u64,

    /// Number of users registered in the directory
    /// - Next directory index to assign
    pub user_count: u64,
}

impl LedgerConfig {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<LedgerConfig>();

    pub fn ensure_active(&self) -> Result<()> {
        require!(!self.paused, PointsVestingError::Paused);
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) -> Result<()> {
        if paused {
            require!(!self.paused, PointsVestingError::AlreadyPaused);
        } else {
            require!(self.paused, PointsVestingError::NotPaused);
        }
        self.paused = paused;
        Ok(())
    }

    pub fn set_lock_period(&mut self, lock_period: i64) -> Result<()> {
        require!(
            (MIN_LOCK_PERIOD..=MAX_LOCK_PERIOD).contains(&lock_period),
            PointsVestingError::LockPeriodOutOfRange
        );
        self.lock_period = lock_period;
        Ok(())
    }

    /// Unlock time for a claim issued at `now` under the current lock period
    pub fn unlock_time(&self, now: i64) -> Result<i64> {
        now.checked_add(self.lock_period)
            .ok_or_else(|| error!(PointsVestingError::ArithmeticOverflow))
    }

    pub fn record_distribution(&mut self, amount: u64) -> Result<()> {
        self.total_distributed = self
            .total_distributed
            .checked_add(amount)
            .ok_or(PointsVestingError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn record_withdrawal(&mut self, amount: u64) -> Result<()> {
        self.total_claimed = self
            .total_claimed
            .checked_add(amount)
            .ok_or(PointsVestingError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn record_forfeit(&mut self, amount: u64) -> Result<()> {
        self.total_forfeited = self
            .total_forfeited
            .checked_add(amount)
            .ok_or(PointsVestingError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Reserves the next directory index
    pub fn register_user(&mut self) -> Result<u64> {
        let index = self.user_count;
        self.user_count = index
            .checked_add(1)
            .ok_or(PointsVestingError::ArithmeticOverflow)?;
        Ok(index)
    }

    /// Points owed to users but not yet paid out
    pub fn outstanding(&self) -> Option<u64> {
        self.total_distributed
            .checked_sub(self.total_claimed)?
            .checked_sub(self.total_forfeited)
    }
}
