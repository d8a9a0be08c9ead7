use anchor_lang::prelude::*;
use crate::error::*;
use crate::state::SkipMode;

/**
 * Per-user ledger account
 *
 * Holds the user's accrued points, the claim counter that addresses their claim PDAs,
 * the lifetime withdrawn amount and the opt-out flag.
 *
 * Derivation: ["user", ledger_key, user_key]
 *
 * Lifecycle:
 * 1. Created on the first accrual to the user (admin pays rent)
 * 2. Balance grows with accruals, drops to zero on issue_claim or skip
 * 3. Never closed
 *
 * Design Notes:
 * - claim_count is the next claim id; ids are dense and never reused
 * - once claim_count > 0 the skip flag is frozen
 * - `locked` is the reentrancy guard held across the reserve transfer
 */
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct UserState {
    /// Ledger this account belongs to
    pub ledger: Pubkey,

    /// Owner of the points
    pub user: Pubkey,

    /// Points accrued and not yet moved into a claim
    pub points_balance: u64,

    /// Number of claims issued so far
    pub claim_count: u64,

    /// Lifetime sum of completed withdrawals
    pub total_claimed: u64,

    /// Opt-out flag
    pub skipped: bool,

    /// Set while a withdrawal's reserve transfer is in flight
    pub locked: bool,

    /// Position of this user in the directory
    pub directory_index: u64,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl UserState {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<UserState>();

    /// A zeroed account fresh out of `init_if_needed` has no user yet
    pub fn is_registered(&self) -> bool {
        self.user != Pubkey::default()
    }

    pub fn register(&mut self, ledger: Pubkey, user: Pubkey, directory_index: u64, bump: u8) {
        self.ledger = ledger;
        self.user = user;
        self.directory_index = directory_index;
        self.bump = bump;
    }

    pub fn ensure_unlocked(&self) -> Result<()> {
        require!(!self.locked, PointsVestingError::ReentrantCall);
        Ok(())
    }

    /// Acquire the reentrancy guard
    pub fn lock(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        self.locked = true;
        Ok(())
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.points_balance = self
            .points_balance
            .checked_add(amount)
            .ok_or(PointsVestingError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Moves the whole balance out for a new claim and returns `(claim_id, amount)`.
    ///
    /// `reserve_balance` is only a pre-check; no value moves at issuance.
    pub fn take_for_claim(&mut self, reserve_balance: u64) -> Result<(u64, u64)> {
        require!(!self.skipped, PointsVestingError::UserSkipped);
        let amount = self.points_balance;
        require!(amount > 0, PointsVestingError::NothingToClaim);
        require!(
            reserve_balance >= amount,
            PointsVestingError::InsufficientReserve
        );

        let claim_id = self.claim_count;
        self.claim_count = claim_id
            .checked_add(1)
            .ok_or(PointsVestingError::ArithmeticOverflow)?;
        self.points_balance = 0;
        Ok((claim_id, amount))
    }

    pub fn record_withdrawal(&mut self, amount: u64) -> Result<()> {
        self.total_claimed = self
            .total_claimed
            .checked_add(amount)
            .ok_or(PointsVestingError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Permanent opt-out. Returns the forfeited balance.
    pub fn skip(&mut self, mode: SkipMode) -> Result<u64> {
        require!(
            mode == SkipMode::Permanent,
            PointsVestingError::SkipModeMismatch
        );
        require!(!self.skipped, PointsVestingError::AlreadySkipped);
        require!(self.claim_count == 0, PointsVestingError::SkipFrozen);
        let forfeited = self.forfeit()?;
        self.skipped = true;
        Ok(forfeited)
    }

    /// Toggleable opt-out. Returns the new flag and the forfeited balance (zero when
    /// opting back in).
    pub fn toggle_skip(&mut self, mode: SkipMode) -> Result<(bool, u64)> {
        require!(
            mode == SkipMode::Toggleable,
            PointsVestingError::SkipModeMismatch
        );
        require!(self.claim_count == 0, PointsVestingError::SkipFrozen);
        if self.skipped {
            self.skipped = false;
            return Ok((false, 0));
        }
        let forfeited = self.forfeit()?;
        self.skipped = true;
        Ok((true, forfeited))
    }

    fn forfeit(&mut self) -> Result<u64> {
        let amount = self.points_balance;
        require!(amount > 0, PointsVestingError::NothingToForfeit);
        self.points_balance = 0;
        Ok(amount)
    }
}
