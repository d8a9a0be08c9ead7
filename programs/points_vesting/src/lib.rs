use anchor_lang::prelude::*;

declare_id!("GU1LHDvTekfgJYfLJQZWKsBiu5X5eabwmz4cVWjLrBZL");

pub mod constants;
pub mod error;
pub mod event;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test;

use instructions::*;
use state::SkipMode;

/**
 * Points Vesting Program
 *
 * A Solana program in which admins credit non-transferable points to users, users
 * convert their points into time-locked claims, and unlocked claims are paid out of a
 * token reserve.
 *
 * Key Features:
 * - Owner plus an enumerable admin set for crediting points (single or batch)
 * - Claims snapshot the lock period at issuance; later changes only affect new claims
 * - Single and best-effort batch withdrawal with a per-user reentrancy guard
 * - Opt-out ("skip") as either a permanent forfeit or a toggle, chosen per ledger
 * - Global pause and an owner-only emergency drain of the reserve
 * - Read-only views for pending claims and aggregate reporting
 * - Support for both SPL Token and Token 2022 reserves
 *
 * Architecture:
 * - Ledger PDA: role state, lock period, skip mode and global counters
 * - Admin Registry PDA: admin keys
 * - Token Vault PDA: reserve backing withdrawals
 * - User State PDAs: balance, claim counter, lifetime claimed, skip flag
 * - Claim PDAs: one per (user, sequential id)
 * - Directory PDAs: dense index of every user ever credited
 *
 * Workflow:
 * 1. Owner initializes the ledger and funds the reserve
 * 2. Admins accrue points to users
 * 3. Users issue claims, which lock for the configured period
 * 4. Users withdraw unlocked claims from the reserve
 */
#[program]
pub mod points_vesting {
    use super::*;

    /**
     * Creates the ledger, admin registry and reserve vault for a token mint
     *
     * @param lock_period - Lock period in seconds for new claims (default 14 days)
     * @param skip_mode - Permanent or Toggleable opt-out, fixed for the ledger's lifetime
     *
     * Access Control: Signer becomes the owner
     */
    pub fn initialize(
        ctx: Context<Initialize>,
        lock_period: Option<i64>,
        skip_mode: SkipMode,
    ) -> Result<()> {
        handle_initialize(ctx, lock_period, skip_mode)
    }

    /**
     * Deposits tokens into the reserve vault
     *
     * Access Control: Anyone
     */
    pub fn fund_reserve(ctx: Context<FundReserve>, amount: u64) -> Result<()> {
        handle_fund_reserve(ctx, amount)
    }

    /**
     * Adds an account to the admin set
     *
     * Access Control: Owner only
     */
    pub fn add_admin(ctx: Context<ManageAdmins>, admin: Pubkey) -> Result<()> {
        handle_add_admin(ctx, admin)
    }

    /**
     * Removes an account from the admin set
     *
     * Access Control: Owner only
     * Note: The owner stays authorized even if its own key is removed
     */
    pub fn remove_admin(ctx: Context<ManageAdmins>, admin: Pubkey) -> Result<()> {
        handle_remove_admin(ctx, admin)
    }

    /**
     * Sets the lock period applied to claims issued from now on
     *
     * @param lock_period - Seconds, between 1 and 365 days inclusive
     *
     * Access Control: Owner only
     */
    pub fn update_lock_period(ctx: Context<Configure>, lock_period: i64) -> Result<()> {
        handle_update_lock_period(ctx, lock_period)
    }

    /**
     * Blocks accrual, issuance, withdrawal and skip
     *
     * Access Control: Owner only
     */
    pub fn pause(ctx: Context<Configure>) -> Result<()> {
        handle_set_paused(ctx, true)
    }

    /**
     * Lifts the pause
     *
     * Access Control: Owner only
     */
    pub fn unpause(ctx: Context<Configure>) -> Result<()> {
        handle_set_paused(ctx, false)
    }

    /**
     * Credits points to a user, registering the user on first credit
     *
     * Access Control: Owner or admin
     */
    pub fn accrue(ctx: Context<Accrue>, user: Pubkey, amount: u64) -> Result<()> {
        handle_accrue(ctx, user, amount)
    }

    /**
     * Credits points to several users; all pairs succeed or none do
     *
     * Access Control: Owner or admin
     */
    pub fn batch_accrue<'info>(
        ctx: Context<'_, '_, '_, 'info, BatchAccrue<'info>>,
        users: Vec<Pubkey>,
        amounts: Vec<u64>,
    ) -> Result<()> {
        handle_batch_accrue(ctx, users, amounts)
    }

    /**
     * Converts the caller's whole points balance into a time-locked claim
     *
     * Access Control: User, own account
     */
    pub fn issue_claim(ctx: Context<IssueClaim>) -> Result<()> {
        handle_issue_claim(ctx)
    }

    /**
     * Pays out one unlocked claim
     *
     * Access Control: User, own claims
     */
    pub fn withdraw(ctx: Context<WithdrawClaim>, claim_id: u64) -> Result<()> {
        handle_withdraw(ctx, claim_id)
    }

    /**
     * Pays out every eligible claim among `claim_ids`, skipping the rest silently
     *
     * Access Control: User, own claims
     */
    pub fn batch_withdraw<'info>(
        ctx: Context<'_, '_, '_, 'info, BatchWithdraw<'info>>,
        claim_ids: Vec<u64>,
    ) -> Result<()> {
        handle_batch_withdraw(ctx, claim_ids)
    }

    /**
     * Permanently opts out of claiming, forfeiting the current balance
     *
     * Access Control: User, own account (Permanent ledgers)
     */
    pub fn skip(ctx: Context<Skip>) -> Result<()> {
        handle_skip(ctx)
    }

    /**
     * Flips the caller's opt-out flag; opting out forfeits the current balance
     *
     * Access Control: User, own account (Toggleable ledgers)
     */
    pub fn toggle_skip(ctx: Context<Skip>) -> Result<()> {
        handle_toggle_skip(ctx)
    }

    /**
     * Moves reserve tokens to the owner outside ledger bookkeeping
     *
     * @param amount - Tokens to move, 0 for the whole vault
     *
     * Access Control: Owner only, available while paused
     */
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>, amount: u64) -> Result<()> {
        handle_emergency_withdraw(ctx, amount)
    }

    /// Unwithdrawn claims of a user with their withdrawable flag
    pub fn get_pending(ctx: Context<UserView>) -> Result<Vec<PendingClaim>> {
        handle_get_pending(ctx)
    }

    /// Ids of a user's claims that can be withdrawn now
    pub fn get_withdrawable(ctx: Context<UserView>) -> Result<Vec<u64>> {
        handle_get_withdrawable(ctx)
    }

    pub fn get_user_info(ctx: Context<UserView>) -> Result<UserInfo> {
        handle_get_user_info(ctx)
    }

    /// Global counters and the current reserve balance
    pub fn get_contract_stats(ctx: Context<LedgerView>) -> Result<ContractStats> {
        handle_get_contract_stats(ctx)
    }

    /// Claimed / pending buckets for a contiguous slice of the user directory
    pub fn get_all_users_status(
        ctx: Context<LedgerView>,
        start_index: u64,
    ) -> Result<UsersStatus> {
        handle_get_all_users_status(ctx, start_index)
    }
}
