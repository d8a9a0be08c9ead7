use anchor_lang::prelude::*;
use crate::state::*;
use crate::constants::*;
use crate::utils::load_all_claims;

/**
 * Account context for per-user read-only queries
 *
 * Remaining accounts (get_pending / get_withdrawable): every claim PDA of the user,
 * ids 0..claim_count in order. Cost is linear in the user's claim count.
 */
#[derive(Accounts)]
pub struct UserView<'info> {
    #[account(
        seeds = [LEDGER_SEED.as_bytes(), ledger.token_mint.as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, LedgerConfig>,

    #[account(
        seeds = [USER_SEED.as_bytes(), ledger.key().as_ref(), user_state.user.as_ref()],
        bump = user_state.bump
    )]
    pub user_state: Account<'info, UserState>,
}

/// Unwithdrawn claim as reported by get_pending
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PendingClaim {
    pub claim_id: u64,
    pub amount: u64,
    pub created_at: i64,
    pub unlock_at: i64,
    /// now >= unlock_at
    pub withdrawable: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserInfo {
    pub user: Pubkey,
    pub points_balance: u64,
    pub claim_count: u64,
    pub total_claimed: u64,
    pub skipped: bool,
}

pub fn pending_claims(claims: &[ClaimRecord], now: i64) -> Vec<PendingClaim> {
    claims
        .iter()
        .filter(|claim| !claim.withdrawn)
        .map(|claim| PendingClaim {
            claim_id: claim.id,
            amount: claim.amount,
            created_at: claim.created_at,
            unlock_at: claim.unlock_at,
            withdrawable: claim.is_withdrawable(now),
        })
        .collect()
}

pub fn withdrawable_ids(claims: &[ClaimRecord], now: i64) -> Vec<u64> {
    claims
        .iter()
        .filter(|claim| claim.is_withdrawable(now))
        .map(|claim| claim.id)
        .collect()
}

impl From<&UserState> for UserInfo {
    fn from(state: &UserState) -> Self {
        Self {
            user: state.user,
            points_balance: state.points_balance,
            claim_count: state.claim_count,
            total_claimed: state.total_claimed,
            skipped: state.skipped,
        }
    }
}

pub fn handle_get_pending(ctx: Context<UserView>) -> Result<Vec<PendingClaim>> {
    let now = Clock::get()?.unix_timestamp;
    let claims = load_all_claims(
        ctx.remaining_accounts,
        &ctx.accounts.ledger.key(),
        &ctx.accounts.user_state,
    )?;
    Ok(pending_claims(&claims, now))
}

pub fn handle_get_withdrawable(ctx: Context<UserView>) -> Result<Vec<u64>> {
    let now = Clock::get()?.unix_timestamp;
    let claims = load_all_claims(
        ctx.remaining_accounts,
        &ctx.accounts.ledger.key(),
        &ctx.accounts.user_state,
    )?;
    Ok(withdrawable_ids(&claims, now))
}

pub fn handle_get_user_info(ctx: Context<UserView>) -> Result<UserInfo> {
    let user_state: &UserState = &ctx.accounts.user_state;
    Ok(UserInfo::from(user_state))
}
