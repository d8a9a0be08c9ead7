use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;
use crate::state::*;
use crate::error::*;
use crate::constants::*;
use crate::utils::load_account;

/**
 * Account context for ledger-wide read-only queries
 *
 * Remaining accounts (get_all_users_status): pairs of (directory entry, user state),
 * directory indices contiguous from `start_index`.
 */
#[derive(Accounts)]
pub struct LedgerView<'info> {
    #[account(
        seeds = [LEDGER_SEED.as_bytes(), ledger.token_mint.as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, LedgerConfig>,

    #[account(
        seeds = [VAULT_SEED.as_bytes(), ledger.key().as_ref()],
        bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ContractStats {
    pub total_distributed: u64,
    pub total_claimed: u64,
    pub total_forfeited: u64,
    /// Current vault balance
    pub reserve_balance: u64,
    pub user_count: u64,
    pub lock_period: i64,
    pub paused: bool,
    pub skip_mode: SkipMode,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserAmount {
    pub user: Pubkey,
    pub amount: u64,
}

/// Users split into two disjoint buckets
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UsersStatus {
    /// Users with at least one completed withdrawal, with their lifetime claimed amount
    pub claimed: Vec<UserAmount>,
    /// Users who never withdrew and hold a non-zero balance, with that balance
    pub pending: Vec<UserAmount>,
}

pub fn contract_stats(ledger: &LedgerConfig, reserve_balance: u64) -> ContractStats {
    ContractStats {
        total_distributed: ledger.total_distributed,
        total_claimed: ledger.total_claimed,
        total_forfeited: ledger.total_forfeited,
        reserve_balance,
        user_count: ledger.user_count,
        lock_period: ledger.lock_period,
        paused: ledger.paused,
        skip_mode: ledger.skip_mode,
    }
}

/// First match wins: a user who has withdrawn before is reported under `claimed` only,
/// even when they hold a fresh balance again.
pub fn build_users_status<'a>(users: impl IntoIterator<Item = &'a UserState>) -> UsersStatus {
    let mut status = UsersStatus::default();
    for state in users {
        if state.total_claimed > 0 {
            status.claimed.push(UserAmount {
                user: state.user,
                amount: state.total_claimed,
            });
        } else if state.points_balance > 0 {
            status.pending.push(UserAmount {
                user: state.user,
                amount: state.points_balance,
            });
        }
    }
    status
}

pub fn handle_get_contract_stats(ctx: Context<LedgerView>) -> Result<ContractStats> {
    Ok(contract_stats(
        &ctx.accounts.ledger,
        ctx.accounts.token_vault.amount,
    ))
}

/// Directory index expected at `offset` within a page starting at `start_index`
pub fn directory_position(start_index: u64, offset: usize) -> Result<u64> {
    u64::try_from(offset)
        .ok()
        .and_then(|offset| start_index.checked_add(offset))
        .ok_or_else(|| error!(PointsVestingError::ArithmeticOverflow))
}

pub fn handle_get_all_users_status(
    ctx: Context<LedgerView>,
    start_index: u64,
) -> Result<UsersStatus> {
    let ledger_key = ctx.accounts.ledger.key();
    require!(
        ctx.remaining_accounts.len() % 2 == 0,
        PointsVestingError::AccountMismatch
    );

    let mut users = Vec::with_capacity(ctx.remaining_accounts.len() / 2);
    for (offset, pair) in ctx.remaining_accounts.chunks(2).enumerate() {
        let index = directory_position(start_index, offset)?;
        let entry: DirectoryEntry = load_account(&pair[0])?;
        let state: UserState = load_account(&pair[1])?;

        // Each pair must be the directory slot at `index` and that user's state
        require!(
            entry.ledger == ledger_key
                && entry.index == index
                && state.ledger == ledger_key
                && state.user == entry.user,
            PointsVestingError::AccountMismatch
        );
        users.push(state);
    }

    Ok(build_users_status(&users))
}
