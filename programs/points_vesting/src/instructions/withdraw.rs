use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::error::*;
use crate::constants::*;
use crate::event::*;
use crate::utils::{load_claim, store_account, transfer_from_vault};

/**
 * Account context for withdrawing one claim
 *
 * This instruction pays out an unlocked claim from the reserve vault to the user.
 *
 * Access Control: The claim's owner
 *
 * Business Logic:
 * - Unknown ids fail with ClaimNotFound, withdrawn ones with AlreadyWithdrawn,
 *   locked ones with ClaimLocked
 * - Ledger effects are written and the user's guard is held before the transfer
 * - A failed transfer reverts the whole instruction
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(claim_id: u64)]
pub struct WithdrawClaim<'info> {
    #[account(
        mut,
        seeds = [LEDGER_SEED.as_bytes(), ledger.token_mint.as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, LedgerConfig>,

    #[account(
        mut,
        seeds = [USER_SEED.as_bytes(), ledger.key().as_ref(), user.key().as_ref()],
        bump = user_state.bump
    )]
    pub user_state: Account<'info, UserState>,

    /// Claim being withdrawn: ["claim", ledger_key, user_key, claim_id]
    /// CHECK: may not exist for an unknown id; deserialized after the id is checked
    #[account(
        mut,
        seeds = [
            CLAIM_SEED.as_bytes(),
            ledger.key().as_ref(),
            user.key().as_ref(),
            claim_id.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub claim: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), ledger.key().as_ref()],
        bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// User's token account receiving the payout
    #[account(
        mut,
        token::mint = ledger.token_mint,
        token::authority = user,
        token::token_program = token_program,
    )]
    pub user_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        token::token_program = token_program,
        constraint = token_mint.key() == ledger.token_mint @ PointsVestingError::TokenMintMismatch
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    pub user: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Withdrawable -> Withdrawn plus counter updates. Returns the payout amount.
///
/// The caller has already checked `claim.id` against the user's claim_count.
pub fn apply_withdraw(
    ledger: &mut LedgerConfig,
    user_state: &mut UserState,
    claim: &mut ClaimRecord,
    now: i64,
) -> Result<u64> {
    ledger.ensure_active()?;
    user_state.ensure_unlocked()?;

    let amount = claim.mark_withdrawn(now)?;
    user_state.record_withdrawal(amount)?;
    ledger.record_withdrawal(amount)?;
    Ok(amount)
}

pub fn ensure_claim_exists(user_state: &UserState, claim_id: u64) -> Result<()> {
    require!(
        claim_id < user_state.claim_count,
        PointsVestingError::ClaimNotFound
    );
    Ok(())
}

pub fn handle_withdraw(ctx: Context<WithdrawClaim>, claim_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let ledger_key = ctx.accounts.ledger.key();
    let user_key = ctx.accounts.user.key();
    let claim_info = ctx.accounts.claim.to_account_info();

    // ===== VALIDATION PHASE =====

    // Ids at or beyond claim_count were never issued, so their PDA is empty
    ensure_claim_exists(&ctx.accounts.user_state, claim_id)?;

    // Deserialize the claim and check it is this user's record for this id
    let mut claim = load_claim(&claim_info, &ledger_key, &user_key, claim_id)?;

    // ===== EFFECTS PHASE (State Updates) =====

    // Pause, guard and claim phase checks, then the withdrawn flag and both totals
    let amount = apply_withdraw(
        &mut ctx.accounts.ledger,
        &mut ctx.accounts.user_state,
        &mut claim,
        now,
    )?;

    // The vault may have been drained by an emergency withdrawal since issuance
    require!(
        ctx.accounts.token_vault.amount >= amount,
        PointsVestingError::InsufficientReserve
    );

    // Persist effects and the guard before control leaves the program
    store_account(&claim_info, &claim)?;
    ctx.accounts.user_state.lock()?;
    ctx.accounts.user_state.exit(&crate::ID)?;
    ctx.accounts.ledger.exit(&crate::ID)?;

    // ===== INTERACTIONS PHASE (Token Transfer) =====

    // Pay out from the vault, signed by the ledger PDA
    transfer_from_vault(
        ctx.accounts.ledger.to_account_info(),
        &ctx.accounts.ledger,
        ctx.accounts.token_vault.to_account_info(),
        ctx.accounts.user_token_account.to_account_info(),
        ctx.accounts.token_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.token_mint.decimals,
    )?;

    // Release the guard; Anchor writes user_state back on exit
    ctx.accounts.user_state.unlock();

    // Emit event for off-chain indexing and monitoring
    emit_cpi!(ClaimWithdrawn {
        ledger: ledger_key,
        user: user_key,
        claim_id,
        amount,
        user_total_claimed: ctx.accounts.user_state.total_claimed,
        total_claimed: ctx.accounts.ledger.total_claimed,
    });

    Ok(())
}
