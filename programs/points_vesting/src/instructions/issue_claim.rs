use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;
use crate::state::*;
use crate::constants::*;
use crate::event::*;

/**
 * Account context for converting points into a claim
 *
 * This instruction moves the caller's whole points balance into a new time-locked
 * claim. No tokens move; the reserve balance is only checked.
 *
 * Access Control: The user, for their own account
 *
 * Business Logic:
 * - Fails for skipped users, empty balances and an under-funded reserve
 * - unlock_at = now + the lock period in effect right now, and is never recomputed
 * - The claim lives at id = claim_count, which then increments
 */
#[event_cpi]
#[derive(Accounts)]
pub struct IssueClaim<'info> {
    #[account(
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

    /// The new claim
    /// - Derived from: ["claim", ledger_key, user_key, claim_count]
    #[account(
        init,
        payer = user,
        space = ClaimRecord::LEN,
        seeds = [
            CLAIM_SEED.as_bytes(),
            ledger.key().as_ref(),
            user.key().as_ref(),
            user_state.claim_count.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub claim: Account<'info, ClaimRecord>,

    /// Reserve vault, read for the balance pre-check
    #[account(
        seeds = [VAULT_SEED.as_bytes(), ledger.key().as_ref()],
        bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn apply_issue_claim(
    ledger: &LedgerConfig,
    ledger_key: Pubkey,
    user_state: &mut UserState,
    claim: &mut ClaimRecord,
    reserve_balance: u64,
    now: i64,
    bump: u8,
) -> Result<()> {
    ledger.ensure_active()?;
    user_state.ensure_unlocked()?;

    let unlock_at = ledger.unlock_time(now)?;
    let (claim_id, amount) = user_state.take_for_claim(reserve_balance)?;

    *claim = ClaimRecord {
        ledger: ledger_key,
        owner: user_state.user,
        id: claim_id,
        amount,
        created_at: now,
        unlock_at,
        withdrawn: false,
        withdrawn_at: 0,
        bump,
    };
    Ok(())
}

pub fn handle_issue_claim(ctx: Context<IssueClaim>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let ledger_key = ctx.accounts.ledger.key();
    let reserve_balance = ctx.accounts.token_vault.amount;
    let claim = &mut ctx.accounts.claim;

    // ===== EFFECTS PHASE (State Updates) =====

    // Skip, balance and reserve checks, then move the whole balance into the claim
    // No tokens move at issuance
    apply_issue_claim(
        &ctx.accounts.ledger,
        ledger_key,
        &mut ctx.accounts.user_state,
        claim,
        reserve_balance,
        now,
        ctx.bumps.claim,
    )?;

    // Emit event for off-chain indexing and monitoring
    emit_cpi!(ClaimIssued {
        ledger: ledger_key,
        user: claim.owner,
        claim_id: claim.id,
        amount: claim.amount,
        created_at: claim.created_at,
        unlock_at: claim.unlock_at,
    });

    Ok(())
}
