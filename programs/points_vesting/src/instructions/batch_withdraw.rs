use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::error::*;
use crate::constants::*;
use crate::event::*;
use crate::utils::{load_claim, store_account, transfer_from_vault};

/**
 * Account context for withdrawing several claims at once
 *
 * Remaining accounts: one per claim id, in the same order as `claim_ids`. Slots for ids
 * at or beyond the user's claim_count are never read.
 *
 * Access Control: The claims' owner
 *
 * Business Logic:
 * - Best effort: unknown, already withdrawn, still locked and repeated ids are skipped
 *   without error; callers re-query to learn which ids went through
 * - Withdrawn claims are paid with a single reserve transfer
 * - Structural problems (pause, guard, account list, transfer) still fail the call
 */
#[event_cpi]
#[derive(Accounts)]
pub struct BatchWithdraw<'info> {
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

    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), ledger.key().as_ref()],
        bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

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

/// One claim paid out by a batch, with the running totals right after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawnClaim {
    /// Position in the submitted id list
    pub index: usize,
    pub claim_id: u64,
    pub amount: u64,
    pub user_total_claimed: u64,
    pub total_claimed: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub withdrawn: Vec<WithdrawnClaim>,
    /// Sum to transfer from the reserve
    pub total: u64,
}

impl BatchOutcome {
    pub fn withdrawn_ids(&self) -> Vec<u64> {
        self.withdrawn.iter().map(|w| w.claim_id).collect()
    }

    fn contains(&self, claim_id: u64) -> bool {
        self.withdrawn.iter().any(|w| w.claim_id == claim_id)
    }
}

/// Applies the withdraw effect to every eligible claim.
///
/// `claims[i]` is the loaded record for `claim_ids[i]`, `None` where the id is unknown.
pub fn apply_batch_withdraw(
    ledger: &mut LedgerConfig,
    user_state: &mut UserState,
    claim_ids: &[u64],
    claims: &mut [Option<ClaimRecord>],
    now: i64,
) -> Result<BatchOutcome> {
    ledger.ensure_active()?;
    user_state.ensure_unlocked()?;
    require!(
        claim_ids.len() == claims.len(),
        PointsVestingError::LengthMismatch
    );
    require!(
        claim_ids.len() <= MAX_BATCH_SIZE,
        PointsVestingError::BatchTooLarge
    );

    let mut outcome = BatchOutcome::default();
    for (index, (&claim_id, slot)) in claim_ids.iter().zip(claims.iter_mut()).enumerate() {
        if claim_id >= user_state.claim_count || outcome.contains(claim_id) {
            continue;
        }
        let Some(claim) = slot.as_mut() else {
            continue;
        };
        if !claim.is_withdrawable(now) {
            continue;
        }

        let amount = claim.mark_withdrawn(now)?;
        user_state.record_withdrawal(amount)?;
        ledger.record_withdrawal(amount)?;
        outcome.total = outcome
            .total
            .checked_add(amount)
            .ok_or(PointsVestingError::ArithmeticOverflow)?;
        outcome.withdrawn.push(WithdrawnClaim {
            index,
            claim_id,
            amount,
            user_total_claimed: user_state.total_claimed,
            total_claimed: ledger.total_claimed,
        });
    }
    Ok(outcome)
}

pub fn handle_batch_withdraw<'info>(
    ctx: Context<'_, '_, '_, 'info, BatchWithdraw<'info>>,
    claim_ids: Vec<u64>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let ledger_key = ctx.accounts.ledger.key();
    let user_key = ctx.accounts.user.key();

    // ===== VALIDATION PHASE =====

    // One remaining account per submitted id
    require!(
        ctx.remaining_accounts.len() == claim_ids.len(),
        PointsVestingError::AccountMismatch
    );

    // Load issued claims; unknown ids stay None and are skipped below
    let claim_count = ctx.accounts.user_state.claim_count;
    let mut claims = claim_ids
        .iter()
        .zip(ctx.remaining_accounts)
        .map(|(&claim_id, info)| {
            if claim_id < claim_count {
                load_claim(info, &ledger_key, &user_key, claim_id).map(Some)
            } else {
                Ok(None)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    // ===== EFFECTS PHASE (State Updates) =====

    // Mark every eligible claim withdrawn and sum the payout
    let outcome = apply_batch_withdraw(
        &mut ctx.accounts.ledger,
        &mut ctx.accounts.user_state,
        &claim_ids,
        &mut claims,
        now,
    )?;

    let skipped = claim_ids.len() - outcome.withdrawn.len();
    if skipped > 0 {
        msg!("Skipped {} of {} claim ids", skipped, claim_ids.len());
    }

    // Nothing eligible: no transfer, only the summary event
    if outcome.total > 0 {
        // Check vault covers the summed payout before proceeding
        require!(
            ctx.accounts.token_vault.amount >= outcome.total,
            PointsVestingError::InsufficientReserve
        );

        // Persist the withdrawn claims, then the guard and counters
        for withdrawn in &outcome.withdrawn {
            if let Some(claim) = &claims[withdrawn.index] {
                store_account(&ctx.remaining_accounts[withdrawn.index], claim)?;
            }
        }
        ctx.accounts.user_state.lock()?;
        ctx.accounts.user_state.exit(&crate::ID)?;
        ctx.accounts.ledger.exit(&crate::ID)?;

        // ===== INTERACTIONS PHASE (Token Transfer) =====

        // Single transfer for the whole batch
        transfer_from_vault(
            ctx.accounts.ledger.to_account_info(),
            &ctx.accounts.ledger,
            ctx.accounts.token_vault.to_account_info(),
            ctx.accounts.user_token_account.to_account_info(),
            ctx.accounts.token_mint.to_account_info(),
            ctx.accounts.token_program.to_account_info(),
            outcome.total,
            ctx.accounts.token_mint.decimals,
        )?;

        ctx.accounts.user_state.unlock();
    }

    // One event per withdrawn claim, carrying the running totals at that point
    for withdrawn in &outcome.withdrawn {
        emit_cpi!(ClaimWithdrawn {
            ledger: ledger_key,
            user: user_key,
            claim_id: withdrawn.claim_id,
            amount: withdrawn.amount,
            user_total_claimed: withdrawn.user_total_claimed,
            total_claimed: withdrawn.total_claimed,
        });
    }

    // Summary so callers can learn which ids went through
    emit_cpi!(BatchWithdrawn {
        ledger: ledger_key,
        user: user_key,
        requested: claim_ids.len() as u32,
        withdrawn_ids: outcome.withdrawn_ids(),
        amount: outcome.total,
    });

    Ok(())
}
