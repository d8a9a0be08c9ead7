use anchor_lang::prelude::*;
use crate::state::*;
use crate::constants::*;
use crate::event::*;

/**
 * Account context for opting out of claiming
 *
 * Shared by skip (Permanent ledgers) and toggle_skip (Toggleable ledgers).
 *
 * Access Control: The user, for their own account
 *
 * Business Logic:
 * - Opting out forfeits the whole balance and requires it to be non-zero
 * - Once the user has issued a claim, the skip flag can no longer change
 * - Permanent: a skipped user stays skipped
 * - Toggleable: opting back in has no balance precondition
 */
#[event_cpi]
#[derive(Accounts)]
pub struct Skip<'info> {
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

    pub user: Signer<'info>,
}

/// Returns the forfeited balance
pub fn apply_skip(ledger: &mut LedgerConfig, user_state: &mut UserState) -> Result<u64> {
    ledger.ensure_active()?;
    user_state.ensure_unlocked()?;

    let forfeited = user_state.skip(ledger.skip_mode)?;
    ledger.record_forfeit(forfeited)?;
    Ok(forfeited)
}

/// Returns the new flag and the forfeited balance
pub fn apply_toggle_skip(
    ledger: &mut LedgerConfig,
    user_state: &mut UserState,
) -> Result<(bool, u64)> {
    ledger.ensure_active()?;
    user_state.ensure_unlocked()?;

    let (skipped, forfeited) = user_state.toggle_skip(ledger.skip_mode)?;
    ledger.record_forfeit(forfeited)?;
    Ok((skipped, forfeited))
}

pub fn handle_skip(ctx: Context<Skip>) -> Result<()> {
    // Mode, freeze and balance checks; the balance moves into total_forfeited
    let forfeited = apply_skip(&mut ctx.accounts.ledger, &mut ctx.accounts.user_state)?;

    emit_cpi!(UserSkipped {
        ledger: ctx.accounts.ledger.key(),
        user: ctx.accounts.user.key(),
        forfeited,
    });

    Ok(())
}

pub fn handle_toggle_skip(ctx: Context<Skip>) -> Result<()> {
    // Opting back in forfeits nothing and has no balance precondition
    let (skipped, forfeited) =
        apply_toggle_skip(&mut ctx.accounts.ledger, &mut ctx.accounts.user_state)?;

    emit_cpi!(SkipToggled {
        ledger: ctx.accounts.ledger.key(),
        user: ctx.accounts.user.key(),
        skipped,
        forfeited,
    });

    Ok(())
}
