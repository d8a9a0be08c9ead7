use anchor_lang::prelude::*;
use crate::state::*;
use crate::error::*;
use crate::constants::*;
use crate::event::*;

/**
 * Account context for owner configuration
 *
 * Shared by update_lock_period, pause and unpause.
 *
 * Access Control: Only the owner
 *
 * Business Logic:
 * - The lock period is bounded to [MIN_LOCK_PERIOD, MAX_LOCK_PERIOD]
 * - A new lock period only applies to claims issued afterwards
 * - Pausing blocks new mutating calls, completed ones stay as they are
 */
#[event_cpi]
#[derive(Accounts)]
pub struct Configure<'info> {
    #[account(
        mut,
        seeds = [LEDGER_SEED.as_bytes(), ledger.token_mint.as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, LedgerConfig>,

    #[account(constraint = owner.key() == ledger.owner @ PointsVestingError::OnlyOwner)]
    pub owner: Signer<'info>,
}

pub fn handle_update_lock_period(ctx: Context<Configure>, lock_period: i64) -> Result<()> {
    let ledger = &mut ctx.accounts.ledger;
    let old_lock_period = ledger.lock_period;
    ledger.set_lock_period(lock_period)?;

    emit_cpi!(LockPeriodUpdated {
        ledger: ledger.key(),
        old_lock_period,
        new_lock_period: lock_period,
    });

    Ok(())
}

pub fn handle_set_paused(ctx: Context<Configure>, paused: bool) -> Result<()> {
    let ledger = &mut ctx.accounts.ledger;
    ledger.set_paused(paused)?;

    emit_cpi!(PauseChanged {
        ledger: ledger.key(),
        paused,
    });

    Ok(())
}
