use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::error::*;
use crate::constants::*;
use crate::event::*;
use crate::utils::transfer_from_vault;

/**
 * Account context for the owner's emergency drain
 *
 * Moves reserve tokens to the owner without touching ledger accounting, so claims
 * issued earlier may become unpayable until the reserve is refunded.
 *
 * Access Control: Only the owner
 *
 * Business Logic:
 * - Callable while paused
 * - amount == 0 drains the whole vault
 */
#[event_cpi]
#[derive(Accounts)]
pub struct EmergencyWithdraw<'info> {
    #[account(
        seeds = [LEDGER_SEED.as_bytes(), ledger.token_mint.as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, LedgerConfig>,

    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), ledger.key().as_ref()],
        bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = ledger.token_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        token::token_program = token_program,
        constraint = token_mint.key() == ledger.token_mint @ PointsVestingError::TokenMintMismatch
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    #[account(constraint = owner.key() == ledger.owner @ PointsVestingError::OnlyOwner)]
    pub owner: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Resolves the requested drain amount against the vault balance
pub fn resolve_drain_amount(requested: u64, reserve_balance: u64) -> Result<u64> {
    let amount = if requested == 0 { reserve_balance } else { requested };
    require!(amount > 0, PointsVestingError::InvalidAmount);
    require!(
        amount <= reserve_balance,
        PointsVestingError::InsufficientReserve
    );
    Ok(amount)
}

pub fn handle_emergency_withdraw(ctx: Context<EmergencyWithdraw>, amount: u64) -> Result<()> {
    // ===== VALIDATION PHASE =====

    // 0 means the whole vault; ledger counters are left untouched
    let amount = resolve_drain_amount(amount, ctx.accounts.token_vault.amount)?;

    // ===== INTERACTIONS PHASE (Token Transfer) =====

    transfer_from_vault(
        ctx.accounts.ledger.to_account_info(),
        &ctx.accounts.ledger,
        ctx.accounts.token_vault.to_account_info(),
        ctx.accounts.owner_token_account.to_account_info(),
        ctx.accounts.token_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.token_mint.decimals,
    )?;

    // Refresh the vault so the event reports the balance left behind
    ctx.accounts.token_vault.reload()?;

    emit_cpi!(EmergencyWithdrawn {
        ledger: ctx.accounts.ledger.key(),
        owner: ctx.accounts.owner.key(),
        amount,
        reserve_balance: ctx.accounts.token_vault.amount,
    });

    Ok(())
}
