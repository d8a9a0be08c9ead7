use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::transfer_token;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/**
 * Account context for depositing into the reserve
 *
 * Anyone may top up the vault; deposits do not touch ledger accounting.
 */
#[event_cpi]
#[derive(Accounts)]
pub struct FundReserve<'info> {
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

    /// Funder's token account the deposit is taken from
    #[account(
        mut,
        token::mint = ledger.token_mint,
        token::authority = funder,
        token::token_program = token_program,
    )]
    pub funder_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        token::token_program = token_program,
        constraint = token_mint.key() == ledger.token_mint @ PointsVestingError::TokenMintMismatch
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    pub funder: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handle_fund_reserve(ctx: Context<FundReserve>, amount: u64) -> Result<()> {
    require!(amount > 0, PointsVestingError::InvalidAmount);

    // Funder signs the transfer, no PDA seeds needed
    transfer_token(
        ctx.accounts.funder.to_account_info(),
        ctx.accounts.funder_token_account.to_account_info(),
        ctx.accounts.token_vault.to_account_info(),
        ctx.accounts.token_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.token_mint.decimals,
        None,
    )?;

    ctx.accounts.token_vault.reload()?;

    emit_cpi!(ReserveFunded {
        ledger: ctx.accounts.ledger.key(),
        funder: ctx.accounts.funder.key(),
        amount,
        reserve_balance: ctx.accounts.token_vault.amount,
    });

    Ok(())
}
