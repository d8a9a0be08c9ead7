use crate::constants::*;
use crate::event::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/**
 * Account context for initializing a ledger
 *
 * This instruction creates the ledger for one reserve mint:
 * - Creates the ledger config PDA holding role state and global counters
 * - Creates the admin registry PDA (empty; the owner is implicitly authorized)
 * - Creates the reserve vault PDA whose token authority is the ledger PDA
 *
 * Access Control: The signer becomes the owner
 */
#[event_cpi]
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The ledger config account (PDA)
    /// - Derived from: ["ledger", token_mint]
    #[account(
        init,
        payer = owner,
        space = LedgerConfig::LEN,
        seeds = [LEDGER_SEED.as_bytes(), token_mint.key().as_ref()],
        bump
    )]
    pub ledger: Account<'info, LedgerConfig>,

    /// Admin registry for this ledger
    /// - Derived from: ["admins", ledger_key]
    #[account(
        init,
        payer = owner,
        space = AdminRegistry::LEN,
        seeds = [ADMIN_SEED.as_bytes(), ledger.key().as_ref()],
        bump
    )]
    pub admin_registry: Account<'info, AdminRegistry>,

    /// Reserve vault backing withdrawals
    /// - Derived from: ["vault", ledger_key]
    #[account(
        init,
        token::mint = token_mint,
        token::authority = ledger,
        token::token_program = token_program,
        seeds = [VAULT_SEED.as_bytes(), ledger.key().as_ref()],
        bump,
        payer = owner,
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// The reserve token mint
    /// - Supports both SPL Token and Token 2022 programs
    #[account(
        token::token_program = token_program,
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// The owner of the ledger
    #[account(mut)]
    pub owner: Signer<'info>,

    /// System program for account creation
    pub system_program: Program<'info, System>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Initializes a ledger
 *
 * @param ctx - The account context containing all required accounts
 * @param lock_period - Lock period for new claims in seconds, DEFAULT_LOCK_PERIOD when None
 * @param skip_mode - Opt-out strategy, fixed for the lifetime of the ledger
 */
pub fn handle_initialize(
    ctx: Context<Initialize>,
    lock_period: Option<i64>,
    skip_mode: SkipMode,
) -> Result<()> {
    let ledger = &mut ctx.accounts.ledger;

    ledger.set_lock_period(lock_period.unwrap_or(DEFAULT_LOCK_PERIOD))?;
    ledger.bump = ctx.bumps.ledger;
    ledger.owner = ctx.accounts.owner.key();
    ledger.token_mint = ctx.accounts.token_mint.key();
    ledger.token_vault = ctx.accounts.token_vault.key();
    ledger.skip_mode = skip_mode;
    // Note: counters, paused and user_count use default values (0 / false)

    ctx.accounts.admin_registry.ledger = ledger.key();

    emit_cpi!(LedgerInitialized {
        ledger: ledger.key(),
        owner: ledger.owner,
        token_mint: ledger.token_mint,
        token_vault: ledger.token_vault,
        lock_period: ledger.lock_period,
        skip_mode,
    });

    Ok(())
}
