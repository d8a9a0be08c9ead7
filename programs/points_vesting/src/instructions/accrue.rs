use anchor_lang::prelude::*;
use crate::state::*;
use crate::error::*;
use crate::constants::*;
use crate::event::*;
use crate::utils::create_directory_entry;

/**
 * Account context for crediting points to one user
 *
 * Access Control: Owner or any admin in the registry
 *
 * Business Logic:
 * - The user's state account is created on first accrual, paid by the authority
 * - A first accrual also appends the user to the directory at index ledger.user_count
 * - Blocked while the ledger is paused
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct Accrue<'info> {
    #[account(
        mut,
        seeds = [LEDGER_SEED.as_bytes(), ledger.token_mint.as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, LedgerConfig>,

    #[account(
        seeds = [ADMIN_SEED.as_bytes(), ledger.key().as_ref()],
        bump,
        constraint = admin_registry.is_authorized(&ledger.owner, &authority.key()) @ PointsVestingError::NotAdmin
    )]
    pub admin_registry: Account<'info, AdminRegistry>,

    /// Points account of the credited user
    /// - Derived from: ["user", ledger_key, user]
    #[account(
        init_if_needed,
        payer = authority,
        space = UserState::LEN,
        seeds = [USER_SEED.as_bytes(), ledger.key().as_ref(), user.as_ref()],
        bump
    )]
    pub user_state: Account<'info, UserState>,

    /// Next free directory slot: ["directory", ledger_key, ledger.user_count]
    /// CHECK: only written when the user is new; the address is re-derived before creation
    #[account(mut)]
    pub directory_entry: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Rejects the null user and zero amounts
pub fn validate_accrual(user: &Pubkey, amount: u64) -> Result<()> {
    require!(*user != Pubkey::default(), PointsVestingError::InvalidUser);
    require!(amount > 0, PointsVestingError::InvalidAmount);
    Ok(())
}

/// Registers an unseen user and returns the directory index it was given
pub fn apply_registration(
    ledger: &mut LedgerConfig,
    user_state: &mut UserState,
    ledger_key: Pubkey,
    user: Pubkey,
    bump: u8,
) -> Result<Option<u64>> {
    if user_state.is_registered() {
        return Ok(None);
    }
    let index = ledger.register_user()?;
    user_state.register(ledger_key, user, index, bump);
    Ok(Some(index))
}

pub fn apply_accrue(
    ledger: &mut LedgerConfig,
    user_state: &mut UserState,
    amount: u64,
) -> Result<()> {
    ledger.ensure_active()?;
    user_state.ensure_unlocked()?;
    user_state.credit(amount)?;
    ledger.record_distribution(amount)
}

pub fn handle_accrue(ctx: Context<Accrue>, user: Pubkey, amount: u64) -> Result<()> {
    let ledger_key = ctx.accounts.ledger.key();
    let ledger = &mut ctx.accounts.ledger;
    let user_state = &mut ctx.accounts.user_state;

    // ===== VALIDATION PHASE =====

    // Reject the null user and zero amounts; authorization ran in the account constraints
    validate_accrual(&user, amount)?;

    // ===== EFFECTS PHASE (State Updates) =====

    // First credit to this user: claim the next directory slot
    if let Some(index) =
        apply_registration(ledger, user_state, ledger_key, user, ctx.bumps.user_state)?
    {
        create_directory_entry(
            &ctx.accounts.authority.to_account_info(),
            &ctx.accounts.directory_entry.to_account_info(),
            &ctx.accounts.system_program.to_account_info(),
            &ledger_key,
            index,
            &user,
        )?;

        emit_cpi!(UserRegistered {
            ledger: ledger_key,
            user,
            index,
        });
    }

    // Pause and guard checks, then credit the balance and total_distributed
    apply_accrue(ledger, user_state, amount)?;

    // Emit event for off-chain indexing and monitoring
    emit_cpi!(PointsAccrued {
        ledger: ledger_key,
        authority: ctx.accounts.authority.key(),
        user,
        amount,
        points_balance: user_state.points_balance,
        total_distributed: ledger.total_distributed,
    });

    Ok(())
}
