use anchor_lang::prelude::*;
use crate::state::*;
use crate::error::*;
use crate::constants::*;
use crate::event::*;
use crate::instructions::accrue::{apply_accrue, apply_registration, validate_accrual};
use crate::utils::*;

/**
 * Account context for crediting points to several users at once
 *
 * Access Control: Owner or any admin in the registry
 *
 * Remaining accounts, two per (user, amount) pair in order:
 * 1. the user's state PDA ["user", ledger_key, user] (writable, may not exist yet)
 * 2. a directory slot (writable); for a user new to the ledger this must be
 *    ["directory", ledger_key, n] where n counts registrations so far including earlier
 *    pairs of this batch, for known users it is ignored
 *
 * Business Logic:
 * - Every pair is validated before any is applied; one bad pair fails the whole batch
 * - Pairs are applied in order, repeated users accumulate
 */
#[event_cpi]
#[derive(Accounts)]
pub struct BatchAccrue<'info> {
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

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Shape and content checks for a batch, run before anything is applied
pub fn validate_batch(users: &[Pubkey], amounts: &[u64]) -> Result<()> {
    require!(
        users.len() == amounts.len(),
        PointsVestingError::LengthMismatch
    );
    require!(!users.is_empty(), PointsVestingError::EmptyBatch);
    require!(
        users.len() <= MAX_BATCH_SIZE,
        PointsVestingError::BatchTooLarge
    );
    for (user, amount) in users.iter().zip(amounts) {
        validate_accrual(user, *amount)?;
    }
    Ok(())
}

pub fn handle_batch_accrue<'info>(
    ctx: Context<'_, '_, '_, 'info, BatchAccrue<'info>>,
    users: Vec<Pubkey>,
    amounts: Vec<u64>,
) -> Result<()> {
    // ===== VALIDATION PHASE =====

    // Paused ledgers reject the batch before any pair is looked at
    ctx.accounts.ledger.ensure_active()?;

    // Validate every pair before anything is applied
    validate_batch(&users, &amounts)?;

    // Two remaining accounts per pair: user state PDA, directory slot
    require!(
        ctx.remaining_accounts.len() == users.len() * 2,
        PointsVestingError::AccountMismatch
    );

    // ===== EFFECTS PHASE (State Updates) =====

    let ledger_key = ctx.accounts.ledger.key();
    let authority_key = ctx.accounts.authority.key();
    let payer = ctx.accounts.authority.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();

    for (i, (user, amount)) in users.iter().zip(amounts.iter()).enumerate() {
        let state_info = &ctx.remaining_accounts[2 * i];
        let slot_info = &ctx.remaining_accounts[2 * i + 1];

        // The state account must be this user's PDA
        let (expected, bump) = user_state_address(&ledger_key, user);
        require_keys_eq!(state_info.key(), expected, PointsVestingError::AccountMismatch);

        // A system-owned address means the user has never been credited
        let mut user_state = if *state_info.owner == crate::ID {
            load_account::<UserState>(state_info)?
        } else {
            UserState::default()
        };

        let registered = apply_registration(
            &mut ctx.accounts.ledger,
            &mut user_state,
            ledger_key,
            *user,
            bump,
        )?;
        apply_accrue(&mut ctx.accounts.ledger, &mut user_state, *amount)?;

        // New users get their state account and directory slot created here,
        // known users are written back in place
        match registered {
            Some(index) => {
                let seeds: &[&[u8]] = &[
                    USER_SEED.as_bytes(),
                    ledger_key.as_ref(),
                    user.as_ref(),
                    &[bump],
                ];
                create_pda_account(
                    &payer,
                    state_info,
                    &system_program,
                    seeds,
                    UserState::LEN,
                    &user_state,
                )?;
                create_directory_entry(
                    &payer,
                    slot_info,
                    &system_program,
                    &ledger_key,
                    index,
                    user,
                )?;

                emit_cpi!(UserRegistered {
                    ledger: ledger_key,
                    user: *user,
                    index,
                });
            }
            None => store_account(state_info, &user_state)?,
        }

        // One event per pair, as for a single accrue
        emit_cpi!(PointsAccrued {
            ledger: ledger_key,
            authority: authority_key,
            user: *user,
            amount: *amount,
            points_balance: user_state.points_balance,
            total_distributed: ctx.accounts.ledger.total_distributed,
        });
    }

    Ok(())
}
