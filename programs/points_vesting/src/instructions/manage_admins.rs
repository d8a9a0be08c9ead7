use anchor_lang::prelude::*;
use crate::state::*;
use crate::error::*;
use crate::constants::*;
use crate::event::*;

/**
 * Account context for admin set maintenance
 *
 * Shared by add_admin and remove_admin.
 *
 * Access Control: Only the owner can change the admin set
 *
 * Business Logic:
 * - The null key can never become an admin
 * - Adding an existing admin or removing a missing one fails
 * - Removing the owner's own key leaves the owner authorized
 * - Allowed while paused
 */
#[event_cpi]
#[derive(Accounts)]
pub struct ManageAdmins<'info> {
    #[account(
        seeds = [LEDGER_SEED.as_bytes(), ledger.token_mint.as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, LedgerConfig>,

    #[account(
        mut,
        seeds = [ADMIN_SEED.as_bytes(), ledger.key().as_ref()],
        bump
    )]
    pub admin_registry: Account<'info, AdminRegistry>,

    #[account(constraint = owner.key() == ledger.owner @ PointsVestingError::OnlyOwner)]
    pub owner: Signer<'info>,
}

pub fn handle_add_admin(ctx: Context<ManageAdmins>, admin: Pubkey) -> Result<()> {
    ctx.accounts.admin_registry.add(admin)?;

    emit_cpi!(AdminAdded {
        ledger: ctx.accounts.ledger.key(),
        admin,
    });

    Ok(())
}

pub fn handle_remove_admin(ctx: Context<ManageAdmins>, admin: Pubkey) -> Result<()> {
    ctx.accounts.admin_registry.remove(&admin)?;

    emit_cpi!(AdminRemoved {
        ledger: ctx.accounts.ledger.key(),
        admin,
    });

    Ok(())
}
