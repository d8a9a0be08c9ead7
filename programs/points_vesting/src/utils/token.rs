use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, TransferChecked};
use crate::constants::*;
use crate::error::*;
use crate::state::LedgerConfig;

/// Universal token transfer function that supports both SPL Token and Token 2022
pub fn transfer_token<'a>(
    authority: AccountInfo<'a>,
    from: AccountInfo<'a>,
    to: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    decimals: u8,
    signer_seeds: Option<&[&[&[u8]]]>,
) -> Result<()> {
    let cpi_accounts = TransferChecked {
        from,
        mint,
        to,
        authority,
    };

    let cpi_ctx = if let Some(seeds) = signer_seeds {
        CpiContext::new_with_signer(token_program, cpi_accounts, seeds)
    } else {
        CpiContext::new(token_program, cpi_accounts)
    };

    transfer_checked(cpi_ctx, amount, decimals)
}

/// Pays `amount` out of the reserve vault, signing as the ledger PDA.
///
/// Any failure surfaces as `ExternalTransferFailed`; the caller's earlier writes are
/// discarded with the rest of the transaction.
pub fn transfer_from_vault<'a>(
    ledger_info: AccountInfo<'a>,
    ledger: &LedgerConfig,
    vault: AccountInfo<'a>,
    to: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    decimals: u8,
) -> Result<()> {
    let bump = [ledger.bump];
    let seeds: &[&[u8]] = &[LEDGER_SEED.as_bytes(), ledger.token_mint.as_ref(), &bump];
    let signer = &[seeds];

    transfer_token(
        ledger_info,
        vault,
        to,
        mint,
        token_program,
        amount,
        decimals,
        Some(signer),
    )
    .map_err(|err| {
        msg!("Reserve transfer of {} failed: {}", amount, err);
        error!(PointsVestingError::ExternalTransferFailed)
    })
}
