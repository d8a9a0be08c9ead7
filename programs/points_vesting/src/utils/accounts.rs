use anchor_lang::prelude::*;
use anchor_lang::system_program::{create_account, CreateAccount};
use crate::constants::*;
use crate::error::*;
use crate::state::{ClaimRecord, DirectoryEntry, UserState};

/// Deserializes a program-owned account passed outside the typed context
/// (remaining accounts, or addresses that may not exist yet).
pub fn load_account<T: AccountDeserialize + Owner>(info: &AccountInfo) -> Result<T> {
    require_keys_eq!(*info.owner, T::owner(), PointsVestingError::AccountMismatch);
    let data = info.try_borrow_data()?;
    T::try_deserialize(&mut &data[..])
}

/// Writes `value` (discriminator included) back into `info`
pub fn store_account<T: AccountSerialize>(info: &AccountInfo, value: &T) -> Result<()> {
    require!(info.is_writable, PointsVestingError::AccountMismatch);
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    value.try_serialize(&mut writer)
}

/// Creates a rent-exempt account at the PDA described by `seeds` (bump included),
/// owned by this program, and stores `value` in it.
pub fn create_pda_account<'info, T: AccountSerialize>(
    payer: &AccountInfo<'info>,
    target: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    seeds: &[&[u8]],
    space: usize,
    value: &T,
) -> Result<()> {
    let lamports = Rent::get()?.minimum_balance(space);
    create_account(
        CpiContext::new_with_signer(
            system_program.clone(),
            CreateAccount {
                from: payer.clone(),
                to: target.clone(),
            },
            &[seeds],
        ),
        lamports,
        space as u64,
        &crate::ID,
    )?;
    store_account(target, value)
}

pub fn user_state_address(ledger: &Pubkey, user: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[USER_SEED.as_bytes(), ledger.as_ref(), user.as_ref()],
        &crate::ID,
    )
}

pub fn directory_address(ledger: &Pubkey, index: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[DIRECTORY_SEED.as_bytes(), ledger.as_ref(), &index.to_le_bytes()],
        &crate::ID,
    )
}

pub fn claim_address(ledger: &Pubkey, user: &Pubkey, claim_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            CLAIM_SEED.as_bytes(),
            ledger.as_ref(),
            user.as_ref(),
            &claim_id.to_le_bytes(),
        ],
        &crate::ID,
    )
}

/// Creates the directory entry for a newly registered user.
///
/// `target` must be the PDA of `index`, which is the ledger's next free slot.
pub fn create_directory_entry<'info>(
    payer: &AccountInfo<'info>,
    target: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    ledger: &Pubkey,
    index: u64,
    user: &Pubkey,
) -> Result<()> {
    let (expected, bump) = directory_address(ledger, index);
    require_keys_eq!(target.key(), expected, PointsVestingError::AccountMismatch);

    let index_bytes = index.to_le_bytes();
    let seeds: &[&[u8]] = &[
        DIRECTORY_SEED.as_bytes(),
        ledger.as_ref(),
        &index_bytes,
        &[bump],
    ];
    let entry = DirectoryEntry {
        ledger: *ledger,
        index,
        user: *user,
    };
    create_pda_account(payer, target, system_program, seeds, DirectoryEntry::LEN, &entry)
}

/// Loads claim `claim_id` of `user`, rejecting records that belong elsewhere
pub fn load_claim(
    info: &AccountInfo,
    ledger: &Pubkey,
    user: &Pubkey,
    claim_id: u64,
) -> Result<ClaimRecord> {
    let claim: ClaimRecord = load_account(info)?;
    require!(
        claim.matches(ledger, user, claim_id),
        PointsVestingError::AccountMismatch
    );
    Ok(claim)
}

/// Loads every claim of a user from accounts supplied in id order
pub fn load_all_claims(
    infos: &[AccountInfo],
    ledger: &Pubkey,
    user_state: &UserState,
) -> Result<Vec<ClaimRecord>> {
    require!(
        infos.len() as u64 == user_state.claim_count,
        PointsVestingError::AccountMismatch
    );
    infos
        .iter()
        .enumerate()
        .map(|(id, info)| load_claim(info, ledger, &user_state.user, id as u64))
        .collect()
}
