use anchor_lang::prelude::*;

/**
 * User directory entry
 *
 * Append-only registry of every user the ledger has ever credited, addressed by a dense
 * index so reporting can walk all users without an off-chain index.
 *
 * Derivation: ["directory", ledger_key, index (u64 LE)]
 *
 * Lifecycle:
 * 1. Created together with the user's UserState on first accrual
 * 2. Never modified or closed
 */
#[account]
#[derive(Default, Debug)]
pub struct DirectoryEntry {
    /// Ledger this entry belongs to
    pub ledger: Pubkey,

    /// Position in the directory
    pub index: u64,

    /// Registered user
    pub user: Pubkey,
}

impl DirectoryEntry {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<DirectoryEntry>();
}
