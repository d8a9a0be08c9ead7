use anchor_lang::prelude::*;

/**
 * Program Constants
 *
 * Timing bounds, batch limits and PDA seeds used throughout the points vesting program.
 */

/// ===== TIMING CONSTANTS =====

/// One day in seconds
#[constant]
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Shortest lock period the owner may configure (1 day)
#[constant]
pub const MIN_LOCK_PERIOD: i64 = SECONDS_PER_DAY;

/// Longest lock period the owner may configure (365 days)
#[constant]
pub const MAX_LOCK_PERIOD: i64 = 365 * SECONDS_PER_DAY;

/// Lock period used when the ledger is initialized without an explicit value (14 days)
#[constant]
pub const DEFAULT_LOCK_PERIOD: i64 = 14 * SECONDS_PER_DAY;

/// ===== CAPACITY CONSTANTS =====

/// Upper bound of the admin set
/// - The registry account is allocated once with room for this many keys
pub const MAX_ADMINS: usize = 16;

/// Upper bound on items in a single batch instruction
/// - Keeps batch_accrue / batch_withdraw inside one transaction's account limit
pub const MAX_BATCH_SIZE: usize = 20;

/// ===== PDA SEED CONSTANTS =====

/// Seed for the ledger config PDA
/// - Used in: ["ledger", token_mint]
/// - One ledger per reserve token mint
#[constant]
pub const LEDGER_SEED: &str = "ledger";

/// Seed for the admin registry PDA
/// - Used in: ["admins", ledger]
#[constant]
pub const ADMIN_SEED: &str = "admins";

/// Seed for the reserve vault PDA
/// - Used in: ["vault", ledger]
/// - Token account whose authority is the ledger PDA
#[constant]
pub const VAULT_SEED: &str = "vault";

/// Seed for per-user state PDAs
/// - Used in: ["user", ledger, user]
#[constant]
pub const USER_SEED: &str = "user";

/// Seed for claim PDAs
/// - Used in: ["claim", ledger, user, claim_id (u64 LE)]
/// - Claim ids are dense and never reused, so every claim lives at a fresh address
#[constant]
pub const CLAIM_SEED: &str = "claim";

/// Seed for user directory PDAs
/// - Used in: ["directory", ledger, index (u64 LE)]
#[constant]
pub const DIRECTORY_SEED: &str = "directory";
