use anchor_lang::prelude::*;
use crate::error::*;

/// Where a claim sits in its lifecycle at a given time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimPhase {
    Pending,
    Withdrawable,
    Withdrawn,
}

/**
 * Time-locked claim
 *
 * Snapshot of a user's whole points balance at issuance, payable from the reserve once
 * unlock_at has passed.
 *
 * Derivation: ["claim", ledger_key, user_key, id (u64 LE)]
 *
 * Lifecycle:
 * 1. Created by issue_claim at id = user's claim_count
 * 2. Marked withdrawn exactly once by withdraw / batch_withdraw
 *
 * Design Notes:
 * - unlock_at is computed at creation and never rewritten
 * - the withdrawn flag only moves false -> true
 */
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct ClaimRecord {
    /// Ledger this claim belongs to
    pub ledger: Pubkey,

    /// User the claim pays out to
    pub owner: Pubkey,

    /// Sequential id within the owner's claims
    pub id: u64,

    /// Points committed to this claim
    pub amount: u64,

    /// Issuance time (Unix timestamp)
    pub created_at: i64,

    /// Earliest withdrawal time (Unix timestamp)
    pub unlock_at: i64,

    /// Whether the claim has been paid out
    pub withdrawn: bool,

    /// Payout time, zero until withdrawn
    pub withdrawn_at: i64,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl ClaimRecord {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<ClaimRecord>();

    pub fn phase(&self, now: i64) -> ClaimPhase {
        if self.withdrawn {
            ClaimPhase::Withdrawn
        } else if now >= self.unlock_at {
            ClaimPhase::Withdrawable
        } else {
            ClaimPhase::Pending
        }
    }

    pub fn is_withdrawable(&self, now: i64) -> bool {
        self.phase(now) == ClaimPhase::Withdrawable
    }

    /// Checks that this record is claim `id` of `owner` on `ledger`
    pub fn matches(&self, ledger: &Pubkey, owner: &Pubkey, id: u64) -> bool {
        self.ledger == *ledger && self.owner == *owner && self.id == id
    }

    /// Withdrawable -> Withdrawn. Returns the amount to pay out.
    pub fn mark_withdrawn(&mut self, now: i64) -> Result<u64> {
        match self.phase(now) {
            ClaimPhase::Withdrawn => err!(PointsVestingError::AlreadyWithdrawn),
            ClaimPhase::Pending => err!(PointsVestingError::ClaimLocked),
            ClaimPhase::Withdrawable => {
                self.withdrawn = true;
                self.withdrawn_at = now;
                Ok(self.amount)
            }
        }
    }
}
