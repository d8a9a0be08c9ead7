use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;

/**
 * Enumerable admin set
 *
 * Admins may accrue points to users. The ledger owner is authorized implicitly and is
 * never required to be listed here, so removing the owner's key from this set does not
 * revoke the owner's capability.
 *
 * Derivation: ["admins", ledger_key]
 *
 * Allocated once with room for MAX_ADMINS keys.
 */
#[account]
#[derive(Default, Debug)]
pub struct AdminRegistry {
    /// Ledger this registry belongs to
    pub ledger: Pubkey,

    /// Admin keys in insertion order
    pub admins: Vec<Pubkey>,
}

impl AdminRegistry {
    /// Discriminator + ledger + vec length prefix + MAX_ADMINS keys
    pub const LEN: usize = 8 + 32 + 4 + 32 * MAX_ADMINS;

    pub fn contains(&self, key: &Pubkey) -> bool {
        self.admins.iter().any(|admin| admin == key)
    }

    /// Capability check for admin-gated instructions
    pub fn is_authorized(&self, owner: &Pubkey, caller: &Pubkey) -> bool {
        caller == owner || self.contains(caller)
    }

    pub fn add(&mut self, admin: Pubkey) -> Result<()> {
        require!(admin != Pubkey::default(), PointsVestingError::InvalidUser);
        require!(!self.contains(&admin), PointsVestingError::AlreadyAdmin);
        require!(
            self.admins.len() < MAX_ADMINS,
            PointsVestingError::AdminRegistryFull
        );
        self.admins.push(admin);
        Ok(())
    }

    pub fn remove(&mut self, admin: &Pubkey) -> Result<()> {
        let position = self
            .admins
            .iter()
            .position(|existing| existing == admin)
            .ok_or(PointsVestingError::AdminNotFound)?;
        self.admins.remove(position);
        Ok(())
    }
}
