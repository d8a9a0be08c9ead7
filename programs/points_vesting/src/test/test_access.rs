#[cfg(test)]
mod tests {
    use crate::constants::*;
    use crate::error::*;
    use crate::state::*;
    use crate::test::harness::*;
    use anchor_lang::prelude::Pubkey;

    #[test]
    fn test_owner_manages_admin_set() {
        let mut h = Harness::funded();
        let admin = key(10);

        h.add_admin(owner_key(), admin).unwrap();
        assert!(h.admins.contains(&admin));

        assert_error(h.add_admin(owner_key(), admin), PointsVestingError::AlreadyAdmin);
        assert_error(
            h.add_admin(owner_key(), Pubkey::default()),
            PointsVestingError::InvalidUser,
        );

        h.remove_admin(owner_key(), admin).unwrap();
        assert!(!h.admins.contains(&admin));
        assert_error(h.remove_admin(owner_key(), admin), PointsVestingError::AdminNotFound);
    }

    #[test]
    fn test_admin_set_is_owner_only() {
        let mut h = Harness::funded();
        h.add_admin(owner_key(), key(10)).unwrap();

        // Admins cannot grow the set themselves
        assert_error(h.add_admin(key(10), key(11)), PointsVestingError::OnlyOwner);
        assert_error(h.remove_admin(key(10), key(10)), PointsVestingError::OnlyOwner);
        assert_error(h.update_lock_period(key(10), 2 * DAY), PointsVestingError::OnlyOwner);
        assert_error(h.set_paused(key(10), true), PointsVestingError::OnlyOwner);
        assert_error(h.emergency_withdraw(key(10), 0), PointsVestingError::OnlyOwner);
    }

    #[test]
    fn test_admin_registry_is_bounded() {
        let mut h = Harness::funded();
        for n in 0..MAX_ADMINS as u8 {
            h.add_admin(owner_key(), key(100 + n)).unwrap();
        }
        assert_error(h.add_admin(owner_key(), key(99)), PointsVestingError::AdminRegistryFull);
        assert_eq!(h.admins.admins.len(), MAX_ADMINS);
    }

    #[test]
    fn test_accrual_requires_owner_or_admin() {
        let mut h = Harness::funded();
        let user = key(20);

        assert_error(h.accrue(key(10), user, 100), PointsVestingError::NotAdmin);

        h.add_admin(owner_key(), key(10)).unwrap();
        h.accrue(key(10), user, 100).unwrap();
        h.accrue(owner_key(), user, 50).unwrap();
        assert_eq!(h.user(&user).points_balance, 150);

        h.remove_admin(owner_key(), key(10)).unwrap();
        assert_error(h.accrue(key(10), user, 1), PointsVestingError::NotAdmin);
    }

    #[test]
    fn test_owner_stays_authorized_after_self_removal() {
        let mut h = Harness::funded();
        h.add_admin(owner_key(), owner_key()).unwrap();
        h.remove_admin(owner_key(), owner_key()).unwrap();

        assert!(!h.admins.contains(&owner_key()));
        assert!(h.admins.is_authorized(&owner_key(), &owner_key()));
        h.accrue(owner_key(), key(20), 10).unwrap();
    }

    #[test]
    fn test_lock_period_bounds() {
        let mut h = Harness::funded();
        assert_eq!(h.ledger.lock_period, DEFAULT_LOCK_PERIOD);

        h.update_lock_period(owner_key(), MIN_LOCK_PERIOD).unwrap();
        h.update_lock_period(owner_key(), MAX_LOCK_PERIOD).unwrap();
        assert_eq!(h.ledger.lock_period, MAX_LOCK_PERIOD);

        assert_error(
            h.update_lock_period(owner_key(), MIN_LOCK_PERIOD - 1),
            PointsVestingError::LockPeriodOutOfRange,
        );
        assert_error(
            h.update_lock_period(owner_key(), MAX_LOCK_PERIOD + 1),
            PointsVestingError::LockPeriodOutOfRange,
        );
        assert_error(
            h.update_lock_period(owner_key(), 0),
            PointsVestingError::LockPeriodOutOfRange,
        );
        assert_eq!(h.ledger.lock_period, MAX_LOCK_PERIOD);
    }

    #[test]
    fn test_pause_blocks_mutations_but_not_recovery() {
        let mut h = Harness::funded();
        let user = key(20);
        h.accrue(owner_key(), user, 500).unwrap();
        h.issue_claim(user).unwrap();
        h.accrue(owner_key(), user, 100).unwrap();
        h.advance_days(14);

        h.set_paused(owner_key(), true).unwrap();
        assert_error(h.set_paused(owner_key(), true), PointsVestingError::AlreadyPaused);

        assert_error(h.accrue(owner_key(), user, 1), PointsVestingError::Paused);
        assert_error(
            h.batch_accrue(owner_key(), &[user], &[1]),
            PointsVestingError::Paused,
        );
        assert_error(h.issue_claim(user), PointsVestingError::Paused);
        assert_error(h.withdraw(user, 0), PointsVestingError::Paused);
        assert_error(h.batch_withdraw(user, &[0]), PointsVestingError::Paused);
        assert_error(h.skip(user), PointsVestingError::Paused);

        // Owner configuration and the emergency drain stay available
        h.update_lock_period(owner_key(), 7 * DAY).unwrap();
        let drained = h.emergency_withdraw(owner_key(), 1_000).unwrap();
        assert_eq!(drained, 1_000);

        h.set_paused(owner_key(), false).unwrap();
        assert_error(h.set_paused(owner_key(), false), PointsVestingError::NotPaused);
        assert_eq!(h.withdraw(user, 0).unwrap(), 500);
    }

    #[test]
    fn test_emergency_withdraw_bypasses_bookkeeping() {
        let mut h = Harness::funded();
        h.accrue(owner_key(), key(20), 300).unwrap();
        let before = h.ledger.clone();

        assert_error(
            h.emergency_withdraw(owner_key(), 2_000_000),
            PointsVestingError::InsufficientReserve,
        );
        assert_eq!(h.emergency_withdraw(owner_key(), 0).unwrap(), 1_000_000);
        assert_eq!(h.reserve, 0);
        assert_error(h.emergency_withdraw(owner_key(), 0), PointsVestingError::InvalidAmount);

        assert_eq!(h.ledger.total_distributed, before.total_distributed);
        assert_eq!(h.ledger.total_claimed, before.total_claimed);
        h.assert_conservation();
    }

    #[test]
    fn test_error_taxonomy() {
        use PointsVestingError::*;
        let cases = [
            (OnlyOwner, ErrorKind::PermissionDenied),
            (NotAdmin, ErrorKind::PermissionDenied),
            (InvalidUser, ErrorKind::InvalidArgument),
            (LengthMismatch, ErrorKind::InvalidArgument),
            (EmptyBatch, ErrorKind::InvalidArgument),
            (BatchTooLarge, ErrorKind::InvalidArgument),
            (LockPeriodOutOfRange, ErrorKind::InvalidArgument),
            (NothingToClaim, ErrorKind::InvalidArgument),
            (ClaimNotFound, ErrorKind::NotFound),
            (AlreadyAdmin, ErrorKind::AlreadyDone),
            (AlreadyWithdrawn, ErrorKind::AlreadyDone),
            (AlreadySkipped, ErrorKind::AlreadyDone),
            (ClaimLocked, ErrorKind::NotYetEligible),
            (InsufficientReserve, ErrorKind::InsufficientReserve),
            (UserSkipped, ErrorKind::StateConflict),
            (SkipFrozen, ErrorKind::StateConflict),
            (ExternalTransferFailed, ErrorKind::ExternalTransferFailed),
        ];
        for (error, kind) in cases {
            assert_eq!(error.kind(), kind, "{:?}", error);
        }
    }

    #[test]
    fn test_skip_mode_defaults_to_permanent() {
        assert_eq!(SkipMode::default(), SkipMode::Permanent);
        assert_eq!(Harness::funded().ledger.skip_mode, SkipMode::Permanent);
    }
}
