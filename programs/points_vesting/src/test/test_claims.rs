#[cfg(test)]
mod tests {
    use crate::constants::*;
    use crate::error::*;
    use crate::state::*;
    use crate::test::harness::*;

    fn harness_with_balance(user: anchor_lang::prelude::Pubkey, amount: u64) -> Harness {
        let mut h = Harness::funded();
        h.accrue(owner_key(), user, amount).unwrap();
        h
    }

    #[test]
    fn test_issue_claim_snapshots_balance_and_unlock_time() {
        let user = key(20);
        let mut h = harness_with_balance(user, 1_000);
        h.set_day(3);

        let claim_id = h.issue_claim(user).unwrap();
        assert_eq!(claim_id, 0);

        let claim = h.claim(&user, 0);
        assert_eq!(claim.amount, 1_000);
        assert_eq!(claim.owner, user);
        assert_eq!(claim.created_at, 3 * DAY);
        assert_eq!(claim.unlock_at, 3 * DAY + DEFAULT_LOCK_PERIOD);
        assert!(!claim.withdrawn);

        let state = h.user(&user);
        assert_eq!(state.points_balance, 0);
        assert_eq!(state.claim_count, 1);
        h.assert_conservation();
    }

    #[test]
    fn test_issue_claim_with_zero_balance_mutates_nothing() {
        let user = key(20);
        let mut h = harness_with_balance(user, 100);
        h.issue_claim(user).unwrap();
        let before = h.clone();

        assert_error(h.issue_claim(user), PointsVestingError::NothingToClaim);

        assert_eq!(h.users, before.users);
        assert_eq!(h.claims, before.claims);
        assert_eq!(h.user(&user).claim_count, 1);
    }

    #[test]
    fn test_issue_claim_requires_reserve_cover() {
        let user = key(20);
        let mut h = harness_with_balance(user, 1_000);
        h.reserve = 999;

        assert_error(h.issue_claim(user), PointsVestingError::InsufficientReserve);
        assert_eq!(h.user(&user).points_balance, 1_000);

        h.reserve = 1_000;
        h.issue_claim(user).unwrap();
        // Issuance does not move value
        assert_eq!(h.reserve, 1_000);
    }

    #[test]
    fn test_claim_ids_are_dense_and_sequential() {
        let user = key(20);
        let mut h = Harness::funded();
        for round in 0..5u64 {
            h.accrue(owner_key(), user, 10 + round).unwrap();
            assert_eq!(h.issue_claim(user).unwrap(), round);
        }
        assert_eq!(h.user(&user).claim_count, 5);
        let amounts: Vec<u64> = h.claims_of(&user).iter().map(|c| c.amount).collect();
        assert_eq!(amounts, vec![10, 11, 12, 13, 14]);
        h.assert_conservation();
    }

    #[test]
    fn test_lock_period_change_keeps_existing_unlock_time() {
        let user = key(20);
        let mut h = harness_with_balance(user, 100);
        h.issue_claim(user).unwrap();
        let unlock_at = h.claim(&user, 0).unlock_at;

        h.update_lock_period(owner_key(), 30 * DAY).unwrap();
        assert_eq!(h.claim(&user, 0).unlock_at, unlock_at);

        h.accrue(owner_key(), user, 100).unwrap();
        h.issue_claim(user).unwrap();
        assert_eq!(h.claim(&user, 1).unlock_at, h.now + 30 * DAY);

        h.update_lock_period(owner_key(), MIN_LOCK_PERIOD).unwrap();
        h.set_day(14);
        assert_eq!(h.withdrawable(&user), vec![0]);
    }

    #[test]
    fn test_withdraw_state_machine() {
        let user = key(20);
        let mut h = harness_with_balance(user, 700);
        h.issue_claim(user).unwrap();

        assert_eq!(h.claim(&user, 0).phase(h.now), ClaimPhase::Pending);
        h.set_day(13);
        assert_error(h.withdraw(user, 0), PointsVestingError::ClaimLocked);

        h.set_day(14);
        assert_eq!(h.claim(&user, 0).phase(h.now), ClaimPhase::Withdrawable);
        assert_eq!(h.withdraw(user, 0).unwrap(), 700);

        let claim = h.claim(&user, 0);
        assert_eq!(claim.phase(h.now), ClaimPhase::Withdrawn);
        assert_eq!(claim.withdrawn_at, 14 * DAY);
        assert_eq!(h.user(&user).total_claimed, 700);
        assert_eq!(h.ledger.total_claimed, 700);
        assert_eq!(h.reserve, 1_000_000 - 700);
        h.assert_conservation();
    }

    #[test]
    fn test_double_withdraw_fails_second_time() {
        let user = key(20);
        let mut h = harness_with_balance(user, 400);
        h.issue_claim(user).unwrap();
        h.advance_days(14);

        assert_eq!(h.withdraw(user, 0).unwrap(), 400);
        assert_error(h.withdraw(user, 0), PointsVestingError::AlreadyWithdrawn);

        assert_eq!(h.ledger.total_claimed, 400);
        assert_eq!(h.reserve, 1_000_000 - 400);
    }

    #[test]
    fn test_withdraw_unknown_claim() {
        let user = key(20);
        let mut h = harness_with_balance(user, 400);
        assert_error(h.withdraw(user, 0), PointsVestingError::ClaimNotFound);

        h.issue_claim(user).unwrap();
        h.advance_days(30);
        assert_error(h.withdraw(user, 1), PointsVestingError::ClaimNotFound);
        assert_error(h.withdraw(user, u64::MAX), PointsVestingError::ClaimNotFound);
    }

    #[test]
    fn test_failed_transfer_rolls_back_withdrawal() {
        let user = key(20);
        let mut h = harness_with_balance(user, 400);
        h.issue_claim(user).unwrap();
        h.advance_days(14);
        let before = h.clone();

        h.fail_next_transfer = true;
        assert_error(h.withdraw(user, 0), PointsVestingError::ExternalTransferFailed);

        // The injected fault fires once
        assert!(!h.fail_next_transfer);
        assert!(!h.claim(&user, 0).withdrawn);
        assert_eq!(h.users, before.users);
        assert_eq!(h.ledger.total_claimed, 0);
        assert_eq!(h.reserve, before.reserve);
        h.assert_conservation();

        // Caller retries the whole operation
        assert_eq!(h.withdraw(user, 0).unwrap(), 400);
    }

    #[test]
    fn test_withdraw_requires_reserve_cover() {
        let user = key(20);
        let mut h = harness_with_balance(user, 400);
        h.issue_claim(user).unwrap();
        h.advance_days(14);
        h.emergency_withdraw(owner_key(), 1_000_000 - 100).unwrap();

        assert_error(h.withdraw(user, 0), PointsVestingError::InsufficientReserve);
        assert!(!h.claim(&user, 0).withdrawn);
    }

    #[test]
    fn test_guard_rejects_reentry() {
        let user = key(20);
        let mut h = harness_with_balance(user, 400);
        h.issue_claim(user).unwrap();
        h.accrue(owner_key(), user, 50).unwrap();
        h.advance_days(14);

        // State as persisted while a transfer for this user is still in flight
        h.users.get_mut(&user).unwrap().locked = true;

        assert_error(h.withdraw(user, 0), PointsVestingError::ReentrantCall);
        assert_error(h.batch_withdraw(user, &[0]), PointsVestingError::ReentrantCall);
        assert_error(h.issue_claim(user), PointsVestingError::ReentrantCall);
        assert_error(h.accrue(owner_key(), user, 1), PointsVestingError::ReentrantCall);
        assert!(!h.claim(&user, 0).withdrawn);

        let mut state = h.user(&user);
        assert_error(state.lock(), PointsVestingError::ReentrantCall);
        state.unlock();
        state.lock().unwrap();
    }

    #[test]
    fn test_batch_withdraw_is_best_effort() {
        let user = key(20);
        let mut h = Harness::funded();

        // B: issued day 0, unlocks day 14
        h.accrue(owner_key(), user, 300).unwrap();
        let b = h.issue_claim(user).unwrap();
        // A: issued day 10, unlocks day 24
        h.set_day(10);
        h.accrue(owner_key(), user, 500).unwrap();
        let a = h.issue_claim(user).unwrap();
        // C: never issued
        let c = 7;

        h.set_day(15);
        let outcome = h.batch_withdraw(user, &[a, b, c]).unwrap();

        assert_eq!(outcome.withdrawn_ids(), vec![b]);
        assert_eq!(outcome.total, 300);
        assert!(h.claim(&user, b).withdrawn);
        assert!(!h.claim(&user, a).withdrawn);
        assert!(!h.claims.contains_key(&(user, c)));
        assert_eq!(h.ledger.total_claimed, 300);
        assert_eq!(h.reserve, 1_000_000 - 300);
        h.assert_conservation();
    }

    #[test]
    fn test_batch_withdraw_pays_repeated_id_once() {
        let user = key(20);
        let mut h = harness_with_balance(user, 250);
        h.issue_claim(user).unwrap();
        h.advance_days(14);

        let outcome = h.batch_withdraw(user, &[0, 0, 0]).unwrap();
        assert_eq!(outcome.withdrawn_ids(), vec![0]);
        assert_eq!(outcome.total, 250);
        assert_eq!(h.user(&user).total_claimed, 250);
        assert_eq!(h.reserve, 1_000_000 - 250);

        // Everything already withdrawn: no error, nothing moves
        let outcome = h.batch_withdraw(user, &[0]).unwrap();
        assert!(outcome.withdrawn.is_empty());
        assert_eq!(h.reserve, 1_000_000 - 250);
        h.assert_conservation();
    }

    #[test]
    fn test_batch_withdraw_reports_running_totals() {
        let user = key(20);
        let mut h = Harness::funded();
        for amount in [100, 200, 300] {
            h.accrue(owner_key(), user, amount).unwrap();
            h.issue_claim(user).unwrap();
        }
        h.advance_days(14);

        let outcome = h.batch_withdraw(user, &[2, 0, 1]).unwrap();
        let totals: Vec<(u64, u64)> = outcome
            .withdrawn
            .iter()
            .map(|w| (w.claim_id, w.user_total_claimed))
            .collect();
        assert_eq!(totals, vec![(2, 300), (0, 400), (1, 600)]);
        assert_eq!(outcome.withdrawn[1].index, 1);
    }

    #[test]
    fn test_batch_withdraw_rolls_back_on_transfer_failure() {
        let user = key(20);
        let mut h = harness_with_balance(user, 250);
        h.issue_claim(user).unwrap();
        h.advance_days(14);

        h.fail_next_transfer = true;
        assert_error(h.batch_withdraw(user, &[0]), PointsVestingError::ExternalTransferFailed);
        assert!(!h.claim(&user, 0).withdrawn);
        assert_eq!(h.ledger.total_claimed, 0);
        assert!(!h.fail_next_transfer);

        let outcome = h.batch_withdraw(user, &[0]).unwrap();
        assert_eq!(outcome.withdrawn_ids(), vec![0]);
        assert_eq!(outcome.total, 250);
        h.assert_conservation();
    }

    #[test]
    fn test_batch_withdraw_size_limit() {
        let user = key(20);
        let mut h = harness_with_balance(user, 250);
        let ids: Vec<u64> = (0..=MAX_BATCH_SIZE as u64).collect();
        assert_error(h.batch_withdraw(user, &ids), PointsVestingError::BatchTooLarge);
    }

    #[test]
    fn test_batch_withdraw_requires_reserve_cover() {
        let user = key(20);
        let mut h = harness_with_balance(user, 300);
        h.issue_claim(user).unwrap();
        h.accrue(owner_key(), user, 200).unwrap();
        h.issue_claim(user).unwrap();
        h.advance_days(14);
        h.emergency_withdraw(owner_key(), 1_000_000 - 400).unwrap();

        // Summed payout of 500 exceeds the 400 left in the vault
        assert_error(h.batch_withdraw(user, &[0, 1]), PointsVestingError::InsufficientReserve);
        assert!(h.claims_of(&user).iter().all(|c| !c.withdrawn));
        assert_eq!(h.ledger.total_claimed, 0);

        // A subset the vault covers still goes through
        let outcome = h.batch_withdraw(user, &[0]).unwrap();
        assert_eq!(outcome.total, 300);
        assert_eq!(h.reserve, 100);
        h.assert_conservation();
    }

    /// Day 0: 1000 accrued, claim 0 unlocks day 14.
    /// Day 5: 500 accrued, claim 1 unlocks day 19.
    #[test]
    fn test_two_claim_vesting_scenario() {
        let user = key(20);
        let mut h = Harness::funded();

        h.set_day(0);
        h.accrue(owner_key(), user, 1_000).unwrap();
        h.issue_claim(user).unwrap();
        assert_eq!(h.claim(&user, 0).unlock_at, 14 * DAY);

        h.set_day(5);
        h.accrue(owner_key(), user, 500).unwrap();
        h.issue_claim(user).unwrap();
        assert_eq!(h.claim(&user, 1).unlock_at, 19 * DAY);

        h.set_day(14);
        assert_eq!(h.withdrawable(&user), vec![0]);
        h.withdraw(user, 0).unwrap();
        assert_eq!(h.ledger.total_claimed, 1_000);
        assert!(h.withdrawable(&user).is_empty());

        for day in 15..19 {
            h.set_day(day);
            assert!(h.withdrawable(&user).is_empty(), "day {}", day);
        }

        h.set_day(19);
        assert_eq!(h.withdrawable(&user), vec![1]);
        h.withdraw(user, 1).unwrap();
        assert_eq!(h.ledger.total_claimed, 1_500);
        assert_eq!(h.user(&user).total_claimed, 1_500);
        h.assert_conservation();
    }
}
