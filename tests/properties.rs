//! Property-based tests for the allocation rules.

use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use leave_engine::calculation::{
    AllocationContext, apply_pro_ration, calculate_new_leaves, calculate_pro_rated_leaves,
    ranges_overlap, validate_assignment_overlap,
};
use leave_engine::error::EngineError;
use leave_engine::models::{
    AllocateOnDay, AssignmentBasis, AssignmentData, AssignmentStatus, LeavePolicyAssignment,
    LeaveType,
};

/// Strategy to generate valid dates within a reasonable range.
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2020i32..=2030, 1u32..=12, 1u32..=28)
        .prop_map(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day).unwrap())
}

/// Strategy to generate an inclusive range with start <= end.
fn range_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (date_strategy(), 0i64..=730).prop_map(|(start, days)| (start, start + Duration::days(days)))
}

fn allocate_on_day_strategy() -> impl Strategy<Value = AllocateOnDay> {
    prop_oneof![
        Just(AllocateOnDay::DateOfJoining),
        Just(AllocateOnDay::FirstDay),
        Just(AllocateOnDay::LastDay),
    ]
}

fn assignment(
    id: &str,
    (from, to): (NaiveDate, NaiveDate),
    status: AssignmentStatus,
) -> LeavePolicyAssignment {
    let mut assignment = AssignmentData {
        assignment_based_on: None,
        leave_policy: "Standard Policy".to_string(),
        effective_from: Some(from),
        effective_to: Some(to),
        leave_period: None,
        carry_forward: false,
    }
    .into_assignment(id, "EMP-0001");
    assignment.status = status;
    assignment
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // =========================================================================
    // Overlap validation
    // =========================================================================

    /// Overlap of inclusive ranges is symmetric and matches the closed
    /// interval condition.
    #[test]
    fn prop_overlap_is_symmetric(a in range_strategy(), b in range_strategy()) {
        let expected = a.0 <= b.1 && b.0 <= a.1;
        prop_assert_eq!(ranges_overlap(a, b), expected);
        prop_assert_eq!(ranges_overlap(b, a), expected);
    }

    /// A candidate is rejected exactly when it overlaps a submitted assignment.
    #[test]
    fn prop_validator_rejects_every_overlap(a in range_strategy(), b in range_strategy()) {
        let existing = vec![assignment("LPA-0001", a, AssignmentStatus::Submitted)];
        let candidate = assignment("LPA-0002", b, AssignmentStatus::Draft);

        let result = validate_assignment_overlap(&candidate, &existing);

        if a.0 <= b.1 && b.0 <= a.1 {
            let is_conflict = matches!(result, Err(EngineError::OverlapConflict { .. }));
            prop_assert!(is_conflict, "{:?} and {:?} should conflict", a, b);
        } else {
            prop_assert!(result.is_ok(), "{:?} and {:?} should not conflict", a, b);
        }
    }

    /// Draft assignments never block a candidate.
    #[test]
    fn prop_drafts_never_conflict(a in range_strategy(), b in range_strategy()) {
        let existing = vec![assignment("LPA-0001", a, AssignmentStatus::Draft)];
        let candidate = assignment("LPA-0002", b, AssignmentStatus::Draft);
        prop_assert!(validate_assignment_overlap(&candidate, &existing).is_ok());
    }

    // =========================================================================
    // Pro-ration
    // =========================================================================

    /// Pro-rated leaves are never negative, whatever the dates.
    #[test]
    fn prop_pro_rated_never_negative(
        leaves in 0u32..=365,
        join in date_strategy(),
        (start, end) in range_strategy(),
        precision in 0u32..=6,
    ) {
        let result = calculate_pro_rated_leaves(Decimal::from(leaves), join, start, end, precision);
        prop_assert!(result >= Decimal::ZERO);
    }

    /// Pro-ration of a whole quantity never increases it.
    #[test]
    fn prop_pro_ration_never_increases_whole_quantities(
        leaves in 0u32..=365,
        (start, end) in range_strategy(),
        join_offset in 0i64..=800,
    ) {
        let join = start + Duration::days(join_offset);
        let ctx = AllocationContext::new(None, start, end, join, join);
        let leaves = Decimal::from(leaves);

        let result = apply_pro_ration(leaves, &LeaveType::new("Casual Leave"), &ctx, 1);

        prop_assert!(result.leaves <= leaves, "{} grew to {}", leaves, result.leaves);
        prop_assert!(result.leaves >= Decimal::ZERO);
    }

    // =========================================================================
    // Earned leave
    // =========================================================================

    /// Within one calendar year, months-passed crediting never exceeds the
    /// annual allocation and is never negative.
    #[test]
    fn prop_earned_credit_bounded_by_annual(
        annual in 0u32..=60,
        from in date_strategy(),
        join_offset in 0i64..=400,
        reference_offset in 0i64..=500,
        allocate_on_day in allocate_on_day_strategy(),
    ) {
        let year_end = NaiveDate::from_ymd_opt(from.year(), 12, 31).unwrap();
        let join = from + Duration::days(join_offset);
        let reference = from + Duration::days(reference_offset);
        let ctx = AllocationContext::new(
            Some(AssignmentBasis::LeavePeriod),
            from,
            year_end,
            join,
            reference,
        );

        let mut leave_type = LeaveType::new("Privilege Leave");
        leave_type.is_earned_leave = true;
        leave_type.allocate_on_day = allocate_on_day;

        let annual = Decimal::from(annual);
        let result = calculate_new_leaves(annual, &leave_type, &ctx, false, 1);

        prop_assert!(result.new_leaves_allocated >= Decimal::ZERO);
        prop_assert!(
            result.new_leaves_allocated <= annual,
            "{} credited from an annual allocation of {}",
            result.new_leaves_allocated,
            annual
        );
    }
}
