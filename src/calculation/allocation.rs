//! Allocation quantity calculation.
//!
//! This module derives the number of leaves to grant now for each leave type
//! of a policy. The steps are:
//!
//! 1. Base timing: compensatory leave gets nothing; earned leave gets credit
//!    for months already passed (or nothing without an assignment basis);
//!    every other leave type gets the full annual allocation.
//! 2. Pro-ration for employees who joined after the period started.
//! 3. Rounding to the configured decimal precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, LeavePolicy, LeaveType, MAX_ANNUAL_ALLOCATION, is_valid_annual_allocation,
};

use super::carry_forward::effective_carry_forward;
use super::context::AllocationContext;
use super::months_passed::calculate_leaves_for_passed_months;
use super::precision::round_to_precision;
use super::pro_ration::apply_pro_ration;

/// The computed allocation for one leave type, with its audit steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationCalculation {
    /// The leave type the allocation is for.
    pub leave_type: String,
    /// The policy's annual allocation for the leave type.
    pub annual_allocation: Decimal,
    /// Leaves to grant now, rounded to the configured precision.
    pub new_leaves_allocated: Decimal,
    /// Whether the allocation carries forward.
    pub carry_forward: bool,
    /// The steps taken to reach the quantity.
    pub audit_steps: Vec<AuditStep>,
}

/// Computes the leaves to grant now for one leave type.
///
/// `step_number` numbers the first audit step; later steps follow on.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::{AllocationContext, calculate_new_leaves};
/// use leave_engine::models::LeaveType;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // Joined on Jul 1 of a calendar-year assignment
/// let ctx = AllocationContext::new(
///     None,
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
/// );
///
/// let result = calculate_new_leaves(
///     Decimal::from(24),
///     &LeaveType::new("Casual Leave"),
///     &ctx,
///     false,
///     1,
/// );
/// assert_eq!(result.new_leaves_allocated, Decimal::from(13));
/// ```
pub fn calculate_new_leaves(
    annual_allocation: Decimal,
    leave_type: &LeaveType,
    ctx: &AllocationContext,
    carry_forward_requested: bool,
    step_number: u32,
) -> AllocationCalculation {
    let mut audit_steps = Vec::new();
    let mut step_number = step_number;

    let base_leaves = if leave_type.is_compensatory {
        audit_steps.push(base_step(
            step_number,
            annual_allocation,
            Decimal::ZERO,
            "Compensatory leave is granted by a separate process, nothing allocated now"
                .to_string(),
        ));
        Decimal::ZERO
    } else if leave_type.is_earned_leave {
        match ctx.assignment_based_on {
            None => {
                audit_steps.push(base_step(
                    step_number,
                    annual_allocation,
                    Decimal::ZERO,
                    "Earned leave without an assignment basis accrues over time, nothing allocated now"
                        .to_string(),
                ));
                Decimal::ZERO
            }
            Some(basis) => {
                audit_steps.push(base_step(
                    step_number,
                    annual_allocation,
                    annual_allocation,
                    format!(
                        "Earned leave assigned by {}, crediting months already passed",
                        basis
                    ),
                ));
                step_number += 1;

                let passed =
                    calculate_leaves_for_passed_months(annual_allocation, leave_type, ctx, step_number);
                audit_steps.push(passed.audit_step);
                passed.leaves
            }
        }
    } else {
        audit_steps.push(base_step(
            step_number,
            annual_allocation,
            annual_allocation,
            "Full annual allocation granted upfront".to_string(),
        ));
        annual_allocation
    };
    step_number += 1;

    let pro_ration = apply_pro_ration(base_leaves, leave_type, ctx, step_number);
    audit_steps.push(pro_ration.audit_step);
    step_number += 1;

    let new_leaves_allocated = round_to_precision(pro_ration.leaves, ctx.precision);
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "precision".to_string(),
        rule_name: "Precision Rounding".to_string(),
        input: serde_json::json!({
            "leaves": pro_ration.leaves.normalize().to_string(),
            "precision": ctx.precision
        }),
        output: serde_json::json!({
            "new_leaves_allocated": new_leaves_allocated.normalize().to_string()
        }),
        reasoning: format!(
            "Rounded {} to {} decimal place(s): {}",
            pro_ration.leaves.normalize(),
            ctx.precision,
            new_leaves_allocated.normalize()
        ),
    });

    debug!(
        leave_type = %leave_type.name,
        annual_allocation = %annual_allocation,
        new_leaves_allocated = %new_leaves_allocated,
        "Calculated new leaves"
    );

    AllocationCalculation {
        leave_type: leave_type.name.clone(),
        annual_allocation,
        new_leaves_allocated,
        carry_forward: effective_carry_forward(carry_forward_requested, leave_type),
        audit_steps,
    }
}

/// Computes allocations for every leave type of a policy, in policy order.
///
/// Leave-without-pay types are skipped. `leave_type` resolves a leave type
/// name to its descriptor; an unknown name fails the whole calculation, as
/// does an annual allocation outside 0 to [`MAX_ANNUAL_ALLOCATION`].
pub fn calculate_policy_allocations<F>(
    policy: &LeavePolicy,
    ctx: &AllocationContext,
    carry_forward_requested: bool,
    mut leave_type: F,
) -> EngineResult<Vec<AllocationCalculation>>
where
    F: FnMut(&str) -> EngineResult<LeaveType>,
{
    let mut calculations = Vec::with_capacity(policy.details.len());
    let mut step_number: u32 = 1;

    for detail in &policy.details {
        if !is_valid_annual_allocation(detail.annual_allocation) {
            return Err(EngineError::InvalidAssignment {
                field: "annual_allocation".to_string(),
                message: format!(
                    "policy '{}' allocates {} of '{}'",
                    policy.name, detail.annual_allocation, detail.leave_type
                ),
            });
        }
        let details = leave_type(&detail.leave_type)?;
        if details.is_lwp {
            debug!(leave_type = %details.name, "Skipping leave without pay");
            continue;
        }

        let calculation = calculate_new_leaves(
            detail.annual_allocation,
            &details,
            ctx,
            carry_forward_requested,
            step_number,
        );
        step_number += calculation.audit_steps.len() as u32;
        calculations.push(calculation);
    }

    Ok(calculations)
}

fn base_step(
    step_number: u32,
    annual_allocation: Decimal,
    base_leaves: Decimal,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "base_allocation".to_string(),
        rule_name: "Base Allocation".to_string(),
        input: serde_json::json!({
            "annual_allocation": annual_allocation.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_leaves": base_leaves.normalize().to_string()
        }),
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AllocateOnDay, AssignmentBasis, EarnedLeaveRounding, LeavePolicyDetail};
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn earned_leave(allocate_on_day: AllocateOnDay) -> LeaveType {
        let mut leave_type = LeaveType::new("Earned Leave");
        leave_type.is_earned_leave = true;
        leave_type.is_carry_forward = true;
        leave_type.allocate_on_day = allocate_on_day;
        leave_type.rounding = Some(EarnedLeaveRounding::Half);
        leave_type
    }

    fn compensatory_leave() -> LeaveType {
        let mut leave_type = LeaveType::new("Compensatory Off");
        leave_type.is_compensatory = true;
        leave_type
    }

    fn lwp() -> LeaveType {
        let mut leave_type = LeaveType::new("Leave Without Pay");
        leave_type.is_lwp = true;
        leave_type
    }

    fn calendar_year_ctx(
        basis: Option<AssignmentBasis>,
        date_of_joining: NaiveDate,
        reference_date: NaiveDate,
    ) -> AllocationContext {
        AllocationContext::new(
            basis,
            date(2025, 1, 1),
            date(2025, 12, 31),
            date_of_joining,
            reference_date,
        )
    }

    // ==========================================================================
    // Plain leave types
    // ==========================================================================

    #[test]
    fn test_plain_leave_joined_at_start_gets_full_allocation() {
        let ctx = calendar_year_ctx(None, date(2025, 1, 1), date(2025, 3, 1));
        let result = calculate_new_leaves(dec("24"), &LeaveType::new("Casual Leave"), &ctx, false, 1);

        assert_eq!(result.new_leaves_allocated, dec("24"));
        assert_eq!(result.audit_steps.len(), 3);
        assert_eq!(result.audit_steps[0].rule_id, "base_allocation");
        assert_eq!(result.audit_steps[1].rule_id, "pro_ration");
        assert_eq!(result.audit_steps[2].rule_id, "precision");
    }

    #[test]
    fn test_plain_leave_joined_mid_year_is_pro_rated_and_rounded_up() {
        let ctx = calendar_year_ctx(None, date(2025, 7, 1), date(2025, 7, 1));
        let result = calculate_new_leaves(dec("24"), &LeaveType::new("Casual Leave"), &ctx, false, 1);

        assert_eq!(result.new_leaves_allocated, dec("13"));
    }

    #[test]
    fn test_plain_leave_fractional_allocation_respects_precision() {
        let mut ctx = calendar_year_ctx(None, date(2025, 1, 1), date(2025, 1, 1));
        ctx.precision = 1;
        let result =
            calculate_new_leaves(dec("7.25"), &LeaveType::new("Casual Leave"), &ctx, false, 1);

        // 7.25 -> 7.2 (half to even)
        assert_eq!(result.new_leaves_allocated, dec("7.2"));
    }

    // ==========================================================================
    // Compensatory leave
    // ==========================================================================

    #[test]
    fn test_compensatory_leave_is_always_zero() {
        for basis in [None, Some(AssignmentBasis::LeavePeriod), Some(AssignmentBasis::JoiningDate)] {
            let ctx = calendar_year_ctx(basis, date(2025, 3, 1), date(2025, 8, 1));
            let result = calculate_new_leaves(dec("10"), &compensatory_leave(), &ctx, false, 1);
            assert_eq!(result.new_leaves_allocated, Decimal::ZERO);
        }
    }

    // ==========================================================================
    // Earned leave
    // ==========================================================================

    #[test]
    fn test_earned_leave_without_basis_is_zero() {
        let ctx = calendar_year_ctx(None, date(2025, 1, 1), date(2025, 12, 30));
        let result =
            calculate_new_leaves(dec("12"), &earned_leave(AllocateOnDay::LastDay), &ctx, false, 1);

        assert_eq!(result.new_leaves_allocated, Decimal::ZERO);
        assert!(!result.audit_steps.iter().any(|s| s.rule_id == "months_passed"));
    }

    #[test]
    fn test_earned_leave_credits_passed_months() {
        let ctx = calendar_year_ctx(
            Some(AssignmentBasis::LeavePeriod),
            date(2025, 1, 1),
            date(2025, 4, 15),
        );
        let result =
            calculate_new_leaves(dec("24"), &earned_leave(AllocateOnDay::FirstDay), &ctx, false, 1);

        assert_eq!(result.new_leaves_allocated, dec("8"));
        let rule_ids: Vec<&str> = result.audit_steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rule_ids,
            vec!["base_allocation", "months_passed", "pro_ration", "precision"]
        );
        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_earned_leave_joined_mid_month_is_pro_rated_not_rounded_up() {
        // Period Sep 1 - Aug 31, joined and assigned on Sep 6
        let ctx = AllocationContext::new(
            Some(AssignmentBasis::LeavePeriod),
            date(2025, 9, 1),
            date(2026, 8, 31),
            date(2025, 9, 6),
            date(2025, 9, 6),
        );
        let result = calculate_new_leaves(
            dec("12"),
            &earned_leave(AllocateOnDay::DateOfJoining),
            &ctx,
            false,
            1,
        );

        // 1 x 25 / 30
        assert_eq!(result.new_leaves_allocated, dec("0.833"));
    }

    #[test]
    fn test_earned_leave_assigned_before_joining_is_zero() {
        let ctx = AllocationContext::new(
            Some(AssignmentBasis::LeavePeriod),
            date(2025, 9, 1),
            date(2026, 8, 31),
            date(2025, 9, 6),
            date(2025, 9, 5),
        );
        let result = calculate_new_leaves(
            dec("12"),
            &earned_leave(AllocateOnDay::DateOfJoining),
            &ctx,
            false,
            1,
        );

        assert_eq!(result.new_leaves_allocated, Decimal::ZERO);
    }

    #[test]
    fn test_earned_leave_by_joining_date() {
        // Joined Apr 1, assigned by joining date on Jun 30
        let ctx = AllocationContext::new(
            Some(AssignmentBasis::JoiningDate),
            date(2025, 4, 1),
            date(2026, 3, 31),
            date(2025, 4, 1),
            date(2025, 6, 30),
        );
        let result =
            calculate_new_leaves(dec("12"), &earned_leave(AllocateOnDay::LastDay), &ctx, false, 1);

        assert_eq!(result.new_leaves_allocated, dec("3"));
    }

    // ==========================================================================
    // Carry forward
    // ==========================================================================

    #[test]
    fn test_carry_forward_disabled_by_leave_type() {
        let ctx = calendar_year_ctx(None, date(2025, 1, 1), date(2025, 1, 1));
        let casual = calculate_new_leaves(dec("12"), &LeaveType::new("Casual Leave"), &ctx, true, 1);
        let earned =
            calculate_new_leaves(dec("12"), &earned_leave(AllocateOnDay::LastDay), &ctx, true, 1);

        assert!(!casual.carry_forward);
        assert!(earned.carry_forward);
    }

    // ==========================================================================
    // Whole policy
    // ==========================================================================

    fn lookup(name: &str) -> EngineResult<LeaveType> {
        let types: HashMap<&str, LeaveType> = HashMap::from([
            ("Casual Leave", LeaveType::new("Casual Leave")),
            ("Compensatory Off", compensatory_leave()),
            ("Leave Without Pay", lwp()),
        ]);
        types
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::LeaveTypeNotFound {
                name: name.to_string(),
            })
    }

    fn policy(details: &[(&str, &str)]) -> LeavePolicy {
        LeavePolicy {
            name: "Standard Policy".to_string(),
            title: String::new(),
            details: details
                .iter()
                .map(|(lt, qty)| LeavePolicyDetail {
                    leave_type: lt.to_string(),
                    annual_allocation: dec(qty),
                })
                .collect(),
        }
    }

    #[test]
    fn test_policy_skips_lwp_and_keeps_order() {
        let ctx = calendar_year_ctx(None, date(2025, 1, 1), date(2025, 1, 1));
        let policy = policy(&[
            ("Compensatory Off", "5"),
            ("Leave Without Pay", "30"),
            ("Casual Leave", "12"),
        ]);

        let results = calculate_policy_allocations(&policy, &ctx, false, lookup).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].leave_type, "Compensatory Off");
        assert_eq!(results[0].new_leaves_allocated, Decimal::ZERO);
        assert_eq!(results[1].leave_type, "Casual Leave");
        assert_eq!(results[1].new_leaves_allocated, dec("12"));

        // Step numbers continue across leave types
        assert_eq!(results[1].audit_steps[0].step_number, 4);
    }

    #[test]
    fn test_policy_with_unknown_leave_type_fails() {
        let ctx = calendar_year_ctx(None, date(2025, 1, 1), date(2025, 1, 1));
        let policy = policy(&[("Casual Leave", "12"), ("Sabbatical", "30")]);

        match calculate_policy_allocations(&policy, &ctx, false, lookup) {
            Err(EngineError::LeaveTypeNotFound { name }) => assert_eq!(name, "Sabbatical"),
            other => panic!("Expected LeaveTypeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_policy_with_negative_allocation_fails() {
        let ctx = calendar_year_ctx(None, date(2025, 1, 1), date(2025, 1, 1));
        let policy = policy(&[("Casual Leave", "-24")]);

        match calculate_policy_allocations(&policy, &ctx, false, lookup) {
            Err(EngineError::InvalidAssignment { field, .. }) => {
                assert_eq!(field, "annual_allocation")
            }
            other => panic!("Expected InvalidAssignment, got {:?}", other),
        }
    }
}
