//! Audit trail models.
//!
//! Every calculation rule records an [`AuditStep`] so callers can see how an
//! allocation quantity was reached. Non-fatal notices are [`AuditWarning`]s.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// # Example
///
/// ```
/// use leave_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "base_allocation".to_string(),
///     rule_name: "Base Allocation".to_string(),
///     input: serde_json::json!({"annual_allocation": "12"}),
///     output: serde_json::json!({"base_leaves": "12"}),
///     reasoning: "Plain leave type receives the full annual allocation".to_string(),
/// };
/// assert_eq!(step.rule_id, "base_allocation");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated while validating or calculating.
///
/// Warnings never stop processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 2,
            rule_id: "pro_ration".to_string(),
            rule_name: "Pro-Ration".to_string(),
            input: serde_json::json!({"leaves": "24"}),
            output: serde_json::json!({"leaves": "13"}),
            reasoning: "joined mid period".to_string(),
        };
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":2"));
        assert!(json.contains("\"rule_id\":\"pro_ration\""));

        let back: AuditStep = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning {
            code: "CARRY_FORWARD_DISABLED".to_string(),
            message: "won't be carry-forwarded".to_string(),
            severity: "low".to_string(),
        };
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"CARRY_FORWARD_DISABLED\""));
        assert!(json.contains("\"severity\":\"low\""));
    }
}
