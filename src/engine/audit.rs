//! Audit trail accumulation.
//!
//! One [`AuditTrail`] instance is threaded through every stage of a
//! calculation. It is the only mutable state in the pipeline; at the end it
//! is sealed into an immutable [`AuditTrace`].

use std::time::Duration;

use crate::models::{AuditStep, AuditTrace, AuditWarning};

/// Append-only ordered log shared across all components for one calculation.
///
/// Step numbers are assigned strictly increasing in causal order. Inputs and
/// outputs are owned [`serde_json::Value`] snapshots of the values that
/// produced the step, so the trace remains valid after the calculation
/// returns.
///
/// # Example
///
/// ```
/// use pay_engine::engine::AuditTrail;
/// use std::time::Duration;
///
/// let mut audit = AuditTrail::new();
/// audit.record(
///     "base_rate_lookup",
///     "Base Rate Lookup",
///     "14.2",
///     serde_json::json!({"classification_code": "care_level_3"}),
///     serde_json::json!({"rate": "28.54"}),
///     "Looked up rate for classification 'care_level_3': $28.54".to_string(),
/// );
///
/// let trace = audit.into_trace(Duration::from_micros(42));
/// assert_eq!(trace.steps.len(), 1);
/// assert_eq!(trace.steps[0].step_number, 1);
/// ```
#[derive(Debug, Default)]
pub struct AuditTrail {
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
    next_step: u32,
}

impl AuditTrail {
    /// Creates an empty audit trail; the first recorded step is number 1.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            warnings: Vec::new(),
            next_step: 1,
        }
    }

    /// Appends a step, assigning it the next step number.
    pub fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        clause_ref: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        self.steps.push(AuditStep {
            step_number: self.next_step,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            clause_ref: clause_ref.to_string(),
            input,
            output,
            reasoning,
        });
        self.next_step += 1;
    }

    /// Appends a warning. Warnings do not consume step numbers.
    pub fn warn(&mut self, code: &str, message: impl Into<String>, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message: message.into(),
            severity: severity.to_string(),
        });
    }

    /// Returns the steps recorded so far.
    pub fn steps(&self) -> &[AuditStep] {
        &self.steps
    }

    /// Seals the trail into an immutable [`AuditTrace`].
    pub fn into_trace(self, elapsed: Duration) -> AuditTrace {
        AuditTrace {
            steps: self.steps,
            warnings: self.warnings,
            duration_us: elapsed.as_micros() as u64,
        }
    }
}
