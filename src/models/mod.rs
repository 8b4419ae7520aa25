//! Core data models for the pay calculation engine.

mod employee;
mod pay_period;
mod result;
mod shift;

pub use employee::{Employee, EmploymentType};
pub use pay_period::{PayPeriod, PublicHoliday};
pub use result::{
    AllowancePayment, AuditStep, AuditTrace, AuditWarning, CalculationResult, PayCategory,
    PayLine, PayTotals,
};
pub use shift::{Break, Shift};
