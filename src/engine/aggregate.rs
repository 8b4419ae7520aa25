//! Pay line and allowance aggregation.

use rust_decimal::Decimal;

use crate::models::{AllowancePayment, PayLine, PayTotals};

/// Reduces pay lines and allowances to [`PayTotals`].
///
/// `gross_pay` is the exact sum of every line amount and allowance amount;
/// no rounding is performed. Hour totals group by category: weekday ordinary
/// categories into `ordinary_hours`, overtime categories into
/// `overtime_hours`, and the non-overtime weekend categories into
/// `penalty_hours` (a weekend ordinary line is the weekend day's ordinary
/// time, counted as penalty hours).
pub fn aggregate(pay_lines: &[PayLine], allowances: &[AllowancePayment]) -> PayTotals {
    let pay_lines_total: Decimal = pay_lines.iter().map(|pl| pl.amount).sum();
    let allowances_total: Decimal = allowances.iter().map(|a| a.amount).sum();

    let ordinary_hours = pay_lines
        .iter()
        .filter(|pl| pl.category.is_ordinary())
        .map(|pl| pl.hours)
        .sum();

    let overtime_hours = pay_lines
        .iter()
        .filter(|pl| pl.category.is_overtime())
        .map(|pl| pl.hours)
        .sum();

    let penalty_hours = pay_lines
        .iter()
        .filter(|pl| pl.category.is_penalty())
        .map(|pl| pl.hours)
        .sum();

    PayTotals {
        gross_pay: pay_lines_total + allowances_total,
        ordinary_hours,
        overtime_hours,
        penalty_hours,
        allowances_total,
    }
}
