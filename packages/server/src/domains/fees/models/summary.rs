use rust_decimal::Decimal;
use serde::Serialize;

use super::fee::Fee;

/// A student's fee ledger with the amount still owed
#[derive(Debug, Clone, Serialize)]
pub struct StudentFeeSummary {
    pub fees: Vec<Fee>,
    /// Pending plus overdue
    pub total_pending: Decimal,
    pub total_paid: Decimal,
}

impl StudentFeeSummary {
    pub fn from_fees(fees: Vec<Fee>) -> Self {
        let (total_pending, total_paid) =
            fees.iter()
                .fold((Decimal::ZERO, Decimal::ZERO), |(owed, paid), fee| {
                    if fee.status.is_outstanding() {
                        (owed + fee.amount, paid)
                    } else {
                        (owed, paid + fee.amount)
                    }
                });

        Self {
            fees,
            total_pending,
            total_paid,
        }
    }
}
