//! Running and daily totals shown at the top of the dashboard.

use time::Date;

use crate::record::{PaymentMode, Record};

/// The figures shown on the dashboard.
///
/// Collections are bucketed by their normalized payment mode. A collection
/// whose mode is neither cash nor online counts towards none of the totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardTotals {
    /// Cash collections, all dates.
    pub total_cash: f64,
    /// Online collections, all dates.
    pub total_online: f64,
    /// All expenses regardless of mode, all dates.
    pub total_expense: f64,
    /// `total_cash + total_online - total_expense`
    pub net: f64,
    /// Cash collections dated today.
    pub today_cash: f64,
    /// Online collections dated today.
    pub today_online: f64,
    /// `today_cash + today_online`
    pub today_total: f64,
    /// Expenses dated today, any mode.
    pub today_expense: f64,
}

impl DashboardTotals {
    /// Compute the totals from every record, where `today` is the current
    /// date in the local timezone.
    pub fn from_records(collections: &[Record], expenses: &[Record], today: Date) -> Self {
        let mut totals = Self::default();

        for collection in collections {
            let is_today = collection.date.date() == today;

            match PaymentMode::normalize(&collection.mode) {
                Some(PaymentMode::Cash) => {
                    totals.total_cash += collection.amount;
                    if is_today {
                        totals.today_cash += collection.amount;
                    }
                }
                Some(PaymentMode::Online) => {
                    totals.total_online += collection.amount;
                    if is_today {
                        totals.today_online += collection.amount;
                    }
                }
                None => {}
            }
        }

        for expense in expenses {
            totals.total_expense += expense.amount;
            if expense.date.date() == today {
                totals.today_expense += expense.amount;
            }
        }

        totals.net = totals.total_cash + totals.total_online - totals.total_expense;
        totals.today_total = totals.today_cash + totals.today_online;

        totals
    }
}
