//! Irregular extra-income events (bonuses, windfalls, side income)

use serde::{Deserialize, Serialize};

/// Recurrence of an extra-income entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    /// Fires in exactly one calendar month; requires a stored year
    #[serde(rename = "one-time")]
    OneTime,
    /// Fires every month from the stored start month/year onward
    #[serde(rename = "monthly")]
    Monthly,
    /// Fires in the stored month of every year
    #[serde(rename = "yearly")]
    Yearly,
}

/// One irregular income entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraIncomeEntry {
    /// Calendar month, 1-12
    pub month: u32,

    /// Calendar year; required for one-time entries and for the start of
    /// monthly entries
    #[serde(default)]
    pub year: Option<i32>,

    /// Amount received in a firing month
    pub amount: f64,

    pub frequency: Frequency,
}

impl ExtraIncomeEntry {
    /// Whether this entry pays out in the given simulated calendar month
    ///
    /// A one-time entry with no stored year never fires (the generator
    /// warns about such entries up front). A monthly entry with no stored
    /// year is treated as already started.
    pub fn fires_in(&self, year: i32, month: u32) -> bool {
        match self.frequency {
            Frequency::OneTime => self.year == Some(year) && self.month == month,
            Frequency::Yearly => self.month == month,
            Frequency::Monthly => match self.year {
                Some(start_year) => {
                    year > start_year || (year == start_year && month >= self.month)
                }
                None => true,
            },
        }
    }
}
