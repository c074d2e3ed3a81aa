use chrono::NaiveDate;

use crate::agenda::dated::DatedAssignment;

/// Assignments due on the selected calendar day, in input order.
///
/// No selection yields nothing rather than everything.
pub fn select_day(dated: &[DatedAssignment], selected: Option<NaiveDate>) -> Vec<&DatedAssignment> {
    match selected {
        Some(day) => dated.iter().filter(|d| d.date == day).collect(),
        None => Vec::new(),
    }
}
