use chrono::{DateTime, Duration, NaiveDate};

use crate::model::work_item::WorkItemRecord;

/// Keep records whose `System.ChangedDate` falls in `[since, since + days)`.
///
/// Mirrors the date window the upstream WIQL query selects on. Records with
/// an empty or unparsable changed date are dropped — they could never have
/// matched a date comparison.
pub fn filter_by_changed_window(
    records: Vec<WorkItemRecord>,
    since: NaiveDate,
    days: i64,
) -> Vec<WorkItemRecord> {
    let end = since + Duration::days(days);
    records
        .into_iter()
        .filter(|record| {
            DateTime::parse_from_rfc3339(&record.system.changed_date)
                .map(|changed| {
                    let date = changed.date_naive();
                    date >= since && date < end
                })
                .unwrap_or(false)
        })
        .collect()
}
