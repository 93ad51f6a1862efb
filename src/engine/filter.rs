//! Date filtering over the loaded punch records.

use crate::models::PunchRecord;

/// Returns true if `record` passes `filter`.
///
/// A blank filter passes everything. A filter containing `/` must equal the
/// record's `DD/MM/YYYY` date; any other filter must be a substring of it.
pub fn matches_date_filter(record: &PunchRecord, filter: &str) -> bool {
    let filter = filter.trim();
    if filter.is_empty() {
        return true;
    }

    let date = record.date_br();
    if filter.contains('/') {
        date == filter
    } else {
        date.contains(filter)
    }
}

/// Positions of the records passing `filter`, in order.
pub fn filter_indices(records: &[PunchRecord], filter: &str) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_date_filter(record, filter))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<PunchRecord> {
        vec![
            PunchRecord::new("52998224725", "2024-03-10", "08:00"),
            PunchRecord::new("52998224725", "2024-03-11", "08:00"),
            PunchRecord::new("11144477735", "2024-04-10", "08:00"),
        ]
    }

    #[test]
    fn test_blank_filter_keeps_everything() {
        assert_eq!(filter_indices(&records(), "  "), vec![0, 1, 2]);
    }

    #[test]
    fn test_slash_filter_is_exact() {
        assert_eq!(filter_indices(&records(), "10/03/2024"), vec![0]);
        assert!(filter_indices(&records(), "10/03").is_empty());
    }

    #[test]
    fn test_plain_filter_is_substring() {
        assert_eq!(filter_indices(&records(), "2024"), vec![0, 1, 2]);
        assert_eq!(filter_indices(&records(), "10"), vec![0, 2]);
    }
}
