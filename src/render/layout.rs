//! Grouping of extracted records into output tables.

use crate::domain::{Bucket, CallRecord, Category};

/// Records of one bucket, sorted by serial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketTable {
    pub bucket: Bucket,
    pub rows: Vec<CallRecord>,
}

/// A top-level heading and the non-empty tables beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: Category,
    pub tables: Vec<BucketTable>,
}

/// The statement as it will be drawn: categories in fixed order, each
/// holding only buckets that have rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementLayout {
    pub groups: Vec<CategoryGroup>,
}

impl StatementLayout {
    /// Partitions `records` into buckets, ignoring their original position.
    ///
    /// Serial numbers are not monotonic across the side-by-side halves of
    /// the source layout, so each bucket is sorted on its own. The sort is stable:
    /// duplicate serials keep their extraction order.
    pub fn from_records(records: Vec<CallRecord>) -> Self {
        let mut by_bucket: [Vec<CallRecord>; 3] = Default::default();
        for record in records {
            by_bucket[bucket_index(record.bucket)].push(record);
        }
        for rows in &mut by_bucket {
            rows.sort_by(|a, b| a.serial_key().cmp(&b.serial_key()));
        }

        let groups = Category::ALL
            .iter()
            .filter_map(|&category| {
                let tables: Vec<BucketTable> = category
                    .buckets()
                    .iter()
                    .filter_map(|&bucket| {
                        let rows = std::mem::take(&mut by_bucket[bucket_index(bucket)]);
                        (!rows.is_empty()).then_some(BucketTable { bucket, rows })
                    })
                    .collect();
                (!tables.is_empty()).then_some(CategoryGroup { category, tables })
            })
            .collect();

        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates over every table in output order.
    pub fn tables(&self) -> impl Iterator<Item = &BucketTable> {
        self.groups.iter().flat_map(|group| group.tables.iter())
    }

    pub fn record_count(&self) -> usize {
        self.tables().map(|table| table.rows.len()).sum()
    }

    /// Number of rows rendered under `bucket`.
    pub fn count(&self, bucket: Bucket) -> usize {
        self.tables()
            .find(|table| table.bucket == bucket)
            .map_or(0, |table| table.rows.len())
    }
}

fn bucket_index(bucket: Bucket) -> usize {
    match bucket {
        Bucket::LocalMobile => 0,
        Bucket::StdAirtel => 1,
        Bucket::StdOther => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CallRecordMatcher, RecordFields};

    fn record(serial: u64, bucket: Bucket) -> CallRecord {
        let line = format!("{serial} 01/JAN/2024 10:00:00 9876543210 00:30 1 1.50");
        let fields: RecordFields<'_> = CallRecordMatcher::new().extract_all(&line)[0];
        CallRecord::new(fields, String::new(), bucket)
    }

    #[test]
    fn test_sorted_per_bucket() {
        let layout = StatementLayout::from_records(vec![
            record(12, Bucket::StdOther),
            record(3, Bucket::LocalMobile),
            record(2, Bucket::StdOther),
            record(1, Bucket::LocalMobile),
            record(100, Bucket::StdOther),
            record(9, Bucket::StdOther),
        ]);

        let serials = |bucket: Bucket| -> Vec<&str> {
            layout
                .tables()
                .find(|t| t.bucket == bucket)
                .map(|t| t.rows.iter().map(|r| r.serial.as_str()).collect())
                .unwrap_or_default()
        };
        assert_eq!(serials(Bucket::LocalMobile), vec!["1", "3"]);
        assert_eq!(serials(Bucket::StdOther), vec!["2", "9", "12", "100"]);
        assert_eq!(layout.record_count(), 6);
    }

    #[test]
    fn test_empty_buckets_and_categories_omitted() {
        let layout = StatementLayout::from_records(vec![record(1, Bucket::StdAirtel)]);

        assert_eq!(layout.groups.len(), 1);
        assert_eq!(layout.groups[0].category, Category::StdCalls);
        assert_eq!(layout.groups[0].tables.len(), 1);
        assert_eq!(layout.groups[0].tables[0].bucket, Bucket::StdAirtel);
        assert_eq!(layout.count(Bucket::LocalMobile), 0);
    }

    #[test]
    fn test_fixed_bucket_order() {
        let layout = StatementLayout::from_records(vec![
            record(1, Bucket::StdOther),
            record(1, Bucket::StdAirtel),
            record(1, Bucket::LocalMobile),
        ]);
        let order: Vec<_> = layout.tables().map(|t| t.bucket).collect();
        assert_eq!(order, Bucket::ALL.to_vec());
    }

    #[test]
    fn test_duplicate_serials_kept() {
        let layout = StatementLayout::from_records(vec![
            record(4, Bucket::LocalMobile),
            record(4, Bucket::LocalMobile),
        ]);
        assert_eq!(layout.count(Bucket::LocalMobile), 2);
    }

    #[test]
    fn test_no_records() {
        let layout = StatementLayout::from_records(Vec::new());
        assert!(layout.is_empty());
        assert_eq!(layout.record_count(), 0);
    }
}
