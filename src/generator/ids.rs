//! Order id allocation.
//!
//! Ids are `{prefix}-{year}-{sequence:05}` with a sequence that is unique
//! across the whole run. Parallel generation hands each worker its own
//! disjoint slice of the sequence, so no counter is shared between threads.

/// A contiguous block of work: sequence numbers `[first_sequence, first_sequence + len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPartition {
    /// Partition position, also used to derive its RNG stream.
    pub index: usize,
    pub first_sequence: u64,
    pub len: usize,
}

impl IdPartition {
    /// Sequence numbers owned by this partition.
    pub fn sequences(&self) -> impl Iterator<Item = u64> {
        self.first_sequence..self.first_sequence + self.len as u64
    }
}

/// Splits `total` records into at most `workers` partitions of near-equal
/// size. Sequences start at 1 and are contiguous across partitions.
pub fn partition(total: usize, workers: usize) -> Vec<IdPartition> {
    let workers = workers.max(1).min(total.max(1));
    let base = total / workers;
    let remainder = total % workers;

    let mut next = 1u64;
    (0..workers)
        .map(|index| {
            let len = base + usize::from(index < remainder);
            let part = IdPartition {
                index,
                first_sequence: next,
                len,
            };
            next += len as u64;
            part
        })
        .collect()
}

/// Formats an order id.
pub fn format_order_id(prefix: &str, year: i32, sequence: u64) -> String {
    format!("{}-{}-{:05}", prefix, year, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_single_partition() {
        let parts = partition(10, 1);
        assert_eq!(
            parts,
            vec![IdPartition {
                index: 0,
                first_sequence: 1,
                len: 10
            }]
        );
    }

    #[test]
    fn test_partitions_cover_range_without_overlap() {
        let parts = partition(103, 4);
        assert_eq!(parts.len(), 4);
        assert_eq!(parts.iter().map(|p| p.len).sum::<usize>(), 103);

        let sequences: Vec<u64> = parts.iter().flat_map(|p| p.sequences()).collect();
        let unique: HashSet<u64> = sequences.iter().copied().collect();
        assert_eq!(unique.len(), 103);
        assert_eq!(sequences, (1..=103).collect::<Vec<u64>>());
    }

    #[test]
    fn test_more_workers_than_records() {
        let parts = partition(3, 8);
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.len == 1));
    }

    #[test]
    fn test_format_order_id() {
        assert_eq!(format_order_id("ORD", 2024, 7), "ORD-2024-00007");
        assert_eq!(format_order_id("ORD", 2025, 123456), "ORD-2025-123456");
    }
}
