//! Splitting of oversized groups into contiguous chunks.

/// Cuts `items` into at most `split_count` contiguous chunks of
/// `ceil(len / split_count)` items; the last chunk may be shorter.
///
/// A split count of zero is treated as one. Concatenating the chunks gives
/// back `items` unchanged.
pub fn split_group<T: Clone>(items: &[T], split_count: usize) -> Vec<Vec<T>> {
    if items.is_empty() {
        return Vec::new();
    }
    let part_size = items.len().div_ceil(split_count.max(1));
    items.chunks(part_size).map(<[T]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_split() {
        assert_eq!(split_group(&[1, 2, 3], 1), vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_last_chunk_shorter() {
        assert_eq!(split_group(&[1, 2, 3, 4, 5], 2), vec![vec![1, 2, 3], vec![4, 5]]);
    }

    #[test]
    fn test_fewer_chunks_than_splits() {
        // ceil(10 / 8) = 2 per chunk, so only five chunks are needed.
        let items: Vec<u32> = (0..10).collect();
        let chunks = split_group(&items, 8);
        assert_eq!(chunks.len(), 5);
        assert!(chunks.iter().all(|c| c.len() == 2));
    }

    #[test]
    fn test_more_splits_than_items() {
        assert_eq!(split_group(&['a', 'b'], 5), vec![vec!['a'], vec!['b']]);
    }

    #[test]
    fn test_empty_and_zero() {
        assert!(split_group::<u8>(&[], 3).is_empty());
        assert_eq!(split_group(&[7, 8], 0), vec![vec![7, 8]]);
    }

    #[test]
    fn test_concatenation_reproduces_group() {
        let items: Vec<u32> = (0..1_681).collect();
        for splits in 1..=12 {
            let rejoined: Vec<u32> = split_group(&items, splits).concat();
            assert_eq!(rejoined, items);
        }
    }
}
