//! Top-k ranking of classifier score rows.

use crate::core::constants::digit_class_labels;

/// Result structure for top-k score ranking.
///
/// Contains the top-k class indexes, their confidence scores, and the
/// matching label names for a single prediction.
#[derive(Debug, Clone)]
pub struct TopkResult {
    /// Class indexes ordered by descending score.
    pub indexes: Vec<usize>,
    /// Scores corresponding to the indexes.
    pub scores: Vec<f32>,
    /// Label names corresponding to the indexes.
    pub labels: Vec<String>,
}

/// A processor for extracting the top-k entries from a class-score row.
///
/// Scores are ranked descending; ties keep the lower class index first so
/// ranking is deterministic.
#[derive(Debug)]
pub struct Topk {
    class_labels: Vec<String>,
}

impl Topk {
    /// Creates a Topk processor with the given class labels.
    ///
    /// The vector index corresponds to the class ID.
    pub fn new(class_labels: Vec<String>) -> Self {
        Self { class_labels }
    }

    /// Creates a Topk processor labelled with the ten digits "0" to "9".
    pub fn for_digits() -> Self {
        Self::new(digit_class_labels())
    }

    /// Number of classes this processor knows labels for.
    pub fn num_classes(&self) -> usize {
        self.class_labels.len()
    }

    /// Ranks a score row and returns its top-k entries.
    ///
    /// # Arguments
    ///
    /// * `scores` - Confidence scores for all classes, one per class ID
    /// * `k` - Number of top entries to extract (must be > 0; capped at
    ///   the number of scores)
    ///
    /// # Returns
    ///
    /// * `Ok(TopkResult)` - Indexes, scores, and labels ranked descending
    /// * `Err(String)` - If k is 0 or the score row is empty
    pub fn process(&self, scores: &[f32], k: usize) -> Result<TopkResult, String> {
        if k == 0 {
            return Err("k must be greater than 0".to_string());
        }

        if scores.is_empty() {
            return Err("empty score row".to_string());
        }

        let mut indexed: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let effective_k = k.min(indexed.len());
        let top: Vec<(usize, f32)> = indexed.into_iter().take(effective_k).collect();

        let labels = top
            .iter()
            .map(|&(idx, _)| {
                self.class_labels
                    .get(idx)
                    .cloned()
                    .unwrap_or_else(|| idx.to_string())
            })
            .collect();
        let (indexes, scores) = top.into_iter().unzip();

        Ok(TopkResult {
            indexes,
            scores,
            labels,
        })
    }
}

impl Default for Topk {
    /// Creates a Topk processor for the ten digit classes.
    fn default() -> Self {
        Self::for_digits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topk_ranks_descending() {
        let topk = Topk::for_digits();
        let scores = vec![0.05, 0.1, 0.6, 0.05, 0.02, 0.02, 0.02, 0.02, 0.02, 0.1];

        let result = topk.process(&scores, 3).unwrap();
        assert_eq!(result.indexes[0], 2);
        assert_eq!(result.labels[0], "2");
        assert!((result.scores[0] - 0.6).abs() < 1e-6);
        assert_eq!(result.indexes.len(), 3);
    }

    #[test]
    fn test_topk_k_larger_than_classes() {
        let topk = Topk::for_digits();
        let scores = vec![0.4, 0.6];
        let result = topk.process(&scores, 5).unwrap();
        assert_eq!(result.indexes, vec![1, 0]);
    }

    #[test]
    fn test_topk_invalid_inputs() {
        let topk = Topk::for_digits();
        assert!(topk.process(&[0.5, 0.5], 0).is_err());
        assert!(topk.process(&[], 1).is_err());
    }

    #[test]
    fn test_unknown_index_falls_back_to_number() {
        let topk = Topk::new(vec!["a".to_string()]);
        let result = topk.process(&[0.1, 0.9], 2).unwrap();
        assert_eq!(result.labels, vec!["1", "a"]);
    }
}
