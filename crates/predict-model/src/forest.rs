//! Seeded random-forest classifier.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use predict_core::error::ModelError;
use predict_core::traits::Classifier;
use predict_core::types::Label;

/// Forest hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees
    pub n_trees: usize,
    /// Maximum depth per tree
    pub max_depth: usize,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Seed for bootstrap sampling and feature subsampling
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 5,
            seed: 42,
        }
    }
}

/// A single tree node. Leaves carry the majority class in raw form.
#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf {
        label: u8,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn predict(&self, row: &[f64]) -> u8 {
        match self {
            Node::Leaf { label } => *label,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if row[*feature] <= *threshold {
                    left.predict(row)
                } else {
                    right.predict(row)
                }
            }
        }
    }
}

/// Bootstrap-aggregated ensemble of gini-split decision trees.
///
/// Fully deterministic for a given seed: bootstrap samples, feature
/// subsets, and therefore the fitted trees are reproducible. The whole
/// fitted state serializes with serde so it can live inside a model
/// artifact blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestClassifier {
    config: ForestConfig,
    trees: Vec<Node>,
    n_features: usize,
}

impl ForestClassifier {
    /// Create an unfitted forest.
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            n_features: 0,
        }
    }

    /// Number of fitted trees.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn build_tree(
        &self,
        x: &[Vec<f64>],
        y: &[u8],
        indices: &[usize],
        depth: usize,
        max_features: usize,
        rng: &mut StdRng,
    ) -> Node {
        let ups = indices.iter().filter(|&&i| y[i] == 1).count();
        let majority = if ups * 2 >= indices.len() { 1 } else { 0 };

        let impurity = gini(ups, indices.len());
        if depth >= self.config.max_depth
            || indices.len() < self.config.min_samples_split
            || impurity < 1e-12
        {
            return Node::Leaf { label: majority };
        }

        match self.best_split(x, y, indices, max_features, rng) {
            Some((feature, threshold, left_idx, right_idx)) => {
                let left = self.build_tree(x, y, &left_idx, depth + 1, max_features, rng);
                let right = self.build_tree(x, y, &right_idx, depth + 1, max_features, rng);
                Node::Split {
                    feature,
                    threshold,
                    left: Box::new(left),
                    right: Box::new(right),
                }
            }
            None => Node::Leaf { label: majority },
        }
    }

    /// Exhaustive threshold search over a random feature subset.
    fn best_split(
        &self,
        x: &[Vec<f64>],
        y: &[u8],
        indices: &[usize],
        max_features: usize,
        rng: &mut StdRng,
    ) -> Option<(usize, f64, Vec<usize>, Vec<usize>)> {
        let mut features: Vec<usize> = (0..self.n_features).collect();
        features.shuffle(rng);
        features.truncate(max_features);

        let total_ups = indices.iter().filter(|&&i| y[i] == 1).count();
        let mut best: Option<(usize, f64, f64)> = None; // (feature, threshold, score)

        for &feature in &features {
            let mut values: Vec<f64> = indices.iter().map(|&i| x[i][feature]).collect();
            values.sort_by(|a, b| a.total_cmp(b));
            values.dedup();

            for pair in values.windows(2) {
                let threshold = (pair[0] + pair[1]) / 2.0;

                let mut left_n = 0usize;
                let mut left_ups = 0usize;
                for &i in indices {
                    if x[i][feature] <= threshold {
                        left_n += 1;
                        left_ups += (y[i] == 1) as usize;
                    }
                }
                let right_n = indices.len() - left_n;
                if left_n == 0 || right_n == 0 {
                    continue;
                }

                let right_ups = total_ups - left_ups;
                let score = (left_n as f64 * gini(left_ups, left_n)
                    + right_n as f64 * gini(right_ups, right_n))
                    / indices.len() as f64;

                if best.map_or(true, |(_, _, s)| score < s) {
                    best = Some((feature, threshold, score));
                }
            }
        }

        best.map(|(feature, threshold, _)| {
            let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .copied()
                .partition(|&i| x[i][feature] <= threshold);
            (feature, threshold, left_idx, right_idx)
        })
    }
}

impl Classifier for ForestClassifier {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[Label]) -> Result<(), ModelError> {
        if features.is_empty() || features.len() != labels.len() {
            return Err(ModelError::InsufficientData {
                required: 1,
                available: features.len().min(labels.len()),
            });
        }

        self.n_features = features[0].len();
        let y: Vec<u8> = labels.iter().map(|l| l.as_raw()).collect();
        let n = features.len();
        let max_features = (self.n_features as f64).sqrt().ceil() as usize;

        let trees: Vec<Node> = (0..self.config.n_trees)
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(t as u64));
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                self.build_tree(features, &y, &sample, 0, max_features, &mut rng)
            })
            .collect();
        self.trees = trees;

        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> Result<Label, ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::NotFitted);
        }
        if row.len() != self.n_features {
            return Err(ModelError::InvalidParameter(format!(
                "expected {} features, got {}",
                self.n_features,
                row.len()
            )));
        }

        let votes: usize = self.trees.iter().map(|t| t.predict(row) as usize).sum();
        let raw = if votes * 2 > self.trees.len() { 1 } else { 0 };
        Ok(Label::from_raw(raw))
    }

    fn name(&self) -> &str {
        "random-forest"
    }
}

fn gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold_dataset(n: usize) -> (Vec<Vec<f64>>, Vec<Label>) {
        let features: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64 / 10.0, 1.0]).collect();
        let labels: Vec<Label> = (0..n)
            .map(|i| if i as f64 / 10.0 > 5.0 { Label::Up } else { Label::Down })
            .collect();
        (features, labels)
    }

    #[test]
    fn test_learns_threshold_rule() {
        let (x, y) = threshold_dataset(200);
        let mut forest = ForestClassifier::new(ForestConfig {
            n_trees: 20,
            max_depth: 5,
            ..Default::default()
        });
        forest.fit(&x, &y).unwrap();

        assert_eq!(forest.n_trees(), 20);
        assert_eq!(forest.predict_row(&[9.0, 1.0]).unwrap(), Label::Up);
        assert_eq!(forest.predict_row(&[1.0, 1.0]).unwrap(), Label::Down);
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let forest = ForestClassifier::new(ForestConfig::default());
        assert!(matches!(
            forest.predict_row(&[1.0]),
            Err(ModelError::NotFitted)
        ));
    }

    #[test]
    fn test_predict_rejects_wrong_row_length() {
        let (x, y) = threshold_dataset(60);
        let mut forest = ForestClassifier::new(ForestConfig {
            n_trees: 5,
            ..Default::default()
        });
        forest.fit(&x, &y).unwrap();

        assert!(matches!(
            forest.predict_row(&[1.0]),
            Err(ModelError::InvalidParameter(_))
        ));
        assert!(matches!(
            forest.predict_row(&[1.0, 2.0, 3.0]),
            Err(ModelError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_fit_rejects_empty_input() {
        let mut forest = ForestClassifier::new(ForestConfig::default());
        assert!(forest.fit(&[], &[]).is_err());
    }

    #[test]
    fn test_same_seed_same_predictions() {
        let (x, y) = threshold_dataset(120);
        let config = ForestConfig {
            n_trees: 10,
            ..Default::default()
        };

        let mut a = ForestClassifier::new(config.clone());
        let mut b = ForestClassifier::new(config);
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();

        for row in &x {
            assert_eq!(a.predict_row(row).unwrap(), b.predict_row(row).unwrap());
        }
    }

    #[test]
    fn test_serde_round_trip_preserves_predictions() {
        let (x, y) = threshold_dataset(100);
        let mut forest = ForestClassifier::new(ForestConfig {
            n_trees: 5,
            ..Default::default()
        });
        forest.fit(&x, &y).unwrap();

        let blob = serde_json::to_string(&forest).unwrap();
        let restored: ForestClassifier = serde_json::from_str(&blob).unwrap();

        for row in &x {
            assert_eq!(
                forest.predict_row(row).unwrap(),
                restored.predict_row(row).unwrap()
            );
        }
    }
}
