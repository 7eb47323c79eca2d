use crate::dataset::{DetailRecord, SoundType};

/// Binary classification counts over pooled detail rows, with gunshot as
/// the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    pub fn from_outcomes(records: &[DetailRecord]) -> Self {
        let mut matrix = Self::default();
        for record in records {
            match (record.sound_type, record.detected_as_gunshot) {
                (SoundType::Gunshot, true) => matrix.true_positives += 1,
                (SoundType::Gunshot, false) => matrix.false_negatives += 1,
                (SoundType::Ambient, true) => matrix.false_positives += 1,
                (SoundType::Ambient, false) => matrix.true_negatives += 1,
            }
        }
        matrix
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    pub fn accuracy(&self) -> f64 {
        percent(self.true_positives + self.true_negatives, self.total())
    }

    pub fn precision(&self) -> f64 {
        percent(self.true_positives, self.true_positives + self.false_positives)
    }

    pub fn recall(&self) -> f64 {
        percent(self.true_positives, self.true_positives + self.false_negatives)
    }

    pub fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            return 0.0;
        }
        2.0 * p * r / (p + r)
    }
}

fn percent(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64 * 100.0
}
