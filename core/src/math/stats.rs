pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Sample standard deviation (n - 1 denominator). Fewer than two
    /// values carry no spread information and yield 0.
    pub fn std_dev(values: &[f64]) -> f64 {
        if values.len() < 2 {
            return 0.0;
        }
        let mean = Self::mean(values);
        let sum_sq: f64 = values.iter().map(|&v| (v - mean) * (v - mean)).sum();
        (sum_sq / (values.len() - 1) as f64).sqrt()
    }

    pub fn min(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}
