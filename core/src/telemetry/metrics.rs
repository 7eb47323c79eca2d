use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    files_read: usize,
    files_skipped: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                files_read: 0,
                files_skipped: 0,
            }),
        }
    }

    pub fn record_file_read(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.files_read += 1;
        }
    }

    pub fn record_file_skipped(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.files_skipped += 1;
        }
    }

    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.files_read, metrics.files_skipped)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_counts() {
        let recorder = MetricsRecorder::new();
        recorder.record_file_read();
        recorder.record_file_read();
        recorder.record_file_skipped();
        assert_eq!(recorder.snapshot(), (2, 1));
    }
}
