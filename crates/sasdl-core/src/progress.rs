//! Progress reporting for a single transfer (bytes done, rate, ETA).
//!
//! The transport calls a [`ProgressSink`] from libcurl's progress callback;
//! the CLI renders the snapshots, library callers can ignore them with
//! [`NoProgress`].

/// Snapshot of one transfer.
#[derive(Debug, Clone)]
pub struct TransferProgress {
    /// Short label, usually the remote filename.
    pub label: String,
    pub bytes_done: u64,
    /// Total size if the server sent `Content-Length`.
    pub total_bytes: Option<u64>,
    pub elapsed_secs: f64,
}

impl TransferProgress {
    /// Download rate in bytes per second (0 if elapsed is 0).
    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.bytes_done as f64 / self.elapsed_secs
    }

    /// Fraction complete in [0.0, 1.0], `None` when the size is unknown.
    pub fn fraction(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) => Some(1.0),
            Some(total) => Some((self.bytes_done as f64 / total as f64).min(1.0)),
            None => None,
        }
    }

    /// Estimated seconds remaining (None if size or rate is unknown).
    pub fn eta_secs(&self) -> Option<f64> {
        let remaining = self.total_bytes?.saturating_sub(self.bytes_done);
        if remaining == 0 {
            return Some(0.0);
        }
        let rate = self.bytes_per_sec();
        if rate <= 0.0 {
            return None;
        }
        Some(remaining as f64 / rate)
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.total_bytes, Some(total) if self.bytes_done >= total)
    }
}

/// Receives progress snapshots during a transfer.
pub trait ProgressSink {
    fn update(&self, progress: &TransferProgress);

    /// Called once after the transfer ends, successful or not.
    fn finish(&self, _label: &str) {}
}

/// Discards all progress updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&self, _progress: &TransferProgress) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(done: u64, total: Option<u64>, secs: f64) -> TransferProgress {
        TransferProgress {
            label: "allStar-dr17-synspec.fits".into(),
            bytes_done: done,
            total_bytes: total,
            elapsed_secs: secs,
        }
    }

    #[test]
    fn rate_and_eta() {
        let p = snap(500, Some(1000), 5.0);
        assert!((p.bytes_per_sec() - 100.0).abs() < 1e-9);
        assert!((p.eta_secs().unwrap() - 5.0).abs() < 1e-9);
        assert!((p.fraction().unwrap() - 0.5).abs() < 1e-9);
        assert!(!p.is_complete());
    }

    #[test]
    fn unknown_total() {
        let p = snap(500, None, 5.0);
        assert!(p.fraction().is_none());
        assert!(p.eta_secs().is_none());
        assert!(!p.is_complete());
    }

    #[test]
    fn zero_elapsed_and_done() {
        assert_eq!(snap(0, Some(10), 0.0).bytes_per_sec(), 0.0);
        assert_eq!(snap(0, Some(10), 0.0).eta_secs(), None);
        let done = snap(10, Some(10), 1.0);
        assert_eq!(done.eta_secs(), Some(0.0));
        assert!(done.is_complete());
        assert_eq!(snap(0, Some(0), 0.0).fraction(), Some(1.0));
    }
}
