//! Single-line transfer progress on stderr, redrawn at most every 500 ms.

use sasdl_core::progress::{ProgressSink, TransferProgress};
use std::cell::Cell;
use std::io::{self, Write};
use std::time::{Duration, Instant};

const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Default)]
pub struct StderrProgress {
    last_print: Cell<Option<Instant>>,
    printed: Cell<bool>,
}

impl ProgressSink for StderrProgress {
    fn update(&self, p: &TransferProgress) {
        let now = Instant::now();
        let due = match self.last_print.get() {
            Some(last) => now.duration_since(last) >= PROGRESS_INTERVAL,
            None => true,
        };
        if !due && !p.is_complete() {
            return;
        }
        self.last_print.set(Some(now));
        self.printed.set(true);

        let done_mib = p.bytes_done as f64 / 1_048_576.0;
        let rate_mib = p.bytes_per_sec() / 1_048_576.0;
        let line = match (p.total_bytes, p.fraction()) {
            (Some(total), Some(fraction)) => {
                let eta = p
                    .eta_secs()
                    .map(|s| format!("{:.0}s", s))
                    .unwrap_or_else(|| "?".to_string());
                format!(
                    "{}  {:.1} / {:.1} MiB ({:.1}%)  {:.2} MiB/s  ETA {}  ",
                    p.label,
                    done_mib,
                    total as f64 / 1_048_576.0,
                    fraction * 100.0,
                    rate_mib,
                    eta
                )
            }
            _ => format!("{}  {:.1} MiB  {:.2} MiB/s  ", p.label, done_mib, rate_mib),
        };
        let mut err = io::stderr().lock();
        let _ = write!(err, "\r  {}", line);
        let _ = err.flush();
    }

    fn finish(&self, _label: &str) {
        if self.printed.replace(false) {
            eprintln!();
        }
        self.last_print.set(None);
    }
}
