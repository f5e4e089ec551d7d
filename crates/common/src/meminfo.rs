use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

pub const DEFAULT_MEMINFO_PATH: &str = "/proc/meminfo";

/// System memory counters in megabytes, as reported by the kernel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub total_mb: u64,
    pub free_mb: u64,
    pub available_mb: u64,
}

/// Read and parse a meminfo-formatted file (normally `/proc/meminfo`).
///
/// Fails only if the file cannot be read. `MemAvailable` includes free RAM
/// plus reclaimable page cache; on kernels or containers that omit it the
/// field stays zero.
pub fn read_memory_stats(path: &Path) -> Result<MemorySnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(parse_meminfo(&text))
}

/// Parse the `Label:  value kB` lines of meminfo text.
///
/// Lines with fewer than two tokens and unrecognised labels are skipped.
/// A recognised label whose value is not an integer counts as zero; the
/// coercion is logged so a changed kernel format does not go unnoticed.
pub fn parse_meminfo(text: &str) -> MemorySnapshot {
    let mut snapshot = MemorySnapshot::default();
    for line in text.lines() {
        let mut parts = line.split_whitespace();
        let (Some(label), Some(raw)) = (parts.next(), parts.next()) else {
            continue;
        };
        let slot = match label {
            "MemTotal:" => &mut snapshot.total_mb,
            "MemFree:" => &mut snapshot.free_mb,
            "MemAvailable:" => &mut snapshot.available_mb,
            _ => continue,
        };
        let kb = raw.parse::<u64>().unwrap_or_else(|e| {
            warn!("meminfo: {label} has non-numeric value {raw:?} ({e}), using 0");
            0
        });
        *slot = kb / 1024;
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;

    /// Collects the message of every WARN event.
    #[derive(Clone, Default)]
    struct WarnCollector(Arc<Mutex<Vec<String>>>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCollector {
        fn on_event(&self, event: &tracing::Event<'_>, _cx: Context<'_, S>) {
            if *event.metadata().level() != tracing::Level::WARN {
                return;
            }
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            self.0.lock().unwrap().push(visitor.0);
        }
    }

    #[derive(Default)]
    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    fn parse_collecting_warnings(text: &str) -> (MemorySnapshot, Vec<String>) {
        let collector = WarnCollector::default();
        let subscriber = tracing_subscriber::registry().with(collector.clone());
        let snap = tracing::subscriber::with_default(subscriber, || parse_meminfo(text));
        let warnings = collector.0.lock().unwrap().clone();
        (snap, warnings)
    }

    #[test]
    fn test_parse_typical_meminfo() {
        let text = "MemTotal:       16384000 kB\nMemFree:        2048000 kB\nMemAvailable:   8192000 kB\n";
        assert_eq!(
            parse_meminfo(text),
            MemorySnapshot { total_mb: 16000, free_mb: 2000, available_mb: 8000 }
        );
    }

    #[test]
    fn test_parse_any_order_with_unknown_lines() {
        let text = "\
Buffers:          123456 kB
MemAvailable:     204800 kB
Cached:          9999999 kB
MemFree:          102400 kB
HugePages_Total:       0
MemTotal:         409600 kB
";
        assert_eq!(
            parse_meminfo(text),
            MemorySnapshot { total_mb: 400, free_mb: 100, available_mb: 200 }
        );
    }

    #[test]
    fn test_parse_rounds_down() {
        let snap = parse_meminfo("MemTotal: 2047 kB\nMemFree: 1023 kB\n");
        assert_eq!(snap.total_mb, 1);
        assert_eq!(snap.free_mb, 0);
    }

    #[test]
    fn test_parse_no_recognised_lines() {
        assert_eq!(parse_meminfo(""), MemorySnapshot::default());
        assert_eq!(parse_meminfo("SwapTotal: 1024 kB\nfoo\n\n"), MemorySnapshot::default());
    }

    #[test]
    fn test_parse_non_numeric_is_zero() {
        assert_eq!(parse_meminfo("MemTotal: abc kB\n"), MemorySnapshot::default());

        let snap = parse_meminfo("MemTotal: -5 kB\nMemFree: 4096 kB\n");
        assert_eq!(snap.total_mb, 0);
        assert_eq!(snap.free_mb, 4);
    }

    #[test]
    fn test_non_numeric_value_is_logged() {
        let (snap, warnings) = parse_collecting_warnings("MemTotal: abc kB\nMemFree: 2048 kB\n");
        assert_eq!(snap.total_mb, 0);
        assert_eq!(warnings.len(), 1, "warnings={warnings:?}");
        assert!(warnings[0].contains("MemTotal:"), "warning={}", warnings[0]);
        assert!(warnings[0].contains("\"abc\""), "warning={}", warnings[0]);
    }

    #[test]
    fn test_well_formed_and_unknown_lines_log_nothing() {
        let (_, warnings) = parse_collecting_warnings("MemTotal: 2048 kB\nCached: junk kB\n");
        assert!(warnings.is_empty(), "warnings={warnings:?}");
    }

    #[test]
    fn test_parse_single_token_line_ignored() {
        assert_eq!(parse_meminfo("MemTotal:\nMemFree: 2048 kB"), MemorySnapshot {
            total_mb: 0,
            free_mb: 2,
            available_mb: 0,
        });
    }

    #[test]
    fn test_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meminfo");
        std::fs::write(&path, "MemTotal: 1048576 kB\nMemAvailable: 524288 kB\n").unwrap();

        let snap = read_memory_stats(&path).unwrap();
        assert_eq!(snap, MemorySnapshot { total_mb: 1024, free_mb: 0, available_mb: 512 });
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_memory_stats(&dir.path().join("absent")).unwrap_err();
        let io = err.downcast_ref::<std::io::Error>().expect("io error in chain");
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }
}
