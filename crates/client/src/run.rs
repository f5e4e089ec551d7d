use std::future::Future;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use kram_common::drop_cache::CacheDropper;
use kram_common::i18n::{localize, Lang, Message};
use kram_common::meminfo::read_memory_stats;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Print one memory snapshot read from `meminfo`.
///
/// A read failure is reported on `err` and is not an error of this function;
/// only failures writing to the console are returned.
pub fn run_check(
    lang: Lang,
    meminfo: &Path,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    match read_memory_stats(meminfo) {
        Ok(snap) => {
            debug!(?snap, "read {}", meminfo.display());
            writeln!(out, "{}", localize(lang, &Message::RamStats))?;
            writeln!(out, "{}", localize(lang, &Message::Total(snap.total_mb)))?;
            writeln!(out, "{}", localize(lang, &Message::Free(snap.free_mb)))?;
            writeln!(out, "{}", localize(lang, &Message::Available(snap.available_mb)))?;
        }
        Err(e) => {
            writeln!(err, "{}", localize(lang, &Message::StatsError(&e)))?;
        }
    }
    Ok(())
}

/// Drop caches every `interval` until `shutdown` resolves.
///
/// The first drop happens immediately. A failed drop is reported on `err`
/// and the loop carries on. `shutdown` is polled during each sleep, so the
/// loop stops within one interval of cancellation. Returns the number of
/// drops attempted.
///
/// Failing to write to `out` or `err` (e.g. stdout closed by `| head`) is
/// the only error; it ends the loop.
pub async fn run_daemon<F>(
    lang: Lang,
    dropper: &CacheDropper,
    interval: Duration,
    out: &mut impl Write,
    err: &mut impl Write,
    shutdown: F,
) -> io::Result<u64>
where
    F: Future<Output = ()>,
{
    writeln!(out, "{}", localize(lang, &Message::DaemonStart))?;
    info!(
        "dropping caches via {} every {}s",
        dropper.path().display(),
        interval.as_secs_f64()
    );

    tokio::pin!(shutdown);
    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        match dropper.drop_caches() {
            Ok(()) => {
                let ts = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
                writeln!(out, "{}", localize(lang, &Message::CacheCleared(&ts)))?;
            }
            Err(e) => {
                writeln!(err, "{}", localize(lang, &Message::CacheError(&e)))?;
            }
        }
        out.flush()?;

        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    info!("daemon stopped after {attempts} drop attempts");
    Ok(attempts)
}
