use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use kram_client::cli::{Args, Mode};
use kram_client::run::{run_check, run_daemon};
use kram_common::config::{config_source, load_config};
use kram_common::drop_cache::CacheDropper;
use kram_common::i18n::{localize, Lang};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    kram_common::logging::init("warn");

    let args = Args::parse();
    let mode = Mode::select(&args);

    // Version, help and the hint take their language from --lang only.
    if let Some(msg) = mode.display_message() {
        let lang = resolve_lang(args.lang.as_deref().unwrap_or(Lang::En.tag()));
        println!("{}", localize(lang, &msg));
        return Ok(());
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(lang) = &args.lang {
        config.lang = lang.clone();
    }
    let lang = resolve_lang(&config.lang);
    config.lang = lang.tag().to_string();

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();

    match mode {
        Mode::PrintConfig => {
            let source = config_source(args.config.as_deref())
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none, built-in defaults".to_string());
            let toml = toml::to_string_pretty(&config).context("serializing config to TOML")?;
            println!("# Effective configuration (file: {source})");
            println!("# Values shown include defaults for any fields not set in your file.");
            println!();
            print!("{toml}");
        }
        Mode::Check => {
            run_check(lang, &config.paths.meminfo, &mut stdout.lock(), &mut stderr.lock())
                .context("writing to console")?;
        }
        Mode::Daemon => {
            let interval = config.daemon.interval()?;
            let dropper = CacheDropper::new(config.paths.drop_caches.clone());
            run_daemon(
                lang,
                &dropper,
                interval,
                &mut stdout.lock(),
                &mut stderr.lock(),
                shutdown_signal(),
            )
            .await
            .context("writing to console")?;
        }
        // Answered before the config was loaded.
        Mode::Version | Mode::Help | Mode::Hint => {}
    }

    stdout.lock().flush().context("flushing stdout")?;
    Ok(())
}

/// Resolve a language tag, printing the fallback warning on stdout.
fn resolve_lang(tag: &str) -> Lang {
    let (lang, warning) = Lang::resolve(tag);
    if let Some(warning) = warning {
        println!("{warning}");
    }
    lang
}

/// Resolves on Ctrl-C / SIGINT. If the handler cannot be installed the
/// daemon runs until the process is killed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
