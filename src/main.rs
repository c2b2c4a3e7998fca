//! Entry point. Wires Config -> Snapshot source -> Dashboard state -> Voice.

use anyhow::Context;
use directories::ProjectDirs;
use dotenvy::dotenv;
use std::{path::PathBuf, time::Duration};
use tracing::{debug, error, info, Level};
use tracing_subscriber::EnvFilter;

use market_brief::analytics::{
    earnings_summary, market_updates, portfolio_alerts, risk_band, total_position_value,
};
use market_brief::config::AppConfig;
use market_brief::generator::MarketGenerator;
use market_brief::source::MockMarketSource;
use market_brief::state::DashboardState;
use market_brief::voice::{ConsoleVoice, RecognitionError, VoiceSession};

enum Event {
    Tick,
    Heard(Result<String, RecognitionError>),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    // stdout is the speech channel; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let mut cfg = load_config()?;
    if let Some(seed) = std::env::var("MARKET_BRIEF_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
    {
        cfg.refresh.seed = Some(seed);
    }

    let mut source = MockMarketSource::new(MarketGenerator::from_config(&cfg), cfg.refresh.seed);
    let mut state = DashboardState::default();
    if let Err(e) = state.refresh(&mut source) {
        error!("Initial snapshot failed: {:#}", e);
    }

    info!(
        "Dashboard started. RefreshEvery={}s, Seed={:?}, Stocks={}, Voice={}",
        cfg.refresh.interval_sec,
        cfg.refresh.seed,
        cfg.market.stocks.len(),
        cfg.voice.enabled
    );

    let mut ticker = tokio::time::interval(Duration::from_secs(cfg.refresh.interval_sec));
    // The first tick fires immediately; the initial refresh already ran.
    ticker.tick().await;

    if !cfg.voice.enabled {
        loop {
            ticker.tick().await;
            if let Err(e) = state.refresh(&mut source) {
                debug!("Scheduled refresh skipped: {:#}", e);
            }
        }
    }

    let mut voice = ConsoleVoice::new(&cfg.voice.lang);
    let mut session = VoiceSession::default();

    loop {
        let event = tokio::select! {
            _ = ticker.tick() => Event::Tick,
            heard = session.listen(&mut voice) => Event::Heard(heard),
        };

        match event {
            Event::Tick => {
                session.cancel_listening();
                if let Err(e) = state.refresh(&mut source) {
                    debug!("Scheduled refresh skipped: {:#}", e);
                }
            }
            Event::Heard(Err(RecognitionError::Ended)) => break,
            Event::Heard(Err(e)) => {
                error!("Voice input failed: {:#}", e);
                break;
            }
            Event::Heard(Ok(utterance)) => match utterance.trim() {
                "quit" | "exit" => break,
                "refresh" => {
                    if state.refresh(&mut source).is_ok() {
                        session.respond(&mut voice, "Market data refreshed.").await;
                    }
                }
                "data" => {
                    let text = match state.snapshot() {
                        Some(snap) => serde_json::to_string_pretty(&*snap)?,
                        None => "{}".to_string(),
                    };
                    session.respond(&mut voice, &text).await;
                }
                "alerts" => {
                    let text = dashboard_digest(&state);
                    session.respond(&mut voice, &text).await;
                }
                _ => {
                    let reply = session.handle_utterance(&utterance, &state);
                    session.respond(&mut voice, &reply).await;
                }
            },
        }
    }

    info!("Input closed after {} refreshes", state.refresh_count());
    Ok(())
}

/// CLI arg, then MARKET_BRIEF_CONFIG, then ./config.yaml, then the platform config dir.
fn load_config() -> anyhow::Result<AppConfig> {
    let explicit = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("MARKET_BRIEF_CONFIG").ok())
        .map(PathBuf::from);
    if let Some(path) = explicit {
        return AppConfig::load(&path).with_context(|| format!("load {}", path.display()));
    }

    let mut candidates = vec![PathBuf::from("config.yaml")];
    if let Some(dirs) = ProjectDirs::from("", "", "market-brief") {
        candidates.push(dirs.config_dir().join("config.yaml"));
    }
    for path in candidates {
        if path.exists() {
            info!("Using config {}", path.display());
            return AppConfig::load(&path).with_context(|| format!("load {}", path.display()));
        }
    }

    info!("No config file found; using built-in catalog");
    Ok(AppConfig::default())
}

fn dashboard_digest(state: &DashboardState) -> String {
    let Some(snap) = state.snapshot() else {
        return "No market data loaded yet.".to_string();
    };
    let p = &snap.portfolio;
    let mut lines = vec![format!(
        "Risk {} ({}), positions worth ${:.2}",
        p.risk_score,
        risk_band(p.risk_score),
        total_position_value(p)
    )];

    let es = earnings_summary(&snap.market);
    lines.push(format!(
        "Earnings: {} beats, {} misses, {} in line, beat rate {}%, avg surprise {:.1}% ({:?})",
        es.beats, es.misses, es.in_line, es.beat_rate, es.average_surprise, es.tone
    ));

    lines.extend(portfolio_alerts(p).iter().map(|a| format!("Alert: {}", a.message())));
    lines.extend(
        market_updates(&snap.market)
            .into_iter()
            .map(|u| format!("[{:?}] {} at ${:.2}", u.priority, u.message, u.price)),
    );
    lines.join("\n")
}
