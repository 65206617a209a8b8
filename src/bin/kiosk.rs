// =============================================================================
// NEOX HOTEL EXPERIENCE - Kiosk Entry Point
// =============================================================================
// Terminal rendition of the in-room dashboard. Polls the gateway on fixed
// intervals and redraws the screen after every change.
//
//   kiosk [DASHBOARD_URL]      e.g. kiosk "http://localhost:3000/?room=512"
//
// Send SIGUSR1 when the display wakes up to refresh guest and room data.
// =============================================================================

use std::io::Write;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use neox_experience::config::KioskConfig;
use neox_experience::dashboard::runtime;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // stdout belongs to the screen; logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,neox_experience=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = KioskConfig::from_env(std::env::args().nth(1))?;

    runtime::run(config, |frame| {
        let mut stdout = std::io::stdout().lock();
        // Clear screen, cursor home
        let _ = write!(stdout, "\x1b[2J\x1b[H{frame}");
        let _ = stdout.flush();
    })
    .await
}
