use std::time::Duration;

use tracing::{info, warn};

use inbox_client::{FeedClient, FeedPoller, FeedView, PollerConfig};
use inbox_feed::format_relative_time_now;
use inbox_feed::presentation::{emoji, empty_state, label};
use inbox_types::api::{ConversationQuery, FeedTab};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inbox_watch=info,inbox_client=info".into()),
        )
        .init();

    // Config
    let api_url = std::env::var("INBOX_API_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".into());
    let status = std::env::var("INBOX_WATCH_STATUS").unwrap_or_else(|_| "open".into());
    let search = std::env::var("INBOX_WATCH_SEARCH").ok().filter(|s| !s.trim().is_empty());
    let tab_name = std::env::var("INBOX_WATCH_TAB").unwrap_or_else(|_| "all".into());
    let tab = FeedTab::parse(&tab_name).unwrap_or_else(|| {
        warn!("Unknown tab '{}', showing all conversations", tab_name);
        FeedTab::All
    });
    let poll_secs: u64 = std::env::var("INBOX_POLL_SECS")
        .unwrap_or_else(|_| "10".into())
        .parse()?;

    let query = ConversationQuery {
        status: Some(status).filter(|s| !s.is_empty()),
        search,
        ..ConversationQuery::default()
    };

    let client = FeedClient::with_timeout(&api_url, Duration::from_secs(15))?;
    let poller = FeedPoller::new(client, query).with_config(PollerConfig {
        interval: Duration::from_secs(poll_secs.max(1)),
        enabled: true,
    });
    let cache = poller.cache().clone();
    let mut updates = cache.subscribe();

    info!("Watching {} (tab: {:?})", api_url, tab);
    let runner = tokio::spawn(async move { poller.run(std::future::pending()).await });

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                render(tab, &cache.view(tab).await);
            }
        }
    }

    runner.abort();
    Ok(())
}

fn render(tab: FeedTab, view: &FeedView) {
    if let Some(err) = &view.error {
        warn!("Feed unavailable, showing last good data: {}", err);
    }
    if !view.loaded {
        return;
    }

    let badges: Vec<String> = FeedTab::ALL
        .iter()
        .map(|t| format!("{:?}: {}", t, view.counts.for_tab(*t)))
        .collect();
    println!("\n{}", badges.join(" | "));

    if view.items.is_empty() {
        let empty = empty_state(tab);
        println!("{} {} ({})", empty.emoji, empty.title, empty.description);
        return;
    }

    for item in &view.items {
        let unread = if item.unread_count > 0 {
            format!(" [{}]", item.unread_count)
        } else {
            String::new()
        };
        println!(
            "{} {:<24} {:>6}  {}{}  {}",
            emoji(item.status),
            item.contact_name,
            format_relative_time_now(item.last_message_at),
            label(item.status),
            unread,
            item.last_message,
        );
    }
}
