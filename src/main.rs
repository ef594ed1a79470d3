use clap::Parser;
use herald_channels::telegram::TelegramChannel;
use herald_core::{
    config::{self, Config, FileConfig},
    error::HeraldError,
    event::IssueSnapshot,
    message::{self, OutboundMessage},
    traits::Notifier,
};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "herald",
    version,
    about = "Herald: GitHub issue notifications for Telegram forum chats"
)]
struct Cli {
    /// Path to config file.
    #[arg(short, long, default_value = "herald.toml")]
    config: String,

    /// Print the message and its routing instead of sending it.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let result = match config::load(&cli.config) {
        Ok(file) => run(file, config::env_lookup, cli.dry_run, |cfg| {
            Ok(Box::new(TelegramChannel::new(cfg)?) as Box<dyn Notifier>)
        })
        .await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Resolve config and build the message. Fails before any channel exists.
fn prepare<F>(file: FileConfig, lookup: F) -> Result<(Config, OutboundMessage), HeraldError>
where
    F: Fn(&str) -> Option<String>,
{
    let cfg = Config::resolve(file, &lookup)?;
    let issue = IssueSnapshot::from_lookup(&lookup);
    let outbound = message::build(&cfg, &issue);
    info!(
        "routing to chat {} thread {} ({} labels)",
        outbound.chat_id,
        outbound.thread_id,
        issue.labels.len()
    );
    Ok((cfg, outbound))
}

/// One full run: prepare, then either print (dry run) or deliver once.
async fn run<F, C>(
    file: FileConfig,
    lookup: F,
    dry_run: bool,
    connect: C,
) -> Result<(), HeraldError>
where
    F: Fn(&str) -> Option<String>,
    C: FnOnce(&Config) -> Result<Box<dyn Notifier>, HeraldError>,
{
    let (cfg, outbound) = prepare(file, lookup)?;

    if dry_run {
        println!(
            "chat_id: {}\nthread_id: {}\n\n{}",
            outbound.chat_id,
            outbound
                .thread()
                .map_or_else(|| "(general)".to_string(), |t| t.to_string()),
            outbound.text
        );
        return Ok(());
    }

    let notifier = connect(&cfg)?;
    match notifier.send(&outbound).await {
        Ok(delivery) => {
            info!(
                "{} accepted the notification (message_id {:?})",
                notifier.name(),
                delivery.message_id
            );
            Ok(())
        }
        Err(e) => {
            error!("{} delivery failed: {e}", notifier.name());
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use herald_core::traits::Delivery;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Recorder {
        calls: Arc<AtomicUsize>,
        reply: fn() -> Result<Delivery, HeraldError>,
    }

    #[async_trait]
    impl Notifier for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        async fn send(&self, _message: &OutboundMessage) -> Result<Delivery, HeraldError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.reply)()
        }
    }

    fn accepted() -> Result<Delivery, HeraldError> {
        Ok(Delivery {
            message_id: Some(1),
            response: serde_json::json!({"ok": true}),
        })
    }

    fn rejected() -> Result<Delivery, HeraldError> {
        Err(HeraldError::Delivery {
            status: 400,
            body: r#"{"ok":false}"#.to_string(),
        })
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    async fn run_with(
        vars: &[(&str, &str)],
        dry_run: bool,
        reply: fn() -> Result<Delivery, HeraldError>,
    ) -> (Result<(), HeraldError>, usize) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let result = run(FileConfig::default(), lookup(vars), dry_run, move |_| {
            Ok(Box::new(Recorder {
                calls: counter,
                reply,
            }) as Box<dyn Notifier>)
        })
        .await;
        (result, calls.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn test_missing_token_exits_2_without_sending() {
        let (result, calls) = run_with(&[("ISSUE_TITLE", "x")], false, accepted).await;
        assert_eq!(result.unwrap_err().exit_code(), 2);
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_successful_run_sends_once() {
        let (result, calls) =
            run_with(&[("TELEGRAM_BOT_TOKEN", "t"), ("MESSAGE", "hi")], false, accepted).await;
        assert!(result.is_ok());
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_rejected_delivery_exits_1() {
        let (result, calls) =
            run_with(&[("TELEGRAM_BOT_TOKEN", "t"), ("MESSAGE", "hi")], false, rejected).await;
        assert_eq!(result.unwrap_err().exit_code(), 1);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_dry_run_never_sends() {
        let (result, calls) =
            run_with(&[("TELEGRAM_BOT_TOKEN", "t"), ("MESSAGE", "hi")], true, accepted).await;
        assert!(result.is_ok());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_prepare_routes_by_labels() {
        let (cfg, outbound) = prepare(
            FileConfig::default(),
            lookup(&[
                ("TELEGRAM_BOT_TOKEN", "t"),
                ("ISSUE_TITLE", "Sponsor deck"),
                ("ISSUE_LABELS", "Patrocínio"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.default_thread_id, 27);
        assert_eq!(outbound.thread_id, 4);
        assert!(outbound.text.contains("Sponsor deck"));
    }
}
