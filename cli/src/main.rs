use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use typeahead_core::FetchStatus;
use typeahead_core::ResultSink;
use typeahead_core::SuggestConfig;
use typeahead_core::SuggestSession;
use typeahead_core::create_session;
use url::Url;

/// Line-oriented driver for the typeahead core.
///
/// Every stdin line is treated as the current content of the input box; once
/// it has been quiet for the configured period, suggestions for the latest
/// line are printed. `pick N` selects the N-th entry of the last printed
/// list and prints a web-search URL for it.
#[derive(Debug, Parser)]
#[command(name = "typeahead", version)]
struct Cli {
    /// Suggestion endpoint to query.
    #[arg(long)]
    endpoint: Option<String>,

    /// Value for the Referer header sent with every request.
    #[arg(long)]
    referer: Option<String>,

    /// Quiet period in milliseconds before a fetch is dispatched.
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    quiet: u64,
}

#[derive(Default)]
struct StdoutSink {
    last: Mutex<Vec<String>>,
}

impl StdoutSink {
    fn entry(&self, index: usize) -> Option<String> {
        #[expect(clippy::unwrap_used)]
        let last = self.last.lock().unwrap();
        last.get(index).cloned()
    }
}

impl ResultSink for StdoutSink {
    fn on_status(&self, status: FetchStatus) {
        match status {
            FetchStatus::Working => println!("(fetching suggestions...)"),
            FetchStatus::Error => println!("(could not start a suggestion fetch)"),
        }
    }

    fn on_results(&self, suggestions: &[String]) {
        for (index, suggestion) in suggestions.iter().enumerate() {
            println!("{:>3}. {suggestion}", index + 1);
        }
        #[expect(clippy::unwrap_used)]
        let mut last = self.last.lock().unwrap();
        *last = suggestions.to_vec();
    }

    fn on_suggestion_chosen(&self, text: &str) {
        // The core's job ends at handing over the literal text; turning it
        // into a web search belongs here.
        match Url::parse_with_params("https://www.google.com/search", [("q", text)]) {
            Ok(url) => println!("search: {url}"),
            Err(_) => println!("search: {text}"),
        }
    }
}

fn init_logging() {
    let default_level = "warn";
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_pick(session: &SuggestSession, sink: &StdoutSink, arg: &str) {
    match arg.trim().parse::<usize>() {
        Ok(n) if n >= 1 => match sink.entry(n - 1) {
            Some(text) => session.choose(&text),
            None => println!("(no entry {n})"),
        },
        _ => println!("(usage: pick N)"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = SuggestConfig::default();
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(referer) = cli.referer {
        config.referer = referer;
    }
    config.quiet_period = Duration::from_millis(cli.quiet);

    let sink = Arc::new(StdoutSink::default());
    let session =
        create_session(config, sink.clone()).context("failed to start suggestion session")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(arg) = line.strip_prefix("pick ") {
            handle_pick(&session, &sink, arg);
            continue;
        }
        session.on_input(&line);
    }

    Ok(())
}
