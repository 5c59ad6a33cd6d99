use tracing::Subscriber;
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// `RUST_LOG` 優先，否則只顯示本 crate 的訊息
fn harvest_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        "diamond_harvest=debug,info"
    } else {
        "diamond_harvest=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the human-readable logger used for interactive runs.
///
/// `verbose` raises the crate's own level to `debug` so each page URL and
/// response status is shown.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(harvest_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Build a subscriber that writes one JSON object per event to `make_writer`.
///
/// Each line carries `timestamp`, `level` and a `fields` object holding the
/// event `message`; targets and source locations are left out.
pub fn json_subscriber<W>(filter: EnvFilter, make_writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .json()
            .with_writer(make_writer),
    )
}

/// 長時間批次執行時輸出 JSON 行到 stdout，方便日後用工具彙整
pub fn init_json_logger() {
    json_subscriber(harvest_filter(false), std::io::stdout).init();
}
