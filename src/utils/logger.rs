use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;

pub fn init_default_logger() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", "airdrop-loader.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .with_target(false)
        .with_ansi(false)
        .with_writer(file_writer.and(std::io::stdout))
        .init();

    guard
}
