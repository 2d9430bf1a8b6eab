use thiserror::Error;

pub type Result<T> = std::result::Result<T, BenchError>;

#[derive(Debug, Error)]
pub enum BenchError {
    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// Real and placebo loops diverged; the subtraction is meaningless.
    #[error("impossible latency value: {cycles:.3} cycles (floor {floor} cycles)")]
    ImplausibleLatency { cycles: f64, floor: f64 },

    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("logger initialization failed: {0}")]
    LogInit(#[from] tracing_subscriber::util::TryInitError),
}
