//! Test-wide tracing subscriber.

use gridline_telemetry::{LogFormat, LoggingConfig, init_logging};
use once_cell::sync::OnceCell;

static INSTALLED: OnceCell<bool> = OnceCell::new();

/// Install a subscriber once per test binary.
///
/// Pretty output unless `GRIDLINE_LOG_FORMAT` says otherwise; `RUST_LOG` overrides the quiet default.
///
/// Returns `false` when another subscriber was already installed globally.
pub fn init_test_logging() -> bool {
    *INSTALLED.get_or_init(|| {
        init_logging(&LoggingConfig {
            level: "warn",
            format: LogFormat::from_env(LogFormat::Pretty),
            build_sha: "test",
        })
        .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_calls_report_the_first_outcome() {
        let first = init_test_logging();
        assert_eq!(init_test_logging(), first);
    }
}
