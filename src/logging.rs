//! Logging setup shared by the server and the CLI
//!
//! `RUST_LOG` takes precedence; otherwise the configured level applies to
//! this crate and HTTP tracing stays at info.

use crate::config::LoggingConfig;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Filter directive used when `RUST_LOG` is unset
pub fn default_directive(logging: &LoggingConfig) -> String {
    format!("regboard={},tower_http=info", logging.level)
}

/// Build a subscriber writing to `writer`, pretty or JSON per config
pub fn subscriber<W>(
    logging: &LoggingConfig,
    filter: EnvFilter,
    writer: W,
) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        Box::new(registry.with(tracing_subscriber::fmt::layer().json().with_writer(writer)))
    } else {
        Box::new(registry.with(tracing_subscriber::fmt::layer().with_writer(writer)))
    }
}

/// Install the global subscriber
pub fn init<W>(
    logging: &LoggingConfig,
    writer: W,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(logging)));

    tracing::subscriber::set_global_default(subscriber(logging, filter, writer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TableLoader;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn json_logging(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            format: "json".to_string(),
        }
    }

    #[test]
    fn test_default_directive() {
        let directive = default_directive(&LoggingConfig::default());
        assert_eq!(directive, "regboard=info,tower_http=info");
    }

    #[test]
    fn test_load_summary_reaches_subscriber() {
        let logging = json_logging("info");
        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = subscriber(
            &logging,
            EnvFilter::new(default_directive(&logging)),
            move || sink.clone(),
        );

        tracing::subscriber::with_default(subscriber, || {
            TableLoader::new()
                .load_reader("Created_At,City\n2024-01-01,NY\nnope,LA\n".as_bytes())
                .unwrap();
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Registration table loaded"));
        assert!(output.contains("\"rows_kept\":1"));
        assert!(output.contains("\"bad_dates\":1"));
    }

    #[test]
    fn test_level_filters_debug_drops() {
        let logging = json_logging("info");
        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = subscriber(
            &logging,
            EnvFilter::new(default_directive(&logging)),
            move || sink.clone(),
        );

        tracing::subscriber::with_default(subscriber, || {
            TableLoader::new()
                .load_reader("Created_At,City\nnope,LA\n".as_bytes())
                .unwrap();
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(!output.contains("Dropping row with unparseable date"));
    }
}
