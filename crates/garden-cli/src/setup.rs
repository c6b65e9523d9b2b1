//! Wiring shared by the CLI commands and the dashboard.

use std::sync::Arc;

use anyhow::{Context, Result};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use chrono::TimeZone;
use garden_core::{Clock, DashboardViewModel, RetryConfig, SyntheticSource};

use crate::config::Config;

/// Clock shown next to "Last updated".
const CLOCK: &[FormatItem<'static>] = format_description!(
    "[hour repr:12 padding:zero]:[minute]:[second] [period case:upper]"
);

/// `03:04:05 PM`-style clock in the timestamp's own offset.
#[must_use]
pub fn format_clock(at: OffsetDateTime) -> String {
    at.format(CLOCK).unwrap_or_else(|_| "??:??:??".to_string())
}

/// The local UTC offset in effect at `at`, falling back to UTC if the zone
/// database has no single answer.
pub fn local_offset_at(at: OffsetDateTime) -> UtcOffset {
    chrono::Local
        .timestamp_opt(at.unix_timestamp(), 0)
        .single()
        .and_then(|local| UtcOffset::from_whole_seconds(local.offset().local_minus_utc()).ok())
        .unwrap_or(UtcOffset::UTC)
}

/// System time in the local zone, looked up per instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> OffsetDateTime {
        self.localize(OffsetDateTime::now_utc())
    }

    fn localize(&self, at: OffsetDateTime) -> OffsetDateTime {
        at.to_offset(local_offset_at(at))
    }
}

/// Build a synthetic source from config, seeded when `seed` is set.
pub fn build_source(config: &Config, seed: Option<u64>) -> Result<SyntheticSource> {
    let source = match seed {
        Some(seed) => SyntheticSource::seeded(seed),
        None => SyntheticSource::new(),
    };
    let source = source
        .with_ranges(config.ranges)
        .context("Invalid sampling ranges")?
        .with_weather(config.weather)
        .with_latency(config.latency());
    Ok(source)
}

/// Build a view-model over a synthetic source and the local clock.
pub fn build_view_model(config: &Config, seed: Option<u64>) -> Result<Arc<DashboardViewModel>> {
    let source = build_source(config, seed)?;
    tracing::debug!(?seed, latency = ?config.latency(), "Building view-model");

    let vm = DashboardViewModel::new(
        Arc::new(source),
        Arc::new(LocalClock),
        config.catalog(),
    )
    .with_retry_config(RetryConfig::new(config.max_retries));
    Ok(Arc::new(vm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_build_view_model_from_default_config() {
        let config = Config {
            latency_ms: 0,
            ..Default::default()
        };
        let vm = build_view_model(&config, Some(3)).unwrap();
        assert!(vm.state().loading);
        assert_eq!(vm.plants().len(), 4);

        let snapshot = vm.refresh().await.unwrap();
        assert_eq!(snapshot.readings.len(), 24);
    }

    #[test]
    fn test_format_clock() {
        let at = time::macros::datetime!(2024-06-01 15:04:05 UTC);
        assert_eq!(format_clock(at), "03:04:05 PM");
        let morning = time::macros::datetime!(2024-06-01 00:30:00 UTC);
        assert_eq!(format_clock(morning), "12:30:00 AM");
    }

    #[test]
    fn test_build_source_uses_config_latency() {
        let config = Config {
            latency_ms: 250,
            ..Default::default()
        };
        let source = build_source(&config, None).unwrap();
        assert_eq!(source.latency(), Duration::from_millis(250));
    }

    #[test]
    fn test_same_seed_builds_same_source() {
        let config = Config::default();
        let now = time::OffsetDateTime::UNIX_EPOCH;
        let a = build_source(&config, Some(8)).unwrap().generate(now);
        let b = build_source(&config, Some(8)).unwrap().generate(now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_local_clock_converts_each_instant() {
        let winter = time::macros::datetime!(2024-01-15 12:00 UTC);
        let summer = time::macros::datetime!(2024-07-15 12:00 UTC);
        for at in [winter, summer] {
            let local = LocalClock.localize(at);
            assert_eq!(local, at);
            let expected = chrono::Local
                .timestamp_opt(at.unix_timestamp(), 0)
                .unwrap()
                .offset()
                .local_minus_utc();
            assert_eq!(local.offset().whole_seconds(), expected);
        }
    }

}
