//! Position lookup for the "use my location" entry point.

use std::{
    fmt::Debug,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::GeolocationError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix that may be handed out instead of asking again.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: false,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

#[async_trait]
pub trait PositionSource: Send + Sync + Debug {
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, GeolocationError>;
}

/// A position pinned in configuration or on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition {
    pub latitude: f64,
    pub longitude: f64,
}

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Position, GeolocationError> {
        Ok(Position {
            latitude: self.latitude,
            longitude: self.longitude,
            timestamp: Utc::now(),
        })
    }
}

/// Front for an optional [`PositionSource`] that applies timeout and cache age.
#[derive(Debug)]
pub struct Locator {
    source: Option<Arc<dyn PositionSource>>,
    options: PositionOptions,
    last_fix: Mutex<Option<Position>>,
}

impl Locator {
    pub fn new(source: Option<Arc<dyn PositionSource>>, options: PositionOptions) -> Self {
        Self {
            source,
            options,
            last_fix: Mutex::new(None),
        }
    }

    /// A locator without any source; every lookup is `Unsupported`.
    pub fn unsupported() -> Self {
        Self::new(None, PositionOptions::default())
    }

    pub fn is_supported(&self) -> bool {
        self.source.is_some()
    }

    pub async fn locate(&self) -> Result<Position, GeolocationError> {
        let source = self.source.as_ref().ok_or(GeolocationError::Unsupported)?;

        if let Some(fix) = self.cached_fix() {
            tracing::debug!(timestamp = %fix.timestamp, "reusing cached position");
            return Ok(fix);
        }

        let position = tokio::time::timeout(self.options.timeout, source.current_position(&self.options))
            .await
            .map_err(|_| GeolocationError::Timeout)??;

        *self.last_fix.lock().unwrap_or_else(PoisonError::into_inner) = Some(position);
        Ok(position)
    }

    fn cached_fix(&self) -> Option<Position> {
        let fix = (*self.last_fix.lock().unwrap_or_else(PoisonError::into_inner))?;
        let age = Utc::now().signed_duration_since(fix.timestamp).to_std().ok()?;
        (age <= self.options.maximum_age).then_some(fix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PositionSource for CountingSource {
        async fn current_position(&self, _: &PositionOptions) -> Result<Position, GeolocationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Position {
                latitude: 48.85,
                longitude: 2.35,
                timestamp: Utc::now(),
            })
        }
    }

    #[derive(Debug)]
    struct StuckSource;

    #[async_trait]
    impl PositionSource for StuckSource {
        async fn current_position(&self, _: &PositionOptions) -> Result<Position, GeolocationError> {
            std::future::pending().await
        }
    }

    #[test]
    fn default_options_accept_coarse_and_cached_fixes() {
        let options = PositionOptions::default();
        assert!(!options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.maximum_age, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn no_source_is_unsupported() {
        let locator = Locator::unsupported();
        assert!(!locator.is_supported());
        assert_eq!(locator.locate().await, Err(GeolocationError::Unsupported));
    }

    #[tokio::test]
    async fn fresh_fix_is_reused() {
        let source = Arc::new(CountingSource::default());
        let locator = Locator::new(Some(source.clone()), PositionOptions::default());

        let first = locator.locate().await.expect("position");
        let second = locator.locate().await.expect("position");

        assert_eq!(first, second);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_maximum_age_always_asks_again() {
        let source = Arc::new(CountingSource::default());
        let options = PositionOptions {
            maximum_age: Duration::ZERO,
            ..PositionOptions::default()
        };
        let locator = Locator::new(Some(source.clone()), options);

        locator.locate().await.expect("position");
        std::thread::sleep(Duration::from_millis(5));
        locator.locate().await.expect("position");

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_source_times_out() {
        let locator = Locator::new(Some(Arc::new(StuckSource)), PositionOptions::default());
        assert_eq!(locator.locate().await, Err(GeolocationError::Timeout));
    }

    #[tokio::test]
    async fn fixed_position_reports_its_coordinates() {
        let fixed = FixedPosition {
            latitude: 22.5,
            longitude: 88.3,
        };
        let pos = fixed
            .current_position(&PositionOptions::default())
            .await
            .expect("fixed position never fails");
        assert_eq!((pos.latitude, pos.longitude), (22.5, 88.3));
    }
}
