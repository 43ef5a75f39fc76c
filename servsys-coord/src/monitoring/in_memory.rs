//! History-keeping monitor implementation.

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

// Layer 3: Internal module imports
use super::error::MonitoringError;
use super::traits::{EventSeverity, Monitor, MonitoringEvent};
use super::types::{MonitoringConfig, MonitoringSnapshot};

#[derive(Debug, Default)]
struct Counters {
    total: u64,
    debug: u64,
    info: u64,
    warning: u64,
    error: u64,
}

impl Counters {
    fn bump(&mut self, severity: EventSeverity) {
        self.total += 1;
        match severity {
            EventSeverity::Debug => self.debug += 1,
            EventSeverity::Info => self.info += 1,
            EventSeverity::Warning => self.warning += 1,
            EventSeverity::Error => self.error += 1,
        }
    }
}

#[derive(Debug)]
struct State<E> {
    counters: Counters,
    history: VecDeque<E>,
}

/// Monitor keeping a bounded, severity-filtered event history in memory.
///
/// Cheap to clone; all clones share the same state. Recording is dominated
/// by one short write-lock acquisition, which the single-writer coordinator
/// usage keeps uncontended.
///
/// # Examples
///
/// ```rust
/// use servsys_coord::monitoring::{
///     CoordinationEvent, CoordinationEventKind, InMemoryMonitor, Monitor, MonitoringConfig,
/// };
///
/// # tokio_test::block_on(async {
/// let monitor = InMemoryMonitor::new(MonitoringConfig::default());
/// let event = CoordinationEvent::now(None, "log", CoordinationEventKind::InstanceStarted);
/// monitor.record(event).await.unwrap();
///
/// let snapshot = monitor.snapshot().await.unwrap();
/// assert_eq!(snapshot.total_events, 1);
/// # });
/// ```
#[derive(Debug)]
pub struct InMemoryMonitor<E: MonitoringEvent> {
    config: Arc<MonitoringConfig>,
    state: Arc<RwLock<State<E>>>,
}

impl<E: MonitoringEvent> InMemoryMonitor<E> {
    /// Creates a monitor with the given configuration.
    pub fn new(config: MonitoringConfig) -> Self {
        Self {
            config: Arc::new(config),
            state: Arc::new(RwLock::new(State {
                counters: Counters::default(),
                history: VecDeque::new(),
            })),
        }
    }
}

impl<E: MonitoringEvent> Clone for InMemoryMonitor<E> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            state: Arc::clone(&self.state),
        }
    }
}

#[async_trait]
impl<E: MonitoringEvent> Monitor<E> for InMemoryMonitor<E> {
    async fn record(&self, event: E) -> Result<(), MonitoringError> {
        if !self.config.enabled {
            return Ok(());
        }

        let severity = event.severity();
        if severity < self.config.severity_filter {
            return Ok(());
        }

        let mut state = self.state.write();
        state.counters.bump(severity);
        if state.history.len() >= self.config.max_history_size {
            state.history.pop_front();
        }
        state.history.push_back(event);

        Ok(())
    }

    async fn snapshot(&self) -> Result<MonitoringSnapshot<E>, MonitoringError> {
        let state = self.state.read();
        Ok(MonitoringSnapshot {
            timestamp: Utc::now(),
            total_events: state.counters.total,
            debug_count: state.counters.debug,
            info_count: state.counters.info,
            warning_count: state.counters.warning,
            error_count: state.counters.error,
            recent_events: state.history.iter().cloned().collect(),
        })
    }

    async fn reset(&self) -> Result<(), MonitoringError> {
        let mut state = self.state.write();
        state.counters = Counters::default();
        state.history.clear();
        Ok(())
    }
}
