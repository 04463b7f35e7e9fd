// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Job Runner
//!
//! The runner owns one extraction job and drives it on a dedicated worker
//! thread:
//!
//! 1. **Resolve** the data-source address into an endpoint.
//! 2. **Execute** the query through the `DataSourcePort`.
//! 3. **Write** the result through the `ResultWriterPort`.
//! 4. **Wait** `interval_seconds` (repeating jobs only) and start over.
//!
//! States: `Idle -> Running -> {Stopping -> Stopped, Finished, Failed}`.
//!
//! Cancellation is cooperative. `stop()` flips a shared `AtomicBool`; the
//! worker polls it before each cycle and before every one-second slice of the
//! interval wait. A query that is already running is never interrupted.
//!
//! Any cycle error ends the run: it is reported once and no further cycle is
//! scheduled.

use crate::application::events::EventSink;
use crate::domain::endpoint::ResolvedEndpoint;
use crate::domain::entities::{Credentials, DataSourceConfig, ExtractionJob};
use crate::domain::errors::{ExtractError, Result};
use crate::ports::data_source_port::DataSourcePort;
use crate::ports::result_writer_port::ResultWriterPort;
use log::error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Granularity of the interval wait; bounds how long `stop()` takes to be
/// observed while the worker is idle.
const WAIT_SLICE: Duration = Duration::from_secs(1);

/// Lifecycle of a runner. Terminal states are never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Running,
    /// `stop()` was called; the worker has not noticed yet.
    Stopping,
    Stopped,
    Finished,
    /// A cycle error ended the run.
    Failed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Stopped | JobState::Finished | JobState::Failed)
    }

    fn as_u8(self) -> u8 {
        match self {
            JobState::Idle => 0,
            JobState::Running => 1,
            JobState::Stopping => 2,
            JobState::Stopped => 3,
            JobState::Finished => 4,
            JobState::Failed => 5,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => JobState::Idle,
            1 => JobState::Running,
            2 => JobState::Stopping,
            3 => JobState::Stopped,
            4 => JobState::Finished,
            _ => JobState::Failed,
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobState::Idle => "IDLE",
            JobState::Running => "RUNNING",
            JobState::Stopping => "STOPPING",
            JobState::Stopped => "STOPPED",
            JobState::Finished => "FINISHED",
            JobState::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// Blocking pause used between cycles. Tests swap in a simulated clock.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Real wall-clock sleeping.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// The only state shared between the caller and the worker thread.
#[derive(Debug)]
struct RunShared {
    cancelled: AtomicBool,
    state: AtomicU8,
}

impl RunShared {
    fn new() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            state: AtomicU8::new(JobState::Idle.as_u8()),
        }
    }

    fn state(&self) -> JobState {
        JobState::from_u8(self.state.load(Ordering::SeqCst))
    }

    fn set_state(&self, state: JobState) {
        self.state.store(state.as_u8(), Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// `Running -> Stopping` plus the flag. Returns false when not running.
    fn request_stop(&self) -> bool {
        let moved = self
            .state
            .compare_exchange(
                JobState::Running.as_u8(),
                JobState::Stopping.as_u8(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok();
        if moved {
            self.cancelled.store(true, Ordering::SeqCst);
        }
        moved
    }
}

/// Runs one `ExtractionJob` until it finishes, fails, or is stopped.
///
/// A runner is single-use: once terminal it cannot be started again.
pub struct JobRunner {
    source: DataSourceConfig,
    credentials: Credentials,
    job: ExtractionJob,
    data_source: Arc<dyn DataSourcePort>,
    writer: Arc<dyn ResultWriterPort>,
    sleeper: Arc<dyn Sleeper>,
    events: EventSink,
    shared: Arc<RunShared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl JobRunner {
    /// Validates the configuration and builds an idle runner.
    ///
    /// Missing job or data-source fields fail here, before any cycle can run.
    pub fn new(
        source: DataSourceConfig,
        job: ExtractionJob,
        data_source: Arc<dyn DataSourcePort>,
        writer: Arc<dyn ResultWriterPort>,
        events: EventSink,
    ) -> Result<Self> {
        if let Err(e) = source.validate().and_then(|_| job.validate()) {
            events.error(e.to_string());
            return Err(e);
        }

        Ok(Self {
            credentials: source.credentials(),
            source,
            job,
            data_source,
            writer,
            sleeper: Arc::new(ThreadSleeper),
            events,
            shared: Arc::new(RunShared::new()),
            worker: Mutex::new(None),
        })
    }

    /// Replaces the clock used for the interval wait.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn state(&self) -> JobState {
        self.shared.state()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state(), JobState::Running | JobState::Stopping)
    }

    /// Spawns the worker thread.
    ///
    /// While a run is active this only reports "already running". A runner
    /// that reached a terminal state returns `ExtractError::InvalidState`.
    pub fn start(&self) -> Result<()> {
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);

        match self.shared.state() {
            JobState::Idle => {}
            JobState::Running | JobState::Stopping => {
                self.events.warn("Job is already running");
                return Ok(());
            }
            terminal => {
                return Err(ExtractError::InvalidState(format!(
                    "runner is {}; build a new runner for a new run",
                    terminal
                )));
            }
        }

        let ctx = Worker {
            source: self.source.clone(),
            credentials: self.credentials.clone(),
            job: self.job.clone(),
            data_source: Arc::clone(&self.data_source),
            writer: Arc::clone(&self.writer),
            sleeper: Arc::clone(&self.sleeper),
            events: self.events.clone(),
            shared: Arc::clone(&self.shared),
        };

        self.shared.set_state(JobState::Running);
        let handle = thread::Builder::new()
            .name("extract-runner".to_string())
            .spawn(move || ctx.run())
            .map_err(|e| {
                self.shared.set_state(JobState::Idle);
                ExtractError::Io(e)
            })?;

        *worker = Some(handle);
        Ok(())
    }

    /// Requests cancellation. No-op unless the runner is running.
    pub fn stop(&self) {
        if self.shared.request_stop() {
            self.events
                .info("Stop requested; finishing the current step...");
        }
    }

    /// Blocks until the worker thread has exited.
    ///
    /// Returns immediately when the runner was never started or was already
    /// joined.
    pub fn join(&self) {
        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(h) = handle {
            if h.join().is_err() {
                error!("Extraction worker thread panicked");
                self.shared.set_state(JobState::Failed);
            }
        }
    }
}

/// Everything the worker thread owns for the duration of a run.
struct Worker {
    source: DataSourceConfig,
    credentials: Credentials,
    job: ExtractionJob,
    data_source: Arc<dyn DataSourcePort>,
    writer: Arc<dyn ResultWriterPort>,
    sleeper: Arc<dyn Sleeper>,
    events: EventSink,
    shared: Arc<RunShared>,
}

impl Worker {
    fn run(self) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.drive())).unwrap_or_else(|_| {
            self.events.error("Extraction worker panicked");
            JobState::Failed
        });
        self.shared.set_state(outcome);
        self.events.finished(outcome);
    }

    fn drive(&self) -> JobState {
        let path = self.job.output_path();
        self.events.info(format!(
            "Starting extraction job ({} -> {})",
            self.job.format,
            path.display()
        ));

        let mut cycle: u64 = 0;
        loop {
            if self.shared.is_cancelled() {
                self.events.info("Execution stopped.");
                return JobState::Stopped;
            }

            cycle += 1;
            if let Err(e) = self.run_cycle(cycle, &path) {
                self.events.error(format!("Cycle {} failed: {}", cycle, e));
                return JobState::Failed;
            }

            if !self.job.repeat {
                self.events.info("Single execution completed.");
                return JobState::Finished;
            }

            self.events.info(format!(
                "Waiting {} seconds for next execution...",
                self.job.interval_seconds
            ));
            if !self.wait_interval() {
                self.events.info("Execution stopped.");
                return JobState::Stopped;
            }
        }
    }

    /// One resolve/execute/write pass. The file is closed when this returns.
    fn run_cycle(&self, cycle: u64, path: &Path) -> Result<usize> {
        let endpoint = ResolvedEndpoint::resolve(self.source.address.trim(), self.source.port.trim());

        self.events
            .info(format!("Cycle {}: executing query on {}", cycle, endpoint));
        let result = self
            .data_source
            .execute(&endpoint, &self.credentials, &self.job.query)?;

        self.events.info(format!("Saving data to: {}", path.display()));
        self.writer.write(&result, path, self.job.format)?;

        let records = result.record_count();
        self.events.info(format!(
            "File generated successfully: {} (total records: {})",
            path.display(),
            records
        ));
        Ok(records)
    }

    /// Returns false when cancellation was observed during the wait.
    fn wait_interval(&self) -> bool {
        for _ in 0..self.job.interval_seconds {
            if self.shared.is_cancelled() {
                return false;
            }
            self.sleeper.sleep(WAIT_SLICE);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::RunEvent;
    use crate::domain::entities::{OutputFormat, TabularResult, Value};
    use crate::infrastructure::local_storage::local_result_writer::LocalResultWriter;
    use crossbeam_channel::{unbounded, Receiver, Sender};
    use std::sync::atomic::{AtomicU64, AtomicUsize};

    const WAIT: Duration = Duration::from_secs(5);

    fn source_config() -> DataSourceConfig {
        DataSourceConfig {
            address: "dbhost|/data/erp.fdb".to_string(),
            user: "SYSDBA".to_string(),
            password: "masterkey".to_string(),
            port: "3050".to_string(),
        }
    }

    fn sample() -> TabularResult {
        TabularResult::new(
            vec!["A".into(), "B".into()],
            vec![
                vec![Value::Integer(1), Value::from("x")],
                vec![Value::Integer(2), Value::from("y")],
            ],
        )
    }

    fn job(dir: &Path, repeat: Option<u64>) -> ExtractionJob {
        let job = ExtractionJob::new(
            "SELECT A, B FROM T",
            dir.to_str().unwrap(),
            "report",
            OutputFormat::Csv,
        )
        .unwrap();
        match repeat {
            Some(interval) => job.with_repeat(interval),
            None => job,
        }
    }

    fn messages(rx: &Receiver<RunEvent>) -> Vec<RunEvent> {
        rx.try_iter().collect()
    }

    fn count_containing(events: &[RunEvent], needle: &str) -> usize {
        events
            .iter()
            .filter(|e| e.message().map_or(false, |m| m.contains(needle)))
            .count()
    }

    fn finished_count(events: &[RunEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, RunEvent::Finished(_)))
            .count()
    }

    /// Returns a fixed result or a query failure and counts calls.
    struct MockSource {
        calls: AtomicUsize,
        fail_query: bool,
        seen_endpoint: Mutex<Option<String>>,
    }

    impl MockSource {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_query: false,
                seen_endpoint: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                fail_query: true,
                ..Self::ok()
            }
        }
    }

    impl DataSourcePort for MockSource {
        fn execute(
            &self,
            endpoint: &ResolvedEndpoint,
            _credentials: &Credentials,
            _query: &str,
        ) -> Result<TabularResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_endpoint.lock().unwrap() = Some(endpoint.connection_string.clone());
            if self.fail_query {
                Err(ExtractError::Query("table T does not exist".into()))
            } else {
                Ok(sample())
            }
        }

        fn test_connection(&self, _e: &ResolvedEndpoint, _c: &Credentials) -> Result<bool> {
            Ok(true)
        }
    }

    /// Blocks inside `execute` until the test opens the gate.
    struct GatedSource {
        calls: AtomicUsize,
        entered: Sender<()>,
        gate: Receiver<()>,
    }

    impl DataSourcePort for GatedSource {
        fn execute(
            &self,
            _endpoint: &ResolvedEndpoint,
            _credentials: &Credentials,
            _query: &str,
        ) -> Result<TabularResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let _ = self.entered.send(());
            let _ = self.gate.recv();
            Ok(sample())
        }

        fn test_connection(&self, _e: &ResolvedEndpoint, _c: &Credentials) -> Result<bool> {
            Ok(true)
        }
    }

    /// Simulated clock: every slice is reported to the test and only returns
    /// once the test acknowledges it (or drops the ack sender).
    struct LockstepClock {
        elapsed_secs: AtomicU64,
        ticks: Sender<Duration>,
        acks: Receiver<()>,
    }

    impl Sleeper for LockstepClock {
        fn sleep(&self, duration: Duration) {
            self.elapsed_secs.fetch_add(duration.as_secs(), Ordering::SeqCst);
            let _ = self.ticks.send(duration);
            let _ = self.acks.recv();
        }
    }

    #[test]
    fn test_single_run_executes_one_cycle_and_finishes() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(MockSource::ok());
        let (events, rx) = EventSink::channel();

        let runner = JobRunner::new(
            source_config(),
            job(dir.path(), None),
            source.clone(),
            Arc::new(LocalResultWriter::new()),
            events,
        )
        .unwrap();
        assert_eq!(runner.state(), JobState::Idle);

        runner.start().unwrap();
        runner.join();

        assert_eq!(runner.state(), JobState::Finished);
        assert!(!runner.is_running());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            source.seen_endpoint.lock().unwrap().as_deref(),
            Some("dbhost:/data/erp.fdb:3050")
        );

        let content = std::fs::read_to_string(dir.path().join("report.csv")).unwrap();
        assert_eq!(content.lines().collect::<Vec<_>>(), vec!["A,B", "1,x", "2,y"]);

        let events = messages(&rx);
        assert_eq!(count_containing(&events, "total records: 2"), 1);
        assert_eq!(finished_count(&events), 1);
        assert_eq!(events.last(), Some(&RunEvent::Finished(JobState::Finished)));
    }

    #[test]
    fn test_query_error_ends_run_without_another_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(MockSource::failing());
        let (events, rx) = EventSink::channel();

        let runner = JobRunner::new(
            source_config(),
            job(dir.path(), Some(0)),
            source.clone(),
            Arc::new(LocalResultWriter::new()),
            events,
        )
        .unwrap();

        runner.start().unwrap();
        runner.join();

        assert_eq!(runner.state(), JobState::Failed);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(!dir.path().join("report.csv").exists());

        let events = messages(&rx);
        let errors: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, RunEvent::Log { level: log::Level::Error, .. }))
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message().unwrap().contains("table T does not exist"));
        assert_eq!(finished_count(&events), 1);
        assert_eq!(events.last(), Some(&RunEvent::Finished(JobState::Failed)));
    }

    #[test]
    fn test_double_start_keeps_a_single_worker() {
        let dir = tempfile::tempdir().unwrap();
        let (entered_tx, entered_rx) = unbounded();
        let (gate_tx, gate_rx) = unbounded();
        let source = Arc::new(GatedSource {
            calls: AtomicUsize::new(0),
            entered: entered_tx,
            gate: gate_rx,
        });
        let (events, rx) = EventSink::channel();

        let runner = JobRunner::new(
            source_config(),
            job(dir.path(), None),
            source.clone(),
            Arc::new(LocalResultWriter::new()),
            events,
        )
        .unwrap();

        runner.start().unwrap();
        entered_rx.recv_timeout(WAIT).unwrap();
        assert!(runner.is_running());

        runner.start().unwrap();
        gate_tx.send(()).unwrap();
        runner.join();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(runner.state(), JobState::Finished);
        let events = messages(&rx);
        assert_eq!(count_containing(&events, "already running"), 1);
        assert_eq!(finished_count(&events), 1);
    }

    #[test]
    fn test_stop_during_query_lets_cycle_finish() {
        let dir = tempfile::tempdir().unwrap();
        let (entered_tx, entered_rx) = unbounded();
        let (gate_tx, gate_rx) = unbounded();
        let source = Arc::new(GatedSource {
            calls: AtomicUsize::new(0),
            entered: entered_tx,
            gate: gate_rx,
        });
        let (tick_tx, tick_rx) = unbounded();
        // No acks: a slice that did run would return at once and show up as a tick.
        let (_, ack_rx) = unbounded::<()>();
        let clock = Arc::new(LockstepClock {
            elapsed_secs: AtomicU64::new(0),
            ticks: tick_tx,
            acks: ack_rx,
        });
        let (events, rx) = EventSink::channel();

        let runner = JobRunner::new(
            source_config(),
            job(dir.path(), Some(3600)),
            source.clone(),
            Arc::new(LocalResultWriter::new()),
            events,
        )
        .unwrap()
        .with_sleeper(clock.clone());

        runner.start().unwrap();
        entered_rx.recv_timeout(WAIT).unwrap();

        runner.stop();
        assert_eq!(runner.state(), JobState::Stopping);
        gate_tx.send(()).unwrap();
        runner.join();

        assert_eq!(runner.state(), JobState::Stopped);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(dir.path().join("report.csv").exists());
        assert!(tick_rx.try_recv().is_err());
        assert_eq!(clock.elapsed_secs.load(Ordering::SeqCst), 0);

        let events = messages(&rx);
        assert_eq!(count_containing(&events, "total records: 2"), 1);
        assert_eq!(events.last(), Some(&RunEvent::Finished(JobState::Stopped)));
    }

    #[test]
    fn test_stop_during_long_interval_exits_within_one_slice() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(MockSource::ok());
        let (tick_tx, tick_rx) = unbounded();
        let (ack_tx, ack_rx) = unbounded();
        let clock = Arc::new(LockstepClock {
            elapsed_secs: AtomicU64::new(0),
            ticks: tick_tx,
            acks: ack_rx,
        });
        let (events, rx) = EventSink::channel();

        let runner = JobRunner::new(
            source_config(),
            job(dir.path(), Some(3600)),
            source.clone(),
            Arc::new(LocalResultWriter::new()),
            events,
        )
        .unwrap()
        .with_sleeper(clock.clone());

        runner.start().unwrap();

        for _ in 0..10 {
            tick_rx.recv_timeout(WAIT).unwrap();
            ack_tx.send(()).unwrap();
        }
        // The worker is now blocked inside its 11th one-second slice.
        tick_rx.recv_timeout(WAIT).unwrap();
        let at_stop = clock.elapsed_secs.load(Ordering::SeqCst);

        runner.stop();
        assert_eq!(runner.state(), JobState::Stopping);
        drop(ack_tx);
        runner.join();

        assert_eq!(runner.state(), JobState::Stopped);
        assert_eq!(clock.elapsed_secs.load(Ordering::SeqCst), at_stop);
        assert!(tick_rx.try_recv().is_err());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        let events = messages(&rx);
        assert_eq!(count_containing(&events, "Execution stopped."), 1);
        assert_eq!(events.last(), Some(&RunEvent::Finished(JobState::Stopped)));
    }

    #[test]
    fn test_repeating_job_overwrites_same_file_until_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(MockSource::ok());
        let (tick_tx, tick_rx) = unbounded();
        let (ack_tx, ack_rx) = unbounded();
        let clock = Arc::new(LockstepClock {
            elapsed_secs: AtomicU64::new(0),
            ticks: tick_tx,
            acks: ack_rx,
        });

        let runner = JobRunner::new(
            source_config(),
            job(dir.path(), Some(2)),
            source.clone(),
            Arc::new(LocalResultWriter::new()),
            EventSink::log_only(),
        )
        .unwrap()
        .with_sleeper(clock);

        runner.start().unwrap();
        // Cycle 1, its two-slice wait, cycle 2 and the first slice of the
        // next wait; the worker then blocks in the last slice.
        for _ in 0..3 {
            tick_rx.recv_timeout(WAIT).unwrap();
            ack_tx.send(()).unwrap();
        }
        tick_rx.recv_timeout(WAIT).unwrap();
        runner.stop();
        drop(ack_tx);
        runner.join();

        assert_eq!(runner.state(), JobState::Stopped);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_stop_and_join_are_noops_when_idle() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(MockSource::ok());
        let runner = JobRunner::new(
            source_config(),
            job(dir.path(), None),
            source.clone(),
            Arc::new(LocalResultWriter::new()),
            EventSink::log_only(),
        )
        .unwrap();

        runner.stop();
        runner.join();
        assert_eq!(runner.state(), JobState::Idle);

        // The earlier stop() must not have cancelled this run.
        runner.start().unwrap();
        runner.join();
        runner.join();
        assert_eq!(runner.state(), JobState::Finished);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        runner.stop();
        assert_eq!(runner.state(), JobState::Finished);
        assert!(matches!(runner.start(), Err(ExtractError::InvalidState(_))));
    }

    #[test]
    fn test_configuration_errors_prevent_any_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(MockSource::ok());
        let (events, rx) = EventSink::channel();

        let mut bad_job = job(dir.path(), None);
        bad_job.query = "   ".into();
        let res = JobRunner::new(
            source_config(),
            bad_job,
            source.clone(),
            Arc::new(LocalResultWriter::new()),
            events.clone(),
        );
        assert!(matches!(res, Err(ExtractError::Configuration(_))));

        let bad_source = DataSourceConfig {
            address: String::new(),
            ..source_config()
        };
        let res = JobRunner::new(
            bad_source,
            job(dir.path(), None),
            source.clone(),
            Arc::new(LocalResultWriter::new()),
            events,
        );
        assert!(matches!(res, Err(ExtractError::Configuration(_))));

        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(messages(&rx).len(), 2);
    }
}
