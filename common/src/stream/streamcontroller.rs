use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::SnapshotStore;

/// One timestamped temperature sample.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Reading {
    /// Local wall-clock time the sample was taken, formatted as HH:MM:SS.
    pub timestamp: String,

    /// Temperature in degrees Fahrenheit.
    pub value: f32,
}

/// Whether the periodic tick currently appends new readings.
///
/// Pausing only gates the tick; the timer that drives it keeps firing.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub enum RunState {
    #[default]
    Running,
    Paused,
}

impl RunState {
    pub fn is_running(self) -> bool {
        matches!(self, RunState::Running)
    }

    fn toggled(self) -> Self {
        match self {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        }
    }
}

/// Statistics derived from the window at query time.
///
/// All fields are `None` while the window is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    /// The newest reading's value.
    pub current: Option<f32>,

    /// Mean over all retained values.
    pub average: Option<f32>,

    pub min: Option<f32>,
    pub max: Option<f32>,
}

/// The retained readings, newest first, capped at [`ReadingWindow::CAPACITY`].
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ReadingWindow {
    readings: Vec<Reading>,
}

impl ReadingWindow {
    pub const CAPACITY: usize = 20;

    /// Prepends `reading`, evicting the oldest entries beyond the capacity.
    pub fn push(&mut self, reading: Reading) {
        self.readings.insert(0, reading);
        self.readings.truncate(Self::CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// The readings, newest first.
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// The raw values in chart order, oldest first.
    pub fn values_oldest_first(&self) -> Vec<f32> {
        self.readings.iter().rev().map(|r| r.value).collect()
    }

    /// Derives the summary statistics from the readings as they are now.
    pub fn summary(&self) -> Summary {
        if self.readings.is_empty() {
            return Summary::default();
        }

        let values = self.readings.iter().map(|r| r.value);
        let sum: f32 = values.clone().sum();
        let min = values.clone().fold(f32::INFINITY, f32::min);
        let max = values.fold(f32::NEG_INFINITY, f32::max);

        Summary {
            current: Some(self.readings[0].value),
            average: Some(sum / self.readings.len() as f32),
            min: Some(min),
            max: Some(max),
        }
    }
}

/// A source of temperature values, sampled once per tick.
///
/// To be implemented for each data source (simulated, replayed, real).
pub trait ReadingProvider {
    /// Produces the next temperature value in degrees Fahrenheit.
    fn next_value(&mut self) -> f32;
}

pub type ReadingProviderPointer = Box<dyn ReadingProvider + Send>;

pub type ReadingStreamSharedPointer = Arc<Mutex<ReadingStreamController>>;

/// Everything the presentation layer renders, captured after a state change.
#[derive(Clone, Debug, Default)]
pub struct StreamSnapshot {
    pub window: ReadingWindow,
    pub run_state: RunState,
}

/// Owns the rolling window of readings and the running flag.
///
/// All mutation happens through [`tick`](Self::tick) and
/// [`toggle_run_state`](Self::toggle_run_state); readers get cloned
/// snapshots through the store returned by [`snapshots`](Self::snapshots).
/// The controller has no timer of its own. The owning application drives
/// `tick` from its own periodic timer, so the cycle stops with the owner
/// instead of leaking past it.
pub struct ReadingStreamController {
    provider: ReadingProviderPointer,
    window: ReadingWindow,
    run_state: RunState,
    snapshots: SnapshotStore<StreamSnapshot>,
}

impl ReadingStreamController {
    /// Creates a controller in the running state with an empty window.
    pub fn new(provider: ReadingProviderPointer) -> Self {
        Self {
            provider,
            window: ReadingWindow::default(),
            run_state: RunState::Running,
            snapshots: SnapshotStore::default(),
        }
    }

    /// The store this controller publishes into after every state change.
    /// Clone it to subscribe.
    pub fn snapshots(&self) -> SnapshotStore<StreamSnapshot> {
        self.snapshots.clone()
    }

    /// Advances the stream by one tick.
    ///
    /// While running: samples the provider, stamps the value with the
    /// current local time and prepends it to the window. While paused the
    /// tick is a no-op and nothing is published.
    pub fn tick(&mut self) {
        if !self.run_state.is_running() {
            return;
        }

        let reading = Reading {
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            value: self.provider.next_value(),
        };
        log::debug!("New reading: {} {:.1}°F", reading.timestamp, reading.value);

        self.window.push(reading);
        self.publish();
    }

    /// Flips between running and paused and returns the new effective
    /// state. The window itself is left untouched.
    pub fn toggle_run_state(&mut self) -> RunState {
        self.run_state = self.run_state.toggled();
        log::info!("Reading stream is now {:?}", self.run_state);

        self.publish();
        self.run_state
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn window(&self) -> &ReadingWindow {
        &self.window
    }

    /// The summary statistics, derived from the live window at call time.
    pub fn current_summary(&self) -> Summary {
        self.window.summary()
    }

    fn publish(&self) {
        self.snapshots.publish(StreamSnapshot {
            window: self.window.clone(),
            run_state: self.run_state,
        });
    }
}

#[cfg(test)]
struct CountingProvider {
    last: f32,
}

#[cfg(test)]
impl ReadingProvider for CountingProvider {
    fn next_value(&mut self) -> f32 {
        self.last += 1.0;
        self.last
    }
}

#[cfg(test)]
fn counting_controller() -> ReadingStreamController {
    ReadingStreamController::new(Box::new(CountingProvider { last: 0.0 }))
}

#[cfg(test)]
fn reading(value: f32) -> Reading {
    Reading {
        timestamp: "12:00:00".to_string(),
        value,
    }
}

#[test]
fn test_window_fills_up_to_capacity() {
    let mut controller = counting_controller();

    for n in 1..=5 {
        controller.tick();
        assert_eq!(controller.window().len(), n);
    }

    for _ in 0..40 {
        controller.tick();
    }
    assert_eq!(controller.window().len(), ReadingWindow::CAPACITY);
}

#[test]
fn test_window_keeps_the_newest_readings_newest_first() {
    let mut controller = counting_controller();

    // 25 ticks produce values 1.0..=25.0; only 6.0..=25.0 survive.
    for _ in 0..25 {
        controller.tick();
    }

    let values: Vec<f32> = controller
        .window()
        .readings()
        .iter()
        .map(|r| r.value)
        .collect();
    let expected: Vec<f32> = (6..=25).rev().map(|n| n as f32).collect();
    assert_eq!(values, expected);
}

#[test]
fn test_paused_ticks_leave_the_window_unchanged() {
    let mut controller = counting_controller();

    for _ in 0..3 {
        controller.tick();
    }
    let before = controller.window().clone();

    assert_eq!(controller.toggle_run_state(), RunState::Paused);
    for _ in 0..5 {
        controller.tick();
    }
    assert_eq!(controller.window(), &before);

    assert_eq!(controller.toggle_run_state(), RunState::Running);
    controller.tick();
    assert_eq!(controller.window().len(), 4);
}

#[test]
fn test_double_toggle_restores_the_run_state() {
    let mut controller = counting_controller();
    controller.tick();
    let window = controller.window().clone();

    assert_eq!(controller.run_state(), RunState::Running);
    controller.toggle_run_state();
    controller.toggle_run_state();
    assert_eq!(controller.run_state(), RunState::Running);
    assert_eq!(controller.window(), &window);
}

#[test]
fn test_summary_on_empty_window_is_absent() {
    let controller = counting_controller();
    assert_eq!(controller.current_summary(), Summary::default());
}

#[test]
fn test_summary_on_single_reading() {
    let mut window = ReadingWindow::default();
    window.push(reading(70.0));

    let summary = window.summary();
    assert_eq!(summary.current, Some(70.0));
    assert_eq!(summary.average, Some(70.0));
    assert_eq!(summary.min, Some(70.0));
    assert_eq!(summary.max, Some(70.0));
}

#[test]
fn test_summary_on_two_readings() {
    let mut window = ReadingWindow::default();
    window.push(reading(80.0));
    window.push(reading(60.0));

    let summary = window.summary();
    assert_eq!(summary.current, Some(60.0));
    assert_eq!(summary.average, Some(70.0));
    assert_eq!(summary.min, Some(60.0));
    assert_eq!(summary.max, Some(80.0));
}

#[test]
fn test_snapshots_are_published_per_state_change() {
    let mut controller = counting_controller();
    let snapshots = controller.snapshots();

    assert!(snapshots.take().is_none());

    controller.tick();
    let snapshot = snapshots.take().expect("tick publishes a snapshot");
    assert_eq!(snapshot.window.len(), 1);
    assert_eq!(snapshot.run_state, RunState::Running);
    assert!(snapshots.take().is_none());

    controller.toggle_run_state();
    let snapshot = snapshots.take().expect("toggle publishes a snapshot");
    assert_eq!(snapshot.run_state, RunState::Paused);

    // Paused ticks publish nothing.
    controller.tick();
    assert!(snapshots.take().is_none());
}
