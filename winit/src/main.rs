// Prevent console window in addition to Slint window in Windows release builds when, e.g., starting the app via file manager. Ignored on other platforms.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

slint::include_modules!();

use temp_dashboard_common::stream::{
    utils, Reading, ReadingProviderPointer, ReadingStreamController, ReadingStreamSharedPointer,
    ReplayReadingProvider, SimulatedReadingProvider, StreamSnapshot,
};
use temp_dashboard_common::SnapshotStore;

/// Our App struct that holds the UI and the reading-stream controller.
/// It also holds the timer that ticks the stream every 2 seconds.
///
/// The App struct is responsible for initializing the UI and the controller.
/// It also starts the timer and renders the snapshots the controller
/// publishes: the summary stats, the chart path and the history list.
///
/// Dropping the App drops the timer with it, so the periodic cycle never
/// outlives the window it drives.
struct App {
    ui: AppWindow,
    stream: ReadingStreamSharedPointer,
    snapshots: SnapshotStore<StreamSnapshot>,
    timer: slint::Timer,
    records: std::rc::Rc<slint::VecModel<ReadingRecord>>,
}

impl App {
    const TIMER_INTERVAL: std::time::Duration = std::time::Duration::from_millis(2000);

    /// Create a new App struct.
    ///
    /// The App struct initializes the UI and the reading-stream controller.
    fn new() -> anyhow::Result<Self> {
        // Make a new AppWindow
        let ui = AppWindow::new()?;

        // Pick the reading provider.
        // If the DASHBOARD_REPLAY environment variable is set, replay the bundled
        // fixture, otherwise simulate a sensor.
        use std::sync::{Arc, Mutex};
        let provider: ReadingProviderPointer = if std::env::var_os("DASHBOARD_REPLAY").is_some() {
            Box::new(ReplayReadingProvider::new()?)
        } else {
            Box::new(SimulatedReadingProvider)
        };

        let controller = ReadingStreamController::new(provider);

        // Subscribe to the snapshots before the controller is shared.
        let snapshots = controller.snapshots();

        // The controller is shared between the timer and the toggle callback,
        // so we wrap it in an Arc<Mutex>.
        let stream = Arc::new(Mutex::new(controller));

        // Create a shared model for the history list
        let records: std::rc::Rc<slint::VecModel<ReadingRecord>> = std::rc::Rc::default();

        // Initialize the view model with the records
        let model = slint::ModelRc::from(records.clone());
        ui.global::<ViewModel>().set_records(model);

        // Return the App struct
        Ok(Self {
            ui,
            stream,
            snapshots,
            timer: slint::Timer::default(),
            records,
        })
    }

    /// Run the App, start the timer and tick the reading stream periodically.
    fn run(&mut self) -> anyhow::Result<()> {
        // Wire the pause/resume button to the controller.
        {
            let ui_handle = self.ui.as_weak();
            let stream = self.stream.clone();

            self.ui.global::<ViewModel>().on_toggle_run_state(move || {
                let ui = ui_handle.unwrap();
                let run_state = stream.lock().unwrap().toggle_run_state();

                ViewModel::get(&ui).set_running(run_state.is_running());
            });
        }

        // Get the handle to the UI as a weak reference for the timer closure.
        let ui_handle = self.ui.as_weak();

        // Get the stream, the snapshots and the records, because we need to
        // access them in the timer closure.
        let stream = self.stream.clone();
        let snapshots = self.snapshots.clone();
        let records = self.records.clone();

        // Start the timer with a 2 second interval.
        self.timer.start(
            slint::TimerMode::Repeated,
            Self::TIMER_INTERVAL,
            move || {
                let ui = ui_handle.unwrap();
                let model = ViewModel::get(&ui);

                // Advance the stream by one tick. While paused this is a no-op
                // and no snapshot arrives below.
                stream.lock().unwrap().tick();

                // Render the latest snapshot, if this tick produced one.
                if let Some(snapshot) = snapshots.take() {
                    let summary = snapshot.window.summary();

                    records.set_vec(
                        snapshot
                            .window
                            .readings()
                            .iter()
                            .cloned()
                            .map(ReadingRecord::from)
                            .collect::<Vec<_>>(),
                    );

                    model.set_current(utils::format_value(summary.current).into());
                    model.set_average(utils::format_value(summary.average).into());
                    model.set_minimum(utils::format_value(summary.min).into());
                    model.set_maximum(utils::format_value(summary.max).into());
                    model.set_running(snapshot.run_state.is_running());
                    model.set_chart_commands(
                        utils::chart_commands(&snapshot.window.values_oldest_first()).into(),
                    );
                }
            },
        );

        // Run the UI (and map an error to an anyhow::Error).
        self.ui.run().map_err(|e| e.into())
    }
}

/// Convert a reading into the record the UI lists.
impl From<Reading> for ReadingRecord {
    fn from(reading: Reading) -> Self {
        Self {
            timestamp: slint::SharedString::from(reading.timestamp),
            // The history list shows whole degrees
            value_label: slint::format!("{:.0}°F", reading.value),
        }
    }
}

/// A minimal main function that initializes the App and runs it.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = App::new()?;

    app.run()
}
