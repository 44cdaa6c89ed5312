mod streamcontroller;
mod simulatedreadingprovider;
mod replayreadingprovider;

pub use streamcontroller::Reading;
pub use streamcontroller::ReadingProvider;
pub use streamcontroller::ReadingProviderPointer;
pub use streamcontroller::ReadingStreamController;
pub use streamcontroller::ReadingStreamSharedPointer;
pub use streamcontroller::ReadingWindow;
pub use streamcontroller::RunState;
pub use streamcontroller::StreamSnapshot;
pub use streamcontroller::Summary;

pub use simulatedreadingprovider::SimulatedReadingProvider;
pub use replayreadingprovider::ReplayReadingProvider;

pub mod utils;
