use serde::Deserialize;

use crate::stream::streamcontroller::ReadingProvider;

/// Replays a canned sequence of temperature values from a bundled JSON
/// fixture, cycling once the sequence is exhausted.
///
/// Deterministic alternative to the simulated sensor, for demos and tests.
#[derive(Deserialize, Default)]
pub struct ReplayReadingProvider {
    values: Vec<f32>,

    #[serde(skip)]
    cursor: usize,
}

impl ReplayReadingProvider {
    pub fn new() -> Result<Self, serde_json::Error> {
        let json_data = std::include_str!("./replayreadings.json");

        serde_json::from_str::<Self>(json_data)
    }
}

impl ReadingProvider for ReplayReadingProvider {
    fn next_value(&mut self) -> f32 {
        match self.values.get(self.cursor) {
            Some(&value) => {
                self.cursor = (self.cursor + 1) % self.values.len();
                value
            }
            None => 75.0,
        }
    }
}

#[test]
fn test_replay_reading_provider_cycles() {
    let mut provider = ReplayReadingProvider::new().unwrap();

    let first = provider.next_value();
    assert_eq!(first, 71.3);

    for _ in 1..provider.values.len() {
        provider.next_value();
    }
    assert_eq!(provider.next_value(), first);
}

#[test]
fn test_replayed_values_stay_in_range() {
    let provider = ReplayReadingProvider::new().unwrap();

    assert!(!provider.values.is_empty());
    for value in &provider.values {
        assert!((65.0..85.0).contains(value), "value {value} out of range");
    }
}
