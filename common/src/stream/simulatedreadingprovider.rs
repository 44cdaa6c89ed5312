use rand::Rng;

use crate::stream::streamcontroller::ReadingProvider;

/// Simulated sensor drawing each value uniformly from [65.0, 85.0) °F.
#[derive(Default)]
pub struct SimulatedReadingProvider;

impl SimulatedReadingProvider {
    const RANGE: std::ops::Range<f32> = 65.0..85.0;
}

impl ReadingProvider for SimulatedReadingProvider {
    fn next_value(&mut self) -> f32 {
        rand::rng().random_range(Self::RANGE)
    }
}

#[test]
fn test_simulated_values_stay_in_range() {
    let mut provider = SimulatedReadingProvider;

    for _ in 0..1000 {
        let value = provider.next_value();
        assert!(
            SimulatedReadingProvider::RANGE.contains(&value),
            "value {value} out of range"
        );
    }
}
