use std::fmt::Write;

/// Minimum y-axis span of the chart, in degrees. A window of identical
/// values would otherwise scale by a zero range.
pub const MIN_CHART_SPAN: f32 = 1.0;

/// Formats an optional statistic with one decimal, or the `--` placeholder
/// while no readings are available.
pub fn format_value(value: Option<f32>) -> String {
    match value {
        Some(value) => format!("{:.1}", value),
        None => "--".to_string(),
    }
}

/// Builds the SVG path commands for the temperature chart.
///
/// Values are drawn oldest to newest, left to right, in a 100x100 viewbox.
/// The y axis spans the window's own min..max, widened to at least
/// [`MIN_CHART_SPAN`]. Fewer than two points produce an empty path.
pub fn chart_commands(values_oldest_first: &[f32]) -> String {
    if values_oldest_first.len() < 2 {
        return String::new();
    }

    let min = values_oldest_first
        .iter()
        .copied()
        .fold(f32::INFINITY, f32::min);
    let max = values_oldest_first
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, f32::max);
    let span = (max - min).max(MIN_CHART_SPAN);
    let step_x = 100.0 / (values_oldest_first.len() - 1) as f32;

    let mut commands = String::new();
    for (i, value) in values_oldest_first.iter().enumerate() {
        let op = if i == 0 { 'M' } else { 'L' };
        let x = i as f32 * step_x;
        let y = 100.0 - (value - min) / span * 100.0;
        let _ = write!(commands, "{op} {x:.1} {y:.1} ");
    }
    commands
}

#[test]
fn test_format_value() {
    assert_eq!(format_value(None), "--");
    assert_eq!(format_value(Some(70.0)), "70.0");
    assert_eq!(format_value(Some(68.47)), "68.5");
}

#[test]
fn test_chart_needs_two_points() {
    assert_eq!(chart_commands(&[]), "");
    assert_eq!(chart_commands(&[72.0]), "");
}

#[test]
fn test_chart_scales_to_the_window_range() {
    assert_eq!(chart_commands(&[60.0, 80.0]), "M 0.0 100.0 L 100.0 0.0 ");
}

#[test]
fn test_chart_clamps_a_flat_window() {
    // Three identical values: the clamped 1.0 span keeps every y finite.
    let commands = chart_commands(&[75.0, 75.0, 75.0]);
    assert_eq!(commands, "M 0.0 100.0 L 50.0 100.0 L 100.0 100.0 ");
}
