//! Data preparation for dashboard widgets.

use garden_types::{Metric, Snapshot};

fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Format a temperature in the selected unit.
#[must_use]
pub fn format_temp(celsius: f32, fahrenheit: bool) -> String {
    if fahrenheit {
        format!("{:.1}°F", celsius_to_fahrenheit(celsius))
    } else {
        format!("{:.1}°C", celsius)
    }
}

/// Series of one metric scaled to `u64` for sparklines.
///
/// Values are multiplied by `scale` first so fractional metrics keep some
/// resolution (pH 6.4 with scale 10 becomes 64). Temperatures are shifted
/// so that the coldest allowed sample (-40°C) maps to zero.
#[must_use]
pub fn sparkline_data(snapshot: &Snapshot, metric: Metric, scale: f64) -> Vec<u64> {
    let offset = if metric == Metric::Temperature { 40.0 } else { 0.0 };
    snapshot
        .series(metric)
        .into_iter()
        .map(|v| ((v + offset) * scale).max(0.0).round() as u64)
        .collect()
}

/// Resample data to fit a target width.
///
/// Upsampling repeats values; downsampling averages them into buckets.
#[must_use]
pub fn resample_sparkline_data(data: &[u64], target_width: usize) -> Vec<u64> {
    if data.is_empty() || target_width == 0 {
        return Vec::new();
    }

    if data.len() == target_width {
        return data.to_vec();
    }

    let mut result = Vec::with_capacity(target_width);

    if data.len() < target_width {
        for i in 0..target_width {
            let src_idx = i * (data.len() - 1) / (target_width - 1).max(1);
            result.push(data[src_idx.min(data.len() - 1)]);
        }
    } else {
        let bucket_size = data.len() as f64 / target_width as f64;
        for i in 0..target_width {
            let start = (i as f64 * bucket_size) as usize;
            let end = (((i + 1) as f64 * bucket_size) as usize).min(data.len());
            if start < end {
                let sum: u64 = data[start..end].iter().sum();
                result.push(sum / (end - start) as u64);
            } else {
                result.push(data[start.min(data.len() - 1)]);
            }
        }
    }

    result
}

/// Hourly light bars: `(hour label, lux)` for a bar chart.
///
/// Labels are the hour only (`"3P"`) to fit narrow bars.
#[must_use]
pub fn light_bars(snapshot: &Snapshot) -> Vec<(String, u64)> {
    snapshot
        .readings
        .iter()
        .map(|r| {
            let label = r.time_label();
            let hour = label.split(':').next().unwrap_or("").trim_start_matches('0');
            let period = if label.ends_with("PM") { "P" } else { "A" };
            (format!("{}{}", hour, period), u64::from(r.light))
        })
        .collect()
}
