use keyrace::metrics::WpmSample;

/// Compute X (seconds) and Y (WPM) bounds for the results chart
pub fn compute_chart_params(samples: &[WpmSample]) -> (f64, f64) {
    let mut highest_wpm = 0.0;
    for sample in samples {
        if sample.wpm > highest_wpm {
            highest_wpm = sample.wpm;
        }
    }

    let mut overall_duration = match samples.last() {
        Some(s) => s.t,
        None => 1.0,
    };
    if overall_duration < 1.0 {
        overall_duration = 1.0;
    }

    (overall_duration, highest_wpm.round())
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
