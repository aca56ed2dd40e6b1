use crate::util::std_dev;

/// Words-per-minute using the 5-characters-per-word convention.
///
/// Elapsed time is measured from the first accepted keystroke, not from
/// the session start; callers pass 0 before any input and get 0 back.
pub fn wpm(correct_chars: usize, elapsed_ms: u64) -> f64 {
    if elapsed_ms == 0 {
        return 0.0;
    }
    (correct_chars as f64 / 5.0) / (elapsed_ms as f64 / 60_000.0)
}

/// Accuracy over attempted keypresses, including rejected ones.
///
/// Reports 100 before any input so the UI has a stable optimistic default.
pub fn accuracy(total_keypresses: usize, errors: usize) -> f64 {
    if total_keypresses == 0 {
        return 100.0;
    }
    let correct = total_keypresses.saturating_sub(errors);
    (correct as f64 / total_keypresses as f64 * 100.0).clamp(0.0, 100.0)
}

/// One point of the results chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WpmSample {
    pub t: f64,
    pub wpm: f64,
}

/// Collects one WPM sample per whole second of race time, plus the
/// per-second character counts behind the consistency figure.
#[derive(Debug, Clone, Default)]
pub struct WpmRecorder {
    samples: Vec<WpmSample>,
    per_sec_chars: Vec<f64>,
    last_whole_sec: u64,
    last_correct: usize,
}

impl WpmRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called on every clock tick with the live correct-char count and the
    /// elapsed time since the first accepted keystroke.
    pub fn observe(&mut self, correct_chars: usize, elapsed_ms: u64) {
        let whole_sec = elapsed_ms / 1000;
        if whole_sec > self.last_whole_sec {
            self.per_sec_chars
                .push(correct_chars.saturating_sub(self.last_correct) as f64);
            self.samples.push(WpmSample {
                t: whole_sec as f64,
                wpm: wpm(correct_chars, elapsed_ms),
            });
            self.last_whole_sec = whole_sec;
            self.last_correct = correct_chars;
        }
    }

    pub fn samples(&self) -> &[WpmSample] {
        &self.samples
    }

    /// Standard deviation of chars typed per second; 0 until two full
    /// seconds have been observed.
    pub fn consistency(&self) -> f64 {
        if self.per_sec_chars.len() < 2 {
            return 0.0;
        }
        std_dev(&self.per_sec_chars).unwrap_or(0.0)
    }
}
