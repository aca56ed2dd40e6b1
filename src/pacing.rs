use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default multiplicative jitter bounds applied to every tick's expected
/// character delta, so rival motion never looks perfectly linear.
pub const DEFAULT_JITTER: (f64, f64) = (0.85, 1.15);

/// Named target-speed ranges, the difficulty table rivals draw from.
///
/// Each tier is a closed wpm range sampled once at session start;
/// Metronome is a fixed constant regardless of draw.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum SpeedTier {
    Coasting,
    Metronome,
    Swift,
    Wildcard,
}

impl SpeedTier {
    pub fn wpm_range(&self) -> (f64, f64) {
        match self {
            SpeedTier::Coasting => (30.0, 50.0),
            SpeedTier::Metronome => (55.0, 55.0),
            SpeedTier::Swift => (75.0, 90.0),
            SpeedTier::Wildcard => (40.0, 110.0),
        }
    }

    pub fn draw(&self, rng: &mut impl Rng) -> f64 {
        let (lo, hi) = self.wpm_range();
        if lo >= hi {
            lo
        } else {
            rng.gen_range(lo..=hi)
        }
    }
}

/// Fallback for entrants whose spec carries no tier; a bad entrant never
/// aborts the race for everyone else.
pub const DEFAULT_TIER: SpeedTier = SpeedTier::Coasting;

/// The speed/jitter configuration driving one simulated participant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PacingProfile {
    pub target_wpm: f64,
    pub jitter: (f64, f64),
}

impl PacingProfile {
    pub fn from_tier(tier: SpeedTier, rng: &mut impl Rng) -> Self {
        Self {
            target_wpm: tier.draw(rng),
            jitter: DEFAULT_JITTER,
        }
    }

    /// An exact profile, used for the human lane (whose progress is driven
    /// by the cursor, not by ticks) and in tests.
    pub fn fixed(target_wpm: f64) -> Self {
        Self {
            target_wpm,
            jitter: (1.0, 1.0),
        }
    }
}

/// Advances one simulated participant by one tick.
///
/// Pacing is derived from the target speed rather than a per-tick delta,
/// so the visible wpm statistic and the on-screen motion stay consistent
/// whatever tick period the host picks. Returns the new progress
/// percentage, clamped to 100; a finished participant stays at 100.
pub fn advance(
    profile: &PacingProfile,
    tick_ms: u64,
    passage_chars: usize,
    prior_progress: f64,
    rng: &mut impl Rng,
) -> f64 {
    if prior_progress >= 100.0 {
        return 100.0;
    }
    let chars_per_sec = profile.target_wpm * 5.0 / 60.0;
    let expected_chars = chars_per_sec * tick_ms as f64 / 1000.0;
    let (lo, hi) = profile.jitter;
    let jitter = if hi > lo { rng.gen_range(lo..hi) } else { lo };
    let delta_pct = expected_chars * jitter / passage_chars.max(1) as f64 * 100.0;
    (prior_progress + delta_pct).min(100.0)
}
