use crate::pacing::{PacingProfile, SpeedTier, DEFAULT_TIER};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipantKind {
    Human,
    Simulated,
    /// A networked peer whose progress arrives from outside; same shape as
    /// a simulated racer, but pacing is driven by received values.
    Remote,
}

/// What a caller hands to `RaceSession::start` for each lane.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantSpec {
    pub name: String,
    pub kind: ParticipantKind,
    /// None falls back to the documented default tier.
    pub tier: Option<SpeedTier>,
}

impl ParticipantSpec {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParticipantKind::Human,
            tier: None,
        }
    }

    pub fn rival(name: impl Into<String>, tier: SpeedTier) -> Self {
        Self {
            name: name.into(),
            kind: ParticipantKind::Simulated,
            tier: Some(tier),
        }
    }

    pub fn remote(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParticipantKind::Remote,
            tier: None,
        }
    }
}

/// One racer as tracked by the engine. Insertion order is lane order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: usize,
    pub name: String,
    pub kind: ParticipantKind,
    pub profile: PacingProfile,
    /// 0-100, monotonic non-decreasing; pinned at 100 once finished.
    pub progress: f64,
    pub wpm: f64,
    pub accuracy: f64,
    pub finish_ms: Option<u64>,
    pub position: Option<usize>,
    pub reward: Option<u32>,
}

impl Participant {
    pub fn from_spec(id: usize, spec: &ParticipantSpec, rng: &mut impl Rng) -> Self {
        let profile = match spec.kind {
            ParticipantKind::Simulated => {
                PacingProfile::from_tier(spec.tier.unwrap_or(DEFAULT_TIER), rng)
            }
            // Human and remote lanes are not tick-paced; the profile is
            // informational only.
            _ => PacingProfile::fixed(0.0),
        };
        Self {
            id,
            name: spec.name.clone(),
            kind: spec.kind,
            profile,
            progress: 0.0,
            wpm: 0.0,
            accuracy: 100.0,
            finish_ms: None,
            position: None,
            reward: None,
        }
    }

    pub fn has_finished(&self) -> bool {
        self.finish_ms.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spec_constructors() {
        let human = ParticipantSpec::human("you");
        assert_eq!(human.kind, ParticipantKind::Human);
        assert_eq!(human.tier, None);

        let rival = ParticipantSpec::rival("ada", SpeedTier::Swift);
        assert_eq!(rival.kind, ParticipantKind::Simulated);
        assert_eq!(rival.tier, Some(SpeedTier::Swift));

        let peer = ParticipantSpec::remote("peer-1");
        assert_eq!(peer.kind, ParticipantKind::Remote);
    }

    #[test]
    fn test_from_spec_draws_profile_from_tier() {
        let mut rng = StdRng::seed_from_u64(3);
        let spec = ParticipantSpec::rival("ada", SpeedTier::Swift);
        let p = Participant::from_spec(0, &spec, &mut rng);

        let (lo, hi) = SpeedTier::Swift.wpm_range();
        assert!(p.profile.target_wpm >= lo && p.profile.target_wpm <= hi);
        assert_eq!(p.progress, 0.0);
        assert_eq!(p.accuracy, 100.0);
        assert!(!p.has_finished());
    }

    #[test]
    fn test_missing_tier_falls_back_to_default() {
        let mut rng = StdRng::seed_from_u64(3);
        let spec = ParticipantSpec {
            name: "mystery".into(),
            kind: ParticipantKind::Simulated,
            tier: None,
        };
        let p = Participant::from_spec(1, &spec, &mut rng);

        let (lo, hi) = DEFAULT_TIER.wpm_range();
        assert!(p.profile.target_wpm >= lo && p.profile.target_wpm <= hi);
    }

    #[test]
    fn test_outcome_starts_unset() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = Participant::from_spec(0, &ParticipantSpec::human("you"), &mut rng);
        assert_eq!(p.finish_ms, None);
        assert_eq!(p.position, None);
        assert_eq!(p.reward, None);
    }
}
