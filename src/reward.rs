use crate::participant::Participant;

/// Fixed participation constant added to every reward.
pub const BASE_REWARD: u32 = 8;

/// Position-weighted multiplier; monotonically decreasing by position.
pub fn position_multiplier(position: usize) -> f64 {
    match position {
        0 | 1 => 1.0,
        2 => 0.5,
        3 => 0.33,
        _ => 0.25,
    }
}

/// Context a race runs in: the base participation reward plus any
/// campaign-progression bonus scaling with the stage index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardContext {
    pub base: u32,
    pub stage_bonus: u32,
}

impl Default for RewardContext {
    fn default() -> Self {
        Self {
            base: BASE_REWARD,
            stage_bonus: 0,
        }
    }
}

impl RewardContext {
    pub fn for_stage(stage: usize) -> Self {
        Self {
            base: BASE_REWARD,
            stage_bonus: 2 * stage as u32,
        }
    }

    /// Experience for finishing in `position` having typed `chars_typed`
    /// characters. The typed component never drops below 1, so even a
    /// last-place finish on a short passage pays something.
    pub fn reward(&self, chars_typed: usize, position: usize) -> u32 {
        let typed = (chars_typed as f64 * position_multiplier(position)).floor() as u32;
        self.base + self.stage_bonus + typed.max(1)
    }
}

/// Position for the next finisher: one past the racers already holding a
/// finish time. Callers must consult this before stamping the new finish
/// time, and hand simultaneous finishers over in queue order so positions
/// stay strictly increasing and never collide.
pub fn next_position(participants: &[Participant]) -> usize {
    1 + participants.iter().filter(|p| p.has_finished()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacing::SpeedTier;
    use crate::participant::ParticipantSpec;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_multiplier_table() {
        assert_eq!(position_multiplier(1), 1.0);
        assert_eq!(position_multiplier(2), 0.5);
        assert_eq!(position_multiplier(3), 0.33);
        assert_eq!(position_multiplier(4), 0.25);
        assert_eq!(position_multiplier(9), 0.25);
    }

    #[test]
    fn test_reward_first_place() {
        let ctx = RewardContext::default();
        assert_eq!(ctx.reward(100, 1), 108);
    }

    #[test]
    fn test_reward_third_place() {
        let ctx = RewardContext::default();
        assert_eq!(ctx.reward(100, 3), 41);
    }

    #[test]
    fn test_reward_floor_of_one() {
        let ctx = RewardContext::default();
        // 2 chars at 0.25 floors to 0, lifted to the minimum of 1.
        assert_eq!(ctx.reward(2, 5), BASE_REWARD + 1);
    }

    #[test]
    fn test_stage_bonus_scales() {
        assert_eq!(RewardContext::for_stage(0).stage_bonus, 0);
        assert_eq!(RewardContext::for_stage(3).stage_bonus, 6);
        assert_eq!(RewardContext::for_stage(3).reward(100, 1), 114);
    }

    #[test]
    fn test_next_position_counts_finishers() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field: Vec<_> = (0..3)
            .map(|i| {
                Participant::from_spec(
                    i,
                    &ParticipantSpec::rival(format!("r{i}"), SpeedTier::Swift),
                    &mut rng,
                )
            })
            .collect();

        assert_eq!(next_position(&field), 1);
        field[1].finish_ms = Some(9_000);
        assert_eq!(next_position(&field), 2);
        field[0].finish_ms = Some(9_000);
        assert_eq!(next_position(&field), 3);
    }
}
