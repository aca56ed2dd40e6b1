use crate::pacing::SpeedTier;
use crate::participant::ParticipantSpec;
use rand::seq::SliceRandom;
use rand::Rng;

/// Rival name pool. Drawn without replacement per race; larger fields wrap
/// with a numeric suffix.
const RIVAL_NAMES: &[&str] = &[
    "ada", "hopper", "linus", "dennis", "grace", "alan", "edsger", "barbara", "ken", "bjarne",
    "margaret", "donald", "radia", "guido", "anders",
];

/// Builds the lane list for one race: the human in lane 0 followed by
/// `rivals` simulated entrants of the given tier.
pub fn assemble(
    player_name: &str,
    rivals: usize,
    tier: SpeedTier,
    rng: &mut impl Rng,
) -> Vec<ParticipantSpec> {
    let mut specs = Vec::with_capacity(rivals + 1);
    specs.push(ParticipantSpec::human(player_name));

    let mut pool: Vec<&str> = RIVAL_NAMES.to_vec();
    pool.shuffle(rng);

    for i in 0..rivals {
        let name = match pool.get(i) {
            Some(n) => (*n).to_string(),
            None => format!("{}-{}", pool[i % pool.len()], i / pool.len() + 1),
        };
        specs.push(ParticipantSpec::rival(name, tier));
    }
    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::ParticipantKind;
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_human_takes_lane_zero() {
        let mut rng = StdRng::seed_from_u64(2);
        let specs = assemble("you", 4, SpeedTier::Swift, &mut rng);

        assert_eq!(specs.len(), 5);
        assert_eq!(specs[0].kind, ParticipantKind::Human);
        assert_eq!(specs[0].name, "you");
        assert!(specs[1..]
            .iter()
            .all(|s| s.kind == ParticipantKind::Simulated && s.tier == Some(SpeedTier::Swift)));
    }

    #[test]
    fn test_rival_names_unique() {
        let mut rng = StdRng::seed_from_u64(2);
        let specs = assemble("you", 10, SpeedTier::Coasting, &mut rng);

        let unique = specs.iter().map(|s| s.name.as_str()).unique().count();
        assert_eq!(unique, specs.len());
    }

    #[test]
    fn test_oversized_field_wraps_names() {
        let mut rng = StdRng::seed_from_u64(2);
        let specs = assemble("you", RIVAL_NAMES.len() + 3, SpeedTier::Coasting, &mut rng);

        assert_eq!(specs.len(), RIVAL_NAMES.len() + 4);
        let unique = specs.iter().map(|s| s.name.as_str()).unique().count();
        assert_eq!(unique, specs.len());
    }

    #[test]
    fn test_zero_rivals_is_practice_field() {
        let mut rng = StdRng::seed_from_u64(2);
        let specs = assemble("solo", 0, SpeedTier::Swift, &mut rng);
        assert_eq!(specs.len(), 1);
    }
}
