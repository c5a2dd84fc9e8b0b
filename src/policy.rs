use crate::errors::ConfigError;
use crate::models::Habit;
use rand::Rng;
use serde::Serialize;
use std::ops::Range;
use std::str::FromStr;

// One policy per process: `Fixed` seeds a cold key with a baseline, `Random` starts from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IncrementPolicy {
    #[default]
    Random,
    Fixed,
}

impl IncrementPolicy {
    pub fn random_range(habit: Habit) -> Range<u32> {
        match habit {
            Habit::Water => 20..70,
            Habit::Steps => 50..150,
            Habit::Yoga => 1..4,
            Habit::Swim => 1..6,
        }
    }

    pub fn fixed_increment(habit: Habit) -> u32 {
        match habit {
            Habit::Water => 100,
            Habit::Steps => 200,
            Habit::Yoga => 5,
            Habit::Swim => 1,
        }
    }

    pub fn baseline(habit: Habit) -> u32 {
        match habit {
            Habit::Water => 1000,
            Habit::Steps => 3000,
            Habit::Yoga => 15,
            Habit::Swim => 10,
        }
    }

    pub fn next_value<R: Rng>(self, habit: Habit, previous: Option<u32>, rng: &mut R) -> u32 {
        let next = match (self, previous) {
            (IncrementPolicy::Random, previous) => previous
                .unwrap_or(0)
                .saturating_add(rng.random_range(Self::random_range(habit))),
            (IncrementPolicy::Fixed, None) => Self::baseline(habit),
            (IncrementPolicy::Fixed, Some(previous)) => {
                previous.saturating_add(Self::fixed_increment(habit))
            }
        };
        habit.clamp(next)
    }

    pub fn persists_calorie_snapshot(self) -> bool {
        matches!(self, IncrementPolicy::Fixed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IncrementPolicy::Random => "random",
            IncrementPolicy::Fixed => "fixed",
        }
    }
}

impl FromStr for IncrementPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(IncrementPolicy::Random),
            "fixed" => Ok(IncrementPolicy::Fixed),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for habit in Habit::ALL {
            let range = IncrementPolicy::random_range(habit);
            for _ in 0..200 {
                let value = IncrementPolicy::Random.next_value(habit, None, &mut rng);
                assert!(range.contains(&value), "{habit:?} drew {value}");
            }
        }
    }

    #[test]
    fn fixed_seeds_baseline_then_steps() {
        let mut rng = StdRng::seed_from_u64(0);
        let first = IncrementPolicy::Fixed.next_value(Habit::Steps, None, &mut rng);
        let second = IncrementPolicy::Fixed.next_value(Habit::Steps, Some(first), &mut rng);
        assert_eq!(first, 3000);
        assert_eq!(second, 3200);
    }

    #[test]
    fn both_policies_clamp_at_max() {
        let mut rng = StdRng::seed_from_u64(3);
        for policy in [IncrementPolicy::Random, IncrementPolicy::Fixed] {
            assert_eq!(policy.next_value(Habit::Steps, Some(7950), &mut rng), 8000);
            assert_eq!(policy.next_value(Habit::Yoga, Some(u32::MAX), &mut rng), 60);
        }
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!(" Fixed ".parse::<IncrementPolicy>().unwrap(), IncrementPolicy::Fixed);
        assert_eq!("random".parse::<IncrementPolicy>().unwrap(), IncrementPolicy::Random);
        assert!("sometimes".parse::<IncrementPolicy>().is_err());
    }
}
