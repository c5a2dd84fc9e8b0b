use crate::models::{ActivityFlags, CalorieSeries, Counters};

const MORNING_BASE: f64 = 150.0;
const AFTERNOON_BASE: f64 = 300.0;
const EVENING_BASE: f64 = 250.0;

pub fn compute_calorie_series(counters: &Counters, flags: &ActivityFlags) -> CalorieSeries {
    let bonus = |enabled: bool, amount: f64| if enabled { amount } else { 0.0 };

    CalorieSeries {
        morning: MORNING_BASE + f64::from(counters.water) * 0.05 + bonus(flags.reading, 20.0),
        afternoon: AFTERNOON_BASE
            + f64::from(counters.steps) * 0.03
            + bonus(flags.revision, 30.0),
        evening: EVENING_BASE
            + f64::from(counters.swim) * 0.5
            + f64::from(counters.yoga) * 10.0
            + bonus(flags.movie, 40.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Activity;

    #[test]
    fn empty_day_yields_base_points() {
        let series = compute_calorie_series(&Counters::default(), &ActivityFlags::default());
        assert_eq!(series.values(), [150.0, 300.0, 250.0]);
    }

    #[test]
    fn counters_and_flags_feed_their_own_point() {
        let counters = Counters {
            water: 2000,
            steps: 5000,
            yoga: 30,
            swim: 20,
        };
        let flags = ActivityFlags::default()
            .with(Activity::Reading, true)
            .with(Activity::Revision, true)
            .with(Activity::Movie, true);

        let series = compute_calorie_series(&counters, &flags);
        assert_eq!(series.morning, 150.0 + 100.0 + 20.0);
        assert_eq!(series.afternoon, 300.0 + 150.0 + 30.0);
        assert_eq!(series.evening, 250.0 + 10.0 + 300.0 + 40.0);
    }

    #[test]
    fn cleaning_has_no_numeric_effect() {
        let counters = Counters {
            water: 120,
            steps: 640,
            yoga: 3,
            swim: 4,
        };
        let without = compute_calorie_series(&counters, &ActivityFlags::default());
        let with = compute_calorie_series(
            &counters,
            &ActivityFlags::default().with(Activity::Cleaning, true),
        );
        assert_eq!(without, with);
    }
}
