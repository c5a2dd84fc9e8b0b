use crate::calories::compute_calorie_series;
use crate::errors::StoreError;
use crate::models::{Activity, ActivityFlags, CalorieSeries, Counters, Habit, HabitSnapshot};
use crate::policy::IncrementPolicy;
use crate::storage::KeyValueStore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

pub const ACTIVITIES_KEY: &str = "selectedActivities";
pub const CALORIE_KEYS: [&str; 3] = ["caloriesMorning", "caloriesAfternoon", "caloriesEvening"];

// Failed writes are logged; the in-memory state stays authoritative.
pub struct HabitStore<S> {
    store: S,
    policy: IncrementPolicy,
    rng: StdRng,
    counters: Counters,
    flags: ActivityFlags,
}

impl<S: KeyValueStore> HabitStore<S> {
    pub fn new(store: S, policy: IncrementPolicy) -> Self {
        Self::with_rng(store, policy, StdRng::from_os_rng())
    }

    pub fn with_rng(store: S, policy: IncrementPolicy, rng: StdRng) -> Self {
        let mut habits = Self {
            store,
            policy,
            rng,
            counters: Counters::default(),
            flags: ActivityFlags::default(),
        };
        habits.hydrate();
        habits
    }

    // Read-only, no increment.
    fn hydrate(&mut self) {
        let mut counters = Counters::default();
        for habit in Habit::ALL {
            counters.set(habit, self.read_counter(habit).unwrap_or(0));
        }
        self.counters = counters;
        self.load_activity_flags();
    }

    pub fn policy(&self) -> IncrementPolicy {
        self.policy
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn flags(&self) -> ActivityFlags {
        self.flags
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn calorie_series(&self) -> CalorieSeries {
        compute_calorie_series(&self.counters, &self.flags)
    }

    pub fn load_and_increment_habits(&mut self) -> Counters {
        let mut counters = Counters::default();
        for habit in Habit::ALL {
            let previous = self.read_counter(habit);
            let next = self.policy.next_value(habit, previous, &mut self.rng);
            counters.set(habit, next);
            self.write(habit.storage_key(), next.to_string());
        }
        self.counters = counters;
        info!(
            policy = self.policy.as_str(),
            water = counters.water,
            steps = counters.steps,
            yoga = counters.yoga,
            swim = counters.swim,
            "loaded habits"
        );
        counters
    }

    pub fn load_activity_flags(&mut self) -> ActivityFlags {
        let flags = match self.read(ACTIVITIES_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                debug!("ignoring malformed {ACTIVITIES_KEY}: {err}");
                ActivityFlags::default()
            }),
            None => ActivityFlags::default(),
        };
        self.flags = flags;
        flags
    }

    pub fn set_activity_flag(&mut self, activity: Activity, value: bool) -> ActivityFlags {
        let flags = self.flags.with(activity, value);
        self.flags = flags;
        match serde_json::to_string(&flags) {
            Ok(payload) => self.write(ACTIVITIES_KEY, payload),
            Err(err) => warn!("failed to encode activities: {}", StoreError::from(err)),
        }
        flags
    }

    // Write-only snapshot; never read back.
    pub fn record_calories(&mut self, series: &CalorieSeries) {
        if !self.policy.persists_calorie_snapshot() {
            return;
        }
        for (key, value) in CALORIE_KEYS.into_iter().zip(series.values()) {
            self.write(key, value.to_string());
        }
    }

    pub fn reset(&mut self) -> HabitSnapshot {
        if let Err(err) = self.store.clear() {
            warn!("failed to clear habit store: {err}");
        }
        self.counters = Counters::default();
        self.flags = ActivityFlags::default();
        info!("reset habits");
        HabitSnapshot {
            counters: self.counters,
            flags: self.flags,
        }
    }

    fn read_counter(&self, habit: Habit) -> Option<u32> {
        let raw = self.read(habit.storage_key())?;
        let value = parse_leading_digits(&raw);
        if value.is_none() {
            debug!(key = habit.storage_key(), "ignoring unparseable counter {raw:?}");
        }
        value
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                debug!(key, "treating unreadable entry as absent: {err}");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: String) {
        if let Err(err) = self.store.set(key, value) {
            warn!(key, "failed to persist habit state: {err}");
        }
    }
}

// Reads the leading decimal digits, so "12abc" and "12.5" give 12. Text with
// no leading digit (including a minus sign) is absent. Overflow saturates and
// is clamped by the caller.
fn parse_leading_digits(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let digits = &trimmed[..end];
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}
