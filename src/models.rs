use crate::chart::ChartConfig;
use crate::policy::IncrementPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Habit {
    Water,
    Steps,
    Yoga,
    Swim,
}

impl Habit {
    pub const ALL: [Habit; 4] = [Habit::Water, Habit::Steps, Habit::Yoga, Habit::Swim];

    pub fn as_str(self) -> &'static str {
        match self {
            Habit::Water => "water",
            Habit::Steps => "steps",
            Habit::Yoga => "yoga",
            Habit::Swim => "swim",
        }
    }

    pub fn storage_key(self) -> &'static str {
        match self {
            Habit::Water => "waterAmount",
            Habit::Steps => "stepCount",
            Habit::Yoga => "yogaTime",
            Habit::Swim => "swimTime",
        }
    }

    pub fn max(self) -> u32 {
        match self {
            Habit::Water => 3000,
            Habit::Steps => 8000,
            Habit::Yoga => 60,
            Habit::Swim => 60,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Habit::Water => "Water",
            Habit::Steps => "Step Count",
            Habit::Yoga => "Yoga",
            Habit::Swim => "Swim",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Habit::Water => "ML",
            Habit::Steps => "Steps",
            Habit::Yoga | Habit::Swim => "min",
        }
    }

    pub fn clamp(self, value: u32) -> u32 {
        value.min(self.max())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Counters {
    pub water: u32,
    pub steps: u32,
    pub yoga: u32,
    pub swim: u32,
}

impl Counters {
    pub fn get(&self, habit: Habit) -> u32 {
        match habit {
            Habit::Water => self.water,
            Habit::Steps => self.steps,
            Habit::Yoga => self.yoga,
            Habit::Swim => self.swim,
        }
    }

    pub fn set(&mut self, habit: Habit, value: u32) {
        let value = habit.clamp(value);
        match habit {
            Habit::Water => self.water = value,
            Habit::Steps => self.steps = value,
            Habit::Yoga => self.yoga = value,
            Habit::Swim => self.swim = value,
        }
    }

    pub fn progress(&self, habit: Habit) -> f64 {
        f64::from(self.get(habit)) / f64::from(habit.max()) * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Reading,
    Revision,
    Cleaning,
    Movie,
}

impl Activity {
    pub const ALL: [Activity; 4] = [
        Activity::Reading,
        Activity::Revision,
        Activity::Cleaning,
        Activity::Movie,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Activity::Reading => "reading",
            Activity::Revision => "revision",
            Activity::Cleaning => "cleaning",
            Activity::Movie => "movie",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Activity::ALL
            .into_iter()
            .find(|activity| activity.as_str() == value.trim())
            .ok_or_else(|| format!("unknown activity '{}'", value.trim()))
    }
}

// `cleaning` is recorded and persisted but feeds no calorie point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityFlags {
    pub reading: bool,
    pub revision: bool,
    pub cleaning: bool,
    pub movie: bool,
}

impl ActivityFlags {
    pub fn get(&self, activity: Activity) -> bool {
        match activity {
            Activity::Reading => self.reading,
            Activity::Revision => self.revision,
            Activity::Cleaning => self.cleaning,
            Activity::Movie => self.movie,
        }
    }

    pub fn with(mut self, activity: Activity, value: bool) -> Self {
        match activity {
            Activity::Reading => self.reading = value,
            Activity::Revision => self.revision = value,
            Activity::Cleaning => self.cleaning = value,
            Activity::Movie => self.movie = value,
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalorieSeries {
    pub morning: f64,
    pub afternoon: f64,
    pub evening: f64,
}

impl CalorieSeries {
    pub const LABELS: [&'static str; 3] = ["Morning", "Afternoon", "Evening"];

    pub fn values(&self) -> [f64; 3] {
        [self.morning, self.afternoon, self.evening]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HabitSnapshot {
    pub counters: Counters,
    pub flags: ActivityFlags,
}

#[derive(Debug, Deserialize)]
pub struct ActivityRequest {
    pub activity: String,
    pub value: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct HabitCard {
    pub habit: Habit,
    pub label: &'static str,
    pub unit: &'static str,
    pub value: u32,
    pub max: u32,
    pub progress: f64,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub date: String,
    pub policy: IncrementPolicy,
    pub counters: Counters,
    pub cards: Vec<HabitCard>,
    pub activities: ActivityFlags,
    pub calories: CalorieSeries,
    pub chart: Option<ChartConfig>,
    pub chart_svg: Option<String>,
    pub chart_revision: u64,
}
