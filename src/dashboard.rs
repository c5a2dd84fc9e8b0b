use crate::calories::compute_calorie_series;
use crate::chart::{ChartConfig, ChartHandle, ChartRenderer};
use crate::habits::HabitStore;
use crate::models::{Activity, CalorieSeries, DashboardView, Habit, HabitCard};
use crate::storage::KeyValueStore;
use chrono::Local;
use tracing::debug;

pub struct Dashboard<S, R: ChartRenderer> {
    habits: HabitStore<S>,
    chart: Option<ChartHandle<R>>,
    series: CalorieSeries,
    // Counts draws across every bound chart, so it never repeats after a remount.
    chart_revision: u64,
}

impl<S: KeyValueStore, R: ChartRenderer> Dashboard<S, R> {
    pub fn new(habits: HabitStore<S>) -> Self {
        let series = habits.calorie_series();
        Self {
            habits,
            chart: None,
            series,
            chart_revision: 0,
        }
    }

    pub fn habits(&self) -> &HabitStore<S> {
        &self.habits
    }

    pub fn chart(&self) -> Option<&ChartHandle<R>> {
        self.chart.as_ref()
    }

    // Releases any previously bound chart before binding `renderer`.
    pub fn mount(&mut self, renderer: R) -> DashboardView {
        if let Some(previous) = self.chart.take() {
            debug!("releasing previous chart before remount");
            previous.destroy();
        }

        let counters = self.habits.load_and_increment_habits();
        let flags = self.habits.load_activity_flags();
        self.series = compute_calorie_series(&counters, &flags);
        self.chart = Some(ChartHandle::new(renderer, ChartConfig::calories(&self.series)));
        self.chart_revision += 1;
        self.habits.record_calories(&self.series);
        self.view()
    }

    pub fn set_activity(&mut self, activity: Activity, value: bool) -> DashboardView {
        self.habits.set_activity_flag(activity, value);
        self.refresh(true);
        self.view()
    }

    pub fn toggle_activity(&mut self, activity: Activity) -> DashboardView {
        let value = !self.habits.flags().get(activity);
        self.set_activity(activity, value)
    }

    pub fn reset(&mut self) -> DashboardView {
        self.habits.reset();
        // No snapshot here: a reset leaves the store empty.
        self.refresh(false);
        self.view()
    }

    pub fn unmount(&mut self) {
        if let Some(chart) = self.chart.take() {
            chart.destroy();
        }
    }

    pub fn view(&self) -> DashboardView {
        let counters = self.habits.counters();
        let cards = Habit::ALL
            .into_iter()
            .map(|habit| HabitCard {
                habit,
                label: habit.label(),
                unit: habit.unit(),
                value: counters.get(habit),
                max: habit.max(),
                progress: counters.progress(habit),
            })
            .collect();

        DashboardView {
            date: Local::now().date_naive().to_string(),
            policy: self.habits.policy(),
            counters,
            cards,
            activities: self.habits.flags(),
            calories: self.series,
            chart: self.chart.as_ref().map(|chart| chart.config().clone()),
            chart_svg: self
                .chart
                .as_ref()
                .and_then(|chart| chart.renderer().output())
                .map(str::to_string),
            chart_revision: self.chart_revision,
        }
    }

    fn refresh(&mut self, snapshot: bool) {
        self.series = compute_calorie_series(&self.habits.counters(), &self.habits.flags());
        if let Some(chart) = self.chart.as_mut() {
            chart.update(&self.series);
            self.chart_revision += 1;
        }
        if snapshot {
            self.habits.record_calories(&self.series);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::SvgChart;
    use crate::chart::tests::RecordingChart;
    use crate::models::{ActivityFlags, Counters};
    use crate::policy::IncrementPolicy;
    use crate::storage::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dashboard<R: ChartRenderer>(policy: IncrementPolicy) -> Dashboard<MemoryStore, R> {
        dashboard_over(MemoryStore::new(), policy)
    }

    fn dashboard_over<R: ChartRenderer>(
        store: MemoryStore,
        policy: IncrementPolicy,
    ) -> Dashboard<MemoryStore, R> {
        Dashboard::new(HabitStore::with_rng(store, policy, StdRng::seed_from_u64(9)))
    }

    #[test]
    fn mount_pushes_derived_series_to_chart() {
        let chart = RecordingChart::default();
        let mut dashboard = dashboard(IncrementPolicy::Fixed);
        let view = dashboard.mount(chart.clone());

        assert_eq!(view.counters.steps, 3000);
        assert_eq!(view.calories.values(), [200.0, 390.0, 405.0]);
        assert_eq!(chart.0.borrow().draws, vec![vec![200.0, 390.0, 405.0]]);
        assert_eq!(view.chart_revision, 1);
        assert_eq!(view.cards.len(), 4);
    }

    #[test]
    fn remount_releases_previous_chart_first() {
        let first = RecordingChart::default();
        let second = RecordingChart::default();
        let mut dashboard = dashboard(IncrementPolicy::Random);

        dashboard.mount(first.clone());
        dashboard.mount(second.clone());
        assert_eq!(first.0.borrow().releases, 1);
        assert_eq!(second.0.borrow().releases, 0);

        dashboard.unmount();
        dashboard.unmount();
        assert_eq!(second.0.borrow().releases, 1);
    }

    #[test]
    fn toggling_activity_redraws_chart() {
        let chart = RecordingChart::default();
        let mut dashboard = dashboard(IncrementPolicy::Fixed);
        dashboard.mount(chart.clone());

        let view = dashboard.toggle_activity(Activity::Movie);
        assert!(view.activities.movie);
        assert_eq!(view.calories.evening, 445.0);
        assert_eq!(chart.0.borrow().draws.last(), Some(&vec![200.0, 390.0, 445.0]));

        let view = dashboard.toggle_activity(Activity::Movie);
        assert!(!view.activities.movie);
        assert_eq!(view.chart_revision, 3);
    }

    #[test]
    fn reset_returns_defaults_and_empties_store() {
        let mut dashboard = dashboard::<SvgChart>(IncrementPolicy::Fixed);
        dashboard.mount(SvgChart::default());
        dashboard.set_activity(Activity::Reading, true);

        for _ in 0..2 {
            let view = dashboard.reset();
            assert_eq!(view.counters, Counters::default());
            assert_eq!(view.activities, ActivityFlags::default());
            assert_eq!(view.calories.values(), [150.0, 300.0, 250.0]);
            assert!(dashboard.habits().store().is_empty());
        }
        assert!(dashboard.view().chart_svg.is_some());
    }

    #[test]
    fn toggle_before_mount_keeps_stored_flags() {
        let mut store = MemoryStore::new();
        store.set("stepCount", "5000".to_string()).unwrap();
        store
            .set("selectedActivities", r#"{"movie":true}"#.to_string())
            .unwrap();
        let mut dashboard = dashboard_over::<SvgChart>(store, IncrementPolicy::Random);

        let before = dashboard.view();
        assert_eq!(before.counters.steps, 5000);
        assert!(before.activities.movie);
        assert_eq!(before.calories.evening, 290.0);

        let view = dashboard.set_activity(Activity::Reading, true);
        assert!(view.activities.reading);
        assert!(view.activities.movie);
        assert_eq!(view.counters.steps, 5000);

        let raw = dashboard
            .habits()
            .store()
            .get("selectedActivities")
            .unwrap()
            .unwrap();
        let stored: ActivityFlags = serde_json::from_str(&raw).unwrap();
        assert!(stored.reading && stored.movie);
    }

    #[test]
    fn revision_keeps_growing_across_remounts() {
        let mut dashboard = dashboard::<SvgChart>(IncrementPolicy::Fixed);
        assert_eq!(dashboard.mount(SvgChart::default()).chart_revision, 1);
        assert_eq!(dashboard.toggle_activity(Activity::Movie).chart_revision, 2);

        let view = dashboard.mount(SvgChart::default());
        assert_eq!(view.chart_revision, 3);
        assert!(view.chart_svg.is_some());

        dashboard.unmount();
        assert_eq!(dashboard.reset().chart_revision, 3);
    }

    #[test]
    fn view_without_chart_has_no_markup() {
        let dashboard = dashboard::<SvgChart>(IncrementPolicy::Random);
        let view = dashboard.view();
        assert!(view.chart.is_none());
        assert!(view.chart_svg.is_none());
        assert_eq!(view.chart_revision, 0);
    }
}
