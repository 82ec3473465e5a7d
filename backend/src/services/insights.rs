//! Insights service - turns raw event streams into calendar views,
//! consistency scores, and sleep correlations

use chrono::{Days, NaiveDate};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use trackwell_shared::types::{
    ConsistencyResponse, MonthViewResponse, SleepCorrelationResponse, WindowQuery,
    DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS,
};
use trackwell_shared::{
    bucket_events, consistency_report, correlate_sleep, mark_best_worst, summarize_day,
    Association, DateRange, DayBucket, DaySummary, MonthId, RankingMetric,
};

/// Insights service
pub struct InsightsService;

impl InsightsService {
    /// Build the month view: one summary per calendar day of the month,
    /// best and worst days marked by `metric`.
    pub async fn month_view(
        state: &AppState,
        user_id: Uuid,
        month: &str,
        metric: RankingMetric,
    ) -> ApiResult<MonthViewResponse> {
        let month_id: MonthId = month.parse()?;
        let buckets = Self::fetch_buckets(state, user_id, month_id.range()).await?;

        let mut days: Vec<DaySummary> = buckets
            .iter()
            .map(|bucket| summarize_day(bucket, state.policy()))
            .collect();
        mark_best_worst(&mut days, metric);

        Ok(MonthViewResponse {
            month: month_id.to_string(),
            metric,
            days,
        })
    }

    /// Summarize a single calendar day. Days without events classify as
    /// empty rather than erroring.
    pub async fn daily_summary(
        state: &AppState,
        user_id: Uuid,
        date: NaiveDate,
    ) -> ApiResult<DaySummary> {
        let buckets = Self::fetch_buckets(state, user_id, DateRange::single(date)).await?;
        let bucket = buckets
            .into_iter()
            .next()
            .unwrap_or_else(|| DayBucket::empty(date));
        Ok(summarize_day(&bucket, state.policy()))
    }

    /// Consistency scores over a trailing window ending today.
    pub async fn consistency(
        state: &AppState,
        user_id: Uuid,
        query: WindowQuery,
    ) -> ApiResult<ConsistencyResponse> {
        let (window_days, range) = Self::window_range(state, &query)?;
        let goal = Self::resolve_goal(state, query.calorie_goal)?;
        let buckets = Self::fetch_buckets(state, user_id, range).await?;

        let report = consistency_report(&buckets, goal, state.policy());
        Ok(ConsistencyResponse::from_report(window_days, report))
    }

    /// Sleep vs next-day intake and cravings over a trailing window ending
    /// today.
    pub async fn sleep_correlation(
        state: &AppState,
        user_id: Uuid,
        query: WindowQuery,
    ) -> ApiResult<SleepCorrelationResponse> {
        let (window_days, range) = Self::window_range(state, &query)?;
        let goal = Self::resolve_goal(state, query.calorie_goal)?;
        let buckets = Self::fetch_buckets(state, user_id, range).await?;

        let report = correlate_sleep(&buckets, goal, state.policy());
        let calories_insight = Self::describe(
            "Sleep and next-day calorie intake",
            report.calories_r,
            report.calories_association,
        );
        let cravings_insight = Self::describe(
            "Sleep and next-day craving scores",
            report.cravings_r,
            report.cravings_association,
        );

        Ok(SleepCorrelationResponse {
            window_days,
            points: report.points,
            calories_r: report.calories_r,
            cravings_r: report.cravings_r,
            calories_association: report.calories_association,
            cravings_association: report.cravings_association,
            calories_insight,
            cravings_insight,
        })
    }

    /// Fetch all four event streams and bucket them into local days.
    ///
    /// The store bounds events by UTC calendar date while buckets use the
    /// configured local offset, so the fetch widens by one day on each side
    /// and the bucketer drops the excess.
    async fn fetch_buckets(
        state: &AppState,
        user_id: Uuid,
        range: DateRange,
    ) -> ApiResult<Vec<DayBucket>> {
        let fetch_start = range
            .start()
            .checked_sub_days(Days::new(1))
            .unwrap_or(range.start());
        let fetch_end = range
            .end()
            .checked_add_days(Days::new(1))
            .unwrap_or(range.end());

        let store = state.store();
        let (food, workouts, hydration, wellness) = tokio::join!(
            store.list_food(user_id, fetch_start, fetch_end),
            store.list_workouts(user_id, fetch_start, fetch_end),
            store.list_hydration(user_id, fetch_start, fetch_end),
            store.list_wellness(user_id, fetch_start, fetch_end),
        );

        let food = food.map_err(ApiError::Internal)?;
        let workouts = workouts.map_err(ApiError::Internal)?;
        let hydration = hydration.map_err(ApiError::Internal)?;
        let wellness = wellness.map_err(ApiError::Internal)?;

        Ok(bucket_events(
            range,
            state.tz(),
            &food,
            &workouts,
            &hydration,
            &wellness,
        ))
    }

    /// Validate the window length and anchor the trailing range at today's
    /// local date.
    fn window_range(state: &AppState, query: &WindowQuery) -> ApiResult<(u32, DateRange)> {
        let window_days = query.window_days.unwrap_or(DEFAULT_WINDOW_DAYS);
        if window_days == 0 || window_days > MAX_WINDOW_DAYS {
            return Err(ApiError::Validation(format!(
                "window_days must be between 1 and {}",
                MAX_WINDOW_DAYS
            )));
        }

        let today = state.tz().local_day(state.clock().now_utc());
        Ok((window_days, DateRange::trailing(today, window_days)))
    }

    /// Resolve the calorie goal: an explicit override must be positive, a
    /// missing one falls back to the configured default.
    fn resolve_goal(state: &AppState, override_goal: Option<f64>) -> ApiResult<Option<f64>> {
        match override_goal {
            Some(goal) if !goal.is_finite() || goal <= 0.0 => Err(ApiError::Validation(
                "calorie_goal must be positive".to_string(),
            )),
            Some(goal) => Ok(Some(goal)),
            None => Ok(Some(state.config().engine.default_calorie_goal_kcal)),
        }
    }

    fn describe(series: &str, r: f64, association: Association) -> String {
        format!("{} show {} (r = {:.2})", series, association.description(), r)
    }
}
