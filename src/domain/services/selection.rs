use crate::domain::services::planner::{PlannedSlots, SlotPlanner, SlotQuery, SlotQueryKey};
use crate::error::AppError;
use crate::domain::models::slot::TimeSlotCandidate;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub type OnSelect = Box<dyn Fn(&str) + Send + Sync>;

/// Reflects orders placed concurrently by other customers without push
/// invalidation.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// What the consumer sees. Candidates and selection are always replaced
/// together, never piecewise.
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    pub candidates: Vec<TimeSlotCandidate>,
    pub selected: Option<String>,
    /// Set when a later pass shows the held selection is no longer
    /// available. The selection is kept; the caller decides what to do.
    pub selection_stale: bool,
}

struct SelectionInner {
    planner: Arc<SlotPlanner>,
    query: Mutex<SlotQuery>,
    state: Mutex<SelectionState>,
    last_key: Mutex<Option<SlotQueryKey>>,
    on_select: OnSelect,
    refresh: Notify,
}

/// Tracks the customer's chosen slot and keeps the candidate list current:
/// one pass on construction, one on every effective input change, and one
/// per polling tick so orders placed by other customers show up.
pub struct SelectionController {
    inner: Arc<SelectionInner>,
    worker: JoinHandle<()>,
}

impl SelectionController {
    /// Standard 60-second polling cadence.
    pub fn spawn(planner: Arc<SlotPlanner>, query: SlotQuery, on_select: OnSelect) -> Self {
        Self::new(planner, query, DEFAULT_POLL_INTERVAL, on_select)
    }

    pub fn new(
        planner: Arc<SlotPlanner>,
        query: SlotQuery,
        poll_interval: Duration,
        on_select: OnSelect,
    ) -> Self {
        let inner = Arc::new(SelectionInner {
            planner,
            query: Mutex::new(query),
            state: Mutex::new(SelectionState::default()),
            last_key: Mutex::new(None),
            on_select,
            refresh: Notify::new(),
        });

        let worker_inner = inner.clone();
        let worker = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = worker_inner.refresh.notified() => {}
                }
                worker_inner.run_pass().await;
            }
        });

        Self { inner, worker }
    }

    /// Replaces the query. A query whose composite key matches the last
    /// applied pass triggers no refetch.
    pub fn set_query(&self, query: SlotQuery) {
        let key = query.key();
        *self.inner.query.lock().unwrap() = query;
        if self.inner.last_key.lock().unwrap().as_ref() == Some(&key) {
            debug!("slot query unchanged, skipping regeneration");
            return;
        }
        self.inner.refresh.notify_one();
    }

    /// Runs one generation pass inline, outside the polling cadence.
    pub async fn refresh_now(&self) {
        self.inner.run_pass().await;
    }

    /// Explicit selection by the customer. Only an enabled candidate from
    /// the current list is accepted.
    pub fn select(&self, value: &str) -> Result<(), AppError> {
        let mut state = self.inner.state.lock().unwrap();
        let valid = state
            .candidates
            .iter()
            .any(|c| c.value == value && !c.disabled);
        if !valid {
            return Err(AppError::Validation(format!(
                "Slot {} is not available",
                value
            )));
        }
        state.selected = Some(value.to_string());
        state.selection_stale = false;
        drop(state);
        (self.inner.on_select)(value);
        Ok(())
    }

    pub fn state(&self) -> SelectionState {
        self.inner.state.lock().unwrap().clone()
    }

    /// Stops the polling task. Dropping the controller does the same; no
    /// recurring work outlives the consumer.
    pub fn close(&self) {
        self.worker.abort();
    }
}

impl Drop for SelectionController {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

impl SelectionInner {
    async fn run_pass(&self) {
        // A pass superseded mid-flight is discarded; re-plan against the
        // current query so the caller always returns with a fresh list.
        for _ in 0..3 {
            let query = self.query.lock().unwrap().clone();
            let key = query.key();
            let now = chrono::Local::now().naive_local();
            let plan = self.planner.plan(&query, now).await;
            if self.apply(key, plan) {
                return;
            }
        }
        debug!("slot generation pass kept losing to newer requests, giving up");
    }

    /// Applies a finished pass. Returns false when the pass was superseded
    /// by a newer request while in flight; stale results never overwrite a
    /// fresher candidate list.
    fn apply(&self, key: SlotQueryKey, plan: PlannedSlots) -> bool {
        if plan.generation != self.planner.latest_generation() {
            debug!(
                generation = plan.generation,
                latest = self.planner.latest_generation(),
                "discarding stale slot generation pass"
            );
            return false;
        }

        let newly_selected = {
            let mut state = self.state.lock().unwrap();
            let mut newly_selected = None;
            match &state.selected {
                None => {
                    if let Some(first) = plan.candidates.iter().find(|c| !c.disabled) {
                        state.selected = Some(first.value.clone());
                        newly_selected = Some(first.value.clone());
                    }
                }
                Some(current) => {
                    let still_available = plan
                        .candidates
                        .iter()
                        .any(|c| &c.value == current && !c.disabled);
                    if !still_available {
                        warn!(slot = %current, "selected slot no longer available, keeping selection flagged stale");
                        state.selection_stale = true;
                    } else {
                        state.selection_stale = false;
                    }
                }
            }
            state.candidates = plan.candidates;
            newly_selected
        };

        *self.last_key.lock().unwrap() = Some(key);

        if let Some(value) = newly_selected {
            (self.on_select)(value.as_str());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::blocked::BlockedSlot;
    use crate::domain::models::hours::DayHours;
    use crate::domain::models::order::{OrderRecord, OrderType, PaymentStatus};
    use crate::domain::ports::{BlockedSlotRepository, OpeningHoursRepository, OrderRepository};
    use crate::domain::services::blocked::BlockedSlotRegistry;
    use crate::domain::services::capacity::OrderCapacityTracker;
    use crate::domain::services::hours::OpeningHoursResolver;
    use async_trait::async_trait;
    use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedHoursRepo;

    #[async_trait]
    impl OpeningHoursRepository for FixedHoursRepo {
        async fn weekly_hours(&self, _restaurant_id: &str) -> Result<Vec<DayHours>, AppError> {
            let days = [
                "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
            ];
            Ok(days
                .iter()
                .map(|d| DayHours {
                    day: d.to_string(),
                    slot_number: 0,
                    is_open: true,
                    open_time: "11:00".into(),
                    close_time: "22:00".into(),
                })
                .collect())
        }
    }

    struct SharedOrdersRepo {
        orders: Mutex<Vec<OrderRecord>>,
    }

    #[async_trait]
    impl OrderRepository for SharedOrdersRepo {
        async fn list_scheduled(
            &self,
            _restaurant_id: &str,
            start: NaiveDateTime,
            end: NaiveDateTime,
        ) -> Result<Vec<OrderRecord>, AppError> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .iter()
                .filter(|o| o.scheduled_for >= start && o.scheduled_for < end)
                .cloned()
                .collect())
        }

        async fn reserve(
            &self,
            _order: &crate::domain::models::order::Order,
            _max_allowed: u32,
        ) -> Result<crate::domain::models::order::Order, AppError> {
            unimplemented!("not exercised by these tests")
        }
    }

    struct NoBlockedRepo;

    #[async_trait]
    impl BlockedSlotRepository for NoBlockedRepo {
        async fn list_for_date(
            &self,
            _restaurant_id: &str,
            _date: NaiveDate,
        ) -> Result<Vec<BlockedSlot>, AppError> {
            Ok(vec![])
        }
    }

    fn planner_with(orders: Arc<SharedOrdersRepo>) -> Arc<SlotPlanner> {
        Arc::new(SlotPlanner::new(
            OpeningHoursResolver::new(Arc::new(FixedHoursRepo)),
            OrderCapacityTracker::new(orders),
            BlockedSlotRegistry::new(Arc::new(NoBlockedRepo)),
        ))
    }

    fn tomorrow_query() -> SlotQuery {
        SlotQuery {
            restaurant_id: "r1".into(),
            date: chrono::Local::now().date_naive() + ChronoDuration::days(1),
            order_type: OrderType::Delivery,
            event_slots: vec![],
        }
    }

    #[tokio::test]
    async fn auto_selects_first_enabled_candidate() {
        let orders = Arc::new(SharedOrdersRepo { orders: Mutex::new(vec![]) });
        let selected = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = selected.clone();
        let controller = SelectionController::new(
            planner_with(orders),
            tomorrow_query(),
            Duration::from_secs(600),
            Box::new(move |v| sink.lock().unwrap().push(v.to_string())),
        );

        controller.refresh_now().await;

        let state = controller.state();
        assert_eq!(state.selected.as_deref(), Some("11:15"));
        assert_eq!(selected.lock().unwrap().as_slice(), ["11:15".to_string()]);
        controller.close();
    }

    #[tokio::test]
    async fn concurrent_fill_flags_selection_stale_but_keeps_it() {
        let orders = Arc::new(SharedOrdersRepo { orders: Mutex::new(vec![]) });
        let controller = SelectionController::new(
            planner_with(orders.clone()),
            tomorrow_query(),
            Duration::from_secs(600),
            Box::new(|_| {}),
        );

        controller.refresh_now().await;
        assert_eq!(controller.state().selected.as_deref(), Some("11:15"));

        // Another customer takes the only delivery opening at 11:15.
        let date = chrono::Local::now().date_naive() + ChronoDuration::days(1);
        orders.orders.lock().unwrap().push(OrderRecord {
            scheduled_for: date.and_hms_opt(11, 15, 0).unwrap(),
            order_type: OrderType::Delivery,
            payment_status: PaymentStatus::Paid,
        });

        controller.refresh_now().await;
        let state = controller.state();
        assert_eq!(state.selected.as_deref(), Some("11:15"));
        assert!(state.selection_stale);
        let held = state.candidates.iter().find(|c| c.value == "11:15").unwrap();
        assert!(held.disabled);
        controller.close();
    }

    #[tokio::test]
    async fn explicit_select_rejects_disabled_candidates() {
        let orders = Arc::new(SharedOrdersRepo { orders: Mutex::new(vec![]) });
        let date = chrono::Local::now().date_naive() + ChronoDuration::days(1);
        orders.orders.lock().unwrap().push(OrderRecord {
            scheduled_for: date.and_hms_opt(12, 0, 0).unwrap(),
            order_type: OrderType::Delivery,
            payment_status: PaymentStatus::Pending,
        });

        let controller = SelectionController::new(
            planner_with(orders),
            tomorrow_query(),
            Duration::from_secs(600),
            Box::new(|_| {}),
        );
        controller.refresh_now().await;

        assert!(controller.select("12:00").is_err());
        assert!(controller.select("12:15").is_ok());
        assert_eq!(controller.state().selected.as_deref(), Some("12:15"));
        controller.close();
    }

    #[tokio::test]
    async fn superseded_generation_is_discarded() {
        let orders = Arc::new(SharedOrdersRepo { orders: Mutex::new(vec![]) });
        let planner = planner_with(orders);
        let query = tomorrow_query();
        let now = chrono::Local::now().naive_local();

        let older = planner.plan(&query, now).await;
        let newer = planner.plan(&query, now).await;

        let inner = SelectionInner {
            planner: planner.clone(),
            query: Mutex::new(query.clone()),
            state: Mutex::new(SelectionState::default()),
            last_key: Mutex::new(None),
            on_select: Box::new(|_| {}),
            refresh: Notify::new(),
        };

        assert!(inner.apply(query.key(), newer));
        assert!(!inner.apply(query.key(), older));
        // The applied (newer) list is still in place.
        assert!(!inner.state.lock().unwrap().candidates.is_empty());
    }

    #[tokio::test]
    async fn unchanged_query_key_skips_regeneration() {
        let orders = Arc::new(SharedOrdersRepo { orders: Mutex::new(vec![]) });
        let calls = Arc::new(AtomicUsize::new(0));

        struct CountingHours(Arc<AtomicUsize>);
        #[async_trait]
        impl OpeningHoursRepository for CountingHours {
            async fn weekly_hours(&self, rid: &str) -> Result<Vec<DayHours>, AppError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                FixedHoursRepo.weekly_hours(rid).await
            }
        }

        let planner = Arc::new(SlotPlanner::new(
            OpeningHoursResolver::new(Arc::new(CountingHours(calls.clone()))),
            OrderCapacityTracker::new(orders),
            BlockedSlotRegistry::new(Arc::new(NoBlockedRepo)),
        ));

        let query = tomorrow_query();
        let controller = SelectionController::new(
            planner,
            query.clone(),
            Duration::from_secs(600),
            Box::new(|_| {}),
        );
        controller.refresh_now().await;
        // Let the startup tick's pass settle before measuring.
        tokio::time::sleep(Duration::from_millis(100)).await;
        let fetches_after_first = calls.load(Ordering::SeqCst);

        // Same composite key: no refetch is scheduled.
        controller.set_query(query.clone());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(calls.load(Ordering::SeqCst), fetches_after_first);

        // Changing the order type changes the key and triggers a pass.
        let mut changed = query;
        changed.order_type = OrderType::Pickup;
        controller.set_query(changed);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(calls.load(Ordering::SeqCst) > fetches_after_first);
        controller.close();
    }
}
