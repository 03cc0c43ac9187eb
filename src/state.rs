use crate::config::Config;
use crate::domain::ports::{OrderRepository, SpecialEventRepository};
use crate::domain::services::hours::OpeningHoursResolver;
use crate::domain::services::planner::SlotPlanner;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub hours: OpeningHoursResolver,
    pub order_repo: Arc<dyn OrderRepository>,
    pub event_repo: Arc<dyn SpecialEventRepository>,
    pub planner: Arc<SlotPlanner>,
}
