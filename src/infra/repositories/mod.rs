pub mod sqlite_blocked_slot_repo;
pub mod sqlite_event_repo;
pub mod sqlite_hours_repo;
pub mod sqlite_order_repo;
