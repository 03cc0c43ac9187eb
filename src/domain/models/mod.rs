pub mod blocked;
pub mod hours;
pub mod order;
pub mod slot;
pub mod special_event;
