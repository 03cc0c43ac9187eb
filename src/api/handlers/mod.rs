pub mod health;
pub mod hours;
pub mod order;
pub mod slots;
