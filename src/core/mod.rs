pub mod date_key;
pub mod event;
pub mod planner_day;
pub mod task;
pub mod week;
