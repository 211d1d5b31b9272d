pub mod custom_list;
pub mod health;
pub mod schedule;
pub mod schedule_source;
