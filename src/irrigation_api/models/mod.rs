pub mod request;

pub mod schedule_entry;
pub mod status_snapshot;
