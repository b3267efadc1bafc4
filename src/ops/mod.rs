pub mod keys;
pub mod outline;
pub mod schedule;
