pub mod events;
pub mod job_runner;
