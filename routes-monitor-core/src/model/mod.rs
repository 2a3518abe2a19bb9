pub mod api;
pub mod keys;
pub mod route;
pub mod sample;
pub mod schedule;
