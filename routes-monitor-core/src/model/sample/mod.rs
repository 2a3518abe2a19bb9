mod sample_format;
mod traffic_condition;
mod travel_sample;

pub use sample_format::{format_distance, format_travel_time};
pub use traffic_condition::TrafficCondition;
pub use travel_sample::TravelSample;
