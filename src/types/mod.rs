pub mod frequency;
pub mod location;
pub mod location_frame;
pub mod selection_range;
pub mod weather_condition;
