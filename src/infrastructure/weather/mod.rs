pub mod openweather;
pub mod traits;
