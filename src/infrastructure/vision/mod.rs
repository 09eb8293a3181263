pub mod roboflow;
pub mod traits;
