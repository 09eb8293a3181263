pub mod analyze_sky;
pub mod detect_clouds;
