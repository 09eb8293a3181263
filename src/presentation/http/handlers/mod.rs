pub mod analyze;
pub mod detect;
pub mod docs;
pub mod meta;
pub mod weather;
