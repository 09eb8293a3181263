pub mod spool;
pub mod vision;
pub mod weather;
