pub mod image_spool;
