pub mod availability;
pub mod batch;
pub mod clean;
