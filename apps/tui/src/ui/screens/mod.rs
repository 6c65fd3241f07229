pub mod analysis;
pub mod dashboard;
pub mod results;
pub mod upload;
