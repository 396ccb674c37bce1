pub mod booking;
pub mod results;
pub mod submission;
pub mod validation;
