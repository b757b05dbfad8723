pub mod advisory;
pub mod review;
