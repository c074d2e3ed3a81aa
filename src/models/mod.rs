pub mod assignment;
pub mod course;

pub use assignment::Assignment;
pub use course::Course;
