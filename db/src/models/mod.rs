pub mod report;
pub mod teacher;

pub use report::Entity as Report;
pub use teacher::Entity as Teacher;
