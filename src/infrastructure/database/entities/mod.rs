//! Database entities module

pub mod course;
pub mod evaluation;
pub mod payment;
pub mod school_class;
pub mod student;
pub mod subject;

pub use course::Entity as Course;
pub use evaluation::Entity as Evaluation;
pub use payment::Entity as Payment;
pub use school_class::Entity as SchoolClass;
pub use student::Entity as Student;
pub use subject::Entity as Subject;
