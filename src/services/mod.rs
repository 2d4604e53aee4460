pub mod admin;
pub mod messages;
pub mod student;

pub use admin::AdminService;
pub use student::StudentService;
