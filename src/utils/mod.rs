pub mod csv;
pub mod datetime;
pub mod validate;
