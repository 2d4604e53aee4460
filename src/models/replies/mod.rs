pub mod answer;
pub mod entities;
pub mod requests;
pub mod responses;
