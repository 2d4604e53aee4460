pub mod admin;
pub mod auth;
pub mod common;
pub mod events;
pub mod replies;
pub mod roster;
pub mod session;

pub use common::envelope::Envelope;
pub use events::entities::{Event, EventCategory};
pub use replies::answer::{AnswerPayload, BusChoice, ConsentChoice};
pub use replies::entities::ReplyRecord;
pub use roster::entities::RosterRow;
pub use session::entities::{Role, Session, SessionKind};
