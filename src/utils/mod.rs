pub mod datetime;
pub mod feedback;
pub mod formatting;
pub mod html;
pub mod logging;
pub mod message_split;
pub mod validation;
