//! Document model for parsed LIN Description Files.
//!
//! The parser reduces LDF text straight into these types; there is no
//! intermediate syntax tree. A [`Document`] maps section names to nested
//! [`Value`]s and is the contract handed to downstream code generators.

mod coerce;
mod document;
mod value;

pub use coerce::{NumberError, coerce, scale_kbps};
pub use document::{Document, Section};
pub use value::{Map, Value};
