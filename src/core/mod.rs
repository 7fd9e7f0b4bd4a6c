//! Core types: identifiers, colours, configuration, events and errors.
//!
//! Everything here is plain data shared by the store, escrow and registry
//! layers. Nothing in this module touches state.

pub mod ids;
pub mod color;
pub mod config;
pub mod event;
pub mod error;

pub use ids::{AccountId, Coin, Denom, GameId, Timestamp, NO_LINK};
pub use color::{Color, Pos, Winner, NO_WINNER};
pub use config::RegistryConfig;
pub use event::{Attribute, Event, StringEvent};
pub use error::RegistryError;
