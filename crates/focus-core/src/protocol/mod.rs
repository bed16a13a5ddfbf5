//! Protocol module containing host event types and their JSON codec.

pub mod codec;
pub mod events;

pub use codec::{decode_event, encode_event, ProtocolError};
pub use events::*;
