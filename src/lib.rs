//! Data channel negotiation on top of an SCTP association.
//!
//! An SCTP association gives each peer a set of independent streams. A data
//! channel is a bidirectional logical channel built from one stream in each
//! direction, negotiated in-band with a three-message handshake (open
//! request, open response, ack) and torn down by resetting the outgoing
//! stream. Channels choose their delivery semantics per message: fully
//! reliable, limited retransmissions, or limited lifetime, each ordered or
//! unordered.
//!
//! The crate owns the channel table and the handshake state machine; the
//! SCTP association itself is consumed through the [`SctpTransport`] trait.

#![warn(rust_2018_idioms)]
#![allow(dead_code)]

pub mod error;
pub mod message;
pub mod peer_connection;
pub mod transport;

pub use crate::error::{Error, Result};
pub use crate::peer_connection::{
    ChannelInfo, ChannelState, Config, DataChannelMessage, OnMessageHdlrFn, PeerConnection,
    Status,
};
pub use crate::transport::notification::Notification;
pub use crate::transport::{
    AssociationState, PayloadProtocolIdentifier, ReliabilityType, SctpStatus, SctpTransport,
    SendOptions, TransportEvent,
};
