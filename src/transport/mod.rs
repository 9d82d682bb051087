pub mod notification;

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use notification::Notification;

/// PayloadProtocolIdentifier is an enum for DataChannel payload types
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(C)]
pub enum PayloadProtocolIdentifier {
    /// Control carries the open-request / open-response / ack handshake.
    Control = 50,
    /// DomString carries a user message holding text.
    DomString = 51,
    /// Binary carries a user message holding arbitrary bytes.
    Binary = 52,
    #[default]
    Unknown,
}

impl fmt::Display for PayloadProtocolIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            PayloadProtocolIdentifier::Control => "Control",
            PayloadProtocolIdentifier::DomString => "DOMString",
            PayloadProtocolIdentifier::Binary => "Binary",
            _ => "Unknown Payload Protocol Identifier",
        };
        write!(f, "{s}")
    }
}

impl From<u32> for PayloadProtocolIdentifier {
    fn from(v: u32) -> PayloadProtocolIdentifier {
        match v {
            50 => PayloadProtocolIdentifier::Control,
            51 => PayloadProtocolIdentifier::DomString,
            52 => PayloadProtocolIdentifier::Binary,
            _ => PayloadProtocolIdentifier::Unknown,
        }
    }
}

/// The delivery guarantee a channel applies to its sends, negotiated in the
/// open request and attached to every user message afterwards.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(C)]
pub enum ReliabilityType {
    /// Every message is delivered; the reliability value must be zero.
    #[default]
    Reliable = 0,
    /// A message is abandoned once it has been retransmitted the given
    /// number of times.
    Rexmit = 1,
    /// A message is abandoned once the given number of milliseconds has
    /// passed since it was handed to the transport.
    Timed = 2,
}

impl fmt::Display for ReliabilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ReliabilityType::Reliable => write!(f, "Reliable"),
            ReliabilityType::Rexmit => write!(f, "Rexmit"),
            ReliabilityType::Timed => write!(f, "Timed"),
        }
    }
}

/// Association state as reported by the transport
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssociationState {
    Closed = 0,
    CookieWait = 1,
    CookieEchoed = 2,
    Established = 3,
    ShutdownAckSent = 4,
    ShutdownPending = 5,
    ShutdownReceived = 6,
    ShutdownSent = 7,
}

impl From<u8> for AssociationState {
    fn from(v: u8) -> AssociationState {
        match v {
            1 => AssociationState::CookieWait,
            2 => AssociationState::CookieEchoed,
            3 => AssociationState::Established,
            4 => AssociationState::ShutdownAckSent,
            5 => AssociationState::ShutdownPending,
            6 => AssociationState::ShutdownReceived,
            7 => AssociationState::ShutdownSent,
            _ => AssociationState::Closed,
        }
    }
}

impl fmt::Display for AssociationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            AssociationState::Closed => "Closed",
            AssociationState::CookieWait => "CookieWait",
            AssociationState::CookieEchoed => "CookieEchoed",
            AssociationState::Established => "Established",
            AssociationState::ShutdownAckSent => "ShutdownAckSent",
            AssociationState::ShutdownPending => "ShutdownPending",
            AssociationState::ShutdownReceived => "ShutdownReceived",
            AssociationState::ShutdownSent => "ShutdownSent",
        };
        write!(f, "{s}")
    }
}

/// A point-in-time snapshot of the association, including the negotiated
/// stream counts in each direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SctpStatus {
    pub state: AssociationState,
    pub inbound_streams: u16,
    pub outbound_streams: u16,
}

/// Per-send parameters attached to an outgoing message.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct SendOptions {
    /// Marks the payload as one complete record.
    pub end_of_record: bool,
    /// Allows the transport to deliver the message out of order.
    pub unordered: bool,
    /// Reliability policy for this message; `Reliable` means
    /// `reliability_value` is ignored.
    pub reliability_type: ReliabilityType,
    pub reliability_value: u32,
}

/// The operations the channel layer requires from an SCTP association.
///
/// Completion of `add_streams` and `reset_streams` is asynchronous and is
/// reported through [`Notification::StreamChange`] and
/// [`Notification::StreamReset`] respectively.
#[async_trait]
pub trait SctpTransport {
    /// Sends one complete message on the given outgoing stream.
    async fn send(
        &self,
        stream_id: u16,
        payload: &Bytes,
        ppid: PayloadProtocolIdentifier,
        options: SendOptions,
    ) -> Result<usize>;

    /// Returns the current association status.
    async fn status(&self) -> Result<SctpStatus>;

    /// Asks the association to grow the stream counts.
    async fn add_streams(&self, inbound_streams: u16, outbound_streams: u16) -> Result<()>;

    /// Requests a reset of the given outgoing streams in one batch.
    async fn reset_streams(&self, stream_ids: &[u16]) -> Result<()>;
}

/// A single delivery from the transport: either a message on a stream or an
/// association-level notification.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Message {
        stream_id: u16,
        ppid: PayloadProtocolIdentifier,
        payload: Bytes,
    },
    Notification(Notification),
}
