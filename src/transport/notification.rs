use std::fmt;
use std::net::SocketAddr;

use bytes::Bytes;

use super::PayloadProtocolIdentifier;

/// Association-level events delivered by the transport alongside stream
/// payloads.
///
/// `StreamReset` and `StreamChange` drive channel state; the remaining
/// variants are accepted and logged.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    AssociationChange(AssociationChangeEvent),
    PeerAddressChange(PeerAddressChangeEvent),
    RemoteError(RemoteErrorEvent),
    Shutdown,
    AdaptationIndication { indication: u32 },
    PartialDelivery,
    Authentication,
    SenderDry,
    NotificationsStopped,
    AssociationReset,
    SendFailed(SendFailedEvent),
    StreamReset(StreamResetEvent),
    StreamChange(StreamChangeEvent),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssociationChangeState {
    CommUp,
    CommLost,
    Restart,
    ShutdownComplete,
    CantStartAssociation,
}

impl fmt::Display for AssociationChangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            AssociationChangeState::CommUp => "CommUp",
            AssociationChangeState::CommLost => "CommLost",
            AssociationChangeState::Restart => "Restart",
            AssociationChangeState::ShutdownComplete => "ShutdownComplete",
            AssociationChangeState::CantStartAssociation => "CantStartAssociation",
        };
        write!(f, "{s}")
    }
}

/// Optional features the peers negotiated, reported with CommUp and Restart.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssociationFeature {
    PartialReliability,
    Auth,
    Asconf,
    MultiBuf,
    Reconfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssociationChangeEvent {
    pub state: AssociationChangeState,
    pub inbound_streams: u16,
    pub outbound_streams: u16,
    pub supported_features: Vec<AssociationFeature>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PeerAddressState {
    Available,
    Unreachable,
    Removed,
    Added,
    MadePrimary,
    Confirmed,
}

impl fmt::Display for PeerAddressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            PeerAddressState::Available => "Available",
            PeerAddressState::Unreachable => "Unreachable",
            PeerAddressState::Removed => "Removed",
            PeerAddressState::Added => "Added",
            PeerAddressState::MadePrimary => "MadePrimary",
            PeerAddressState::Confirmed => "Confirmed",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PeerAddressChangeEvent {
    pub address: SocketAddr,
    pub state: PeerAddressState,
    pub error: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteErrorEvent {
    pub error: u16,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendFailedEvent {
    /// Whether the message had left the send queue before it failed.
    pub sent: bool,
    pub stream_id: u16,
    pub ppid: PayloadProtocolIdentifier,
    pub error: u32,
}

/// A batch of stream resets that completed, one direction flag set per
/// affected side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamResetEvent {
    pub incoming: bool,
    pub outgoing: bool,
    pub denied: bool,
    pub failed: bool,
    pub stream_ids: Vec<u16>,
}

/// Completion of an earlier request to grow the stream counts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StreamChangeEvent {
    pub denied: bool,
    pub failed: bool,
}
