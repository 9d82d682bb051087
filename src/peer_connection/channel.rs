use std::fmt;

use crate::transport::ReliabilityType;

/// Channel state enums
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(C)]
pub enum ChannelState {
    #[default]
    Closed = 0,
    Connecting = 1,
    Open = 2,
    Closing = 3,
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            ChannelState::Closed => "Closed",
            ChannelState::Connecting => "Connecting",
            ChannelState::Open => "Open",
            ChannelState::Closing => "Closing",
        };
        write!(f, "{s}")
    }
}

/// One slot of the channel table.
///
/// Stream ids use 0 as "unassigned"; stream 0 itself is reserved by the
/// protocol and never carries a channel.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Channel {
    pub(crate) id: u32,
    pub(crate) state: ChannelState,
    pub(crate) reliability_type: ReliabilityType,
    pub(crate) reliability_value: u32,
    pub(crate) unordered: bool,
    pub(crate) i_stream: u16,
    pub(crate) o_stream: u16,
}

impl Channel {
    pub(crate) fn new(id: u32) -> Self {
        Channel {
            id,
            ..Default::default()
        }
    }

    /// Returns the slot to its closed shape. The id is stable for the life
    /// of the table.
    pub(crate) fn clear(&mut self) {
        self.state = ChannelState::Closed;
        self.reliability_type = ReliabilityType::Reliable;
        self.reliability_value = 0;
        self.unordered = false;
        self.i_stream = 0;
        self.o_stream = 0;
    }
}

/// Per-channel line of a status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: u32,
    pub state: ChannelState,
    pub i_stream: u16,
    pub o_stream: u16,
    pub unordered: bool,
    pub reliability_type: ReliabilityType,
    pub reliability_value: u32,
}
