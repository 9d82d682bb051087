use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error(
        "control message is not long enough: (expected: {expected}, actual: {actual})"
    )]
    UnexpectedEndOfBuffer { expected: usize, actual: usize },
    #[error("Unknown MessageType {0}")]
    InvalidMessageType(u8),
    #[error("Unknown ChannelType {0}")]
    InvalidChannelType(u8),
    #[error("Channel id {0} is out of range")]
    InvalidChannelId(u32),
    #[error("Reliability value must be zero for reliable channels, got {0}")]
    InvalidReliabilityValue(u32),
    #[error("Channel {0} is neither connecting nor open")]
    ErrChannelNotOpen(u32),
    #[error("No free channel available")]
    ErrNoFreeChannel,
    #[error("No free outgoing stream available")]
    ErrNoFreeStream,
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("{0}")]
    Util(#[from] util::Error),
}

impl From<Error> for util::Error {
    fn from(e: Error) -> Self {
        util::Error::from_std(e)
    }
}

impl PartialEq<util::Error> for Error {
    fn eq(&self, other: &util::Error) -> bool {
        if let Some(down) = other.downcast_ref::<Error>() {
            return self == down;
        }
        false
    }
}

impl PartialEq<Error> for util::Error {
    fn eq(&self, other: &Error) -> bool {
        if let Some(down) = self.downcast_ref::<Error>() {
            return other == down;
        }
        false
    }
}
