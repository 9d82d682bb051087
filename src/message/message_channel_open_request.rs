use super::*;
use crate::error::Error;
use crate::transport::ReliabilityType;

type Result<T> = std::result::Result<T, util::Error>;

const CHANNEL_TYPE_RELIABLE: u8 = 0x00;
const CHANNEL_TYPE_RELIABLE_STREAM: u8 = 0x01;
const CHANNEL_TYPE_UNRELIABLE: u8 = 0x02;
const CHANNEL_TYPE_PARTIAL_RELIABLE_REXMIT: u8 = 0x03;
const CHANNEL_TYPE_PARTIAL_RELIABLE_TIMED: u8 = 0x04;
const CHANNEL_TYPE_LEN: usize = 1;

/// Set in [`DataChannelOpenRequest::flags`] when the channel tolerates
/// out-of-order delivery.
pub const FLAG_OUT_OF_ORDER_ALLOWED: u16 = 0x0001;

/// The delivery class requested for a new channel, as carried on the wire.
#[derive(Default, Eq, PartialEq, Copy, Clone, Debug)]
pub enum ChannelType {
    // `Reliable` requests a reliable in-order channel.
    #[default]
    Reliable,
    // `ReliableStream` is a stream-based alias of `Reliable`.
    ReliableStream,
    // `Unreliable` requests a partially reliable channel whose messages are
    // abandoned after a life-time in milliseconds.
    Unreliable,
    // `PartialReliableRexmit` requests a partially reliable channel whose
    // messages are retransmitted at most the given number of times.
    PartialReliableRexmit,
    // `PartialReliableTimed` requests a partially reliable channel whose
    // messages are abandoned after a life-time in milliseconds.
    PartialReliableTimed,
}

impl ChannelType {
    /// Collapses the wire channel type onto the reliability policy applied
    /// to the channel's sends.
    pub fn reliability_type(&self) -> ReliabilityType {
        match self {
            ChannelType::Reliable | ChannelType::ReliableStream => ReliabilityType::Reliable,
            ChannelType::Unreliable | ChannelType::PartialReliableTimed => ReliabilityType::Timed,
            ChannelType::PartialReliableRexmit => ReliabilityType::Rexmit,
        }
    }
}

impl From<ReliabilityType> for ChannelType {
    fn from(reliability_type: ReliabilityType) -> Self {
        match reliability_type {
            ReliabilityType::Reliable => ChannelType::Reliable,
            ReliabilityType::Rexmit => ChannelType::PartialReliableRexmit,
            ReliabilityType::Timed => ChannelType::PartialReliableTimed,
        }
    }
}

impl MarshalSize for ChannelType {
    fn marshal_size(&self) -> usize {
        CHANNEL_TYPE_LEN
    }
}

impl Marshal for ChannelType {
    fn marshal_to(&self, mut buf: &mut [u8]) -> Result<usize> {
        let required_len = self.marshal_size();
        if buf.remaining_mut() < required_len {
            return Err(Error::UnexpectedEndOfBuffer {
                expected: required_len,
                actual: buf.remaining_mut(),
            }
            .into());
        }

        let byte = match self {
            Self::Reliable => CHANNEL_TYPE_RELIABLE,
            Self::ReliableStream => CHANNEL_TYPE_RELIABLE_STREAM,
            Self::Unreliable => CHANNEL_TYPE_UNRELIABLE,
            Self::PartialReliableRexmit => CHANNEL_TYPE_PARTIAL_RELIABLE_REXMIT,
            Self::PartialReliableTimed => CHANNEL_TYPE_PARTIAL_RELIABLE_TIMED,
        };

        buf.put_u8(byte);

        Ok(1)
    }
}

impl Unmarshal for ChannelType {
    fn unmarshal<B>(buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        let required_len = CHANNEL_TYPE_LEN;
        if buf.remaining() < required_len {
            return Err(Error::UnexpectedEndOfBuffer {
                expected: required_len,
                actual: buf.remaining(),
            }
            .into());
        }

        let b0 = buf.get_u8();

        match b0 {
            CHANNEL_TYPE_RELIABLE => Ok(Self::Reliable),
            CHANNEL_TYPE_RELIABLE_STREAM => Ok(Self::ReliableStream),
            CHANNEL_TYPE_UNRELIABLE => Ok(Self::Unreliable),
            CHANNEL_TYPE_PARTIAL_RELIABLE_REXMIT => Ok(Self::PartialReliableRexmit),
            CHANNEL_TYPE_PARTIAL_RELIABLE_TIMED => Ok(Self::PartialReliableTimed),
            _ => Err(Error::InvalidChannelType(b0).into()),
        }
    }
}

const OPEN_REQUEST_HEADER_LEN: usize = 7;

/// The body of an open-request message without the message type.
///
/// # Memory layout
///
/// ```plain
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// | (Message Type)|  Channel Type |             Flags             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |      Reliability Params       |            Priority           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// |                             Label                             |
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The label runs to the end of the message; it has no length field of its
/// own and may be empty.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct DataChannelOpenRequest {
    pub channel_type: ChannelType,
    pub flags: u16,
    pub reliability_params: u16,
    pub priority: i16,
    pub label: Vec<u8>,
}

impl DataChannelOpenRequest {
    pub fn is_out_of_order_allowed(&self) -> bool {
        self.flags & FLAG_OUT_OF_ORDER_ALLOWED != 0
    }
}

impl MarshalSize for DataChannelOpenRequest {
    fn marshal_size(&self) -> usize {
        OPEN_REQUEST_HEADER_LEN + self.label.len()
    }
}

impl Marshal for DataChannelOpenRequest {
    fn marshal_to(&self, mut buf: &mut [u8]) -> Result<usize> {
        let required_len = self.marshal_size();
        if buf.remaining_mut() < required_len {
            return Err(Error::UnexpectedEndOfBuffer {
                expected: required_len,
                actual: buf.remaining_mut(),
            }
            .into());
        }

        let n = self.channel_type.marshal_to(buf)?;
        buf = &mut buf[n..];
        buf.put_u16(self.flags);
        buf.put_u16(self.reliability_params);
        buf.put_i16(self.priority);
        buf.put_slice(self.label.as_slice());
        Ok(self.marshal_size())
    }
}

impl Unmarshal for DataChannelOpenRequest {
    fn unmarshal<B>(buf: &mut B) -> Result<Self>
    where
        B: Buf,
    {
        let required_len = OPEN_REQUEST_HEADER_LEN;
        if buf.remaining() < required_len {
            return Err(Error::UnexpectedEndOfBuffer {
                expected: required_len,
                actual: buf.remaining(),
            }
            .into());
        }

        let channel_type = ChannelType::unmarshal(buf)?;
        let flags = buf.get_u16();
        let reliability_params = buf.get_u16();
        let priority = buf.get_i16();

        let mut label = vec![0; buf.remaining()];
        buf.copy_to_slice(&mut label[..]);

        Ok(Self {
            channel_type,
            flags,
            reliability_params,
            priority,
            label,
        })
    }
}

#[cfg(test)]
mod tests {
    use bytes::{Bytes, BytesMut};

    use super::*;

    #[test]
    fn test_channel_type_unmarshal_success() -> Result<()> {
        let mut bytes = Bytes::from_static(&[0x03]);
        let channel_type = ChannelType::unmarshal(&mut bytes)?;

        assert_eq!(channel_type, ChannelType::PartialReliableRexmit);
        Ok(())
    }

    #[test]
    fn test_channel_type_unmarshal_invalid() -> Result<()> {
        let mut bytes = Bytes::from_static(&[0x11]);
        match ChannelType::unmarshal(&mut bytes) {
            Ok(_) => panic!("expected Error, but got Ok"),
            Err(err) => {
                if let Some(&Error::InvalidChannelType(0x11)) = err.downcast_ref::<Error>() {
                    return Ok(());
                }
                panic!(
                    "unexpected err {:?}, want {:?}",
                    err,
                    Error::InvalidChannelType(0x11)
                );
            }
        }
    }

    #[test]
    fn test_channel_type_reliability_mapping() {
        assert_eq!(
            ChannelType::Reliable.reliability_type(),
            ReliabilityType::Reliable
        );
        assert_eq!(
            ChannelType::ReliableStream.reliability_type(),
            ReliabilityType::Reliable
        );
        assert_eq!(
            ChannelType::Unreliable.reliability_type(),
            ReliabilityType::Timed
        );
        assert_eq!(
            ChannelType::PartialReliableRexmit.reliability_type(),
            ReliabilityType::Rexmit
        );
        assert_eq!(
            ChannelType::PartialReliableTimed.reliability_type(),
            ReliabilityType::Timed
        );

        assert_eq!(
            ChannelType::from(ReliabilityType::Reliable),
            ChannelType::Reliable
        );
        assert_eq!(
            ChannelType::from(ReliabilityType::Rexmit),
            ChannelType::PartialReliableRexmit
        );
        assert_eq!(
            ChannelType::from(ReliabilityType::Timed),
            ChannelType::PartialReliableTimed
        );
    }

    static MARSHALED_BYTES: [u8; 11] = [
        0x03, // channel type
        0x00, 0x01, // flags
        0x00, 0x05, // reliability params
        0x00, 0x00, // priority
        0x63, 0x68, 0x61, 0x74, // label
    ];

    #[test]
    fn test_open_request_unmarshal_success() -> Result<()> {
        let mut bytes = Bytes::from_static(&MARSHALED_BYTES);

        let open_request = DataChannelOpenRequest::unmarshal(&mut bytes)?;

        assert_eq!(
            open_request.channel_type,
            ChannelType::PartialReliableRexmit
        );
        assert_eq!(open_request.flags, 0x0001);
        assert!(open_request.is_out_of_order_allowed());
        assert_eq!(open_request.reliability_params, 5);
        assert_eq!(open_request.priority, 0);
        assert_eq!(open_request.label, b"chat");
        Ok(())
    }

    #[test]
    fn test_open_request_unmarshal_empty_label() -> Result<()> {
        let mut bytes = Bytes::from_static(&[
            0x00, // channel type
            0x00, 0x00, // flags
            0x00, 0x00, // reliability params
            0x00, 0x00, // priority
        ]);

        let open_request = DataChannelOpenRequest::unmarshal(&mut bytes)?;

        assert_eq!(open_request.channel_type, ChannelType::Reliable);
        assert!(!open_request.is_out_of_order_allowed());
        assert!(open_request.label.is_empty());
        Ok(())
    }

    #[test]
    fn test_open_request_unmarshal_unexpected_end_of_buffer() -> Result<()> {
        let mut bytes = Bytes::from_static(&[0x00; 5]);
        match DataChannelOpenRequest::unmarshal(&mut bytes) {
            Ok(_) => panic!("expected Error, but got Ok"),
            Err(err) => {
                if let Some(&Error::UnexpectedEndOfBuffer {
                    expected: 7,
                    actual: 5,
                }) = err.downcast_ref::<Error>()
                {
                    return Ok(());
                }
                panic!("unexpected err {:?}", err);
            }
        }
    }

    #[test]
    fn test_open_request_marshal_size() -> Result<()> {
        let open_request = DataChannelOpenRequest {
            channel_type: ChannelType::PartialReliableRexmit,
            flags: 0x0001,
            reliability_params: 5,
            priority: 0,
            label: b"chat".to_vec(),
        };

        let marshal_size = open_request.marshal_size();

        assert_eq!(marshal_size, 7 + 4);
        Ok(())
    }

    #[test]
    fn test_open_request_marshal() -> Result<()> {
        let open_request = DataChannelOpenRequest {
            channel_type: ChannelType::PartialReliableRexmit,
            flags: 0x0001,
            reliability_params: 5,
            priority: 0,
            label: b"chat".to_vec(),
        };

        let mut buf = BytesMut::with_capacity(7 + 4);
        buf.resize(7 + 4, 0u8);
        let bytes_written = open_request.marshal_to(&mut buf)?;
        let bytes = buf.freeze();

        assert_eq!(bytes_written, open_request.marshal_size());
        assert_eq!(&bytes[..], &MARSHALED_BYTES);
        Ok(())
    }
}
