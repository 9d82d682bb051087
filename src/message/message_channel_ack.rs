use super::*;

type Result<T> = std::result::Result<T, util::Error>;

/// The third and final message of the open handshake, sent by the initiator
/// on the same outgoing stream the open request went out on once the
/// responder's open response has arrived. It carries no body; the message
/// type octet is the whole message.
///
/// Because the ack travels on a different stream than the response, data
/// sent early by the responder may overtake it; the receiver treats such
/// data as an implicit ack.
///
/// # Memory layout
///
/// ```plain
/// 0 1 2 3 4 5 6 7
///+-+-+-+-+-+-+-+-+
///|  Message Type |
///+-+-+-+-+-+-+-+-+
/// ```
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct DataChannelAck;

impl MarshalSize for DataChannelAck {
    fn marshal_size(&self) -> usize {
        0
    }
}

impl Marshal for DataChannelAck {
    fn marshal_to(&self, _buf: &mut [u8]) -> Result<usize> {
        Ok(0)
    }
}

impl Unmarshal for DataChannelAck {
    fn unmarshal<B>(_buf: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use bytes::{Bytes, BytesMut};

    use super::*;

    #[test]
    fn test_ack_body_is_empty_on_unmarshal() -> Result<()> {
        // Everything after the message type octet belongs to the body, and
        // for an ack that is nothing.
        let mut bytes = Bytes::from_static(&[]);

        let ack = DataChannelAck::unmarshal(&mut bytes)?;

        assert_eq!(ack, DataChannelAck);
        Ok(())
    }

    #[test]
    fn test_ack_trailing_bytes_ignored() -> Result<()> {
        // A peer padding the ack past the type octet is tolerated.
        let mut bytes = Bytes::from_static(&[0xab, 0xcd]);

        let ack = DataChannelAck::unmarshal(&mut bytes)?;

        assert_eq!(ack, DataChannelAck);
        Ok(())
    }

    #[test]
    fn test_ack_marshal_writes_no_body() -> Result<()> {
        let ack = DataChannelAck;
        assert_eq!(ack.marshal_size(), 0);

        let mut buf = BytesMut::with_capacity(0);
        let bytes_written = ack.marshal_to(&mut buf)?;

        assert_eq!(bytes_written, 0);
        assert_eq!(&buf[..], &[]);
        Ok(())
    }
}
