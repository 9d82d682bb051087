use super::*;
use crate::error::Error;

type Result<T> = std::result::Result<T, util::Error>;

const OPEN_RESPONSE_LEN: usize = 5;

/// The body of an open-response message without the message type.
///
/// # Memory layout
///
/// ```plain
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// | (Message Type)|     Error     |             Flags             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |         Reverse Stream        |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// `reverse_stream` names the stream the responder saw the open request on,
/// which from the initiator's point of view is the outgoing stream it used.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct DataChannelOpenResponse {
    pub error: u8,
    pub flags: u16,
    pub reverse_stream: u16,
}

impl MarshalSize for DataChannelOpenResponse {
    fn marshal_size(&self) -> usize {
        OPEN_RESPONSE_LEN
    }
}

impl Marshal for DataChannelOpenResponse {
    fn marshal_to(&self, mut buf: &mut [u8]) -> Result<usize> {
        let required_len = self.marshal_size();
        if buf.remaining_mut() < required_len {
            return Err(Error::UnexpectedEndOfBuffer {
                expected: required_len,
                actual: buf.remaining_mut(),
            }
            .into());
        }

        buf.put_u8(self.error);
        buf.put_u16(self.flags);
        buf.put_u16(self.reverse_stream);
        Ok(self.marshal_size())
    }
}

impl Unmarshal for DataChannelOpenResponse {
    fn unmarshal<B>(buf: &mut B) -> Result<Self>
    where
        B: Buf,
    {
        let required_len = OPEN_RESPONSE_LEN;
        if buf.remaining() < required_len {
            return Err(Error::UnexpectedEndOfBuffer {
                expected: required_len,
                actual: buf.remaining(),
            }
            .into());
        }

        let error = buf.get_u8();
        let flags = buf.get_u16();
        let reverse_stream = buf.get_u16();

        Ok(Self {
            error,
            flags,
            reverse_stream,
        })
    }
}

#[cfg(test)]
mod tests {
    use bytes::{Bytes, BytesMut};

    use super::*;

    static MARSHALED_BYTES: [u8; 5] = [
        0x00, // error
        0x00, 0x00, // flags
        0x00, 0x07, // reverse stream
    ];

    #[test]
    fn test_open_response_unmarshal_success() -> Result<()> {
        let mut bytes = Bytes::from_static(&MARSHALED_BYTES);

        let open_response = DataChannelOpenResponse::unmarshal(&mut bytes)?;

        assert_eq!(open_response.error, 0);
        assert_eq!(open_response.flags, 0);
        assert_eq!(open_response.reverse_stream, 7);
        Ok(())
    }

    #[test]
    fn test_open_response_unmarshal_unexpected_end_of_buffer() -> Result<()> {
        let mut bytes = Bytes::from_static(&[0x00, 0x00]);
        match DataChannelOpenResponse::unmarshal(&mut bytes) {
            Ok(_) => panic!("expected Error, but got Ok"),
            Err(err) => {
                if let Some(&Error::UnexpectedEndOfBuffer {
                    expected: 5,
                    actual: 2,
                }) = err.downcast_ref::<Error>()
                {
                    return Ok(());
                }
                panic!("unexpected err {:?}", err);
            }
        }
    }

    #[test]
    fn test_open_response_marshal_size() -> Result<()> {
        let open_response = DataChannelOpenResponse {
            error: 0,
            flags: 0,
            reverse_stream: 7,
        };

        let marshal_size = open_response.marshal_size();

        assert_eq!(marshal_size, 5);
        Ok(())
    }

    #[test]
    fn test_open_response_marshal() -> Result<()> {
        let open_response = DataChannelOpenResponse {
            error: 0,
            flags: 0,
            reverse_stream: 7,
        };

        let mut buf = BytesMut::with_capacity(5);
        buf.resize(5, 0u8);
        let bytes_written = open_response.marshal_to(&mut buf)?;
        let bytes = buf.freeze();

        assert_eq!(bytes_written, open_response.marshal_size());
        assert_eq!(&bytes[..], &MARSHALED_BYTES);
        Ok(())
    }
}
