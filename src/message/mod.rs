
pub mod message_channel_ack;
pub mod message_channel_open_request;
pub mod message_channel_open_response;
pub mod message_type;

use bytes::{Buf, BufMut};
use message_channel_ack::*;
use message_channel_open_request::*;
use message_channel_open_response::*;
use message_type::*;
use util::marshal::*;

use crate::error::Error;

/// A parsed control message
#[derive(Eq, PartialEq, Clone, Debug)]
pub enum Message {
    DataChannelOpenRequest(DataChannelOpenRequest),
    DataChannelOpenResponse(DataChannelOpenResponse),
    DataChannelAck(DataChannelAck),
}

impl MarshalSize for Message {
    fn marshal_size(&self) -> usize {
        match self {
            Message::DataChannelOpenRequest(m) => m.marshal_size() + MESSAGE_TYPE_LEN,
            Message::DataChannelOpenResponse(m) => m.marshal_size() + MESSAGE_TYPE_LEN,
            Message::DataChannelAck(m) => m.marshal_size() + MESSAGE_TYPE_LEN,
        }
    }
}

impl Marshal for Message {
    fn marshal_to(&self, mut buf: &mut [u8]) -> Result<usize, util::Error> {
        let mut bytes_written = 0;
        let n = self.message_type().marshal_to(buf)?;
        buf = &mut buf[n..];
        bytes_written += n;
        bytes_written += match self {
            Message::DataChannelOpenRequest(open_request) => open_request.marshal_to(buf)?,
            Message::DataChannelOpenResponse(open_response) => open_response.marshal_to(buf)?,
            Message::DataChannelAck(_) => 0,
        };
        Ok(bytes_written)
    }
}

impl Unmarshal for Message {
    fn unmarshal<B>(buf: &mut B) -> Result<Self, util::Error>
    where
        Self: Sized,
        B: Buf,
    {
        if buf.remaining() < MESSAGE_TYPE_LEN {
            return Err(Error::UnexpectedEndOfBuffer {
                expected: MESSAGE_TYPE_LEN,
                actual: buf.remaining(),
            }
            .into());
        }

        match MessageType::unmarshal(buf)? {
            MessageType::DataChannelOpenRequest => Ok(Self::DataChannelOpenRequest(
                DataChannelOpenRequest::unmarshal(buf)?,
            )),
            MessageType::DataChannelOpenResponse => Ok(Self::DataChannelOpenResponse(
                DataChannelOpenResponse::unmarshal(buf)?,
            )),
            MessageType::DataChannelAck => Ok(Self::DataChannelAck(DataChannelAck {})),
        }
    }
}

impl Message {
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::DataChannelOpenRequest(_) => MessageType::DataChannelOpenRequest,
            Self::DataChannelOpenResponse(_) => MessageType::DataChannelOpenResponse,
            Self::DataChannelAck(_) => MessageType::DataChannelAck,
        }
    }
}
