use bytecodec::{DecodeExt as _, EncodeExt as _};
use stun_codec::rfc5389::Attribute;
use stun_codec::{Message, MessageDecoder, MessageEncoder, TransactionId};

use crate::error::TransportError;
use crate::message::MessageDescriptor;

/// A decoded STUN message as returned by the server.
pub type Reply = Message<Attribute>;

pub fn new_transaction_id() -> TransactionId {
    TransactionId::new(rand::random())
}

pub fn encode(
    descriptor: &MessageDescriptor,
    transaction_id: TransactionId,
) -> Result<Vec<u8>, TransportError> {
    let message = Message::<Attribute>::new(descriptor.class, descriptor.method, transaction_id);

    encode_message(message)
}

pub fn encode_message(message: Message<Attribute>) -> Result<Vec<u8>, TransportError> {
    MessageEncoder::<Attribute>::default()
        .encode_into_bytes(message)
        .map_err(|e| TransportError::Codec(e.to_string()))
}

pub fn decode(buf: &[u8]) -> Result<Reply, TransportError> {
    MessageDecoder::<Attribute>::default()
        .decode_from_bytes(buf)
        .map_err(|e| TransportError::Codec(e.to_string()))?
        .map_err(|_| TransportError::Malformed)
}
