use stun_codec::rfc5389::methods::BINDING;
use stun_codec::{MessageClass, Method};

/// A STUN message before it is given a transaction ID and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageDescriptor {
    pub method: Method,
    pub class: MessageClass,
}

impl MessageDescriptor {
    pub fn new(method: Method, class: MessageClass) -> Self {
        Self { method, class }
    }
}

pub fn compose_binding_request() -> MessageDescriptor {
    MessageDescriptor::new(BINDING, MessageClass::Request)
}

/// Indications are never answered by the server.
pub fn compose_binding_indication() -> MessageDescriptor {
    MessageDescriptor::new(BINDING, MessageClass::Indication)
}
