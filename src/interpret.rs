use std::fmt;
use std::net::{IpAddr, SocketAddr};

use stun_codec::rfc5389::attributes::{ErrorCode, MappedAddress, XorMappedAddress};

use crate::codec::Reply;
use crate::error::Error;

/// The transport address a STUN server observed for our request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappedEndpoint {
    pub address: IpAddr,
    pub port: u16,
}

impl MappedEndpoint {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

impl From<SocketAddr> for MappedEndpoint {
    fn from(addr: SocketAddr) -> Self {
        Self {
            address: addr.ip(),
            port: addr.port(),
        }
    }
}

impl fmt::Display for MappedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.socket_addr().fmt(f)
    }
}

/// Classifies a binding reply.
///
/// An ERROR-CODE attribute always wins. Otherwise XOR-MAPPED-ADDRESS is
/// preferred over MAPPED-ADDRESS, since NATs rewrite the plain variant.
pub fn interpret(reply: &Reply) -> Result<MappedEndpoint, Error> {
    if let Some(error) = reply.get_attribute::<ErrorCode>() {
        return Err(Error::Bind {
            code: error.code(),
            reason: error.reason_phrase().to_owned(),
        });
    }

    let address = reply
        .get_attribute::<XorMappedAddress>()
        .map(|attr| attr.address())
        .or_else(|| reply.get_attribute::<MappedAddress>().map(|attr| attr.address()))
        .ok_or(Error::NoMappedAddress)?;

    Ok(MappedEndpoint::from(address))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stun_codec::rfc5389::methods::BINDING;
    use stun_codec::rfc5389::Attribute;
    use stun_codec::{Message, MessageClass, TransactionId};

    fn reply(class: MessageClass, attributes: Vec<Attribute>) -> Reply {
        let mut message = Message::new(class, BINDING, TransactionId::new([3; 12]));
        for attribute in attributes {
            message.add_attribute(attribute);
        }
        message
    }

    fn bad_request() -> Attribute {
        Attribute::ErrorCode(ErrorCode::new(400, "Bad Request".to_owned()).unwrap())
    }

    fn xor(addr: &str) -> Attribute {
        Attribute::XorMappedAddress(XorMappedAddress::new(addr.parse().unwrap()))
    }

    fn plain(addr: &str) -> Attribute {
        Attribute::MappedAddress(MappedAddress::new(addr.parse().unwrap()))
    }

    #[test]
    fn error_code_wins_over_addresses() {
        let reply = reply(
            MessageClass::ErrorResponse,
            vec![xor("203.0.113.5:54321"), plain("198.51.100.9:1024"), bad_request()],
        );

        let err = interpret(&reply).unwrap_err();

        assert!(err.is_protocol());
        assert!(err.to_string().contains("Bad Request"));
        assert!(matches!(err, Error::Bind { code: 400, .. }));
    }

    #[test]
    fn xor_mapped_address_is_preferred() {
        let reply = reply(
            MessageClass::SuccessResponse,
            vec![plain("198.51.100.9:1024"), xor("203.0.113.5:54321")],
        );

        let endpoint = interpret(&reply).unwrap();

        assert_eq!(endpoint.socket_addr(), "203.0.113.5:54321".parse().unwrap());
    }

    #[test]
    fn mapped_address_is_the_fallback() {
        let reply = reply(MessageClass::SuccessResponse, vec![plain("198.51.100.9:1024")]);

        let endpoint = interpret(&reply).unwrap();

        assert_eq!(endpoint.address, "198.51.100.9".parse::<IpAddr>().unwrap());
        assert_eq!(endpoint.port, 1024);
    }

    #[test]
    fn ipv6_addresses_are_kept() {
        let reply = reply(MessageClass::SuccessResponse, vec![xor("[2001:db8::1]:3478")]);

        let endpoint = interpret(&reply).unwrap();

        assert_eq!(endpoint.to_string(), "[2001:db8::1]:3478");
    }

    #[test]
    fn reply_without_address_is_a_protocol_error() {
        let reply = reply(MessageClass::SuccessResponse, vec![]);

        let err = interpret(&reply).unwrap_err();

        assert!(matches!(err, Error::NoMappedAddress));
        assert!(err.is_protocol());
    }

    fn ordered(mut attributes: Vec<Attribute>, reverse: bool) -> Vec<Attribute> {
        if reverse {
            attributes.reverse();
        }
        attributes
    }

    proptest! {
        #[test]
        fn error_code_wins_regardless_of_addresses(
            code in 400u16..500,
            reason in "[A-Za-z][A-Za-z ]{0,30}",
            xor_addr in any::<SocketAddr>(),
            plain_addr in any::<SocketAddr>(),
            with_xor in any::<bool>(),
            with_plain in any::<bool>(),
            reverse in any::<bool>(),
        ) {
            let mut attributes = Vec::new();
            if with_xor {
                attributes.push(Attribute::XorMappedAddress(XorMappedAddress::new(xor_addr)));
            }
            if with_plain {
                attributes.push(Attribute::MappedAddress(MappedAddress::new(plain_addr)));
            }
            attributes.push(Attribute::ErrorCode(ErrorCode::new(code, reason.clone()).unwrap()));

            let err = interpret(&reply(MessageClass::ErrorResponse, ordered(attributes, reverse)))
                .unwrap_err();

            prop_assert!(err.to_string().contains(&reason));
            prop_assert!(matches!(err, Error::Bind { code: c, .. } if c == code), "expected Error::Bind with code {}", code);
        }

        #[test]
        fn xor_mapped_address_is_preferred_in_any_order(
            xor_addr in any::<SocketAddr>(),
            plain_addr in any::<SocketAddr>(),
            reverse in any::<bool>(),
        ) {
            let attributes = vec![
                Attribute::XorMappedAddress(XorMappedAddress::new(xor_addr)),
                Attribute::MappedAddress(MappedAddress::new(plain_addr)),
            ];

            let endpoint =
                interpret(&reply(MessageClass::SuccessResponse, ordered(attributes, reverse)))
                    .unwrap();

            prop_assert_eq!(endpoint, MappedEndpoint::from(xor_addr));
        }

        #[test]
        fn mapped_address_alone_is_used(plain_addr in any::<SocketAddr>()) {
            let attributes = vec![Attribute::MappedAddress(MappedAddress::new(plain_addr))];

            let endpoint = interpret(&reply(MessageClass::SuccessResponse, attributes)).unwrap();

            prop_assert_eq!(endpoint.address, plain_addr.ip());
            prop_assert_eq!(endpoint.port, plain_addr.port());
        }
    }
}
