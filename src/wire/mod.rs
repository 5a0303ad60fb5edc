/*! Low-level DHCPv6 option parsing and emission.

The `wire` module deals with the option framing of DHCPv6 messages. It
provides two levels of functionality.

 * First, it provides functions to extract fields from a sequence of octets,
   and to insert fields into a sequence of octets. This happens through
   [Dhcpv6Option], which is a wrapper around a buffer holding one option.
 * Second, in cases where the space of valid field values is much smaller than
   the space of possible field values, it provides a compact, high-level
   representation of the option data that can be parsed from and emitted into
   a sequence of octets. This happens through [Dhcpv6OptionRepr].

The [Decoder] ties both together: it checks the framing of every option in a
buffer, hands the payload to the decoder registered for its code and makes
sure the decoded representation accounts for exactly the declared number of
octets.

An important part of validating a buffer is ensuring that accessor methods
will not panic. [Dhcpv6Option::new_checked] performs this check;
[Dhcpv6Option::new_unchecked] does not.
*/

mod field {
    pub type Field = ::core::ops::Range<usize>;
    pub type Rest = ::core::ops::RangeFrom<usize>;
}

pub mod dhcpv6;
pub mod pretty_print;

use alloc::boxed::Box;
use core::fmt;

pub use self::dhcpv6::{
    codec::{emit_options, parse_option, parse_options, DecodeFn, Decoder},
    domain::DomainName as Dhcpv6DomainName,
    duid::{Duid as Dhcpv6Duid, DuidType as Dhcpv6DuidType},
    ia::{
        IaAddr as Dhcpv6IaAddr, IaNa as Dhcpv6IaNa, IaPd as Dhcpv6IaPd,
        IaPrefix as Dhcpv6IaPrefix, IaTa as Dhcpv6IaTa,
    },
    option::{Dhcpv6Option, OptionWriter as Dhcpv6OptionWriter, RawOptions as Dhcpv6RawOptions},
    repr::{
        Nii as Dhcpv6Nii, RemoteId as Dhcpv6RemoteId, Repr as Dhcpv6OptionRepr,
        VendorClass as Dhcpv6VendorClass,
    },
    status::{StatusCode as Dhcpv6StatusCode, StatusCodeRepr as Dhcpv6StatusCodeRepr},
    OptionCode as Dhcpv6OptionCode, CLIENT_PORT as DHCPV6_CLIENT_PORT,
    SERVER_PORT as DHCPV6_SERVER_PORT,
};

/// Framing error.
///
/// Every variant that concerns a particular option carries its code, so that
/// a caller can tell which option invalidated the buffer.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Fewer than the four octets of an option header were available.
    TruncatedHeader { available: usize },
    /// The option header declares more payload octets than are available.
    TruncatedPayload {
        code: u16,
        declared: usize,
        available: usize,
    },
    /// The decoded option accounts for a different number of octets than its
    /// header declares.
    LengthMismatch {
        code: u16,
        declared: usize,
        actual: usize,
    },
    /// The decode cursor moved past the end of the buffer.
    Overrun { cursor: usize, len: usize },
    /// The payload of an option could not be decoded.
    Option { code: u16, error: DecodeError },
    /// The payload of an option does not fit in the 16-bit length field.
    Oversized { code: u16, len: usize },
    /// An emit buffer was too small.
    Exhausted,
}

/// Payload error returned by a per-option decoder.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// The payload is shorter than the fixed part of the option.
    Truncated { expected: usize, actual: usize },
    /// The payload has a length that the option format does not allow.
    InvalidLength { actual: usize },
    /// The payload is longer than the protocol allows.
    TooLong { max: usize, actual: usize },
    /// A text field is not valid UTF-8.
    InvalidUtf8,
    /// A domain name is not a sequence of labels ending with the root label.
    InvalidDomainName,
    /// The options encapsulated in this option could not be decoded.
    Encapsulated(Box<Error>),
}

/// The result type for the option codec.
pub type Result<T> = core::result::Result<T, Error>;

impl From<Error> for DecodeError {
    fn from(err: Error) -> Self {
        DecodeError::Encapsulated(Box::new(err))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TruncatedHeader { available } => {
                write!(f, "truncated option header ({available} of 4 octets)")
            }
            Error::TruncatedPayload {
                code,
                declared,
                available,
            } => write!(
                f,
                "truncated payload for option {code}: declared {declared}, available {available}"
            ),
            Error::LengthMismatch {
                code,
                declared,
                actual,
            } => write!(
                f,
                "length mismatch for option {code}: declared {declared}, decoded {actual}"
            ),
            Error::Overrun { cursor, len } => {
                write!(f, "read past the end of options ({cursor} > {len})")
            }
            Error::Option { code, error } => write!(f, "invalid option {code}: {error}"),
            Error::Oversized { code, len } => {
                write!(f, "option {code} too large to emit ({len} octets)")
            }
            Error::Exhausted => write!(f, "buffer space exhausted"),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeError::Truncated { expected, actual } => {
                write!(f, "payload too short ({actual} < {expected})")
            }
            DecodeError::InvalidLength { actual } => write!(f, "invalid payload length {actual}"),
            DecodeError::TooLong { max, actual } => {
                write!(f, "payload too long ({actual} > {max})")
            }
            DecodeError::InvalidUtf8 => write!(f, "invalid UTF-8"),
            DecodeError::InvalidDomainName => write!(f, "invalid domain name"),
            DecodeError::Encapsulated(err) => write!(f, "encapsulated option: {err}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Encapsulated(err) => Some(&**err),
            _ => None,
        }
    }
}
