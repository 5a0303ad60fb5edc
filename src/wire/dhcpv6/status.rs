use byteorder::{ByteOrder, NetworkEndian};
use core::fmt;

use super::field;
use super::repr::{check_min, PayloadResult};
use crate::wire::DecodeError;

enum_with_unknown! {
    /// Status code values (RFC 8415 § 21.13).
    pub enum StatusCode(u16) {
        Success = 0,
        UnspecFail = 1,
        NoAddrsAvail = 2,
        NoBinding = 3,
        NotOnLink = 4,
        UseMulticast = 5,
        NoPrefixAvail = 6
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Success => write!(f, "success"),
            Self::UnspecFail => write!(f, "unspec-fail"),
            Self::NoAddrsAvail => write!(f, "no-addrs-avail"),
            Self::NoBinding => write!(f, "no-binding"),
            Self::NotOnLink => write!(f, "not-on-link"),
            Self::UseMulticast => write!(f, "use-multicast"),
            Self::NoPrefixAvail => write!(f, "no-prefix-avail"),
            Self::Unknown(a) => write!(f, "unknown({a})"),
        }
    }
}

//     0                   1                   2                   3
//     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//    |       OPTION_STATUS_CODE      |         option-len            |
//    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//    |          status-code          |                               |
//    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               |
//    .                                                               .
//    .                        status-message                         .
//    .                                                               .
//    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusCodeRepr<'a> {
    pub status_code: StatusCode,
    /// A UTF-8 message for display to an end user; may be empty.
    pub status_message: &'a str,
}

impl<'a> StatusCodeRepr<'a> {
    pub fn parse(data: &'a [u8]) -> PayloadResult<Self> {
        check_min(data, field::STATUS_CODE.end)?;
        let status_code = NetworkEndian::read_u16(&data[field::STATUS_CODE]);
        let status_message = core::str::from_utf8(&data[field::STATUS_MESSAGE])
            .map_err(|_| DecodeError::InvalidUtf8)?;

        Ok(Self {
            status_code: StatusCode::from(status_code),
            status_message,
        })
    }

    pub fn buffer_len(&self) -> usize {
        field::STATUS_CODE.end + self.status_message.len()
    }

    pub fn emit(&self, data: &mut [u8]) {
        NetworkEndian::write_u16(&mut data[field::STATUS_CODE], self.status_code.into());
        data[field::STATUS_MESSAGE].copy_from_slice(self.status_message.as_bytes());
    }
}

impl<'a> fmt::Display for StatusCodeRepr<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(msg='{}')", self.status_code, self.status_message)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    static STATUS_BYTES: [u8; 9] = [0x00, 0x02, b'n', b'o', b' ', b'a', b'd', b'd', b'r'];

    #[test]
    fn test_parse() {
        let repr = StatusCodeRepr::parse(&STATUS_BYTES).unwrap();
        assert_eq!(repr.status_code, StatusCode::NoAddrsAvail);
        assert_eq!(repr.status_message, "no addr");
        assert_eq!(repr.buffer_len(), STATUS_BYTES.len());
        assert_eq!(format!("{repr}"), "no-addrs-avail(msg='no addr')");
    }

    #[test]
    fn test_emit() {
        let repr = StatusCodeRepr {
            status_code: StatusCode::NoAddrsAvail,
            status_message: "no addr",
        };
        let mut bytes = [0u8; 9];
        repr.emit(&mut bytes);
        assert_eq!(bytes, STATUS_BYTES);
    }

    #[test]
    fn test_empty_message() {
        let repr = StatusCodeRepr::parse(&[0x00, 0x00]).unwrap();
        assert_eq!(repr.status_code, StatusCode::Success);
        assert_eq!(repr.status_message, "");
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            StatusCodeRepr::parse(&[0x00]),
            Err(DecodeError::Truncated {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            StatusCodeRepr::parse(&[0x00, 0x01, 0xff, 0xfe]),
            Err(DecodeError::InvalidUtf8)
        );
    }

    #[test]
    fn test_status_code_display() {
        assert_eq!(format!("{}", StatusCode::NotOnLink), "not-on-link");
        assert_eq!(format!("{}", StatusCode::from(42)), "unknown(42)");
    }
}
