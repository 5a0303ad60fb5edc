//! Identity associations and the address and prefix options they carry.
//!
//! All of these options end with a list of encapsulated options. Only the
//! children RFC 8415 permits in each container are decoded; anything else is
//! kept raw, so an IA carrying another IA cannot nest without bound.

use alloc::vec::Vec;
use byteorder::{ByteOrder, NetworkEndian};
use core::fmt;
use core::net::Ipv6Addr;

use super::codec::parse_encapsulated;
use super::field;
use super::repr::{check_min, emit_encapsulated, encapsulated_len, fmt_encapsulated, read_address};
use super::repr::{PayloadResult, Repr};
use super::status::StatusCodeRepr;
use super::OptionCode;

const IA_CHILDREN: &[OptionCode] = &[OptionCode::IaAddr, OptionCode::StatusCode];
const IA_PD_CHILDREN: &[OptionCode] = &[OptionCode::IaPrefix, OptionCode::StatusCode];
const LEASE_CHILDREN: &[OptionCode] = &[OptionCode::StatusCode];

fn find_status<'a>(options: &[Repr<'a>]) -> Option<StatusCodeRepr<'a>> {
    options.iter().find_map(|opt| match opt {
        Repr::StatusCode(status) => Some(*status),
        _ => None,
    })
}

/// Identity Association for Non-temporary Addresses (RFC 8415 § 21.4).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct IaNa<'a> {
    pub iaid: u32,
    pub t1: u32,
    pub t2: u32,
    pub options: Vec<Repr<'a>>,
}

impl<'a> IaNa<'a> {
    pub fn parse(data: &'a [u8]) -> PayloadResult<Self> {
        check_min(data, field::IA_OPTIONS.start)?;
        Ok(IaNa {
            iaid: NetworkEndian::read_u32(&data[field::IA_IAID]),
            t1: NetworkEndian::read_u32(&data[field::IA_T1]),
            t2: NetworkEndian::read_u32(&data[field::IA_T2]),
            options: parse_encapsulated(&data[field::IA_OPTIONS], IA_CHILDREN)?,
        })
    }

    pub fn buffer_len(&self) -> usize {
        field::IA_OPTIONS.start + encapsulated_len(&self.options)
    }

    pub fn emit(&self, data: &mut [u8]) {
        NetworkEndian::write_u32(&mut data[field::IA_IAID], self.iaid);
        NetworkEndian::write_u32(&mut data[field::IA_T1], self.t1);
        NetworkEndian::write_u32(&mut data[field::IA_T2], self.t2);
        emit_encapsulated(&self.options, &mut data[field::IA_OPTIONS]);
    }

    /// Return the addresses assigned to this IA.
    pub fn addresses(&self) -> impl Iterator<Item = &IaAddr<'a>> + '_ {
        self.options.iter().filter_map(|opt| match opt {
            Repr::IaAddr(addr) => Some(addr),
            _ => None,
        })
    }

    pub fn status_code(&self) -> Option<StatusCodeRepr<'a>> {
        find_status(&self.options)
    }
}

impl<'a> IaNa<'a> {
    pub(crate) fn fmt_fields(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IAID={} T1={} T2={}", self.iaid, self.t1, self.t2)
    }
}

impl<'a> fmt::Display for IaNa<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_fields(f)?;
        fmt_encapsulated(&self.options, f)
    }
}

/// Identity Association for Temporary Addresses (RFC 8415 § 21.5).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct IaTa<'a> {
    pub iaid: u32,
    pub options: Vec<Repr<'a>>,
}

impl<'a> IaTa<'a> {
    pub fn parse(data: &'a [u8]) -> PayloadResult<Self> {
        check_min(data, field::IA_TA_OPTIONS.start)?;
        Ok(IaTa {
            iaid: NetworkEndian::read_u32(&data[field::IA_IAID]),
            options: parse_encapsulated(&data[field::IA_TA_OPTIONS], IA_CHILDREN)?,
        })
    }

    pub fn buffer_len(&self) -> usize {
        field::IA_TA_OPTIONS.start + encapsulated_len(&self.options)
    }

    pub fn emit(&self, data: &mut [u8]) {
        NetworkEndian::write_u32(&mut data[field::IA_IAID], self.iaid);
        emit_encapsulated(&self.options, &mut data[field::IA_TA_OPTIONS]);
    }

    pub fn addresses(&self) -> impl Iterator<Item = &IaAddr<'a>> + '_ {
        self.options.iter().filter_map(|opt| match opt {
            Repr::IaAddr(addr) => Some(addr),
            _ => None,
        })
    }

    pub fn status_code(&self) -> Option<StatusCodeRepr<'a>> {
        find_status(&self.options)
    }
}

impl<'a> IaTa<'a> {
    pub(crate) fn fmt_fields(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IAID={}", self.iaid)
    }
}

impl<'a> fmt::Display for IaTa<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_fields(f)?;
        fmt_encapsulated(&self.options, f)
    }
}

/// IA Address option (RFC 8415 § 21.6).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct IaAddr<'a> {
    pub address: Ipv6Addr,
    pub preferred_lifetime: u32,
    pub valid_lifetime: u32,
    pub options: Vec<Repr<'a>>,
}

impl<'a> IaAddr<'a> {
    pub fn parse(data: &'a [u8]) -> PayloadResult<Self> {
        check_min(data, field::IAADDR_OPTIONS.start)?;
        Ok(IaAddr {
            address: read_address(&data[field::IAADDR_ADDRESS]),
            preferred_lifetime: NetworkEndian::read_u32(&data[field::IAADDR_PREFERRED]),
            valid_lifetime: NetworkEndian::read_u32(&data[field::IAADDR_VALID]),
            options: parse_encapsulated(&data[field::IAADDR_OPTIONS], LEASE_CHILDREN)?,
        })
    }

    pub fn buffer_len(&self) -> usize {
        field::IAADDR_OPTIONS.start + encapsulated_len(&self.options)
    }

    pub fn emit(&self, data: &mut [u8]) {
        data[field::IAADDR_ADDRESS].copy_from_slice(&self.address.octets());
        NetworkEndian::write_u32(&mut data[field::IAADDR_PREFERRED], self.preferred_lifetime);
        NetworkEndian::write_u32(&mut data[field::IAADDR_VALID], self.valid_lifetime);
        emit_encapsulated(&self.options, &mut data[field::IAADDR_OPTIONS]);
    }

    pub fn status_code(&self) -> Option<StatusCodeRepr<'a>> {
        find_status(&self.options)
    }
}

impl<'a> IaAddr<'a> {
    pub(crate) fn fmt_fields(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} pltime={} vltime={}",
            self.address, self.preferred_lifetime, self.valid_lifetime
        )
    }
}

impl<'a> fmt::Display for IaAddr<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_fields(f)?;
        fmt_encapsulated(&self.options, f)
    }
}

/// Identity Association for Prefix Delegation (RFC 8415 § 21.21).
///
/// Laid out like [IaNa]; the encapsulated options carry [IaPrefix] instead of
/// [IaAddr].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct IaPd<'a> {
    pub iaid: u32,
    pub t1: u32,
    pub t2: u32,
    pub options: Vec<Repr<'a>>,
}

impl<'a> IaPd<'a> {
    pub fn parse(data: &'a [u8]) -> PayloadResult<Self> {
        check_min(data, field::IA_OPTIONS.start)?;
        Ok(IaPd {
            iaid: NetworkEndian::read_u32(&data[field::IA_IAID]),
            t1: NetworkEndian::read_u32(&data[field::IA_T1]),
            t2: NetworkEndian::read_u32(&data[field::IA_T2]),
            options: parse_encapsulated(&data[field::IA_OPTIONS], IA_PD_CHILDREN)?,
        })
    }

    pub fn buffer_len(&self) -> usize {
        field::IA_OPTIONS.start + encapsulated_len(&self.options)
    }

    pub fn emit(&self, data: &mut [u8]) {
        NetworkEndian::write_u32(&mut data[field::IA_IAID], self.iaid);
        NetworkEndian::write_u32(&mut data[field::IA_T1], self.t1);
        NetworkEndian::write_u32(&mut data[field::IA_T2], self.t2);
        emit_encapsulated(&self.options, &mut data[field::IA_OPTIONS]);
    }

    /// Return the prefixes delegated through this IA.
    pub fn prefixes(&self) -> impl Iterator<Item = &IaPrefix<'a>> + '_ {
        self.options.iter().filter_map(|opt| match opt {
            Repr::IaPrefix(prefix) => Some(prefix),
            _ => None,
        })
    }

    pub fn status_code(&self) -> Option<StatusCodeRepr<'a>> {
        find_status(&self.options)
    }
}

impl<'a> IaPd<'a> {
    pub(crate) fn fmt_fields(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IAID={} T1={} T2={}", self.iaid, self.t1, self.t2)
    }
}

impl<'a> fmt::Display for IaPd<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_fields(f)?;
        fmt_encapsulated(&self.options, f)
    }
}

/// IA Prefix option (RFC 8415 § 21.22).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct IaPrefix<'a> {
    pub preferred_lifetime: u32,
    pub valid_lifetime: u32,
    pub prefix_len: u8,
    pub prefix: Ipv6Addr,
    pub options: Vec<Repr<'a>>,
}

impl<'a> IaPrefix<'a> {
    pub fn parse(data: &'a [u8]) -> PayloadResult<Self> {
        check_min(data, field::IAPREFIX_OPTIONS.start)?;
        Ok(IaPrefix {
            preferred_lifetime: NetworkEndian::read_u32(&data[field::IAPREFIX_PREFERRED]),
            valid_lifetime: NetworkEndian::read_u32(&data[field::IAPREFIX_VALID]),
            prefix_len: data[field::IAPREFIX_LEN],
            prefix: read_address(&data[field::IAPREFIX_PREFIX]),
            options: parse_encapsulated(&data[field::IAPREFIX_OPTIONS], LEASE_CHILDREN)?,
        })
    }

    pub fn buffer_len(&self) -> usize {
        field::IAPREFIX_OPTIONS.start + encapsulated_len(&self.options)
    }

    pub fn emit(&self, data: &mut [u8]) {
        NetworkEndian::write_u32(&mut data[field::IAPREFIX_PREFERRED], self.preferred_lifetime);
        NetworkEndian::write_u32(&mut data[field::IAPREFIX_VALID], self.valid_lifetime);
        data[field::IAPREFIX_LEN] = self.prefix_len;
        data[field::IAPREFIX_PREFIX].copy_from_slice(&self.prefix.octets());
        emit_encapsulated(&self.options, &mut data[field::IAPREFIX_OPTIONS]);
    }

    pub fn status_code(&self) -> Option<StatusCodeRepr<'a>> {
        find_status(&self.options)
    }
}

impl<'a> IaPrefix<'a> {
    pub(crate) fn fmt_fields(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}/{} pltime={} vltime={}",
            self.prefix, self.prefix_len, self.preferred_lifetime, self.valid_lifetime
        )
    }
}

impl<'a> fmt::Display for IaPrefix<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_fields(f)?;
        fmt_encapsulated(&self.options, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wire::dhcpv6::status::StatusCode;
    use crate::wire::{DecodeError, Error};

    // IA_NA with one IA Address, which itself carries a Status Code.
    static IA_NA_BYTES: [u8; 52] = [
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x0e, 0x10, 0x00, 0x00, 0x15, 0x18, 0x00, 0x05, 0x00,
        0x20, 0x20, 0x01, 0x0d, 0xb8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x10, 0x00, 0x00, 0x1c, 0x20, 0x00, 0x00, 0x2a, 0x30, 0x00, 0x0d, 0x00, 0x04, 0x00,
        0x00, b'o', b'k', 0xaa, 0xbb, 0xcc, 0xdd,
    ];

    #[test]
    fn test_parse_ia_na() {
        // The trailing four octets form no option; only parse up to them.
        let ia = IaNa::parse(&IA_NA_BYTES[..48]).unwrap();
        assert_eq!(ia.iaid, 1);
        assert_eq!(ia.t1, 3600);
        assert_eq!(ia.t2, 5400);

        let addrs: Vec<_> = ia.addresses().collect();
        assert_eq!(addrs.len(), 1);
        assert_eq!(
            addrs[0].address,
            Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0x10)
        );
        assert_eq!(addrs[0].preferred_lifetime, 7200);
        assert_eq!(addrs[0].valid_lifetime, 10800);
        assert_eq!(
            addrs[0].status_code(),
            Some(StatusCodeRepr {
                status_code: StatusCode::Success,
                status_message: "ok",
            })
        );
        assert_eq!(ia.status_code(), None);
        assert_eq!(ia.buffer_len(), 48);

        let mut bytes = [0u8; 48];
        ia.emit(&mut bytes);
        assert_eq!(&bytes[..], &IA_NA_BYTES[..48]);
    }

    #[test]
    fn test_parse_ia_na_bad_encapsulation() {
        assert_eq!(
            IaNa::parse(&IA_NA_BYTES[..]),
            Err(DecodeError::Encapsulated(alloc::boxed::Box::new(
                Error::TruncatedPayload {
                    code: 0xaabb,
                    declared: 0xccdd,
                    available: 0
                }
            )))
        );
        assert_eq!(
            IaNa::parse(&IA_NA_BYTES[..11]),
            Err(DecodeError::Truncated {
                expected: 12,
                actual: 11
            })
        );
    }

    #[test]
    fn test_ia_pd_roundtrip() {
        let ia = IaPd {
            iaid: 7,
            t1: 0,
            t2: 0,
            options: vec![Repr::IaPrefix(IaPrefix {
                preferred_lifetime: 100,
                valid_lifetime: 200,
                prefix_len: 56,
                prefix: Ipv6Addr::new(0x2001, 0xdb8, 0xab, 0, 0, 0, 0, 0),
                options: Vec::new(),
            })],
        };
        assert_eq!(ia.buffer_len(), 12 + 4 + 25);

        let mut bytes = vec![0u8; ia.buffer_len()];
        ia.emit(&mut bytes);
        assert_eq!(&bytes[12..16], &[0x00, 0x1a, 0x00, 0x19]);
        assert_eq!(bytes[12 + 4 + 8], 56);

        let parsed = IaPd::parse(&bytes).unwrap();
        assert_eq!(parsed, ia);
        assert_eq!(parsed.prefixes().count(), 1);
        assert_eq!(
            format!("{parsed}"),
            "IAID=7 T1=0 T2=0 { OPTION_IAPREFIX -> 2001:db8:ab::/56 pltime=100 vltime=200 }"
        );
    }

    fn nested_ia_ta(depth: usize) -> Vec<u8> {
        let mut payload = vec![0x00, 0x00, 0x00, 0x01];
        for _ in 0..depth {
            let mut outer = vec![0x00, 0x00, 0x00, 0x01, 0x00, 0x04];
            outer.extend_from_slice(&(payload.len() as u16).to_be_bytes());
            outer.extend_from_slice(&payload);
            payload = outer;
        }
        payload
    }

    #[test]
    fn test_deeply_nested_ia_ta() {
        let bytes = nested_ia_ta(8000);
        let ia = IaTa::parse(&bytes).unwrap();
        assert_eq!(ia.options.len(), 1);
        assert!(matches!(
            ia.options[0],
            Repr::Unknown {
                code: OptionCode::IaTa,
                data
            } if data.len() == bytes.len() - 8
        ));
        assert_eq!(ia.buffer_len(), bytes.len());

        let mut emitted = vec![0u8; ia.buffer_len()];
        ia.emit(&mut emitted);
        assert_eq!(emitted, bytes);
    }

    #[test]
    fn test_ia_ta() {
        let ia = IaTa::parse(&[0x00, 0x00, 0x00, 0x02]).unwrap();
        assert_eq!(
            ia,
            IaTa {
                iaid: 2,
                options: Vec::new()
            }
        );
        assert_eq!(format!("{ia}"), "IAID=2");
        assert_eq!(
            IaTa::parse(&[0x00, 0x00]),
            Err(DecodeError::Truncated {
                expected: 4,
                actual: 2
            })
        );
    }
}
