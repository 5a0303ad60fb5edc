use alloc::vec::Vec;
use byteorder::{ByteOrder, NetworkEndian};
use core::fmt;
use core::net::Ipv6Addr;

use super::codec::Decoder;
use super::domain::DomainName;
use super::duid::Duid;
use super::field;
use super::ia::{IaAddr, IaNa, IaPd, IaPrefix, IaTa};
use super::option::Dhcpv6Option;
use super::status::StatusCodeRepr;
use super::OptionCode;
use crate::wire::{DecodeError, Result};

/// The result type for per-option payload decoders.
pub type PayloadResult<T> = core::result::Result<T, DecodeError>;

const ADDRESS_LEN: usize = 16;

/// A high-level representation of a DHCPv6 option.
///
/// Every variant knows how long its payload is ([data_len]) and how to write
/// itself out ([emit]). Options whose code is not modeled here, or which
/// appear with a code that has no decoder, are kept as [Repr::Unknown].
///
/// [data_len]: #method.data_len
/// [emit]: #method.emit
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Repr<'a> {
    ClientId(Duid<'a>),
    ServerId(Duid<'a>),
    IaNa(IaNa<'a>),
    IaTa(IaTa<'a>),
    IaAddr(IaAddr<'a>),
    /// Option codes requested by the client.
    OptionRequest(Vec<OptionCode>),
    Preference(u8),
    /// Time since the client began the exchange, in hundredths of a second.
    ElapsedTime(u16),
    /// An encapsulated DHCPv6 message, relayed verbatim.
    RelayMessage(&'a [u8]),
    Unicast(Ipv6Addr),
    StatusCode(StatusCodeRepr<'a>),
    RapidCommit,
    UserClass(Vec<&'a [u8]>),
    VendorClass(VendorClass<'a>),
    InterfaceId(&'a [u8]),
    ReconfigureMessage(u8),
    ReconfigureAccept,
    DnsServers(Vec<Ipv6Addr>),
    DomainList(Vec<DomainName<'a>>),
    IaPd(IaPd<'a>),
    IaPrefix(IaPrefix<'a>),
    InformationRefreshTime(u32),
    RemoteId(RemoteId<'a>),
    BootfileUrl(&'a str),
    ClientArchType(Vec<u16>),
    NetworkInterfaceId(Nii),
    SolMaxRt(u32),
    InfMaxRt(u32),
    /// An option kept as raw octets.
    Unknown { code: OptionCode, data: &'a [u8] },
}

/// The payload of a Vendor Class option (RFC 8415 § 21.16).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct VendorClass<'a> {
    pub enterprise_number: u32,
    pub data: Vec<&'a [u8]>,
}

/// The payload of a Relay Agent Remote-ID option (RFC 4649).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RemoteId<'a> {
    pub enterprise_number: u32,
    pub remote_id: &'a [u8],
}

/// The payload of a Client Network Interface Identifier option (RFC 5970).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Nii {
    pub type_: u8,
    pub major: u8,
    pub minor: u8,
}

impl<'a> Repr<'a> {
    /// Parse a DHCPv6 option using the built-in decoders, and return a
    /// high-level representation.
    pub fn parse<T>(opt: &Dhcpv6Option<&'a T>) -> Result<Repr<'a>>
    where
        T: AsRef<[u8]> + ?Sized,
    {
        Decoder::default().parse(opt)
    }

    /// Decode the payload of an option with the given code.
    ///
    /// Codes without a decoder produce [Repr::Unknown] holding the payload.
    pub fn parse_payload(code: OptionCode, data: &'a [u8]) -> PayloadResult<Repr<'a>> {
        let repr = match code {
            OptionCode::ClientId => Repr::ClientId(Duid::parse(data)?),
            OptionCode::ServerId => Repr::ServerId(Duid::parse(data)?),
            OptionCode::IaNa => Repr::IaNa(IaNa::parse(data)?),
            OptionCode::IaTa => Repr::IaTa(IaTa::parse(data)?),
            OptionCode::IaAddr => Repr::IaAddr(IaAddr::parse(data)?),
            OptionCode::OptionRequest => Repr::OptionRequest(
                parse_u16_list(data)?
                    .into_iter()
                    .map(OptionCode::from)
                    .collect(),
            ),
            OptionCode::Preference => Repr::Preference(parse_u8(data)?),
            OptionCode::ElapsedTime => {
                check_exact(data, 2)?;
                Repr::ElapsedTime(NetworkEndian::read_u16(data))
            }
            OptionCode::RelayMessage => Repr::RelayMessage(data),
            OptionCode::Unicast => {
                check_exact(data, ADDRESS_LEN)?;
                Repr::Unicast(read_address(data))
            }
            OptionCode::StatusCode => Repr::StatusCode(StatusCodeRepr::parse(data)?),
            OptionCode::RapidCommit => {
                check_exact(data, 0)?;
                Repr::RapidCommit
            }
            OptionCode::UserClass => Repr::UserClass(parse_opaque_list(data)?),
            OptionCode::VendorClass => {
                check_min(data, field::ENTERPRISE_DATA.start)?;
                Repr::VendorClass(VendorClass {
                    enterprise_number: NetworkEndian::read_u32(&data[field::ENTERPRISE_NUMBER]),
                    data: parse_opaque_list(&data[field::ENTERPRISE_DATA])?,
                })
            }
            OptionCode::InterfaceId => Repr::InterfaceId(data),
            OptionCode::ReconfigureMessage => Repr::ReconfigureMessage(parse_u8(data)?),
            OptionCode::ReconfigureAccept => {
                check_exact(data, 0)?;
                Repr::ReconfigureAccept
            }
            OptionCode::DnsServers => {
                if data.len() % ADDRESS_LEN != 0 {
                    return Err(DecodeError::InvalidLength { actual: data.len() });
                }
                Repr::DnsServers(data.chunks_exact(ADDRESS_LEN).map(read_address).collect())
            }
            OptionCode::DomainList => Repr::DomainList(DomainName::parse_list(data)?),
            OptionCode::IaPd => Repr::IaPd(IaPd::parse(data)?),
            OptionCode::IaPrefix => Repr::IaPrefix(IaPrefix::parse(data)?),
            OptionCode::InformationRefreshTime => Repr::InformationRefreshTime(parse_u32(data)?),
            #[cfg(feature = "proto-dhcpv6-ext")]
            OptionCode::RemoteId => {
                check_min(data, field::ENTERPRISE_DATA.start)?;
                Repr::RemoteId(RemoteId {
                    enterprise_number: NetworkEndian::read_u32(&data[field::ENTERPRISE_NUMBER]),
                    remote_id: &data[field::ENTERPRISE_DATA],
                })
            }
            #[cfg(feature = "proto-dhcpv6-ext")]
            OptionCode::BootfileUrl => Repr::BootfileUrl(
                core::str::from_utf8(data).map_err(|_| DecodeError::InvalidUtf8)?,
            ),
            #[cfg(feature = "proto-dhcpv6-ext")]
            OptionCode::ClientArchType => Repr::ClientArchType(parse_u16_list(data)?),
            #[cfg(feature = "proto-dhcpv6-ext")]
            OptionCode::NetworkInterfaceId => {
                check_exact(data, field::NII_LEN)?;
                Repr::NetworkInterfaceId(Nii {
                    type_: data[0],
                    major: data[1],
                    minor: data[2],
                })
            }
            OptionCode::SolMaxRt => Repr::SolMaxRt(parse_u32(data)?),
            OptionCode::InfMaxRt => Repr::InfMaxRt(parse_u32(data)?),
            _ => {
                net_trace!("dhcpv6: no decoder for option {}, keeping it raw", u16::from(code));
                Repr::Unknown { code, data }
            }
        };
        Ok(repr)
    }

    /// Return the code of this option.
    pub fn code(&self) -> OptionCode {
        match self {
            Repr::ClientId(_) => OptionCode::ClientId,
            Repr::ServerId(_) => OptionCode::ServerId,
            Repr::IaNa(_) => OptionCode::IaNa,
            Repr::IaTa(_) => OptionCode::IaTa,
            Repr::IaAddr(_) => OptionCode::IaAddr,
            Repr::OptionRequest(_) => OptionCode::OptionRequest,
            Repr::Preference(_) => OptionCode::Preference,
            Repr::ElapsedTime(_) => OptionCode::ElapsedTime,
            Repr::RelayMessage(_) => OptionCode::RelayMessage,
            Repr::Unicast(_) => OptionCode::Unicast,
            Repr::StatusCode(_) => OptionCode::StatusCode,
            Repr::RapidCommit => OptionCode::RapidCommit,
            Repr::UserClass(_) => OptionCode::UserClass,
            Repr::VendorClass(_) => OptionCode::VendorClass,
            Repr::InterfaceId(_) => OptionCode::InterfaceId,
            Repr::ReconfigureMessage(_) => OptionCode::ReconfigureMessage,
            Repr::ReconfigureAccept => OptionCode::ReconfigureAccept,
            Repr::DnsServers(_) => OptionCode::DnsServers,
            Repr::DomainList(_) => OptionCode::DomainList,
            Repr::IaPd(_) => OptionCode::IaPd,
            Repr::IaPrefix(_) => OptionCode::IaPrefix,
            Repr::InformationRefreshTime(_) => OptionCode::InformationRefreshTime,
            Repr::RemoteId(_) => OptionCode::RemoteId,
            Repr::BootfileUrl(_) => OptionCode::BootfileUrl,
            Repr::ClientArchType(_) => OptionCode::ClientArchType,
            Repr::NetworkInterfaceId(_) => OptionCode::NetworkInterfaceId,
            Repr::SolMaxRt(_) => OptionCode::SolMaxRt,
            Repr::InfMaxRt(_) => OptionCode::InfMaxRt,
            Repr::Unknown { code, .. } => *code,
        }
    }

    /// Return the length of the option data that will be emitted from this
    /// high-level representation, not including the option header.
    pub fn data_len(&self) -> usize {
        match self {
            Repr::ClientId(duid) | Repr::ServerId(duid) => duid.buffer_len(),
            Repr::IaNa(ia) => ia.buffer_len(),
            Repr::IaTa(ia) => ia.buffer_len(),
            Repr::IaAddr(addr) => addr.buffer_len(),
            Repr::OptionRequest(codes) => 2 * codes.len(),
            Repr::Preference(_) | Repr::ReconfigureMessage(_) => 1,
            Repr::ElapsedTime(_) => 2,
            Repr::RelayMessage(data) | Repr::InterfaceId(data) => data.len(),
            Repr::Unicast(_) => ADDRESS_LEN,
            Repr::StatusCode(status) => status.buffer_len(),
            Repr::RapidCommit | Repr::ReconfigureAccept => 0,
            Repr::UserClass(items) => opaque_list_len(items),
            Repr::VendorClass(class) => field::ENTERPRISE_DATA.start + opaque_list_len(&class.data),
            Repr::DnsServers(addrs) => ADDRESS_LEN * addrs.len(),
            Repr::DomainList(names) => names.iter().map(DomainName::buffer_len).sum(),
            Repr::IaPd(ia) => ia.buffer_len(),
            Repr::IaPrefix(prefix) => prefix.buffer_len(),
            Repr::InformationRefreshTime(_) | Repr::SolMaxRt(_) | Repr::InfMaxRt(_) => 4,
            Repr::RemoteId(id) => field::ENTERPRISE_DATA.start + id.remote_id.len(),
            Repr::BootfileUrl(url) => url.len(),
            Repr::ClientArchType(types) => 2 * types.len(),
            Repr::NetworkInterfaceId(_) => field::NII_LEN,
            Repr::Unknown { data, .. } => data.len(),
        }
    }

    /// Return the length of the option that will be emitted from this
    /// high-level representation, header included.
    pub fn buffer_len(&self) -> usize {
        field::HEADER_LEN + self.data_len()
    }

    /// Return the options encapsulated in this option, if it is a container.
    pub fn encapsulated(&self) -> Option<&[Repr<'a>]> {
        match self {
            Repr::IaNa(ia) => Some(&ia.options),
            Repr::IaTa(ia) => Some(&ia.options),
            Repr::IaAddr(addr) => Some(&addr.options),
            Repr::IaPd(ia) => Some(&ia.options),
            Repr::IaPrefix(prefix) => Some(&prefix.options),
            _ => None,
        }
    }

    /// Format the option like `Display`, leaving out encapsulated options.
    pub(crate) fn fmt_header(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.encapsulated().is_none() {
            return write!(f, "{self}");
        }

        write!(f, "{} -> ", self.code().name())?;
        match self {
            Repr::IaNa(ia) => ia.fmt_fields(f),
            Repr::IaTa(ia) => ia.fmt_fields(f),
            Repr::IaAddr(addr) => addr.fmt_fields(f),
            Repr::IaPd(ia) => ia.fmt_fields(f),
            Repr::IaPrefix(prefix) => prefix.fmt_fields(f),
            _ => Ok(()),
        }
    }

    /// Emit a high-level representation into a DHCPv6 option.
    ///
    /// The buffer must be at least [buffer_len] octets long, and [data_len]
    /// must fit in 16 bits; [OptionWriter] checks both.
    ///
    /// [buffer_len]: #method.buffer_len
    /// [data_len]: #method.data_len
    /// [OptionWriter]: super::option::OptionWriter
    pub fn emit<T>(&self, opt: &mut Dhcpv6Option<&mut T>)
    where
        T: AsRef<[u8]> + AsMut<[u8]> + ?Sized,
    {
        opt.set_code(self.code());
        opt.set_data_len(self.data_len() as u16);
        let data = opt.data_mut();

        match self {
            Repr::ClientId(duid) | Repr::ServerId(duid) => duid.emit(data),
            Repr::IaNa(ia) => ia.emit(data),
            Repr::IaTa(ia) => ia.emit(data),
            Repr::IaAddr(addr) => addr.emit(data),
            Repr::OptionRequest(codes) => {
                for (chunk, code) in data.chunks_exact_mut(2).zip(codes.iter()) {
                    NetworkEndian::write_u16(chunk, (*code).into());
                }
            }
            Repr::Preference(value) | Repr::ReconfigureMessage(value) => data[0] = *value,
            Repr::ElapsedTime(value) => NetworkEndian::write_u16(data, *value),
            Repr::RelayMessage(bytes) | Repr::InterfaceId(bytes) => data.copy_from_slice(bytes),
            Repr::Unicast(addr) => data.copy_from_slice(&addr.octets()),
            Repr::StatusCode(status) => status.emit(data),
            Repr::RapidCommit | Repr::ReconfigureAccept => {}
            Repr::UserClass(items) => emit_opaque_list(items, data),
            Repr::VendorClass(class) => {
                NetworkEndian::write_u32(&mut data[field::ENTERPRISE_NUMBER], class.enterprise_number);
                emit_opaque_list(&class.data, &mut data[field::ENTERPRISE_DATA]);
            }
            Repr::DnsServers(addrs) => {
                for (chunk, addr) in data.chunks_exact_mut(ADDRESS_LEN).zip(addrs.iter()) {
                    chunk.copy_from_slice(&addr.octets());
                }
            }
            Repr::DomainList(names) => {
                let mut data = data;
                for name in names {
                    let (this, rest) = data.split_at_mut(name.buffer_len());
                    name.emit(this);
                    data = rest;
                }
            }
            Repr::IaPd(ia) => ia.emit(data),
            Repr::IaPrefix(prefix) => prefix.emit(data),
            Repr::InformationRefreshTime(value) | Repr::SolMaxRt(value) | Repr::InfMaxRt(value) => {
                NetworkEndian::write_u32(data, *value)
            }
            Repr::RemoteId(id) => {
                NetworkEndian::write_u32(&mut data[field::ENTERPRISE_NUMBER], id.enterprise_number);
                data[field::ENTERPRISE_DATA].copy_from_slice(id.remote_id);
            }
            Repr::BootfileUrl(url) => data.copy_from_slice(url.as_bytes()),
            Repr::ClientArchType(types) => {
                for (chunk, value) in data.chunks_exact_mut(2).zip(types.iter()) {
                    NetworkEndian::write_u16(chunk, *value);
                }
            }
            Repr::NetworkInterfaceId(nii) => {
                data[0] = nii.type_;
                data[1] = nii.major;
                data[2] = nii.minor;
            }
            Repr::Unknown { data: bytes, .. } => data.copy_from_slice(bytes),
        }
    }
}

impl<'a> fmt::Display for Repr<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> ", self.code().name())?;
        match self {
            Repr::ClientId(duid) | Repr::ServerId(duid) => write!(f, "{duid}"),
            Repr::IaNa(ia) => write!(f, "{ia}"),
            Repr::IaTa(ia) => write!(f, "{ia}"),
            Repr::IaAddr(addr) => write!(f, "{addr}"),
            Repr::OptionRequest(codes) => {
                write!(f, "[")?;
                for (i, code) in codes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{code}")?;
                }
                write!(f, "]")
            }
            Repr::Preference(value) => write!(f, "{value}"),
            Repr::ElapsedTime(value) => write!(f, "{value}/100s"),
            Repr::RelayMessage(data) | Repr::InterfaceId(data) => write!(f, "{data:?}"),
            Repr::Unicast(addr) => write!(f, "{addr}"),
            Repr::StatusCode(status) => write!(f, "{status}"),
            Repr::RapidCommit | Repr::ReconfigureAccept => write!(f, "[]"),
            Repr::UserClass(items) => write!(f, "{items:?}"),
            Repr::VendorClass(class) => {
                write!(f, "enterprise={} {:?}", class.enterprise_number, class.data)
            }
            Repr::ReconfigureMessage(msg_type) => write!(f, "msg-type={msg_type}"),
            Repr::DnsServers(addrs) => {
                write!(f, "[")?;
                for (i, addr) in addrs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{addr}")?;
                }
                write!(f, "]")
            }
            Repr::DomainList(names) => {
                write!(f, "[")?;
                for (i, name) in names.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}")?;
                }
                write!(f, "]")
            }
            Repr::IaPd(ia) => write!(f, "{ia}"),
            Repr::IaPrefix(prefix) => write!(f, "{prefix}"),
            Repr::InformationRefreshTime(secs) | Repr::SolMaxRt(secs) | Repr::InfMaxRt(secs) => {
                write!(f, "{secs}s")
            }
            Repr::RemoteId(id) => {
                write!(f, "enterprise={} {:?}", id.enterprise_number, id.remote_id)
            }
            Repr::BootfileUrl(url) => write!(f, "{url}"),
            Repr::ClientArchType(types) => write!(f, "{types:?}"),
            Repr::NetworkInterfaceId(nii) => {
                write!(f, "type={} rev={}.{}", nii.type_, nii.major, nii.minor)
            }
            Repr::Unknown { data, .. } => write!(f, "{data:?}"),
        }
    }
}

/// Write a list of options into `buffer`, which must be exactly as long as
/// the sum of their [`Repr::buffer_len`].
pub(crate) fn emit_encapsulated(options: &[Repr<'_>], mut buffer: &mut [u8]) {
    for repr in options {
        let (this, rest) = buffer.split_at_mut(repr.buffer_len());
        repr.emit(&mut Dhcpv6Option::new_unchecked(this));
        buffer = rest;
    }
}

pub(crate) fn encapsulated_len(options: &[Repr<'_>]) -> usize {
    options.iter().map(Repr::buffer_len).sum()
}

pub(crate) fn fmt_encapsulated(options: &[Repr<'_>], f: &mut fmt::Formatter) -> fmt::Result {
    if options.is_empty() {
        return Ok(());
    }
    write!(f, " {{")?;
    for (i, repr) in options.iter().enumerate() {
        if i > 0 {
            write!(f, ";")?;
        }
        write!(f, " {repr}")?;
    }
    write!(f, " }}")
}

pub(crate) fn check_exact(data: &[u8], len: usize) -> PayloadResult<()> {
    if data.len() != len {
        Err(DecodeError::InvalidLength { actual: data.len() })
    } else {
        Ok(())
    }
}

pub(crate) fn check_min(data: &[u8], len: usize) -> PayloadResult<()> {
    if data.len() < len {
        Err(DecodeError::Truncated {
            expected: len,
            actual: data.len(),
        })
    } else {
        Ok(())
    }
}

pub(crate) fn read_address(data: &[u8]) -> Ipv6Addr {
    let mut octets = [0u8; ADDRESS_LEN];
    octets.copy_from_slice(&data[..ADDRESS_LEN]);
    Ipv6Addr::from(octets)
}

fn parse_u8(data: &[u8]) -> PayloadResult<u8> {
    check_exact(data, 1)?;
    Ok(data[0])
}

fn parse_u32(data: &[u8]) -> PayloadResult<u32> {
    check_exact(data, 4)?;
    Ok(NetworkEndian::read_u32(data))
}

fn parse_u16_list(data: &[u8]) -> PayloadResult<Vec<u16>> {
    if data.len() % 2 != 0 {
        return Err(DecodeError::InvalidLength { actual: data.len() });
    }
    Ok(data.chunks_exact(2).map(NetworkEndian::read_u16).collect())
}

// User Class and Vendor Class data are sequences of
// 2-octet length-prefixed opaque items.
fn parse_opaque_list(mut data: &[u8]) -> PayloadResult<Vec<&[u8]>> {
    let mut items = Vec::new();
    while !data.is_empty() {
        check_min(data, 2)?;
        let len = NetworkEndian::read_u16(data) as usize;
        check_min(&data[2..], len)?;
        items.push(&data[2..2 + len]);
        data = &data[2 + len..];
    }
    Ok(items)
}

fn opaque_list_len(items: &[&[u8]]) -> usize {
    items.iter().map(|item| 2 + item.len()).sum()
}

fn emit_opaque_list(items: &[&[u8]], mut data: &mut [u8]) {
    for item in items {
        let (this, rest) = data.split_at_mut(2 + item.len());
        NetworkEndian::write_u16(&mut this[..2], item.len() as u16);
        this[2..].copy_from_slice(item);
        data = rest;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wire::Error;

    fn emit(repr: &Repr) -> Vec<u8> {
        let mut bytes = vec![0xa5; repr.buffer_len()];
        repr.emit(&mut Dhcpv6Option::new_unchecked(&mut bytes[..]));
        bytes
    }

    fn parse(bytes: &[u8]) -> Result<Repr<'_>> {
        Repr::parse(&Dhcpv6Option::new_unchecked(bytes))
    }

    static ORO_BYTES: [u8; 10] = [
        0x00, 0x06, 0x00, 0x06, 0x00, 0x17, 0x00, 0x18, 0x00, 0x27,
    ];

    static DNS_SERVERS_BYTES: [u8; 36] = [
        0x00, 0x17, 0x00, 0x20, 0x20, 0x01, 0x0d, 0xb8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x20, 0x01, 0x0d, 0xb8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x02,
    ];

    static USER_CLASS_BYTES: [u8; 13] = [
        0x00, 0x0f, 0x00, 0x09, 0x00, 0x03, b'f', b'o', b'o', 0x00, 0x02, b'h', b'i',
    ];

    #[test]
    fn test_parse_option_request() {
        let repr = parse(&ORO_BYTES).unwrap();
        assert_eq!(
            repr,
            Repr::OptionRequest(vec![
                OptionCode::DnsServers,
                OptionCode::DomainList,
                OptionCode::ClientFqdn,
            ])
        );
        assert_eq!(emit(&repr), &ORO_BYTES[..]);
    }

    #[test]
    fn test_parse_option_request_odd_length() {
        assert_eq!(
            parse(&[0x00, 0x06, 0x00, 0x03, 0x00, 0x17, 0x00]),
            Err(Error::Option {
                code: 6,
                error: DecodeError::InvalidLength { actual: 3 }
            })
        );
    }

    #[test]
    fn test_parse_dns_servers() {
        let repr = parse(&DNS_SERVERS_BYTES).unwrap();
        assert_eq!(
            repr,
            Repr::DnsServers(vec![
                Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1),
                Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 2),
            ])
        );
        assert_eq!(emit(&repr), &DNS_SERVERS_BYTES[..]);
        assert_eq!(
            format!("{repr}"),
            "OPTION_DNS_SERVERS -> [2001:db8::1, 2001:db8::2]"
        );
    }

    #[test]
    fn test_parse_dns_servers_partial_address() {
        let mut bytes = DNS_SERVERS_BYTES;
        bytes[3] = 0x1f;
        assert_eq!(
            parse(&bytes[..35]),
            Err(Error::Option {
                code: 23,
                error: DecodeError::InvalidLength { actual: 31 }
            })
        );
    }

    #[test]
    fn test_parse_user_class() {
        let repr = parse(&USER_CLASS_BYTES).unwrap();
        assert_eq!(repr, Repr::UserClass(vec![&b"foo"[..], &b"hi"[..]]));
        assert_eq!(emit(&repr), &USER_CLASS_BYTES[..]);
    }

    #[test]
    fn test_parse_user_class_truncated_item() {
        assert_eq!(
            parse(&[0x00, 0x0f, 0x00, 0x03, 0x00, 0x02, b'f']),
            Err(Error::Option {
                code: 15,
                error: DecodeError::Truncated {
                    expected: 2,
                    actual: 1
                }
            })
        );
    }

    #[test]
    fn test_parse_fixed_size() {
        assert_eq!(
            parse(&[0x00, 0x08, 0x00, 0x02, 0x01, 0x00]),
            Ok(Repr::ElapsedTime(256))
        );
        assert_eq!(
            parse(&[0x00, 0x07, 0x00, 0x01, 0xff]),
            Ok(Repr::Preference(255))
        );
        assert_eq!(parse(&[0x00, 0x0e, 0x00, 0x00]), Ok(Repr::RapidCommit));
        assert_eq!(
            parse(&[0x00, 0x52, 0x00, 0x04, 0x00, 0x00, 0x0e, 0x10]),
            Ok(Repr::SolMaxRt(3600))
        );
        assert_eq!(
            parse(&[0x00, 0x08, 0x00, 0x03, 0x00, 0x00, 0x00]),
            Err(Error::Option {
                code: 8,
                error: DecodeError::InvalidLength { actual: 3 }
            })
        );
        assert_eq!(
            parse(&[0x00, 0x0e, 0x00, 0x01, 0x00]),
            Err(Error::Option {
                code: 14,
                error: DecodeError::InvalidLength { actual: 1 }
            })
        );
    }

    #[test]
    fn test_unicast() {
        let repr = Repr::Unicast(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1));
        let bytes = emit(&repr);
        assert_eq!(&bytes[..4], &[0x00, 0x0c, 0x00, 0x10]);
        assert_eq!(parse(&bytes), Ok(repr));
    }

    #[test]
    fn test_vendor_class() {
        let repr = Repr::VendorClass(VendorClass {
            enterprise_number: 4491,
            data: vec![&b"docsis3.0"[..]],
        });
        assert_eq!(repr.data_len(), 4 + 2 + 9);
        let bytes = emit(&repr);
        assert_eq!(
            &bytes[..10],
            &[0x00, 0x10, 0x00, 0x0f, 0x00, 0x00, 0x11, 0x8b, 0x00, 0x09]
        );
        assert_eq!(parse(&bytes), Ok(repr));
    }

    #[test]
    fn test_vendor_class_truncated() {
        assert_eq!(
            parse(&[0x00, 0x10, 0x00, 0x02, 0x00, 0x00]),
            Err(Error::Option {
                code: 16,
                error: DecodeError::Truncated {
                    expected: 4,
                    actual: 2
                }
            })
        );
    }

    #[cfg(feature = "proto-dhcpv6-ext")]
    #[test]
    fn test_extension_options() {
        let url = Repr::BootfileUrl("tftp://[2001:db8::1]/boot.efi");
        assert_eq!(parse(&emit(&url)), Ok(url));

        let arch = Repr::ClientArchType(vec![0x0007, 0x0010]);
        assert_eq!(
            emit(&arch),
            &[0x00, 0x3d, 0x00, 0x04, 0x00, 0x07, 0x00, 0x10]
        );
        assert_eq!(parse(&emit(&arch)), Ok(arch));

        let nii = Repr::NetworkInterfaceId(Nii {
            type_: 1,
            major: 3,
            minor: 16,
        });
        assert_eq!(emit(&nii), &[0x00, 0x3e, 0x00, 0x03, 0x01, 0x03, 0x10]);
        assert_eq!(format!("{nii}"), "OPTION_NII -> type=1 rev=3.16");

        let remote_id = Repr::RemoteId(RemoteId {
            enterprise_number: 9,
            remote_id: &[0xde, 0xad],
        });
        assert_eq!(parse(&emit(&remote_id)), Ok(remote_id));

        assert_eq!(
            parse(&[0x00, 0x3b, 0x00, 0x02, 0xc3, 0x28]),
            Err(Error::Option {
                code: 59,
                error: DecodeError::InvalidUtf8
            })
        );
    }

    #[cfg(not(feature = "proto-dhcpv6-ext"))]
    #[test]
    fn test_extension_options_are_raw() {
        let bytes = [0x00, 0x3e, 0x00, 0x03, 0x01, 0x03, 0x10];
        assert_eq!(
            parse(&bytes),
            Ok(Repr::Unknown {
                code: OptionCode::NetworkInterfaceId,
                data: &bytes[4..]
            })
        );
    }

    #[test]
    fn test_unknown_option() {
        let bytes = [0x00, 0x0b, 0x00, 0x03, 0x01, 0x02, 0x03];
        let repr = parse(&bytes).unwrap();
        assert_eq!(
            repr,
            Repr::Unknown {
                code: OptionCode::Auth,
                data: &[0x01, 0x02, 0x03]
            }
        );
        assert_eq!(emit(&repr), &bytes[..]);
        assert_eq!(format!("{repr}"), "OPTION_AUTH -> [1, 2, 3]");

        let repr = Repr::Unknown {
            code: OptionCode::from(0xfe01),
            data: &[0xaa],
        };
        assert_eq!(format!("{repr}"), "UnknownOption -> [170]");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", Repr::ElapsedTime(42)),
            "OPTION_ELAPSED_TIME -> 42/100s"
        );
        assert_eq!(
            format!(
                "{}",
                Repr::OptionRequest(vec![OptionCode::DnsServers, OptionCode::from(1000)])
            ),
            "OPTION_ORO -> [OPTION_DNS_SERVERS, UnknownOption(1000)]"
        );
    }
}
