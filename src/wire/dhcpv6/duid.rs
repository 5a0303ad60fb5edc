use byteorder::{ByteOrder, NetworkEndian};
use core::fmt;

use super::field;
use super::repr::{check_exact, check_min, PayloadResult};
use crate::wire::DecodeError;

enum_with_unknown! {
    /// DHCP Unique Identifier type (RFC 8415 § 11.1).
    pub enum DuidType(u16) {
        LinkLayerTime = 1,
        Enterprise = 2,
        LinkLayer = 3,
        Uuid = 4,
    }
}

/// A DHCP Unique Identifier, as carried in Client and Server Identifier
/// options.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duid<'a> {
    /// DUID-LLT: hardware type, seconds since 2000-01-01 and a link-layer
    /// address.
    LinkLayerTime {
        hardware_type: u16,
        time: u32,
        link_layer_address: &'a [u8],
    },
    /// DUID-EN: enterprise number and a vendor assigned identifier.
    Enterprise {
        enterprise_number: u32,
        identifier: &'a [u8],
    },
    /// DUID-LL: hardware type and a link-layer address.
    LinkLayer {
        hardware_type: u16,
        link_layer_address: &'a [u8],
    },
    /// DUID-UUID (RFC 6355).
    Uuid([u8; 16]),
    Unknown { duid_type: u16, data: &'a [u8] },
}

impl<'a> Duid<'a> {
    pub fn parse(data: &'a [u8]) -> PayloadResult<Duid<'a>> {
        check_min(data, field::DUID_TYPE.end)?;
        if data.len() > field::DUID_MAX_LEN {
            return Err(DecodeError::TooLong {
                max: field::DUID_MAX_LEN,
                actual: data.len(),
            });
        }

        let duid_type = NetworkEndian::read_u16(&data[field::DUID_TYPE]);
        let body = &data[field::DUID_TYPE.end..];
        let duid = match DuidType::from(duid_type) {
            DuidType::LinkLayerTime => {
                check_min(data, 8)?;
                Duid::LinkLayerTime {
                    hardware_type: NetworkEndian::read_u16(&body[0..2]),
                    time: NetworkEndian::read_u32(&body[2..6]),
                    link_layer_address: &body[6..],
                }
            }
            DuidType::Enterprise => {
                check_min(data, 6)?;
                Duid::Enterprise {
                    enterprise_number: NetworkEndian::read_u32(&body[0..4]),
                    identifier: &body[4..],
                }
            }
            DuidType::LinkLayer => {
                check_min(data, 4)?;
                Duid::LinkLayer {
                    hardware_type: NetworkEndian::read_u16(&body[0..2]),
                    link_layer_address: &body[2..],
                }
            }
            DuidType::Uuid => {
                check_exact(data, 18)?;
                let mut uuid = [0u8; 16];
                uuid.copy_from_slice(body);
                Duid::Uuid(uuid)
            }
            DuidType::Unknown(duid_type) => Duid::Unknown {
                duid_type,
                data: body,
            },
        };
        Ok(duid)
    }

    pub fn duid_type(&self) -> DuidType {
        match self {
            Duid::LinkLayerTime { .. } => DuidType::LinkLayerTime,
            Duid::Enterprise { .. } => DuidType::Enterprise,
            Duid::LinkLayer { .. } => DuidType::LinkLayer,
            Duid::Uuid(_) => DuidType::Uuid,
            Duid::Unknown { duid_type, .. } => DuidType::Unknown(*duid_type),
        }
    }

    pub fn buffer_len(&self) -> usize {
        field::DUID_TYPE.end
            + match self {
                Duid::LinkLayerTime {
                    link_layer_address, ..
                } => 6 + link_layer_address.len(),
                Duid::Enterprise { identifier, .. } => 4 + identifier.len(),
                Duid::LinkLayer {
                    link_layer_address, ..
                } => 2 + link_layer_address.len(),
                Duid::Uuid(_) => 16,
                Duid::Unknown { data, .. } => data.len(),
            }
    }

    /// Emit the identifier into `data`, which must be exactly
    /// [buffer_len](#method.buffer_len) octets long.
    pub fn emit(&self, data: &mut [u8]) {
        NetworkEndian::write_u16(&mut data[field::DUID_TYPE], self.duid_type().into());
        let body = &mut data[field::DUID_TYPE.end..];
        match self {
            Duid::LinkLayerTime {
                hardware_type,
                time,
                link_layer_address,
            } => {
                NetworkEndian::write_u16(&mut body[0..2], *hardware_type);
                NetworkEndian::write_u32(&mut body[2..6], *time);
                body[6..].copy_from_slice(link_layer_address);
            }
            Duid::Enterprise {
                enterprise_number,
                identifier,
            } => {
                NetworkEndian::write_u32(&mut body[0..4], *enterprise_number);
                body[4..].copy_from_slice(identifier);
            }
            Duid::LinkLayer {
                hardware_type,
                link_layer_address,
            } => {
                NetworkEndian::write_u16(&mut body[0..2], *hardware_type);
                body[2..].copy_from_slice(link_layer_address);
            }
            Duid::Uuid(uuid) => body.copy_from_slice(uuid),
            Duid::Unknown { data, .. } => body.copy_from_slice(data),
        }
    }
}

struct Hex<'a>(&'a [u8]);

impl<'a> fmt::Display for Hex<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, octet) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ":")?;
            }
            write!(f, "{octet:02x}")?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for Duid<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Duid::LinkLayerTime {
                hardware_type,
                time,
                link_layer_address,
            } => write!(
                f,
                "DUID-LLT hwtype={} time={} lladdr={}",
                hardware_type,
                time,
                Hex(link_layer_address)
            ),
            Duid::Enterprise {
                enterprise_number,
                identifier,
            } => write!(
                f,
                "DUID-EN enterprise={} id={}",
                enterprise_number,
                Hex(identifier)
            ),
            Duid::LinkLayer {
                hardware_type,
                link_layer_address,
            } => write!(
                f,
                "DUID-LL hwtype={} lladdr={}",
                hardware_type,
                Hex(link_layer_address)
            ),
            Duid::Uuid(uuid) => write!(f, "DUID-UUID {}", Hex(uuid)),
            Duid::Unknown { duid_type, data } => {
                write!(f, "DUID type={} {}", duid_type, Hex(data))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    static DUID_LLT_BYTES: [u8; 14] = [
        0x00, 0x01, 0x00, 0x01, 0x2b, 0x3c, 0x4d, 0x5e, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01,
    ];

    #[test]
    fn test_parse_llt() {
        let duid = Duid::parse(&DUID_LLT_BYTES).unwrap();
        assert_eq!(
            duid,
            Duid::LinkLayerTime {
                hardware_type: 1,
                time: 0x2b3c4d5e,
                link_layer_address: &[0x02, 0x00, 0x00, 0x00, 0x00, 0x01],
            }
        );
        assert_eq!(duid.buffer_len(), DUID_LLT_BYTES.len());
        assert_eq!(
            format!("{duid}"),
            "DUID-LLT hwtype=1 time=725372254 lladdr=02:00:00:00:00:01"
        );
    }

    #[test]
    fn test_emit_llt() {
        let duid = Duid::parse(&DUID_LLT_BYTES).unwrap();
        let mut bytes = [0u8; 14];
        duid.emit(&mut bytes);
        assert_eq!(bytes, DUID_LLT_BYTES);
    }

    #[test]
    fn test_parse_en_and_ll() {
        let en = [0x00, 0x02, 0x00, 0x00, 0x00, 0x09, 0xab];
        assert_eq!(
            Duid::parse(&en),
            Ok(Duid::Enterprise {
                enterprise_number: 9,
                identifier: &[0xab],
            })
        );

        let ll = [0x00, 0x03, 0x00, 0x01];
        assert_eq!(
            Duid::parse(&ll),
            Ok(Duid::LinkLayer {
                hardware_type: 1,
                link_layer_address: &[],
            })
        );
    }

    #[test]
    fn test_parse_uuid() {
        let mut bytes = [0x11u8; 18];
        bytes[0] = 0x00;
        bytes[1] = 0x04;
        assert_eq!(Duid::parse(&bytes), Ok(Duid::Uuid([0x11; 16])));
        assert_eq!(
            Duid::parse(&bytes[..17]),
            Err(DecodeError::InvalidLength { actual: 17 })
        );
    }

    #[test]
    fn test_parse_unknown_type() {
        let bytes = [0x00, 0x09, 0x01, 0x02];
        let duid = Duid::parse(&bytes).unwrap();
        assert_eq!(
            duid,
            Duid::Unknown {
                duid_type: 9,
                data: &[0x01, 0x02],
            }
        );
        let mut out = [0u8; 4];
        duid.emit(&mut out);
        assert_eq!(out, bytes);
    }

    #[test]
    fn test_parse_bad_length() {
        assert_eq!(
            Duid::parse(&[0x00]),
            Err(DecodeError::Truncated {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            Duid::parse(&DUID_LLT_BYTES[..7]),
            Err(DecodeError::Truncated {
                expected: 8,
                actual: 7
            })
        );

        let mut long = [0u8; 131];
        long[1] = 0x03;
        assert_eq!(
            Duid::parse(&long),
            Err(DecodeError::TooLong {
                max: 130,
                actual: 131
            })
        );
        assert!(Duid::parse(&long[..130]).is_ok());
    }
}
