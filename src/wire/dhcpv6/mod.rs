// See https://datatracker.ietf.org/doc/html/rfc8415 for the DHCPv6 specification.

use core::fmt;

pub mod codec;
pub mod domain;
pub mod duid;
pub mod ia;
pub mod option;
pub mod repr;
pub mod status;

pub const SERVER_PORT: u16 = 547;
pub const CLIENT_PORT: u16 = 546;

enum_with_unknown! {
    /// The code identifying the type of a DHCPv6 option.
    ///
    /// Codes that are not listed here are carried as `Unknown`; converting
    /// from and back to `u16` is lossless for every value.
    pub enum OptionCode(u16) {
        ClientId = 1,
        ServerId = 2,
        IaNa = 3,
        IaTa = 4,
        IaAddr = 5,
        OptionRequest = 6,
        Preference = 7,
        ElapsedTime = 8,
        RelayMessage = 9,
        Auth = 11,
        Unicast = 12,
        StatusCode = 13,
        RapidCommit = 14,
        UserClass = 15,
        VendorClass = 16,
        VendorOpts = 17,
        InterfaceId = 18,
        ReconfigureMessage = 19,
        ReconfigureAccept = 20,
        SipServerDomainNames = 21,
        SipServerAddresses = 22,
        DnsServers = 23,
        DomainList = 24,
        IaPd = 25,
        IaPrefix = 26,
        NisServers = 27,
        NispServers = 28,
        NisDomainName = 29,
        NispDomainName = 30,
        SntpServers = 31,
        InformationRefreshTime = 32,
        RemoteId = 37,
        ClientFqdn = 39,
        NtpServer = 56,
        BootfileUrl = 59,
        BootfileParam = 60,
        ClientArchType = 61,
        NetworkInterfaceId = 62,
        SolMaxRt = 82,
        InfMaxRt = 83,
    }
}

impl OptionCode {
    /// Return the symbolic name of the option code, as registered with IANA.
    ///
    /// Codes without a name resolve to `"UnknownOption"`.
    pub const fn name(&self) -> &'static str {
        match *self {
            OptionCode::ClientId => "OPTION_CLIENTID",
            OptionCode::ServerId => "OPTION_SERVERID",
            OptionCode::IaNa => "OPTION_IA_NA",
            OptionCode::IaTa => "OPTION_IA_TA",
            OptionCode::IaAddr => "OPTION_IAADDR",
            OptionCode::OptionRequest => "OPTION_ORO",
            OptionCode::Preference => "OPTION_PREFERENCE",
            OptionCode::ElapsedTime => "OPTION_ELAPSED_TIME",
            OptionCode::RelayMessage => "OPTION_RELAY_MSG",
            OptionCode::Auth => "OPTION_AUTH",
            OptionCode::Unicast => "OPTION_UNICAST",
            OptionCode::StatusCode => "OPTION_STATUS_CODE",
            OptionCode::RapidCommit => "OPTION_RAPID_COMMIT",
            OptionCode::UserClass => "OPTION_USER_CLASS",
            OptionCode::VendorClass => "OPTION_VENDOR_CLASS",
            OptionCode::VendorOpts => "OPTION_VENDOR_OPTS",
            OptionCode::InterfaceId => "OPTION_INTERFACE_ID",
            OptionCode::ReconfigureMessage => "OPTION_RECONF_MSG",
            OptionCode::ReconfigureAccept => "OPTION_RECONF_ACCEPT",
            OptionCode::SipServerDomainNames => "OPTION_SIP_SERVER_D",
            OptionCode::SipServerAddresses => "OPTION_SIP_SERVER_A",
            OptionCode::DnsServers => "OPTION_DNS_SERVERS",
            OptionCode::DomainList => "OPTION_DOMAIN_LIST",
            OptionCode::IaPd => "OPTION_IA_PD",
            OptionCode::IaPrefix => "OPTION_IAPREFIX",
            OptionCode::NisServers => "OPTION_NIS_SERVERS",
            OptionCode::NispServers => "OPTION_NISP_SERVERS",
            OptionCode::NisDomainName => "OPTION_NIS_DOMAIN_NAME",
            OptionCode::NispDomainName => "OPTION_NISP_DOMAIN_NAME",
            OptionCode::SntpServers => "OPTION_SNTP_SERVERS",
            OptionCode::InformationRefreshTime => "OPTION_INFORMATION_REFRESH_TIME",
            OptionCode::RemoteId => "OPTION_REMOTE_ID",
            OptionCode::ClientFqdn => "OPTION_CLIENT_FQDN",
            OptionCode::NtpServer => "OPTION_NTP_SERVER",
            OptionCode::BootfileUrl => "OPT_BOOTFILE_URL",
            OptionCode::BootfileParam => "OPT_BOOTFILE_PARAM",
            OptionCode::ClientArchType => "OPTION_CLIENT_ARCH_TYPE",
            OptionCode::NetworkInterfaceId => "OPTION_NII",
            OptionCode::SolMaxRt => "OPTION_SOL_MAX_RT",
            OptionCode::InfMaxRt => "OPTION_INF_MAX_RT",
            OptionCode::Unknown(_) => "UnknownOption",
        }
    }
}

impl fmt::Display for OptionCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            OptionCode::Unknown(code) => write!(f, "UnknownOption({code})"),
            _ => write!(f, "{}", self.name()),
        }
    }
}

// The format of DHCP options is:
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |          option-code          |           option-len          |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                          option-data                          |
// |                      (option-len octets)                      |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
//                   Figure 12: Option Format
//
// option-code          An unsigned integer identifying the specific
//                      option type carried in this option.
//                      A 2-octet field.
//
// option-len           An unsigned integer giving the length of the
//                      option-data field in this option in octets.
//                      A 2-octet field.
//
// option-data          The data for the option; the format of this
//                      data depends on the definition of the option.
//                      A variable-length field (the length, in
//                      octets, is specified by option-len).
//
// Options are stored serially in the "options" field, with no padding
// between the options.  Options are byte-aligned but are not aligned in
// any other way (such as on 2-byte or 4-byte boundaries).
pub(crate) mod field {
    #![allow(non_snake_case)]
    #![allow(unused)]

    use crate::wire::field::*;

    pub const CODE: Field = 0..2;
    pub const LENGTH: Field = 2..4;
    pub const HEADER_LEN: usize = 4;

    pub const fn DATA(length: u16) -> Field {
        HEADER_LEN..HEADER_LEN + length as usize
    }

    // A DUID is at least a 2-octet type code, and at most 128 octets
    // following it.
    pub const DUID_TYPE: Field = 0..2;
    pub const DUID_MAX_LEN: usize = 130;

    // IA_NA and IA_PD: IAID, T1 and T2 followed by encapsulated options.
    pub const IA_IAID: Field = 0..4;
    pub const IA_T1: Field = 4..8;
    pub const IA_T2: Field = 8..12;
    pub const IA_OPTIONS: Rest = 12..;

    // IA_TA: IAID followed by encapsulated options.
    pub const IA_TA_OPTIONS: Rest = 4..;

    // IA Address: address, preferred and valid lifetime, options.
    pub const IAADDR_ADDRESS: Field = 0..16;
    pub const IAADDR_PREFERRED: Field = 16..20;
    pub const IAADDR_VALID: Field = 20..24;
    pub const IAADDR_OPTIONS: Rest = 24..;

    // IA Prefix: preferred and valid lifetime, prefix length, prefix, options.
    pub const IAPREFIX_PREFERRED: Field = 0..4;
    pub const IAPREFIX_VALID: Field = 4..8;
    pub const IAPREFIX_LEN: usize = 8;
    pub const IAPREFIX_PREFIX: Field = 9..25;
    pub const IAPREFIX_OPTIONS: Rest = 25..;

    // Status code: 2-octet status followed by a UTF-8 message.
    pub const STATUS_CODE: Field = 0..2;
    pub const STATUS_MESSAGE: Rest = 2..;

    // Vendor class and remote-id: 4-octet enterprise number first.
    pub const ENTERPRISE_NUMBER: Field = 0..4;
    pub const ENTERPRISE_DATA: Rest = 4..;

    // Network interface identifier: type, major and minor revision.
    pub const NII_LEN: usize = 3;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_option_code_roundtrip() {
        for value in [0u16, 1, 13, 17, 25, 83, 84, 0x1234, u16::MAX] {
            assert_eq!(u16::from(OptionCode::from(value)), value);
        }
        assert_eq!(OptionCode::from(13), OptionCode::StatusCode);
        assert_eq!(OptionCode::from(10), OptionCode::Unknown(10));
    }

    #[test]
    fn test_option_code_name() {
        assert_eq!(OptionCode::ClientId.name(), "OPTION_CLIENTID");
        assert_eq!(OptionCode::from(59).name(), "OPT_BOOTFILE_URL");
        assert_eq!(OptionCode::from(0xfff0).name(), "UnknownOption");
        assert_eq!(format!("{}", OptionCode::IaNa), "OPTION_IA_NA");
        assert_eq!(format!("{}", OptionCode::from(200)), "UnknownOption(200)");
    }
}
