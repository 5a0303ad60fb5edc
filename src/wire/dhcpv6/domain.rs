use alloc::vec::Vec;
use core::fmt;

use super::repr::PayloadResult;
use crate::wire::DecodeError;

const MAX_LABEL_LEN: usize = 63;

/// A domain name in the uncompressed wire encoding of RFC 1035 § 3.1.
///
/// Each label is a length octet followed by that many octets, and the name
/// ends with the zero-length root label. DHCPv6 forbids compression pointers,
/// so a length octet above 63 is an error.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DomainName<'a> {
    pub labels: Vec<&'a str>,
}

impl<'a> DomainName<'a> {
    /// Build a name from its dotted text form, e.g. `"example.com"`.
    ///
    /// A trailing dot is accepted. Returns `Err(DecodeError::InvalidDomainName)`
    /// for empty or overlong labels.
    pub fn from_dotted(name: &'a str) -> PayloadResult<DomainName<'a>> {
        let name = name.strip_suffix('.').unwrap_or(name);
        if name.is_empty() {
            return Ok(DomainName { labels: Vec::new() });
        }

        let labels: Vec<&str> = name.split('.').collect();
        if labels
            .iter()
            .any(|label| label.is_empty() || label.len() > MAX_LABEL_LEN)
        {
            return Err(DecodeError::InvalidDomainName);
        }
        Ok(DomainName { labels })
    }

    /// Parse one name from the front of `data`, returning it along with the
    /// number of octets consumed.
    pub fn parse(data: &'a [u8]) -> PayloadResult<(DomainName<'a>, usize)> {
        let mut labels = Vec::new();
        let mut pos = 0;
        loop {
            let len = *data.get(pos).ok_or(DecodeError::InvalidDomainName)? as usize;
            pos += 1;
            if len == 0 {
                return Ok((DomainName { labels }, pos));
            }
            if len > MAX_LABEL_LEN {
                return Err(DecodeError::InvalidDomainName);
            }
            let label = data
                .get(pos..pos + len)
                .ok_or(DecodeError::InvalidDomainName)?;
            labels.push(core::str::from_utf8(label).map_err(|_| DecodeError::InvalidUtf8)?);
            pos += len;
        }
    }

    /// Parse a payload made of back to back names.
    pub fn parse_list(mut data: &'a [u8]) -> PayloadResult<Vec<DomainName<'a>>> {
        let mut names = Vec::new();
        while !data.is_empty() {
            let (name, len) = DomainName::parse(data)?;
            names.push(name);
            data = &data[len..];
        }
        Ok(names)
    }

    pub fn buffer_len(&self) -> usize {
        self.labels.iter().map(|label| 1 + label.len()).sum::<usize>() + 1
    }

    /// Emit the name into `data`, which must be exactly
    /// [buffer_len](#method.buffer_len) octets long.
    pub fn emit(&self, data: &mut [u8]) {
        let mut pos = 0;
        for label in &self.labels {
            data[pos] = label.len() as u8;
            data[pos + 1..pos + 1 + label.len()].copy_from_slice(label.as_bytes());
            pos += 1 + label.len();
        }
        data[pos] = 0;
    }
}

impl<'a> fmt::Display for DomainName<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.labels.is_empty() {
            return write!(f, ".");
        }
        for label in &self.labels {
            write!(f, "{label}.")?;
        }
        Ok(())
    }
}
