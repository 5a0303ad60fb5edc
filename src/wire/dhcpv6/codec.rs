use alloc::vec::Vec;
use core::fmt;
use managed::ManagedMap;

#[cfg(feature = "alloc")]
use alloc::collections::BTreeMap;

use super::field;
use super::option::{Dhcpv6Option, OptionWriter};
use super::repr::Repr;
use super::OptionCode;
use crate::wire::{DecodeError, Error, Result};

/// A per-option payload decoder.
///
/// On success, the returned representation must account for every octet of
/// `data`, i.e. its [`Repr::data_len`] must equal `data.len()`.
pub type DecodeFn = for<'a> fn(&'a [u8]) -> core::result::Result<Repr<'a>, DecodeError>;

/// An option decoder.
///
/// Payloads are handed to the built-in decoders, unless a [DecodeFn] has been
/// registered for their option code, in which case it is used instead. Codes
/// with neither decode as [Repr::Unknown].
///
/// Overrides apply to top-level options only. Options encapsulated in IA_NA,
/// IA_TA, IA_PD, IAADDR and IAPREFIX are decoded with the built-in decoders,
/// and only the children each container permits are decoded at all.
///
/// The registry is filled through `&mut self` and read through `&self`, so it
/// cannot change while any decode borrows it.
pub struct Decoder<'r> {
    overrides: ManagedMap<'r, u16, DecodeFn>,
}

impl<'r> Decoder<'r> {
    /// Create a decoder using the given storage for overrides.
    ///
    /// # Examples
    /// ```rust
    /// # use dhcpv6_options::wire::{DecodeFn, Decoder};
    /// let mut slots: [Option<(u16, DecodeFn)>; 4] = [None; 4];
    /// let decoder = Decoder::new(&mut slots[..]);
    /// assert!(decoder.parse_options(&[]).unwrap().is_empty());
    /// ```
    pub fn new<S>(storage: S) -> Decoder<'r>
    where
        S: Into<ManagedMap<'r, u16, DecodeFn>>,
    {
        Decoder {
            overrides: storage.into(),
        }
    }

    /// Register a decoder for `code`, returning the one it replaces.
    ///
    /// Returns `Err(Error::Exhausted)` if the override storage is full.
    pub fn register(&mut self, code: OptionCode, decode: DecodeFn) -> Result<Option<DecodeFn>> {
        self.overrides
            .insert(code.into(), decode)
            .map_err(|_| Error::Exhausted)
    }

    /// Remove the decoder registered for `code`, falling back to the
    /// built-in one.
    pub fn unregister(&mut self, code: OptionCode) -> Option<DecodeFn> {
        self.overrides.remove(&u16::from(code))
    }

    fn dispatch<'a>(
        &self,
        code: OptionCode,
        data: &'a [u8],
    ) -> core::result::Result<Repr<'a>, DecodeError> {
        match self.overrides.get(&u16::from(code)) {
            Some(decode) => decode(data),
            None => Repr::parse_payload(code, data),
        }
    }

    /// Decode the payload of a single option and check that the result
    /// accounts for exactly the declared number of octets.
    pub fn parse<'a, T>(&self, opt: &Dhcpv6Option<&'a T>) -> Result<Repr<'a>>
    where
        T: AsRef<[u8]> + ?Sized,
    {
        opt.check_len()?;
        let code = opt.code();
        let data = opt.data();
        check_decoded(code, data, self.dispatch(code, data))
    }

    /// Decode the option at the start of `buffer`.
    ///
    /// Returns the option along with the number of octets it occupies.
    /// Octets past the end of the option are not looked at.
    pub fn decode_one<'a>(&self, buffer: &'a [u8]) -> Result<(Repr<'a>, usize)> {
        decode_one_with(buffer, |code, data| self.dispatch(code, data))
    }

    /// Decode every option in `buffer`, in order.
    pub fn parse_options<'a>(&self, buffer: &'a [u8]) -> Result<Vec<Repr<'a>>> {
        parse_options_with(buffer, |code, data| self.dispatch(code, data))
    }

    /// Alias of [parse_options](#method.parse_options).
    pub fn decode_all<'a>(&self, buffer: &'a [u8]) -> Result<Vec<Repr<'a>>> {
        self.parse_options(buffer)
    }
}

fn check_decoded<'a>(
    code: OptionCode,
    data: &[u8],
    decoded: core::result::Result<Repr<'a>, DecodeError>,
) -> Result<Repr<'a>> {
    let repr = decoded.map_err(|error| {
        net_debug!("dhcpv6: cannot decode option {}", u16::from(code));
        Error::Option {
            code: code.into(),
            error,
        }
    })?;

    if repr.data_len() != data.len() {
        net_debug!(
            "dhcpv6: option {} decoded to {} octets, header says {}",
            u16::from(code),
            repr.data_len(),
            data.len()
        );
        return Err(Error::LengthMismatch {
            code: code.into(),
            declared: data.len(),
            actual: repr.data_len(),
        });
    }

    Ok(repr)
}

fn decode_one_with<'a, F>(buffer: &'a [u8], dispatch: F) -> Result<(Repr<'a>, usize)>
where
    F: Fn(OptionCode, &'a [u8]) -> core::result::Result<Repr<'a>, DecodeError>,
{
    let opt = Dhcpv6Option::new_checked(buffer).map_err(|err| {
        net_debug!("dhcpv6: bad option framing at {} octets", buffer.len());
        err
    })?;
    let code = opt.code();
    let data = opt.data();
    let repr = check_decoded(code, data, dispatch(code, data))?;

    #[cfg(feature = "verbose")]
    net_trace!(
        "dhcpv6: option {} ({} octets)",
        u16::from(repr.code()),
        repr.data_len()
    );

    Ok((repr, opt.total_len()))
}

fn parse_options_with<'a, F>(buffer: &'a [u8], dispatch: F) -> Result<Vec<Repr<'a>>>
where
    F: Fn(OptionCode, &'a [u8]) -> core::result::Result<Repr<'a>, DecodeError>,
{
    let mut options = Vec::new();
    let mut cursor = 0;
    while cursor < buffer.len() {
        let (repr, _) = decode_one_with(&buffer[cursor..], &dispatch)?;
        cursor += field::HEADER_LEN + repr.data_len();
        options.push(repr);
    }

    if cursor != buffer.len() {
        net_debug!("dhcpv6: cursor {} past end of options ({})", cursor, buffer.len());
        return Err(Error::Overrun {
            cursor,
            len: buffer.len(),
        });
    }
    Ok(options)
}

/// Decode the options encapsulated in another option.
///
/// Only the codes in `allowed` go through their built-in decoder; any other
/// code is kept as [Repr::Unknown]. Containers list their permitted children
/// here, which bounds how deeply encapsulated options can nest.
pub(crate) fn parse_encapsulated<'a>(
    buffer: &'a [u8],
    allowed: &[OptionCode],
) -> Result<Vec<Repr<'a>>> {
    parse_options_with(buffer, |code, data| {
        if allowed.contains(&code) {
            Repr::parse_payload(code, data)
        } else {
            Ok(Repr::Unknown { code, data })
        }
    })
}

impl<'r> Default for Decoder<'r> {
    fn default() -> Self {
        #[cfg(feature = "alloc")]
        let overrides = ManagedMap::Owned(BTreeMap::new());
        #[cfg(not(feature = "alloc"))]
        let overrides = ManagedMap::Borrowed(&mut []);

        Decoder { overrides }
    }
}

impl<'r> fmt::Debug for Decoder<'r> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("overrides", &OverrideCodes(&self.overrides))
            .finish()
    }
}

struct OverrideCodes<'b, 'r>(&'b ManagedMap<'r, u16, DecodeFn>);

impl<'b, 'r> fmt::Debug for OverrideCodes<'b, 'r> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set()
            .entries(self.0.iter().map(|(code, _)| OptionCode::from(*code)))
            .finish()
    }
}

/// Decode the option at the start of `buffer` with the built-in decoders.
pub fn parse_option(buffer: &[u8]) -> Result<(Repr<'_>, usize)> {
    Decoder::default().decode_one(buffer)
}

/// Decode a whole options area with the built-in decoders.
pub fn parse_options(buffer: &[u8]) -> Result<Vec<Repr<'_>>> {
    Decoder::default().parse_options(buffer)
}

/// Encode a list of options back to back.
///
/// Returns `Err(Error::Oversized)` if an option payload does not fit in the
/// 16-bit length field.
pub fn emit_options(options: &[Repr<'_>]) -> Result<Vec<u8>> {
    let len = options.iter().map(Repr::buffer_len).sum();
    let mut buffer = alloc::vec![0; len];

    let mut writer = OptionWriter::new(&mut buffer);
    for repr in options {
        writer.emit(repr)?;
    }
    Ok(buffer)
}
