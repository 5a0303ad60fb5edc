use byteorder::{ByteOrder, NetworkEndian};
use core::fmt;

use super::field;
use super::repr::Repr;
use super::OptionCode;
use crate::wire::{Error, Result};

/// A read/write wrapper around a single DHCPv6 option.
///
/// The buffer may extend past the end of the option; accessors only look at
/// the header and the `option-len` octets following it.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Dhcpv6Option<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> Dhcpv6Option<T> {
    /// Imbue a raw octet buffer with DHCPv6 option structure.
    pub const fn new_unchecked(buffer: T) -> Dhcpv6Option<T> {
        Dhcpv6Option { buffer }
    }

    /// Shorthand for a combination of [new_unchecked] and [check_len].
    ///
    /// [new_unchecked]: #method.new_unchecked
    /// [check_len]: #method.check_len
    pub fn new_checked(buffer: T) -> Result<Dhcpv6Option<T>> {
        let opt = Self::new_unchecked(buffer);
        opt.check_len()?;
        Ok(opt)
    }

    /// Ensure that no accessor method will panic if called.
    ///
    /// Returns `Err(Error::TruncatedHeader)` if the buffer cannot hold the
    /// option header, and `Err(Error::TruncatedPayload)` if it is shorter than
    /// the header says.
    ///
    /// The result of this check is invalidated by calling [set_data_len].
    ///
    /// [set_data_len]: #method.set_data_len
    pub fn check_len(&self) -> Result<()> {
        let len = self.buffer.as_ref().len();
        if len < field::HEADER_LEN {
            return Err(Error::TruncatedHeader { available: len });
        }

        let declared = self.data_len() as usize;
        let available = len - field::HEADER_LEN;
        if declared > available {
            Err(Error::TruncatedPayload {
                code: self.code().into(),
                declared,
                available,
            })
        } else {
            Ok(())
        }
    }

    /// Consume the option, returning the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }

    /// Return the option code.
    #[inline]
    pub fn code(&self) -> OptionCode {
        let data = self.buffer.as_ref();
        OptionCode::from(NetworkEndian::read_u16(&data[field::CODE]))
    }

    /// Return the length of the option data, not including the header.
    #[inline]
    pub fn data_len(&self) -> u16 {
        let data = self.buffer.as_ref();
        NetworkEndian::read_u16(&data[field::LENGTH])
    }

    /// Return the length of the whole option, header included.
    #[inline]
    pub fn total_len(&self) -> usize {
        field::DATA(self.data_len()).end
    }
}

impl<'a, T: AsRef<[u8]> + ?Sized> Dhcpv6Option<&'a T> {
    /// Return the option data.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        let len = self.data_len();
        let data = self.buffer.as_ref();
        &data[field::DATA(len)]
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> Dhcpv6Option<T> {
    /// Set the option code.
    #[inline]
    pub fn set_code(&mut self, value: OptionCode) {
        let data = self.buffer.as_mut();
        NetworkEndian::write_u16(&mut data[field::CODE], value.into());
    }

    /// Set the length of the option data.
    #[inline]
    pub fn set_data_len(&mut self, value: u16) {
        let data = self.buffer.as_mut();
        NetworkEndian::write_u16(&mut data[field::LENGTH], value);
    }

    /// Return a mutable pointer to the option data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        let len = self.data_len();
        let data = self.buffer.as_mut();
        &mut data[field::DATA(len)]
    }
}

impl<'a, T: AsRef<[u8]> + ?Sized> fmt::Display for Dhcpv6Option<&'a T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match Repr::parse(self) {
            Ok(repr) => write!(f, "{repr}"),
            Err(err) => write!(f, "DHCPv6 option ({err})"),
        }
    }
}

/// An iterator over the raw options of an options area.
///
/// Only the framing is checked. The iterator yields the first framing error
/// it encounters and then stops.
#[derive(Debug, Clone)]
pub struct RawOptions<'a> {
    buffer: &'a [u8],
}

impl<'a> RawOptions<'a> {
    pub const fn new(buffer: &'a [u8]) -> Self {
        RawOptions { buffer }
    }
}

impl<'a> Iterator for RawOptions<'a> {
    type Item = Result<Dhcpv6Option<&'a [u8]>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() {
            return None;
        }

        match Dhcpv6Option::new_checked(self.buffer) {
            Ok(opt) => {
                let (this, rest) = self.buffer.split_at(opt.total_len());
                self.buffer = rest;
                Some(Ok(Dhcpv6Option::new_unchecked(this)))
            }
            Err(err) => {
                self.buffer = &[];
                Some(Err(err))
            }
        }
    }
}

/// A writer emitting option representations back to back into a buffer.
#[derive(Debug)]
pub struct OptionWriter<'a> {
    buffer: &'a mut [u8],
}

impl<'a> OptionWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer }
    }

    /// Return the number of octets still available.
    pub fn remaining(&self) -> usize {
        self.buffer.len()
    }

    /// Emit a [`Repr`] after the options written so far.
    pub fn emit(&mut self, repr: &Repr<'_>) -> Result<()> {
        let data_len = repr.data_len();
        if data_len > u16::MAX as usize {
            return Err(Error::Oversized {
                code: repr.code().into(),
                len: data_len,
            });
        }

        let total_len = field::HEADER_LEN + data_len;
        if self.buffer.len() < total_len {
            return Err(Error::Exhausted);
        }

        let (buf, rest) = core::mem::take(&mut self.buffer).split_at_mut(total_len);
        self.buffer = rest;

        repr.emit(&mut Dhcpv6Option::new_unchecked(buf));
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    static OPTION_BYTES: [u8; 8] = [0x00, 0x08, 0x00, 0x02, 0x12, 0x34, 0xff, 0xff];

    #[test]
    fn test_deconstruct() {
        let opt = Dhcpv6Option::new_unchecked(&OPTION_BYTES[..]);
        assert_eq!(opt.code(), OptionCode::ElapsedTime);
        assert_eq!(opt.data_len(), 2);
        assert_eq!(opt.total_len(), 6);
        assert_eq!(opt.data(), &[0x12, 0x34]);
    }

    #[test]
    fn test_construct() {
        let mut bytes = [0xff; 8];
        let mut opt = Dhcpv6Option::new_unchecked(&mut bytes[..]);
        opt.set_code(OptionCode::ElapsedTime);
        opt.set_data_len(2);
        opt.data_mut().copy_from_slice(&[0x12, 0x34]);
        assert_eq!(&opt.into_inner()[..], &OPTION_BYTES[..]);
    }

    #[test]
    fn test_check_len() {
        assert_eq!(
            Dhcpv6Option::new_checked(&[0x00, 0x01, 0x00][..]),
            Err(Error::TruncatedHeader { available: 3 })
        );
        assert_eq!(
            Dhcpv6Option::new_checked(&[0x00, 0x01, 0x00, 0x05, 0xaa][..]),
            Err(Error::TruncatedPayload {
                code: 1,
                declared: 5,
                available: 1
            })
        );
        assert!(Dhcpv6Option::new_checked(&OPTION_BYTES[..]).is_ok());
    }

    #[test]
    fn test_raw_options() {
        let mut iter = RawOptions::new(&OPTION_BYTES[..]);
        let first = iter.next().unwrap().unwrap();
        assert_eq!(first.into_inner(), &OPTION_BYTES[..6]);
        assert_eq!(
            iter.next(),
            Some(Err(Error::TruncatedHeader { available: 2 }))
        );
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_writer_exhausted() {
        let mut bytes = [0u8; 5];
        let mut writer = OptionWriter::new(&mut bytes[..]);
        assert_eq!(writer.emit(&Repr::ElapsedTime(0x1234)), Err(Error::Exhausted));
        assert_eq!(writer.remaining(), 5);
    }

    #[test]
    fn test_writer_oversized() {
        let data = [0u8; u16::MAX as usize + 1];
        let repr = Repr::Unknown {
            code: OptionCode::Unknown(0x1000),
            data: &data,
        };
        let mut bytes = [0u8; 8];
        let mut writer = OptionWriter::new(&mut bytes[..]);
        assert_eq!(
            writer.emit(&repr),
            Err(Error::Oversized {
                code: 0x1000,
                len: u16::MAX as usize + 1
            })
        );
    }

    #[test]
    fn test_writer_back_to_back() {
        let mut bytes = [0u8; 10];
        let mut writer = OptionWriter::new(&mut bytes[..]);
        writer.emit(&Repr::ElapsedTime(0x1234)).unwrap();
        writer.emit(&Repr::RapidCommit).unwrap();
        assert_eq!(writer.remaining(), 0);
        assert_eq!(
            bytes,
            [0x00, 0x08, 0x00, 0x02, 0x12, 0x34, 0x00, 0x0e, 0x00, 0x00]
        );
    }
}
