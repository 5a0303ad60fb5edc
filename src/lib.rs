#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

//! The _dhcpv6-options_ crate is a codec for the variable-length options area of
//! [DHCPv6] messages. It takes the slice of a message that follows the
//! `msg-type`/`transaction-id` header and turns it into an ordered list of
//! typed option records, or turns such a list back into bytes.
//!
//! The crate is organized the same way the `wire` layer of a network stack is:
//!
//! * [Dhcpv6Option] is a zero-copy read/write wrapper around the bytes of a
//!   single option, with checked and unchecked constructors;
//! * [Dhcpv6OptionRepr] is the high-level representation of one option, with
//!   `parse`-style decoding and an `emit` method;
//! * [Decoder] walks a whole options area, routing every option code to its
//!   decoder, and [emit_options] performs the inverse.
//!
//! Options whose code has no decoder are kept verbatim as
//! [`Dhcpv6OptionRepr::Unknown`], so anything the crate does not model survives
//! a decode/encode round trip byte for byte.
//!
//! # Features
//!
//! * `std`: implements `std::error::Error` for the error types.
//! * `alloc`: lets [`Decoder::default`] own a map for registered decoders.
//!   Without it the default decoder has no override storage. The crate always
//!   needs an allocator, since decoded option lists are `Vec`s.
//! * `log` / `defmt`: trace decoding through the respective logging backend.
//! * `verbose`: additionally trace every decoded option.
//! * `proto-dhcpv6-ext`: decoders for the options defined outside RFC 8415
//!   (remote-id, bootfile URL, client architecture, network interface id).
//!
//! # Example
//!
//! ```
//! use dhcpv6_options::wire::{emit_options, parse_options, Dhcpv6OptionRepr};
//!
//! static BYTES: [u8; 10] = [0x00, 0x08, 0x00, 0x02, 0x00, 0x64, 0xfd, 0xe9, 0x00, 0x00];
//!
//! let options = parse_options(&BYTES).unwrap();
//! assert_eq!(options.len(), 2);
//! assert_eq!(options[0], Dhcpv6OptionRepr::ElapsedTime(100));
//! assert_eq!(emit_options(&options).unwrap(), &BYTES[..]);
//! ```
//!
//! [DHCPv6]: https://datatracker.ietf.org/doc/html/rfc8415

extern crate alloc;

#[macro_use]
mod macros;

pub mod wire;

pub use wire::{emit_options, parse_options, Decoder, Dhcpv6Option, Dhcpv6OptionRepr};
