/*! Pretty-printing of options areas.

The `pretty_print` module provides bits and pieces for printing a buffer of
DHCPv6 options as a tree, one option per line, with encapsulated options
indented below the option that carries them.

# Example

```rust
use dhcpv6_options::wire::pretty_print::PrettyPrinter;
use dhcpv6_options::wire::Dhcpv6RawOptions;

let buffer = vec![
    // IA_NA, IAID 1, T1 0, T2 0
    0x00, 0x03, 0x00, 0x12, 0x00, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    // Status Code, success
    0x00, 0x0d, 0x00, 0x02, 0x00, 0x00,
];
print!("{}", PrettyPrinter::<Dhcpv6RawOptions>::new("", &buffer));
```
*/

use core::fmt;
use core::marker::PhantomData;

use super::dhcpv6::codec::Decoder;
use super::dhcpv6::option::RawOptions;
use super::dhcpv6::repr::Repr;

/// Indentation state.
#[derive(Debug)]
pub struct PrettyIndent {
    prefix: &'static str,
    level: usize,
}

impl PrettyIndent {
    /// Create an indentation state. The entire listing will be indented by the width
    /// of `prefix`, and `prefix` will appear at the start of the first line.
    pub fn new(prefix: &'static str) -> PrettyIndent {
        PrettyIndent { prefix, level: 0 }
    }

    /// Increase indentation level.
    pub fn increase(&mut self) {
        self.level += 1;
    }

    /// Decrease indentation level.
    pub fn decrease(&mut self) {
        self.level = self.level.saturating_sub(1);
    }
}

impl fmt::Display for PrettyIndent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.level == 0 {
            write!(f, "{}", self.prefix)
        } else {
            write!(f, "{0:1$}{0:2$}\\ ", "", self.prefix.len(), (self.level - 1) * 2)
        }
    }
}

/// Interface for printing buffers of a given format in a human-readable way.
pub trait PrettyPrint {
    /// Write a concise, formatted representation of a buffer, without
    /// validating it first.
    ///
    /// `pretty_print` accepts a buffer and not a wrapper because the printed
    /// buffer may be malformed.
    fn pretty_print(
        buffer: &dyn AsRef<[u8]>,
        fmt: &mut fmt::Formatter,
        indent: &mut PrettyIndent,
    ) -> fmt::Result;
}

/// Wrapper for using a `PrettyPrint` where a `Display` is expected.
pub struct PrettyPrinter<'a, T: PrettyPrint> {
    prefix: &'static str,
    buffer: &'a dyn AsRef<[u8]>,
    phantom: PhantomData<T>,
}

impl<'a, T: PrettyPrint> PrettyPrinter<'a, T> {
    /// Format `buffer` using functionality of `T`.
    pub fn new(prefix: &'static str, buffer: &'a dyn AsRef<[u8]>) -> PrettyPrinter<'a, T> {
        PrettyPrinter {
            prefix,
            buffer,
            phantom: PhantomData,
        }
    }
}

impl<'a, T: PrettyPrint> fmt::Display for PrettyPrinter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        T::pretty_print(&self.buffer, f, &mut PrettyIndent::new(self.prefix))
    }
}

struct Header<'r, 'a>(&'r Repr<'a>);

impl<'r, 'a> fmt::Display for Header<'r, 'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt_header(f)
    }
}

fn print_tree(
    options: &[Repr],
    f: &mut fmt::Formatter,
    indent: &mut PrettyIndent,
) -> fmt::Result {
    for repr in options {
        writeln!(f, "{indent}{}", Header(repr))?;
        if let Some(nested) = repr.encapsulated() {
            indent.increase();
            print_tree(nested, f, indent)?;
            indent.decrease();
        }
    }
    Ok(())
}

impl<'a> PrettyPrint for RawOptions<'a> {
    fn pretty_print(
        buffer: &dyn AsRef<[u8]>,
        f: &mut fmt::Formatter,
        indent: &mut PrettyIndent,
    ) -> fmt::Result {
        let decoder = Decoder::default();
        let mut buffer = buffer.as_ref();
        while !buffer.is_empty() {
            match decoder.decode_one(buffer) {
                Err(err) => return writeln!(f, "{indent}({err})"),
                Ok((repr, len)) => {
                    print_tree(core::slice::from_ref(&repr), f, indent)?;
                    buffer = &buffer[len..];
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    static IA_NA_BYTES: [u8; 58] = [
        0x00, 0x03, 0x00, 0x34, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x0e, 0x10, 0x00, 0x00, 0x15,
        0x18, 0x00, 0x05, 0x00, 0x24, 0x20, 0x01, 0x0d, 0xb8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x1c, 0x20, 0x00, 0x00, 0x2a, 0x30, 0x00,
        0x0d, 0x00, 0x08, 0x00, 0x00, b'a', b'l', b'l', b' ', b'o', b'k', 0x00, 0x0e,
    ];

    #[test]
    fn test_indent() {
        let mut indent = PrettyIndent::new("> ");
        assert_eq!(format!("{indent}"), "> ");
        indent.increase();
        assert_eq!(format!("{indent}"), "  \\ ");
        indent.increase();
        assert_eq!(format!("{indent}"), "    \\ ");
        indent.decrease();
        indent.decrease();
        indent.decrease();
        assert_eq!(format!("{indent}"), "> ");
    }

    #[test]
    fn test_print_tree() {
        let mut bytes = IA_NA_BYTES.to_vec();
        bytes.extend_from_slice(&[0x00, 0x00]);
        assert_eq!(
            format!("{}", PrettyPrinter::<RawOptions>::new("", &bytes)),
            "OPTION_IA_NA -> IAID=1 T1=3600 T2=5400\n\
             \\ OPTION_IAADDR -> 2001:db8::10 pltime=7200 vltime=10800\n\
             \x20 \\ OPTION_STATUS_CODE -> success(msg='all ok')\n\
             OPTION_RAPID_COMMIT -> []\n"
        );
    }

    #[test]
    fn test_print_error() {
        // The Rapid Commit header is cut short.
        assert_eq!(
            format!("{}", PrettyPrinter::<RawOptions>::new("", &IA_NA_BYTES)),
            "OPTION_IA_NA -> IAID=1 T1=3600 T2=5400\n\
             \\ OPTION_IAADDR -> 2001:db8::10 pltime=7200 vltime=10800\n\
             \x20 \\ OPTION_STATUS_CODE -> success(msg='all ok')\n\
             (truncated option header (2 of 4 octets))\n"
        );
    }
}
