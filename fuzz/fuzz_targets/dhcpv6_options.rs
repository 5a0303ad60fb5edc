#![no_main]
use libfuzzer_sys::fuzz_target;

use dhcpv6_options::wire::pretty_print::PrettyPrinter;
use dhcpv6_options::wire::{emit_options, parse_options, Dhcpv6RawOptions};

fuzz_target!(|data: &[u8]| {
    let _ = format!("{}", PrettyPrinter::<Dhcpv6RawOptions>::new("", &data));

    if let Ok(options) = parse_options(data) {
        let bytes = emit_options(&options).expect("decoded options must re-emit");
        assert_eq!(bytes, data);
    }
});
