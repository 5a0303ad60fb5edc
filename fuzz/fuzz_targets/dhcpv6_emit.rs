#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use dhcpv6_options::wire::{
    emit_options, DecodeFn, Decoder, Dhcpv6OptionCode, Dhcpv6OptionRepr, Dhcpv6OptionWriter,
};

#[derive(Debug, Arbitrary)]
struct RawOption {
    code: u16,
    data: Vec<u8>,
}

#[derive(Debug, Arbitrary)]
struct Input {
    options: Vec<RawOption>,
    buffer_len: u16,
}

fuzz_target!(|input: Input| {
    // Only codes without a name take the generic path for any payload.
    let raw: Vec<&RawOption> = input
        .options
        .iter()
        .filter(|opt| matches!(Dhcpv6OptionCode::from(opt.code), Dhcpv6OptionCode::Unknown(_)))
        .collect();
    let options: Vec<Dhcpv6OptionRepr> = raw
        .iter()
        .map(|opt| Dhcpv6OptionRepr::Unknown {
            code: Dhcpv6OptionCode::from(opt.code),
            data: &opt.data,
        })
        .collect();

    let bytes = match emit_options(&options) {
        Ok(bytes) => bytes,
        Err(_) => return,
    };
    assert_eq!(
        bytes.len(),
        raw.iter().map(|opt| 4 + opt.data.len()).sum::<usize>()
    );

    let mut slots: [Option<(u16, DecodeFn)>; 0] = [];
    let decoder = Decoder::new(&mut slots[..]);
    let decoded = decoder
        .decode_all(&bytes)
        .expect("emitted options must decode");
    assert_eq!(decoded, options);

    let mut buffer = vec![0u8; input.buffer_len as usize];
    let mut writer = Dhcpv6OptionWriter::new(&mut buffer);
    for repr in &options {
        if writer.emit(repr).is_err() {
            break;
        }
    }
});
