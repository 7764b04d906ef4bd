//! Datagram fuzz target: feed arbitrary bytes to the datagram decoder.
//! Decoding must not panic; every byte range ends up decoded or rejected.
//! Build with: cargo fuzz run datagram_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let codec = dispdu::PduCodec::default();
    let result = codec.decode_datagram(data);
    let mut pdus: Vec<dispdu::Pdu> = result.pdus.into_iter().map(|d| d.pdu).collect();
    // Anything that decoded re-encodes.
    let _ = codec.encode_datagram(&mut pdus);
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run datagram_fuzz");
}
