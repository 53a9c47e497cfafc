#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    beachline::arbitrary::arbtests::compute(&mut Unstructured::new(data)).unwrap();
});
