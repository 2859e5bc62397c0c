#![no_main]
use libfuzzer_sys::fuzz_target;
use rhuff::build_code;

fuzz_target!(|data: (Vec<u16>, u8)| {
    let (weights, radix) = data;
    let radix = radix as usize + 2; // 2 to 257

    if weights.is_empty() || weights.len() > 2048 {
        return;
    }

    let symbols = weights
        .iter()
        .enumerate()
        .map(|(i, &w)| (format!("s{i}"), w as f64 + 1.0));
    let table = build_code(symbols, radix).unwrap();

    assert_eq!(table.len(), weights.len());
    assert!(table.is_prefix_free());
    for (_, code) in table.iter() {
        assert!(code.digits().iter().all(|&d| (d as usize) < radix));
    }
});
