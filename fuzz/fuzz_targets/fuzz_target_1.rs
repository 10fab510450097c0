#![no_main]
use fastdiv::Reciprocal;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|items: Vec<u32>| {
    let d = match items.first() {
        Some(&d) => d,
        None => return,
    };
    macro_rules! run {
        ($num_type:ty) => {{
            let d = d as $num_type;
            if let Ok(reciprocal) = Reciprocal::new(d) {
                assert_eq!(reciprocal.divisor(), d);
                for item in items.iter() {
                    let item = *item as $num_type;
                    assert_eq!(reciprocal.quotient(item), item / d, "{} {} / {}", stringify!($num_type), item, d);
                    assert_eq!(reciprocal.remainder(item), item % d, "{} {} % {}", stringify!($num_type), item, d);
                    assert_eq!(reciprocal.quotient_and_remainder(item), (item / d, item % d));
                    assert_eq!(reciprocal.is_divisible(item), item % d == 0);
                }
            } else {
                assert_eq!(d, 0);
            }
        }};
    }
    run!(u8);
    run!(u16);
    run!(u32);
});
