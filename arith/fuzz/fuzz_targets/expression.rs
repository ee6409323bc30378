#![no_main]
use libarith::{canonicalize, evaluate_str, Rational};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: String| {
    let _ = evaluate_str(&text);
    if let Ok(canonical) = canonicalize(&text) {
        // Canonical forms of long expressions may exceed the token limit.
        if let Ok(again) = canonicalize(&canonical) {
            assert_eq!(again, canonical);
        }
    }
    if let Ok(num) = text.parse::<Rational>() {
        assert_eq!(num.to_string().parse::<Rational>(), Ok(num));
    }
});
