//! Mission code: a short shareable digest of a finished run

/// Hash `"{kills}{seconds}xAI"` into an uppercase hex code.
///
/// Rolling 31x hash over UTF-16 code units with 32-bit signed wraparound,
/// then the absolute value. `i32::MIN` has no positive counterpart in 32
/// bits, so the magnitude is taken in 64 bits.
pub fn mission_code(kills: u32, seconds: u64) -> String {
    let text = format!("{kills}{seconds}xAI");
    let hash = text.encode_utf16().fold(0i32, |hash, unit| {
        (hash << 5).wrapping_sub(hash).wrapping_add(unit as i32)
    });
    format!("{:X}", (hash as i64).unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_codes() {
        // "00xAI": 48,48,120,65,73
        assert_eq!(mission_code(0, 0), "2BC04A0");
        assert_eq!(mission_code(5, 42), "5D66244D");
    }

    #[test]
    fn test_arguments_change_code() {
        let base = mission_code(5, 42);
        assert_ne!(base, mission_code(6, 42));
        assert_ne!(base, mission_code(5, 43));
    }

    #[test]
    fn test_uppercase_hex_only() {
        let code = mission_code(1234, 98765);
        assert!(!code.is_empty());
        assert!(code.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    proptest! {
        #[test]
        fn prop_deterministic(kills in 0u32..100_000, seconds in 0u64..1_000_000) {
            prop_assert_eq!(mission_code(kills, seconds), mission_code(kills, seconds));
        }

        #[test]
        fn prop_fits_32_bits(kills in any::<u32>(), seconds in any::<u64>()) {
            let value = u64::from_str_radix(&mission_code(kills, seconds), 16).unwrap();
            prop_assert!(value <= 1 << 31);
        }
    }
}
