use rand::Rng;

/// Generates a 6-digit challenge code, uniform over 000000-999999.
///
/// This is a short-lived, low-value secret gating a blog submission, not a
/// security token; a plain thread-local RNG is enough.
pub fn generate_code() -> String {
    format!("{:06}", rand::rng().random_range(0..1_000_000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_six_ascii_digits() {
        for _ in 0..1000 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()), "bad code {}", code);
        }
    }

    #[test]
    fn small_values_are_zero_padded() {
        assert_eq!(format!("{:06}", 7), "000007");
        assert_eq!(format!("{:06}", 999_999), "999999");
    }
}
