use chrono::{DateTime, Utc};
use rand::Rng;

/// Prefix of every generated order number.
pub const ORDER_NUMBER_PREFIX: &str = "ORD-";

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 4;

/// Formats `n` in base 36 using lowercase digits.
pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Builds an order number from a timestamp and a random source.
///
/// Format: `ORD-` + base36(unix millis) + four random base36 characters,
/// uppercased.
pub fn order_number_at<R: Rng + ?Sized>(at: DateTime<Utc>, rng: &mut R) -> String {
    let millis = u64::try_from(at.timestamp_millis()).unwrap_or(0);
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();

    format!("{ORDER_NUMBER_PREFIX}{}{suffix}", to_base36(millis)).to_uppercase()
}

/// Generates an order number for the current instant.
///
/// Numbers are not guaranteed unique; the store enforces uniqueness and
/// callers retry on collision.
pub fn generate_order_number() -> String {
    order_number_at(Utc::now(), &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn test_order_number_format() {
        let at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let number = order_number_at(at, &mut rng);

        assert!(number.starts_with("ORD-LOYW3V28"));
        assert_eq!(number.len(), "ORD-".len() + 8 + SUFFIX_LEN);
        assert!(number[4..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generated_numbers_use_prefix() {
        let number = generate_order_number();
        assert!(number.starts_with(ORDER_NUMBER_PREFIX));
        assert_eq!(number, number.to_uppercase());
    }
}
