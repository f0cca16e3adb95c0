use ndarray::Array1;

/// Number of buckets in a feature vector, one per letter of the ASCII alphabet.
pub const INPUT_SIZE: usize = 26;

/// Converts text into a letter-frequency distribution.
///
/// Each character is case-folded within the ASCII range (`A..=Z` to `a..=z`,
/// no locale rules). Letters increment their bucket, everything else (digits,
/// punctuation, whitespace, non-ASCII) is ignored. The buckets are then divided
/// by the number of letters seen, so the result sums to 1.0.
///
/// Text without a single letter maps to the all-zero vector instead of a
/// vector of NaNs.
///
/// # Example
/// ```
/// use lettermix::features::{extract, INPUT_SIZE};
///
/// let features = extract("Abba!");
/// assert_eq!(features.len(), INPUT_SIZE);
/// assert_eq!(features[0], 0.5);
/// assert_eq!(features[1], 0.5);
/// ```
pub fn extract(text: &str) -> Array1<f32> {
    let mut buckets = Array1::<f32>::zeros(INPUT_SIZE);
    let mut letters = 0usize;

    for c in text.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() {
            buckets[(c as u8 - b'a') as usize] += 1.0;
            letters += 1;
        }
    }

    if letters == 0 {
        return buckets;
    }
    buckets / letters as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    #[test]
    fn test_letters_only_sum_to_one() {
        for text in ["abc", "thequickbrownfox", "zzzz", "LeRenardBrun", "x"] {
            let features = extract(text);
            let sum: f32 = features.sum();
            assert!((sum - 1.0).abs() < TOLERANCE, "sum for {:?} was {}", text, sum);
            assert!(features.iter().all(|&f| (0.0..=1.0).contains(&f)));
        }
    }

    #[test]
    fn test_no_letters_is_zero_vector() {
        for text in ["", "   ", "1234", "!?.,;", "\t\r\n", "éàü"] {
            let features = extract(text);
            assert_eq!(features, Array1::<f32>::zeros(INPUT_SIZE), "text {:?}", text);
        }
    }

    #[test]
    fn test_non_ascii_letters_ignored() {
        assert_eq!(extract("élan"), extract("lan"));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(extract("ABC"), extract("abc"));
        assert_eq!(extract("Hello World"), extract("hello world"));
    }

    #[test]
    fn test_non_letters_ignored() {
        assert_eq!(extract("a-b, c!"), extract("abc"));
        assert_eq!(extract("the 3 lazy dogs"), extract("thelazydogs"));
    }

    #[test]
    fn test_bucket_values() {
        let features = extract("aab");
        assert!((features[0] - 2.0 / 3.0).abs() < TOLERANCE);
        assert!((features[1] - 1.0 / 3.0).abs() < TOLERANCE);
        assert_eq!(features[25], 0.0);
    }
}
