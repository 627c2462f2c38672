//! CNPJ (Brazilian company registry number) rules.
//!
//! 14 digits: 12 base digits followed by two mod-11 check digits. Input may
//! carry the usual `XX.XXX.XXX/XXXX-XX` punctuation.

const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Strip everything but ASCII digits.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

/// Both check digits for a 12-digit base.
pub(crate) fn check_digits(base: &[u32; 12]) -> (u32, u32) {
    let first = check_digit(base, &FIRST_WEIGHTS);
    let mut with_first = base.to_vec();
    with_first.push(first);
    (first, check_digit(&with_first, &SECOND_WEIGHTS))
}

/// True iff `input` holds a CNPJ with correct check digits.
///
/// Only digits and the `.`, `/`, `-` separators (and surrounding whitespace)
/// are accepted. Sequences of one repeated digit are rejected.
pub fn validate_cnpj(input: &str) -> bool {
    let input = input.trim();
    if input
        .chars()
        .any(|c| !c.is_ascii_digit() && !matches!(c, '.' | '/' | '-'))
    {
        return false;
    }

    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 14 || digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    let mut base = [0u32; 12];
    base.copy_from_slice(&digits[..12]);
    let (first, second) = check_digits(&base);
    digits[12] == first && digits[13] == second
}

/// Render as `XX.XXX.XXX/XXXX-XX`; `None` unless the input has exactly 14 digits.
pub fn format_cnpj(input: &str) -> Option<String> {
    let d = digits_only(input);
    if d.len() != 14 {
        return None;
    }
    Some(format!(
        "{}.{}.{}/{}-{}",
        &d[..2],
        &d[2..5],
        &d[5..8],
        &d[8..12],
        &d[12..]
    ))
}
