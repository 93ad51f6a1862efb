//! CPF (Brazilian individual taxpayer id) cleaning, validation and display.
//!
//! The canonical form of a CPF is exactly 11 ASCII digits. The masked
//! `###.###.###-##` form produced by [`format`] is a display projection only
//! and is never stored.

/// Number of digits in a canonical CPF.
pub const TAX_ID_LENGTH: usize = 11;

/// Strips every non-digit character from `raw`.
///
/// # Examples
///
/// ```
/// use rep_p_toolkit::models::tax_id;
///
/// assert_eq!(tax_id::clean("529.982.247-25"), "52998224725");
/// assert_eq!(tax_id::clean("abc"), "");
/// ```
pub fn clean(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Returns true if `raw` is a valid CPF once cleaned.
///
/// Rejects anything that is not 11 digits after cleaning, any run of a single
/// repeated digit, and any value whose two mod-11 check digits do not match.
/// Malformed input returns `false`; it never panics.
///
/// # Examples
///
/// ```
/// use rep_p_toolkit::models::tax_id;
///
/// assert!(tax_id::is_valid("529.982.247-25"));
/// assert!(!tax_id::is_valid("111.111.111-11"));
/// assert!(!tax_id::is_valid("12345"));
/// ```
pub fn is_valid(raw: &str) -> bool {
    let digits: Vec<u32> = clean(raw).chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != TAX_ID_LENGTH || digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Computes the check digit over `digits`, weighting the first digit with
/// `len + 1` and the last with 2.
fn check_digit(digits: &[u32]) -> u32 {
    let top_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(index, digit)| digit * (top_weight - index as u32))
        .sum();

    match (sum * 10) % 11 {
        10 | 11 => 0,
        remainder => remainder,
    }
}

/// Renders an 11-character CPF as `###.###.###-##`.
///
/// Input of any other length is returned unchanged.
///
/// # Examples
///
/// ```
/// use rep_p_toolkit::models::tax_id;
///
/// assert_eq!(tax_id::format("52998224725"), "529.982.247-25");
/// assert_eq!(tax_id::format("123"), "123");
/// ```
pub fn format(cpf: &str) -> String {
    if cpf.chars().count() != TAX_ID_LENGTH || !cpf.is_ascii() {
        return cpf.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &cpf[0..3],
        &cpf[3..6],
        &cpf[6..9],
        &cpf[9..11]
    )
}
