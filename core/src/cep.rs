//! CEP (Brazilian postal code) format checks.
//!
//! A CEP is valid when, after removing every `-`, exactly eight ASCII digits
//! remain. These functions need no client and never touch the network.

/// Return the 8-digit normalized form of `input`, or `None` if it is not a
/// well-formed CEP.
pub fn normalize_cep(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(|c| *c != '-').collect();
    if digits.len() == 8 && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}

/// Check whether `input` is a syntactically valid CEP.
///
/// Hyphens are ignored wherever they appear, so `"01001-000"` and
/// `"01001000"` are both accepted.
pub fn is_valid_cep(input: &str) -> bool {
    normalize_cep(input).is_some()
}

/// Render a CEP in its display form, `XXXXX-XXX`.
pub fn format_cep(input: &str) -> Option<String> {
    normalize_cep(input).map(|digits| format!("{}-{}", &digits[..5], &digits[5..]))
}
