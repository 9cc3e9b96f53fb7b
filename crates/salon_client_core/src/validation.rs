//! Brazilian document checks run before a settings form is submitted: CPF (individuals),
//! CNPJ (companies) and CEP (postal code).

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    Cpf,
    Cnpj,
}

pub fn only_digits(s: &str) -> Vec<u32> {
    s.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

fn cpf_check_digit(digits: &[u32]) -> u32 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight_start - i as u32))
        .sum();
    (sum * 10) % 11 % 10
}

pub fn is_valid_cpf(s: &str) -> bool {
    let d = only_digits(s);
    if d.len() != 11 || all_same(&d) {
        return false;
    }
    cpf_check_digit(&d[..9]) == d[9] && cpf_check_digit(&d[..10]) == d[10]
}

fn cnpj_check_digit(digits: &[u32]) -> u32 {
    const WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    let weights = &WEIGHTS[WEIGHTS.len() - digits.len()..];
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

pub fn is_valid_cnpj(s: &str) -> bool {
    let d = only_digits(s);
    if d.len() != 14 || all_same(&d) {
        return false;
    }
    cnpj_check_digit(&d[..12]) == d[12] && cnpj_check_digit(&d[..13]) == d[13]
}

/// Picks CPF or CNPJ by digit count and checks it.
pub fn validate_document(s: &str) -> Result<DocumentKind, ApiError> {
    let n = only_digits(s).len();
    match n {
        11 if is_valid_cpf(s) => Ok(DocumentKind::Cpf),
        11 => Err(ApiError::InvalidInput("CPF inválido".to_string())),
        14 if is_valid_cnpj(s) => Ok(DocumentKind::Cnpj),
        14 => Err(ApiError::InvalidInput("CNPJ inválido".to_string())),
        _ => Err(ApiError::InvalidInput(
            "Documento deve ter 11 (CPF) ou 14 (CNPJ) dígitos".to_string(),
        )),
    }
}

/// Eight digits, punctuation stripped.
pub fn normalize_cep(s: &str) -> Result<String, ApiError> {
    let d = only_digits(s);
    if d.len() != 8 || s.chars().any(|c| c.is_alphabetic()) {
        return Err(ApiError::InvalidInput("CEP deve ter 8 dígitos".to_string()));
    }
    Ok(d.iter().map(|n| char::from_digit(*n, 10).unwrap_or('0')).collect())
}

fn mask(s: &str, expected: usize, pattern: &str) -> Option<String> {
    let d = only_digits(s);
    if d.len() != expected {
        return None;
    }
    let mut digits = d.into_iter();
    Some(
        pattern
            .chars()
            .map(|c| {
                if c == '#' {
                    digits.next().and_then(|n| char::from_digit(n, 10)).unwrap_or('0')
                } else {
                    c
                }
            })
            .collect(),
    )
}

pub fn format_cpf(s: &str) -> Option<String> {
    mask(s, 11, "###.###.###-##")
}

pub fn format_cnpj(s: &str) -> Option<String> {
    mask(s, 14, "##.###.###/####-##")
}

pub fn format_cep(s: &str) -> Option<String> {
    mask(s, 8, "#####-###")
}
