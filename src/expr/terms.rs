//! Single-variable polynomial terms: raw term strings, like-term collection
//! and canonical rendering.
//!
//! A raw term string is a sequence of additive terms such as
//! `1*s^2+-3*s^1+0.5`. Each term is an optional sign, a coefficient and
//! optionally `*` followed by the variable and a `^power` suffix. The
//! symbolic evaluator builds these; [`simplify`] turns them into the
//! canonical form, e.g. `s^2 - 3*s + 0.5`.

use std::collections::BTreeMap;

use super::error::ExprError;

/// `(power, coefficient)`
pub type Monomial = (i32, f64);

/// Split an expression into additive terms at top-level `+`/`-`.
///
/// A `-` that starts a term stays with it; a sign that directly follows
/// `^ * / + - (` or a numeric exponent marker belongs to the current term.
/// Whitespace is ignored.
pub fn break_apart_terms(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    let mut terms = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if (c == '+' || c == '-') && i > 0 && starts_new_term(&chars[..i]) {
            if !current.is_empty() {
                terms.push(std::mem::take(&mut current));
            }
            if c == '+' {
                continue;
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        terms.push(current);
    }
    terms
}

fn starts_new_term(before: &[char]) -> bool {
    match before {
        [.., '^' | '*' | '/' | '+' | '-' | '('] => false,
        [.., d, 'e' | 'E'] if d.is_ascii_digit() || *d == '.' => false,
        _ => true,
    }
}

/// Extract `(power, coefficient)` from every term.
pub fn find_powers_and_coefficients(terms: &[String], variable: char) -> Result<Vec<Monomial>, String> {
    terms
        .iter()
        .map(|t| parse_term(t, variable).map_err(|e| e.to_string()))
        .collect()
}

pub(crate) fn parse_term(term: &str, variable: char) -> Result<Monomial, ExprError> {
    let malformed = || ExprError::MalformedTerm(term.to_string());
    let body: String = term.chars().filter(|c| !c.is_whitespace()).collect();

    let mut sign = 1.0;
    let mut rest = body.as_str();
    loop {
        if let Some(r) = rest.strip_prefix('-') {
            sign = -sign;
            rest = r;
        } else if let Some(r) = rest.strip_prefix('+') {
            rest = r;
        } else {
            break;
        }
    }

    let (coefficient, variable_part) = if let Some((c, v)) = rest.split_once('*') {
        (c, Some(v))
    } else if rest.parse::<f64>().is_ok() {
        (rest, None)
    } else if let Some(pos) = rest.find(variable) {
        (&rest[..pos], Some(&rest[pos..]))
    } else {
        return Err(malformed());
    };

    let coefficient = if coefficient.is_empty() {
        1.0
    } else {
        coefficient.parse::<f64>().map_err(|_| malformed())?
    };

    let power = match variable_part {
        None => 0,
        Some(v) => {
            let suffix = v.strip_prefix(variable).ok_or_else(malformed)?;
            if suffix.is_empty() {
                1
            } else {
                let exponent = suffix.strip_prefix('^').ok_or_else(malformed)?;
                exponent.parse::<i32>().map_err(|_| malformed())?
            }
        }
    };
    Ok((power, sign * coefficient))
}

/// Parse a raw term string into its monomials, in source order.
pub(crate) fn parse_raw(raw: &str, variable: char) -> Result<Vec<Monomial>, ExprError> {
    break_apart_terms(raw)
        .iter()
        .map(|t| parse_term(t, variable))
        .collect()
}

/// Raw (lossless) rendering of monomials, joined with `+`.
pub(crate) fn to_raw(monomials: &[Monomial], variable: char) -> String {
    if monomials.is_empty() {
        return "0".to_string();
    }
    monomials
        .iter()
        .map(|&(power, coefficient)| {
            if power == 0 {
                format!("{coefficient}")
            } else {
                format!("{coefficient}*{variable}^{power}")
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}

/// Sum coefficients of equal powers and drop the ones that cancel.
/// Output is ordered by descending power.
pub fn collect_like_terms(monomials: &[Monomial]) -> Vec<Monomial> {
    let mut by_power: BTreeMap<i32, f64> = BTreeMap::new();
    for &(power, coefficient) in monomials {
        *by_power.entry(power).or_insert(0.0) += coefficient;
    }
    by_power
        .into_iter()
        .rev()
        .filter(|&(_, c)| c != 0.0)
        .collect()
}

/// Round to `precision` significant digits.
pub fn round_significant(value: f64, precision: usize) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let digits = precision.clamp(1, 17);
    format!("{:.*e}", digits - 1, value)
        .parse()
        .unwrap_or(value)
}

/// Format a coefficient with `precision` significant digits, trailing
/// zeros trimmed.
pub fn format_number(value: f64, precision: usize) -> String {
    let rounded = round_significant(value, precision);
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}

/// Render collected monomials (descending power, non-zero coefficients).
pub fn render_polynomial(monomials: &[Monomial], variable: char, precision: usize) -> String {
    if monomials.is_empty() {
        return "0".to_string();
    }
    let mut out = String::new();
    for (i, &(power, coefficient)) in monomials.iter().enumerate() {
        let negative = coefficient < 0.0;
        match (i, negative) {
            (0, true) => out.push('-'),
            (0, false) => {}
            (_, true) => out.push_str(" - "),
            (_, false) => out.push_str(" + "),
        }
        let magnitude = round_significant(coefficient.abs(), precision);
        let variable_part = match power {
            0 => None,
            1 => Some(variable.to_string()),
            p => Some(format!("{variable}^{p}")),
        };
        match variable_part {
            None => out.push_str(&format_number(magnitude, precision)),
            Some(v) if magnitude == 1.0 => out.push_str(&v),
            Some(v) => {
                out.push_str(&format_number(magnitude, precision));
                out.push('*');
                out.push_str(&v);
            }
        }
    }
    out
}

/// Relative size below which a sum of coefficients is rounding noise.
const CANCELLATION_TOLERANCE: f64 = 8.0 * f64::EPSILON;

/// Like [`collect_like_terms`], but sums that cancel up to floating-point
/// noise are dropped and the rest are rounded to `precision` significant
/// digits.
pub(crate) fn collect_rounded(monomials: &[Monomial], precision: usize) -> Vec<Monomial> {
    let mut by_power: BTreeMap<i32, (f64, f64)> = BTreeMap::new();
    for &(power, coefficient) in monomials {
        let (sum, scale) = by_power.entry(power).or_insert((0.0, 0.0));
        *sum += coefficient;
        *scale += coefficient.abs();
    }
    by_power
        .into_iter()
        .rev()
        .filter(|&(_, (sum, scale))| !sum.is_finite() || sum.abs() > scale * CANCELLATION_TOLERANCE)
        .map(|(power, (sum, _))| (power, round_significant(sum, precision)))
        .filter(|&(_, c)| c != 0.0)
        .collect()
}

/// Canonical polynomial for a raw term string.
pub(crate) fn simplify(raw: &str, variable: char, precision: usize) -> Result<String, ExprError> {
    let monomials = parse_raw(raw, variable)?;
    Ok(render_polynomial(&collect_rounded(&monomials, precision), variable, precision))
}
