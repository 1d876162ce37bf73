//! LaTeX text helpers: escaping and number formatting

/// Escape characters with a special meaning in LaTeX text mode.
pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("\\&"),
            '%' => escaped.push_str("\\%"),
            '$' => escaped.push_str("\\$"),
            '#' => escaped.push_str("\\#"),
            '_' => escaped.push_str("\\_"),
            '{' => escaped.push_str("\\{"),
            '}' => escaped.push_str("\\}"),
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\^{}"),
            '\\' => escaped.push_str("\\textbackslash{}"),
            '\n' => escaped.push_str("\\newline%\n"),
            '-' => escaped.push_str("{-}"),
            '\u{a0}' => escaped.push('~'),
            '[' => escaped.push_str("{[}"),
            ']' => escaped.push_str("{]}"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format `value` with `sig` significant digits, `%g` style.
///
/// Values whose magnitude is below `atol` print as `0`. Trailing zeros are
/// dropped; very large or small magnitudes switch to exponent notation.
pub fn format_sig(value: f64, sig: usize, atol: Option<f64>) -> String {
    let sig = sig.max(1);
    let value = match atol {
        Some(tol) if value.abs() < tol => 0.0,
        _ => value,
    };
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // exponent after rounding to `sig` digits
    let scientific = format!("{:.*e}", sig - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    if exponent < -4 || exponent >= sig as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (sig as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value))
    }
}

fn trim_fraction(number: &str) -> String {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        number.to_string()
    }
}
