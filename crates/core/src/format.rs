//! Display formatting for the dashboard frontend: rupee amounts with
//! Indian digit grouping, signed percentages, plain grouped numbers.

/// Format an amount as a ₹-prefixed string with Indian digit grouping
/// and up to two decimal places (trailing zeros trimmed).
#[must_use]
pub fn format_currency(amount: f64) -> String {
    format!("₹{}", format_number(amount))
}

/// Format a percentage with a leading sign and two decimals,
/// e.g. `+6.67%` / `-3.20%`.
#[must_use]
pub fn format_percentage(percentage: f64) -> String {
    if percentage >= 0.0 {
        format!("+{percentage:.2}%")
    } else {
        format!("{percentage:.2}%")
    }
}

/// Format a number with Indian digit grouping (last three digits, then
/// groups of two: 1234567.5 → "12,34,567.5"). Rounded to two decimals,
/// trailing zeros trimmed.
#[must_use]
pub fn format_number(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = (value.abs() * 100.0).round() / 100.0;

    let integral = rounded.trunc() as u64;
    let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let mut out = group_indian(&integral.to_string());
    if cents > 0 {
        if cents % 10 == 0 {
            out.push_str(&format!(".{}", cents / 10));
        } else {
            out.push_str(&format!(".{cents:02}"));
        }
    }

    if negative {
        format!("-{out}")
    } else {
        out
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
