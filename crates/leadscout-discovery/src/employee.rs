//! Company-size text parsing.

/// Parse a company-size string into an employee count.
///
/// Rules, first match wins:
/// 1. A `-` range (`"51-200 employees"`) yields the upper bound.
/// 2. A `+` suffix (`"10,000+ employees"`) yields the number before it.
/// 3. Otherwise every digit in the text is concatenated (`"about 75 staff"` → 75).
///
/// Thousands separators are ignored. Empty or digit-free text returns `None`.
#[must_use]
pub fn parse_employee_count(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.contains('-') {
        let mut parts = text.split('-');
        let (Some(_lower), Some(upper), None) = (parts.next(), parts.next(), parts.next()) else {
            return None;
        };
        let upper = upper.split_whitespace().next()?;
        return parse_number(upper);
    }

    if let Some((prefix, _)) = text.split_once('+') {
        return parse_number(prefix.trim());
    }

    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u64>().ok()
}

fn parse_number(raw: &str) -> Option<u64> {
    raw.replace(',', "").parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_returns_upper_bound() {
        assert_eq!(parse_employee_count("51-200 employees"), Some(200));
    }

    #[test]
    fn range_with_separators_returns_upper_bound() {
        assert_eq!(parse_employee_count("1,001-5,000 employees"), Some(5000));
    }

    #[test]
    fn plus_suffix_returns_prefix() {
        assert_eq!(parse_employee_count("10,000+ employees"), Some(10_000));
        assert_eq!(parse_employee_count("10000+ employees"), Some(10_000));
    }

    #[test]
    fn plain_text_concatenates_digits() {
        assert_eq!(parse_employee_count("about 75 staff"), Some(75));
    }

    #[test]
    fn not_applicable_is_absent() {
        assert_eq!(parse_employee_count("N/A"), None);
    }

    #[test]
    fn empty_is_absent() {
        assert_eq!(parse_employee_count(""), None);
        assert_eq!(parse_employee_count("   "), None);
    }

    #[test]
    fn malformed_range_is_absent() {
        assert_eq!(parse_employee_count("1-2-3 employees"), None);
        assert_eq!(parse_employee_count("51-many"), None);
    }
}
