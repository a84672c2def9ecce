use chrono::NaiveDate;

/// Formats an amount the way the invoice tables display it: grouped
/// thousands, comma decimal separator, "zł" suffix.
pub fn format_pln(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{},{:02} zł", sign, grouped, fraction)
}

pub fn format_date(value: &str) -> String {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => value.to_string(),
    }
}

/// Case-insensitive substring match used by the client-side list filters.
pub fn matches_search(haystack: &str, needle: &str) -> bool {
    if needle.trim().is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_pln_groups_thousands_and_uses_comma() {
        assert_eq!(format_pln(0.0), "0,00 zł");
        assert_eq!(format_pln(9.5), "9,50 zł");
        assert_eq!(format_pln(1234.56), "1 234,56 zł");
        assert_eq!(format_pln(1_234_567.89), "1 234 567,89 zł");
        assert_eq!(format_pln(-42.0), "-42,00 zł");
    }

    #[test]
    fn format_date_renders_polish_order() {
        assert_eq!(format_date("2026-01-31"), "31.01.2026");
        assert_eq!(format_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn matches_search_is_case_insensitive_and_trims() {
        assert!(matches_search("Biuro Rachunkowe ALFA", "alfa"));
        assert!(matches_search("Biuro Rachunkowe ALFA", "  Rachunkowe "));
        assert!(matches_search("anything", ""));
        assert!(!matches_search("Biuro", "beta"));
    }
}
