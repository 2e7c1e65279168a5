/// Parse a compact duration token like `30s`, `10m`, `2h`, or `1d` into
/// seconds. Plain digits are taken as seconds. Returns `None` for anything
/// unparseable and for zero durations.
pub fn parse_duration_seconds(raw: &str) -> Option<u64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let digits_end = value
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(value.len());
    let (number_part, unit_part) = value.split_at(digits_end);

    let number = number_part.parse::<u64>().ok()?;

    let multiplier = match unit_part.trim() {
        "" | "s" | "S" => 1_u64,
        "m" | "M" => 60,
        "h" | "H" => 60 * 60,
        "d" | "D" => 60 * 60 * 24,
        _ => return None,
    };

    let total = number.checked_mul(multiplier)?;
    if total == 0 { None } else { Some(total) }
}

#[cfg(test)]
mod tests {
    use super::parse_duration_seconds;

    #[test]
    fn parses_unit_suffixes() {
        assert_eq!(parse_duration_seconds("30s"), Some(30));
        assert_eq!(parse_duration_seconds("1m"), Some(60));
        assert_eq!(parse_duration_seconds("10m"), Some(600));
        assert_eq!(parse_duration_seconds("1h"), Some(3_600));
        assert_eq!(parse_duration_seconds("2d"), Some(172_800));
    }

    #[test]
    fn parses_bare_seconds() {
        assert_eq!(parse_duration_seconds("45"), Some(45));
        assert_eq!(parse_duration_seconds(" 90 "), Some(90));
    }

    #[test]
    fn rejects_invalid_input() {
        assert_eq!(parse_duration_seconds(""), None);
        assert_eq!(parse_duration_seconds("0"), None);
        assert_eq!(parse_duration_seconds("0m"), None);
        assert_eq!(parse_duration_seconds("m"), None);
        assert_eq!(parse_duration_seconds("10w"), None);
        assert_eq!(parse_duration_seconds("ten minutes"), None);
    }
}
