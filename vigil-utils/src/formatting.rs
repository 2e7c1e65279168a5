/// Format seconds into a compact human-readable duration (e.g. `59s`,
/// `1m 30s`, `1h 5m`, `1d 2h`). At most the two largest units are shown.
pub fn format_compact_duration(total_seconds: u64) -> String {
    const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

    let mut remaining = total_seconds;
    let mut parts = Vec::new();
    for (size, suffix) in UNITS {
        let amount = remaining / size;
        remaining %= size;
        if amount > 0 {
            parts.push(format!("{}{}", amount, suffix));
        }
    }

    if parts.is_empty() {
        return "0s".to_owned();
    }

    parts.truncate(2);
    parts.join(" ")
}

/// Split a comma-separated contact string into trimmed, non-empty entries.
pub fn split_contacts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Render a list of mobile numbers as chat @-mentions (`@123 @456`).
pub fn format_mentions(mobiles: &[String]) -> String {
    mobiles
        .iter()
        .map(|mobile| format!("@{}", mobile))
        .collect::<Vec<_>>()
        .join(" ")
}
