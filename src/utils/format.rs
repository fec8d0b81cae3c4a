use std::cmp::Ordering;

/// Case-insensitive string ordering without allocating lowercase
/// copies. Ties on the folded form fall back to the raw byte order so
/// the ordering stays total.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().flat_map(char::to_lowercase);
    let mut cb = b.chars().flat_map(char::to_lowercase);
    loop {
        match (ca.next(), cb.next()) {
            (Some(x), Some(y)) => match x.cmp(&y) {
                Ordering::Equal => continue,
                other => return other,
            },
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return a.cmp(b),
        }
    }
}

/// Case-insensitive substring check.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmp_ignore_case() {
        assert_eq!(cmp_ignore_case("alice", "ALICE"), Ordering::Greater); // folded tie, byte order
        assert_eq!(cmp_ignore_case("Bob", "alice"), Ordering::Greater);
        assert_eq!(cmp_ignore_case("alice", "bob"), Ordering::Less);
        assert_eq!(cmp_ignore_case("", "a"), Ordering::Less);
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Bob Smith", "bob"));
        assert!(contains_ignore_case("bob@example.com", "BOB"));
        assert!(!contains_ignore_case("Alice", "bob"));
        assert!(contains_ignore_case("anything", ""));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello World", 8), "Hello...");
        assert_eq!(truncate("Hi", 2), "Hi");
    }
}
