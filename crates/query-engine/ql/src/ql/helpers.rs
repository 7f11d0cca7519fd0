//! Helpers for building ql::ast values in certain shapes and patterns.

use super::ast::{OrderBy, Predicate, Projection};

// Empty clauses //

/// A `select` that keeps every field.
pub fn empty_select() -> Vec<Projection> {
    vec![]
}

/// A `where` that keeps every record.
pub fn empty_where() -> Vec<Predicate> {
    vec![]
}

/// An `order by` that keeps the backend's natural order.
pub fn empty_order_by() -> Vec<OrderBy> {
    vec![]
}

// Patterns //

/// Translate a `like` pattern into a regular expression.
///
/// `%` matches any run of characters and `_` matches exactly one. Neither
/// crosses a line break. The expression is anchored at each end unless the
/// pattern starts or ends with `%`, so `a%b` matches `axb` but not `xaxbx`.
/// Everything else matches literally.
pub fn like_to_regex(pattern: &str) -> String {
    let (open_start, body) = match pattern.strip_prefix('%') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    };
    let (open_end, body) = match body.strip_suffix('%') {
        Some(rest) => (true, rest),
        None => (false, body),
    };

    let mut expression = String::new();
    if !open_start {
        expression.push('^');
    }

    let mut literal = String::new();
    for c in body.chars() {
        match c {
            '%' | '_' => {
                expression.push_str(&regex::escape(&literal));
                literal.clear();
                expression.push_str(if c == '%' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    expression.push_str(&regex::escape(&literal));

    if !open_end {
        expression.push('$');
    }
    expression
}

#[cfg(test)]
mod tests {
    use super::like_to_regex;

    #[test]
    fn like_patterns_anchor_unless_open() {
        assert_eq!(like_to_regex("Bill"), "^Bill$");
        assert_eq!(like_to_regex("Bi%"), "^Bi");
        assert_eq!(like_to_regex("%ll"), "ll$");
        assert_eq!(like_to_regex("%i%"), "i");
    }

    #[test]
    fn like_matches_the_whole_value_unless_open() {
        let inner = regex::Regex::new(&like_to_regex("a%b")).unwrap();
        assert!(inner.is_match("axxb"));
        assert!(!inner.is_match("xaxbx"));
        assert!(!inner.is_match("a\nb"));

        let open = regex::Regex::new(&like_to_regex("%a%b%")).unwrap();
        assert!(open.is_match("xaxbx"));
    }

    #[test]
    fn like_wildcards_inside_the_pattern() {
        assert_eq!(like_to_regex("B_ll"), "^B.ll$");
        assert_eq!(like_to_regex("a%z"), "^a.*z$");
    }

    #[test]
    fn like_escapes_regex_syntax() {
        assert_eq!(like_to_regex("a.b*c+$%"), r"^a\.b\*c\+\$");
    }
}
