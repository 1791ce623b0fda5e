//! Directive comment parsing
//!
//! Recognizes `<!-- ... -->` markup comments, extracts their bodies, and
//! parses the comma-separated rule id list that may follow a directive
//! keyword.
//!
//! # Directive Format
//!
//! ```markdown
//! <!-- disable-next-line -->
//! This paragraph is not reported by any rule.
//!
//! <!-- disable-next-line no-todo, report-node-types -->
//! This paragraph is not reported by the two named rules.
//! ```

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Non-greedy so adjacent comments match separately; `(?s)` lets bodies span lines.
static HTML_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--(.*?)-->").expect("HTML comment pattern is valid")
});

/// Whitespace around each comma collapses into the comma itself.
static COMMA_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("comma pattern is valid"));

/// Check whether `text` contains at least one complete markup comment
pub fn is_comment(text: &str) -> bool {
    HTML_COMMENT.is_match(text)
}

/// Get the inner text of every markup comment in `text`, left to right
pub fn comment_bodies(text: &str) -> Vec<&str> {
    HTML_COMMENT
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|body| body.as_str())
        .collect()
}

/// Parse a comma-separated list into the set of distinct, non-empty identifiers
///
/// `"a, b ,c,,d"` yields `{a, b, c, d}`; blank input yields an empty set.
pub fn parse_list_config(text: &str) -> BTreeSet<String> {
    let collapsed = COMMA_SEPARATOR.replace_all(text, ",");
    collapsed
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `"ruleA, ruleB"` into `["ruleA", "ruleB"]` (sorted, deduplicated)
pub fn parse_rule_ids(text: &str) -> Vec<String> {
    parse_list_config(text).into_iter().collect()
}

/// A recognized `disable-next-line` directive
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Directive {
    /// Rules the directive is limited to; empty means every rule
    pub rule_ids: BTreeSet<String>,
}

impl Directive {
    /// Parse a comment body for `keyword`
    ///
    /// Returns `None` if the keyword does not occur in the body. The keyword is
    /// matched as a substring, so text before it is tolerated; everything after
    /// its first occurrence is the rule id list.
    pub fn parse(body: &str, keyword: &str) -> Option<Self> {
        if keyword.is_empty() {
            return None;
        }
        let (_, rest) = body.split_once(keyword)?;
        Some(Self {
            rule_ids: parse_list_config(rest),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_is_comment() {
        assert!(is_comment("<!-- disable-next-line -->"));
        assert!(is_comment("text <!-- a --> more"));
        assert!(is_comment("<!---->"));
        assert!(!is_comment("<div>no comment</div>"));
        assert!(!is_comment("<!-- never closed"));
    }

    #[test]
    fn test_is_comment_multiline() {
        assert!(is_comment("<!--\n disable-next-line\n rule-a\n-->"));
    }

    #[test]
    fn test_comment_bodies_adjacent() {
        let bodies = comment_bodies("<!-- first --><!-- second -->");
        assert_eq!(bodies, vec![" first ", " second "]);
    }

    #[test]
    fn test_comment_bodies_first_close_wins() {
        let bodies = comment_bodies("<!-- a --> b -->");
        assert_eq!(bodies, vec![" a "]);
    }

    #[test]
    fn test_comment_bodies_none() {
        assert!(comment_bodies("plain text").is_empty());
        assert!(comment_bodies("<!-- unclosed").is_empty());
    }

    #[test]
    fn test_comment_bodies_repeatable() {
        let text = "<!-- x --> <!-- y -->";
        assert_eq!(comment_bodies(text), comment_bodies(text));
    }

    #[test]
    fn test_parse_list_config() {
        assert_eq!(parse_list_config("a, b ,c,,d"), set(&["a", "b", "c", "d"]));
        assert_eq!(parse_list_config(",a,,b,"), set(&["a", "b"]));
        assert_eq!(parse_list_config("a, a ,a"), set(&["a"]));
    }

    #[test]
    fn test_parse_list_config_blank() {
        assert!(parse_list_config("").is_empty());
        assert!(parse_list_config(" ").is_empty());
        assert!(parse_list_config(" , ,\n").is_empty());
    }

    #[test]
    fn test_parse_list_config_non_comma_text_is_one_token() {
        assert_eq!(parse_list_config("  no todo  "), set(&["no todo"]));
    }

    #[test]
    fn test_parse_rule_ids_rejoin() {
        let cases = [
            " ruleB ,, ruleA,\t ruleC ,ruleA ",
            ",ruleA",
            "ruleA,",
            ",,ruleA,,ruleB,,",
            "\truleA\t,\truleB\t",
            "ruleA\n,\nruleB\r\n",
            "ruleA, ruleA , ruleA",
            "no-todo , report-node-types",
            "  ",
            "",
            " , \t,\n ",
            "single",
        ];

        for noisy in cases {
            let ids = parse_rule_ids(noisy);
            assert!(ids.iter().all(|id| !id.is_empty()), "case {:?}", noisy);
            let rejoined = ids.join(", ");
            assert_eq!(
                parse_list_config(&rejoined),
                parse_list_config(noisy),
                "case {:?}",
                noisy
            );
        }
    }

    #[test]
    fn test_directive_parse_wildcard() {
        let directive = Directive::parse(" disable-next-line ", "disable-next-line").unwrap();
        assert!(directive.rule_ids.is_empty());
    }

    #[test]
    fn test_directive_parse_rule_ids() {
        let directive =
            Directive::parse(" disable-next-line ruleA, ruleB ", "disable-next-line").unwrap();
        assert_eq!(directive.rule_ids, set(&["ruleA", "ruleB"]));
    }

    #[test]
    fn test_directive_parse_prefixed_keyword() {
        let directive =
            Directive::parse(" textlint-disable-next-line no-todo", "disable-next-line").unwrap();
        assert_eq!(directive.rule_ids, set(&["no-todo"]));
    }

    #[test]
    fn test_directive_parse_custom_keyword() {
        assert!(Directive::parse(" disable-next-line ", "lint-skip").is_none());
        let directive = Directive::parse(" lint-skip a ", "lint-skip").unwrap();
        assert_eq!(directive.rule_ids, set(&["a"]));
    }

    #[test]
    fn test_directive_parse_not_a_directive() {
        assert!(Directive::parse(" just a note ", "disable-next-line").is_none());
        assert!(Directive::parse(" anything ", "").is_none());
    }
}
