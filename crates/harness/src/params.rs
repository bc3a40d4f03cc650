//! Parameter declaration scanning
//!
//! Feature files declare form parameters as structured comment lines:
//!
//! ```text
//! # @param yesno allowDiscount "Allow Discount" (no) Apply a discount?
//! ```
//!
//! Type tag first (optional, defaults to `text`), then the placeholder
//! key, a quoted display name, and a free-text tail. A parenthesized
//! segment in the tail is the default value; the rest is the description.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

/// Type tag assumed when a declaration omits one.
pub const DEFAULT_KIND: &str = "text";

/// One declared parameter. The key matches the `<key>` placeholder token
/// used elsewhere in the feature text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptor {
    pub key: String,
    pub label: String,
    pub kind: String,
    pub default: Option<String>,
    pub description: Option<String>,
    /// Raw declaration line this descriptor was extracted from.
    pub line: String,
}

fn decl_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?m)^[ \t]*#[ \t]*@param\s+(?:(\w+)\s+)?(\w+)\s+"([\w ]+)"[ \t]*(.*)$"#)
            .expect("declaration pattern compiles")
    })
}

fn default_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\(([^)]*)\)").expect("default pattern compiles"))
}

/// Scan feature text for `# @param` declarations.
///
/// Later declarations with a duplicate key overwrite earlier ones. Lines
/// that do not match the grammar are skipped; no declarations yields an
/// empty map.
pub fn parse_params(text: &str) -> IndexMap<String, ParamDescriptor> {
    let mut params = IndexMap::new();

    for caps in decl_pattern().captures_iter(text) {
        let kind = caps
            .get(1)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_KIND);
        let key = caps[2].to_string();
        let label = caps[3].to_string();
        let (default, description) = split_tail(caps.get(4).map_or("", |m| m.as_str()));

        params.insert(
            key.clone(),
            ParamDescriptor {
                key,
                label,
                kind: kind.to_string(),
                default,
                description,
                line: caps[0].trim().to_string(),
            },
        );
    }

    params
}

/// Split the free-text tail into default value and description.
fn split_tail(tail: &str) -> (Option<String>, Option<String>) {
    match default_pattern().captures(tail) {
        Some(caps) => {
            let segment = caps.get(0).expect("whole match present");
            let before = tail[..segment.start()].trim();
            let after = tail[segment.end()..].trim();
            let description = match (before.is_empty(), after.is_empty()) {
                (true, true) => String::new(),
                (false, true) => before.to_string(),
                (true, false) => after.to_string(),
                (false, false) => format!("{before} {after}"),
            };
            (Some(caps[1].to_string()), none_if_empty(description))
        }
        None => (None, none_if_empty(tail.trim().to_string())),
    }
}

fn none_if_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn full_declaration_is_extracted() {
        let text = "# @param yesno allowDiscount \"Allow Discount\" (no) Apply a discount?\n";
        let params = parse_params(text);

        assert_eq!(params.len(), 1);
        let param = &params["allowDiscount"];
        assert_eq!(param.kind, "yesno");
        assert_eq!(param.label, "Allow Discount");
        assert_eq!(param.default.as_deref(), Some("no"));
        assert_eq!(param.description.as_deref(), Some("Apply a discount?"));
        assert_eq!(
            param.line,
            "# @param yesno allowDiscount \"Allow Discount\" (no) Apply a discount?"
        );
    }

    #[test]
    fn omitted_type_defaults_to_text() {
        let params = parse_params("# @param amount \"Order Amount\"\n");
        assert_eq!(params["amount"].kind, DEFAULT_KIND);
        assert_eq!(params["amount"].default, None);
        assert_eq!(params["amount"].description, None);
    }

    #[test]
    fn tail_without_parens_is_all_description() {
        let params = parse_params("# @param text city \"City\" Destination of the order\n");
        let param = &params["city"];
        assert_eq!(param.default, None);
        assert_eq!(param.description.as_deref(), Some("Destination of the order"));
    }

    #[test]
    fn description_may_surround_the_default() {
        let params = parse_params("# @param text rate \"Rate\" Percent (15) applied at checkout\n");
        let param = &params["rate"];
        assert_eq!(param.default.as_deref(), Some("15"));
        assert_eq!(param.description.as_deref(), Some("Percent applied at checkout"));
    }

    #[test]
    fn later_declarations_win() {
        let text = "\
# @param text amount \"Amount\" (1)
# @param text other \"Other\"
# @param yesno amount \"Amount Flag\" (yes)
";
        let params = parse_params(text);
        assert_eq!(params.len(), 2);
        assert_eq!(params["amount"].kind, "yesno");
        assert_eq!(params["amount"].default.as_deref(), Some("yes"));
        // Declaration order is preserved for rendering.
        let keys: Vec<&str> = params.keys().map(String::as_str).collect();
        assert_eq!(keys, ["amount", "other"]);
    }

    #[test_case("Feature: no declarations here" ; "plain text")]
    #[test_case("# @param missing quotes entirely" ; "missing quoted name")]
    #[test_case("# @param a b c \"Name\"" ; "too many words before name")]
    #[test_case("" ; "empty input")]
    fn non_matching_lines_are_skipped(text: &str) {
        assert!(parse_params(text).is_empty());
    }

    #[test]
    fn declarations_mixed_into_scenario_text() {
        let text = "\
Feature: Checkout

  # @param text amount \"Order Amount\" (100) Total before discount
  # @param yesno express \"Express Shipping\"

  Scenario: Discounted order
    Given an order of <amount>
";
        let params = parse_params(text);
        assert_eq!(params.len(), 2);
        assert_eq!(params["amount"].default.as_deref(), Some("100"));
        assert_eq!(params["express"].kind, "yesno");
    }
}
