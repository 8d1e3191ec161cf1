//! Prompt template variable resolution
//!
//! Templates use `${name}` placeholders. Resolution is a single left-to-right
//! pass: substituted values are emitted literally and never re-scanned, so a
//! value containing `${...}` cannot trigger recursive expansion.

use std::collections::HashMap;

/// Replace every `${key}` placeholder that has a matching variable.
///
/// Placeholders with no matching key are left verbatim; variables that do not
/// appear in the template are ignored. Neither case is an error.
pub fn resolve_variables(template: &str, variables: &HashMap<String, String>) -> String {
    if variables.is_empty() {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match variables.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        // Unknown placeholder stays verbatim
                        out.push_str(&rest[start..start + 2 + end + 1]);
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                // Unterminated placeholder, keep the remainder as-is
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_basic_substitution() {
        let result = resolve_variables(
            "Hello ${name}, welcome to ${place}!",
            &vars(&[("name", "Ada"), ("place", "the lab")]),
        );
        assert_eq!(result, "Hello Ada, welcome to the lab!");
    }

    #[test]
    fn test_repeated_placeholder() {
        let result = resolve_variables("${x} and ${x}", &vars(&[("x", "again")]));
        assert_eq!(result, "again and again");
    }

    #[test]
    fn test_no_placeholders_is_identity() {
        let template = "Plain prompt with no tokens, even a lone $ sign.";
        assert_eq!(
            resolve_variables(template, &vars(&[("unused", "value")])),
            template
        );
    }

    #[test]
    fn test_unmatched_placeholder_left_verbatim() {
        let result = resolve_variables("Hi ${known}, ${unknown}", &vars(&[("known", "there")]));
        assert_eq!(result, "Hi there, ${unknown}");
    }

    #[test]
    fn test_empty_variables_is_identity() {
        let template = "Hello ${name}";
        assert_eq!(resolve_variables(template, &HashMap::new()), template);
    }

    #[test]
    fn test_no_recursive_expansion() {
        // A substituted value that looks like a placeholder stays literal
        let result = resolve_variables(
            "${a}",
            &vars(&[("a", "${b}"), ("b", "should never appear")]),
        );
        assert_eq!(result, "${b}");
    }

    #[test]
    fn test_unterminated_placeholder_kept() {
        let result = resolve_variables("value: ${open", &vars(&[("open", "x")]));
        assert_eq!(result, "value: ${open");
    }
}
