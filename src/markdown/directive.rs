//! Extraction of `{% link path %}` directives.

use regex::Regex;
use std::sync::LazyLock;

/// Link directive; the path is any run of characters other than `}`.
static DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{% link ([^}]+) %\}").expect("directive pattern is valid"));

/// Returns the referenced path of every link directive in `content`.
///
/// Paths come back in document order and exactly as written. Duplicates are
/// kept.
///
/// # Examples
///
/// ```
/// use linkmend::extract_references;
///
/// let refs = extract_references("[A]({% link a.md %}) and {% link a.md %}");
/// assert_eq!(refs, vec!["a.md", "a.md"]);
/// ```
pub fn extract_references(content: &str) -> Vec<&str> {
    DIRECTIVE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_reference() {
        // Arrange
        let content = "See [Guide]({% link reference/glossary.md %}) for terms.";

        // Act
        let refs = extract_references(content);

        // Assert
        assert_eq!(refs, vec!["reference/glossary.md"]);
    }

    #[test]
    fn test_extract_keeps_order_and_duplicates() {
        // Arrange
        let content = "{% link b.md %}\n{% link a.md %}\n[x]({% link b.md %})";

        // Act
        let refs = extract_references(content);

        // Assert
        assert_eq!(refs, vec!["b.md", "a.md", "b.md"]);
    }

    #[test]
    fn test_extract_is_verbatim() {
        // Arrange
        let content = "{% link ./docs/a.md %} {% link docs/../b.md %}";

        // Act
        let refs = extract_references(content);

        // Assert
        assert_eq!(
            refs,
            vec!["./docs/a.md", "docs/../b.md"],
            "Paths should not be normalized"
        );
    }

    #[test]
    fn test_extract_ignores_other_tags() {
        // Arrange
        let content = "{% include nav.html %} {{ page.title }} {% link %} {%link a.md %}";

        // Act
        let refs = extract_references(content);

        // Assert
        assert!(refs.is_empty(), "Found unexpected references: {:?}", refs);
    }

    #[test]
    fn test_extract_path_with_spaces() {
        // Arrange
        let content = "{% link my notes/page one.md %}";

        // Act
        let refs = extract_references(content);

        // Assert
        assert_eq!(refs, vec!["my notes/page one.md"]);
    }

    #[test]
    fn test_extract_empty_content() {
        assert!(extract_references("").is_empty());
    }
}
