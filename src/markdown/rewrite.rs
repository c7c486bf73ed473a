//! Rewriting of broken directive links into plain text.
//!
//! Rewriting is an ordered pipeline of [`LinkShape`] stages. Each stage owns
//! one pattern and runs over the output of the previous stage.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::table::BrokenTable;

/// `[label]({% link path %}trailing)`; trailing is anything before the
/// closing paren, such as a link title.
static INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(\{% link ([^}]+) %\}([^)]*)\)").expect("inline pattern is valid")
});

/// `## prefix [label]({% link path %})` with nothing between `%}` and `)`.
static HEADING_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(#+\s+[^\[]*)\[([^\]]+)\]\(\{% link ([^}]+) %\}\)")
        .expect("heading pattern is valid")
});

/// Markdown link shape understood by the rewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkShape {
    /// Inline link, optionally followed by attributes inside the parens.
    ///
    /// Broken spans are replaced by the label alone. Working spans are kept
    /// byte for byte.
    Inline,
    /// Link on a heading line, after the `#` marker and any leading text.
    ///
    /// Broken spans keep the heading marker and leading text and lose the
    /// link wrapper. Heading links with trailing attributes are not matched
    /// here; they belong to [`LinkShape::Inline`].
    Heading,
}

/// Stage order for one rewrite pass. `Heading` sees `Inline`'s output.
pub const PIPELINE: [LinkShape; 2] = [LinkShape::Inline, LinkShape::Heading];

impl LinkShape {
    fn pattern(&self) -> &'static Regex {
        match self {
            LinkShape::Inline => &INLINE_LINK,
            LinkShape::Heading => &HEADING_LINK,
        }
    }

    /// Applies this stage once over `content`.
    ///
    /// Returns borrowed content when nothing matched.
    pub fn apply<'c>(&self, content: &'c str, broken: &BrokenTable) -> Cow<'c, str> {
        let shape = *self;
        self.pattern()
            .replace_all(content, |caps: &Captures| shape.replacement(caps, broken))
    }

    fn replacement(&self, caps: &Captures, broken: &BrokenTable) -> String {
        match self {
            LinkShape::Inline => {
                if broken.contains(&caps[2]) {
                    caps[1].to_string()
                } else {
                    caps[0].to_string()
                }
            }
            LinkShape::Heading => {
                if broken.contains(&caps[3]) {
                    format!("{}{}", &caps[1], &caps[2])
                } else {
                    caps[0].to_string()
                }
            }
        }
    }
}

/// Runs every [`PIPELINE`] stage once, in order.
pub fn rewrite_pass(content: &str, broken: &BrokenTable) -> String {
    PIPELINE
        .iter()
        .fold(content.to_string(), |text, stage| {
            stage.apply(&text, broken).into_owned()
        })
}

/// Rewrites every broken directive link in `content` into plain text.
///
/// Passes repeat until the content stops changing, so the result contains
/// no span either stage would rewrite and a second call is a no-op. Each
/// changing pass shortens the text, which bounds the loop.
///
/// # Examples
///
/// ```
/// use linkmend::{BrokenTable, rewrite};
///
/// let broken = BrokenTable::new(["reference/glossary.md"]);
/// let fixed = rewrite("See [Guide]({% link reference/glossary.md %})", &broken);
/// assert_eq!(fixed, "See Guide");
/// ```
pub fn rewrite(content: &str, broken: &BrokenTable) -> String {
    let mut current = content.to_string();
    loop {
        let next = rewrite_pass(&current, broken);
        if next == current {
            return current;
        }
        current = next;
    }
}
