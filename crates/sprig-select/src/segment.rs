//! Selector plan data model.
//!
//! A branch of a selector list (`ul > li.x`) is compiled into an ordered list of
//! [`SelectorSegment`]s, each pairing a [`Combinator`] with the simple-selector
//! tests one node must pass. Segments are matched left to right, each one
//! advancing the search context.

use std::fmt;

use serde::Serialize;

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// Whitespace, or no glyph at all. Any proper descendant of the context.
    #[default]
    Descendant,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// `>`: the direct children of the context.
    Child,

    /// [§ 16.3 Next-sibling combinator](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
    /// `+`: the sibling immediately after the context.
    Adjacent,

    /// [§ 16.4 Subsequent-sibling combinator](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
    /// `~`: every sibling after the context.
    Sibling,
}

impl Combinator {
    /// Map an explicit combinator glyph to its combinator.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '>' => Some(Self::Child),
            '+' => Some(Self::Adjacent),
            '~' => Some(Self::Sibling),
            _ => None,
        }
    }

    /// The canonical glyph, surrounded by the whitespace it is printed with.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Descendant => " ",
            Self::Child => " > ",
            Self::Adjacent => " + ",
            Self::Sibling => " ~ ",
        }
    }
}

/// The tag part of a simple selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagTest {
    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector): `*`
    Universal,
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors), lower-cased.
    Name(String),
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeOperator {
    /// `[attr=value]`
    Equals,
    /// `[attr^=value]`
    Prefix,
    /// `[attr$=value]`
    Suffix,
    /// `[attr*=value]`
    Substring,
}

impl AttributeOperator {
    /// The operator as written in a selector.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::Prefix => "^=",
            Self::Suffix => "$=",
            Self::Substring => "*=",
        }
    }

    /// Whether `actual` satisfies this operator against `expected`.
    ///
    /// An empty `expected` satisfies every prefix, suffix and substring test,
    /// but only an empty `actual` for `=`.
    #[must_use]
    pub fn test(self, actual: &str, expected: &str) -> bool {
        match self {
            Self::Equals => actual == expected,
            Self::Prefix => actual.starts_with(expected),
            Self::Suffix => actual.ends_with(expected),
            Self::Substring => actual.contains(expected),
        }
    }
}

/// One bracketed attribute test: `[name]` or `[name op value]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AttributeTest {
    /// Attribute name, lower-cased.
    pub name: String,
    /// Operator and expected value; `None` for a presence-only test.
    pub comparison: Option<(AttributeOperator, String)>,
}

/// Positional pseudo-classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PseudoKind {
    /// [§ 14.3.1 :first-child](https://www.w3.org/TR/selectors-4/#the-first-child-pseudo)
    FirstChild,
    /// [§ 14.3.2 :last-child](https://www.w3.org/TR/selectors-4/#the-last-child-pseudo)
    LastChild,
    /// [§ 14.4.1 :nth-child()](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo),
    /// restricted to a literal position, `odd` or `even`.
    NthChild,
}

impl PseudoKind {
    /// The pseudo-class name without its leading colon.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstChild => "first-child",
            Self::LastChild => "last-child",
            Self::NthChild => "nth-child",
        }
    }
}

/// A positional pseudo-class with its raw argument.
///
/// The `nth-child` argument is kept as written and only interpreted at match
/// time; an argument that is neither a decimal literal nor `odd`/`even` never
/// matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pseudo {
    /// Which positional test.
    pub kind: PseudoKind,
    /// Raw argument text, present only for `nth-child`.
    pub argument: Option<String>,
}

/// One step in a selector chain: a combinator plus a simple selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SelectorSegment {
    /// Relationship to the previous segment's node (or the query root).
    pub combinator: Combinator,
    /// Tag test; `None` means any tag.
    pub tag: Option<TagTest>,
    /// Required `id` attribute value.
    pub id: Option<String>,
    /// Class names that must all be present. Duplicates are harmless.
    pub classes: Vec<String>,
    /// Attribute tests, in selector order.
    pub attributes: Vec<AttributeTest>,
    /// Positional pseudo-class, if any.
    pub pseudo: Option<Pseudo>,
}

impl SelectorSegment {
    /// True if the segment carries no test at all (only a combinator).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
            && self.pseudo.is_none()
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

impl fmt::Display for AttributeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PseudoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TagTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Universal => f.write_str("*"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Values are double-quoted unless they contain `"`, then single-quoted unless
/// they also contain `'`. A value holding both can only have been written bare
/// (`[a=x"y']`), so it is printed bare again.
impl fmt::Display for AttributeTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((op, value)) = &self.comparison else {
            return write!(f, "[{}]", self.name);
        };
        let quote = match (value.contains('"'), value.contains('\'')) {
            (false, _) => "\"",
            (true, false) => "'",
            (true, true) => "",
        };
        write!(f, "[{}{}{quote}{value}{quote}]", self.name, op.as_str())
    }
}

impl fmt::Display for Pseudo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.kind.name())?;
        if let Some(arg) = &self.argument {
            write!(f, "({arg})")?;
        }
        Ok(())
    }
}

/// Prints the simple selector only; the combinator is printed by whoever joins
/// segments, see [`Combinator::glyph`].
impl fmt::Display for SelectorSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{tag}")?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        for attr in &self.attributes {
            write!(f, "{attr}")?;
        }
        if let Some(pseudo) = &self.pseudo {
            write!(f, "{pseudo}")?;
        }
        Ok(())
    }
}

/// Print a whole branch back as selector text, e.g. `ul > li.x`.
///
/// A leading descendant combinator is implicit and not printed.
#[must_use]
pub fn branch_to_string(segments: &[SelectorSegment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 || segment.combinator != Combinator::Descendant {
            out.push_str(segment.combinator.glyph());
        }
        out.push_str(&segment.to_string());
    }
    out.trim_start().to_string()
}
