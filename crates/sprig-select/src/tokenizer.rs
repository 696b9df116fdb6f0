//! Selector branch tokenizer.
//!
//! Grammar of one comma-free branch:
//!
//! ```text
//! branch     := segment+
//! segment    := combinator? simple
//! combinator := ws* ('>' | '+' | '~') ws* | ws+
//! simple     := (tag | '*')? ('#' ident)? ('.' ident)* attr* pseudo*
//! attr       := '[' ident (('=' | '^=' | '$=' | '*=') value)? ']'
//! value      := '"' [^"]* '"' | "'" [^']* "'" | [^\]\s]+
//! pseudo     := ':' ('first-child' | 'last-child' | 'nth-child' '(' arg ')')
//! ```
//!
//! The scanner consumes segments until neither a combinator nor a simple
//! selector can be read. Whatever is left over is a hard error: unsupported
//! syntax is rejected, never silently ignored.

use sprig_common::warning::warn_once;

use crate::error::{Result, SelectorError};
use crate::segment::{
    AttributeOperator, AttributeTest, Combinator, Pseudo, PseudoKind, SelectorSegment, TagTest,
};

/// Turn one selector branch into its segments.
///
/// Segments whose simple selector is empty (a trailing `" "` or `" > "`, or the
/// first of two glyphs in a row) are dropped along with their combinator.
///
/// # Errors
///
/// - [`SelectorError::Empty`] if `branch` is empty or only whitespace.
/// - [`SelectorError::Unparsed`] if any character is not accounted for by the grammar.
/// - [`SelectorError::NoSimpleSelector`] if the branch is only combinators.
pub fn tokenize(branch: &str) -> Result<Vec<SelectorSegment>> {
    if branch.trim().is_empty() {
        return Err(SelectorError::Empty {
            selector: branch.to_string(),
        });
    }

    let mut cursor = Cursor::new(branch);
    let mut segments = Vec::new();

    loop {
        let start = cursor.pos;
        let glyph = cursor.combinator();
        // Only the first segment may omit its glyph; elsewhere a missing glyph
        // means the previous simple selector stopped on something it can't read.
        if glyph.is_none() && start > 0 {
            break;
        }
        let mut segment = cursor.simple_selector(branch);
        if cursor.pos == start {
            break;
        }

        if segment.is_empty() {
            continue;
        }
        segment.combinator = glyph.unwrap_or_default();
        segments.push(segment);
    }

    // The segments' spans are contiguous from offset 0, so full coverage is
    // equivalent to the scanner having reached the end of the input.
    if cursor.pos != branch.len() {
        return Err(SelectorError::Unparsed {
            branch: branch.to_string(),
            offset: cursor.pos,
            remainder: cursor.rest().to_string(),
        });
    }

    if segments.is_empty() {
        return Err(SelectorError::NoSimpleSelector {
            branch: branch.to_string(),
        });
    }

    Ok(segments)
}

/// Identifier characters for ids, classes and attribute names.
const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Byte cursor over a branch. Every method that fails to read its production
/// leaves `pos` where it started.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn ident(&mut self) -> Option<&'a str> {
        let ident = self.take_while(is_ident_char);
        (!ident.is_empty()).then_some(ident)
    }

    /// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
    ///
    /// `None` if there is no glyph at all, `Some(Descendant)` for whitespace only.
    fn combinator(&mut self) -> Option<Combinator> {
        let skipped = self.take_while(|c| c.is_ascii_whitespace()).len();
        if let Some(combinator) = self.peek().and_then(Combinator::from_glyph) {
            self.pos += 1;
            let _ = self.take_while(|c| c.is_ascii_whitespace());
            Some(combinator)
        } else if skipped > 0 {
            Some(Combinator::Descendant)
        } else {
            None
        }
    }

    /// Read one simple selector run. Stops at the first character that does
    /// not continue the run; the caller decides whether that is an error.
    fn simple_selector(&mut self, branch: &str) -> SelectorSegment {
        let mut segment = SelectorSegment::default();

        if self.eat('*') {
            segment.tag = Some(TagTest::Universal);
        } else {
            let name = self.take_while(|c| c.is_ascii_alphanumeric());
            if !name.is_empty() {
                segment.tag = Some(TagTest::Name(name.to_ascii_lowercase()));
            }
        }

        let save = self.pos;
        if self.eat('#') {
            match self.ident() {
                Some(id) => segment.id = Some(id.to_string()),
                None => self.pos = save,
            }
        }

        loop {
            let save = self.pos;
            if !self.eat('.') {
                break;
            }
            if let Some(class) = self.ident() {
                segment.classes.push(class.to_string());
            } else {
                self.pos = save;
                break;
            }
        }

        while let Some(test) = self.attribute() {
            segment.attributes.push(test);
        }

        let mut pseudo_count = 0usize;
        while let Some(pseudo) = self.pseudo() {
            pseudo_count += 1;
            segment.pseudo = Some(pseudo);
        }
        if pseudo_count > 1 {
            warn_once(
                "Selector",
                &format!("only the last positional pseudo-class is used in {branch:?}"),
            );
        }

        segment
    }

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    fn attribute(&mut self) -> Option<AttributeTest> {
        let save = self.pos;
        let test = self.attribute_inner();
        if test.is_none() {
            self.pos = save;
        }
        test
    }

    fn attribute_inner(&mut self) -> Option<AttributeTest> {
        if !self.eat('[') {
            return None;
        }
        let name = self.ident()?.to_ascii_lowercase();

        if self.eat(']') {
            return Some(AttributeTest {
                name,
                comparison: None,
            });
        }

        let op = if self.eat_str("^=") {
            AttributeOperator::Prefix
        } else if self.eat_str("$=") {
            AttributeOperator::Suffix
        } else if self.eat_str("*=") {
            AttributeOperator::Substring
        } else if self.eat('=') {
            AttributeOperator::Equals
        } else {
            return None;
        };

        let value = self.attribute_value()?;
        if !self.eat(']') {
            return None;
        }
        Some(AttributeTest {
            name,
            comparison: Some((op, value)),
        })
    }

    /// Quoted values keep everything between the quotes verbatim; there is no
    /// escape processing.
    fn attribute_value(&mut self) -> Option<String> {
        for quote in ['"', '\''] {
            if self.eat(quote) {
                let value = self.take_while(|c| c != quote);
                return self.eat(quote).then(|| value.to_string());
            }
        }
        let bare = self.take_while(|c| c != ']' && !c.is_whitespace());
        (!bare.is_empty()).then(|| bare.to_string())
    }

    /// Positional pseudo-classes only. The `nth-child` argument is kept raw.
    fn pseudo(&mut self) -> Option<Pseudo> {
        let save = self.pos;
        let pseudo = self.pseudo_inner();
        if pseudo.is_none() {
            self.pos = save;
        }
        pseudo
    }

    fn pseudo_inner(&mut self) -> Option<Pseudo> {
        if !self.eat(':') {
            return None;
        }
        let kind = if self.eat_str("first-child") {
            PseudoKind::FirstChild
        } else if self.eat_str("last-child") {
            PseudoKind::LastChild
        } else if self.eat_str("nth-child(") {
            let argument = self.take_while(|c| c != ')').trim().to_string();
            if !self.eat(')') {
                return None;
            }
            return Some(Pseudo {
                kind: PseudoKind::NthChild,
                argument: Some(argument),
            });
        } else {
            return None;
        };
        Some(Pseudo {
            kind,
            argument: None,
        })
    }
}
