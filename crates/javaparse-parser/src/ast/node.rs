//! Common AST node types shared by declarations, statements and expressions.

use bitflags::bitflags;
use javaparse_core::Position;
use std::fmt;

/// An identifier with source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ident<'ast> {
    /// The identifier name (allocated in arena).
    pub name: &'ast str,
    pub position: Position,
}

impl<'ast> Ident<'ast> {
    pub fn new(name: &'ast str, position: Position) -> Self {
        Self { name, position }
    }
}

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A dotted name such as `java.util.List`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedName<'ast> {
    pub segments: &'ast [Ident<'ast>],
    pub position: Position,
}

impl<'ast> QualifiedName<'ast> {
    /// The final segment, if any.
    pub fn last(&self) -> Option<&Ident<'ast>> {
        self.segments.last()
    }
}

impl fmt::Display for QualifiedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment.name)?;
        }
        Ok(())
    }
}

bitflags! {
    /// Declaration modifiers.
    ///
    /// The closed Java modifier set plus `default`, which only interface
    /// members accept.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u16 {
        const PUBLIC       = 1 << 0;
        const PROTECTED    = 1 << 1;
        const PRIVATE      = 1 << 2;
        const ABSTRACT     = 1 << 3;
        const STATIC       = 1 << 4;
        const FINAL        = 1 << 5;
        const TRANSIENT    = 1 << 6;
        const VOLATILE     = 1 << 7;
        const SYNCHRONIZED = 1 << 8;
        const NATIVE       = 1 << 9;
        const STRICTFP     = 1 << 10;
        const DEFAULT      = 1 << 11;
    }
}

impl Modifiers {
    /// Keyword spellings in canonical Java order.
    const KEYWORDS: [(Modifiers, &'static str); 12] = [
        (Modifiers::PUBLIC, "public"),
        (Modifiers::PROTECTED, "protected"),
        (Modifiers::PRIVATE, "private"),
        (Modifiers::ABSTRACT, "abstract"),
        (Modifiers::DEFAULT, "default"),
        (Modifiers::STATIC, "static"),
        (Modifiers::FINAL, "final"),
        (Modifiers::TRANSIENT, "transient"),
        (Modifiers::VOLATILE, "volatile"),
        (Modifiers::SYNCHRONIZED, "synchronized"),
        (Modifiers::NATIVE, "native"),
        (Modifiers::STRICTFP, "strictfp"),
    ];

    /// Implicit modifiers of interface fields and enum constants.
    pub const CONSTANT: Modifiers = Modifiers::PUBLIC
        .union(Modifiers::STATIC)
        .union(Modifiers::FINAL);

    /// The modifier a keyword denotes. `default` is not included; callers
    /// that accept it check for it separately.
    pub fn from_keyword(keyword: &str) -> Option<Modifiers> {
        Self::KEYWORDS
            .iter()
            .find(|(flag, name)| *name == keyword && *flag != Modifiers::DEFAULT)
            .map(|(flag, _)| *flag)
    }

    /// Keyword spellings of the set modifiers, in canonical order.
    pub fn keywords(self) -> impl Iterator<Item = &'static str> {
        Self::KEYWORDS
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, keyword) in self.keywords().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(keyword)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_display() {
        let ident = Ident::new("counter", Position::new(1, 1));
        assert_eq!(format!("{ident}"), "counter");
    }

    #[test]
    fn qualified_name_display() {
        let segments = [
            Ident::new("java", Position::new(1, 8)),
            Ident::new("util", Position::new(1, 13)),
            Ident::new("List", Position::new(1, 18)),
        ];
        let name = QualifiedName {
            segments: &segments,
            position: Position::new(1, 8),
        };
        assert_eq!(format!("{name}"), "java.util.List");
        assert_eq!(name.last().map(|i| i.name), Some("List"));
    }

    #[test]
    fn modifier_keywords() {
        assert_eq!(Modifiers::from_keyword("static"), Some(Modifiers::STATIC));
        assert_eq!(Modifiers::from_keyword("strictfp"), Some(Modifiers::STRICTFP));
        assert_eq!(Modifiers::from_keyword("default"), None);
        assert_eq!(Modifiers::from_keyword("class"), None);
    }

    #[test]
    fn modifiers_display_in_canonical_order() {
        let mods = Modifiers::FINAL | Modifiers::STATIC | Modifiers::PUBLIC;
        assert_eq!(format!("{mods}"), "public static final");
        assert_eq!(mods, Modifiers::CONSTANT);
        assert_eq!(format!("{}", Modifiers::empty()), "");
    }
}
