//! Array element type definitions for uniform and mixed arrays.

/// Element type for arrays.
///
/// Every uniform storage variant of [`super::ArrayData`] has one element type;
/// `Mixed` marks boxed storage that accepts any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementType {
    Bool,
    #[default]
    Int,
    Float,
    Complex,
    Str,
    Mixed,
}

impl ElementType {
    /// Type name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Bool => "bool",
            ElementType::Int => "int",
            ElementType::Float => "float",
            ElementType::Complex => "complex",
            ElementType::Str => "string",
            ElementType::Mixed => "mixed",
        }
    }

    /// Check if this is a numeric type (Bool counts as numeric)
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ElementType::Bool | ElementType::Int | ElementType::Float | ElementType::Complex
        )
    }

    /// Position in the promotion order Bool < Int < Float < Complex.
    fn numeric_rank(&self) -> Option<u8> {
        match self {
            ElementType::Bool => Some(0),
            ElementType::Int => Some(1),
            ElementType::Float => Some(2),
            ElementType::Complex => Some(3),
            ElementType::Str | ElementType::Mixed => None,
        }
    }

    /// Smallest type both `self` and `other` convert to without loss.
    ///
    /// Identical types always promote to themselves; distinct types only
    /// promote when both are numeric.
    pub fn promote(self, other: ElementType) -> Option<ElementType> {
        if self == other {
            return Some(self);
        }
        match (self.numeric_rank(), other.numeric_rank()) {
            (Some(a), Some(b)) => Some(if a >= b { self } else { other }),
            _ => None,
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promote_same_type() {
        assert_eq!(ElementType::Str.promote(ElementType::Str), Some(ElementType::Str));
        assert_eq!(ElementType::Int.promote(ElementType::Int), Some(ElementType::Int));
    }

    #[test]
    fn test_promote_numeric_tower() {
        assert_eq!(ElementType::Int.promote(ElementType::Float), Some(ElementType::Float));
        assert_eq!(ElementType::Complex.promote(ElementType::Bool), Some(ElementType::Complex));
        assert_eq!(ElementType::Bool.promote(ElementType::Int), Some(ElementType::Int));
    }

    #[test]
    fn test_promote_string_with_number_fails() {
        assert_eq!(ElementType::Str.promote(ElementType::Int), None);
        assert_eq!(ElementType::Mixed.promote(ElementType::Int), None);
    }
}
