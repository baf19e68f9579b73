//! Type System for the declaration language
//!
//! Data types, literal type inference and assignment compatibility
//! (exact match, widening, byte/short range checks).

use std::fmt;

use crate::utils::SemanticError;

/// Declarable data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Byte,
    Short,
    Int,
    Long,
    Double,
    Float,
    Char,
    String,
    Boolean,
}

impl DataType {
    /// All data types, in keyword order
    pub const ALL: [DataType; 9] = [
        DataType::Byte,
        DataType::Short,
        DataType::Int,
        DataType::Long,
        DataType::Double,
        DataType::Float,
        DataType::Char,
        DataType::String,
        DataType::Boolean,
    ];

    /// Try to convert a lexeme to a data type keyword
    pub fn keyword_from_str(s: &str) -> Option<DataType> {
        match s {
            "byte" => Some(DataType::Byte),
            "short" => Some(DataType::Short),
            "int" => Some(DataType::Int),
            "long" => Some(DataType::Long),
            "double" => Some(DataType::Double),
            "float" => Some(DataType::Float),
            "char" => Some(DataType::Char),
            "String" => Some(DataType::String),
            "boolean" => Some(DataType::Boolean),
            _ => None,
        }
    }

    /// The source keyword for this type
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Double => "double",
            Self::Float => "float",
            Self::Char => "char",
            Self::String => "String",
            Self::Boolean => "boolean",
        }
    }

    /// Inclusive value range for types that are range-checked against `int` literals
    pub fn int_range(&self) -> Option<(i64, i64)> {
        match self {
            Self::Byte => Some((i8::MIN as i64, i8::MAX as i64)),
            Self::Short => Some((i16::MIN as i64, i16::MAX as i64)),
            _ => None,
        }
    }

    /// Check whether a literal of type `from` widens into this type without checks
    pub fn widens_from(&self, from: DataType) -> bool {
        use DataType::*;
        matches!(
            (self, from),
            (Long, Int) | (Float, Int) | (Float, Long) | (Double, Int) | (Double, Long) | (Double, Float)
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Type inferred from a literal lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralType {
    Known(DataType),
    Unknown,
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(ty) => write!(f, "{}", ty),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

// ==================== Numeric Literals ====================

/// Shape of a numeric literal: `[+-]? digits* (. digits+)? ([eE] [+-]? digits+)? suffix?`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericShape {
    pub sign: Option<char>,
    pub has_dot: bool,
    pub has_exponent: bool,
    pub suffix: Option<char>,
}

impl NumericShape {
    /// Scan a whole lexeme as a numeric literal
    pub fn scan(s: &str) -> Option<NumericShape> {
        let mut chars = s.chars().peekable();

        let sign = match chars.peek() {
            Some(&c @ ('+' | '-')) => {
                chars.next();
                Some(c)
            }
            _ => None,
        };

        let mut int_digits = 0;
        while chars.next_if(|c| c.is_ascii_digit()).is_some() {
            int_digits += 1;
        }

        let has_dot = chars.next_if_eq(&'.').is_some();
        if has_dot {
            let mut frac_digits = 0;
            while chars.next_if(|c| c.is_ascii_digit()).is_some() {
                frac_digits += 1;
            }
            if frac_digits == 0 {
                return None;
            }
        } else if int_digits == 0 {
            return None;
        }

        let has_exponent = chars.next_if(|c| matches!(c, 'e' | 'E')).is_some();
        if has_exponent {
            chars.next_if(|c| matches!(c, '+' | '-'));
            let mut exp_digits = 0;
            while chars.next_if(|c| c.is_ascii_digit()).is_some() {
                exp_digits += 1;
            }
            if exp_digits == 0 {
                return None;
            }
        }

        let suffix = chars.next_if(|c| matches!(c, 'f' | 'F' | 'd' | 'D' | 'l' | 'L'));

        if chars.next().is_some() {
            return None;
        }

        Some(NumericShape { sign, has_dot, has_exponent, suffix })
    }

    /// Plain integer digits with an optional minus sign and no suffix
    fn is_plain_int(&self) -> bool {
        self.sign != Some('+') && !self.has_dot && !self.has_exponent && self.suffix.is_none()
    }
}

/// Check for a double-quoted string literal
pub fn is_string_literal(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

/// Check for a single character in single quotes
pub fn is_char_literal(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(
        (chars.next(), chars.next(), chars.next(), chars.next()),
        (Some('\''), Some(c), Some('\''), None) if c != '\''
    )
}

/// Check for a boolean literal
pub fn is_bool_literal(s: &str) -> bool {
    s == "true" || s == "false"
}

// ==================== Inference ====================

/// Infer the type of a literal lexeme
pub fn infer_type(literal: &str) -> LiteralType {
    if is_string_literal(literal) {
        return LiteralType::Known(DataType::String);
    }
    if is_char_literal(literal) {
        return LiteralType::Known(DataType::Char);
    }
    if is_bool_literal(literal) {
        return LiteralType::Known(DataType::Boolean);
    }

    let shape = NumericShape::scan(literal);
    if let Some(shape) = shape {
        match shape.suffix {
            Some('l' | 'L')
                if shape.sign != Some('+') && !shape.has_dot && !shape.has_exponent =>
            {
                return LiteralType::Known(DataType::Long);
            }
            Some('f' | 'F') => return LiteralType::Known(DataType::Float),
            Some('d' | 'D') => return LiteralType::Known(DataType::Double),
            _ => {}
        }
    }

    if literal.contains('.') {
        return LiteralType::Known(DataType::Double);
    }

    match shape {
        Some(shape) if shape.is_plain_int() => LiteralType::Known(DataType::Int),
        _ => LiteralType::Unknown,
    }
}

// ==================== Compatibility ====================

/// Check that `literal` may be assigned to a variable of type `declared`
pub fn check_compatibility(declared: DataType, literal: &str) -> Result<(), SemanticError> {
    let inferred = infer_type(literal);

    let inferred_ty = match inferred {
        LiteralType::Known(ty) if ty == declared => return Ok(()),
        LiteralType::Known(ty) => Some(ty),
        LiteralType::Unknown => None,
    };

    if let (Some(DataType::Int), Some((min, max))) = (inferred_ty, declared.int_range()) {
        // Literals beyond 32 bits skip the range check and end up as a mismatch.
        if let Ok(value) = literal.parse::<i32>() {
            let value = value as i64;
            if (min..=max).contains(&value) {
                return Ok(());
            }
            return Err(SemanticError::OutOfRange {
                ty: declared.to_string(),
                value,
                min,
                max,
            });
        }
    }

    if inferred_ty.is_some_and(|from| declared.widens_from(from)) {
        return Ok(());
    }

    Err(SemanticError::TypeMismatch {
        declared: declared.to_string(),
        inferred: inferred.to_string(),
        literal: literal.to_string(),
    })
}
