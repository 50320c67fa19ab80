//! Scalar attribute values.

use std::fmt;

/// A scalar attribute value.
///
/// Values render in their quoted "repr" form: strings are wrapped in single
/// quotes, booleans are capitalised. No markup escaping is applied.
///
/// ```
/// use quickhtml_core::AttrValue;
///
/// assert_eq!(AttrValue::from("container").to_string(), "'container'");
/// assert_eq!(AttrValue::from(3).to_string(), "3");
/// assert_eq!(AttrValue::from(true).to_string(), "True");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// String value, rendered quoted.
    Str(String),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write_quoted(f, s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) if x.is_nan() => f.write_str("nan"),
            Self::Float(x) if x.is_infinite() => {
                f.write_str(if x.is_sign_negative() { "-inf" } else { "inf" })
            }
            Self::Float(x) => write_float(f, *x),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
        }
    }
}

/// Single quotes unless the text holds a `'` and no `"`.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    write!(f, "{quote}")?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{c}")?,
            c if c < ' ' || ('\u{7f}'..='\u{9f}').contains(&c) => write!(f, "\\x{:02x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "{quote}")
}

/// Shortest round-trip digits, positional for exponents in `-4..16` and
/// `1e+20` style otherwise.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    let scientific = format!("{x:e}");
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return f.write_str(&scientific);
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return f.write_str(&scientific);
    };

    if !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs());
    }

    if mantissa.starts_with('-') {
        f.write_str("-")?;
    }
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let point = exp + 1;
    if point <= 0 {
        write!(f, "0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let point = point as usize;
        if point >= digits.len() {
            write!(f, "{digits}{}.0", "0".repeat(point - digits.len()))
        } else {
            write!(f, "{}.{}", &digits[..point], &digits[point..])
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);
