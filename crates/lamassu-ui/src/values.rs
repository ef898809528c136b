use std::fmt;

use lamassu_core::coords::{Angle, Vector};
use lamassu_core::paint::Color;

// ── ValueKind ─────────────────────────────────────────────────────────────

/// The literal grammars a bindable property can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Str,
    /// `#rrggbb` or `#rrggbbaa`.
    Color,
    /// `[x,y,z]`, exactly three comma-separated numeric components.
    Vector,
    /// A bare number (degrees) or a `deg`/`rad` suffixed number.
    Angle,
    /// A closed set of variant names, matched case-sensitively.
    Enum(&'static [&'static str]),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
            ValueKind::Color => "color",
            ValueKind::Vector => "vector",
            ValueKind::Angle => "angle",
            ValueKind::Enum(_) => "enum",
        };
        f.write_str(s)
    }
}

// ── Value ─────────────────────────────────────────────────────────────────

/// A parsed literal value, ready to store on an object.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Color(Color),
    Vector(Vector),
    Angle(Angle),
    /// Canonical variant name from the descriptor's list.
    Enum(&'static str),
}

// ── ValueError ────────────────────────────────────────────────────────────

/// A literal failed its kind's grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueError {
    BadBool { raw: String },
    BadNumber { raw: String },
    BadColor { raw: String },
    /// A vector literal with the wrong component count.
    ArityMismatch { expected: usize, got: usize },
    UnknownVariant { raw: String, allowed: &'static [&'static str] },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::BadBool { raw } => {
                write!(f, "expected true or false, got {:?}", raw)
            }
            ValueError::BadNumber { raw } => write!(f, "invalid number {:?}", raw),
            ValueError::BadColor { raw } => {
                write!(f, "color literal must be #rrggbb or #rrggbbaa, got {:?}", raw)
            }
            ValueError::ArityMismatch { expected, got } => {
                write!(f, "vector literals have {} comma-separated components, got {}", expected, got)
            }
            ValueError::UnknownVariant { raw, allowed } => {
                write!(f, "unknown variant {:?}, expected one of {}", raw, allowed.join(", "))
            }
        }
    }
}

impl std::error::Error for ValueError {}

// ── parse_value ───────────────────────────────────────────────────────────

/// Parse a raw markup literal against the grammar `kind` declares.
///
/// Pure: no side effects, and failure never aborts anything by itself. The
/// caller decides whether a failed property is fatal for the document.
pub fn parse_value(kind: ValueKind, raw: &str) -> Result<Value, ValueError> {
    let trimmed = raw.trim();
    match kind {
        ValueKind::Bool => match trimmed {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(ValueError::BadBool { raw: raw.to_string() }),
        },
        ValueKind::Int => trimmed
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ValueError::BadNumber { raw: raw.to_string() }),
        ValueKind::Float => parse_f64(trimmed).map(Value::Float),
        // Strings pass through untrimmed: leading/trailing whitespace in an
        // attribute literal is intentional content.
        ValueKind::Str => Ok(Value::Str(raw.to_string())),
        ValueKind::Color => parse_color(trimmed).map(Value::Color),
        ValueKind::Vector => parse_vector(trimmed).map(Value::Vector),
        ValueKind::Angle => parse_angle(trimmed).map(Value::Angle),
        ValueKind::Enum(allowed) => allowed
            .iter()
            .find(|v| **v == trimmed)
            .copied()
            .map(Value::Enum)
            .ok_or_else(|| ValueError::UnknownVariant { raw: raw.to_string(), allowed }),
    }
}

fn parse_f64(raw: &str) -> Result<f64, ValueError> {
    raw.parse::<f64>().map_err(|_| ValueError::BadNumber { raw: raw.to_string() })
}

fn parse_color(raw: &str) -> Result<Color, ValueError> {
    let bad = || ValueError::BadColor { raw: raw.to_string() };
    let hex = raw.strip_prefix('#').ok_or_else(bad)?;
    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(bad());
    }
    // All characters were validated as ascii_hexdigit above, and 2 hex
    // digits fit in u8 (max 0xFF = 255), so these conversions never fail.
    let r = u8::from_str_radix(&hex[0..2], 16).expect("validated hex digits");
    let g = u8::from_str_radix(&hex[2..4], 16).expect("validated hex digits");
    let b = u8::from_str_radix(&hex[4..6], 16).expect("validated hex digits");
    let a = if hex.len() == 8 {
        u8::from_str_radix(&hex[6..8], 16).expect("validated hex digits")
    } else {
        255
    };
    Ok(Color::from_srgb_u8(r, g, b, a))
}

/// `[x,y,z]`. The brackets are optional, matching what document authors
/// actually write; the component count is not.
fn parse_vector(raw: &str) -> Result<Vector, ValueError> {
    let mut s = raw;
    if let Some(t) = s.strip_prefix('[') {
        s = t;
    }
    if let Some(t) = s.strip_suffix(']') {
        s = t;
    }
    let comps: Vec<&str> = s.split(',').collect();
    if comps.len() != 3 {
        return Err(ValueError::ArityMismatch { expected: 3, got: comps.len() });
    }
    let x = parse_f64(comps[0].trim())?;
    let y = parse_f64(comps[1].trim())?;
    let z = parse_f64(comps[2].trim())?;
    Ok(Vector::new(x, y, z))
}

fn parse_angle(raw: &str) -> Result<Angle, ValueError> {
    if let Some(v) = raw.strip_suffix("deg") {
        parse_f64(v.trim()).map(Angle::from_degrees)
    } else if let Some(v) = raw.strip_suffix("rad") {
        parse_f64(v.trim()).map(Angle::from_radians)
    } else {
        parse_f64(raw).map(Angle::from_degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_literal() {
        assert_eq!(
            parse_value(ValueKind::Vector, "[1, 2.5, -3]").unwrap(),
            Value::Vector(Vector::new(1.0, 2.5, -3.0))
        );
    }

    #[test]
    fn vector_brackets_optional() {
        assert_eq!(
            parse_value(ValueKind::Vector, "0,0,1").unwrap(),
            Value::Vector(Vector::new(0.0, 0.0, 1.0))
        );
    }

    #[test]
    fn vector_arity() {
        assert_eq!(
            parse_value(ValueKind::Vector, "[1,2]").unwrap_err(),
            ValueError::ArityMismatch { expected: 3, got: 2 }
        );
        assert_eq!(
            parse_value(ValueKind::Vector, "[1,2,3,4]").unwrap_err(),
            ValueError::ArityMismatch { expected: 3, got: 4 }
        );
    }

    #[test]
    fn vector_bad_component() {
        assert!(matches!(
            parse_value(ValueKind::Vector, "[1,x,3]").unwrap_err(),
            ValueError::BadNumber { .. }
        ));
    }

    #[test]
    fn color_6_digit_gets_opaque_alpha() {
        let Value::Color(c) = parse_value(ValueKind::Color, "#ff0000").unwrap() else {
            panic!("expected a color");
        };
        assert_eq!(c.a, 1.0);
        assert_eq!(c.r, 1.0);
    }

    #[test]
    fn color_8_digit() {
        let Value::Color(c) = parse_value(ValueKind::Color, "#00000080").unwrap() else {
            panic!("expected a color");
        };
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn bad_colors() {
        for raw in ["red", "#xyzxyz", "#12345", "#1234567"] {
            assert!(matches!(
                parse_value(ValueKind::Color, raw).unwrap_err(),
                ValueError::BadColor { .. }
            ));
        }
    }

    #[test]
    fn angle_suffixes() {
        let deg = parse_value(ValueKind::Angle, "90").unwrap();
        let deg2 = parse_value(ValueKind::Angle, "90deg").unwrap();
        assert_eq!(deg, deg2);
        let Value::Angle(a) = parse_value(ValueKind::Angle, "1.5rad").unwrap() else {
            panic!("expected an angle");
        };
        assert_eq!(a.radians(), 1.5);
    }

    #[test]
    fn enum_variant_is_canonical() {
        const DIRS: &[&str] = &["Horizontal", "Vertical"];
        assert_eq!(
            parse_value(ValueKind::Enum(DIRS), "Vertical").unwrap(),
            Value::Enum("Vertical")
        );
        assert!(matches!(
            parse_value(ValueKind::Enum(DIRS), "vertical").unwrap_err(),
            ValueError::UnknownVariant { .. }
        ));
    }

    #[test]
    fn bool_literals() {
        assert_eq!(parse_value(ValueKind::Bool, "true").unwrap(), Value::Bool(true));
        assert!(matches!(
            parse_value(ValueKind::Bool, "True").unwrap_err(),
            ValueError::BadBool { .. }
        ));
    }

    #[test]
    fn strings_keep_whitespace() {
        assert_eq!(
            parse_value(ValueKind::Str, "  padded  ").unwrap(),
            Value::Str("  padded  ".to_string())
        );
    }
}
