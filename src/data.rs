use std::fmt;

/// The kinds of values a [`Cache`] can store.
///
/// Values are written to the store verbatim: text as UTF-8, bytes as-is and numbers as their
/// decimal representation, so an integer can be read back with [`Cache::get_int`].
///
/// [`Cache`]: ./struct.Cache.html
/// [`Cache::get_int`]: ./struct.Cache.html#method.get_int
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    /// UTF-8 text
    Text(String),
    /// an opaque binary blob
    Bytes(Vec<u8>),
    /// a signed integer
    Int(i64),
    /// a floating point number
    Float(f64),
}

impl Data {
    /// the bytes that are written to the store for this value
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Data::Text(s) => s.as_bytes().to_vec(),
            Data::Bytes(b) => b.clone(),
            Data::Int(n) => n.to_string().into_bytes(),
            // Debug keeps a trailing ".0" on whole numbers, so 3.0 is not read back as an int
            Data::Float(x) => format!("{:?}", x).into_bytes(),
        }
    }

    /// the representation of a call that took this value as its only argument,
    /// e.g. `("cat",)` or `(42,)`
    pub fn args_repr(&self) -> String {
        format!("({},)", self)
    }

    /// builds a value from command line text: integers become [`Data::Int`], other numbers
    /// [`Data::Float`] and everything else [`Data::Text`]
    pub fn infer(s: &str) -> Data {
        if let Ok(n) = s.parse::<i64>() {
            Data::Int(n)
        } else if let Some(x) = s.parse::<f64>().ok().filter(|x| x.is_finite()) {
            Data::Float(x)
        } else {
            Data::Text(s.to_owned())
        }
    }
}

/// the literal-like representation used in call history
impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Data::Text(s) => write!(f, "{:?}", s),
            Data::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            Data::Int(n) => write!(f, "{}", n),
            Data::Float(x) => write!(f, "{:?}", x),
        }
    }
}

impl From<String> for Data {
    fn from(s: String) -> Self {
        Data::Text(s)
    }
}

impl From<&str> for Data {
    fn from(s: &str) -> Self {
        Data::Text(s.to_owned())
    }
}

impl From<Vec<u8>> for Data {
    fn from(b: Vec<u8>) -> Self {
        Data::Bytes(b)
    }
}

impl From<&[u8]> for Data {
    fn from(b: &[u8]) -> Self {
        Data::Bytes(b.to_vec())
    }
}

impl From<i64> for Data {
    fn from(n: i64) -> Self {
        Data::Int(n)
    }
}

impl From<i32> for Data {
    fn from(n: i32) -> Self {
        Data::Int(n.into())
    }
}

impl From<f64> for Data {
    fn from(x: f64) -> Self {
        Data::Float(x)
    }
}

#[cfg(test)]
mod tests {
    use super::Data;

    #[test]
    fn stored_bytes() {
        assert_eq!(Data::from("cat").to_bytes(), b"cat");
        assert_eq!(Data::from(vec![0u8, 255]).to_bytes(), vec![0u8, 255]);
        assert_eq!(Data::from(-42).to_bytes(), b"-42");
        assert_eq!(Data::from(3.0).to_bytes(), b"3.0");
        assert_eq!(Data::from(0.25).to_bytes(), b"0.25");
    }

    #[test]
    fn call_representation() {
        assert_eq!(Data::from("cat").args_repr(), r#"("cat",)"#);
        assert_eq!(Data::from(42).args_repr(), "(42,)");
        assert_eq!(Data::from(2.5).args_repr(), "(2.5,)");
        assert_eq!(Data::from(&b"a\x00\""[..]).args_repr(), r#"(b"a\x00\"",)"#);
        assert_eq!(Data::from("say \"hi\"").to_string(), r#""say \"hi\"""#);
    }

    #[test]
    fn representation_uses_rust_literal_syntax() {
        assert_eq!(Data::from("café").to_string(), "\"café\"");
        assert_eq!(Data::from("del\u{7f}").to_string(), r#""del\u{7f}""#);
        assert_eq!(Data::from("tab\t").to_string(), r#""tab\t""#);
        assert_eq!(Data::from(1e20).to_string(), "1e20");
        assert_eq!(Data::from(-0.5).to_string(), "-0.5");
    }

    #[test]
    fn infer_from_text() {
        assert_eq!(Data::infer("42"), Data::Int(42));
        assert_eq!(Data::infer("-1.5"), Data::Float(-1.5));
        assert_eq!(Data::infer("cat"), Data::Text("cat".to_owned()));
        assert_eq!(Data::infer("NaN"), Data::Text("NaN".to_owned()));
        assert_eq!(Data::infer(""), Data::Text(String::new()));
    }
}
