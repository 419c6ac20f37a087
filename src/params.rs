//! imgproxy transformation parameters
//!
//! Every option the proxy understands is a [`ProxyOption`] variant with a fixed
//! wire code. [`ProxyParams`] keeps options in the order the caller set them,
//! which is the order they appear in the encoded path.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Transformation option understood by the image proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyOption {
    Resize,
    Size,
    Fit,
    Width,
    Height,
    Dpr,
    Enlarge,
    Extend,
    Gravity,
    Crop,
    Padding,
    Trim,
    Rotate,
    Quality,
    MaxBytes,
    Background,
    BackgroundAlpha,
    Blur,
    Sharpen,
    Watermark,
    Preset,
    CacheBuster,
    StripMetadata,
    StripColorProfile,
    AutoRotate,
    Filename,
    Format,
}

impl ProxyOption {
    /// All options in declaration order
    pub const ALL: [ProxyOption; 27] = [
        Self::Resize,
        Self::Size,
        Self::Fit,
        Self::Width,
        Self::Height,
        Self::Dpr,
        Self::Enlarge,
        Self::Extend,
        Self::Gravity,
        Self::Crop,
        Self::Padding,
        Self::Trim,
        Self::Rotate,
        Self::Quality,
        Self::MaxBytes,
        Self::Background,
        Self::BackgroundAlpha,
        Self::Blur,
        Self::Sharpen,
        Self::Watermark,
        Self::Preset,
        Self::CacheBuster,
        Self::StripMetadata,
        Self::StripColorProfile,
        Self::AutoRotate,
        Self::Filename,
        Self::Format,
    ];

    /// Wire code used in the encoded path. Changing any of these breaks
    /// compatibility with the proxy server.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Resize => "rs",
            Self::Size => "s",
            Self::Fit => "rt",
            Self::Width => "w",
            Self::Height => "h",
            Self::Dpr => "dpr",
            Self::Enlarge => "el",
            Self::Extend => "ex",
            Self::Gravity => "g",
            Self::Crop => "c",
            Self::Padding => "pd",
            Self::Trim => "t",
            Self::Rotate => "rot",
            Self::Quality => "q",
            Self::MaxBytes => "mb",
            Self::Background => "bg",
            Self::BackgroundAlpha => "bga",
            Self::Blur => "bl",
            Self::Sharpen => "sh",
            Self::Watermark => "wm",
            Self::Preset => "pr",
            Self::CacheBuster => "cb",
            Self::StripMetadata => "sm",
            Self::StripColorProfile => "scp",
            Self::AutoRotate => "ar",
            Self::Filename => "fn",
            Self::Format => "f",
        }
    }

    /// Option name as used by callers (camelCase)
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Resize => "resize",
            Self::Size => "size",
            Self::Fit => "fit",
            Self::Width => "width",
            Self::Height => "height",
            Self::Dpr => "dpr",
            Self::Enlarge => "enlarge",
            Self::Extend => "extend",
            Self::Gravity => "gravity",
            Self::Crop => "crop",
            Self::Padding => "padding",
            Self::Trim => "trim",
            Self::Rotate => "rotate",
            Self::Quality => "quality",
            Self::MaxBytes => "maxBytes",
            Self::Background => "background",
            Self::BackgroundAlpha => "backgroundAlpha",
            Self::Blur => "blur",
            Self::Sharpen => "sharpen",
            Self::Watermark => "watermark",
            Self::Preset => "preset",
            Self::CacheBuster => "cacheBuster",
            Self::StripMetadata => "stripMetadata",
            Self::StripColorProfile => "stripColorProfile",
            Self::AutoRotate => "autoRotate",
            Self::Filename => "filename",
            Self::Format => "format",
        }
    }

    /// Look up an option by its wire code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|opt| opt.code() == code)
    }
}

impl fmt::Display for ProxyOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProxyOption {
    type Err = Error;

    /// Accepts the option name (`maxBytes`) or its wire code (`mb`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|opt| opt.name() == s)
            .or_else(|| Self::from_code(s))
            .ok_or_else(|| Error::unknown_parameter(s))
    }
}

/// Value of a transformation option
///
/// Rendered into the path with its natural textual form (`true`, `42`, `1.5`).
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Float(n) => write!(f, "{}", n),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Float(f64::from(value))
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Ordered set of transformation options
///
/// Insertion order is preserved. Setting an option that is already present
/// replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProxyParams {
    entries: Vec<(ProxyOption, ParamValue)>,
}

impl ProxyParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, option: ProxyOption, value: impl Into<ParamValue>) -> Self {
        self.set(option, value);
        self
    }

    /// Builder-style [`set_opt`](Self::set_opt)
    pub fn with_opt<V: Into<ParamValue>>(mut self, option: ProxyOption, value: Option<V>) -> Self {
        self.set_opt(option, value);
        self
    }

    pub fn set(&mut self, option: ProxyOption, value: impl Into<ParamValue>) -> &mut Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(opt, _)| *opt == option) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((option, value)),
        }
        self
    }

    /// Set an optional value. `None` leaves the option out of the path.
    pub fn set_opt<V: Into<ParamValue>>(
        &mut self,
        option: ProxyOption,
        value: Option<V>,
    ) -> &mut Self {
        match value {
            Some(value) => self.set(option, value),
            None => {
                self.remove(option);
                self
            }
        }
    }

    pub fn remove(&mut self, option: ProxyOption) -> Option<ParamValue> {
        let idx = self.entries.iter().position(|(opt, _)| *opt == option)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn get(&self, option: ProxyOption) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(opt, _)| *opt == option)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProxyOption, &ParamValue)> {
        self.entries.iter().map(|(opt, value)| (*opt, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build from loosely-typed `(name, value)` pairs
    ///
    /// Names are matched by option name or wire code. An unknown name fails the
    /// whole call instead of producing a malformed segment.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ParamValue>,
    {
        let mut params = Self::new();
        for (name, value) in pairs {
            let option: ProxyOption = name.as_ref().parse()?;
            params.set(option, value);
        }
        Ok(params)
    }

    /// Parse a `name=value` assignment, as given on the command line
    pub fn parse_assignment(assignment: &str) -> Result<(ProxyOption, ParamValue), Error> {
        let (name, value) = assignment.split_once('=').ok_or_else(|| {
            Error::InvalidAssignment(format!("expected name=value, got '{}'", assignment))
        })?;
        Ok((name.trim().parse()?, ParamValue::from(value)))
    }
}

impl<V: Into<ParamValue>> FromIterator<(ProxyOption, V)> for ProxyParams {
    fn from_iter<I: IntoIterator<Item = (ProxyOption, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (option, value) in iter {
            params.set(option, value);
        }
        params
    }
}
