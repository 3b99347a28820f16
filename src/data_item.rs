//! `DataItem` attributes: defaults, legality and parsing

use std::str::FromStr;

use crate::diagnostics::Diagnostic;
use crate::error::{CheckError, Result};

pub const DEFAULT_NUMBER_TYPE: &str = "Float";
pub const DEFAULT_PRECISION: i128 = 4;
pub const DEFAULT_FORMAT: &str = "XML";

/// Legal values of the `NumberType` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberType {
    Float,
    Int,
    UInt,
    Char,
    UChar,
}

impl NumberType {
    /// Element type tag expected in the container for this number type
    ///
    /// Only Float and Int have a tag; UInt, Char and UChar are never compared.
    pub fn expected_type_tag(self, precision: i128) -> Option<String> {
        match self {
            NumberType::Float => Some(format!("float{}", bit_width(precision))),
            NumberType::Int => Some(format!("int{}", bit_width(precision))),
            NumberType::UInt | NumberType::Char | NumberType::UChar => None,
        }
    }
}

/// Decimal text of `precision * 8`, exact for every `i128`
fn bit_width(precision: i128) -> String {
    let magnitude = precision.unsigned_abs();
    let (tens, units) = (magnitude / 10, magnitude % 10);
    // 8 * (10 * tens + units) = 10 * (8 * tens + 8 * units / 10) + 8 * units % 10
    let high = tens * 8 + units * 8 / 10;
    let low = units * 8 % 10;
    let sign = if precision < 0 { "-" } else { "" };

    if high == 0 {
        format!("{}{}", sign, low)
    } else {
        format!("{}{}{}", sign, high, low)
    }
}

impl FromStr for NumberType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Float" => Ok(NumberType::Float),
            "Int" => Ok(NumberType::Int),
            "UInt" => Ok(NumberType::UInt),
            "Char" => Ok(NumberType::Char),
            "UChar" => Ok(NumberType::UChar),
            _ => Err(()),
        }
    }
}

/// Legal values of the `Format` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Xml,
    Hdf,
    Binary,
}

impl FromStr for Format {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "XML" => Ok(Format::Xml),
            "HDF" => Ok(Format::Hdf),
            "Binary" => Ok(Format::Binary),
            _ => Err(()),
        }
    }
}

/// Raw view of one `DataItem` element as produced by the document walker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataItemElement<'a> {
    pub line: u32,
    pub number_type: Option<&'a str>,
    pub precision: Option<&'a str>,
    pub format: Option<&'a str>,
    pub dimensions: Option<&'a str>,
    pub text: &'a str,
}

/// A `DataItem` with every attribute resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataReference<'a> {
    pub line: u32,
    pub number_type: &'a str,
    pub precision: i128,
    pub format: &'a str,
    pub dimensions: Vec<u64>,
    pub locator: &'a str,
}

/// Outcome of attribute resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Resolved(DataReference<'a>),
    MissingDimensions,
}

impl<'a> DataReference<'a> {
    /// Apply attribute defaults and parse the integer attributes
    ///
    /// `Precision` is parsed before the presence of `Dimensions` is checked, so
    /// a malformed precision is fatal even on an element without dimensions.
    pub fn resolve(element: &DataItemElement<'a>) -> Result<Resolution<'a>> {
        let number_type = element.number_type.unwrap_or(DEFAULT_NUMBER_TYPE);
        let precision = match element.precision {
            Some(text) => parse_precision(text, element.line)?,
            None => DEFAULT_PRECISION,
        };
        let format = element.format.unwrap_or(DEFAULT_FORMAT);

        let Some(dimensions) = element.dimensions else {
            return Ok(Resolution::MissingDimensions);
        };

        Ok(Resolution::Resolved(DataReference {
            line: element.line,
            number_type,
            precision,
            format,
            dimensions: parse_dimensions(dimensions, element.line)?,
            locator: element.text.trim(),
        }))
    }

    pub fn parsed_number_type(&self) -> Option<NumberType> {
        self.number_type.parse().ok()
    }

    pub fn parsed_format(&self) -> Option<Format> {
        self.format.parse().ok()
    }

    /// Independent legality checks; every violation is returned
    pub fn legality_violations(&self) -> Vec<Diagnostic> {
        let mut violations = Vec::new();
        let number_type = self.parsed_number_type();

        if number_type.is_none() {
            violations.push(Diagnostic::InvalidNumberType {
                value: self.number_type.to_string(),
            });
        }

        if ![1, 2, 4, 8].contains(&self.precision) {
            violations.push(Diagnostic::InvalidPrecision {
                value: self.precision,
            });
        } else if self.precision == 2
            && !matches!(number_type, Some(NumberType::Int) | Some(NumberType::UInt))
        {
            violations.push(Diagnostic::PrecisionTwoNotAllowed);
        }

        if self.parsed_format().is_none() {
            violations.push(Diagnostic::InvalidFormat {
                value: self.format.to_string(),
            });
        }

        violations
    }

    /// Expected container type tag, if the number type has one
    pub fn expected_type_tag(&self) -> Option<String> {
        self.parsed_number_type()
            .and_then(|number_type| number_type.expected_type_tag(self.precision))
    }
}

fn parse_precision(text: &str, line: u32) -> Result<i128> {
    text.trim()
        .parse()
        .map_err(|_| CheckError::InvalidInteger {
            attribute: "Precision",
            value: text.to_string(),
            line,
        })
}

/// Parse whitespace-separated non-negative extents
pub fn parse_dimensions(text: &str, line: u32) -> Result<Vec<u64>> {
    text.split_whitespace()
        .map(|token| {
            token.parse().map_err(|_| CheckError::InvalidInteger {
                attribute: "Dimensions",
                value: token.to_string(),
                line,
            })
        })
        .collect()
}
