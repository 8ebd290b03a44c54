//! Passenger record submitted to the prediction service
//!
//! Every field serializes as a number under the wire names the service
//! expects (`Pclass`, `Sex`, `Age`, `SibSp`, `Parch`, `Fare`, `Embarked`).
//! Categorical fields are enumerated types; continuous and count fields are
//! edited from raw text through [`coerce_number`] and [`coerce_count`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cabin class, 1 = highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PassengerClass {
    First,
    Second,
    Third,
}

impl From<PassengerClass> for u8 {
    fn from(class: PassengerClass) -> u8 {
        match class {
            PassengerClass::First => 1,
            PassengerClass::Second => 2,
            PassengerClass::Third => 3,
        }
    }
}

impl TryFrom<u8> for PassengerClass {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PassengerClass::First),
            2 => Ok(PassengerClass::Second),
            3 => Ok(PassengerClass::Third),
            other => Err(format!("passenger class must be 1, 2 or 3 (got {})", other)),
        }
    }
}

impl fmt::Display for PassengerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassengerClass::First => write!(f, "1st Class"),
            PassengerClass::Second => write!(f, "2nd Class"),
            PassengerClass::Third => write!(f, "3rd Class"),
        }
    }
}

/// Passenger sex, 0 = female, 1 = male
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Sex {
    Female,
    Male,
}

impl From<Sex> for u8 {
    fn from(sex: Sex) -> u8 {
        match sex {
            Sex::Female => 0,
            Sex::Male => 1,
        }
    }
}

impl TryFrom<u8> for Sex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Sex::Female),
            1 => Ok(Sex::Male),
            other => Err(format!("sex must be 0 or 1 (got {})", other)),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Female => write!(f, "Female"),
            Sex::Male => write!(f, "Male"),
        }
    }
}

/// Port of embarkation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Port {
    Cherbourg,
    Queenstown,
    Southampton,
}

impl From<Port> for u8 {
    fn from(port: Port) -> u8 {
        match port {
            Port::Cherbourg => 0,
            Port::Queenstown => 1,
            Port::Southampton => 2,
        }
    }
}

impl TryFrom<u8> for Port {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Port::Cherbourg),
            1 => Ok(Port::Queenstown),
            2 => Ok(Port::Southampton),
            other => Err(format!("port must be 0, 1 or 2 (got {})", other)),
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Cherbourg => write!(f, "Cherbourg"),
            Port::Queenstown => write!(f, "Queenstown"),
            Port::Southampton => write!(f, "Southampton"),
        }
    }
}

/// The seven passenger attributes sent to the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerInput {
    #[serde(rename = "Pclass")]
    pub class: PassengerClass,
    #[serde(rename = "Sex")]
    pub sex: Sex,
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "SibSp")]
    pub siblings_spouses: u32,
    #[serde(rename = "Parch")]
    pub parents_children: u32,
    #[serde(rename = "Fare")]
    pub fare: f64,
    #[serde(rename = "Embarked")]
    pub embarked: Port,
}

impl Default for PassengerInput {
    fn default() -> Self {
        PassengerInput {
            class: PassengerClass::Third,
            sex: Sex::Female,
            age: 30.0,
            siblings_spouses: 0,
            parents_children: 0,
            fare: 50.0,
            embarked: Port::Southampton,
        }
    }
}

/// A single-field edit. Text edits are coerced, never rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldEdit<'a> {
    Class(PassengerClass),
    Sex(Sex),
    Embarked(Port),
    Age(&'a str),
    Fare(&'a str),
    SiblingsSpouses(&'a str),
    ParentsChildren(&'a str),
}

/// Fields edited from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Age,
    Fare,
    SiblingsSpouses,
    ParentsChildren,
}

impl NumericField {
    pub const ALL: [NumericField; 4] = [
        NumericField::Age,
        NumericField::Fare,
        NumericField::SiblingsSpouses,
        NumericField::ParentsChildren,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NumericField::Age => "Age (years)",
            NumericField::Fare => "Fare",
            NumericField::SiblingsSpouses => "Siblings/Spouses Aboard",
            NumericField::ParentsChildren => "Parents/Children Aboard",
        }
    }

    pub fn edit(self, raw: &str) -> FieldEdit<'_> {
        match self {
            NumericField::Age => FieldEdit::Age(raw),
            NumericField::Fare => FieldEdit::Fare(raw),
            NumericField::SiblingsSpouses => FieldEdit::SiblingsSpouses(raw),
            NumericField::ParentsChildren => FieldEdit::ParentsChildren(raw),
        }
    }

    /// Current value, formatted for display.
    pub fn current(self, input: &PassengerInput) -> String {
        match self {
            NumericField::Age => input.age.to_string(),
            NumericField::Fare => input.fare.to_string(),
            NumericField::SiblingsSpouses => input.siblings_spouses.to_string(),
            NumericField::ParentsChildren => input.parents_children.to_string(),
        }
    }
}

impl PassengerInput {
    /// Apply one edit; all other fields keep their values.
    pub fn apply(&mut self, edit: FieldEdit<'_>) {
        match edit {
            FieldEdit::Class(class) => self.class = class,
            FieldEdit::Sex(sex) => self.sex = sex,
            FieldEdit::Embarked(port) => self.embarked = port,
            FieldEdit::Age(raw) => self.age = coerce_number(raw),
            FieldEdit::Fare(raw) => self.fare = coerce_number(raw),
            FieldEdit::SiblingsSpouses(raw) => self.siblings_spouses = coerce_count(raw),
            FieldEdit::ParentsChildren(raw) => self.parents_children = coerce_count(raw),
        }
    }

    /// Values outside the documented bounds. These never block submission.
    pub fn domain_warnings(&self) -> Vec<DomainWarning> {
        let mut warnings = Vec::new();
        if !(0.0..=100.0).contains(&self.age) {
            warnings.push(DomainWarning {
                field: "Age",
                value: self.age,
                expected: "between 0 and 100",
            });
        }
        if self.fare < 0.0 {
            warnings.push(DomainWarning {
                field: "Fare",
                value: self.fare,
                expected: "non-negative",
            });
        }
        warnings
    }
}

/// An out-of-bounds value that is still submitted as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainWarning {
    pub field: &'static str,
    pub value: f64,
    pub expected: &'static str,
}

impl fmt::Display for DomainWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} should be {} (value: {})", self.field, self.expected, self.value)
    }
}

/// Coerce free text to a finite number.
///
/// Leading whitespace is skipped and the longest leading decimal literal is
/// parsed, so trailing garbage is ignored. Empty, non-numeric and
/// non-finite input all become 0.
pub fn coerce_number(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - (end + 1);
        if mantissa_digits > 0 || frac_digits > 0 {
            end = frac_end;
            mantissa_digits += frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    match text[..end].parse::<f64>() {
        // -0 collapses to 0 as well
        Ok(value) if value.is_finite() && value != 0.0 => value,
        _ => 0.0,
    }
}

/// Coerce free text to a head count: the number is truncated toward zero
/// and anything negative becomes 0.
pub fn coerce_count(raw: &str) -> u32 {
    let value = coerce_number(raw);
    if value <= 0.0 {
        0
    } else if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value.trunc() as u32
    }
}
