//! Survey answers collected by the calculator form.
//!
//! `SurveyAnswers` is the typed, in-memory record the input form edits. It
//! only ever holds in-vocabulary values: form updates that don't parse are
//! dropped and the previous value stays.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_CYCLES, MIN_CYCLES};
use crate::error::{ParseError, Result};

/// Transport / form field names.
pub mod field {
    pub const AGE_RANGE: &str = "ageRange";
    pub const ICSI_PROCEDURE: &str = "icsiProcedure";
    pub const PGT_TESTING: &str = "pgtTesting";
    pub const IVF_CYCLES: &str = "ivfCycles";
    pub const MEDICAL_CONDITIONS: &str = "medicalConditions";
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeRange {
    #[default]
    #[serde(rename = "under-30")]
    Under30,
    #[serde(rename = "30-34")]
    From30To34,
    #[serde(rename = "35-37")]
    From35To37,
    #[serde(rename = "38-40")]
    From38To40,
    #[serde(rename = "41-43")]
    From41To43,
    #[serde(rename = "above-43")]
    Above43,
}

impl AgeRange {
    pub const ALL: [AgeRange; 6] = [
        AgeRange::Under30,
        AgeRange::From30To34,
        AgeRange::From35To37,
        AgeRange::From38To40,
        AgeRange::From41To43,
        AgeRange::Above43,
    ];

    /// Wire value, e.g. `"35-37"`.
    pub fn as_str(self) -> &'static str {
        match self {
            AgeRange::Under30 => "under-30",
            AgeRange::From30To34 => "30-34",
            AgeRange::From35To37 => "35-37",
            AgeRange::From38To40 => "38-40",
            AgeRange::From41To43 => "41-43",
            AgeRange::Above43 => "above-43",
        }
    }

    /// Human label shown next to the radio button and on the results page.
    pub fn label(self) -> &'static str {
        match self {
            AgeRange::Under30 => "Under 30",
            AgeRange::From30To34 => "30 - 34",
            AgeRange::From35To37 => "35 - 37",
            AgeRange::From38To40 => "38 - 40",
            AgeRange::From41To43 => "41 - 43",
            AgeRange::Above43 => "Above 43",
        }
    }

    /// Additive adjustment to the base rate.
    pub fn adjustment(self) -> f64 {
        match self {
            AgeRange::Under30 => 10.0,
            AgeRange::From30To34 => 5.0,
            AgeRange::From35To37 => -5.0,
            AgeRange::From38To40 => -10.0,
            AgeRange::From41To43 => -15.0,
            AgeRange::Above43 => -20.0,
        }
    }

    /// Exact lookup of a wire value. No trimming, no case folding.
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == value)
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_wire(s).ok_or_else(|| ParseError::AgeRange(s.to_string()))
    }
}

/// A yes/no radio answer, encoded as `"yes"` / `"no"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { YesNo::Yes } else { YesNo::No }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YesNo {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "yes" => Ok(YesNo::Yes),
            "no" => Ok(YesNo::No),
            other => Err(ParseError::YesNo(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MedicalCondition {
    #[serde(rename = "PCOS")]
    Pcos,
    Endometriosis,
    #[serde(rename = "Low Ovarian Reserve")]
    LowOvarianReserve,
    #[serde(rename = "Male Factor Infertility")]
    MaleFactorInfertility,
}

impl MedicalCondition {
    pub const ALL: [MedicalCondition; 4] = [
        MedicalCondition::Pcos,
        MedicalCondition::Endometriosis,
        MedicalCondition::LowOvarianReserve,
        MedicalCondition::MaleFactorInfertility,
    ];

    /// Tag text; doubles as the display label.
    pub fn as_str(self) -> &'static str {
        match self {
            MedicalCondition::Pcos => "PCOS",
            MedicalCondition::Endometriosis => "Endometriosis",
            MedicalCondition::LowOvarianReserve => "Low Ovarian Reserve",
            MedicalCondition::MaleFactorInfertility => "Male Factor Infertility",
        }
    }

    /// HTML id for the checkbox, e.g. `low-ovarian-reserve`.
    pub fn element_id(self) -> String {
        self.as_str().to_lowercase().replace(' ', "-")
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == tag)
    }
}

impl fmt::Display for MedicalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MedicalCondition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s).ok_or_else(|| ParseError::Condition(s.to_string()))
    }
}

/// The record edited by the calculator form.
///
/// `medical_conditions` keeps check order and never holds duplicates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyAnswers {
    pub age_range: AgeRange,
    pub ivf_cycles: u8,
    pub icsi_procedure: YesNo,
    pub pgt_testing: YesNo,
    pub medical_conditions: Vec<MedicalCondition>,
}

impl Default for SurveyAnswers {
    fn default() -> Self {
        Self {
            age_range: AgeRange::Under30,
            ivf_cycles: MIN_CYCLES,
            icsi_procedure: YesNo::No,
            pgt_testing: YesNo::No,
            medical_conditions: Vec::new(),
        }
    }
}

impl SurveyAnswers {
    /// Apply one form control change. Returns whether anything was accepted.
    ///
    /// Unknown names and out-of-vocabulary values leave the record untouched.
    /// Cycle counts are clamped to the slider range. A `medicalConditions`
    /// value replaces the whole selection with its known comma-separated tags.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        match name {
            field::AGE_RANGE => match AgeRange::from_wire(value) {
                Some(age) => {
                    self.age_range = age;
                    true
                }
                None => false,
            },
            field::ICSI_PROCEDURE => match value.parse::<YesNo>() {
                Ok(v) => {
                    self.icsi_procedure = v;
                    true
                }
                Err(_) => false,
            },
            field::PGT_TESTING => match value.parse::<YesNo>() {
                Ok(v) => {
                    self.pgt_testing = v;
                    true
                }
                Err(_) => false,
            },
            field::IVF_CYCLES => match value.trim().parse::<i64>() {
                Ok(n) => {
                    self.ivf_cycles = clamp_cycles(n);
                    true
                }
                Err(_) => false,
            },
            field::MEDICAL_CONDITIONS => {
                self.medical_conditions.clear();
                for condition in known_tags(value) {
                    self.set_condition(condition, true);
                }
                true
            }
            _ => false,
        }
    }

    /// Checkbox toggle: checking appends (once), unchecking removes.
    pub fn set_condition(&mut self, condition: MedicalCondition, checked: bool) {
        if checked {
            if !self.medical_conditions.contains(&condition) {
                self.medical_conditions.push(condition);
            }
        } else {
            self.medical_conditions.retain(|c| *c != condition);
        }
    }

    pub fn has_condition(&self, condition: MedicalCondition) -> bool {
        self.medical_conditions.contains(&condition)
    }

    /// Build answers from submitted form pairs, starting from the defaults.
    ///
    /// Every `medicalConditions` pair checks its tags, so both repeated
    /// checkbox pairs and a single comma-joined value are accepted.
    pub fn from_form<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut answers = Self::default();
        for (name, value) in pairs {
            let (name, value) = (name.as_ref(), value.as_ref());
            if name == field::MEDICAL_CONDITIONS {
                for condition in known_tags(value) {
                    answers.set_condition(condition, true);
                }
            } else {
                answers.set_field(name, value);
            }
        }
        answers
    }

    /// Comma-joined condition tags, as carried by the transport.
    pub fn conditions_joined(&self) -> String {
        self.medical_conditions
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn clamp_cycles(n: i64) -> u8 {
    n.clamp(i64::from(MIN_CYCLES), i64::from(MAX_CYCLES)) as u8
}

fn known_tags(value: &str) -> impl Iterator<Item = MedicalCondition> + '_ {
    value
        .split(',')
        .filter_map(|tag| MedicalCondition::from_tag(tag.trim()))
}
