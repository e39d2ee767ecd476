//! Transport codec: survey answers <-> URL query string.
//!
//! The query string is the only thing that travels from the input form to the
//! results page. Decoding is deliberately untyped: every value stays a string,
//! and consumers reparse what they need (the calculator reparses `ivfCycles`,
//! nothing turns `medicalConditions` back into a set).

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::answers::{SurveyAnswers, field};
use crate::score::parse_cycles;

/// Encode answers as `application/x-www-form-urlencoded` key/value pairs.
///
/// Key order is fixed: ageRange, icsiProcedure, pgtTesting, ivfCycles,
/// medicalConditions. Conditions are comma-joined into one value.
pub fn encode(answers: &SurveyAnswers) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(field::AGE_RANGE, answers.age_range.as_str())
        .append_pair(field::ICSI_PROCEDURE, answers.icsi_procedure.as_str())
        .append_pair(field::PGT_TESTING, answers.pgt_testing.as_str())
        .append_pair(field::IVF_CYCLES, &answers.ivf_cycles.to_string())
        .append_pair(field::MEDICAL_CONDITIONS, &answers.conditions_joined())
        .finish()
}

/// Decode a query string into a flat string record.
///
/// A leading `?` is ignored. Repeated keys keep the last value; a key without
/// `=` decodes to an empty value. Never fails.
pub fn decode(query: &str) -> TransportRecord {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// Decoded transport record: every parameter as a string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransportRecord {
    params: BTreeMap<String, String>,
}

impl TransportRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn age_range(&self) -> Option<&str> {
        self.get(field::AGE_RANGE)
    }

    pub fn icsi_procedure(&self) -> Option<&str> {
        self.get(field::ICSI_PROCEDURE)
    }

    pub fn pgt_testing(&self) -> Option<&str> {
        self.get(field::PGT_TESTING)
    }

    pub fn ivf_cycles(&self) -> Option<&str> {
        self.get(field::IVF_CYCLES)
    }

    pub fn medical_conditions(&self) -> Option<&str> {
        self.get(field::MEDICAL_CONDITIONS)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Rebuild typed answers, applying the same fallbacks as the input form.
    ///
    /// The cycle count is reparsed like the calculator does and only
    /// saturated into `u8`; the slider range is not applied here.
    pub fn to_answers(&self) -> SurveyAnswers {
        let mut answers = SurveyAnswers::from_form(self.iter());
        let cycles = parse_cycles(self.ivf_cycles());
        answers.ivf_cycles = cycles.clamp(0, i64::from(u8::MAX)) as u8;
        answers
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TransportRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}
