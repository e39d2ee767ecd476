//! Success-rate calculator.
//!
//! rate = clamp((50 + age + icsi + pgt - endometriosis) * (1 - e^(-cycles/3)), 0, 100)
//!
//! Works on the decoded transport record, so it sees exactly what the results
//! page received. Missing or malformed values never fail: unknown age ranges
//! skip the age term and a bad cycle count falls back to 1.

use serde::Serialize;

use crate::answers::{AgeRange, SurveyAnswers};
use crate::codec::{self, TransportRecord};
use crate::constants::{
    BASE_RATE, DECAY_SCALE, DEFAULT_CYCLES, ENDOMETRIOSIS_PENALTY, ENDOMETRIOSIS_TAG, ICSI_BONUS,
    PGT_BONUS, RATE_CEILING, RATE_FLOOR,
};

/// Every intermediate term of one estimate.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub base: f64,
    pub age_adjustment: f64,
    pub icsi_bonus: f64,
    pub pgt_bonus: f64,
    pub endometriosis_penalty: f64,
    /// base + adjustments - penalty
    pub pre_decay: f64,
    pub cycles: i64,
    pub decay_factor: f64,
    /// pre_decay * decay_factor, before clamping
    pub raw: f64,
    /// Final estimate in [0, 100].
    pub rate: f64,
}

/// Estimated success rate in percent, always finite and within [0, 100].
pub fn compute(record: &TransportRecord) -> f64 {
    breakdown(record).rate
}

pub fn breakdown(record: &TransportRecord) -> ScoreBreakdown {
    let age_adjustment = record
        .age_range()
        .and_then(AgeRange::from_wire)
        .map_or(0.0, AgeRange::adjustment);
    let icsi_bonus = if record.icsi_procedure() == Some("yes") {
        ICSI_BONUS
    } else {
        0.0
    };
    let pgt_bonus = if record.pgt_testing() == Some("yes") {
        PGT_BONUS
    } else {
        0.0
    };
    // Substring match on the joined list, not set membership.
    let endometriosis_penalty = if record
        .medical_conditions()
        .is_some_and(|c| c.contains(ENDOMETRIOSIS_TAG))
    {
        ENDOMETRIOSIS_PENALTY
    } else {
        0.0
    };

    let pre_decay = BASE_RATE + age_adjustment + icsi_bonus + pgt_bonus - endometriosis_penalty;
    let cycles = parse_cycles(record.ivf_cycles());
    let decay_factor = decay_factor(cycles);
    let raw = pre_decay * decay_factor;

    ScoreBreakdown {
        base: BASE_RATE,
        age_adjustment,
        icsi_bonus,
        pgt_bonus,
        endometriosis_penalty,
        pre_decay,
        cycles,
        decay_factor,
        raw,
        rate: clamp_rate(raw),
    }
}

/// Diminishing returns for repeated cycles: 1 - e^(-cycles/3).
pub fn decay_factor(cycles: i64) -> f64 {
    1.0 - (-(cycles as f64) / DECAY_SCALE).exp()
}

/// Clamp into [0, 100]; NaN maps to 0.
pub fn clamp_rate(raw: f64) -> f64 {
    if raw.is_nan() {
        return RATE_FLOOR;
    }
    raw.clamp(RATE_FLOOR, RATE_CEILING)
}

/// Leading-integer parse of `ivfCycles`.
///
/// Accepts optional leading whitespace, an optional sign and decimal digits;
/// anything after the digits is ignored (`"3x"` -> 3, `"2.5"` -> 2). Absent,
/// empty or digit-less values give the default of 1. Overflow saturates.
pub fn parse_cycles(value: Option<&str>) -> i64 {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return DEFAULT_CYCLES;
    };
    let s = value.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return DEFAULT_CYCLES;
    }
    let digits = &rest[..digits_len];
    match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    }
}

impl SurveyAnswers {
    /// Score typed answers by sending them through the transport codec, so the
    /// result matches what the results page computes for the same answers.
    pub fn success_rate(&self) -> f64 {
        compute(&codec::decode(&codec::encode(self)))
    }

    pub fn score_breakdown(&self) -> ScoreBreakdown {
        breakdown(&codec::decode(&codec::encode(self)))
    }
}
