use serde::Serialize;

use crate::answers::{AgeRange, YesNo};
use crate::codec::TransportRecord;
use crate::score::{ScoreBreakdown, breakdown, parse_cycles};

/// Everything the results page shows for one decoded query.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub rate: f64,
    /// Rate rounded to a whole percent.
    pub rate_display: u8,
    pub cycles: i64,
    pub cycles_label: String,
    pub age_range: String,
    pub icsi_procedure: &'static str,
    pub pgt_testing: &'static str,
    pub medical_conditions: String,
    #[serde(skip)]
    pub breakdown: ScoreBreakdown,
}

impl ResultSummary {
    pub fn from_record(record: &TransportRecord) -> Self {
        let breakdown = breakdown(record);
        let cycles = parse_cycles(record.ivf_cycles());
        Self {
            rate: breakdown.rate,
            rate_display: rate_display(breakdown.rate),
            cycles,
            cycles_label: cycles_label(cycles),
            age_range: age_label(record.age_range()),
            icsi_procedure: yes_no_label(record.icsi_procedure()),
            pgt_testing: yes_no_label(record.pgt_testing()),
            medical_conditions: conditions_label(record.medical_conditions()),
            breakdown,
        }
    }
}

fn rate_display(rate: f64) -> u8 {
    rate.round().clamp(0.0, 100.0) as u8
}

/// "With 1 IVF Cycle", "With 3 IVF Cycles"
pub fn cycles_label(cycles: i64) -> String {
    let plural = if cycles == 1 { "" } else { "s" };
    format!("With {cycles} IVF Cycle{plural}")
}

/// Known wire values map to their form label; anything else is echoed raw.
pub fn age_label(value: Option<&str>) -> String {
    match value {
        Some(v) => AgeRange::from_wire(v).map_or_else(|| v.to_string(), |a| a.label().to_string()),
        None => String::new(),
    }
}

pub fn yes_no_label(value: Option<&str>) -> &'static str {
    if value == Some(YesNo::Yes.as_str()) {
        YesNo::Yes.label()
    } else {
        YesNo::No.label()
    }
}

/// Comma-joined tags re-joined with ", "; "None" when nothing was selected.
pub fn conditions_label(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.split(',').collect::<Vec<_>>().join(", "),
        _ => "None".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;

    #[test]
    fn test_summary_echoes_inputs() {
        let s = ResultSummary::from_record(&decode(
            "ageRange=35-37&icsiProcedure=yes&pgtTesting=no&ivfCycles=4&medicalConditions=PCOS%2CEndometriosis",
        ));
        assert_eq!(s.age_range, "35 - 37");
        assert_eq!(s.icsi_procedure, "Yes");
        assert_eq!(s.pgt_testing, "No");
        assert_eq!(s.medical_conditions, "PCOS, Endometriosis");
        assert_eq!(s.cycles_label, "With 4 IVF Cycles");
        assert_eq!(s.rate, s.breakdown.rate);
    }

    #[test]
    fn test_summary_of_empty_query() {
        let s = ResultSummary::from_record(&decode(""));
        assert_eq!(s.age_range, "");
        assert_eq!(s.icsi_procedure, "No");
        assert_eq!(s.medical_conditions, "None");
        assert_eq!(s.cycles, 1);
        assert_eq!(s.cycles_label, "With 1 IVF Cycle");
    }

    #[test]
    fn test_age_labels() {
        assert_eq!(age_label(Some("under-30")), "Under 30");
        assert_eq!(age_label(Some("above-43")), "Above 43");
        assert_eq!(age_label(Some("41-43")), "41 - 43");
        assert_eq!(age_label(Some("unknown")), "unknown");
    }

    #[test]
    fn test_empty_conditions_is_none() {
        assert_eq!(conditions_label(Some("")), "None");
        assert_eq!(conditions_label(None), "None");
        assert_eq!(conditions_label(Some("PCOS")), "PCOS");
    }

    #[test]
    fn test_rate_display_rounds() {
        assert_eq!(rate_display(19.84), 20);
        assert_eq!(rate_display(0.0), 0);
        assert_eq!(rate_display(100.0), 100);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let s = ResultSummary::from_record(&decode("ageRange=30-34"));
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["ageRange"], "30 - 34");
        assert_eq!(json["cyclesLabel"], "With 1 IVF Cycle");
        assert!(json.get("breakdown").is_none());
    }
}
