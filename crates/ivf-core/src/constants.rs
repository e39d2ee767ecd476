/// Starting point of every estimate, before any adjustment.
pub const BASE_RATE: f64 = 50.0;

/// Bonus for a previous ICSI procedure.
pub const ICSI_BONUS: f64 = 5.0;

/// Bonus for previous PGT testing.
pub const PGT_BONUS: f64 = 5.0;

/// Penalty applied when the condition list mentions endometriosis.
pub const ENDOMETRIOSIS_PENALTY: f64 = 5.0;

/// Cycle scale of the diminishing-returns term: factor = 1 - e^(-cycles / DECAY_SCALE)
pub const DECAY_SCALE: f64 = 3.0;

/// Cycle count assumed when `ivfCycles` is missing or unparsable.
pub const DEFAULT_CYCLES: i64 = 1;

/// Slider bounds of the input form.
pub const MIN_CYCLES: u8 = 1;
pub const MAX_CYCLES: u8 = 10;

/// Output bounds of the calculator (percent).
pub const RATE_FLOOR: f64 = 0.0;
pub const RATE_CEILING: f64 = 100.0;

/// Tag whose presence in the serialized condition string triggers the penalty.
pub const ENDOMETRIOSIS_TAG: &str = "Endometriosis";
