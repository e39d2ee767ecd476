//! IVF success-rate estimator.
//!
//! Survey answers travel from the input form to the results page as a URL
//! query string; the results page decodes it and scores it with a fixed
//! formula: base rate, additive age/procedure/condition terms, a
//! diminishing-returns factor for the cycle count, clamped to [0, 100].
//!
//! Zero I/O. Rendering and serving live in `ivf-cli`.

pub mod answers;
pub mod codec;
pub mod constants;
pub mod error;
pub mod score;
pub mod summary;

pub use answers::{AgeRange, MedicalCondition, SurveyAnswers, YesNo, field};
pub use codec::{TransportRecord, decode, encode};
pub use constants::{BASE_RATE, DECAY_SCALE, MAX_CYCLES, MIN_CYCLES};
pub use error::{ParseError, Result};
pub use score::{ScoreBreakdown, breakdown, compute, decay_factor, parse_cycles};
pub use summary::ResultSummary;
