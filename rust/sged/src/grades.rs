//! Mozambican 0–20 grading scale.

use crate::mozambique::Verdict;
use serde::Serialize;

pub const GRADE_MIN: f64 = 0.0;
pub const GRADE_MAX: f64 = 20.0;
pub const PASS_MARK: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GradeBand {
    Fail,
    Insufficient,
    Sufficient,
    Good,
    Excellent,
}

/// Badge severity, most positive first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SeverityTier {
    Success,
    Info,
    Warning,
    Caution,
    Danger,
}

impl GradeBand {
    fn from_value(value: f64) -> Self {
        if value >= 16.0 {
            Self::Excellent
        } else if value >= 14.0 {
            Self::Good
        } else if value >= PASS_MARK {
            Self::Sufficient
        } else if value >= 5.0 {
            Self::Insufficient
        } else {
            Self::Fail
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excelente",
            Self::Good => "Bom",
            Self::Sufficient => "Suficiente",
            Self::Insufficient => "Insuficiente",
            Self::Fail => "Mau",
        }
    }

    pub fn passed(self) -> bool {
        self >= Self::Sufficient
    }

    pub fn tier(self) -> SeverityTier {
        match self {
            Self::Excellent => SeverityTier::Success,
            Self::Good => SeverityTier::Info,
            Self::Sufficient => SeverityTier::Warning,
            Self::Insufficient => SeverityTier::Caution,
            Self::Fail => SeverityTier::Danger,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeClassification {
    pub band: GradeBand,
    pub label: &'static str,
    pub passed: bool,
    pub tier: SeverityTier,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradeError {
    NotANumber,
    BelowMinimum(f64),
    AboveMaximum(f64),
}

impl GradeError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotANumber => "grade_not_a_number",
            Self::BelowMinimum(_) | Self::AboveMaximum(_) => "grade_out_of_range",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::NotANumber => "A nota deve ser um número",
            Self::BelowMinimum(_) => "A nota mínima é 0",
            Self::AboveMaximum(_) => "A nota máxima é 20",
        }
    }
}

fn check_range(value: f64) -> Result<f64, GradeError> {
    if !value.is_finite() {
        return Err(GradeError::NotANumber);
    }
    if value < GRADE_MIN {
        return Err(GradeError::BelowMinimum(value));
    }
    if value > GRADE_MAX {
        return Err(GradeError::AboveMaximum(value));
    }
    Ok(value)
}

/// Classifies a grade in `[0, 20]`. Values outside the scale are rejected
/// rather than clamped; use [`normalize_grade_input`] to clamp raw input.
pub fn classify_grade(value: f64) -> Result<GradeClassification, GradeError> {
    let band = GradeBand::from_value(check_range(value)?);
    Ok(GradeClassification {
        band,
        label: band.label(),
        passed: band.passed(),
        tier: band.tier(),
    })
}

pub fn validate_grade(value: f64) -> Verdict {
    match check_range(value) {
        Ok(_) => Verdict::pass(),
        Err(e) => Verdict::fail(e.message()),
    }
}

/// `Int(10*x + 0.5) / 10`, half rounds up.
pub fn round_off_1_decimal(x: f64) -> f64 {
    ((10.0 * x) + 0.5).floor() / 10.0
}

/// Turns text typed into a grade field into a stored value: blank is 0,
/// anything numeric is clamped to the scale and kept to one decimal.
/// A comma is accepted as the decimal separator. Returns `None` when the text
/// is not a number, in which case the field keeps its previous value.
pub fn normalize_grade_input(input: &str) -> Option<f64> {
    let t = input.trim();
    if t.is_empty() {
        return Some(0.0);
    }
    let n: f64 = t.replace(',', ".").parse().ok()?;
    if n.is_nan() {
        return None;
    }
    Some(round_off_1_decimal(n.clamp(GRADE_MIN, GRADE_MAX)))
}
