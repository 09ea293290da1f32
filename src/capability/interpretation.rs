//! Report wording for capability indices.
//!
//! Labels each of Cp, Cpk, Pp and Ppk against the conventional 1.33
//! threshold. This is display guidance only and never fails a run.

use serde::{Deserialize, Serialize};

use super::indices::CapabilityMetrics;

/// Conventional threshold for an adequately capable (or centered) process.
pub const CAPABILITY_THRESHOLD: f64 = 1.33;

/// Outcome for a single index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Index at or above [`CAPABILITY_THRESHOLD`].
    Adequate,
    /// Index below [`CAPABILITY_THRESHOLD`].
    NeedsImprovement,
}

impl Verdict {
    /// Classifies an index value.
    pub fn of(index: f64) -> Self {
        if index >= CAPABILITY_THRESHOLD {
            Verdict::Adequate
        } else {
            Verdict::NeedsImprovement
        }
    }

    /// `true` for [`Verdict::Adequate`].
    pub fn is_adequate(self) -> bool {
        self == Verdict::Adequate
    }
}

/// Verdicts for the four headline indices.
///
/// # Examples
///
/// ```
/// use u_spc::capability::{Interpretation, Verdict};
///
/// # let metrics = u_spc::capability::CapabilityMetrics {
/// #     x_bar: 10.0, std_dev_overall: 0.1, std_dev_within: 0.1, moving_range: 0.1,
/// #     cp: 1.5, cpu: 1.2, cpl: 1.8, cpk: 1.2,
/// #     pp: 1.5, ppu: 1.2, ppl: 1.8, ppk: 1.2, lsl: 9.0, usl: 11.0,
/// # };
/// let verdicts = Interpretation::from_metrics(&metrics);
/// assert_eq!(verdicts.cp, Verdict::Adequate);
/// assert_eq!(verdicts.cpk, Verdict::NeedsImprovement);
/// assert_eq!(verdicts.cp_statement(), "Process is capable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    /// Short-term capability.
    pub cp: Verdict,
    /// Short-term centering.
    pub cpk: Verdict,
    /// Long-term performance.
    pub pp: Verdict,
    /// Long-term centering.
    pub ppk: Verdict,
}

impl Interpretation {
    /// Classifies the headline indices of a run.
    pub fn from_metrics(metrics: &CapabilityMetrics) -> Self {
        Self {
            cp: Verdict::of(metrics.cp),
            cpk: Verdict::of(metrics.cpk),
            pp: Verdict::of(metrics.pp),
            ppk: Verdict::of(metrics.ppk),
        }
    }

    /// Sentence for short-term capability (Cp).
    pub fn cp_statement(&self) -> &'static str {
        match self.cp {
            Verdict::Adequate => "Process is capable",
            Verdict::NeedsImprovement => "Process needs improvement",
        }
    }

    /// Sentence for short-term centering (Cpk).
    pub fn cpk_statement(&self) -> &'static str {
        match self.cpk {
            Verdict::Adequate => "Process is centered",
            Verdict::NeedsImprovement => "Process centering needs improvement",
        }
    }

    /// Sentence for long-term performance (Pp).
    pub fn pp_statement(&self) -> &'static str {
        match self.pp {
            Verdict::Adequate => "Process is performing well",
            Verdict::NeedsImprovement => "Long-term performance needs improvement",
        }
    }

    /// Sentence for long-term centering (Ppk).
    pub fn ppk_statement(&self) -> &'static str {
        match self.ppk {
            Verdict::Adequate => "Process is stable",
            Verdict::NeedsImprovement => "Long-term stability needs improvement",
        }
    }
}
