//! Vatican report sections.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, Result};

/// A section of the faith track ending on a pope space.
///
/// When any player first reaches `pope_space`, the report fires for every
/// player: those standing in `first_space..=pope_space` (or past it) keep the
/// favour tile, the others lose it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaticanReport {
    pub first_space: u32,
    pub pope_space: u32,
}

impl VaticanReport {
    #[must_use]
    pub const fn new(first_space: u32, pope_space: u32) -> Self {
        Self { first_space, pope_space }
    }

    /// Whether a player at `position` earns the favour when this report fires.
    #[must_use]
    pub const fn rewards(&self, position: u32) -> bool {
        position >= self.first_space
    }
}

/// The match-wide list of reports and which have already fired.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportSchedule {
    reports: Vec<VaticanReport>,
    fired: Vec<bool>,
}

impl ReportSchedule {
    #[must_use]
    pub fn new(reports: Vec<VaticanReport>) -> Self {
        let fired = vec![false; reports.len()];
        Self { reports, fired }
    }

    /// A schedule part way through a match.
    pub fn resume(reports: Vec<VaticanReport>, fired: Vec<bool>) -> Result<Self> {
        if fired.len() != reports.len() {
            return Err(EngineError::Snapshot(format!(
                "{} report flags for {} reports",
                fired.len(),
                reports.len()
            )));
        }
        Ok(Self { reports, fired })
    }

    #[must_use]
    pub fn reports(&self) -> &[VaticanReport] {
        &self.reports
    }

    #[must_use]
    pub fn is_fired(&self, index: usize) -> bool {
        self.fired.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn fired(&self) -> &[bool] {
        &self.fired
    }

    /// Reports triggered by a player reaching `position`, marked as fired.
    pub fn due(&mut self, position: u32) -> Vec<(usize, VaticanReport)> {
        let mut due = Vec::new();
        for (index, report) in self.reports.iter().enumerate() {
            if !self.fired[index] && position >= report.pope_space {
                self.fired[index] = true;
                due.push((index, *report));
            }
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> ReportSchedule {
        ReportSchedule::new(vec![
            VaticanReport::new(5, 8),
            VaticanReport::new(12, 16),
            VaticanReport::new(19, 24),
        ])
    }

    #[test]
    fn test_report_fires_once() {
        let mut s = schedule();

        assert!(s.due(7).is_empty());
        assert_eq!(s.due(8), vec![(0, VaticanReport::new(5, 8))]);
        assert!(s.due(9).is_empty());
        assert!(s.is_fired(0));
    }

    #[test]
    fn test_jump_fires_several() {
        let mut s = schedule();
        let due = s.due(17);

        assert_eq!(due.len(), 2);
        assert!(!s.is_fired(2));
    }

    #[test]
    fn test_rewards_section() {
        let report = VaticanReport::new(5, 8);
        assert!(!report.rewards(4));
        assert!(report.rewards(5));
        assert!(report.rewards(10));
    }

    #[test]
    fn test_resume_needs_one_flag_per_report() {
        let s = ReportSchedule::resume(schedule().reports().to_vec(), vec![true, false, false]).unwrap();
        assert!(s.is_fired(0));
        assert_eq!(s.fired(), &[true, false, false]);

        assert!(ReportSchedule::resume(schedule().reports().to_vec(), vec![true]).is_err());
    }
}
