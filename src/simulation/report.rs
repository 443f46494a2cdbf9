//! What one step produces for the display side.

use std::fmt;

use crate::common::PageId;
use crate::replacer::{Outcome, PolicyKind};

/// One policy's result for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyReport {
    pub kind: PolicyKind,
    pub outcome: Outcome,
    /// Frame contents after the request, one entry per frame.
    pub frames: Vec<Option<PageId>>,
}

impl fmt::Display for PolicyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8}", self.kind.name())?;
        for (i, frame) in self.frames.iter().enumerate() {
            let marker = if i == self.outcome.slot().0 {
                if self.outcome.is_hit() {
                    '*'
                } else {
                    '+'
                }
            } else {
                ' '
            };
            match frame {
                Some(page) => write!(f, " [{:>4}{}]", page, marker)?,
                None => write!(f, " [    {}]", marker)?,
            }
        }
        if let Some(evicted) = self.outcome.evicted() {
            write!(f, "  evicted {}", evicted)?;
        }
        Ok(())
    }
}

/// Everything a step changed, in [`PolicyKind::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Position of the request in the reference string.
    pub index: usize,
    /// The requested page.
    pub page: PageId,
    pub policies: Vec<PolicyReport>,
    /// True if this step consumed the last reference.
    pub ended: bool,
}

impl StepReport {
    /// Report for one policy.
    pub fn policy(&self, kind: PolicyKind) -> Option<&PolicyReport> {
        self.policies.iter().find(|report| report.kind == kind)
    }

    /// Outcome for one policy.
    pub fn outcome(&self, kind: PolicyKind) -> Option<Outcome> {
        self.policy(kind).map(|report| report.outcome)
    }
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Requested page: {} (index {})", self.page, self.index)?;
        for report in &self.policies {
            writeln!(f, "  {}", report)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::FrameId;

    #[test]
    fn test_policy_report_display_marks_slot() {
        let report = PolicyReport {
            kind: PolicyKind::Lru,
            outcome: Outcome::Replaced {
                slot: FrameId::new(1),
                evicted: PageId::new(2),
            },
            frames: vec![Some(PageId::new(1)), Some(PageId::new(4)), None],
        };
        assert_eq!(
            report.to_string(),
            "LRU      [   1 ] [   4+] [     ]  evicted 2"
        );
    }

    #[test]
    fn test_step_report_lookup() {
        let outcome = Outcome::Hit {
            slot: FrameId::new(0),
        };
        let step = StepReport {
            index: 3,
            page: PageId::new(1),
            policies: vec![PolicyReport {
                kind: PolicyKind::Fifo,
                outcome,
                frames: vec![Some(PageId::new(1))],
            }],
            ended: false,
        };

        assert_eq!(step.outcome(PolicyKind::Fifo), Some(outcome));
        assert_eq!(step.outcome(PolicyKind::Mfu), None);
    }
}
