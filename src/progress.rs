use crate::models::GraduationCheckItem;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditProgress {
    pub completed: u32,
    pub total: u32,
}

impl CreditProgress {
    pub fn new(completed: u32, total: u32) -> Self {
        Self { completed, total }
    }

    /// Raw ratio in percent; 0 when there is no requirement.
    pub fn raw_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.completed) / f64::from(self.total) * 100.0
        }
    }

    /// Displayed percentage, capped at 100 even when completed exceeds total.
    pub fn percentage(&self) -> f64 {
        self.raw_percentage().min(100.0)
    }

    pub fn display_percentage(&self) -> String {
        format!("{:.1}%", self.percentage())
    }

    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementStatus {
    Complete,
    InProgress,
    NotStarted,
}

impl RequirementStatus {
    pub fn of(item: &GraduationCheckItem) -> Self {
        if item.passed {
            RequirementStatus::Complete
        } else if item.current > 0 {
            RequirementStatus::InProgress
        } else {
            RequirementStatus::NotStarted
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequirementStatus::Complete => "Complete",
            RequirementStatus::InProgress => "In progress",
            RequirementStatus::NotStarted => "Not started",
        }
    }
}
