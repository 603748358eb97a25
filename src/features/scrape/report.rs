use serde::Serialize;

use crate::core::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Seeded,
    PartiesScraped,
    ConstituenciesDiscovered,
    CandidatesScraped,
    MetadataDerived,
    Saved,
    Failed,
}

impl Phase {
    fn next(self) -> Option<Phase> {
        match self {
            Phase::Seeded => Some(Phase::PartiesScraped),
            Phase::PartiesScraped => Some(Phase::ConstituenciesDiscovered),
            Phase::ConstituenciesDiscovered => Some(Phase::CandidatesScraped),
            Phase::CandidatesScraped => Some(Phase::MetadataDerived),
            Phase::MetadataDerived => Some(Phase::Saved),
            Phase::Saved | Phase::Failed => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Complete,
    Incomplete,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    Party,
    Constituency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gap {
    pub kind: GapKind,
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub phase: Phase,
    pub status: RunStatus,
    pub seed_url: String,
    pub election_id: Option<String>,
    pub output_dir: Option<String>,
    pub pages_attempted: usize,
    pub pages_succeeded: usize,
    pub pages_skipped: usize,
    pub gaps: Vec<Gap>,
    pub warnings: Vec<String>,
    pub error: Option<String>,
}

impl RunReport {
    pub fn new(seed_url: impl Into<String>) -> Self {
        Self {
            phase: Phase::Seeded,
            status: RunStatus::Complete,
            seed_url: seed_url.into(),
            election_id: None,
            output_dir: None,
            pages_attempted: 0,
            pages_succeeded: 0,
            pages_skipped: 0,
            gaps: Vec::new(),
            warnings: Vec::new(),
            error: None,
        }
    }

    /// Moves to the next phase. Phases only ever advance one step at a time.
    pub fn advance(&mut self, next: Phase) -> Result<(), AppError> {
        if self.phase.next() != Some(next) {
            return Err(AppError::internal(format!(
                "invalid run transition from {:?} to {next:?}",
                self.phase
            )));
        }
        self.phase = next;
        Ok(())
    }

    pub fn record_success(&mut self) {
        self.pages_attempted += 1;
        self.pages_succeeded += 1;
    }

    pub fn record_skipped(&mut self) {
        self.pages_attempted += 1;
        self.pages_skipped += 1;
    }

    pub fn record_gap(&mut self, kind: GapKind, url: impl Into<String>, reason: impl Into<String>) {
        self.pages_attempted += 1;
        self.pages_skipped += 1;
        self.gaps.push(Gap {
            kind,
            url: url.into(),
            reason: reason.into(),
        });
        self.mark_incomplete();
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn mark_incomplete(&mut self) {
        if self.status == RunStatus::Complete {
            self.status = RunStatus::Incomplete;
        }
    }

    pub fn is_incomplete(&self) -> bool {
        self.status == RunStatus::Incomplete
    }

    pub fn fail(&mut self, err: &AppError) {
        self.phase = Phase::Failed;
        self.status = RunStatus::Failed;
        self.error = Some(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_advance_in_order() {
        let mut report = RunReport::new("https://results.example.test/index.htm");
        report.advance(Phase::PartiesScraped).expect("parties");
        assert!(report.advance(Phase::CandidatesScraped).is_err());
        report.advance(Phase::ConstituenciesDiscovered).expect("discovered");
        assert_eq!(report.phase, Phase::ConstituenciesDiscovered);
    }

    #[test]
    fn gaps_make_the_run_incomplete() {
        let mut report = RunReport::new("https://results.example.test/index.htm");
        report.record_success();
        report.record_gap(GapKind::Constituency, "https://results.example.test/c.htm", "HTTP 503");

        assert_eq!(report.status, RunStatus::Incomplete);
        assert_eq!(report.pages_attempted, 2);
        assert_eq!(report.pages_succeeded, 1);
        assert_eq!(report.pages_skipped, 1);
    }

    #[test]
    fn failure_is_terminal() {
        let mut report = RunReport::new("https://results.example.test/index.htm");
        report.fail(&AppError::detection("no type".to_string()));
        assert_eq!(report.status, RunStatus::Failed);
        assert_eq!(report.phase, Phase::Failed);
        assert!(report.advance(Phase::PartiesScraped).is_err());

        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(value["status"], "FAILED");
        assert_eq!(value["error"], "detection error: no type");
    }
}
