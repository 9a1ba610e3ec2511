use serde::{Deserialize, Serialize};

// NOTE: Schema Design Goals
//
// 1. Wire fidelity: these types mirror the gateway's JSON exactly.
//    The gateway is the source of truth for membership and ordering of every
//    collection; the client never merges, patches, or re-sorts.
//
// 2. Snapshot semantics: a poll response replaces the corresponding local
//    collection wholesale. Types carry no client-side bookkeeping.
//
// 3. Lenient timestamps: the gateway emits ISO-8601 strings that may be
//    timezone-naive. Timestamps stay `String` here and are parsed only at
//    display time (see the CLI formatters).

/// Pipeline phase the remote agent reports itself to be in.
///
/// Healthy runs advance monotonically, but the client must not rely on
/// that: the latest polled value always wins, even if it regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    #[default]
    Idle,
    Cloning,
    Scanning,
    Analyzing,
    Fixing,
    Testing,
    Pushing,
    Deploying,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "IDLE",
            Stage::Cloning => "CLONING",
            Stage::Scanning => "SCANNING",
            Stage::Analyzing => "ANALYZING",
            Stage::Fixing => "FIXING",
            Stage::Testing => "TESTING",
            Stage::Pushing => "PUSHING",
            Stage::Deploying => "DEPLOYING",
        }
    }
}

/// Aggregate counters reported by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Stats {
    pub total_bugs: u64,
    pub fixed_bugs: u64,
    pub failed_fixes: u64,
    /// Elapsed seconds. Authoritative value arrives with every status poll;
    /// the runtime also increments it locally once per second between polls
    /// as a display-smoothing overlay.
    pub uptime: u64,
}

impl Stats {
    /// Fix success rate as a whole percentage. 100 when nothing was detected.
    pub fn success_rate(&self) -> u64 {
        if self.total_bugs == 0 {
            100
        } else {
            ((self.fixed_bugs as f64 / self.total_bugs as f64) * 100.0).round() as u64
        }
    }
}

/// Full payload of `GET /api/status/{run_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatus {
    pub run_id: String,
    /// Coarse lifecycle string ("running", "completed", "failed").
    pub status: String,
    pub stage: Stage,
    #[serde(default)]
    pub progress: f64,
    pub stats: Stats,
    pub repo_url: String,
    pub team_name: String,
    pub team_leader: String,
    pub branch_name: String,
}

/// Severity tag on a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Error,
    Warning,
    Command,
}

/// One entry of the append-only log sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub id: String,
    pub timestamp: String,
    pub message: String,
    #[serde(rename = "type")]
    pub level: LogLevel,
}

/// Classification of a detected issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BugCategory {
    Linting,
    Syntax,
    Logic,
    TypeError,
    Import,
    Indentation,
    Security,
    Performance,
    Deprecation,
}

impl BugCategory {
    /// All categories in the order the gateway's scanner reports them.
    pub const ALL: [BugCategory; 9] = [
        BugCategory::Linting,
        BugCategory::Syntax,
        BugCategory::Logic,
        BugCategory::TypeError,
        BugCategory::Import,
        BugCategory::Indentation,
        BugCategory::Security,
        BugCategory::Performance,
        BugCategory::Deprecation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BugCategory::Linting => "LINTING",
            BugCategory::Syntax => "SYNTAX",
            BugCategory::Logic => "LOGIC",
            BugCategory::TypeError => "TYPE_ERROR",
            BugCategory::Import => "IMPORT",
            BugCategory::Indentation => "INDENTATION",
            BugCategory::Security => "SECURITY",
            BugCategory::Performance => "PERFORMANCE",
            BugCategory::Deprecation => "DEPRECATION",
        }
    }
}

impl std::str::FromStr for BugCategory {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BugCategory::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| crate::Error::UnknownCategory(s.to_string()))
    }
}

/// Lifecycle of one fix attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FixStatus {
    Fixed,
    Failed,
    Pending,
    InProgress,
    Verifying,
}

impl FixStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixStatus::Fixed => "FIXED",
            FixStatus::Failed => "FAILED",
            FixStatus::Pending => "PENDING",
            FixStatus::InProgress => "IN_PROGRESS",
            FixStatus::Verifying => "VERIFYING",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// One detected-and-acted-upon issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixRecord {
    pub id: String,
    pub file: String,
    pub line: u64,
    pub bug_type: BugCategory,
    pub description: String,
    pub commit_message: String,
    pub status: FixStatus,
    pub timestamp: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CiStatus {
    Passed,
    Failed,
    Running,
    Pending,
}

impl CiStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CiStatus::Passed => "PASSED",
            CiStatus::Failed => "FAILED",
            CiStatus::Running => "RUNNING",
            CiStatus::Pending => "PENDING",
        }
    }
}

/// One pipeline execution attempt reported by the CI endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiRun {
    /// Epoch-millis identifier issued by the gateway.
    pub id: i64,
    pub status: CiStatus,
    pub timestamp: String,
    /// Human-formatted duration, e.g. "3.2s". Kept verbatim.
    pub duration: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_wire_casing_round_trips() {
        assert_eq!(serde_json::to_string(&Stage::Fixing).unwrap(), "\"FIXING\"");
        assert_eq!(
            serde_json::from_str::<Stage>("\"DEPLOYING\"").unwrap(),
            Stage::Deploying
        );
    }

    #[test]
    fn log_level_uses_lowercase_type_key() {
        let event: LogEvent = serde_json::from_str(
            r#"{"id":"r1_0","timestamp":"2026-01-05T10:00:00","message":"npm test","type":"command"}"#,
        )
        .unwrap();
        assert_eq!(event.level, LogLevel::Command);
        assert_eq!(
            serde_json::to_value(&event).unwrap()["type"],
            serde_json::json!("command")
        );
    }

    #[test]
    fn fix_record_parses_gateway_shape() {
        let record: FixRecord = serde_json::from_str(
            r#"{
                "id": "r1_fix_0",
                "file": "src/app.py",
                "line": 42,
                "bug_type": "TYPE_ERROR",
                "description": "Incompatible operand types",
                "commit_message": "Fix type error",
                "status": "IN_PROGRESS",
                "timestamp": "2026-01-05T10:00:01",
                "severity": "MEDIUM"
            }"#,
        )
        .unwrap();
        assert_eq!(record.bug_type, BugCategory::TypeError);
        assert_eq!(record.status, FixStatus::InProgress);
        assert_eq!(record.severity, Severity::Medium);
    }

    #[test]
    fn success_rate_rounds_and_defaults_to_full() {
        let stats = Stats {
            total_bugs: 10,
            fixed_bugs: 7,
            failed_fixes: 1,
            uptime: 0,
        };
        assert_eq!(stats.success_rate(), 70);
        assert_eq!(Stats::default().success_rate(), 100);
    }

    #[test]
    fn bug_category_parses_case_insensitively() {
        assert_eq!(
            "type_error".parse::<BugCategory>().unwrap(),
            BugCategory::TypeError
        );
        assert!("BOGUS".parse::<BugCategory>().is_err());
    }
}
