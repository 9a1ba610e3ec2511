use serde::{Deserialize, Serialize};

/// Retry budget sent with every start request. Fixed by the product, not
/// exposed in any user-facing configuration.
pub const DEFAULT_RETRY_LIMIT: u32 = 5;

/// Operator-supplied parameters for starting an agent run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParams {
    pub repo_url: String,
    pub team_name: String,
    pub team_leader: String,
}

impl RunParams {
    pub fn branch_name(&self) -> String {
        derive_branch_name(&self.team_name, &self.team_leader)
    }
}

/// One accepted agent execution, created when a start request succeeds and
/// superseded when a new run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSession {
    /// Opaque token issued by the gateway.
    pub run_id: String,
    pub repo_url: String,
    pub team_name: String,
    pub team_leader: String,
    pub branch_name: String,
}

impl RunSession {
    pub fn new(run_id: String, params: &RunParams) -> Self {
        Self {
            run_id,
            repo_url: params.repo_url.clone(),
            team_name: params.team_name.clone(),
            team_leader: params.team_leader.clone(),
            branch_name: params.branch_name(),
        }
    }
}

/// Branch the agent pushes its fixes to: team and leader with whitespace
/// runs collapsed to underscores, joined with the fixed `_AI_Fix` suffix.
pub fn derive_branch_name(team_name: &str, team_leader: &str) -> String {
    let team = collapse_whitespace(team_name);
    let leader = collapse_whitespace(team_leader);
    format!("{}_{}_AI_Fix", team, leader)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_name_collapses_whitespace() {
        assert_eq!(
            derive_branch_name("TEAM AMD", "AZHAN ALI"),
            "TEAM_AMD_AZHAN_ALI_AI_Fix"
        );
    }

    #[test]
    fn branch_name_collapses_runs_of_whitespace() {
        assert_eq!(
            derive_branch_name("TEAM  AMD", " AZHAN\tALI "),
            "TEAM_AMD_AZHAN_ALI_AI_Fix"
        );
    }

    #[test]
    fn session_captures_params() {
        let params = RunParams {
            repo_url: "https://github.com/acme/app".to_string(),
            team_name: "TEAM AMD".to_string(),
            team_leader: "AZHAN ALI".to_string(),
        };
        let session = RunSession::new("run-1".to_string(), &params);
        assert_eq!(session.branch_name, "TEAM_AMD_AZHAN_ALI_AI_Fix");
        assert_eq!(session.repo_url, params.repo_url);
    }
}
