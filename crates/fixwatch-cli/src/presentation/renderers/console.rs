//! Line-oriented trace view for non-TTY output (pipes, CI logs).
//!
//! Prints the log stream incrementally and a banner when the pipeline
//! stage changes. Snapshot replacement can shrink the log sequence (the
//! gateway is the source of truth); the view simply starts over when that
//! happens.

use crate::presentation::view_models::DashboardViewModel;
use fixwatch_types::{LogLevel, Stage};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

pub struct ConsoleView {
    printed_logs: usize,
    last_stage: Stage,
    enable_color: bool,
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleView {
    pub fn new() -> Self {
        Self {
            printed_logs: 0,
            last_stage: Stage::Idle,
            enable_color: std::io::stdout().is_terminal(),
        }
    }

    pub fn render_started(&mut self, run_id: &str, repo: &str, branch: &str) {
        println!("Watching run {} ({})", run_id, repo);
        println!("Fix branch: {}", branch);
    }

    pub fn render_update(&mut self, vm: &DashboardViewModel) {
        if vm.stage != self.last_stage {
            self.last_stage = vm.stage;
            println!("=== stage: {} ===", vm.stage.as_str());
        }

        if vm.logs.len() < self.printed_logs {
            self.printed_logs = 0;
        }
        for line in &vm.logs[self.printed_logs..] {
            println!("[{}] {}", line.clock, self.paint(&line.message, line.level));
        }
        self.printed_logs = vm.logs.len();
    }

    pub fn render_stopped(&mut self, vm: &DashboardViewModel) {
        println!(
            "Stopped. {} issues, {} fixed, {} failed ({}% success, uptime {})",
            vm.summary.total_bugs,
            vm.summary.fixed_bugs,
            vm.summary.failed_fixes,
            vm.summary.success_rate,
            vm.summary.uptime_label
        );
    }

    fn paint(&self, message: &str, level: LogLevel) -> String {
        if !self.enable_color {
            return message.to_string();
        }
        match level {
            LogLevel::Error => message.red().to_string(),
            LogLevel::Success => message.green().to_string(),
            LogLevel::Warning => message.yellow().to_string(),
            LogLevel::Command => message.blue().bold().to_string(),
            LogLevel::Info => message.to_string(),
        }
    }
}
