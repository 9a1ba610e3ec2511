//! Ratatui dashboard for interactive terminals.
//!
//! Runs on its own thread with a blocking key/draw loop. The async side
//! feeds it [`TuiEvent`]s; key presses travel back as [`TuiSignal`]s.
//! Export requests set an in-progress flag that is cleared by whichever
//! completion event comes back, so the controls can never stay stuck.

use crate::presentation::view_models::{
    build_dashboard, DashboardViewModel, HealthLabel, StepState,
};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fixwatch_runtime::DashboardSnapshot;
use fixwatch_types::{CategoryFilter, CiStatus, FixStatus, LogLevel};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc::{error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Messages from the async controller to the renderer.
#[derive(Debug)]
pub enum TuiEvent {
    State(Box<DashboardSnapshot>),
    ExportDone(String),
    ExportFailed(String),
    Stopped,
}

/// Key-driven requests from the renderer to the async controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiSignal {
    Quit,
    ExportCsv,
    ExportReport { filter: CategoryFilter },
}

pub struct TuiView {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TuiView {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        // Restore the terminal even on Ctrl+C.
        ctrlc::set_handler(move || {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            std::process::exit(0);
        })?;

        Ok(Self { terminal })
    }

    /// Blocking render loop. Returns when the operator quits or the
    /// controller side hangs up.
    pub fn run(
        mut self,
        mut events: UnboundedReceiver<TuiEvent>,
        signals: UnboundedSender<TuiSignal>,
    ) -> Result<()> {
        let mut snapshot = DashboardSnapshot::default();
        let mut filter = CategoryFilter::All;
        let mut exporting = false;
        let mut notice: Option<(String, bool)> = None;
        let mut stopped = false;

        loop {
            loop {
                match events.try_recv() {
                    Ok(TuiEvent::State(update)) => snapshot = *update,
                    Ok(TuiEvent::ExportDone(path)) => {
                        exporting = false;
                        notice = Some((format!("Exported {}", path), false));
                    }
                    Ok(TuiEvent::ExportFailed(message)) => {
                        exporting = false;
                        notice = Some((message, true));
                    }
                    Ok(TuiEvent::Stopped) => stopped = true,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return Ok(()),
                }
            }

            let vm = build_dashboard(&snapshot, filter);
            self.terminal
                .draw(|f| ui(f, &vm, exporting, stopped, notice.as_ref()))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            let _ = signals.send(TuiSignal::Quit);
                            return Ok(());
                        }
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            let _ = signals.send(TuiSignal::Quit);
                            return Ok(());
                        }
                        KeyCode::Char('f') => filter = filter.next(),
                        KeyCode::Char('c') => {
                            if !exporting && !snapshot.fixes.is_empty() {
                                exporting = true;
                                let _ = signals.send(TuiSignal::ExportCsv);
                            }
                        }
                        KeyCode::Char('p') => {
                            if !exporting && !snapshot.fixes.is_empty() {
                                exporting = true;
                                let _ = signals.send(TuiSignal::ExportReport { filter });
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}

impl Drop for TuiView {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn ui(
    f: &mut Frame,
    vm: &DashboardViewModel,
    exporting: bool,
    stopped: bool,
    notice: Option<&(String, bool)>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // header
            Constraint::Length(3),  // pipeline
            Constraint::Min(8),     // ci history + fix table
            Constraint::Length(10), // terminal
            Constraint::Length(2),  // footer
        ])
        .split(f.area());

    render_header(f, vm, stopped, chunks[0]);
    render_pipeline(f, vm, chunks[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[2]);
    render_ci_history(f, vm, columns[0]);
    render_fix_table(f, vm, columns[1]);

    render_terminal(f, vm, chunks[3]);
    render_footer(f, vm, exporting, notice, chunks[4]);
}

fn render_header(f: &mut Frame, vm: &DashboardViewModel, stopped: bool, area: ratatui::layout::Rect) {
    let state = if stopped {
        Span::styled("STOPPED", Style::default().fg(Color::Red))
    } else if vm.running {
        Span::styled("ONLINE", Style::default().fg(Color::Green))
    } else {
        Span::styled("OFFLINE", Style::default().fg(Color::DarkGray))
    };

    let run_line = match &vm.run_id {
        Some(run_id) => format!("run {}  {}  -> {}", run_id, vm.summary.repo, vm.summary.branch),
        None => "no run attached".to_string(),
    };

    let stats_line = format!(
        "{} issues  {} fixed  {} failed  {}% success  uptime {}  [{}]",
        vm.summary.total_bugs,
        vm.summary.fixed_bugs,
        vm.summary.failed_fixes,
        vm.summary.success_rate,
        vm.summary.uptime_label,
        vm.summary.health.as_str(),
    );
    let stats_style = match vm.summary.health {
        HealthLabel::NeedsAttention => Style::default().fg(Color::Yellow),
        HealthLabel::Healthy => Style::default().fg(Color::Green),
        _ => Style::default(),
    };

    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                "fixwatch",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  autonomous healing agent cockpit  "),
            state,
        ]),
        Line::from(run_line),
        Line::from(Span::styled(stats_line, stats_style)),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn render_pipeline(f: &mut Frame, vm: &DashboardViewModel, area: ratatui::layout::Rect) {
    let mut spans = Vec::new();
    for step in &vm.pipeline {
        let (mark, style) = match step.state {
            StepState::Completed => ("✔", Style::default().fg(Color::Green)),
            StepState::Active => (
                "▶",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            StepState::Pending => ("○", Style::default().fg(Color::DarkGray)),
        };
        spans.push(Span::styled(format!("{} {}", mark, step.label), style));
        spans.push(Span::raw("   "));
    }

    let pipeline = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Pipeline [{}]", vm.stage.as_str())),
    );
    f.render_widget(pipeline, area);
}

fn render_ci_history(f: &mut Frame, vm: &DashboardViewModel, area: ratatui::layout::Rect) {
    let items: Vec<ListItem> = vm
        .ci_runs
        .iter()
        .map(|run| {
            let style = match run.status {
                CiStatus::Passed => Style::default().fg(Color::Green),
                CiStatus::Failed => Style::default().fg(Color::Red),
                CiStatus::Running => Style::default().fg(Color::Cyan),
                CiStatus::Pending => Style::default().fg(Color::DarkGray),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<8}", run.status.as_str()), style),
                Span::raw(format!("#{}  {}  {}", run.id, run.duration, run.clock)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("CI/CD Runs ({})", vm.ci_runs.len())),
    );
    f.render_widget(list, area);
}

fn render_fix_table(f: &mut Frame, vm: &DashboardViewModel, area: ratatui::layout::Rect) {
    let header = Row::new(["Status", "File", "Type", "AI Action", "Time"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = vm
        .fixes
        .iter()
        .map(|fix| {
            let status_style = match fix.status {
                FixStatus::Fixed => Style::default().fg(Color::Green),
                FixStatus::Failed => Style::default().fg(Color::Red),
                FixStatus::InProgress | FixStatus::Verifying => Style::default().fg(Color::Cyan),
                FixStatus::Pending => Style::default().fg(Color::DarkGray),
            };
            Row::new(vec![
                Cell::from(fix.status.as_str()).style(status_style),
                Cell::from(fix.location.clone()),
                Cell::from(fix.category),
                Cell::from(fix.commit_message.clone()),
                Cell::from(fix.clock.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(11),
            Constraint::Length(26),
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(format!(
        "Detected Vulnerabilities ({}/{})  filter: {}",
        vm.fixes.len(),
        vm.total_fix_count,
        vm.filter_label
    )));
    f.render_widget(table, area);
}

fn render_terminal(f: &mut Frame, vm: &DashboardViewModel, area: ratatui::layout::Rect) {
    let visible = (area.height as usize).saturating_sub(2).max(1);
    let start = vm.logs.len().saturating_sub(visible);
    let items: Vec<ListItem> = vm.logs[start..]
        .iter()
        .map(|line| {
            let style = match line.level {
                LogLevel::Error => Style::default().fg(Color::Red),
                LogLevel::Success => Style::default().fg(Color::Green),
                LogLevel::Warning => Style::default().fg(Color::Yellow),
                LogLevel::Command => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
                LogLevel::Info => Style::default(),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", line.clock), Style::default().fg(Color::DarkGray)),
                Span::styled(line.message.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Terminal"));
    f.render_widget(list, area);
}

fn render_footer(
    f: &mut Frame,
    vm: &DashboardViewModel,
    exporting: bool,
    notice: Option<&(String, bool)>,
    area: ratatui::layout::Rect,
) {
    let keys = if exporting {
        format!("exporting…  |  f filter ({})  q quit", vm.filter_label)
    } else {
        format!(
            "q quit  f filter ({})  c export csv  p export report",
            vm.filter_label
        )
    };

    let mut lines = vec![Line::from(Span::styled(
        keys,
        Style::default().fg(Color::DarkGray),
    ))];
    if let Some((message, is_error)) = notice {
        let style = if *is_error {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        lines.push(Line::from(Span::styled(message.clone(), style)));
    }

    let footer = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}
