//! Play command - Interactive traversal session
//!
//! Reads one command per line from stdin while a tokio interval drives auto
//! mode. Without a graph file the graph itself is read from the same stdin
//! first, through the usual prompts.
//!
//! When stdin closes, a run that is auto-advancing is allowed to finish
//! before the session ends, so piped scripts produce a complete result.

use crate::input::{load_graph, prompt_graph};
use crate::output::{HelpText, OutputConfig, OutputFormat, Outputter, RunView, StepLine};
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use stepgraph_core::{Algorithm, EdgePolicy, Endpoints, StepScheduler};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

const HELP: &str = "\
Commands (one per line):
  b        start BFS
  d        start DFS
  j        start Dijkstra
  p, ' '   pause / resume
  s        step once (enters step mode)
  a        auto mode
  r        reset
  v        show the current state
  h        this help
  q, esc   quit";

/// Session options resolved from config and flags.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub interval: Duration,
    pub policy: EdgePolicy,
    pub skip_noop_steps: bool,
    pub start_in_step_mode: bool,
}

/// One line of user input, decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start(Algorithm),
    TogglePause,
    Step,
    Auto,
    Reset,
    View,
    Help,
    Quit,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Option<Self> {
        // A bare space is the pause key.
        if line == " " {
            return Some(SessionCommand::TogglePause);
        }
        let command = match line.trim().to_ascii_lowercase().as_str() {
            "b" | "bfs" => SessionCommand::Start(Algorithm::Bfs),
            "d" | "dfs" => SessionCommand::Start(Algorithm::Dfs),
            "j" | "dijkstra" => SessionCommand::Start(Algorithm::Dijkstra),
            "p" | "pause" | "space" => SessionCommand::TogglePause,
            "s" | "step" => SessionCommand::Step,
            "a" | "auto" => SessionCommand::Auto,
            "r" | "reset" => SessionCommand::Reset,
            "v" | "view" => SessionCommand::View,
            "h" | "help" | "?" => SessionCommand::Help,
            "q" | "quit" | "exit" | "esc" | "\u{1b}" => SessionCommand::Quit,
            _ => return None,
        };
        Some(command)
    }
}

struct Session {
    scheduler: StepScheduler,
    endpoints: Endpoints,
    skip_noop_steps: bool,
    output: OutputConfig,
}

impl Session {
    fn auto_advancing(&self) -> bool {
        self.scheduler.is_running() && !self.scheduler.is_paused() && !self.scheduler.is_step_mode()
    }

    /// Returns `false` when the session should end.
    fn apply(&mut self, command: SessionCommand) -> Result<bool> {
        debug!("Session command: {:?}", command);
        match command {
            SessionCommand::Start(algorithm) => {
                self.scheduler
                    .start_run(algorithm, self.endpoints.start, Some(self.endpoints.end))?;
            }
            SessionCommand::TogglePause => self.scheduler.toggle_pause(),
            SessionCommand::Step => {
                if self.skip_noop_steps {
                    self.scheduler.set_step_mode(true);
                    self.scheduler.advance();
                } else {
                    self.scheduler.step_key();
                }
            }
            SessionCommand::Auto => self.scheduler.auto_mode(),
            SessionCommand::Reset => self.scheduler.reset(),
            SessionCommand::View => {}
            SessionCommand::Help => {
                HelpText::new(HELP).output(&self.output);
                return Ok(true);
            }
            SessionCommand::Quit => return Ok(false),
        }
        self.render();
        Ok(true)
    }

    /// Decode and apply one input line. Returns `false` when the session
    /// should end.
    fn handle_line(&mut self, line: &str) -> Result<bool> {
        if line.trim().is_empty() && line != " " {
            return Ok(true);
        }
        match SessionCommand::parse(line) {
            Some(command) => self.apply(command),
            None => {
                eprintln!("Unknown command '{}' (h for help)", line.trim());
                Ok(true)
            }
        }
    }

    fn on_tick(&mut self) {
        let Some(outcome) = self.scheduler.tick() else {
            return;
        };
        if outcome.is_done() {
            self.render();
        } else if outcome.is_visible() {
            StepLine::new(&self.scheduler, outcome).output(&self.output);
        }
    }

    fn render(&self) {
        RunView::capture(&self.scheduler)
            .with_controls()
            .output(&self.output);
    }
}

pub async fn run(graph: Option<&Path>, options: PlayOptions, output: &OutputConfig) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let (input, leftover) = match graph {
        Some(path) => (load_graph(path)?, Vec::new()),
        None => {
            let prompted = prompt_graph(&mut lines, &mut std::io::stdout()).await?;
            (prompted.input, prompted.leftover)
        }
    };
    let (graph, endpoints) = input.build(options.policy).context("Invalid graph")?;

    let mut scheduler = StepScheduler::new(graph);
    scheduler.set_step_mode(options.start_in_step_mode);

    let output = output.streaming();

    let mut session = Session {
        scheduler,
        endpoints,
        skip_noop_steps: options.skip_noop_steps,
        output,
    };

    info!(
        "Session ready: start {}, end {}",
        endpoints.start, endpoints.end
    );
    if session.output.format == OutputFormat::Table {
        session.render();
    }

    for token in &leftover {
        if !session.handle_line(token)? {
            return Ok(());
        }
    }

    let mut ticker = time::interval(options.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut stdin_open = true;

    loop {
        if !stdin_open && !session.auto_advancing() {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    stdin_open = false;
                    continue;
                };
                if !session.handle_line(&line)? {
                    break;
                }
            }

            _ = ticker.tick(), if session.auto_advancing() => {
                session.on_tick();
            }
        }
    }

    Ok(())
}
