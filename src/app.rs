use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::action::Action;
use crate::config::{Config, parse_key};
use crate::event::Event;
use crate::stats::history::MetricHistory;
use crate::stats::platform;
use crate::stats::provider::SharedProvider;
use crate::stats::snapshot::{CacheSnapshot, MemorySnapshot, PerfSnapshot};
use crate::task::{self, OptimizationResult, ResourceKind, TaskEvent};
use crate::ui::theme::{ColorSupport, Theme, resolve_color_support};

/// Fixed poll cadence; the retention length lives in `stats::history`.
pub const POLL_INTERVAL_MS: u64 = 1000;

const STATUS_EXPIRY_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Memory,
    Cache,
    Optimization,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Memory, Tab::Cache, Tab::Optimization];

    pub fn next(self) -> Self {
        match self {
            Tab::Dashboard => Tab::Memory,
            Tab::Memory => Tab::Cache,
            Tab::Cache => Tab::Optimization,
            Tab::Optimization => Tab::Dashboard,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Tab::Dashboard => Tab::Optimization,
            Tab::Memory => Tab::Dashboard,
            Tab::Cache => Tab::Memory,
            Tab::Optimization => Tab::Cache,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Memory => "Memory",
            Tab::Cache => "Cache",
            Tab::Optimization => "Optimization",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Dashboard => 0,
            Tab::Memory => 1,
            Tab::Cache => 2,
            Tab::Optimization => 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub optimize_memory: KeyCode,
    pub optimize_cache: KeyCode,
    pub next_tab: KeyCode,
    pub prev_tab: KeyCode,
    pub refresh: KeyCode,
    pub cycle_theme: KeyCode,
    pub help: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            optimize_memory: parse_key(&kb.optimize_memory).unwrap_or(KeyCode::Char('m')),
            optimize_cache: parse_key(&kb.optimize_cache).unwrap_or(KeyCode::Char('c')),
            next_tab: parse_key(&kb.next_tab).unwrap_or(KeyCode::Tab),
            prev_tab: parse_key(&kb.prev_tab).unwrap_or(KeyCode::BackTab),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let mut entries = vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.optimize_memory), "Optimize memory"),
            (key_label(self.optimize_cache), "Optimize cache"),
            (key_label(self.next_tab), "Next tab"),
            (key_label(self.prev_tab), "Previous tab"),
            (key_label(self.refresh), "Refresh now"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.help), "Toggle help"),
        ];
        entries.push(("1-4".to_string(), "Jump to tab"));
        entries.push(("←→".to_string(), "Switch tab"));
        entries.push(("Ctrl+C".to_string(), "Quit (always)"));
        entries
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "S-Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        _ => "?".to_string(),
    }
}

pub struct App {
    pub running: bool,
    provider: SharedProvider,
    task_tx: mpsc::UnboundedSender<Event>,
    pub history: MetricHistory,
    pub latest_memory: Option<MemorySnapshot>,
    pub latest_cache: Option<CacheSnapshot>,
    pub latest_perf: Option<PerfSnapshot>,
    pub memory_in_flight: bool,
    pub cache_in_flight: bool,
    pub memory_result: Option<OptimizationResult<MemorySnapshot>>,
    pub cache_result: Option<OptimizationResult<CacheSnapshot>>,
    pub tab: Tab,
    pub input_mode: InputMode,
    pub status_message: Option<(String, Instant)>,
    pub elevated: bool,
    pub theme: Theme,
    pub color_support: ColorSupport,
    pub keybinds: ResolvedKeybinds,
}

impl App {
    pub fn new(
        config: Config,
        provider: SharedProvider,
        task_tx: mpsc::UnboundedSender<Event>,
    ) -> Self {
        let color_support = resolve_color_support(&config.general.color_support);
        let theme = Theme::from_config(&config.general.theme, color_support);
        let keybinds = ResolvedKeybinds::from_config(&config.keybinds);
        let elevated = platform::is_elevated();
        if !elevated {
            tracing::warn!("running without elevated privileges, optimizations are advisory");
        }

        App {
            running: true,
            provider,
            task_tx,
            history: MetricHistory::default(),
            latest_memory: None,
            latest_cache: None,
            latest_perf: None,
            memory_in_flight: false,
            cache_in_flight: false,
            memory_result: None,
            cache_result: None,
            tab: Tab::Dashboard,
            input_mode: InputMode::Normal,
            status_message: None,
            elevated,
            theme,
            color_support,
            keybinds,
        }
    }

    /// One poll tick: fetch the three snapshots and append them to history.
    /// A provider error aborts this tick only; the interval keeps running.
    pub fn poll_tick(&mut self) {
        match self.read_snapshots() {
            Ok((memory, cache, perf)) => {
                self.latest_memory = Some(memory.clone());
                self.latest_cache = Some(cache.clone());
                self.latest_perf = Some(perf.clone());
                self.history.record(memory, cache, perf);
            }
            Err(err) => {
                tracing::error!(error = %err, "stats poll failed");
                self.set_status(format!("Stats update failed: {err}"));
            }
        }

        // Clear expired status messages
        if let Some((_, created)) = &self.status_message
            && created.elapsed().as_secs() >= STATUS_EXPIRY_SECS
        {
            self.status_message = None;
        }
    }

    fn read_snapshots(
        &self,
    ) -> color_eyre::Result<(MemorySnapshot, CacheSnapshot, PerfSnapshot)> {
        let mut provider = self
            .provider
            .lock()
            .map_err(|_| color_eyre::eyre::eyre!("stats provider lock poisoned"))?;
        let memory = provider.memory()?;
        let cache = provider.cache()?;
        let perf = provider.performance()?;
        Ok((memory, cache, perf))
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        // Tab jumps and arrows are hardwired (not configurable)
        match code {
            KeyCode::Char('1') => return Action::SelectTab(Tab::Dashboard),
            KeyCode::Char('2') => return Action::SelectTab(Tab::Memory),
            KeyCode::Char('3') => return Action::SelectTab(Tab::Cache),
            KeyCode::Char('4') => return Action::SelectTab(Tab::Optimization),
            KeyCode::Right => return Action::NextTab,
            KeyCode::Left => return Action::PrevTab,
            _ => {}
        }

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.optimize_memory {
            return Action::OptimizeMemory;
        }
        if code == kb.optimize_cache {
            return Action::OptimizeCache;
        }
        if code == kb.next_tab {
            return Action::NextTab;
        }
        if code == kb.prev_tab {
            return Action::PrevTab;
        }
        if code == kb.refresh {
            return Action::Refresh;
        }
        if code == kb.cycle_theme {
            return Action::CycleTheme;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }

        Action::None
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::NextTab => self.tab = self.tab.next(),
            Action::PrevTab => self.tab = self.tab.prev(),
            Action::SelectTab(tab) => self.tab = tab,
            Action::OptimizeMemory => self.start_optimization(ResourceKind::Memory),
            Action::OptimizeCache => self.start_optimization(ResourceKind::Cache),
            Action::Refresh => self.poll_tick(),
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::CycleTheme => {
                self.theme = self.theme.next(self.color_support);
            }
            Action::None => {}
        }
    }

    /// Checks the per-kind in-flight flag before spawning; a second request
    /// for the same kind while one is live is rejected, not queued.
    fn start_optimization(&mut self, kind: ResourceKind) {
        if self.in_flight(kind) {
            self.set_status(format!("{} optimization already running", kind.label()));
            return;
        }
        match kind {
            ResourceKind::Memory => self.memory_in_flight = true,
            ResourceKind::Cache => self.cache_in_flight = true,
        }
        self.set_status(format!("Optimizing {}...", kind.label()));
        tracing::info!(kind = kind.label(), "optimization started");
        task::spawn(self.provider.clone(), kind, self.task_tx.clone());
    }

    pub fn in_flight(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Memory => self.memory_in_flight,
            ResourceKind::Cache => self.cache_in_flight,
        }
    }

    /// Consumes a worker completion on the UI task. Both arms clear the
    /// in-flight flag; nothing may leave a kind permanently gated.
    pub fn on_task_event(&mut self, event: TaskEvent) {
        match event {
            TaskEvent::MemoryDone(result) => {
                self.memory_in_flight = false;
                let status = if result.success {
                    "Memory optimization complete".to_string()
                } else {
                    format!("Memory optimization finished with issues: {}", result.message)
                };
                self.set_status(status);
                tracing::info!(success = result.success, message = %result.message, "memory optimization done");
                self.memory_result = Some(result);
            }
            TaskEvent::CacheDone(result) => {
                self.cache_in_flight = false;
                let status = if result.success {
                    "Cache optimization complete".to_string()
                } else {
                    format!("Cache optimization finished with issues: {}", result.message)
                };
                self.set_status(status);
                tracing::info!(success = result.success, message = %result.message, "cache optimization done");
                self.cache_result = Some(result);
            }
            TaskEvent::Failed { kind, error } => {
                match kind {
                    ResourceKind::Memory => self.memory_in_flight = false,
                    ResourceKind::Cache => self.cache_in_flight = false,
                }
                self.set_status(format!("Error optimizing {}: {error}", kind.label()));
            }
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }
}
