//! App state and main loop: input handling, driving the refresh scheduler, and drawing.

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::Context;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::Settings;
use crate::monitor::{CpuMonitor, MemoryMonitor, Monitor, NetworkMonitor, Slot};
use crate::sampler::{CpuSource, MemorySource, NetworkSource, SysCpu, SysMemory, SysNetwork};
use crate::scheduler::Scheduler;
use crate::ui::{
    self,
    header::{draw_header, HeaderInfo},
};

// Input/redraw granularity; sampling follows the configured interval.
const FRAME: Duration = Duration::from_millis(50);

/// The three monitors plus what the header shows about them.
pub struct Dashboard {
    pub memory: MemoryMonitor<Box<dyn MemorySource>>,
    pub network: NetworkMonitor<Box<dyn NetworkSource>>,
    pub cpu: CpuMonitor<Box<dyn CpuSource>>,
    pub last_refresh: Option<chrono::DateTime<Local>>,
}

impl Dashboard {
    pub fn new(
        memory: Box<dyn MemorySource>,
        network: Box<dyn NetworkSource>,
        cpu: Box<dyn CpuSource>,
        capacity: usize,
    ) -> Self {
        Self {
            memory: MemoryMonitor::new(memory, capacity, Slot::TopLeft),
            network: NetworkMonitor::new(network, capacity, Slot::TopRight),
            cpu: CpuMonitor::new(cpu, Slot::Bottom),
            last_refresh: None,
        }
    }

    /// Monitors backed by the local machine.
    pub fn local(settings: &Settings) -> Self {
        Self::new(
            Box::new(SysMemory::new()),
            Box::new(SysNetwork::new()),
            Box::new(SysCpu::new(settings.cpu_window())),
            settings.capacity,
        )
    }

    pub fn monitors(&self) -> [&dyn Monitor; 3] {
        [&self.cpu, &self.memory, &self.network]
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>, header: &HeaderInfo) {
        let panels = ui::layout(f.area());
        draw_header(f, panels.header, header);
        for m in self.monitors() {
            m.draw(f, panels.area(m.slot()));
        }
    }
}

/// One job per monitor, all on the shared interval.
pub fn build_scheduler(interval: Duration) -> Scheduler<Dashboard> {
    let mut s = Scheduler::new();
    s.every("cpu", interval, |d: &mut Dashboard| d.cpu.refresh());
    s.every("memory", interval, |d: &mut Dashboard| d.memory.refresh());
    s.every("network", interval, |d: &mut Dashboard| d.network.refresh());
    s
}

pub struct App {
    dashboard: Dashboard,
    scheduler: Scheduler<Dashboard>,
    interval: Duration,
    paused: bool,
    should_quit: bool,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self::with_dashboard(Dashboard::local(settings), settings.interval())
    }

    pub fn with_dashboard(dashboard: Dashboard, interval: Duration) -> Self {
        Self {
            dashboard,
            scheduler: build_scheduler(interval),
            interval,
            paused: false,
            should_quit: false,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Let `elapsed` pass on the shared clock. Returns whether anything refreshed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.paused {
            return false;
        }
        if self.scheduler.advance(&mut self.dashboard, elapsed) == 0 {
            return false;
        }
        self.dashboard.last_refresh = Some(Local::now());
        true
    }

    /// Refresh every monitor immediately.
    pub fn tick_now(&mut self) {
        self.scheduler.tick_all(&mut self.dashboard);
        self.dashboard.last_refresh = Some(Local::now());
    }

    /// Returns whether the screen needs a redraw.
    pub fn handle_key(&mut self, k: KeyEvent) -> bool {
        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                false
            }
            KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                false
            }
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                self.paused = !self.paused;
                debug!(paused = self.paused, "toggled pause");
                true
            }
            _ => false,
        }
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>) {
        let header = HeaderInfo {
            interval: self.interval,
            last_refresh: self.dashboard.last_refresh,
            paused: self.paused,
        };
        self.dashboard.draw(f, &header);
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Terminal setup
        let guard = TerminalGuard::enter().context("failed to initialize terminal")?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;
        terminal.clear()?;
        info!(
            jobs = ?self.scheduler.names(),
            interval_ms = self.interval.as_millis() as u64,
            "dashboard running"
        );

        // Main loop
        let res = self.event_loop(&mut terminal).await;

        // Teardown
        drop(guard);
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()> {
        self.tick_now();
        let mut last = Instant::now();
        let mut dirty = true;
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                match event::read()? {
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        dirty |= self.handle_key(k);
                    }
                    Event::Resize(_, _) => dirty = true,
                    _ => {}
                }
            }
            if self.should_quit {
                break;
            }

            let now = Instant::now();
            dirty |= self.advance(now.duration_since(last));
            last = now;

            if dirty {
                terminal.draw(|f| self.draw(f))?;
                dirty = false;
            }

            sleep(FRAME).await;
        }

        Ok(())
    }
}

/// Raw mode + alternate screen for as long as it lives. Restores the terminal
/// on drop, including when the run future is cancelled.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}
