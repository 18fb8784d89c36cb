use super::event::PageEvent;
use super::page::{InstallationsPage, PageHandlers, RegionId};
use super::render::ui;
use super::theme::ThemePalette;
use crate::catalog::{CatalogEntry, LauncherViewModel};
use crate::config::Settings;
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, poll, DisableFocusChange, DisableMouseCapture, EnableFocusChange,
        EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Handlers used by the binary. Nothing is wired to a launcher yet, so
/// every action is only logged.
#[derive(Debug, Default)]
pub struct LoggingHandlers;

impl PageHandlers for LoggingHandlers {
    fn add_installation(&mut self) {
        tracing::info!("Add installation requested");
    }

    fn card_selected(&mut self, region: RegionId, entry: &CatalogEntry) {
        tracing::info!(?region, key = ?entry.key, label = %entry.label, "Card selected");
    }

    fn view_all(&mut self, region: RegionId) {
        tracing::info!(?region, "View all requested");
    }

    fn filter_menu(&mut self) {
        tracing::info!("Filter menu requested");
    }
}

fn is_interrupt(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        })
    )
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    page: &mut InstallationsPage,
    model: &dyn LauncherViewModel,
    handlers: &mut dyn PageHandlers,
    palette: &ThemePalette,
    frame_interval: Duration,
) -> Result<()> {
    loop {
        let now = Instant::now();
        page.sync(model, now);
        page.tick(now);
        terminal.draw(|f| ui(f, page, palette, now))?;

        // Poll at the frame interval so animations keep advancing
        if poll(frame_interval)? {
            // Drain everything already queued before the next frame
            loop {
                let event = event::read()?;
                if is_interrupt(&event) {
                    tracing::debug!("Interrupted from keyboard");
                    return Ok(());
                }
                if let Some(event) = PageEvent::from_terminal(&event) {
                    page.push(event);
                }
                if !poll(Duration::ZERO)? {
                    break;
                }
            }
            page.process_events(handlers, Instant::now());
        }

        if page.quit_requested() {
            return Ok(());
        }
    }
}

pub struct Runner;

impl Runner {
    /// Show the installations page for `model` until the user quits
    pub fn run(model: &dyn LauncherViewModel, settings: &Settings) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = Self::run_page(&mut terminal, model, settings);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableFocusChange
        )?;
        terminal.show_cursor()?;

        result
    }

    fn run_page<B: ratatui::backend::Backend>(
        terminal: &mut Terminal<B>,
        model: &dyn LauncherViewModel,
        settings: &Settings,
    ) -> Result<()> {
        let now = Instant::now();
        let mut page = InstallationsPage::new(settings.page_config(), now);
        let size = terminal.size()?;
        page.resize(size.width, size.height);

        tracing::info!(
            installations = model.installations().len(),
            versions = model.versions().len(),
            theme = settings.theme.name(),
            "Opening installations page"
        );

        let palette = settings.theme.palette();
        let mut handlers = LoggingHandlers;
        run_app(
            terminal,
            &mut page,
            model,
            &mut handlers,
            &palette,
            settings.frame_interval(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_c_interrupts() {
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let plain_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(is_interrupt(&ctrl_c));
        assert!(!is_interrupt(&plain_c));
    }
}
