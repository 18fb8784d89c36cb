//! The installations page: three nested scroll regions inside one page
//! region, driven by a queue of [`PageEvent`]s.
//!
//! The page owns every controller and keeps them across frames; rendering
//! reads them through accessors and never mutates anything.

use ratatui::layout::{Position, Rect};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::carousel::{Carousel, CarouselConfig};
use super::event::{PageEvent, PageKey};
use super::filter::{MatchMode, VersionFilter};
use super::grid::{GridConfig, VersionGrid};
use super::layout::{to_page_space, PageLayout, Scale};
use super::scroll::{Axis, ScrollPosition, ScrollSuppression};
use super::tween::{Easing, Tween};
use crate::catalog::{CardArena, CatalogEntry, LauncherViewModel};

/// Stable identity of each scroll region on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionId {
    Installations,
    NewlyAdded,
    Versions,
}

/// Extension points for the page's buttons and cards. Every method
/// defaults to doing nothing; the launcher binds what it supports.
pub trait PageHandlers {
    fn add_installation(&mut self) {}
    fn card_selected(&mut self, _region: RegionId, _entry: &CatalogEntry) {}
    fn view_all(&mut self, _region: RegionId) {}
    fn filter_menu(&mut self) {}
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct NoopHandlers;

#[cfg(test)]

impl PageHandlers for NoopHandlers {}

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub scale: Scale,
    pub carousel: CarouselConfig,
    pub grid: GridConfig,
    pub newly_added_limit: usize,
    pub match_mode: MatchMode,
    /// Units the page moves per wheel notch or arrow key
    pub page_wheel_step: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scale: Scale::default(),
            carousel: CarouselConfig::default(),
            grid: GridConfig::default(),
            newly_added_limit: 10,
            match_mode: MatchMode::Contains,
            page_wheel_step: 48.0,
        }
    }
}

const LINK_EXIT: Duration = Duration::from_millis(75);

/// Hyperlink-style button whose chevron slides in while hovered
#[derive(Debug, Clone)]
pub struct LinkButton {
    hovered: bool,
    reveal: Tween,
}

impl LinkButton {
    fn new(now: Instant) -> Self {
        Self {
            hovered: false,
            reveal: Tween::settled(0.0, now),
        }
    }

    fn set_hovered(&mut self, hovered: bool, now: Instant) -> bool {
        if hovered == self.hovered {
            return false;
        }
        self.hovered = hovered;
        if hovered {
            self.reveal.snap(1.0, now);
        } else {
            self.reveal.retarget(0.0, now, LINK_EXIT, Easing::Linear);
        }
        true
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// 0.0 hidden, 1.0 fully shown
    pub fn reveal(&self, now: Instant) -> f32 {
        self.reveal.value(now)
    }

    fn is_animating(&self, now: Instant) -> bool {
        !self.reveal.is_finished(now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    AddButton,
    ViewAll,
    ViewMore,
    SearchBox,
    FilterButton,
    Carousel(RegionId),
    Grid,
    Page,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    col: u16,
    row: u16,
    last_col: u16,
    moved: bool,
    region: Option<RegionId>,
}

#[derive(Debug)]
pub struct InstallationsPage {
    config: PageConfig,
    layout: PageLayout,
    screen: Rect,
    page: ScrollPosition,
    suppression: ScrollSuppression,
    installations: Carousel,
    newly_added: Carousel,
    grid: VersionGrid,
    filter: VersionFilter,
    installation_cards: CardArena,
    newly_added_cards: CardArena,
    grid_cards: CardArena,
    grid_revision: u64,
    view_all: LinkButton,
    view_more: LinkButton,
    search_focused: bool,
    help_visible: bool,
    pointer: Option<(u16, u16)>,
    press: Option<Press>,
    events: VecDeque<PageEvent>,
    quit_requested: bool,
}

impl InstallationsPage {
    pub fn new(config: PageConfig, now: Instant) -> Self {
        Self {
            layout: PageLayout::default(),
            screen: Rect::default(),
            page: ScrollPosition::new(Axis::Vertical),
            suppression: ScrollSuppression::new(),
            installations: Carousel::new(RegionId::Installations, config.carousel, now),
            newly_added: Carousel::new(RegionId::NewlyAdded, config.carousel, now),
            grid: VersionGrid::new(config.grid, now),
            filter: VersionFilter::new(config.match_mode),
            installation_cards: CardArena::new(),
            newly_added_cards: CardArena::new(),
            grid_cards: CardArena::new(),
            grid_revision: 0,
            view_all: LinkButton::new(now),
            view_more: LinkButton::new(now),
            search_focused: false,
            help_visible: false,
            pointer: None,
            press: None,
            events: VecDeque::new(),
            quit_requested: false,
            config,
        }
    }

    // ---- accessors used by rendering ----

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn page_position(&self) -> &ScrollPosition {
        &self.page
    }

    #[cfg(test)]
    pub fn suppression(&self) -> &ScrollSuppression {
        &self.suppression
    }

    pub fn installations(&self) -> &Carousel {
        &self.installations
    }

    pub fn newly_added(&self) -> &Carousel {
        &self.newly_added
    }

    pub fn grid(&self) -> &VersionGrid {
        &self.grid
    }

    pub fn filter(&self) -> &VersionFilter {
        &self.filter
    }

    pub fn installation_cards(&self) -> &CardArena {
        &self.installation_cards
    }

    pub fn newly_added_cards(&self) -> &CardArena {
        &self.newly_added_cards
    }

    pub fn grid_cards(&self) -> &CardArena {
        &self.grid_cards
    }

    pub fn view_all(&self) -> &LinkButton {
        &self.view_all
    }

    pub fn view_more(&self) -> &LinkButton {
        &self.view_more
    }

    pub fn search_focused(&self) -> bool {
        self.search_focused
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Screen area showing the page; the last column is the page scroll
    /// bar and the last row the footer
    pub fn page_viewport(&self) -> Rect {
        Rect::new(
            self.screen.x,
            self.screen.y,
            self.screen.width.saturating_sub(1),
            self.screen.height.saturating_sub(1),
        )
    }

    /// Page scroll expressed in whole rows
    pub fn page_row_offset(&self) -> u16 {
        let rows = (self.page.offset() / self.config.scale.unit_height).round();
        rows.clamp(0.0, u16::MAX as f32) as u16
    }

    fn carousel_mut(&mut self, region: RegionId) -> Option<&mut Carousel> {
        match region {
            RegionId::Installations => Some(&mut self.installations),
            RegionId::NewlyAdded => Some(&mut self.newly_added),
            _ => None,
        }
    }

    fn carousel_parts(&self, region: RegionId) -> Option<(&Carousel, &CardArena, Rect)> {
        match region {
            RegionId::Installations => Some((
                &self.installations,
                &self.installation_cards,
                self.layout.installations,
            )),
            RegionId::NewlyAdded => Some((
                &self.newly_added,
                &self.newly_added_cards,
                self.layout.newly_added,
            )),
            _ => None,
        }
    }

    // ---- frame lifecycle ----

    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = Rect::new(0, 0, width, height);
        let viewport = self.page_viewport();
        self.layout = PageLayout::compute(viewport.width, &self.config.scale);
        self.page.set_extents(
            self.layout.total_units,
            self.config.scale.rows_to_units(viewport.height),
        );
        tracing::debug!(width, height, rows = self.layout.total_rows, "Page resized");
    }

    /// Pull the collaborator's lists through the adapters and derived state.
    /// Cheap when nothing changed: every step is keyed on revisions.
    pub fn sync(&mut self, model: &dyn LauncherViewModel, now: Instant) {
        let revision = model.revision();
        self.installation_cards.sync(revision, model.installations());
        self.newly_added_cards
            .sync(revision, model.versions().iter().take(self.config.newly_added_limit));

        if self.filter.refresh(revision, model.versions()) {
            self.grid_revision += 1;
        }
        self.grid_cards
            .sync(self.grid_revision, self.filter.visible_versions(model.versions()));

        let scale = self.config.scale;
        self.installations.set_extents(
            self.installation_cards.len(),
            scale.cols_to_units(self.layout.installations.width),
            now,
        );
        self.newly_added.set_extents(
            self.newly_added_cards.len(),
            scale.cols_to_units(self.layout.newly_added.width),
            now,
        );
        let grid = self.layout.grid_viewport();
        self.grid.set_extents(
            self.grid_cards.len(),
            scale.cols_to_units(grid.width),
            scale.rows_to_units(grid.height),
            now,
        );
    }

    /// Advance animations. Returns true while something is still moving.
    pub fn tick(&mut self, now: Instant) -> bool {
        let installations = self.installations.tick(now);
        let newly_added = self.newly_added.tick(now);
        let grid = self.grid.tick(now);
        let links = self.view_all.is_animating(now) || self.view_more.is_animating(now);
        installations || newly_added || grid || links
    }

    pub fn push(&mut self, event: PageEvent) {
        self.events.push_back(event);
    }

    pub fn process_events(&mut self, handlers: &mut dyn PageHandlers, now: Instant) {
        while let Some(event) = self.events.pop_front() {
            self.handle(event, handlers, now);
        }
    }

    fn handle(&mut self, event: PageEvent, handlers: &mut dyn PageHandlers, now: Instant) {
        match event {
            PageEvent::PointerMoved { col, row } => self.update_hover(Some((col, row)), now),
            PageEvent::PointerLeft => self.update_hover(None, now),
            PageEvent::Wheel { col, row, delta } => {
                self.update_hover(Some((col, row)), now);
                self.wheel(col, row, delta, now);
            }
            PageEvent::DragStarted { col, row } => {
                self.update_hover(Some((col, row)), now);
                let region = match self.hit(col, row) {
                    Some(Hit::Carousel(region)) => Some(region),
                    _ => None,
                };
                self.press = Some(Press {
                    col,
                    row,
                    last_col: col,
                    moved: false,
                    region,
                });
            }
            PageEvent::DragMoved { col, row } => {
                self.update_hover(Some((col, row)), now);
                self.drag_to(col, now);
            }
            PageEvent::DragEnded => {
                if let Some(press) = self.press.take() {
                    if !press.moved {
                        self.click(press.col, press.row, handlers, now);
                    }
                }
            }
            PageEvent::Key(key) => self.key(key, now),
            PageEvent::Resized { width, height } => self.resize(width, height),
        }
    }

    // ---- hit testing ----

    fn to_page(&self, col: u16, row: u16) -> Option<Position> {
        let viewport = self.page_viewport();
        if !viewport.contains(Position::new(col, row)) {
            return None;
        }
        Some(to_page_space(
            col - viewport.x,
            row - viewport.y,
            self.page_row_offset(),
        ))
    }

    fn hit(&self, col: u16, row: u16) -> Option<Hit> {
        let p = self.to_page(col, row)?;
        let layout = &self.layout;
        let hit = if layout.add_button.contains(p) {
            Hit::AddButton
        } else if layout.view_all.contains(p) {
            Hit::ViewAll
        } else if layout.view_more.contains(p) {
            Hit::ViewMore
        } else if layout.search_box.contains(p) {
            Hit::SearchBox
        } else if layout.filter_button.contains(p) {
            Hit::FilterButton
        } else if layout.installations.contains(p) {
            Hit::Carousel(RegionId::Installations)
        } else if layout.newly_added.contains(p) {
            Hit::Carousel(RegionId::NewlyAdded)
        } else if layout.grid_viewport().contains(p) {
            Hit::Grid
        } else {
            Hit::Page
        };
        Some(hit)
    }

    fn carousel_card_at(&self, region: RegionId, col: u16, row: u16) -> Option<&CatalogEntry> {
        let p = self.to_page(col, row)?;
        let (carousel, cards, rect) = self.carousel_parts(region)?;
        let scale = &self.config.scale;
        let x = (p.x.saturating_sub(rect.x) as f32 + 0.5) * scale.unit_width + carousel.position().offset();
        let index = (x / carousel.stride()).floor() as usize;
        let within = x - index as f32 * carousel.stride();
        if within > carousel.config().card_width {
            return None;
        }
        cards.get(index)
    }

    fn grid_card_at(&self, col: u16, row: u16) -> Option<&CatalogEntry> {
        let p = self.to_page(col, row)?;
        let viewport = self.layout.grid_viewport();
        let scale = &self.config.scale;
        let metrics = self.grid.metrics();

        let x = (p.x.saturating_sub(viewport.x) as f32 + 0.5) * scale.unit_width - metrics.margin;
        let y = (p.y.saturating_sub(viewport.y) as f32 + 0.5) * scale.unit_height
            + self.grid.position().offset();
        if x < 0.0 {
            return None;
        }

        let column_stride = metrics.card_width + metrics.gap;
        let column = (x / column_stride).floor() as usize;
        let row_index = (y / self.grid.row_stride()).floor() as usize;
        if column >= metrics.columns
            || x - column as f32 * column_stride > metrics.card_width
            || y - row_index as f32 * self.grid.row_stride() > self.grid.config().card_height
        {
            return None;
        }
        self.grid_cards.get(row_index * metrics.columns + column)
    }

    // ---- input ----

    fn update_hover(&mut self, pointer: Option<(u16, u16)>, now: Instant) {
        self.pointer = pointer;
        let hit = pointer.and_then(|(col, row)| self.hit(col, row));

        let over_installations = hit == Some(Hit::Carousel(RegionId::Installations));
        let over_newly_added = hit == Some(Hit::Carousel(RegionId::NewlyAdded));
        if self
            .installations
            .set_hovered(over_installations, &mut self.suppression)
            | self
                .newly_added
                .set_hovered(over_newly_added, &mut self.suppression)
        {
            tracing::trace!(
                page_scroll = self.suppression.scroll_enabled(),
                "Carousel hover changed"
            );
        }

        self.view_all.set_hovered(hit == Some(Hit::ViewAll), now);
        self.view_more.set_hovered(hit == Some(Hit::ViewMore), now);
    }

    /// Scroll the page region unless a nested region suppresses it
    fn scroll_page(&mut self, delta: f32) -> f32 {
        if !self.suppression.scroll_enabled() {
            tracing::trace!(delta, "Page scroll suppressed");
            return 0.0;
        }
        self.page.scroll_by(delta)
    }

    fn wheel(&mut self, col: u16, row: u16, delta: f32, now: Instant) {
        match self.hit(col, row) {
            Some(Hit::Carousel(region)) => {
                if let Some(carousel) = self.carousel_mut(region) {
                    carousel.wheel(delta, now);
                }
            }
            Some(Hit::Grid) => {
                let requested = delta * self.grid.config().wheel_step;
                let moved = self.grid.wheel(delta, now);
                let rest = requested - moved;
                // The grid hands leftover travel to the page
                if rest.abs() > f32::EPSILON && self.scroll_page(rest) != 0.0 {
                    self.update_hover(self.pointer, now);
                }
            }
            Some(_) => {
                if self.scroll_page(delta * self.config.page_wheel_step) != 0.0 {
                    self.update_hover(self.pointer, now);
                }
            }
            None => {}
        }
    }

    fn drag_to(&mut self, col: u16, now: Instant) {
        let Some(press) = self.press.as_mut() else {
            return;
        };
        let dx = col as i32 - press.last_col as i32;
        if dx == 0 {
            return;
        }
        press.moved = true;
        press.last_col = col;
        let region = press.region;

        let delta = dx as f32 * self.config.scale.unit_width;
        if let Some(carousel) = region.and_then(|r| self.carousel_mut(r)) {
            carousel.drag(delta, now);
        }
    }

    fn click(&mut self, col: u16, row: u16, handlers: &mut dyn PageHandlers, _now: Instant) {
        let hit = self.hit(col, row);
        self.search_focused = hit == Some(Hit::SearchBox);

        match hit {
            Some(Hit::AddButton) => handlers.add_installation(),
            Some(Hit::ViewAll) => handlers.view_all(RegionId::Installations),
            Some(Hit::ViewMore) => handlers.view_all(RegionId::NewlyAdded),
            Some(Hit::FilterButton) => handlers.filter_menu(),
            Some(Hit::Carousel(region)) => {
                if let Some(entry) = self.carousel_card_at(region, col, row) {
                    handlers.card_selected(region, entry);
                }
            }
            Some(Hit::Grid) => {
                if let Some(entry) = self.grid_card_at(col, row) {
                    handlers.card_selected(RegionId::Versions, entry);
                }
            }
            Some(Hit::SearchBox) | Some(Hit::Page) | None => {}
        }
    }

    fn key(&mut self, key: PageKey, now: Instant) {
        if self.help_visible {
            if matches!(key, PageKey::Esc | PageKey::Char('?')) {
                self.help_visible = false;
            }
            return;
        }

        if self.search_focused {
            let edited = match key {
                PageKey::Char(c) => self.filter.push_char(c),
                PageKey::Backspace => self.filter.pop_char(),
                PageKey::Esc => {
                    let cleared = self.filter.clear();
                    if !cleared {
                        self.search_focused = false;
                    }
                    cleared
                }
                PageKey::Enter | PageKey::Tab => {
                    self.search_focused = false;
                    false
                }
                _ => false,
            };
            if edited {
                self.grid.scroll_to_top(now);
            }
            return;
        }

        let step = self.config.page_wheel_step;
        let page = self.page.viewport();
        match key {
            PageKey::Char('/') => self.search_focused = true,
            PageKey::Char('?') => self.help_visible = true,
            PageKey::Char('q') => self.quit_requested = true,
            PageKey::Esc => {
                if self.filter.clear() {
                    self.grid.scroll_to_top(now);
                } else {
                    self.quit_requested = true;
                }
            }
            PageKey::Up | PageKey::Char('k') => {
                self.page.scroll_by(-step);
            }
            PageKey::Down | PageKey::Char('j') => {
                self.page.scroll_by(step);
            }
            PageKey::PageUp => {
                self.page.scroll_by(-page);
            }
            PageKey::PageDown => {
                self.page.scroll_by(page);
            }
            PageKey::Home => self.page.scroll_to(0.0),
            PageKey::End => self.page.scroll_to(self.page.max_offset()),
            PageKey::Left | PageKey::Char('h') => self.step_carousel(-1, now),
            PageKey::Right | PageKey::Char('l') => self.step_carousel(1, now),
            _ => {}
        }
    }

    /// Keyboard stepping goes to the hovered carousel, or the first one
    fn step_carousel(&mut self, direction: i64, now: Instant) {
        let carousel = if self.newly_added.is_hovered() {
            &mut self.newly_added
        } else {
            &mut self.installations
        };
        let first = carousel.first_visible_index() as i64;
        let target = (first + direction).max(0) as usize;
        carousel.animate_to_index(target, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogFile, Installation, Version};

    #[derive(Default)]
    struct Recorder {
        added: usize,
        selected: Vec<(RegionId, String)>,
        view_all: Vec<RegionId>,
        filter_menu: usize,
    }

    impl PageHandlers for Recorder {
        fn add_installation(&mut self) {
            self.added += 1;
        }

        fn card_selected(&mut self, region: RegionId, entry: &CatalogEntry) {
            self.selected.push((region, entry.label.clone()));
        }

        fn view_all(&mut self, region: RegionId) {
            self.view_all.push(region);
        }

        fn filter_menu(&mut self) {
            self.filter_menu += 1;
        }
    }

    fn catalog(installations: usize, versions: usize) -> CatalogFile {
        let installations = (0..installations)
            .map(|i| Installation {
                id: format!("inst-{i}"),
                display_name: Some(format!("Install {i}")),
                version: None,
            })
            .collect();
        let versions = (0..versions)
            .map(|i| Version::new(format!("1.{i}"), i % 4 == 0))
            .collect();
        CatalogFile::new(installations, versions)
    }

    fn page(model: &CatalogFile) -> (InstallationsPage, Instant) {
        let now = Instant::now();
        let mut page = InstallationsPage::new(PageConfig::default(), now);
        page.resize(120, 40);
        page.sync(model, now);
        (page, now)
    }

    /// Press and release on the same cell
    fn click(col: u16, row: u16) -> [PageEvent; 2] {
        [PageEvent::DragStarted { col, row }, PageEvent::DragEnded]
    }

    fn run(page: &mut InstallationsPage, events: Vec<PageEvent>, now: Instant) -> Recorder {
        let mut recorder = Recorder::default();
        for event in events {
            page.push(event);
        }
        page.process_events(&mut recorder, now);
        recorder
    }

    // Screen cells inside each region at page offset 0 (120x40 terminal)
    const OVER_INSTALLATIONS: (u16, u16) = (10, 11);
    const OVER_TITLE_TEXT: (u16, u16) = (10, 2);
    const OVER_SEARCH: (u16, u16) = (90, 26);

    #[test]
    fn hovering_a_carousel_suppresses_page_wheel() {
        let model = catalog(12, 30);
        let (mut page, now) = page(&model);
        let (col, row) = OVER_INSTALLATIONS;

        run(&mut page, vec![PageEvent::Wheel { col, row, delta: 1.0 }], now);
        assert_eq!(page.page_position().offset(), 0.0);
        assert!(!page.suppression().scroll_enabled());
        assert!(page.installations().is_hovered());
        assert!(page.installations().is_animating());

        let (col, row) = OVER_TITLE_TEXT;
        run(&mut page, vec![PageEvent::Wheel { col, row, delta: 1.0 }], now);
        assert!(page.suppression().scroll_enabled());
        assert_eq!(page.page_position().offset(), 48.0);
    }

    #[test]
    fn carousel_wheel_targets_follow_first_visible() {
        let model = catalog(12, 0);
        let (mut page, now) = page(&model);
        let (col, row) = OVER_INSTALLATIONS;

        run(&mut page, vec![PageEvent::Wheel { col, row, delta: 1.0 }], now);
        let later = now + Duration::from_secs(1);
        page.tick(later);
        assert_eq!(page.installations().position().offset(), 0.0);

        run(&mut page, vec![PageEvent::Wheel { col, row, delta: 1.0 }], later);
        page.tick(later + Duration::from_secs(1));
        assert_eq!(page.installations().first_visible_index(), 1);
    }

    #[test]
    fn drag_scrolls_the_carousel_under_the_pointer() {
        let model = catalog(12, 0);
        let (mut page, now) = page(&model);
        let (col, row) = OVER_INSTALLATIONS;

        run(
            &mut page,
            vec![
                PageEvent::DragStarted { col: col + 20, row },
                PageEvent::DragMoved { col: col + 10, row },
                PageEvent::DragMoved { col, row },
                PageEvent::DragEnded,
            ],
            now,
        );
        assert_eq!(page.installations().position().offset(), 160.0);
        assert_eq!(page.newly_added().position().offset(), 0.0);
    }

    #[test]
    fn typing_in_search_narrows_the_grid() {
        let model = catalog(0, 30);
        let (mut page, now) = page(&model);
        assert_eq!(page.grid_cards().len(), 22);

        let (col, row) = OVER_SEARCH;
        run(
            &mut page,
            vec![
                PageEvent::DragStarted { col, row },
                PageEvent::DragEnded,
                PageEvent::Key(PageKey::Char('2')),
                PageEvent::Key(PageKey::Char('9')),
            ],
            now,
        );
        assert!(page.search_focused());
        page.sync(&model, now);
        assert_eq!(page.filter().query(), "29");
        assert_eq!(page.grid_cards().len(), 1);
        assert_eq!(page.grid_cards().get(0).unwrap().label, "1.29");

        run(&mut page, vec![PageEvent::Key(PageKey::Esc)], now);
        page.sync(&model, now);
        assert_eq!(page.grid_cards().len(), 22);
        assert!(page.search_focused());
        assert!(!page.quit_requested());
    }

    #[test]
    fn clicks_reach_the_extension_points() {
        let model = catalog(3, 30);
        let (mut page, now) = page(&model);
        let layout = page.layout().clone();

        let (col, row) = OVER_INSTALLATIONS;
        let add = (layout.add_button.x + 1, layout.add_button.y);
        let view_all = (layout.view_all.x + 1, layout.view_all.y);
        let filter = (layout.filter_button.x + 1, layout.filter_button.y + 1);
        let grid_card = (layout.grid.x + 2, layout.grid.y + 1);

        let events = [(col, row), add, view_all, filter, grid_card]
            .into_iter()
            .flat_map(|(col, row)| click(col, row))
            .collect();
        let recorder = run(&mut page, events, now);

        assert_eq!(recorder.added, 1);
        assert_eq!(recorder.filter_menu, 1);
        assert_eq!(recorder.view_all, vec![RegionId::Installations]);
        assert_eq!(
            recorder.selected,
            vec![
                (RegionId::Installations, "Install 0".to_string()),
                (RegionId::Versions, "1.1".to_string()),
            ]
        );
    }

    #[test]
    fn search_edits_return_the_grid_to_the_top() {
        let model = catalog(0, 200);
        let (mut page, now) = page(&model);
        let grid = page.layout().grid_viewport();
        run(&mut page, vec![PageEvent::Key(PageKey::End)], now);
        let row = grid.y.saturating_sub(page.page_row_offset()) + 1;

        run(&mut page, vec![PageEvent::Wheel { col: grid.x + 2, row, delta: 2.0 }], now);
        assert!(page.grid().position().offset() > 0.0);

        run(
            &mut page,
            vec![PageEvent::Key(PageKey::Char('/')), PageEvent::Key(PageKey::Char('1'))],
            now,
        );
        assert!(page.search_focused());
        assert_eq!(page.grid().position().offset(), 0.0);
    }

    #[test]
    fn empty_installations_render_nothing_and_stay_open() {
        let model = catalog(0, 5);
        let (page, now) = page(&model);
        assert_eq!(page.installations().visible_range(), 0..0);
        assert!(page.installations().fade().is_open(now));
        assert!(!page.installations().position().can_scroll_forward());
    }

    #[test]
    fn newly_added_shows_at_most_the_limit() {
        let model = catalog(0, 25);
        let (page, _) = page(&model);
        assert_eq!(page.newly_added_cards().len(), 10);
        assert_eq!(page.newly_added_cards().get(0).unwrap().label, "1.0");
    }

    #[test]
    fn grid_overflow_passes_to_the_page() {
        let model = catalog(0, 8);
        let (mut page, now) = page(&model);
        // scroll the page until the grid is on screen
        run(&mut page, vec![PageEvent::Key(PageKey::End)], now);
        let offset = page.page_position().offset();
        let rows = page.page_row_offset();
        let grid = page.layout().grid_viewport();
        let row = grid.y.saturating_sub(rows) + 1;

        run(&mut page, vec![PageEvent::Wheel { col: grid.x + 2, row, delta: -1.0 }], now);
        assert!(page.page_position().offset() < offset);
    }

    #[test]
    fn link_hover_reveals_chevron() {
        let model = catalog(1, 1);
        let (mut page, now) = page(&model);
        let link = page.layout().view_all;
        run(&mut page, vec![PageEvent::PointerMoved { col: link.x, row: link.y }], now);
        assert!(page.view_all().is_hovered());
        assert_eq!(page.view_all().reveal(now), 1.0);

        run(&mut page, vec![PageEvent::PointerLeft], now);
        assert!(page.view_all().reveal(now + Duration::from_millis(30)) > 0.0);
        assert_eq!(page.view_all().reveal(now + Duration::from_millis(75)), 0.0);
    }

    #[test]
    fn escape_and_q_quit_when_idle() {
        let model = catalog(0, 0);
        let (mut page, now) = page(&model);
        run(&mut page, vec![PageEvent::Key(PageKey::Char('?'))], now);
        assert!(page.help_visible());
        run(&mut page, vec![PageEvent::Key(PageKey::Esc)], now);
        assert!(!page.help_visible());
        assert!(!page.quit_requested());
        run(&mut page, vec![PageEvent::Key(PageKey::Char('q'))], now);
        assert!(page.quit_requested());
    }

    #[test]
    fn repeated_sync_is_cheap() {
        let model = catalog(3, 40);
        let (mut page, now) = page(&model);
        let evaluations = page.grid_cards().created_total();
        page.sync(&model, now);
        page.sync(&model, now);
        assert_eq!(page.grid_cards().created_total(), evaluations);
    }
}
