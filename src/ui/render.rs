use super::carousel::Carousel;
use super::grid::VersionGrid;
use super::help_window;
use super::layout::{
    label_width, Scale, ADD_BUTTON_LABEL, VIEW_ALL_LABEL, VIEW_MORE_LABEL,
};
use super::filter::MatchMode;
use super::page::{InstallationsPage, LinkButton};
use super::fade::EdgeFade;
use super::scroll::ScrollPosition;
use super::theme::ThemePalette;
use crate::catalog::{CardArena, CatalogEntry};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget, Wrap,
    },
    Frame,
};
use std::time::Instant;

const SEARCH_PLACEHOLDER: &str = "Search versions...";

pub fn ui(f: &mut Frame, page: &InstallationsPage, palette: &ThemePalette, now: Instant) {
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        area,
    );

    // Too small to show any of the page; keep the footer and help only
    let layout = page.layout();
    let viewport = page.page_viewport();
    if viewport.is_empty() || layout.width == 0 || layout.total_rows == 0 {
        render_footer(f, page, palette);
        if page.help_visible() {
            render_help_window(f, palette);
        }
        return;
    }

    // The whole page is drawn off-screen, then the visible slice is copied
    let mut canvas = Buffer::empty(Rect::new(0, 0, layout.width, layout.total_rows));
    canvas.set_style(canvas.area, Style::default().bg(palette.background));
    render_page(&mut canvas, page, palette, now);

    let row_offset = page.page_row_offset();
    blit(
        &canvas,
        Position::new(0, row_offset),
        f.buffer_mut(),
        viewport,
    );

    // Page scroll bar
    if let Some(mut state) = scroll_state(page.page_position(), page.config().scale.unit_height) {
        let bar = Rect::new(
            area.right().saturating_sub(1),
            area.y,
            1.min(area.width),
            viewport.height,
        );
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .style(Style::default().fg(palette.scrollbar)),
            bar,
            &mut state,
        );
    }

    // Cursor in the search box
    if page.search_focused() {
        let search = layout.search_box;
        let text_width = label_width(page.filter().query());
        let col = search.x + 1 + text_width.min(search.width.saturating_sub(3));
        let row = search.y + 1;
        if row >= row_offset && row - row_offset < viewport.height {
            f.set_cursor_position(Position::new(viewport.x + col, viewport.y + row - row_offset));
        }
    }

    render_footer(f, page, palette);

    // Help screen overlay
    if page.help_visible() {
        render_help_window(f, palette);
    }
}

fn render_page(buf: &mut Buffer, page: &InstallationsPage, palette: &ThemePalette, now: Instant) {
    let layout = page.layout();
    let scale = &page.config().scale;
    let heading = Style::default()
        .fg(palette.text_primary)
        .add_modifier(Modifier::BOLD);
    let subheading = Style::default()
        .fg(palette.text_secondary)
        .add_modifier(Modifier::BOLD);

    // Title row
    Paragraph::new(Span::styled("Installations", heading.fg(palette.primary)))
        .render(layout.title, buf);
    Paragraph::new(Span::styled(
        format!("[{}]", ADD_BUTTON_LABEL),
        Style::default().fg(palette.accent),
    ))
    .render(layout.add_button, buf);

    // Recently opened has no data source yet
    Paragraph::new(Span::styled("Recently opened", subheading)).render(layout.recent_header, buf);

    Paragraph::new(Span::styled("Your installations", subheading))
        .render(layout.installations_header, buf);
    render_link(buf, layout.view_all, VIEW_ALL_LABEL, page.view_all(), palette, now);
    render_carousel(
        buf,
        layout.installations,
        layout.installations_bar,
        page.installations(),
        page.installation_cards(),
        scale,
        palette,
        now,
        "No installations yet",
    );

    Paragraph::new(Span::styled("Newly added", subheading))
        .render(layout.newly_added_header, buf);
    render_link(buf, layout.view_more, VIEW_MORE_LABEL, page.view_more(), palette, now);
    render_carousel(
        buf,
        layout.newly_added,
        layout.newly_added_bar,
        page.newly_added(),
        page.newly_added_cards(),
        scale,
        palette,
        now,
        "No versions available",
    );

    render_versions_header(buf, page, palette);

    let empty = if page.filter().query().is_empty() {
        "No versions to install".to_string()
    } else {
        format!("No versions match \"{}\"", page.filter().query())
    };
    render_grid(
        buf,
        layout.grid_viewport(),
        page.grid(),
        page.grid_cards(),
        scale,
        palette,
        now,
        &empty,
    );
}

fn render_versions_header(buf: &mut Buffer, page: &InstallationsPage, palette: &ThemePalette) {
    let layout = page.layout();
    let header = layout.versions_header;
    let title_row = Rect::new(header.x, header.y + header.height / 2, header.width, 1.min(header.height));
    Paragraph::new(Span::styled(
        "Versions",
        Style::default()
            .fg(palette.text_secondary)
            .add_modifier(Modifier::BOLD),
    ))
    .render(title_row, buf);

    let focused = page.search_focused();
    let border = if focused {
        palette.border_focused
    } else {
        palette.card_border
    };
    let query = page.filter().query();
    let text = if query.is_empty() {
        Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(palette.text_dim))
    } else {
        Span::styled(query.to_string(), Style::default().fg(palette.text_primary))
    };
    Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .render(layout.search_box, buf);

    Paragraph::new("≡")
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.text_secondary))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.card_border)),
        )
        .render(layout.filter_button, buf);
}

fn render_link(
    buf: &mut Buffer,
    area: Rect,
    label: &str,
    link: &LinkButton,
    palette: &ThemePalette,
    now: Instant,
) {
    // The chevron grows over the two reserved cells
    let chevron = match (link.reveal(now) * 2.0).round() as u8 {
        0 => "",
        1 => " ",
        _ => " ›",
    };
    let mut style = Style::default().fg(palette.link);
    if link.is_hovered() {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    Paragraph::new(Line::from(vec![
        Span::styled(label.to_string(), style),
        Span::styled(chevron, style),
    ]))
    .render(area, buf);
}

#[allow(clippy::too_many_arguments)]
fn render_carousel(
    buf: &mut Buffer,
    area: Rect,
    bar: Rect,
    carousel: &Carousel,
    cards: &CardArena,
    scale: &Scale,
    palette: &ThemePalette,
    now: Instant,
    empty: &str,
) {
    if cards.is_empty() {
        Paragraph::new(Span::styled(empty, Style::default().fg(palette.text_dim)))
            .render(area, buf);
        return;
    }

    // Cards are drawn whole into a strip wider than the viewport so that a
    // card cut by either edge keeps its border on the other side
    let (_, card_cols) = scale.col_span(0.0, carousel.config().card_width);
    let (_, card_rows) = scale.row_span(0.0, carousel.config().card_height);
    let card_height = (card_rows.max(0) as u16).min(area.height);
    let margin = card_cols as u16 + 1;
    let mut strip = Buffer::empty(Rect::new(0, 0, area.width + margin * 2, area.height));
    strip.set_style(strip.area, Style::default().bg(palette.background));

    for (index, entry) in cards.slice(carousel.visible_range()) {
        let (col, width) = scale.col_span(carousel.card_offset(index), carousel.config().card_width);
        let x = margin as i32 + col;
        if x < 0 || x + width > strip.area.width as i32 {
            continue;
        }
        let rect = Rect::new(x as u16, 0, width as u16, card_height);
        render_card(&mut strip, rect, entry, palette);
    }

    blit(&strip, Position::new(margin, 0), buf, area);
    apply_fade(buf, area, carousel.fade(), carousel.position(), palette, now);

    if let Some(mut state) = scroll_state(carousel.position(), scale.unit_width) {
        Scrollbar::new(ScrollbarOrientation::HorizontalBottom)
            .style(Style::default().fg(palette.scrollbar))
            .begin_symbol(None)
            .end_symbol(None)
            .render(bar, buf, &mut state);
    }
}

#[allow(clippy::too_many_arguments)]
fn render_grid(
    buf: &mut Buffer,
    area: Rect,
    grid: &VersionGrid,
    cards: &CardArena,
    scale: &Scale,
    palette: &ThemePalette,
    now: Instant,
    empty: &str,
) {
    if cards.is_empty() {
        Paragraph::new(Span::styled(empty, Style::default().fg(palette.text_dim)))
            .alignment(Alignment::Center)
            .render(Rect::new(area.x, area.y + 1, area.width, 1.min(area.height)), buf);
        return;
    }

    let (_, card_rows) = scale.row_span(0.0, grid.config().card_height);
    let margin = card_rows as u16 + 1;
    let mut strip = Buffer::empty(Rect::new(0, 0, area.width, area.height + margin * 2));
    strip.set_style(strip.area, Style::default().bg(palette.background));

    for cell in grid.cells() {
        let Some(entry) = cards.get(cell.index) else {
            continue;
        };
        let (col, width) = scale.col_span(cell.x, cell.width);
        let (row, height) = scale.row_span(cell.y, cell.height);
        let y = margin as i32 + row;
        // prefetched rows outside the strip are skipped
        if y < 0 || y + height > strip.area.height as i32 || col + width > strip.area.width as i32 {
            continue;
        }
        let rect = Rect::new(col.max(0) as u16, y as u16, width as u16, height as u16);
        render_card(&mut strip, rect, entry, palette);
    }

    blit(&strip, Position::new(0, margin), buf, area);
    apply_fade(buf, area, grid.fade(), grid.position(), palette, now);

    if let Some(mut state) = scroll_state(grid.position(), scale.unit_height) {
        let bar = Rect::new(area.right(), area.y, 1, area.height);
        Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .style(Style::default().fg(palette.scrollbar))
            .render(bar, buf, &mut state);
    }
}

/// Mask the scrollable edges of a region; a region with nothing beyond
/// either edge is left untouched
fn apply_fade(
    buf: &mut Buffer,
    area: Rect,
    fade: &EdgeFade,
    position: &ScrollPosition,
    palette: &ThemePalette,
    now: Instant,
) {
    if fade.is_open(now) {
        return;
    }
    fade.mask(now)
        .apply(buf, area, position.axis(), palette.background);
}

fn render_card(buf: &mut Buffer, area: Rect, entry: &CatalogEntry, palette: &ThemePalette) {
    let border = if entry.installed {
        palette.card_installed
    } else {
        palette.card_border
    };

    let mut lines = vec![Line::from(Span::styled(
        entry.label.clone(),
        Style::default()
            .fg(palette.card_text)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(detail) = &entry.detail {
        lines.push(Line::styled(
            detail.clone(),
            Style::default().fg(palette.text_secondary),
        ));
    }
    if entry.installed {
        lines.push(Line::styled(
            "● installed",
            Style::default().fg(palette.card_installed),
        ));
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .render(area, buf);
}

fn render_footer(f: &mut Frame, page: &InstallationsPage, palette: &ThemePalette) {
    let area = f.area();
    if area.is_empty() {
        return;
    }
    let footer = Rect::new(area.x, area.bottom() - 1, area.width, 1);

    let filter = page.filter();
    let mut status = format!(" {} versions", filter.visible_count());
    let query = filter.query();
    if !query.is_empty() {
        status.push_str(&format!(" matching \"{}\"", query));
        if filter.mode() == MatchMode::Fuzzy {
            status.push_str(" (fuzzy)");
        }
    }

    let hints = if page.search_focused() {
        "ESC clear · ENTER done"
    } else {
        "/ search · ? help · q quit"
    };

    let line = Line::from(vec![
        Span::styled(status, Style::default().fg(palette.text_secondary)),
        Span::styled("  ·  ", Style::default().fg(palette.text_dim)),
        Span::styled(hints, Style::default().fg(palette.text_dim)),
    ]);
    f.render_widget(Paragraph::new(line), footer);
}

fn render_help_window(f: &mut Frame, palette: &ThemePalette) {
    // Create a centered overlay area (90% width, 90% height)
    let area = f.area();
    let overlay_width = (area.width as f32 * 0.9) as u16;
    let overlay_height = (area.height as f32 * 0.9) as u16;
    let overlay_x = (area.width - overlay_width) / 2;
    let overlay_y = (area.height - overlay_height) / 2;

    let overlay_area = Rect {
        x: overlay_x,
        y: overlay_y,
        width: overlay_width,
        height: overlay_height,
    };
    if overlay_area.is_empty() {
        return;
    }

    // Clear the background
    f.render_widget(Clear, overlay_area);

    let help_block = Block::default()
        .borders(Borders::ALL)
        .title(" Help - Press '?' or ESC to close ")
        .style(Style::default().fg(palette.help_section).bg(palette.background));

    let help_content = Paragraph::new(help_window::get_help_text())
        .block(help_block)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(palette.text_primary).bg(palette.background));

    f.render_widget(help_content, overlay_area);
}

/// Copy `dst_area` worth of cells out of `src`, starting at `src_origin`
fn blit(src: &Buffer, src_origin: Position, dst: &mut Buffer, dst_area: Rect) {
    for dy in 0..dst_area.height {
        for dx in 0..dst_area.width {
            let from = (src_origin.x + dx, src_origin.y + dy);
            let to = (dst_area.x + dx, dst_area.y + dy);
            if let (Some(cell), Some(target)) = (src.cell(from), dst.cell_mut(to)) {
                *target = cell.clone();
            }
        }
    }
}

/// Scroll bar state in cells, or `None` when the region cannot scroll
fn scroll_state(position: &ScrollPosition, unit: f32) -> Option<ScrollbarState> {
    position.thumb()?;
    let max = (position.max_offset() / unit).ceil() as usize;
    let offset = (position.offset() / unit).round() as usize;
    let viewport = (position.viewport() / unit).floor() as usize;
    Some(
        ScrollbarState::new(max)
            .position(offset.min(max))
            .viewport_content_length(viewport),
    )
}
