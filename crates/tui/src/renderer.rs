use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};
use worklane_core::describe::describe;
use worklane_core::model::{LayoutResult, PositionedExperience};
use worklane_core::selection::{Selection, SelectionEvent};
use worklane_core::stats::experience_stats;
use worklane_core::views::hit_test::{event_at, hover_text};
use worklane_core::views::{TimelineStyle, legend, page_layout, time_axis, timeline};
use worklane_protocol::{Point, RenderCommand, TextAlign, ThemeToken, Viewport};

/// Logical pixels per terminal cell.
const CELL_W: f64 = 8.0;
const CELL_H: f64 = 16.0;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::CategoryWork => Color::Blue,
        ThemeToken::CategoryInternship => Color::Green,
        ThemeToken::CategoryFreelance => Color::Rgb(245, 124, 0),
        ThemeToken::TrackBackground => Color::Rgb(20, 20, 20),
        ThemeToken::TrackBorder => Color::DarkGray,
        ThemeToken::AxisBackground => Color::Black,
        ThemeToken::AxisTick => Color::Gray,
        ThemeToken::GridLine => Color::DarkGray,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::SelectionHighlight => Color::Yellow,
        ThemeToken::Background => Color::Black,
        ThemeToken::Surface => Color::Black,
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::PanelBackground => Color::Black,
        ThemeToken::PanelBorder => Color::DarkGray,
        ThemeToken::CurrentBadge => Color::Green,
        ThemeToken::SkillChip => Color::Rgb(55, 71, 79),
        ThemeToken::SkillChipText => Color::White,
    }
}

/// Terminal stand-in for a named category icon.
fn icon_glyph(name: &str) -> char {
    match name {
        "work" => '◆',
        "school" => '▲',
        "business" => '●',
        _ => '■',
    }
}

/// Timeline geometry where every section is a whole number of cells.
fn terminal_style() -> TimelineStyle {
    TimelineStyle {
        row_height: CELL_H,
        bar_height: CELL_H,
        axis_height: 2.0 * CELL_H,
        legend_height: CELL_H,
        font_size: CELL_W / 0.6,
        min_bar_width: CELL_W,
        min_label_width: 6.0 * CELL_W,
        panel_padding: CELL_W,
    }
}

fn to_col(x: f64) -> i64 {
    (x / CELL_W).floor() as i64
}

fn to_row(y: f64) -> i64 {
    (y / CELL_H).floor() as i64
}

/// Center of the cell at `(column, row)` in logical pixels relative to
/// `area`, or `None` when the cell is outside it.
fn cell_center(area: Rect, column: u16, row: u16) -> Option<Point> {
    let inside = column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height;
    inside.then(|| {
        Point::new(
            (f64::from(column - area.x) + 0.5) * CELL_W,
            (f64::from(row - area.y) + 0.5) * CELL_H,
        )
    })
}

/// Mutable cell at a position relative to `area`, clipped to it.
fn cell_at(buf: &mut Buffer, area: Rect, col: i64, row: i64) -> Option<&mut ratatui::buffer::Cell> {
    if col < 0 || row < 0 || col >= i64::from(area.width) || row >= i64::from(area.height) {
        return None;
    }
    buf.cell_mut((area.x + col as u16, area.y + row as u16))
}

/// Cells covered by a rect, at least one in each direction.
fn cell_span(start: f64, len: f64, cell: f64) -> (i64, i64) {
    let first = (start / cell).floor() as i64;
    let last = (((start + len) / cell).ceil() as i64 - 1).max(first);
    (first, last)
}

fn paint(buf: &mut Buffer, area: Rect, commands: &[RenderCommand]) {
    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                ..
            } => {
                let (c0, c1) = cell_span(rect.x, rect.w, CELL_W);
                let (r0, r1) = cell_span(rect.y, rect.h, CELL_H);
                let bg = theme_to_color(*color);
                for row in r0..=r1 {
                    for col in c0..=c1 {
                        if let Some(cell) = cell_at(buf, area, col, row) {
                            cell.set_char(' ').set_bg(bg);
                            if let Some(border) = border_color {
                                cell.set_fg(theme_to_color(*border))
                                    .set_style(Style::default().add_modifier(Modifier::BOLD));
                            }
                        }
                    }
                }
                if border_color.is_some() {
                    // Bracket the selected bar.
                    if let Some(cell) = cell_at(buf, area, c0, r0) {
                        cell.set_char('▐');
                    }
                    if c1 > c0
                        && let Some(cell) = cell_at(buf, area, c1, r0)
                    {
                        cell.set_char('▌');
                    }
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                ..
            } => {
                let len = text.chars().count() as i64;
                let anchor = to_col(position.x);
                let start = match align {
                    TextAlign::Left => anchor,
                    TextAlign::Center => anchor - len / 2,
                    TextAlign::Right => anchor - len + 1,
                };
                let row = to_row(position.y);
                let fg = theme_to_color(*color);
                for (i, ch) in text.chars().enumerate() {
                    if let Some(cell) = cell_at(buf, area, start + i as i64, row) {
                        cell.set_char(ch).set_fg(fg);
                    }
                }
            }
            RenderCommand::DrawIcon {
                position,
                name,
                color,
                ..
            } => {
                if let Some(cell) = cell_at(buf, area, to_col(position.x), to_row(position.y)) {
                    cell.set_char(icon_glyph(name)).set_fg(theme_to_color(*color));
                }
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width,
            } if from.x == to.x => {
                let col = to_col(from.x).min(i64::from(area.width) - 1);
                let fg = theme_to_color(*color);
                match color {
                    ThemeToken::GridLine => {
                        let empty = theme_to_color(ThemeToken::TrackBackground);
                        for row in to_row(from.y)..to_row(to.y) {
                            // Only on empty track space, never through a bar.
                            if let Some(cell) = cell_at(buf, area, col, row)
                                && cell.bg == empty
                            {
                                cell.set_char('┊').set_fg(fg);
                            }
                        }
                    }
                    _ => {
                        let tick = if *width >= 1.0 { '┴' } else { '·' };
                        if let Some(cell) = cell_at(buf, area, col, to_row(from.y)) {
                            cell.set_char(tick).set_fg(fg);
                        }
                    }
                }
            }
            // Row borders and groups have no cell representation.
            _ => {}
        }
    }
}

/// Timeline commands for `selection`, laid out in an area `width` cells wide.
fn timeline_commands(layout: &LayoutResult, selection: &Selection, width: u16) -> Vec<RenderCommand> {
    let style = terminal_style();
    let px_width = f64::from(width) * CELL_W;
    let page = page_layout(layout, &Selection::none(), px_width, &style);
    let viewport = Viewport::new(px_width, page.details_top);

    let mut commands = legend::render_legend(&viewport, &style);
    commands.extend(timeline::render_tracks(
        layout,
        selection,
        &viewport,
        page.tracks_top,
        &style,
    ));
    commands.extend(time_axis::render_time_axis(
        layout,
        &viewport,
        page.axis_top,
        page.tracks_top,
        &style,
    ));
    commands
}

fn timeline_rows(layout: &LayoutResult) -> u16 {
    let style = terminal_style();
    let page = page_layout(layout, &Selection::none(), 0.0, &style);
    u16::try_from(to_row(page.details_top)).unwrap_or(u16::MAX)
}

fn details_lines(entry: &PositionedExperience) -> Vec<Line<'static>> {
    let description = describe(entry);
    let record = &entry.record;
    let accent = theme_to_color(record.category.color());

    let mut title = vec![Span::styled(
        description.title,
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if record.is_current {
        title.push(Span::raw(" "));
        title.push(Span::styled(
            " Current ",
            Style::default()
                .fg(theme_to_color(ThemeToken::SkillChipText))
                .bg(theme_to_color(ThemeToken::CurrentBadge)),
        ));
    }

    let mut lines = vec![
        Line::from(title),
        Line::from(Span::styled(description.subtitle, Style::default().fg(accent))),
    ];
    let meta = if record.location.is_empty() {
        description.caption
    } else {
        format!("{} • {}", record.location, description.caption)
    };
    lines.push(Line::from(Span::styled(
        meta,
        Style::default().fg(theme_to_color(ThemeToken::TextMuted)),
    )));

    if !record.summary_points.is_empty() {
        lines.push(Line::default());
        lines.extend(record.summary_points.iter().map(|p| Line::from(format!("• {p}"))));
    }
    if !record.skills.is_empty() {
        lines.push(Line::default());
        let chip = Style::default()
            .fg(theme_to_color(ThemeToken::SkillChipText))
            .bg(theme_to_color(ThemeToken::SkillChip));
        let mut chips = Vec::with_capacity(record.skills.len() * 2);
        for skill in &record.skills {
            chips.push(Span::styled(format!(" {skill} "), chip));
            chips.push(Span::raw(" "));
        }
        lines.push(Line::from(chips));
    }
    lines
}

fn overview_lines(layout: &LayoutResult, selection: &Selection) -> Vec<Line<'static>> {
    let stats = experience_stats(layout);
    let mut lines = vec![
        Line::from(format!(
            "{} months across {} roles • {} internships • {} skills",
            stats.covered_months,
            layout.len(),
            stats.completed.internship,
            stats.distinct_skills,
        )),
        Line::default(),
    ];
    for entry in layout.by_recency() {
        let marker = if selection.is_selected(entry.id()) { "▸ " } else { "  " };
        let description = describe(entry);
        let look = entry.record.category.style();
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(
                format!("{} ", icon_glyph(look.icon)),
                Style::default().fg(theme_to_color(look.color)),
            ),
            Span::styled(description.title, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" · {} · ", description.subtitle)),
            Span::styled(
                format!("{} ({} mo)", description.caption, entry.duration_months()),
                Style::default().fg(theme_to_color(ThemeToken::TextMuted)),
            ),
        ]));
    }
    lines
}

struct ViewState {
    selection: Selection,
    /// Bar moved to by the arrow keys, as an index into `positioned`.
    focus: Option<usize>,
    hover: Option<String>,
    /// Where the timeline was last drawn and what was drawn there.
    timeline_area: Rect,
    commands: Vec<RenderCommand>,
}

impl ViewState {
    fn apply(&mut self, event: SelectionEvent) {
        tracing::debug!(?event, "selection event");
        self.selection = std::mem::take(&mut self.selection).apply(event);
    }

    fn move_focus(&mut self, layout: &LayoutResult, forward: bool) {
        let count = layout.len();
        if count == 0 {
            return;
        }
        self.focus = Some(match (self.focus, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        });
        self.hover = self
            .focus
            .and_then(|i| layout.positioned.get(i))
            .map(|entry| describe(entry).tooltip().replace('\n', " · "));
    }
}

fn draw(frame: &mut Frame, layout: &LayoutResult, state: &mut ViewState) {
    let rows = timeline_rows(layout);
    let [header, timeline_area, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(rows),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(" worklane | click or ←→ + Enter to open | Esc close | q quit ")
            .style(Style::default().fg(Color::White).bg(Color::DarkGray)),
        header,
    );

    state.commands = timeline_commands(layout, &state.selection, timeline_area.width);
    state.timeline_area = timeline_area;
    frame.render_widget(
        Block::default().style(Style::default().bg(theme_to_color(ThemeToken::Background))),
        timeline_area,
    );
    paint(frame.buffer_mut(), timeline_area, &state.commands);
    if let Some(focus) = state.focus {
        highlight_bar(frame.buffer_mut(), timeline_area, &state.commands, focus as u64);
    }

    let overview = Paragraph::new(overview_lines(layout, &state.selection))
        .block(Block::bordered().title(" All experiences "))
        .wrap(Wrap { trim: true });
    match state.selection.resolve(layout) {
        Some(entry) => {
            let [details, list] =
                Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .areas(body);
            frame.render_widget(
                Paragraph::new(details_lines(entry))
                    .block(Block::bordered().title(" Details "))
                    .wrap(Wrap { trim: true }),
                details,
            );
            frame.render_widget(overview, list);
        }
        None => frame.render_widget(overview, body),
    }

    let status_text = state.hover.clone().unwrap_or_default();
    frame.render_widget(
        Paragraph::new(status_text).style(Style::default().fg(Color::Gray)),
        status,
    );
}

fn highlight_bar(buf: &mut Buffer, area: Rect, commands: &[RenderCommand], index: u64) {
    let Some(rect) = commands.iter().find_map(|c| match c {
        RenderCommand::DrawRect {
            rect,
            hit_id: Some(id),
            ..
        } if *id == index => Some(*rect),
        _ => None,
    }) else {
        return;
    };
    let (c0, c1) = cell_span(rect.x, rect.w, CELL_W);
    let (r0, r1) = cell_span(rect.y, rect.h, CELL_H);
    for row in r0..=r1 {
        for col in c0..=c1 {
            if let Some(cell) = cell_at(buf, area, col, row) {
                cell.set_style(Style::default().add_modifier(Modifier::REVERSED));
            }
        }
    }
}

pub fn render_tui(layout: &LayoutResult) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = ViewState {
        selection: Selection::none(),
        focus: None,
        hover: None,
        timeline_area: Rect::default(),
        commands: Vec::new(),
    };

    loop {
        terminal.draw(|frame| draw(frame, layout, &mut state))?;

        // Handle input
        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Esc => state.apply(SelectionEvent::Cleared),
                    KeyCode::Left => state.move_focus(layout, false),
                    KeyCode::Right | KeyCode::Tab => state.move_focus(layout, true),
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        if let Some(entry) = state.focus.and_then(|i| layout.positioned.get(i)) {
                            state.apply(SelectionEvent::Activated(entry.id().clone()));
                        }
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    let point = cell_center(state.timeline_area, mouse.column, mouse.row);
                    match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            if let Some(event) =
                                point.and_then(|p| event_at(&state.commands, layout, p))
                            {
                                state.apply(event);
                            }
                        }
                        MouseEventKind::Moved => {
                            state.hover = point
                                .and_then(|p| hover_text(&state.commands, layout, p))
                                .map(|text| text.replace('\n', " · "));
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
