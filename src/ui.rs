use crate::calendar::{month_markers, month_weeks};
use crate::planner::Planner;
use crate::task::DEADLINE_FORMAT;
use chrono::{Datelike, Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Description,
    Deadline,
    Category,
    Search,
    List,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Description,
        Focus::Deadline,
        Focus::Category,
        Focus::Search,
        Focus::List,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Presentation state only: which widget has focus and which visible row is
/// selected. Tasks and form values live in the [`Planner`].
#[derive(Debug)]
pub struct Screen {
    focus: Focus,
    selected: usize,
    show_calendar: bool,
}

pub fn show_splash<B: Backend>(terminal: &mut Terminal<B>, delay: Duration) -> io::Result<()> {
    if delay.is_zero() {
        return Ok(());
    }
    terminal.draw(|f| {
        let area = f.area();
        let middle = Rect {
            y: area.y + area.height / 2,
            height: area.height.min(1),
            ..area
        };
        let title = Paragraph::new(Span::styled(
            "Daily Planner",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        f.render_widget(title, middle);
    })?;

    // Keys pressed during the splash are dropped so they don't land in the form.
    let until = Instant::now() + delay;
    while let Some(remaining) = until.checked_duration_since(Instant::now()) {
        if remaining.is_zero() {
            break;
        }
        if event::poll(remaining)? {
            event::read()?;
        }
    }
    Ok(())
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    planner: &mut Planner,
    show_calendar: bool,
) -> io::Result<()> {
    let mut screen = Screen::new(show_calendar);
    loop {
        screen.clamp_selection(planner);
        terminal.draw(|f| screen.render(f, planner))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if screen.handle_key(key, planner) == Flow::Quit {
                return Ok(());
            }
        }
    }
}

impl Screen {
    pub fn new(show_calendar: bool) -> Self {
        Self {
            focus: Focus::Description,
            selected: 0,
            show_calendar,
        }
    }

    fn clamp_selection(&mut self, planner: &Planner) {
        let len = planner.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn handle_key(&mut self, key: KeyEvent, planner: &mut Planner) -> Flow {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Flow::Quit;
        }

        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Esc => {
                if planner.notice().is_some() {
                    planner.dismiss_notice();
                } else {
                    planner.cancel_edit();
                }
            }
            code if self.focus == Focus::List => return self.handle_list_key(code, planner),
            code => self.handle_field_key(code, planner),
        }
        Flow::Continue
    }

    fn handle_list_key(&mut self, code: KeyCode, planner: &mut Planner) -> Flow {
        let rows: Vec<usize> = planner.visible().into_iter().map(|(i, _)| i).collect();
        match code {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < rows.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(&index) = rows.get(self.selected) {
                    if planner.begin_edit(index).is_some() {
                        self.focus = Focus::Description;
                    }
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(&index) = rows.get(self.selected) {
                    planner.delete(index);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn handle_field_key(&mut self, code: KeyCode, planner: &mut Planner) {
        match code {
            KeyCode::Enter if self.focus == Focus::Search => self.focus = Focus::List,
            KeyCode::Enter => match planner.submit() {
                Ok(notice) => {
                    debug!(?notice, "form submitted");
                    self.focus = Focus::Description;
                }
                Err(err) => debug!(%err, "submission ignored"),
            },
            // Stand-in for a date/time picker.
            KeyCode::F(2) if self.focus == Focus::Deadline => {
                planner.set_deadline(Local::now().format(DEADLINE_FORMAT).to_string());
            }
            KeyCode::Char(ch) => self.edit_field(planner, |value| value.push(ch)),
            KeyCode::Backspace => self.edit_field(planner, |value| {
                value.pop();
            }),
            _ => {}
        }
    }

    fn edit_field(&mut self, planner: &mut Planner, edit: impl FnOnce(&mut String)) {
        let mut value = field_value(self.focus, planner).to_string();
        edit(&mut value);
        match self.focus {
            Focus::Description => planner.set_description(value),
            Focus::Deadline => planner.set_deadline(value),
            Focus::Category => planner.set_category(value),
            Focus::Search => {
                planner.set_search(value);
                self.selected = 0;
            }
            Focus::List => {}
        }
    }

    fn render(&self, f: &mut Frame, planner: &Planner) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(f.area());

        let title = Paragraph::new(Span::styled(
            "Daily Planner",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, rows[0]);

        f.render_widget(
            self.field_widget("Task Description", Focus::Description, planner),
            rows[1],
        );

        let pair = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);
        f.render_widget(
            self.field_widget("Deadline (F2: now)", Focus::Deadline, planner),
            pair[0],
        );
        f.render_widget(self.field_widget("Category", Focus::Category, planner), pair[1]);
        f.render_widget(self.field_widget("Search Tasks", Focus::Search, planner), rows[3]);

        if self.show_calendar {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(rows[4]);
            self.render_list(f, planner, body[0]);
            render_calendar(f, planner, body[1], Local::now().date_naive());
        } else {
            self.render_list(f, planner, rows[4]);
        }

        f.render_widget(Paragraph::new(status_line(planner)), rows[5]);
    }

    fn field_widget<'a>(&self, title: &'a str, focus: Focus, planner: &'a Planner) -> Paragraph<'a> {
        Paragraph::new(field_value(focus, planner)).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(self.border_style(focus)),
        )
    }

    fn border_style(&self, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    }

    fn render_list(&self, f: &mut Frame, planner: &Planner, area: Rect) {
        let visible = planner.visible();
        let items: Vec<ListItem> = visible
            .iter()
            .map(|(index, t)| {
                let marker = if planner.edit_cursor() == Some(*index) {
                    "* "
                } else {
                    "  "
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{}[#{}] ", marker, index + 1)),
                    Span::styled(&t.description, Style::default().fg(Color::White)),
                    Span::raw(format!(" (Due: {})", t.deadline)),
                    Span::styled(
                        format!(" {}", t.category_str()),
                        Style::default().fg(Color::Yellow),
                    ),
                ]))
            })
            .collect();

        let title = format!("Tasks ({} of {})", visible.len(), planner.tasks().len());
        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(self.border_style(Focus::List)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));

        let mut state = ListState::default();
        if self.focus == Focus::List && !visible.is_empty() {
            state.select(Some(self.selected));
        }
        f.render_stateful_widget(list, area, &mut state);
    }
}

fn field_value(focus: Focus, planner: &Planner) -> &str {
    let form = planner.form();
    match focus {
        Focus::Description => &form.description,
        Focus::Deadline => &form.deadline,
        Focus::Category => &form.category,
        Focus::Search => planner.search_query(),
        Focus::List => "",
    }
}

fn status_line(planner: &Planner) -> Line<'static> {
    match planner.notice() {
        Some(notice) => Line::from(Span::styled(
            format!("{} (Esc to dismiss)", notice.message()),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::raw(format!(
            "Enter: {}  Tab: next  e: edit  d: delete  Esc: cancel  Ctrl+C: quit",
            planner.submit_label()
        ))),
    }
}

fn render_calendar(f: &mut Frame, planner: &Planner, area: Rect, today: NaiveDate) {
    let markers = month_markers(planner.tasks(), today.year(), today.month());
    let mut lines = vec![Line::from("Mo Tu We Th Fr Sa Su")];
    for week in month_weeks(today.year(), today.month()) {
        let cells: Vec<Span> = week
            .iter()
            .map(|cell| match cell {
                Some(day) => {
                    let mut style = Style::default();
                    if markers.contains_key(day) {
                        style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
                    }
                    if *day == today.day() {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Span::styled(format!("{:>2} ", day), style)
                }
                None => Span::raw("   "),
            })
            .collect();
        lines.push(Line::from(cells));
    }
    let due: usize = markers.values().sum();
    lines.push(Line::from(format!("{} due this month", due)));

    let calendar = Paragraph::new(lines).block(
        Block::default()
            .title(today.format("%B %Y").to_string())
            .borders(Borders::ALL),
    );
    f.render_widget(calendar, area);
}
