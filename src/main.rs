use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use turkeybowl_terminal::config::AppConfig;
use turkeybowl_terminal::countdown::{countdown_until, format_event_time, parse_event_time};
use turkeybowl_terminal::editor::{EditorMode, TeamEditor};
use turkeybowl_terminal::error::AdminResult;
use turkeybowl_terminal::forms::FormState;
use turkeybowl_terminal::model::{HistoryKind, TournamentData};
use turkeybowl_terminal::selection::{MoveDirection, Side};
use turkeybowl_terminal::state::{
    AppState, ConfirmAction, Effect, Modal, Prompt, PromptKind, Screen,
};
use turkeybowl_terminal::store::Store;
use turkeybowl_terminal::transfer;

#[derive(Parser)]
#[command(name = "turkeybowl_terminal", about = "Roster, teams and history for the Turkey Bowl")]
struct Cli {
    /// Directory holding saved data (overrides TURKEYBOWL_DATA_DIR)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Write an export bundle to FILE (or into a directory) and exit
    #[arg(long, value_name = "FILE", conflicts_with_all = ["import", "reset"])]
    export: Option<PathBuf>,

    /// Import a bundle from FILE into the store and exit
    #[arg(long, value_name = "FILE", conflicts_with = "reset")]
    import: Option<PathBuf>,

    /// Delete saved data so the built-in defaults load next time, then exit
    #[arg(long)]
    reset: bool,
}

struct App {
    state: AppState,
    store: Store,
    should_quit: bool,
}

impl App {
    fn new(state: AppState, store: Store) -> Self {
        Self {
            state,
            store,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.modal.is_some() {
            self.on_modal_key(key);
            return;
        }
        if let KeyCode::Char(c) = key.code {
            if self.state.feed_unlock(c) {
                return;
            }
        }
        if self.state.help_overlay {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.state.help_overlay = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.set_screen(Screen::Home),
            KeyCode::Char('2') => self.state.set_screen(Screen::Roster),
            KeyCode::Char('3') => self.state.set_screen(Screen::Teams),
            KeyCode::Char('4') => self.state.set_screen(Screen::History),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Tab if self.state.screen == Screen::History => {
                self.state.cycle_history_section()
            }
            KeyCode::Char('?') => self.state.help_overlay = true,
            _ if self.state.admin_mode => self.on_admin_key(key),
            _ => {}
        }
    }

    fn on_admin_key(&mut self, key: KeyEvent) {
        let screen = self.state.screen;
        let result = match key.code {
            KeyCode::Esc | KeyCode::Char('X') => {
                self.state.exit_admin();
                Ok(Effect::None)
            }
            KeyCode::Char('E') => {
                self.state
                    .open_modal(Modal::Prompt(Prompt::new(PromptKind::ExportPath)));
                Ok(Effect::None)
            }
            KeyCode::Char('I') => {
                self.state
                    .open_modal(Modal::Prompt(Prompt::new(PromptKind::ImportPath)));
                Ok(Effect::None)
            }
            KeyCode::Char('R') => {
                self.state.open_modal(Modal::Confirm(ConfirmAction::Reset));
                Ok(Effect::None)
            }
            KeyCode::Char('a') => self.state.open_add().map(|_| Effect::None),
            KeyCode::Char('e') => self.state.open_edit().map(|_| Effect::None),
            KeyCode::Char('D') => {
                self.state.request_delete();
                Ok(Effect::None)
            }
            KeyCode::Char('c') if screen == Screen::Roster => {
                self.state.toggle_selected_current_year()
            }
            KeyCode::Char('r') if screen == Screen::Teams => {
                self.state.open_roster_editor().map(|_| Effect::None)
            }
            KeyCode::Char(']') if screen == Screen::Teams => {
                self.state.select_member_next();
                Ok(Effect::None)
            }
            KeyCode::Char('[') if screen == Screen::Teams => {
                self.state.select_member_prev();
                Ok(Effect::None)
            }
            KeyCode::Char('-') if screen == Screen::Teams => {
                self.state.request_member_removal();
                Ok(Effect::None)
            }
            _ => Ok(Effect::None),
        };
        self.finish(result);
    }

    fn on_modal_key(&mut self, key: KeyEvent) {
        let confirming = matches!(self.state.modal, Some(Modal::Confirm(_)));
        if key.code == KeyCode::Esc
            || (confirming && matches!(key.code, KeyCode::Char('n') | KeyCode::Char('N')))
        {
            self.state.close_modal();
            return;
        }
        let data = &self.state.data;
        let submit = match &mut self.state.modal {
            Some(Modal::Form(form)) => form_key(form, key, data),
            Some(Modal::Prompt(prompt)) => text_key(&mut prompt.input, key),
            Some(Modal::Confirm(_)) => {
                matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter)
            }
            Some(Modal::TeamEditor(editor)) => editor_key(editor, key),
            None => false,
        };
        if submit {
            let result = self.state.submit_modal();
            self.finish(result);
        }
    }

    fn finish(&mut self, result: AdminResult<Effect>) {
        match result {
            Ok(effect) => self.apply_effect(effect),
            Err(err) => {
                warn!("admin action rejected: {err}");
                self.state.push_log(format!("[WARN] {err}"));
            }
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Persist(kinds) => {
                for kind in kinds {
                    if let Err(err) = self.store.save_kind(&self.state.data, kind) {
                        error!("save failed: {err:#}");
                        self.state
                            .push_log(format!("[WARN] Saving {} failed", kind.label()));
                    }
                }
            }
            Effect::Reset => match self.store.reset() {
                Ok(()) => {
                    let data = self.store.load_data();
                    self.state.replace_data(data);
                }
                Err(err) => {
                    error!("reset failed: {err:#}");
                    self.state.push_log("[WARN] Reset failed");
                }
            },
        }
    }
}

/// Returns true when the form should be submitted.
fn form_key(form: &mut FormState, key: KeyEvent, data: &TournamentData) -> bool {
    match key.code {
        KeyCode::Enter => return true,
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left => form.cycle_focused(false, data),
        KeyCode::Right => form.cycle_focused(true, data),
        KeyCode::Char(' ') if form.fields.get(form.focus).is_some_and(|f| f.is_choice()) => {
            form.cycle_focused(true, data)
        }
        KeyCode::Char(c) => {
            if let Some(field) = form.focused_mut() {
                field.push_char(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = form.focused_mut() {
                field.pop_char();
            }
        }
        _ => {}
    }
    false
}

fn text_key(input: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => return true,
        KeyCode::Char(c) => input.push(c),
        KeyCode::Backspace => {
            input.pop();
        }
        _ => {}
    }
    false
}

fn editor_key(editor: &mut TeamEditor, key: KeyEvent) -> bool {
    if editor.editing_name {
        match key.code {
            KeyCode::Enter | KeyCode::Tab => editor.editing_name = false,
            KeyCode::Char(c) => editor.name.push(c),
            KeyCode::Backspace => {
                editor.name.pop();
            }
            _ => {}
        }
        return false;
    }
    match key.code {
        KeyCode::Char('s') => return true,
        KeyCode::Char('n') if editor.mode == EditorMode::Create => editor.editing_name = true,
        KeyCode::Tab | KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
            editor.switch_focus()
        }
        KeyCode::Char('j') | KeyCode::Down => editor.cursor_next(),
        KeyCode::Char('k') | KeyCode::Up => editor.cursor_prev(),
        KeyCode::Char(' ') => {
            editor.toggle_mark();
        }
        KeyCode::Enter => {
            editor.move_under_cursor();
        }
        KeyCode::Char('>') => {
            editor.move_marked(MoveDirection::ToSelected);
        }
        KeyCode::Char('<') => {
            editor.move_marked(MoveDirection::ToAvailable);
        }
        KeyCode::Char('c') => {
            editor.cycle_captain();
        }
        _ => {}
    }
    false
}

fn init_tracing(config: &AppConfig) -> Result<()> {
    fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("failed to create {}", config.data_dir.display()))?;
    let log_path = config.log_path();
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.data_dir.clone())?;
    init_tracing(&config)?;
    let store = Store::new(config.data_dir.clone());

    if let Some(path) = &cli.export {
        let data = store.load_data();
        let written = transfer::export_to(path, &data)?;
        println!("Data exported to {}", written.display());
        return Ok(());
    }
    if let Some(path) = &cli.import {
        let mut data = store.load_data();
        let kinds = transfer::import_from(path, &mut data)?;
        for kind in &kinds {
            store.save_kind(&data, *kind)?;
        }
        println!("Imported {} section(s) from {}", kinds.len(), path.display());
        return Ok(());
    }
    if cli.reset {
        store.reset()?;
        println!("Data reset to defaults");
        return Ok(());
    }

    info!(dir = %config.data_dir.display(), "starting terminal");
    let state = AppState::new(store.load_data(), &config.admin_keyword);
    let mut app = App::new(state, store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, config.tick);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("terminal loop failed: {err}");
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, tick_rate: Duration) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_line(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Home => render_home(frame, chunks[1], &app.state),
        Screen::Roster => render_roster(frame, chunks[1], &app.state),
        Screen::Teams => render_teams(frame, chunks[1], &app.state),
        Screen::History => render_history(frame, chunks[1], &app.state),
    }

    let status = app.state.last_log().unwrap_or("");
    let footer = Paragraph::new(format!("{status}\n{}", footer_text(&app.state)))
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(footer, chunks[2]);

    let area = frame.size();
    if let Some(modal) = &app.state.modal {
        render_modal(frame, area, modal, &app.state);
    } else if app.state.help_overlay {
        render_help_overlay(frame, area);
    }
}

fn header_line(state: &AppState) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("  TURKEY BOWL {}  ", state.data.settings.current_year),
        Style::default().fg(Color::Rgb(255, 102, 0)).add_modifier(Modifier::BOLD),
    )];
    for (idx, screen) in Screen::ALL.iter().enumerate() {
        let style = if *screen == state.screen {
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} {} ", idx + 1, screen.label()), style));
        spans.push(Span::raw(" "));
    }
    if state.admin_mode {
        spans.push(Span::styled(
            " ADMIN ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

fn footer_text(state: &AppState) -> String {
    let base = "1-4 Screens | j/k Move | ? Help | q Quit";
    if !state.admin_mode {
        return base.to_string();
    }
    let screen_keys = match state.screen {
        Screen::Home => "",
        Screen::Roster => " | a Add | e Edit | c This year | D Delete",
        Screen::Teams => " | a Add | e Rename | r Roster | [/] Member | - Remove | D Delete",
        Screen::History => " | Tab Section | a Add | e Edit | D Delete",
    };
    format!("{base}{screen_keys} | E Export | I Import | R Reset | Esc Exit admin")
}

fn render_home(frame: &mut Frame, area: Rect, state: &AppState) {
    let settings = &state.data.settings;
    let countdown = match parse_event_time(&settings.event_date) {
        Some(event) => countdown_until(event, Local::now().naive_local()).display(),
        None => "TBD".to_string(),
    };
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled(
            format!("Turkey Bowl {}", settings.current_year),
            bold.fg(Color::Rgb(255, 102, 0)),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Kickoff:      ", bold),
            Span::raw(format_event_time(&settings.event_date)),
        ]),
        Line::from(vec![
            Span::styled("Location:     ", bold),
            Span::raw(settings.event_location.clone()),
        ]),
        Line::from(vec![
            Span::styled("Register by:  ", bold),
            Span::raw(format_event_time(&settings.registration_deadline)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Countdown:    ", bold),
            Span::styled(countdown, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(format!(
            "{} players, {} teams, {} championships on record",
            state.data.players.len(),
            state.data.teams.len(),
            state.data.history.championships.len()
        )),
    ];
    let home = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Home"));
    frame.render_widget(home, area);
}

fn render_roster(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(36)])
        .split(area);

    let players = &state.data.players;
    let block = Block::default().borders(Borders::ALL).title("Roster");
    let inner = block.inner(columns[0]);
    frame.render_widget(block, columns[0]);
    if players.is_empty() {
        render_empty(frame, inner, "No players yet");
    } else {
        let (start, end) = visible_range(state.selected, players.len(), inner.height as usize);
        let lines: Vec<Line> = (start..end)
            .map(|idx| {
                let p = &players[idx];
                let text = format!(
                    "{:<3} {:<18} \"{}\"  {:<3} {}y{}",
                    p.initials(),
                    p.name,
                    p.nickname,
                    p.position,
                    p.years_played,
                    if p.current_year { "" } else { "  (out)" }
                );
                Line::styled(text, row_style(idx == state.selected))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    let detail = match state.selected_player() {
        Some(p) => {
            let team = state
                .data
                .team_of_player(p.id)
                .map(|t| t.name.as_str())
                .unwrap_or("Unassigned");
            format!(
                "{}\n\"{}\"\n{} | {} year(s)\nTeam: {}\n\n{}",
                p.name, p.nickname, p.position, p.years_played, team, p.bio
            )
        }
        None => String::new(),
    };
    let detail = Paragraph::new(detail)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Player"));
    frame.render_widget(detail, columns[1]);
}

fn render_teams(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let teams = &state.data.teams;
    let block = Block::default().borders(Borders::ALL).title("Teams");
    let inner = block.inner(columns[0]);
    frame.render_widget(block, columns[0]);
    if teams.is_empty() {
        render_empty(frame, inner, "No teams yet");
    } else {
        let (start, end) = visible_range(state.selected, teams.len(), inner.height as usize);
        let lines: Vec<Line> = (start..end)
            .map(|idx| {
                let t = &teams[idx];
                let captain = state.data.player_name(t.captain_id).unwrap_or("TBD");
                let text = format!(
                    "{:<20} C: {:<12} {} players  {}",
                    t.name,
                    captain,
                    t.players.len(),
                    t.record
                );
                Line::styled(text, row_style(idx == state.selected))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    let mut lines = Vec::new();
    if let Some(team) = state.selected_team() {
        for (idx, pid) in team.players.iter().enumerate() {
            let name = state.data.player_name(*pid).unwrap_or("(unknown)");
            let marker = if *pid == team.captain_id { " (C)" } else { "" };
            let style = row_style(state.admin_mode && idx == state.member_selected);
            lines.push(Line::styled(format!("{name}{marker}"), style));
        }
    }
    let roster = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Team Roster"));
    frame.render_widget(roster, columns[1]);
}

fn render_history(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let tabs: Vec<Span> = HistoryKind::ALL
        .iter()
        .map(|kind| {
            let label = match kind {
                HistoryKind::Championships => " Championships ",
                HistoryKind::Awards => " Hall of Fame ",
                HistoryKind::Records => " Records ",
            };
            let style = if *kind == state.history_section {
                Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(label, style)
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(tabs)), sections[0]);

    let history = &state.data.history;
    let rows: Vec<String> = match state.history_section {
        HistoryKind::Championships => history
            .championships
            .iter()
            .map(|c| match &c.score {
                Some(score) => format!("{}  {} Champions  ({score})", c.year, c.team_name),
                None => format!("{}  {} Champions", c.year, c.team_name),
            })
            .collect(),
        HistoryKind::Awards => history
            .awards
            .iter()
            .map(|a| {
                let team = a.team_name.as_deref().unwrap_or("-");
                format!("{}  {:<30} {:<14} {team}", a.year, a.award_name, a.player_name)
            })
            .collect(),
        HistoryKind::Records => history
            .records
            .iter()
            .map(|r| format!("{}  {}: {}  ({})", r.year, r.record_name, r.record_value, r.player_name))
            .collect(),
    };

    let block = Block::default().borders(Borders::ALL).title("History");
    let inner = block.inner(sections[1]);
    frame.render_widget(block, sections[1]);
    if rows.is_empty() {
        render_empty(frame, inner, "Nothing recorded yet");
        return;
    }
    let (start, end) = visible_range(state.selected, rows.len(), inner.height as usize);
    let lines: Vec<Line> = (start..end)
        .map(|idx| Line::styled(rows[idx].clone(), row_style(idx == state.selected)))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_modal(frame: &mut Frame, area: Rect, modal: &Modal, state: &AppState) {
    match modal {
        Modal::Form(form) => render_form(frame, area, form),
        Modal::Prompt(prompt) => {
            let popup = centered_rect(50, 20, area);
            frame.render_widget(Clear, popup);
            let shown = if prompt.masked() {
                "*".repeat(prompt.input.chars().count())
            } else {
                prompt.input.clone()
            };
            let body = Paragraph::new(format!("{shown}_\n\nEnter confirm | Esc cancel"))
                .block(Block::default().borders(Borders::ALL).title(prompt.title()));
            frame.render_widget(body, popup);
        }
        Modal::Confirm(action) => {
            let popup = centered_rect(50, 20, area);
            frame.render_widget(Clear, popup);
            let body = Paragraph::new(format!("{}\n\ny Yes | n No", action.question(&state.data)))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Confirm"));
            frame.render_widget(body, popup);
        }
        Modal::TeamEditor(editor) => render_team_editor(frame, area, editor, state),
    }
}

fn render_form(frame: &mut Frame, area: Rect, form: &FormState) {
    let popup = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup);
    let mut lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let focused = idx == form.focus;
            let value = if field.is_choice() {
                format!("< {} >", field.display())
            } else if focused {
                format!("{}_", field.display())
            } else {
                field.display().to_string()
            };
            let marker = if focused { "›" } else { " " };
            Line::styled(
                format!("{marker} {:<14} {value}", format!("{}:", field.label)),
                row_style(focused),
            )
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from("Tab/↑/↓ Field | ←/→ Choice | Enter Save | Esc Cancel"));
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(form.title.clone()));
    frame.render_widget(body, popup);
}

fn render_team_editor(frame: &mut Frame, area: Rect, editor: &TeamEditor, state: &AppState) {
    let popup = centered_rect(80, 70, area);
    frame.render_widget(Clear, popup);
    let title = match editor.mode {
        EditorMode::Create => "Add New Team",
        EditorMode::Edit(_) => "Edit Team Roster",
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(inner);

    let name = if editor.editing_name {
        format!("{}_", editor.name)
    } else {
        editor.name.clone()
    };
    let captain = editor
        .captain()
        .and_then(|id| state.data.player_name(id))
        .unwrap_or("Select Captain");
    frame.render_widget(
        Paragraph::new(format!("Team: {name}\nCaptain: {captain}")),
        rows[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    render_chip_column(frame, columns[0], editor, Side::Available, "Available");
    render_chip_column(frame, columns[1], editor, Side::Selected, "Team Roster");

    let help = if editor.editing_name {
        "Type name | Enter/Tab done | Esc cancel"
    } else {
        "Tab Column | j/k Move | Space Mark | Enter Move one | >/< Move marked | c Captain | n Name | s Save | Esc Cancel"
    };
    frame.render_widget(
        Paragraph::new(help)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Gray)),
        rows[2],
    );
}

fn render_chip_column(frame: &mut Frame, area: Rect, editor: &TeamEditor, side: Side, title: &str) {
    let focused = editor.focus() == side && !editor.editing_name;
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!("{title} ({})", editor.selector().len(side)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let selector = editor.selector();
    let total = selector.len(side);
    let cursor = if focused { editor.cursor() } else { 0 };
    let (start, end) = visible_range(cursor, total, inner.height as usize);
    let lines: Vec<Line> = selector
        .chips(side)
        .enumerate()
        .skip(start)
        .take(end - start)
        .map(|(idx, chip)| {
            let mark = if chip.marked { "[x]" } else { "[ ]" };
            let captain = if chip.pinned { " ★" } else { "" };
            let mut style = if chip.selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            if focused && idx == cursor {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            Line::styled(
                format!("{mark} {:<18} {}{captain}", chip.item.name, chip.item.category),
                style,
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn row_style(selected: bool) -> Style {
    if selected {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default()
    }
}

fn render_empty(frame: &mut Frame, area: Rect, text: &str) {
    let empty = Paragraph::new(text.to_string()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(empty, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Turkey Bowl Terminal - Help",
        "",
        "Global:",
        "  1-4          Home / Roster / Teams / History",
        "  j/k or ↑/↓   Move",
        "  Tab          Next history section",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Admin (type the keyword, then the password):",
        "  a / e / D    Add / edit / delete on the current screen",
        "  r            Edit roster of the selected team",
        "  [ ] -        Pick and remove a team member",
        "  c            Toggle a player's current-year flag",
        "  E / I / R    Export / import / reset data",
        "  Esc          Leave admin mode",
        "",
        "Roster editor:",
        "  Space marks, Enter moves one, > and < move marked,",
        "  c cycles the captain, s saves.",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
