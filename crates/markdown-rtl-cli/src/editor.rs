use anyhow::Result;
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        ModifierKeyCode, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use markdown_rtl_config::Config;
use markdown_rtl_engine::{
    Direction, DirectionOracle, Host, InputDisposition, Key, KeyEvent, KeyLocation, LRM,
    MarkdownBuffer, NativeRtl, NormalizeOutcome, Position, RLM, Selection, TextBuffer, io,
    input::Modifiers,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

/// Width of the direction arrow drawn before every line.
const GUTTER: u16 = 2;

struct Notice {
    message: String,
    until: Instant,
}

#[derive(Debug, Clone, Copy)]
enum Motion {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// The editor as seen by the direction engine.
struct EditorHost {
    document: MarkdownBuffer,
    notice: Option<Notice>,
    auto_pair: bool,
}

impl Host for EditorHost {
    type Doc = MarkdownBuffer;

    fn active_document(&mut self) -> Option<&mut MarkdownBuffer> {
        Some(&mut self.document)
    }

    fn show_transient_notice(&mut self, message: &str, duration: Duration) {
        self.notice = Some(Notice {
            message: message.to_string(),
            until: Instant::now() + duration,
        });
    }

    fn auto_pair_enabled(&self) -> bool {
        self.auto_pair
    }
}

impl EditorHost {
    fn selection(&self) -> Selection {
        self.document
            .selections()
            .first()
            .copied()
            .unwrap_or_default()
    }

    /// Replace the selection with `text` and put the caret after it.
    fn insert(&mut self, text: &str) {
        let (from, to) = self.selection().ordered();
        let from_offset = self.document.position_to_offset(from);
        self.document.replace_range(text, from, Some(to));
        let caret = self.document.offset_to_position(from_offset + text.len());
        self.document.set_selection(caret, caret);
    }

    /// What typing `c` does when the direction engine leaves it alone.
    fn default_insert(&mut self, c: char) {
        let closing = match c {
            '(' => Some(')'),
            '[' => Some(']'),
            '{' => Some('}'),
            _ => None,
        };
        match closing {
            Some(closing) if self.auto_pair && self.selection().is_empty() => {
                self.insert(&format!("{c}{closing}"));
                let caret = self.moved(self.document.cursor(), Motion::Left);
                self.document.set_selection(caret, caret);
            }
            _ => self.insert(c.encode_utf8(&mut [0; 4])),
        }
    }

    fn backspace(&mut self) {
        let selection = self.selection();
        if !selection.is_empty() {
            self.insert("");
            return;
        }
        let from = self.moved(selection.head, Motion::Left);
        if from != selection.head {
            self.document.replace_range("", from, Some(selection.head));
            self.document.set_selection(from, from);
        }
    }

    fn delete_forward(&mut self) {
        let selection = self.selection();
        if !selection.is_empty() {
            self.insert("");
            return;
        }
        let to = self.moved(selection.head, Motion::Right);
        if to != selection.head {
            self.document.replace_range("", selection.head, Some(to));
        }
    }

    fn move_caret(&mut self, motion: Motion, extend: bool) {
        let selection = self.selection();
        let head = self.moved(selection.head, motion);
        let anchor = if extend { selection.anchor } else { head };
        self.document.set_selection(anchor, head);
    }

    fn moved(&self, from: Position, motion: Motion) -> Position {
        let doc = &self.document;
        let line = doc.line(from.line);
        match motion {
            Motion::Left => match line.get(..from.column).and_then(|s| s.chars().next_back()) {
                Some(c) => Position::new(from.line, from.column - c.len_utf8()),
                None if from.line > 0 => {
                    Position::new(from.line - 1, doc.line(from.line - 1).len())
                }
                None => from,
            },
            Motion::Right => match line.get(from.column..).and_then(|s| s.chars().next()) {
                Some(c) => Position::new(from.line, from.column + c.len_utf8()),
                None if from.line + 1 < doc.line_count() => Position::line_start(from.line + 1),
                None => from,
            },
            Motion::Up if from.line > 0 => clamp_column(doc, from.line - 1, from.column),
            Motion::Down if from.line + 1 < doc.line_count() => {
                clamp_column(doc, from.line + 1, from.column)
            }
            Motion::Up | Motion::Down => from,
            Motion::Home => Position::line_start(from.line),
            Motion::End => Position::new(from.line, line.len()),
        }
    }

    fn active_notice(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|notice| Instant::now() < notice.until)
            .map(|notice| notice.message.as_str())
    }
}

fn clamp_column(doc: &MarkdownBuffer, line: usize, column: usize) -> Position {
    let text = doc.line(line);
    let mut column = column.min(text.len());
    while !text.is_char_boundary(column) {
        column -= 1;
    }
    Position::new(line, column)
}

/// Translate a terminal key event into the engine's key model.
fn to_engine_event(key: &event::KeyEvent) -> KeyEvent {
    let (engine_key, location) = match key.code {
        KeyCode::Modifier(ModifierKeyCode::LeftShift) => (Key::Shift, KeyLocation::Left),
        KeyCode::Modifier(ModifierKeyCode::RightShift) => (Key::Shift, KeyLocation::Right),
        KeyCode::Modifier(ModifierKeyCode::LeftControl) => (Key::Control, KeyLocation::Left),
        KeyCode::Modifier(ModifierKeyCode::RightControl) => (Key::Control, KeyLocation::Right),
        KeyCode::Modifier(ModifierKeyCode::LeftAlt) => (Key::Alt, KeyLocation::Left),
        KeyCode::Modifier(ModifierKeyCode::RightAlt) => (Key::Alt, KeyLocation::Right),
        KeyCode::Tab | KeyCode::BackTab => (Key::Tab, KeyLocation::Standard),
        KeyCode::Char(c) => (Key::Char(c), KeyLocation::Standard),
        _ => (Key::Other, KeyLocation::Standard),
    };
    KeyEvent {
        key: engine_key,
        location,
        modifiers: Modifiers {
            ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
            shift: key.modifiers.contains(KeyModifiers::SHIFT),
            alt: key.modifiers.contains(KeyModifiers::ALT),
        },
    }
}

/// Marks are zero-width; draw them as one visible cell each.
fn visible_spans(text: &str) -> Vec<Span<'static>> {
    let mark_style = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();
    let mut plain = String::new();
    for c in text.chars() {
        let symbol = match c {
            LRM => "»",
            RLM => "«",
            _ => {
                plain.push(c);
                continue;
            }
        };
        if !plain.is_empty() {
            spans.push(Span::raw(std::mem::take(&mut plain)));
        }
        spans.push(Span::styled(symbol, mark_style));
    }
    if !plain.is_empty() {
        spans.push(Span::raw(plain));
    }
    spans
}

struct Editor {
    path: PathBuf,
    host: EditorHost,
    plugin: NativeRtl,
    enhanced: bool,
    saved_version: u64,
    scroll: usize,
    status: String,
    /// Set after a quit attempt with unsaved changes; a second attempt quits.
    quit_pending: bool,
    quit: bool,
}

impl Editor {
    fn new(path: PathBuf, document: MarkdownBuffer, config: &Config, enhanced: bool) -> Self {
        let saved_version = document.version();
        Self {
            path,
            host: EditorHost {
                document,
                notice: None,
                auto_pair: config.auto_pair_brackets,
            },
            plugin: NativeRtl::new(config.direction.clone()),
            enhanced,
            saved_version,
            scroll: 0,
            status: String::new(),
            quit_pending: false,
            quit: false,
        }
    }

    fn is_dirty(&self) -> bool {
        self.host.document.version() != self.saved_version
    }

    fn handle_key(&mut self, key: event::KeyEvent) -> Result<()> {
        let engine_event = to_engine_event(&key);
        if key.kind == KeyEventKind::Release {
            if let Some(outcome) = self.plugin.on_key_up(&mut self.host, &engine_event) {
                self.report(&outcome);
            }
            return Ok(());
        }
        self.plugin.on_key_down(&engine_event);

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let quit_requested = match key.code {
            KeyCode::Esc => true,
            KeyCode::Char('q') => ctrl,
            _ => false,
        };
        if quit_requested {
            self.request_quit();
            return Ok(());
        }
        if !matches!(key.code, KeyCode::Modifier(_)) {
            self.quit_pending = false;
        }
        match key.code {
            KeyCode::Char('s') if ctrl => self.save()?,
            KeyCode::Left if alt => self.request(Direction::Ltr),
            KeyCode::Right if alt => self.request(Direction::Rtl),
            KeyCode::Left => self.host.move_caret(Motion::Left, shift),
            KeyCode::Right => self.host.move_caret(Motion::Right, shift),
            KeyCode::Up => self.host.move_caret(Motion::Up, shift),
            KeyCode::Down => self.host.move_caret(Motion::Down, shift),
            KeyCode::Home => self.host.move_caret(Motion::Home, shift),
            KeyCode::End => self.host.move_caret(Motion::End, shift),
            KeyCode::Enter => self.host.insert("\n"),
            KeyCode::Backspace => self.host.backspace(),
            KeyCode::Delete => self.host.delete_forward(),
            KeyCode::Char(c) if !ctrl && !alt => self.type_char(c),
            _ => {}
        }
        Ok(())
    }

    fn request_quit(&mut self) {
        if self.is_dirty() && !self.quit_pending {
            self.quit_pending = true;
            self.status = "unsaved changes: Esc again to discard, Ctrl+S to save".to_string();
        } else {
            self.quit = true;
        }
    }

    fn type_char(&mut self, c: char) {
        let text = c.to_string();
        if self.plugin.on_before_input(&mut self.host, &text) == InputDisposition::PassThrough {
            self.host.default_insert(c);
        }
    }

    fn request(&mut self, direction: Direction) {
        if let Some(outcome) = self.plugin.request_direction(&mut self.host, direction) {
            self.report(&outcome);
        }
    }

    fn report(&mut self, outcome: &NormalizeOutcome) {
        self.status = if outcome.changed() {
            format!(
                "{} mark(s) inserted, {} removed",
                outcome.marks_inserted, outcome.marks_removed
            )
        } else {
            "direction already correct".to_string()
        };
    }

    fn save(&mut self) -> Result<()> {
        io::write_document(&self.path, &self.host.document)?;
        self.saved_version = self.host.document.version();
        self.status = format!("saved {}", self.path.display());
        Ok(())
    }

    fn status_line(&self) -> Line<'static> {
        if let Some(message) = self.host.active_notice() {
            return Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Yellow),
            ));
        }
        let cursor = self.host.document.cursor();
        let chord_help = if self.enhanced {
            "L/R Ctrl+Shift: LTR/RTL"
        } else {
            "Alt+←/→: LTR/RTL"
        };
        Line::from(format!(
            "{}:{} | {chord_help} | Ctrl+S save | Esc quit | {}",
            cursor.line + 1,
            cursor.column + 1,
            self.status
        ))
    }

    fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(f.area());

        let title = format!(
            "{}{}",
            self.path.display(),
            if self.is_dirty() { " [+]" } else { "" }
        );
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(chunks[0]);
        let height = inner.height as usize;

        let cursor = self.host.document.cursor();
        if cursor.line < self.scroll {
            self.scroll = cursor.line;
        } else if height > 0 && cursor.line >= self.scroll + height {
            self.scroll = cursor.line + 1 - height;
        }

        let selection = self.host.selection();
        let (sel_start, sel_end) = selection.line_span();
        let doc = &self.host.document;
        let visible_end = doc.line_count().min(self.scroll + height);
        let lines: Vec<Line> = (self.scroll..visible_end)
            .map(|i| {
                let offset = doc.position_to_offset(Position::line_start(i));
                let (arrow, color) = match doc.direction_at(offset) {
                    Direction::Ltr => ("→ ", Color::Cyan),
                    Direction::Rtl => ("← ", Color::Magenta),
                };
                let mut spans = vec![Span::styled(arrow, Style::default().fg(color))];
                spans.extend(visible_spans(&doc.line(i)));
                let line = Line::from(spans);
                if !selection.is_empty() && (sel_start..=sel_end).contains(&i) {
                    line.style(Style::default().bg(Color::DarkGray))
                } else {
                    line
                }
            })
            .collect();

        f.render_widget(Paragraph::new(lines).block(block), chunks[0]);
        f.render_widget(Paragraph::new(self.status_line()), chunks[1]);

        let line_text = doc.line(cursor.line);
        let column = line_text
            .get(..cursor.column)
            .map_or(0, |before| before.chars().count());
        let x = inner.x + GUTTER + column as u16;
        let y = inner.y + (cursor.line - self.scroll) as u16;
        f.set_cursor_position((x, y));
    }
}

pub fn run(config: &Config, path: &Path) -> Result<()> {
    let document = if path.exists() {
        io::read_document(path)?
    } else {
        MarkdownBuffer::new("")
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // Key release events and left/right modifiers need the kitty keyboard protocol
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        )?;
    }
    log::info!("editing {} (keyboard enhancement: {enhanced})", path.display());

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut editor = Editor::new(path.to_path_buf(), document, config, enhanced);

    let res = run_editor(&mut terminal, &mut editor);

    // Restore terminal
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_editor(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    editor: &mut Editor,
) -> Result<()> {
    while !editor.quit {
        terminal.draw(|f| editor.draw(f))?;

        // Poll so expired notices disappear without a keypress
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                editor.handle_key(key)?;
            }
        }
    }
    Ok(())
}
