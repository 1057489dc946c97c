use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, ConnectionStatus, Notification, NotificationLevel};
use super::layout::{centered_rect, AppLayout};
use super::services::Services;
use super::theme;
use super::views::alert::Alert;
use super::views::chat::{ChatInput, ChatView};
use super::views::debug::DebugView;
use super::views::model_picker::{ModelPicker, PickerResult};
use super::views::path_prompt::{PathPrompt, PromptResult};
use crate::core::document::Document;
use crate::core::llm::{LlmError, ModelProbe};
use crate::core::session_log::{Sender, SessionLog};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const OLLAMA_HELP: &str = "Ollama is not running. Please install and start Ollama to use \
this app.\n\nVisit: https://ollama.ai";

/// The one modal that currently owns input, if any.
enum Modal {
    PathPrompt(PathPrompt),
    ModelPicker(ModelPicker),
    Debug(DebugView),
    Alert(Alert),
    Help,
}

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Last successfully loaded document; replaced wholesale on each load.
    document: Option<Arc<Document>>,
    /// `char_count()` of `document`, computed once per load.
    document_chars: usize,
    /// Path of the last load attempt, pre-filled in the Open prompt.
    last_path: Option<String>,
    /// File name of the load in progress.
    loading_name: Option<String>,
    selected_model: Option<String>,
    models: Vec<String>,
    connection: ConnectionStatus,
    log: SessionLog,
    extracting: bool,
    answering: bool,
    probing: bool,
    /// Status bar text.
    status: String,
    chat: ChatView,
    modal: Option<Modal>,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    tick_count: usize,
    /// Receiver for background results.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    services: Services,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        services: Services,
        default_model: &str,
    ) -> Self {
        let selected_model = Some(default_model.trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        Self {
            running: true,
            document: None,
            document_chars: 0,
            last_path: None,
            loading_name: None,
            selected_model,
            models: Vec::new(),
            connection: ConnectionStatus::Checking,
            log: SessionLog::new(),
            extracting: false,
            answering: false,
            probing: false,
            status: "Ready".to_string(),
            chat: ChatView::new(),
            modal: None,
            notifications: Vec::new(),
            notification_counter: 0,
            tick_count: 0,
            event_rx,
            services,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    ///
    /// Probes the model registry on entry and loads `initial_pdf` if given.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
        initial_pdf: Option<PathBuf>,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        self.handle_action(Action::RefreshModels);
        if let Some(path) = initial_pdf {
            self.handle_action(Action::LoadPdf(path));
        }

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        self.services.shutdown();
        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => self.handle_input(&crossterm_event),
            AppEvent::DocumentLoaded(document) => self.on_document_loaded(document),
            AppEvent::DocumentFailed(error) => {
                self.extracting = false;
                self.loading_name = None;
                self.status = "Error occurred".to_string();
                self.show_alert(Alert::error("Error", format!("Error reading PDF: {error}")));
            }
            AppEvent::ModelsProbed(probe) => self.apply_probe(probe),
            AppEvent::AnswerReady(answer) => {
                self.answering = false;
                self.status = "Ready".to_string();
                self.log.append(Sender::Assistant, answer);
            }
            AppEvent::AnswerFailed(error) => self.on_answer_failed(&error),
        }
    }

    fn handle_input(&mut self, event: &Event) {
        // Priority 1: the open modal consumes all input
        if let Some(modal) = self.modal.as_mut() {
            let action = match modal {
                Modal::PathPrompt(prompt) => match prompt.handle_input(event) {
                    PromptResult::Consumed => None,
                    PromptResult::Submit(path) => Some(Action::LoadPdf(path)),
                    PromptResult::Cancel => Some(Action::CloseModal),
                },
                Modal::ModelPicker(picker) => match picker.handle_input(event) {
                    PickerResult::Consumed => None,
                    PickerResult::Select(name) => Some(Action::SelectModel(name)),
                    PickerResult::Refresh => Some(Action::RefreshModels),
                    PickerResult::Close => Some(Action::CloseModal),
                },
                Modal::Debug(view) => (!view.handle_input(event)).then_some(Action::CloseModal),
                Modal::Alert(alert) => (!alert.handle_input(event)).then_some(Action::CloseModal),
                Modal::Help => map_help_input(event),
            };
            if let Some(action) = action {
                if action != Action::CloseModal {
                    self.modal = None;
                }
                self.handle_action(action);
            }
            return;
        }

        // Priority 2: chat view (insert mode, scrolling)
        match self.chat.handle_input(event, !self.answering) {
            ChatInput::Consumed => return,
            ChatInput::Submit(question) => {
                self.handle_action(Action::AskQuestion(question));
                return;
            }
            ChatInput::Ignored => {}
        }

        // Priority 3: global keybindings
        if let Some(action) = map_input_to_action(event) {
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::OpenPathPrompt => {
                if self.extracting {
                    self.push_notification(
                        "A PDF is already being loaded".to_string(),
                        NotificationLevel::Warning,
                    );
                } else {
                    self.modal = Some(Modal::PathPrompt(PathPrompt::new(
                        self.last_path.as_deref(),
                    )));
                }
            }
            Action::LoadPdf(path) => self.start_load(path),
            Action::ShowDebug => {
                self.modal = Some(Modal::Debug(DebugView::new(self.document.as_deref())));
            }
            Action::RefreshModels => {
                if self.probing {
                    return;
                }
                self.probing = true;
                self.connection = ConnectionStatus::Checking;
                self.services.start_probe();
            }
            Action::OpenModelPicker => {
                self.modal = Some(Modal::ModelPicker(ModelPicker::new(
                    self.models.clone(),
                    self.selected_model.as_deref(),
                )));
            }
            Action::SelectModel(name) => {
                log::info!("Model selected: {name}");
                self.push_notification(format!("Model: {name}"), NotificationLevel::Info);
                self.selected_model = Some(name);
            }
            Action::AskQuestion(question) => self.ask(question),
            Action::ShowHelp => self.modal = Some(Modal::Help),
            Action::CloseModal => self.modal = None,
        }
    }

    // ── Operations ──────────────────────────────────────────────────────

    fn start_load(&mut self, path: PathBuf) {
        if self.extracting {
            log::debug!("Ignoring load of {}: extraction in flight", path.display());
            return;
        }

        self.extracting = true;
        self.last_path = Some(path.display().to_string());
        self.loading_name = Some(
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        );
        self.status = "Extracting text from PDF...".to_string();
        log::info!("Loading PDF {}", path.display());
        self.services.start_extraction(path);
    }

    fn on_document_loaded(&mut self, document: Arc<Document>) {
        self.extracting = false;
        self.loading_name = None;
        self.status = "PDF loaded successfully. Ready for questions.".to_string();
        self.log.append(
            Sender::System,
            format!(
                "PDF '{}' loaded successfully! You can now ask questions about its content.",
                document.filename
            ),
        );
        if document.missing_pages() > 0 {
            self.push_notification(
                format!(
                    "{} of {} pages had no extractable text",
                    document.missing_pages(),
                    document.page_count()
                ),
                NotificationLevel::Warning,
            );
        }
        self.chat.scroll_to_bottom();
        self.document_chars = document.char_count();
        self.document = Some(document);
    }

    /// The loaded document, if it has any pages. A zero-page PDF has no
    /// text to ask about or inspect.
    fn usable_document(&self) -> Option<&Arc<Document>> {
        self.document.as_ref().filter(|doc| doc.page_count() > 0)
    }

    /// Replace the model list. The current selection survives when it is
    /// still listed; otherwise the first listed model is taken.
    fn apply_probe(&mut self, probe: ModelProbe) {
        self.probing = false;
        match probe {
            ModelProbe::Reachable(models) => {
                self.connection = ConnectionStatus::Connected;
                let keep = self
                    .selected_model
                    .as_ref()
                    .is_some_and(|m| models.contains(m));
                if !keep {
                    if let Some(first) = models.first() {
                        self.selected_model = Some(first.clone());
                    }
                }
                self.models = models;
            }
            ModelProbe::Unreachable(reason) => {
                log::warn!("Model probe failed: {reason}");
                self.connection = ConnectionStatus::NotFound;
                self.models.clear();
                self.show_alert(Alert::warning("Ollama Not Found", OLLAMA_HELP));
            }
        }
    }

    fn ask(&mut self, question: String) {
        let question = question.trim().to_string();
        if question.is_empty() || self.answering {
            return;
        }

        let Some(document) = self.usable_document().cloned() else {
            self.show_alert(Alert::warning("No PDF", "Please upload a PDF file first."));
            return;
        };

        let Some(model) = self.selected_model.clone().filter(|m| !m.is_empty()) else {
            self.show_alert(Alert::warning("No Model", "Please select an LLM model."));
            return;
        };

        self.log.append(Sender::User, question.clone());
        self.chat.scroll_to_bottom();
        self.answering = true;
        self.status = "Generating response...".to_string();
        self.services.start_answer(model, document, question);
    }

    fn on_answer_failed(&mut self, error: &LlmError) {
        self.answering = false;
        self.status = "Error occurred".to_string();
        self.show_alert(Alert::error("Error", error.user_message()));
    }

    fn show_alert(&mut self, alert: Alert) {
        // A newer alert replaces the older one; other modals stay put.
        match self.modal {
            None | Some(Modal::Alert(_)) => self.modal = Some(Modal::Alert(alert)),
            Some(_) => self.push_notification(alert.message, alert.level),
        }
    }

    fn is_busy(&self) -> bool {
        self.extracting || self.answering
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            ..Notification::new(message, level)
        });

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: advance the spinner and expire notifications.
    fn on_tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::compute(area);

        if let Some(header) = layout.header {
            self.render_header(frame, header);
        }
        self.chat.render_transcript(frame, layout.chat, &self.log);
        self.chat.render_input(frame, layout.input, !self.answering);
        self.render_status_bar(frame, layout.status);

        self.render_notifications(frame, area);

        match &self.modal {
            Some(Modal::PathPrompt(prompt)) => prompt.render(frame, area),
            Some(Modal::ModelPicker(picker)) => picker.render(frame, area),
            Some(Modal::Debug(view)) => view.render(frame, area),
            Some(Modal::Alert(alert)) => alert.render(frame, area),
            Some(Modal::Help) => render_help_modal(frame, area),
            None => {}
        }
    }

    fn document_label(&self) -> Span<'static> {
        if let Some(name) = &self.loading_name {
            return Span::styled(format!("Loading: {name}"), Style::default().fg(theme::WARNING));
        }
        match &self.document {
            Some(doc) => Span::styled(
                format!("Loaded: {} ({} chars)", doc.filename, self.document_chars),
                Style::default().fg(theme::SUCCESS),
            ),
            None => Span::styled("No PDF selected", theme::muted()),
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let connection_color = match self.connection {
            ConnectionStatus::Connected => theme::SUCCESS,
            ConnectionStatus::NotFound => theme::ERROR,
            ConnectionStatus::Checking => theme::TEXT_MUTED,
        };
        let connection_icon = match self.connection {
            ConnectionStatus::Connected => "✓ ",
            ConnectionStatus::NotFound => "✗ ",
            ConnectionStatus::Checking => "",
        };

        let line = Line::from(vec![
            Span::styled(" PDF: ", theme::muted()),
            self.document_label(),
            Span::raw("  │  "),
            Span::styled("Model: ", theme::muted()),
            Span::styled(
                self.selected_model.clone().unwrap_or_else(|| "none".into()),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  │  "),
            Span::styled(
                format!("{connection_icon}{}", self.connection.label()),
                Style::default().fg(connection_color),
            ),
        ]);

        frame.render_widget(
            Paragraph::new(line).block(theme::block_default("PDF Q&A Assistant")),
            area,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let spinner = if self.is_busy() {
            Span::styled(
                format!("{} ", SPINNER[self.tick_count % SPINNER.len()]),
                Style::default().fg(theme::ACCENT),
            )
        } else {
            Span::raw("")
        };

        let status = Line::from(vec![
            Span::styled(" PDF-QA ", theme::brand_badge()),
            Span::raw(" "),
            spinner,
            Span::styled(self.status.clone(), Style::default().fg(theme::TEXT)),
            Span::raw(" │ "),
            Span::styled("o", theme::key_hint()),
            Span::raw(":open "),
            Span::styled("i", theme::key_hint()),
            Span::raw(":ask "),
            Span::styled("m", theme::key_hint()),
            Span::raw(":model "),
            Span::styled("r", theme::key_hint()),
            Span::raw(":refresh "),
            Span::styled("d", theme::key_hint()),
            Span::raw(":debug "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let notification_area = Rect::new(x, 1, max_width, height.min(area.height));

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }
}

// ── Input mapping ───────────────────────────────────────────────────────

fn map_help_input(event: &Event) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };
    match code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Action::CloseModal),
        _ => None,
    }
}

fn map_input_to_action(event: &Event) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };

    match (*modifiers, *code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') => Some(Action::ShowHelp),
            KeyCode::Char('o') => Some(Action::OpenPathPrompt),
            KeyCode::Char('r') => Some(Action::RefreshModels),
            KeyCode::Char('m') => Some(Action::OpenModelPicker),
            KeyCode::Char('d') => Some(Action::ShowDebug),
            _ => None,
        },
        _ => None,
    }
}

fn render_help_modal(frame: &mut Frame, area: Rect) {
    let modal = centered_rect(60, 70, area);

    let keybindings = [
        ("Global:", ""),
        ("o", "Open a PDF"),
        ("r", "Refresh Ollama models"),
        ("m", "Select model"),
        ("d", "Debug extracted text"),
        ("?", "Toggle this help"),
        ("q / Ctrl+C", "Quit"),
        ("", ""),
        ("Chat:", ""),
        ("i / Enter", "Type a question"),
        ("Enter", "Ask (while typing)"),
        ("Esc", "Stop typing"),
        ("j/k", "Scroll transcript"),
        ("G / g", "Jump to bottom / top"),
    ];

    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(" Keybindings", theme::title())),
        Line::raw(""),
    ];

    for (key, desc) in &keybindings {
        if key.is_empty() {
            lines.push(Line::raw(""));
        } else if desc.is_empty() {
            lines.push(Line::from(Span::styled(format!("  {key}"), theme::title())));
        } else {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{:<14}", key), theme::key_hint()),
                Span::raw(*desc),
            ]));
        }
    }

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT));

    frame.render_widget(Clear, modal);
    frame.render_widget(Paragraph::new(lines).block(block), modal);
}
