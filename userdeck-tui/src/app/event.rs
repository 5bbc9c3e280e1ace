use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{App, AppMessage, InputMode};

impl App {
    pub(crate) fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Resize(columns, _) => {
                let width = super::actions::viewport_width(
                    columns,
                    self.settings.display.cell_width_px,
                );
                self.resize_debounce
                    .trigger(&self.msg_tx, AppMessage::ResizeSettled(width));
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // 错误提示是阻塞的，只能关闭
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
            }
            return;
        }

        if self.confirm_delete.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm_pending_delete(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.confirm_delete = None;
                }
                _ => {}
            }
            return;
        }

        // 帮助浮层打开时，只响应关闭操作
        if self.show_help {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        // 日志浮层打开时，只响应滚动和关闭
        if self.show_logs {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('!') | KeyCode::Esc => {
                    self.show_logs = false;
                }
                KeyCode::Char('j') | KeyCode::Down => self.logs.scroll_down(),
                KeyCode::Char('k') | KeyCode::Up => self.logs.scroll_up(),
                KeyCode::Char('e') => self.logs.toggle_problems_only(),
                _ => {}
            }
            return;
        }

        if self.detail.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('v') => {
                    self.detail = None;
                }
                KeyCode::Char('m') => self.mail_selected(),
                _ => {}
            }
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Search => self.handle_search_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                self.running = false;
            }
            (_, KeyCode::Char('?')) => {
                self.show_help = true;
            }
            (_, KeyCode::Char('!')) => {
                self.show_logs = true;
                self.logs.mark_read();
            }

            (_, KeyCode::Char('j') | KeyCode::Down) => self.select_next(),
            (_, KeyCode::Char('k') | KeyCode::Up) => self.select_prev(),
            (_, KeyCode::Char('g') | KeyCode::Home) => self.select_first(),
            (_, KeyCode::Char('G') | KeyCode::End) => self.select_last(),

            (_, KeyCode::Enter | KeyCode::Char('v')) => self.open_detail(),
            (_, KeyCode::Char('d') | KeyCode::Delete) => self.request_delete(),
            (_, KeyCode::Char('m')) => self.mail_selected(),
            (_, KeyCode::Char('r')) => self.refresh(),

            (_, KeyCode::Char('/')) => {
                self.input_mode = InputMode::Search;
            }
            (_, KeyCode::Char('x')) => self.cancel_search(),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.apply_search(),
            KeyCode::Tab | KeyCode::Down => self.search.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.search.focus_prev(),
            KeyCode::Left => self.search.cursor_left(),
            KeyCode::Right => self.search.cursor_right(),
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Char(c) => self.search.insert_char(c),
            _ => {}
        }
    }

    pub(crate) fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::TermEvent(ev) => self.handle_event(ev),
            AppMessage::Tick => {
                self.tick = self.tick.wrapping_add(1);
            }
            AppMessage::ResizeSettled(width) => self.apply_resize(width),
            AppMessage::DeferredRender => self.finish_deferred(),
            AppMessage::Loaded { resource, result } => self.on_loaded(resource, result),
        }
    }
}
