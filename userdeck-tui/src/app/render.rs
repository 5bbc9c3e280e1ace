use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;
use userdeck_core::{Resource, View};

use crate::ui::status_bar::{self, StatusInfo};
use crate::ui::theme::Theme;
use crate::ui::{card_view, detail_view, dialog, help, log_view, search_form, table_view};

use super::{App, InputMode};

impl App {
    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        status_bar::render_filters(frame, chunks[1], &self.board.filter_badges());
        self.render_main(frame, chunks[2]);
        self.render_status(frame, chunks[3]);

        if let Some(detail) = &self.detail {
            detail_view::render(frame, frame.area(), detail);
        }

        if self.input_mode == InputMode::Search {
            search_form::render(frame, frame.area(), &self.search);
        }

        if let Some(pending) = &self.confirm_delete {
            dialog::render_confirm_delete(frame, frame.area(), &pending.name);
        }

        if self.show_logs {
            log_view::render(frame, frame.area(), &self.logs);
        }

        if self.show_help {
            help::render(frame, frame.area());
        }

        if let Some(message) = &self.alert {
            dialog::render_alert(frame, frame.area(), message);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = Span::styled("  USERDECK", Theme::title());

        let mut right_spans: Vec<Span> = Vec::new();
        if self.logs.unread_count > 0 {
            right_spans.push(Span::styled(
                format!(" ! {} ", self.logs.unread_count),
                Theme::unread(),
            ));
        }
        right_spans.push(Span::styled(
            format!(" {} ", status_bar::layout_label(self.board.layout())),
            Theme::header_accent(),
        ));
        right_spans.push(Span::styled(
            chrono::Local::now().format(" %H:%M ").to_string(),
            Theme::header_block(),
        ));

        let right_width: u16 = right_spans.iter().map(|s| s.content.width() as u16).sum();

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(right_width)])
            .split(area);

        frame.render_widget(Paragraph::new(Line::from(title)), cols[0]);
        frame.render_widget(
            Paragraph::new(Line::from(right_spans)).alignment(Alignment::Right),
            cols[1],
        );
    }

    fn render_main(&mut self, frame: &mut Frame, area: Rect) {
        match self.board.view() {
            View::Table(rows) => table_view::render(frame, area, rows, &mut self.table_state),
            View::Cards(cards) => card_view::render(frame, area, cards, self.selected),
            View::Empty => {
                let text = if self.loading.contains(&Resource::Users) {
                    t!("status.loading")
                } else if self.board.has_pending() {
                    t!("status.rendering")
                } else {
                    t!("app.empty")
                };
                let placeholder = Paragraph::new(Line::from(Span::styled(text, Theme::secondary())))
                    .alignment(Alignment::Center);
                let y = area.y + area.height / 2;
                frame.render_widget(placeholder, Rect::new(area.x, y, area.width, 1));
            }
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let mut loading: Vec<&str> = self.loading.iter().map(|r| r.name()).collect();
        loading.sort_unstable();
        let shown = self.board.view().len();
        let info = StatusInfo {
            shown,
            selected: (shown > 0).then_some(self.selected),
            layout: self.board.layout(),
            width_px: self.board.width(),
            loading,
            busy: self.board.is_busy() || self.resize_debounce.is_pending(),
            tick: self.tick,
        };
        status_bar::render(frame, area, &info);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::App;
    use crate::config::settings::Settings;
    use crate::ui::log_view::LogStore;
    use userdeck_core::{Repository, User};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[tokio::test]
    async fn draws_table_and_empty_state() {
        let repo = Repository::memory();
        let mut zoe = User::new("z");
        zoe.username = Some("zoe".into());
        repo.set(&[zoe]).unwrap();
        let mut app = App::with_parts(Settings::default(), repo, 1024, LogStore::new(None)).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        assert!(buffer_text(&terminal).contains("No users to show"));

        app.board.show_all(app.fetcher.repo()).unwrap();
        app.clamp_selection();
        terminal.draw(|f| app.render(f)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("USERDECK"));
        assert!(text.contains("zoe"));
    }
}
