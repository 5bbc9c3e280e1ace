use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use userdeck_core::Resource;

use super::theme::Theme;
use super::util::centered_rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "fail",
        }
    }
}

pub struct LogEntry {
    pub at: DateTime<Local>,
    pub level: LogLevel,
    /// 与哪个接口资源相关；界面操作为 `None`
    pub resource: Option<Resource>,
    pub text: String,
}

const RETAINED: usize = 200;

/// 操作记录面板的数据。只有 warn / fail 计入未读，
/// 便于在标题栏提示加载失败之类的问题。
pub struct LogStore {
    pub entries: VecDeque<LogEntry>,
    pub unread_count: usize,
    pub scroll: usize,
    pub problems_only: bool,
    sink: Option<File>,
}

impl LogStore {
    pub fn new(path: Option<&Path>) -> Self {
        let sink = path.and_then(|p| OpenOptions::new().create(true).append(true).open(p).ok());
        Self {
            entries: VecDeque::with_capacity(RETAINED),
            unread_count: 0,
            scroll: 0,
            problems_only: false,
            sink,
        }
    }

    pub fn record(&mut self, level: LogLevel, resource: Option<Resource>, text: impl Into<String>) {
        let entry = LogEntry {
            at: Local::now(),
            level,
            resource,
            text: text.into(),
        };
        if let Some(sink) = self.sink.as_mut() {
            let scope = entry.resource.map_or("ui", |r| r.name());
            let _ = writeln!(
                sink,
                "{} {:<4} {scope}: {}",
                entry.at.to_rfc3339(),
                level.tag(),
                entry.text
            );
        }
        if self.entries.len() == RETAINED {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        if level > LogLevel::Info {
            self.unread_count += 1;
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.record(LogLevel::Info, None, text);
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.record(LogLevel::Warn, None, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.record(LogLevel::Error, None, text);
    }

    pub fn mark_read(&mut self) {
        self.unread_count = 0;
    }

    pub fn toggle_problems_only(&mut self) {
        self.problems_only = !self.problems_only;
        self.scroll = 0;
    }

    pub fn visible(&self) -> impl Iterator<Item = &LogEntry> {
        let floor = if self.problems_only { LogLevel::Warn } else { LogLevel::Info };
        self.entries.iter().filter(move |e| e.level >= floor)
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let last = self.visible().count().saturating_sub(1);
        self.scroll = (self.scroll + 1).min(last);
    }
}

pub fn render(frame: &mut Frame, area: Rect, store: &LogStore) {
    let panel = centered_rect(area, 76, 20);
    frame.render_widget(Clear, panel);

    // 边框两行 + 底部提示两行
    let rows = panel.height.saturating_sub(4) as usize;
    let shown: Vec<&LogEntry> = store.visible().collect();

    let mut lines: Vec<Line> = if shown.is_empty() {
        vec![Line::from(Span::styled(format!("  {}", t!("logs.empty")), Theme::secondary()))]
    } else {
        let start = store.scroll.min(shown.len().saturating_sub(rows));
        shown[start..]
            .iter()
            .take(rows)
            .map(|entry| {
                let mut spans = vec![
                    Span::styled(entry.at.format(" %H:%M:%S ").to_string(), Theme::secondary()),
                    Span::styled(format!("{:<5}", entry.level.tag()), Theme::level(entry.level)),
                ];
                if let Some(resource) = entry.resource {
                    spans.push(Span::styled(format!("{resource} "), Theme::active()));
                }
                spans.push(Span::raw(entry.text.clone()));
                Line::from(spans)
            })
            .collect()
    };

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(format!("  {}", t!("logs.hint")), Theme::secondary())));

    let title = if store.problems_only {
        format!(" {} · {} ", t!("logs.title"), t!("logs.problems"))
    } else {
        format!(" {} ", t!("logs.title"))
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(Span::styled(title, Theme::title()));

    frame.render_widget(Paragraph::new(lines).block(block), panel);
}
