mod actions;
mod debounce;
mod event;
mod render;

const UI_TICK_MS: u64 = 120;

use std::collections::HashSet;
use std::io;

use anyhow::Result;
use crossterm::{
    event::Event,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, widgets::TableState};
use tokio::sync::mpsc;
use userdeck_core::view::UserDetail;
use userdeck_core::{
    Board, FileStore, Fetcher, HttpSource, Population, Renderer, Repository, Resource,
};

use crate::config::paths;
use crate::config::settings::Settings;
use crate::ui::log_view::LogStore;
use crate::ui::search_form::SearchForm;

use self::debounce::Debouncer;

/// 异步消息，从后台任务发送到主循环
pub enum AppMessage {
    /// 终端事件（由持久后台线程读取）
    TermEvent(Event),
    /// UI 动画 tick
    Tick,
    /// 防抖结束后的视口宽度（像素）
    ResizeSettled(u32),
    /// 过滤状态跨断点后，停顿结束
    DeferredRender,
    /// 单个资源加载完成
    Loaded {
        resource: Resource,
        result: userdeck_core::Result<Population>,
    },
}

/// 输入模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// 待确认的删除
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub name: String,
}

pub struct App {
    pub running: bool,
    pub settings: Settings,
    pub fetcher: Fetcher<HttpSource>,
    pub board: Board,
    /// 正在拉取的资源
    pub loading: HashSet<Resource>,
    pub selected: usize,
    pub table_state: TableState,
    pub detail: Option<UserDetail>,
    pub alert: Option<String>,
    pub confirm_delete: Option<PendingDelete>,
    pub search: SearchForm,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub show_logs: bool,
    pub logs: LogStore,
    pub tick: u16,
    pub msg_tx: mpsc::UnboundedSender<AppMessage>,
    msg_rx: mpsc::UnboundedReceiver<AppMessage>,
    pub(crate) resize_debounce: Debouncer,
    pub(crate) deferred_render: Debouncer,
}

impl App {
    pub fn new() -> Result<Self> {
        let settings = Settings::load()?;
        crate::ui::i18n::set_lang(settings.display.language);

        let repo = if settings.cache.persist {
            Repository::new(FileStore::new(paths::session_dir()?))
        } else {
            Repository::memory()
        };

        let (columns, _) = crossterm::terminal::size()?;
        let width = actions::viewport_width(columns, settings.display.cell_width_px);
        let logs = LogStore::new(paths::log_file().ok().as_deref());

        Self::with_parts(settings, repo, width, logs)
    }

    fn with_parts(settings: Settings, repo: Repository, width: u32, logs: LogStore) -> Result<Self> {
        let source = HttpSource::new(
            Some(settings.api.base_url.as_str()),
            settings.api.resource_paths(),
        )?;
        let fetcher = Fetcher::new(repo, source);
        let renderer = Renderer::new(
            settings.display.breakpoints(),
            &settings.display.date_format,
        );
        let board = Board::new(renderer, width);
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();

        tracing::info!(width, layout = ?board.layout(), "board ready");

        Ok(Self {
            running: true,
            resize_debounce: Debouncer::new(settings.display.resize_debounce()),
            deferred_render: Debouncer::new(settings.display.filtered_resize_pause()),
            settings,
            fetcher,
            board,
            loading: HashSet::new(),
            selected: 0,
            table_state: TableState::default(),
            detail: None,
            alert: None,
            confirm_delete: None,
            search: SearchForm::new(),
            input_mode: InputMode::Normal,
            show_help: false,
            show_logs: false,
            logs,
            tick: 0,
            msg_tx,
            msg_rx,
        })
    }

    pub fn repo(&self) -> &Repository {
        self.fetcher.repo()
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal).await;

        self.resize_debounce.cancel();
        self.deferred_render.cancel();

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        // 启动持久的事件读取线程，避免 select! + spawn_blocking 丢事件
        let event_tx = self.msg_tx.clone();
        std::thread::spawn(move || {
            while let Ok(ev) = crossterm::event::read() {
                if event_tx.send(AppMessage::TermEvent(ev)).is_err() {
                    break;
                }
            }
        });

        // UI 定时 tick（驱动加载指示动画）
        let tick_tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_millis(UI_TICK_MS));
            loop {
                interval.tick().await;
                if tick_tx.send(AppMessage::Tick).is_err() {
                    break;
                }
            }
        });

        self.load_all(false);

        while self.running {
            terminal.draw(|f| self.render(f))?;

            // 等待至少一条消息
            if let Some(msg) = self.msg_rx.recv().await {
                self.handle_message(msg);
            }
            // 批量处理所有已积压的消息，避免每条消息都触发一次 draw
            while let Ok(msg) = self.msg_rx.try_recv() {
                self.handle_message(msg);
            }
        }
        Ok(())
    }
}
