use userdeck_core::{FilterCriteria, Population, ResizeOutcome, Resource, User};

use crate::ui::log_view::LogLevel;
use crate::ui::util;

use super::{App, AppMessage, InputMode, PendingDelete};

/// 当前终端的视口宽度（像素）
pub(crate) fn viewport_width(columns: u16, cell_width_px: u32) -> u32 {
    let pixels = crossterm::terminal::window_size()
        .map(|size| size.width)
        .unwrap_or(0);
    util::viewport_width(columns, pixels, cell_width_px)
}

impl App {
    // — 数据加载 —

    pub(crate) fn load_all(&mut self, force: bool) {
        for resource in Resource::ALL {
            self.load_resource(resource, force);
        }
    }

    /// 每个资源一个后台任务；同一资源在途时不重复发起
    pub(crate) fn load_resource(&mut self, resource: Resource, force: bool) {
        if !self.loading.insert(resource) {
            return;
        }
        let tx = self.msg_tx.clone();
        let fetcher = self.fetcher.clone();

        tokio::spawn(async move {
            let result = if force {
                fetcher.refresh(resource).await
            } else {
                fetcher.ensure_resource(resource).await
            };
            let _ = tx.send(AppMessage::Loaded { resource, result });
        });
    }

    pub(crate) fn refresh(&mut self) {
        self.logs.info(t!("app.refreshing"));
        self.load_all(true);
    }

    pub(crate) fn on_loaded(&mut self, resource: Resource, result: userdeck_core::Result<Population>) {
        self.loading.remove(&resource);
        match result {
            Ok(population) => {
                let message = match population {
                    Population::Fetched(count) => format!("{count} {}", t!("app.loaded")),
                    Population::Cached => t!("app.from_cache").to_string(),
                };
                self.logs.record(LogLevel::Info, Some(resource), message);

                let rendered = if resource == Resource::Users {
                    self.render_users()
                } else {
                    // 参考数据到达后补全卡片上的徽章
                    self.board.rerender(self.fetcher.repo())
                };
                self.report(rendered);
            }
            Err(err) => {
                tracing::error!(%resource, error = %err, "load failed");
                if resource == Resource::Users {
                    self.logs.record(LogLevel::Error, Some(resource), err.to_string());
                    self.alert = Some(format!("{}: {err}", t!("app.users_failed")));
                } else {
                    self.logs.record(
                        LogLevel::Warn,
                        Some(resource),
                        format!("{}: {err}", t!("app.load_failed")),
                    );
                }
            }
        }
        self.clamp_selection();
    }

    /// 用户集合变化后：有过滤条件就重算子集，否则渲染全量
    fn render_users(&mut self) -> userdeck_core::Result<()> {
        let repo = self.fetcher.repo();
        if self.board.is_filtered() {
            let criteria = self.board.criteria().clone();
            self.board.apply_filter(repo, criteria)
        } else {
            self.board.show_all(repo)
        }
    }

    fn report(&mut self, result: userdeck_core::Result<()>) {
        if let Err(err) = result {
            tracing::error!(error = %err, "session store failure");
            self.logs.error(format!("{}: {err}", t!("app.store_failed")));
        }
    }

    // — 响应式布局 —

    pub(crate) fn apply_resize(&mut self, width: u32) {
        match self.board.on_resize(self.fetcher.repo(), width) {
            Ok(ResizeOutcome::Deferred) => {
                self.detail = None;
                self.deferred_render
                    .trigger(&self.msg_tx, AppMessage::DeferredRender);
            }
            Ok(ResizeOutcome::Rendered) => self.clamp_selection(),
            Ok(ResizeOutcome::Unchanged) => {}
            Err(err) => self.report(Err(err)),
        }
    }

    pub(crate) fn finish_deferred(&mut self) {
        let result = self.board.finish_deferred(self.fetcher.repo()).map(|_| ());
        self.report(result);
        self.clamp_selection();
    }

    // — 选择 —

    pub(crate) fn clamp_selection(&mut self) {
        let len = self.board.view().len();
        if len == 0 {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.table_state.select(Some(self.selected));
        }
    }

    pub(crate) fn select_next(&mut self) {
        self.selected = self.selected.saturating_add(1);
        self.clamp_selection();
    }

    pub(crate) fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.clamp_selection();
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
        self.clamp_selection();
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = usize::MAX;
        self.clamp_selection();
    }

    pub(crate) fn selected_id(&self) -> Option<String> {
        self.board.view().id_at(self.selected).map(str::to_string)
    }

    // — 用户操作 —

    pub(crate) fn open_detail(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.board.detail(self.fetcher.repo(), &id) {
            Ok(detail) => self.detail = detail,
            Err(err) => self.report(Err(err)),
        }
    }

    pub(crate) fn request_delete(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let name = match self.repo().find::<User>(&id) {
            Ok(Some(user)) => user.display_name(),
            _ => id.clone(),
        };
        self.confirm_delete = Some(PendingDelete { id, name });
    }

    pub(crate) fn confirm_pending_delete(&mut self) {
        let Some(pending) = self.confirm_delete.take() else {
            return;
        };
        match self.board.delete_user(self.fetcher.repo(), &pending.id) {
            Ok(true) => {
                self.logs.info(format!("{} {}", t!("app.deleted"), pending.name));
            }
            Ok(false) => {}
            Err(err) => self.report(Err(err)),
        }
        self.clamp_selection();
    }

    /// 用系统默认邮件客户端打开 `mailto:`；详情弹窗打开时以弹窗中的用户为准
    pub(crate) fn mail_selected(&mut self) {
        let email = match &self.detail {
            Some(detail) => Some(detail.email.clone()),
            None => self.selected_id().and_then(|id| {
                self.repo()
                    .find::<User>(&id)
                    .ok()
                    .flatten()
                    .and_then(|user| user.email)
            }),
        };
        let Some(email) = email.filter(|e| !e.trim().is_empty()) else {
            self.logs.warn(t!("app.no_email"));
            return;
        };
        if let Err(err) = open::that(format!("mailto:{email}")) {
            tracing::warn!(error = %err, "mailto handler failed");
            self.logs.error(format!("{}: {err}", t!("app.mail_failed")));
        }
    }

    // — 搜索 —

    pub(crate) fn apply_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.deferred_render.cancel();
        let criteria = FilterCriteria::from_inputs(&self.search.to_inputs());
        let result = self.board.apply_filter(self.fetcher.repo(), criteria);
        self.report(result);
        self.selected = 0;
        self.clamp_selection();
    }

    pub(crate) fn cancel_search(&mut self) {
        self.search.clear();
        self.deferred_render.cancel();
        let result = self.board.reset_filter(self.fetcher.repo());
        self.report(result);
        self.selected = 0;
        self.clamp_selection();
    }
}
