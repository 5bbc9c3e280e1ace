//! 响应式控制器：持有当前宽度、布局、过滤条件与已挂载的视图。
//!
//! 布局只由宽度决定（Table / Card 两态）。跨断点时先清空旧容器，再把"当前数据视图"
//! （全量或上次算出的过滤子集）渲染进新布局；过滤状态下的重渲染会先进入 busy，
//! 由调用方在固定停顿后调用 [`Board::finish_deferred`] 完成。数据从不在这里重新拉取。

use crate::error::Result;
use crate::filter::{FilterCriteria, filter_users};
use crate::model::User;
use crate::store::Repository;
use crate::view::{FilterBadge, LayoutMode, ReferenceBook, Renderer, UserDetail, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// 布局未变，视图保持不动
    Unchanged,
    /// 已按新布局重新渲染
    Rendered,
    /// 过滤状态下跨断点：旧视图已清空，等待 `finish_deferred`
    Deferred,
}

#[derive(Debug, Clone)]
pub struct Board {
    renderer: Renderer,
    width: u32,
    layout: LayoutMode,
    criteria: FilterCriteria,
    filtered: Option<Vec<User>>,
    view: View,
    busy: bool,
    pending: bool,
}

impl Board {
    pub fn new(renderer: Renderer, width: u32) -> Self {
        let layout = renderer.breakpoints().layout_for(width);
        Self {
            renderer,
            width,
            layout,
            criteria: FilterCriteria::new(),
            filtered: None,
            view: View::Empty,
            busy: false,
            pending: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn is_filtered(&self) -> bool {
        self.filtered.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// 渲染缓存中的全量用户并清除过滤
    pub fn show_all(&mut self, repo: &Repository) -> Result<()> {
        self.criteria = FilterCriteria::new();
        self.filtered = None;
        self.pending = false;
        let result = repo
            .get_or_empty::<User>()
            .and_then(|users| self.mount(repo, &users));
        self.busy = false;
        result
    }

    /// 计算过滤子集并渲染；空条件等同 `show_all`
    pub fn apply_filter(&mut self, repo: &Repository, criteria: FilterCriteria) -> Result<()> {
        if criteria.is_empty() {
            return self.show_all(repo);
        }
        let result = repo.get_or_empty::<User>().and_then(|users| {
            let filtered = filter_users(&criteria, &users);
            self.mount(repo, &filtered)?;
            Ok(filtered)
        });
        self.busy = false;
        self.pending = false;
        let filtered = result?;
        tracing::info!(matches = filtered.len(), "filter applied");
        self.criteria = criteria;
        self.filtered = Some(filtered);
        Ok(())
    }

    pub fn reset_filter(&mut self, repo: &Repository) -> Result<()> {
        tracing::info!("filter reset");
        self.show_all(repo)
    }

    /// 用当前布局重绘当前数据视图，例如参考数据到达之后
    pub fn rerender(&mut self, repo: &Repository) -> Result<()> {
        if self.pending {
            return Ok(());
        }
        match self.filtered.clone() {
            Some(filtered) => self.mount(repo, &filtered),
            None => {
                let users = repo.get_or_empty::<User>()?;
                self.mount(repo, &users)
            }
        }
    }

    pub fn on_resize(&mut self, repo: &Repository, width: u32) -> Result<ResizeOutcome> {
        self.width = width;
        let layout = self.renderer.breakpoints().layout_for(width);
        if layout == self.layout {
            return Ok(ResizeOutcome::Unchanged);
        }

        tracing::debug!(width, ?layout, "layout changed");
        self.layout = layout;
        self.view = View::Empty;

        if self.filtered.is_some() {
            self.busy = true;
            self.pending = true;
            return Ok(ResizeOutcome::Deferred);
        }

        let result = repo
            .get_or_empty::<User>()
            .and_then(|users| self.mount(repo, &users));
        self.busy = false;
        result.map(|()| ResizeOutcome::Rendered)
    }

    /// 完成延迟渲染；没有待办时返回 false
    pub fn finish_deferred(&mut self, repo: &Repository) -> Result<bool> {
        if !self.pending {
            return Ok(false);
        }
        self.pending = false;
        self.busy = false;
        let users = self.filtered.clone().unwrap_or_default();
        self.mount(repo, &users)?;
        Ok(true)
    }

    /// 从缓存、过滤子集和当前视图中同时移除
    pub fn delete_user(&mut self, repo: &Repository, id: &str) -> Result<bool> {
        let from_store = repo.delete::<User>(id)?;
        if let Some(filtered) = &mut self.filtered {
            filtered.retain(|u| u.id != id);
        }
        let from_view = self.view.remove(id);
        if from_store {
            tracing::info!(id, "user deleted");
        }
        Ok(from_store || from_view)
    }

    /// 详情投影；id 不存在时返回 None，调用方跳过渲染
    pub fn detail(&self, repo: &Repository, id: &str) -> Result<Option<UserDetail>> {
        let Some(user) = repo.find::<User>(id)? else {
            tracing::warn!(id, "detail requested for unknown user");
            return Ok(None);
        };
        let book = ReferenceBook::from_repo(repo)?;
        Ok(Some(self.renderer.detail(&user, &book, self.width)))
    }

    pub fn filter_badges(&self) -> Vec<FilterBadge> {
        self.renderer.filter_badges(&self.criteria)
    }

    fn mount(&mut self, repo: &Repository, users: &[User]) -> Result<()> {
        let book = ReferenceBook::from_repo(repo)?;
        self.view = self.renderer.render(users, self.layout, &book, self.width);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::GENDER;
    use crate::model::UserName;

    fn repo_with(users: &[(&str, &str)]) -> Repository {
        let repo = Repository::memory();
        let users: Vec<User> = users
            .iter()
            .map(|(id, gender)| {
                let mut u = User::new(*id);
                u.gender = Some(gender.to_string());
                u.name = Some(UserName::Full(format!("User {id}")));
                u
            })
            .collect();
        repo.set(&users).unwrap();
        repo
    }

    #[test]
    fn initial_layout_follows_width() {
        assert_eq!(Board::new(Renderer::default(), 1024).layout(), LayoutMode::Table);
        assert_eq!(Board::new(Renderer::default(), 500).layout(), LayoutMode::Card);
    }

    #[test]
    fn resize_within_layout_is_unchanged() {
        let repo = repo_with(&[("a", "male")]);
        let mut board = Board::new(Renderer::default(), 1024);
        board.show_all(&repo).unwrap();
        let before = board.view().clone();
        assert_eq!(board.on_resize(&repo, 900).unwrap(), ResizeOutcome::Unchanged);
        assert_eq!(board.view(), &before);
    }

    #[test]
    fn crossing_breakpoint_rerenders_immediately_without_filter() {
        let repo = repo_with(&[("a", "male"), ("b", "female")]);
        let mut board = Board::new(Renderer::default(), 1024);
        board.show_all(&repo).unwrap();

        assert_eq!(board.on_resize(&repo, 500).unwrap(), ResizeOutcome::Rendered);
        assert_eq!(board.view().mode(), Some(LayoutMode::Card));
        assert_eq!(board.view().ids(), ["a", "b"]);
        assert!(!board.is_busy());
    }

    #[test]
    fn filtered_resize_is_deferred_and_keeps_subset() {
        let repo = repo_with(&[("a", "male"), ("b", "female"), ("c", "female")]);
        let mut board = Board::new(Renderer::default(), 1024);
        board
            .apply_filter(&repo, FilterCriteria::new().with(GENDER, "female"))
            .unwrap();
        assert_eq!(board.view().ids(), ["b", "c"]);

        assert_eq!(board.on_resize(&repo, 500).unwrap(), ResizeOutcome::Deferred);
        assert!(board.is_busy());
        assert!(board.view().is_empty());

        assert!(board.finish_deferred(&repo).unwrap());
        assert!(!board.is_busy());
        assert_eq!(board.view().mode(), Some(LayoutMode::Card));
        assert_eq!(board.view().ids(), ["b", "c"]);
        assert!(!board.finish_deferred(&repo).unwrap());
    }

    #[test]
    fn reset_filter_restores_full_collection_and_clears_badges() {
        let repo = repo_with(&[("a", "male"), ("b", "female")]);
        let mut board = Board::new(Renderer::default(), 1024);
        board
            .apply_filter(&repo, FilterCriteria::new().with(GENDER, "male"))
            .unwrap();
        assert_eq!(board.filter_badges().len(), 1);

        board.reset_filter(&repo).unwrap();
        assert!(!board.is_filtered());
        assert!(board.filter_badges().is_empty());
        assert_eq!(board.view().ids(), ["a", "b"]);
    }

    #[test]
    fn reset_during_pending_resize_cancels_it() {
        let repo = repo_with(&[("a", "male"), ("b", "female")]);
        let mut board = Board::new(Renderer::default(), 1024);
        board
            .apply_filter(&repo, FilterCriteria::new().with(GENDER, "male"))
            .unwrap();
        board.on_resize(&repo, 500).unwrap();
        board.reset_filter(&repo).unwrap();
        assert!(!board.has_pending());
        assert!(!board.finish_deferred(&repo).unwrap());
        assert_eq!(board.view().ids(), ["a", "b"]);
    }

    #[test]
    fn delete_updates_filtered_subset_too() {
        let repo = repo_with(&[("a", "female"), ("b", "female")]);
        let mut board = Board::new(Renderer::default(), 1024);
        board
            .apply_filter(&repo, FilterCriteria::new().with(GENDER, "female"))
            .unwrap();
        assert!(board.delete_user(&repo, "a").unwrap());

        board.on_resize(&repo, 500).unwrap();
        board.finish_deferred(&repo).unwrap();
        assert_eq!(board.view().ids(), ["b"]);
        assert!(!board.delete_user(&repo, "a").unwrap());
    }

    #[test]
    fn detail_for_unknown_id_is_none() {
        let repo = repo_with(&[("a", "male")]);
        let board = Board::new(Renderer::default(), 1024);
        assert!(board.detail(&repo, "nope").unwrap().is_none());
        assert_eq!(board.detail(&repo, "a").unwrap().unwrap().title, "User a");
    }
}
