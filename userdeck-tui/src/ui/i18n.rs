use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Zh,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0);

pub fn set_lang(lang: Lang) {
    CURRENT_LANG.store(lang as u8, Ordering::Relaxed);
}

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::Zh,
        _ => Lang::En,
    }
}

macro_rules! t {
    ($key:expr) => {
        $crate::ui::i18n::tr($key)
    };
}

/// 未知 key 返回 `"???"`
pub fn tr(key: &str) -> &'static str {
    match lang() {
        Lang::En => tr_en(key),
        Lang::Zh => tr_zh(key),
    }
}

fn tr_en(key: &str) -> &'static str {
    match key {
        // app
        "app.empty" => "No users to show",
        "app.loaded" => "loaded",
        "app.from_cache" => "from cache",
        "app.load_failed" => "Failed to load",
        "app.users_failed" => "Could not load the user list",
        "app.deleted" => "Deleted",
        "app.refreshing" => "Refreshing data",
        "app.no_email" => "Selected user has no email",
        "app.mail_failed" => "Could not open mail client",
        "app.store_failed" => "Session store error",

        // help
        "help.title" => "Key Bindings",
        "help.close" => "Press q / ? / Esc to close",
        "help.section.global" => "Global",
        "help.section.users" => "Users",
        "help.section.search" => "Search",
        "help.quit" => "Quit",
        "help.refresh" => "Refresh data",
        "help.help" => "This help",
        "help.logs" => "Show logs",
        "help.down_up" => "Down / Up",
        "help.top_bottom" => "Top / Bottom",
        "help.detail" => "User details",
        "help.delete" => "Delete user",
        "help.mail" => "Send mail",
        "help.search" => "Advanced search",
        "help.next_field" => "Next field",
        "help.toggle_gender" => "Toggle gender",
        "help.apply" => "Apply search",
        "help.close_form" => "Close form",
        "help.cancel_search" => "Cancel search",

        // logs
        "logs.title" => "Logs",
        "logs.empty" => "No logs yet",
        "logs.hint" => "j/k scroll  \u{00b7}  e problems only  \u{00b7}  Esc/! close",
        "logs.problems" => "problems",

        // search form
        "search.title" => "Advanced search",
        "search.gender" => "Gender",
        "search.any" => "any",
        "search.male" => "male",
        "search.female" => "female",
        "search.firstname" => "Firstname",
        "search.lastname" => "Lastname",
        "search.apply" => "Search",
        "search.next" => "Next",
        "search.close" => "Close",

        // filter line
        "filter.hint" => "Advanced search",
        "filter.cancel" => "Cancel search",

        // table / card
        "table.name" => "Name",
        "table.email" => "Email",
        "table.city" => "City",
        "table.registered" => "Registered",
        "table.actions" => "Actions",
        "action.view" => "view",
        "action.edit" => "edit",
        "action.delete" => "delete",
        "layout.table" => "table",
        "layout.card" => "cards",

        // detail
        "detail.birthday" => "Birthday",
        "detail.phone" => "Phone",
        "detail.email" => "Email",
        "detail.address" => "Address",
        "detail.skills" => "Skills",
        "detail.languages" => "Languages",
        "detail.hint" => "Esc close  \u{00b7}  m mail",

        // dialogs
        "alert.title" => "Error",
        "alert.hint" => "Enter / Esc to dismiss",
        "confirm.title" => "Delete user",
        "confirm.delete" => "Delete",
        "confirm.yes" => "Delete",
        "confirm.no" => "Cancel",

        // status bar
        "status.users" => "users",
        "status.loading" => "loading",
        "status.rendering" => "rendering...",

        _ => "???",
    }
}

fn tr_zh(key: &str) -> &'static str {
    match key {
        // app
        "app.empty" => "暂无用户",
        "app.loaded" => "已加载",
        "app.from_cache" => "来自缓存",
        "app.load_failed" => "加载失败",
        "app.users_failed" => "无法加载用户列表",
        "app.deleted" => "已删除",
        "app.refreshing" => "正在刷新数据",
        "app.no_email" => "所选用户没有邮箱",
        "app.mail_failed" => "无法打开邮件客户端",
        "app.store_failed" => "会话存储出错",

        // help
        "help.title" => "快捷键",
        "help.close" => "按 q / ? / Esc 关闭",
        "help.section.global" => "全局",
        "help.section.users" => "用户",
        "help.section.search" => "搜索",
        "help.quit" => "退出",
        "help.refresh" => "刷新数据",
        "help.help" => "帮助",
        "help.logs" => "显示日志",
        "help.down_up" => "下 / 上",
        "help.top_bottom" => "顶部 / 底部",
        "help.detail" => "用户详情",
        "help.delete" => "删除用户",
        "help.mail" => "发送邮件",
        "help.search" => "高级搜索",
        "help.next_field" => "下一项",
        "help.toggle_gender" => "切换性别",
        "help.apply" => "执行搜索",
        "help.close_form" => "关闭表单",
        "help.cancel_search" => "取消搜索",

        // logs
        "logs.title" => "日志",
        "logs.empty" => "暂无日志",
        "logs.hint" => "j/k 滚动  \u{00b7}  e 只看问题  \u{00b7}  Esc/! 关闭",
        "logs.problems" => "问题",

        // search form
        "search.title" => "高级搜索",
        "search.gender" => "性别",
        "search.any" => "不限",
        "search.male" => "男",
        "search.female" => "女",
        "search.firstname" => "名",
        "search.lastname" => "姓",
        "search.apply" => "搜索",
        "search.next" => "下一项",
        "search.close" => "关闭",

        // filter line
        "filter.hint" => "高级搜索",
        "filter.cancel" => "取消搜索",

        // table / card
        "table.name" => "姓名",
        "table.email" => "邮箱",
        "table.city" => "城市",
        "table.registered" => "注册日期",
        "table.actions" => "操作",
        "action.view" => "查看",
        "action.edit" => "编辑",
        "action.delete" => "删除",
        "layout.table" => "表格",
        "layout.card" => "卡片",

        // detail
        "detail.birthday" => "生日",
        "detail.phone" => "电话",
        "detail.email" => "邮箱",
        "detail.address" => "地址",
        "detail.skills" => "技能",
        "detail.languages" => "语言",
        "detail.hint" => "Esc 关闭  \u{00b7}  m 发邮件",

        // dialogs
        "alert.title" => "错误",
        "alert.hint" => "按 Enter / Esc 关闭",
        "confirm.title" => "删除用户",
        "confirm.delete" => "删除",
        "confirm.yes" => "删除",
        "confirm.no" => "取消",

        // status bar
        "status.users" => "位用户",
        "status.loading" => "加载中",
        "status.rendering" => "渲染中...",

        _ => tr_en(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_is_marked() {
        assert_eq!(tr_en("no.such.key"), "???");
        assert_eq!(tr_zh("no.such.key"), "???");
    }

    #[test]
    fn zh_table_covers_en_keys() {
        for key in ["search.gender", "filter.cancel", "confirm.title", "status.loading"] {
            assert_ne!(tr_zh(key), tr_en(key), "{key}");
        }
    }
}
