#[macro_use]
pub mod i18n;

pub mod badge;
pub mod card_view;
pub mod detail_view;
pub mod dialog;
pub mod help;
pub mod log_view;
pub mod search_form;
pub mod status_bar;
pub mod table_view;
pub mod theme;
pub mod util;
