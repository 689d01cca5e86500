mod deck_view;
mod pagination;
mod status_bar;

pub use deck_view::DeckViewWidget;
pub use pagination::PaginationWidget;
pub use status_bar::StatusBarWidget;
