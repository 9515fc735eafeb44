mod cart;
mod chat;
mod orders;
mod product_detail;
mod products;
mod slides;

pub use cart::CartView;
pub use chat::ChatView;
pub use orders::OrdersView;
pub use product_detail::ProductDetailView;
pub use products::ProductListView;
pub use slides::SlidesView;
