pub mod line_items;

pub use line_items::configure_line_item_routes;
