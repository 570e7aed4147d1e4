pub mod line_items;

pub use line_items::LineItemService;
