//! egui widgets: side panel and menu, the three charts, the preview table.

pub mod panels;
pub mod plot;
pub mod table;
