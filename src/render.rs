pub mod backend;
pub mod backends;

mod drawn_item;
mod render_list;
mod renderer;

pub use drawn_item::{DrawnItem, DrawnItemType, RenderPage, RenderPageId, ValueContext};
pub use render_list::*;
pub use renderer::{ComponentPainter, Renderer};
