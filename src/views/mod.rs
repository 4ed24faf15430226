// Views - per-instance state machines over the resource API

pub mod detail_view;
pub mod lifetime;
pub mod list_view;
pub mod render;

pub use detail_view::{DetailView, LoadStage};
pub use lifetime::ViewLifetime;
pub use list_view::ListView;
pub use render::{DetailRender, EventCard, EventDetails};
