// Resource models - the records exchanged with the events resource API

pub mod category;
pub mod event;
pub mod user;

pub use category::Category;
pub use event::{Event, NewEvent};
pub use user::Creator;
