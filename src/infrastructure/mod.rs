// Infrastructure modules - the collaborators the views talk to
pub mod traits;          // Resource, notification and navigation seams
pub mod http_client;     // Resource client over HTTP
pub mod memory_store;    // In-memory resource store
pub mod notifications;   // Notification sinks
pub mod navigation;      // Route recording

// Re-export infrastructure components
pub use http_client::HttpResourceClient;
pub use memory_store::{MemoryStore, ResourceOp, ResourceSnapshot};
pub use navigation::{event_path, parse_event_route, RecordingNavigator, ROOT_PATH};
pub use notifications::{LogNotifier, RecordingNotifier};
pub use traits::{Navigator, Notification, NotificationKind, NotificationSink, ResourceClient};
