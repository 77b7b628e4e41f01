pub mod client; // PushClient operations
pub mod error; // PushFailure
pub mod events; // Client events and sinks
pub mod platform; // Page capabilities
pub mod report; // PushOutcome and the UI-facing PushReport
pub mod session; // PushSession state

#[cfg(test)]
mod test_support;


pub use client::{ClientCapabilities, DeviceInfo, PushClient};
pub use error::PushFailure;
pub use events::{ClientEvent, EventSink, NoopSink};
pub use platform::{
    NotificationPermissions, Permission, PlatformSupport, Registration, ServiceWorkerContainer,
};
pub use report::{PushOutcome, PushReport};
pub use session::{PushSession, SessionSnapshot};

/// Default worker script path.
pub const SW_PATH: &str = "/static/sw.js";

/// Default worker scope.
pub const SW_SCOPE: &str = "/";
