pub mod method_override;
pub mod security_headers;
pub mod session;

pub use method_override::MethodOverride;
pub use security_headers::SecurityHeaders;
pub use session::{session_middleware, CurrentUser, Owner};
