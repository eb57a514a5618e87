pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod navigation;
pub mod routes;
pub mod session;

pub use api::{ApiClient, RequestOptions};
pub use error::{ClientError, ClientResult};
pub use navigation::{Navigation, NavigationKind, SessionEvent, SessionEvents};
pub use routes::{guard, Route, RouteDecision, Shell};
pub use session::{FileTokenStore, MemoryTokenStore, TokenStore};
