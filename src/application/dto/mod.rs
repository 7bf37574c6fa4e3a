pub mod audit;
pub mod auth;
pub mod pagination;
pub mod serde_time;
pub mod sessions;
pub mod users;

pub use audit::{ActorDto, AuditEntryDto};
pub use auth::{AuthTokenDto, AuthenticatedUser};
pub use pagination::CursorPage;
pub use sessions::SessionDto;
pub use users::UserDto;
