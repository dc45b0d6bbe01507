pub mod resolver;
pub mod routes;

// re-export
pub use resolver::{CreateInviteError, InviteResolver, InviteSource, ResolvedInvite};
