pub mod page;
pub mod post;
pub mod user;

pub use page::Page;
pub use post::{Category, Comment, Post, PostSummary, Section};
pub use user::{AuthResponse, Credentials, Registration, User};
