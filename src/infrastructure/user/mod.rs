//! User infrastructure
//!
//! Password hashing with Argon2, the in-memory and JSON file repositories,
//! and the registration/login service.

mod in_memory;
mod json_file;
mod password;
mod service;

pub use in_memory::InMemoryUserRepository;
pub use json_file::JsonFileUserRepository;
pub use password::{Argon2Hasher, PasswordHasher};
pub use service::UserService;
