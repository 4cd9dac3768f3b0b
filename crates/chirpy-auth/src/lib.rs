/// Chirpy auth helpers.
///
/// Passwords are stored as Argon2id PHC strings; the salt and parameters
/// travel inside the hash so verification needs nothing else.
pub mod password;

pub use password::{hash_password, verify_password};
