/// Credential handling
///
/// - `password`: one-way password hashing and verification

pub mod password;
