//! # Data Models
//!
//! Serde models for the Petstore entities, plus fixture factories that fill
//! them with random test data.

pub mod pet;
pub mod store;
pub mod user;

pub use pet::{Category, Pet, PetStatus, Tag};
pub use store::{Order, OrderStatus};
pub use user::{ApiMessage, User};

use rand::Rng;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const LOWERCASE_DIGITS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// `len` random lowercase letters.
pub(crate) fn random_letters(len: usize) -> String {
    random_from(LOWERCASE, len)
}

/// `len` random lowercase letters and digits.
pub(crate) fn random_alphanumeric(len: usize) -> String {
    random_from(LOWERCASE_DIGITS, len)
}

fn random_from(charset: &[u8], len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| charset[rng.gen_range(0..charset.len())] as char)
        .collect()
}
