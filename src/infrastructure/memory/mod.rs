//! In-process storage backend.
//!
//! [`MemoryStore`] implements every repository trait over a single
//! `RwLock`-guarded state. It is selected with `STORAGE_BACKEND=memory` for
//! local development and backs the HTTP integration tests. Data is lost on
//! restart.

mod store;

pub use store::MemoryStore;
