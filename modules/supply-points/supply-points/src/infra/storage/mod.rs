pub mod firestore;
mod firestore_value;
pub mod memory;

pub use firestore::{FirestoreDocumentStore, FirestoreSettings};
pub use memory::InMemoryDocumentStore;
