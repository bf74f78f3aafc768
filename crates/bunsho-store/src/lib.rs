//! In-memory document store.
//!
//! [`DocumentStore`] implements [`bunsho_core::DocumentAccessor`] over a
//! concurrent map of documents, each holding a UTF-16 code-unit body buffer
//! plus header/footer streams. It exists so the MCP server (and the builder's
//! tests) can run against faithful index semantics without a network.

mod store;

pub use store::DocumentStore;
