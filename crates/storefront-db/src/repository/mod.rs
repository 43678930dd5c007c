//! # Repository Module
//!
//! Database repository implementations for Storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  state.db.products().get_by_id(42)                             │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list(&self)                                                       │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, draft)                                              │
//! │  ├── update(&self, id, draft)                                          │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories take validated drafts from `storefront-core`; they never
//! validate input themselves.
//!
//! ## Available Repositories
//!
//! - [`UserRepository`] - User accounts
//! - [`StoreRepository`] - Stores and their managers
//! - [`CategoryRepository`] - Product categories
//! - [`ProductRepository`] - Products with their category links

pub mod category;
pub mod product;
pub mod store;
pub mod user;

pub use category::CategoryRepository;
pub use product::ProductRepository;
pub use store::StoreRepository;
pub use user::UserRepository;
