//! Query building subsystem
//!
//! Pure compilers from typed CRUD requests into parameterized DML.

pub mod builder;

pub use builder::{FindAll, SortOrder};
