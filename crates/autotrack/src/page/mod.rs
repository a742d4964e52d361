/*! Logical pages: ownership, nesting and path rendering. */

mod registry;
mod tree;

pub use registry::{Page, PageRegistry, PageSpec, MAX_PAGE_LEVEL};
