//! Filesystem utilities for breakpoint.
//!
//! `mirror` copies and enumerates snapshot trees; `atomic` provides the
//! single overwrite-write used for generated documents.

pub mod atomic;
pub mod mirror;

pub use atomic::atomic_write_file;
pub use mirror::{copy_selected, copy_tree, create_dir_all, list_files_recursive, remove_tree};
