//! # Tree errors
//!
//! `TreeError` is returned by the fallible operations on
//! [`Tree`](crate::balanced::Tree).

use thiserror::Error;

/// Tree error
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum TreeError {
    /// An absent element (or an absent sequence of elements) was supplied.
    #[error("The data passed is absent.")]
    InvalidArgument,
    /// No element in the tree compares equal to the one requested.
    #[error("There is no such data in the tree.")]
    NotFound,
}

/// Shorthand for results carrying a [`TreeError`].
pub type Result<T> = std::result::Result<T, TreeError>;
