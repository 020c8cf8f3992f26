//! Automatic journal entries for business events.
//!
//! Offsetting accounts are resolved by [`AccountRole`](crate::chart::AccountRole)
//! through an [`AccountDirectory`]. A missing role fails the posting before
//! anything is written.

pub mod directory;
pub mod error;
pub mod service;

#[cfg(test)]
mod posting_props;

pub use directory::AccountDirectory;
pub use error::PostingError;
pub use service::PostingService;
