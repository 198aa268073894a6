//! The module contains the errors the engine can return.
//!
//! - [`EmptyDataset`] when there is no date to compute the latest period from.
//! - [`InvalidDate`] when a date key cannot be placed on the calendar.
//! - [`InvalidAmount`] when an amount cannot be represented as [`Money`].
//! - [`Overflow`] when a total or a difference leaves the [`Money`] range.
//!
//!  [`EmptyDataset`]: EngineError::EmptyDataset
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`Overflow`]: EngineError::Overflow
//!  [`Money`]: super::money::Money
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("dataset has no dates")]
    EmptyDataset,
    #[error("Invalid date: \"{0}\"")]
    InvalidDate(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount overflow: {0}")]
    Overflow(String),
}
