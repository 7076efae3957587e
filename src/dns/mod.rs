//! DNS TXT resolution.
//!
//! This module provides the resolver client used by the workers:
//! - [`TxtLookup`], the query capability the run is generic over
//! - [`HickoryTxtClient`], its `hickory-resolver` implementation
//! - [`query`], which bounds any lookup with a timeout
//! - [`QueryOutcome`], the classified result of one lookup

mod outcome;
mod records;

// Re-export public API
pub use outcome::{QueryOutcome, ResolverFailure};
pub use records::{query, HickoryTxtClient, TxtLookup};
