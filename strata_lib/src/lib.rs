//! Aggregation core for the Strata GPO reporting toolkit.
//!
//! Pure, synchronous functions that join the flat record collections from
//! `strata_data` by foreign key and produce sorted, display-ready row sets
//! and summaries. Nothing here performs I/O or mutates its inputs. Lookup
//! failures degrade to fallback labels ("Unknown Dealer" and friends), and
//! zero denominators always yield 0 rather than NaN or an error.

pub mod dealer;
pub mod format;
pub mod invoice;
pub mod lookup;
pub mod overview;
pub mod rebate;
pub mod vendor;

pub use strata_data::{sample, types, DataError, Dataset};
