//! Handler extension traits.

mod depot;
mod result;

pub(crate) use depot::*;
pub(crate) use result::*;
