//! Call classifier application layer

mod classify;

pub use classify::{CallSite, ClassifiedCall, ClassifyContext};
