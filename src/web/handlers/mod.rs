// HTTP handlers, one module per resource.

pub mod reports;
pub mod stats;
