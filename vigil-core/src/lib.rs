pub mod alert;

pub use alert::{AlertContext, AlertState, EvalMatch};

pub type Error = anyhow::Error;
