pub mod config;
pub mod ctx;
pub mod ops;

use ctx::LogCtx;

// Factory helpers, one typed context per command
pub fn pack() -> LogCtx<ops::pack::Pack> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn extract() -> LogCtx<ops::extract::Extract> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn inspect() -> LogCtx<ops::inspect::Inspect> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
