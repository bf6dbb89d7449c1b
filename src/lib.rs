//! Invokes Lambda-style handlers in isolation with a stub invocation context
//! and checks that they answer with a truthy response.

pub mod harness;

pub use crate::harness::{
    invoke_and_assert, is_truthy, Context, Error, Event, EventHandler, Harness, HarnessError,
    Settings, Truthy,
};
