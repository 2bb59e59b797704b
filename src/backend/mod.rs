// backend module: the random-issue server client and the engine thread that drives it

pub mod client;
pub mod http;
mod interface;
pub mod stub;

pub use client::BackendClient;
pub use http::HttpEngine;
pub use interface::{Engine, EngineHandle, Event, PendingReply, Request};
pub use stub::StubEngine;
