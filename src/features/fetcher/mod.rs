pub mod client;
pub mod dto;
pub mod policy;
pub mod transport;

pub use client::{PageSource, ResilientFetcher};
pub use dto::{Page, RawResponse};
pub use policy::{Clock, RetryPolicy, SystemClock};
pub use transport::{HttpTransport, Transport};
