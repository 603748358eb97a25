pub mod discoverer;
pub mod patterns;

pub use discoverer::LinkDiscoverer;
pub use patterns::LinkPatterns;
