pub mod discovery;
pub mod election;
pub mod fetcher;
pub mod markup;
pub mod normalize;
pub mod output;
pub mod scrape;
