pub mod schemas;
pub mod writer;

pub use writer::{
    ArtifactWriter, CANDIDATES_FILE, CONSTITUENCIES_FILE, ELECTION_FILE, PARTIES_FILE,
};
