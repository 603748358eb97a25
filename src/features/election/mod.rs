pub mod detector;
pub mod dto;
pub mod states;

pub use detector::{detect, detect_with_override};
pub use dto::{
    Candidate, CandidateStatus, Constituency, Detection, ElectionMetadata, ElectionType, Party,
};
