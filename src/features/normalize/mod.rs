mod helpers;

pub use helpers::{
    clean_margin, clean_name, clean_party_label, clean_votes, parse_constituency_label,
    parse_status, split_party_symbol,
};
