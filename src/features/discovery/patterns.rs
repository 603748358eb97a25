use crate::features::election::ElectionType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPatterns {
    pub party_urls: Vec<String>,
    pub party_texts: Vec<String>,
    pub constituency_urls: Vec<String>,
    pub constituency_texts: Vec<String>,
    /// Must contain one capture group holding the constituency code.
    pub constituency_code: String,
}

impl LinkPatterns {
    pub fn for_election(election_type: ElectionType) -> Self {
        let mut party_urls = vec![
            r"partywisewinresult-[^/?#]*\.htm".to_string(),
            r"partywiseresult-[^/?#]*\.htm".to_string(),
        ];
        if election_type == ElectionType::LokSabha {
            party_urls.push(r"partywisewinresultstate-[^/?#]*\.htm".to_string());
        }

        Self {
            party_urls,
            party_texts: vec!["party-wise".to_string()],
            constituency_urls: vec![
                r"candidateswise-[^/?#]*\.htm".to_string(),
                r"constituencywise[^/?#]*\.htm".to_string(),
            ],
            constituency_texts: vec!["constituency-wise".to_string()],
            constituency_code: r"(?:candidateswise-|constituencywise)([a-z0-9]+)\.htm".to_string(),
        }
    }
}
