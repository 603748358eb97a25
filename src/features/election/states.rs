pub struct StateEntry {
    pub code: &'static str,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

pub const STATES: &[StateEntry] = &[
    StateEntry { code: "AN", name: "Andaman & Nicobar Islands", aliases: &["Andaman and Nicobar Islands", "Andaman & Nicobar"] },
    StateEntry { code: "AP", name: "Andhra Pradesh", aliases: &[] },
    StateEntry { code: "AR", name: "Arunachal Pradesh", aliases: &[] },
    StateEntry { code: "AS", name: "Assam", aliases: &[] },
    StateEntry { code: "BR", name: "Bihar", aliases: &[] },
    StateEntry { code: "CH", name: "Chandigarh", aliases: &[] },
    StateEntry { code: "CG", name: "Chhattisgarh", aliases: &["Chattisgarh"] },
    StateEntry { code: "DN", name: "Dadra & Nagar Haveli and Daman & Diu", aliases: &["Dadra and Nagar Haveli and Daman and Diu"] },
    StateEntry { code: "DL", name: "Delhi", aliases: &["NCT of Delhi", "NCT OF Delhi"] },
    StateEntry { code: "GA", name: "Goa", aliases: &[] },
    StateEntry { code: "GJ", name: "Gujarat", aliases: &[] },
    StateEntry { code: "HR", name: "Haryana", aliases: &[] },
    StateEntry { code: "HP", name: "Himachal Pradesh", aliases: &[] },
    StateEntry { code: "JK", name: "Jammu & Kashmir", aliases: &["Jammu and Kashmir"] },
    StateEntry { code: "JH", name: "Jharkhand", aliases: &[] },
    StateEntry { code: "KA", name: "Karnataka", aliases: &[] },
    StateEntry { code: "KL", name: "Kerala", aliases: &[] },
    StateEntry { code: "LA", name: "Ladakh", aliases: &[] },
    StateEntry { code: "LD", name: "Lakshadweep", aliases: &[] },
    StateEntry { code: "MP", name: "Madhya Pradesh", aliases: &[] },
    StateEntry { code: "MH", name: "Maharashtra", aliases: &[] },
    StateEntry { code: "MN", name: "Manipur", aliases: &[] },
    StateEntry { code: "ML", name: "Meghalaya", aliases: &[] },
    StateEntry { code: "MZ", name: "Mizoram", aliases: &[] },
    StateEntry { code: "NL", name: "Nagaland", aliases: &[] },
    StateEntry { code: "OD", name: "Odisha", aliases: &["Orissa"] },
    StateEntry { code: "PY", name: "Puducherry", aliases: &["Pondicherry"] },
    StateEntry { code: "PB", name: "Punjab", aliases: &[] },
    StateEntry { code: "RJ", name: "Rajasthan", aliases: &[] },
    StateEntry { code: "SK", name: "Sikkim", aliases: &[] },
    StateEntry { code: "TN", name: "Tamil Nadu", aliases: &[] },
    StateEntry { code: "TS", name: "Telangana", aliases: &[] },
    StateEntry { code: "TR", name: "Tripura", aliases: &[] },
    StateEntry { code: "UP", name: "Uttar Pradesh", aliases: &[] },
    StateEntry { code: "UK", name: "Uttarakhand", aliases: &["Uttaranchal"] },
    StateEntry { code: "WB", name: "West Bengal", aliases: &[] },
];

pub fn find_state(text: &str) -> Option<&'static StateEntry> {
    let haystack = text.to_lowercase();
    let mut spellings = STATES
        .iter()
        .flat_map(|entry| {
            std::iter::once(entry.name)
                .chain(entry.aliases.iter().copied())
                .map(move |spelling| (spelling, entry))
        })
        .collect::<Vec<_>>();
    spellings.sort_by(|left, right| right.0.len().cmp(&left.0.len()).then(left.0.cmp(right.0)));

    spellings
        .into_iter()
        .find(|(spelling, _)| contains_word(&haystack, &spelling.to_lowercase()))
        .map(|(_, entry)| entry)
}

pub fn state_by_code(code: &str) -> Option<&'static StateEntry> {
    STATES
        .iter()
        .find(|entry| entry.code.eq_ignore_ascii_case(code))
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_whole_words_only() {
        assert_eq!(find_state("Goa Legislative Assembly").map(|s| s.code), Some("GA"));
        assert!(find_state("Goalpara results").is_none());
    }

    #[test]
    fn aliases_and_longest_names_win() {
        assert_eq!(find_state("General Election to Orissa Assembly").map(|s| s.code), Some("OD"));
        assert_eq!(find_state("NCT OF DELHI results").map(|s| s.name), Some("Delhi"));
        assert_eq!(find_state("Arunachal Pradesh and Pradesh").map(|s| s.code), Some("AR"));
        assert_eq!(find_state("Jammu & Kashmir").map(|s| s.code), Some("JK"));
    }

    #[test]
    fn looks_up_by_code() {
        assert_eq!(state_by_code("mh").map(|s| s.name), Some("Maharashtra"));
        assert!(state_by_code("ZZ").is_none());
    }
}
