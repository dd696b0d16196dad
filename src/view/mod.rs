//! View projection: country filtering, re-ranking and the country list.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::PlayerRatingElement;

/// Sentinel for "no country filter".
pub const ALL_COUNTRIES: &str = "All";

/// Country filter selected in the ranking view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CountryFilter {
    #[default]
    All,
    /// Lowercase country code
    Country(String),
}

impl CountryFilter {
    /// Parse a filter value; "All" in any case selects every country.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_COUNTRIES) {
            CountryFilter::All
        } else {
            CountryFilter::Country(value.to_lowercase())
        }
    }

    pub fn matches(&self, country_code: &str) -> bool {
        match self {
            CountryFilter::All => true,
            CountryFilter::Country(code) => code.eq_ignore_ascii_case(country_code),
        }
    }
}

impl FromStr for CountryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for CountryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountryFilter::All => write!(f, "{}", ALL_COUNTRIES),
            CountryFilter::Country(code) => write!(f, "{}", code.to_uppercase()),
        }
    }
}

/// Filter the ranking by country and renumber ranks from 1.
///
/// The input must already be in rating order. The result is a fresh copy;
/// `ranking` is never modified, so any filter can be applied to it again.
pub fn filter_ranking(
    ranking: &[PlayerRatingElement],
    filter: &CountryFilter,
) -> Vec<PlayerRatingElement> {
    ranking
        .iter()
        .filter(|e| filter.matches(&e.country_code))
        .cloned()
        .enumerate()
        .map(|(i, mut e)| {
            e.rank = i as u32 + 1;
            e
        })
        .collect()
}

/// Country list for the filter selector: "All", then uppercase codes by
/// descending player count. Equal counts keep first-seen order; players
/// without a country are not counted.
pub fn country_list(ranking: &[PlayerRatingElement]) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for e in ranking {
        if e.country_code.is_empty() {
            continue;
        }
        let count = counts.entry(e.country_code.as_str()).or_insert(0);
        if *count == 0 {
            order.push(e.country_code.as_str());
        }
        *count += 1;
    }

    // Stable sort keeps first-seen order among ties
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));

    std::iter::once(ALL_COUNTRIES.to_string())
        .chain(order.into_iter().map(str::to_uppercase))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerId;
    use pretty_assertions::assert_eq;

    fn element(id: &str, rank: u32, country: &str, rating: f64) -> PlayerRatingElement {
        PlayerRatingElement {
            player_id: PlayerId::from(id),
            rank,
            name: id.to_uppercase(),
            country_code: country.to_string(),
            rating,
            win_rate: 50,
            game_count: 10,
            win_count: 5,
            cpt_point: 0.0,
            tournament_win_count: 0,
        }
    }

    fn sample() -> Vec<PlayerRatingElement> {
        vec![
            element("a", 1, "jp", 1800.0),
            element("b", 2, "jp", 1750.0),
            element("c", 3, "us", 1700.0),
            element("d", 4, "", 1650.0),
            element("e", 5, "kr", 1600.0),
        ]
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(CountryFilter::parse("All"), CountryFilter::All);
        assert_eq!(CountryFilter::parse("all"), CountryFilter::All);
        assert_eq!(CountryFilter::parse("ALL"), CountryFilter::All);
        assert_eq!(CountryFilter::parse("JP"), CountryFilter::Country("jp".to_string()));
        assert_eq!("us".parse::<CountryFilter>().unwrap().to_string(), "US");
    }

    #[test]
    fn test_filter_reassigns_rank() {
        let filtered = filter_ranking(&sample(), &CountryFilter::parse("US"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].player_id, PlayerId::from("c"));
        assert_eq!(filtered[0].rank, 1);

        let jp = filter_ranking(&sample(), &CountryFilter::parse("jp"));
        assert_eq!(jp.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_filter_does_not_mutate_source() {
        let ranking = sample();
        let _ = filter_ranking(&ranking, &CountryFilter::parse("kr"));
        assert_eq!(ranking, sample());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let ranking = sample();
        let filter = CountryFilter::parse("jp");
        let once = filter_ranking(&ranking, &filter);
        let twice = filter_ranking(&once, &filter);
        assert_eq!(once, twice);
        assert_eq!(once, filter_ranking(&ranking, &filter));
    }

    #[test]
    fn test_all_restores_full_set() {
        let ranking = sample();
        let _ = filter_ranking(&ranking, &CountryFilter::parse("us"));
        let all = filter_ranking(&ranking, &CountryFilter::All);

        assert_eq!(all.len(), 5);
        assert_eq!(all.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(all, ranking);
    }

    #[test]
    fn test_filter_unknown_country_is_empty() {
        assert!(filter_ranking(&sample(), &CountryFilter::parse("fr")).is_empty());
    }

    #[test]
    fn test_country_list() {
        assert_eq!(country_list(&sample()), vec!["All", "JP", "US", "KR"]);
    }

    #[test]
    fn test_country_list_counts_dominate_order() {
        let ranking = vec![
            element("a", 1, "us", 1800.0),
            element("b", 2, "jp", 1750.0),
            element("c", 3, "jp", 1700.0),
        ];
        assert_eq!(country_list(&ranking), vec!["All", "JP", "US"]);
    }

    #[test]
    fn test_country_list_empty() {
        assert_eq!(country_list(&[]), vec!["All"]);
    }
}
