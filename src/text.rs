//! Text queries: keyword search over names and direct lookup by id.

use crate::engine::Engine;
use crate::types::Region;
use std::fmt::Display;

/// Default result cap for [`Engine::search`].
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

impl Engine {
    /// Ranked keyword search.
    ///
    /// The keyword is split on whitespace; each token found as a substring of a name adds
    /// one to that neighborhood's score. Matching is case-sensitive. Results are ordered by
    /// score descending, then by shorter name, then by catalog order, and capped at
    /// `limit`. The score is carried in [`Region::score`].
    pub fn search(&self, keyword: &str, limit: usize) -> Vec<Region> {
        let mut ranked = self.rank(keyword);
        ranked.truncate(limit);
        ranked
            .into_iter()
            .map(|(idx, score)| self.build_region(idx, None, Some(score as f64)))
            .collect()
    }

    /// Best-shot search: the single top-ranked match of [`search`](Self::search).
    pub fn best_match(&self, keyword: &str) -> Option<Region> {
        self.search(keyword, 1).into_iter().next()
    }

    /// Looks up a neighborhood by id.
    ///
    /// Ids are compared in their `Display` form, so a numeric id and its decimal string
    /// find the same row.
    pub fn get(&self, id: impl Display) -> Option<Region> {
        let idx = self.catalog().index_of(&id.to_string())?;
        Some(self.build_region(idx, None, None))
    }

    fn rank(&self, keyword: &str) -> Vec<(usize, usize)> {
        let tokens: Vec<&str> = keyword.split_whitespace().collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, usize, usize)> = self
            .catalog()
            .columns()
            .names
            .iter()
            .enumerate()
            .filter_map(|(idx, name)| {
                let score = tokens.iter().filter(|token| name.contains(*token)).count();
                (score > 0).then(|| (idx, score, name.chars().count()))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        scored
            .into_iter()
            .map(|(idx, score, _)| (idx, score))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::Columns;

    fn fixture() -> Engine {
        let mut columns = Columns::default();
        columns.push(1111010100u64, "Seoul Station", 37.5547, 126.9707, 0.8);
        columns.push(1111010200u64, "Seoul", 37.5665, 126.9780, 5.0);
        columns.push(4113510900u64, "Pangyo-dong", 37.3948, 127.1112, 1.1);
        columns.push(4113511000u64, "Sampyeong-dong Pangyo", 37.4035, 127.1009, 1.3);
        columns.push(2611010100u64, "Busan Station", 35.1151, 129.0422, 0.9);
        Engine::new(Catalog::new(columns).unwrap())
    }

    fn names(regions: &[Region]) -> Vec<&str> {
        regions.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_shorter_name_ranks_first() {
        let engine = fixture();
        let results = engine.search("Seoul", DEFAULT_SEARCH_LIMIT);
        assert_eq!(names(&results), vec!["Seoul", "Seoul Station"]);
        assert!(results.iter().all(|r| r.score == Some(1.0)));
        assert!(results.iter().all(|r| r.distance.is_none()));
    }

    #[test]
    fn test_more_tokens_rank_higher() {
        let engine = fixture();
        let results = engine.search("Busan Station", DEFAULT_SEARCH_LIMIT);
        assert_eq!(names(&results), vec!["Busan Station", "Seoul Station"]);
        assert_eq!(results[0].score, Some(2.0));
        assert_eq!(results[1].score, Some(1.0));
    }

    #[test]
    fn test_limit_applies() {
        let engine = fixture();
        assert_eq!(engine.search("o", DEFAULT_SEARCH_LIMIT).len(), 5);
        assert_eq!(engine.search("o", 2).len(), 2);
        assert!(engine.search("o", 0).is_empty());
    }

    #[test]
    fn test_case_sensitive() {
        let engine = fixture();
        assert!(engine.best_match("seoul").is_none());
        assert!(engine.search("PANGYO", 5).is_empty());
    }

    #[test]
    fn test_best_match() {
        let engine = fixture();
        let region = engine.best_match("  Pangyo  ").unwrap();
        assert_eq!(region.name, "Pangyo-dong");
        assert_eq!(region.id, "4113510900");
        assert!(engine.best_match("Daejeon").is_none());
    }

    #[test]
    fn test_blank_keyword() {
        let engine = fixture();
        assert!(engine.best_match("").is_none());
        assert!(engine.best_match(" \t ").is_none());
        assert!(engine.search("   ", 5).is_empty());
    }

    #[test]
    fn test_get_numeric_and_string() {
        let engine = fixture();
        let by_number = engine.get(4113510900u64).unwrap();
        let by_string = engine.get("4113510900").unwrap();
        assert_eq!(by_number, by_string);
        assert_eq!(by_number.name, "Pangyo-dong");
        assert_eq!(by_number.distance, None);
        assert_eq!(by_number.score, None);
        assert!(engine.get(42).is_none());
        assert!(engine.get("").is_none());
    }
}
