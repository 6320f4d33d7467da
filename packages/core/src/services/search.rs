//! Text search over bookmark leaves.
//!
//! Ranking is owned by the [`TextMatcher`] implementation; the query service
//! only bounds and serializes what the matcher returns.

use crate::models::{BookmarkNode, NodeId};
use crate::tree::BookmarkModel;

/// Finds nodes matching a free-text query
pub trait TextMatcher: Send + Sync {
    /// Return at most `max_count` matching node ids, best match first
    fn find_matches(&self, model: &dyn BookmarkModel, query: &str, max_count: usize)
        -> Vec<NodeId>;
}

/// Matches URL leaves whose title or URL contains every query word,
/// case-insensitively. Results follow tree order (preorder from the root).
#[derive(Debug, Default, Clone, Copy)]
pub struct WordMatcher;

impl WordMatcher {
    fn matches(node: &BookmarkNode, words: &[String]) -> bool {
        let Some(url) = node.url_value() else {
            return false;
        };
        let title = node.title.to_lowercase();
        let url = url.as_str().to_lowercase();
        words
            .iter()
            .all(|word| title.contains(word.as_str()) || url.contains(word.as_str()))
    }
}

impl TextMatcher for WordMatcher {
    fn find_matches(
        &self,
        model: &dyn BookmarkModel,
        query: &str,
        max_count: usize,
    ) -> Vec<NodeId> {
        let words: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if words.is_empty() || max_count == 0 {
            return Vec::new();
        }

        let mut found = Vec::new();
        let mut pending = vec![model.root_node_id()];
        while let Some(id) = pending.pop() {
            let Some(node) = model.node(id) else {
                continue;
            };
            if Self::matches(node, &words) {
                found.push(id);
                if found.len() == max_count {
                    break;
                }
            }
            pending.extend(node.children().iter().rev());
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::InMemoryBookmarkModel;
    use url::Url;

    fn model() -> (InMemoryBookmarkModel, Vec<NodeId>) {
        let mut model = InMemoryBookmarkModel::new("test");
        let folder = model.add_folder(NodeId(1), 0, "Rust docs").unwrap();
        let ids = vec![
            model
                .add_url(folder, 0, "The Rust Book", Url::parse("https://doc.rust-lang.org/book").unwrap())
                .unwrap(),
            model
                .add_url(NodeId(1), 1, "Tokio", Url::parse("https://tokio.rs").unwrap())
                .unwrap(),
            model
                .add_url(NodeId(2), 0, "Async Book", Url::parse("https://rust-lang.github.io/async-book").unwrap())
                .unwrap(),
        ];
        (model, ids)
    }

    #[test]
    fn test_matches_title_or_url_in_tree_order() {
        let (model, ids) = model();
        let found = WordMatcher.find_matches(&model, "RUST", 10);
        assert_eq!(found, vec![ids[0], ids[2]]);
    }

    #[test]
    fn test_all_words_must_match() {
        let (model, ids) = model();
        assert_eq!(WordMatcher.find_matches(&model, "async rust", 10), vec![ids[2]]);
        assert!(WordMatcher.find_matches(&model, "async tokio", 10).is_empty());
    }

    #[test]
    fn test_folders_never_match() {
        let (model, _) = model();
        assert!(WordMatcher.find_matches(&model, "docs", 10).is_empty());
    }

    #[test]
    fn test_limit_and_blank_query() {
        let (model, ids) = model();
        assert_eq!(WordMatcher.find_matches(&model, "book", 1), vec![ids[0]]);
        assert!(WordMatcher.find_matches(&model, "   ", 10).is_empty());
        assert!(WordMatcher.find_matches(&model, "book", 0).is_empty());
    }
}
