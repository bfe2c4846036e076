//! Request types shared by the paginated endpoints

use serde::{Deserialize, Serialize};

/// Cursor for the competition list endpoints
///
/// Marks "fetch items strictly before this `(time, id)` pair", ordered by
/// begin time descending with the id as tie-break. The sentinel value
/// `{"", -1}` requests the first page. `before_time` stays a string because
/// its format is owned by the server; the client only ever copies it from
/// the last loaded item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub before_time: String,
    pub before_id: i64,
}

impl Cursor {
    /// First-page sentinel: `{"", -1}`
    pub fn sentinel() -> Self {
        Self {
            before_time: String::new(),
            before_id: -1,
        }
    }

    /// Cursor positioned after the given item ordering fields
    pub fn after(time: impl Into<String>, id: i64) -> Self {
        Self {
            before_time: time.into(),
            before_id: id,
        }
    }

    /// Whether this cursor still points at the first page
    pub fn is_sentinel(&self) -> bool {
        self.before_time.is_empty() && self.before_id == -1
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::sentinel()
    }
}

/// Page-number pagination parameters (1-based)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

/// Filter for the competition list
///
/// `user_id == -1` means anonymous (no follow state requested);
/// `filter_focus` restricts the result to the user's followed set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchFilter {
    pub is_finished: bool,
    pub user_id: i64,
    pub tag_list: Vec<i64>,
    pub search_text: String,
    pub filter_focus: bool,
}

impl MatchFilter {
    /// Filter for the "all matches" view of an anonymous visitor
    pub fn anonymous(is_finished: bool) -> Self {
        Self {
            is_finished,
            user_id: -1,
            tag_list: Vec::new(),
            search_text: String::new(),
            filter_focus: false,
        }
    }

    /// Filter for a logged-in user's view
    pub fn for_user(user_id: i64, is_finished: bool) -> Self {
        Self {
            user_id,
            ..Self::anonymous(is_finished)
        }
    }

    pub fn with_tags(mut self, tag_list: Vec<i64>) -> Self {
        self.tag_list = tag_list;
        self
    }

    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn followed_only(mut self) -> Self {
        self.filter_focus = true;
        self
    }
}

/// Wire request for the competition list: cursor plus filter
#[derive(Debug, Clone, Serialize)]
pub struct MatchListRequest {
    #[serde(flatten)]
    pub cursor: Cursor,
    #[serde(flatten)]
    pub filter: MatchFilter,
}

/// Filter for the forum post list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostFilter {
    pub tag_list: Vec<i64>,
    pub keyword: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel() {
        let c = Cursor::sentinel();
        assert!(c.is_sentinel());
        assert_eq!(c.before_id, -1);
        assert!(c.before_time.is_empty());
    }

    #[test]
    fn test_after_is_not_sentinel() {
        let c = Cursor::after("2025-04-01 18:00", 42);
        assert!(!c.is_sentinel());
        assert_eq!(c.before_id, 42);
    }

    #[test]
    fn test_match_list_request_flattens() {
        let req = MatchListRequest {
            cursor: Cursor::sentinel(),
            filter: MatchFilter::for_user(7, false).with_tags(vec![5]),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["before_id"], -1);
        assert_eq!(v["user_id"], 7);
        assert_eq!(v["tag_list"][0], 5);
        assert_eq!(v["filter_focus"], false);
    }
}
