//! Client-side search and pagination over the users table.

use crate::models::pagination::Page;
use crate::models::user::UserSummary;

/// Filter `all` by `query` and cut out page `page` of size `page_size`.
///
/// A user is kept when its username or email contains `query`, ignoring
/// case; an empty query keeps everyone. `total` counts the filtered users
/// before slicing. A page past the end is empty rather than an error, and a
/// zero page size is treated as 1.
pub fn view(all: &[UserSummary], query: &str, page: usize, page_size: usize) -> Page<UserSummary> {
    let page_size = page_size.max(1);
    let needle = query.to_lowercase();

    let filtered: Vec<&UserSummary> = all.iter().filter(|u| u.matches_lowercase(&needle)).collect();
    let total = filtered.len();

    let items = match page.checked_mul(page_size) {
        Some(start) if start < total => filtered
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect(),
        _ => Vec::new(),
    };

    Page::new(items, total, page, page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(n: usize) -> Vec<UserSummary> {
        (0..n)
            .map(|i| UserSummary {
                id: i as i64,
                username: format!("user{i:02}"),
                email: format!("user{i:02}@example.com"),
                total_notes: i as u64,
                last_note_date: None,
            })
            .collect()
    }

    fn named(id: i64, username: &str, email: &str) -> UserSummary {
        UserSummary {
            id,
            username: username.to_string(),
            email: email.to_string(),
            total_notes: 0,
            last_note_date: None,
        }
    }

    #[test]
    fn empty_query_first_page() {
        let all = users(25);
        let page = view(&all, "", 0, 10);
        assert_eq!(page.total, 25);
        assert_eq!(page.items, all[0..10].to_vec());
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn short_list_returns_everything() {
        let all = users(4);
        let page = view(&all, "", 0, 10);
        assert_eq!(page.total, 4);
        assert_eq!(page.items, all);
    }

    #[test]
    fn last_page_is_partial() {
        let all = users(25);
        let page = view(&all, "", 2, 10);
        assert_eq!(page.items, all[20..25].to_vec());
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let all = users(25);
        let page = view(&all, "", 3, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 25);

        let page = view(&all, "", usize::MAX, 10);
        assert!(page.items.is_empty());
    }

    #[test]
    fn query_matches_three_of_twenty_five() {
        let mut all = users(22);
        all.push(named(100, "Tom", "t@example.com"));
        all.push(named(101, "alice", "TOMMY@example.com"));
        all.push(named(102, "atomic", "a@example.com"));

        let page = view(&all, "tom", 0, 10);
        assert_eq!(page.total, 3);
        let ids: Vec<i64> = page.items.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![100, 101, 102]);
    }

    #[test]
    fn every_item_satisfies_the_predicate() {
        let mut all = users(30);
        all.push(named(200, "Zed", "zed@corp.io"));
        all.push(named(201, "amy", "AMY@CORP.IO"));

        for query in ["", "CORP", "user1", "2", "@", "nobody"] {
            let needle = query.to_lowercase();
            let page = view(&all, query, 0, 50);
            assert!(page.items.iter().all(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
            }));
            assert_eq!(page.items.len(), page.total);
        }
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let all = users(3);
        let page = view(&all, "", 1, 0);
        assert_eq!(page.per_page, 1);
        assert_eq!(page.items, vec![all[1].clone()]);
    }
}
