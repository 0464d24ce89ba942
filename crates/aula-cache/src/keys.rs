//! Query key catalogue and invalidation sets.
//!
//! Every page builds its keys here so a write on one page invalidates
//! exactly what another page reads. List keys are `[root, params]`; the
//! root alone is the invalidation prefix for every param combination.

use serde_json::Value;

use crate::{QueryCache, QueryKey};

fn list_key(root: &str, params: Value) -> QueryKey {
    QueryKey::new(root).with(params)
}

/// Student keys.
pub mod students {
    use super::*;

    pub const ROOT: &str = "students";
    pub const STATS: &str = "students-stats";

    pub fn all() -> QueryKey {
        QueryKey::new(ROOT)
    }

    pub fn list(params: Value) -> QueryKey {
        list_key(ROOT, params)
    }

    pub fn stats() -> QueryKey {
        QueryKey::new(STATS)
    }
}

/// Teacher keys.
pub mod teachers {
    use super::*;

    pub const ROOT: &str = "teachers";
    pub const STATS: &str = "teachers-stats";

    pub fn all() -> QueryKey {
        QueryKey::new(ROOT)
    }

    pub fn list(params: Value) -> QueryKey {
        list_key(ROOT, params)
    }

    pub fn stats() -> QueryKey {
        QueryKey::new(STATS)
    }
}

/// Parent keys.
pub mod parents {
    use super::*;

    pub const ROOT: &str = "parents";

    pub fn all() -> QueryKey {
        QueryKey::new(ROOT)
    }

    pub fn list(params: Value) -> QueryKey {
        list_key(ROOT, params)
    }
}

/// Course keys.
pub mod courses {
    use super::*;

    pub const ROOT: &str = "courses";

    pub fn all() -> QueryKey {
        QueryKey::new(ROOT)
    }

    pub fn list(params: Value) -> QueryKey {
        list_key(ROOT, params)
    }
}

/// Grade keys.
pub mod grades {
    use super::*;

    pub const ROOT: &str = "grades";
    pub const STATS: &str = "grades-stats";
    pub const AVERAGES: &str = "grades-averages";

    pub fn all() -> QueryKey {
        QueryKey::new(ROOT)
    }

    pub fn list(params: Value) -> QueryKey {
        list_key(ROOT, params)
    }

    pub fn stats() -> QueryKey {
        QueryKey::new(STATS)
    }

    /// Per-course averages, optionally narrowed to one course.
    pub fn averages(params: Value) -> QueryKey {
        list_key(AVERAGES, params)
    }
}

/// Attendance keys.
pub mod attendance {
    use super::*;

    pub const ROOT: &str = "attendance";
    pub const STATS: &str = "attendance-stats";

    pub fn all() -> QueryKey {
        QueryKey::new(ROOT)
    }

    pub fn list(params: Value) -> QueryKey {
        list_key(ROOT, params)
    }

    pub fn stats() -> QueryKey {
        QueryKey::new(STATS)
    }
}

/// Justification keys.
pub mod justifications {
    use super::*;

    pub const ROOT: &str = "justifications";
    pub const STATS: &str = "justifications-stats";

    pub fn all() -> QueryKey {
        QueryKey::new(ROOT)
    }

    pub fn list(params: Value) -> QueryKey {
        list_key(ROOT, params)
    }

    pub fn stats() -> QueryKey {
        QueryKey::new(STATS)
    }
}

/// Calendar keys.
pub mod events {
    use super::*;

    pub const ROOT: &str = "events";
    pub const PUBLIC: &str = "events-public";

    pub fn all() -> QueryKey {
        QueryKey::new(ROOT)
    }

    /// Events within a date range.
    pub fn range(params: Value) -> QueryKey {
        list_key(ROOT, params)
    }

    pub fn public(params: Value) -> QueryKey {
        list_key(PUBLIC, params)
    }
}

/// Messaging keys.
pub mod messages {
    use super::*;

    pub const ROOT: &str = "messages";
    pub const UNREAD: &str = "messages-unread";

    pub fn all() -> QueryKey {
        QueryKey::new(ROOT)
    }

    pub fn list(params: Value) -> QueryKey {
        list_key(ROOT, params)
    }

    pub fn unread_count() -> QueryKey {
        QueryKey::new(UNREAD)
    }
}

/// GPS tracking keys.
pub mod gps {
    use super::*;

    pub const DEVICES: &str = "gps-devices";
    pub const LOCATIONS: &str = "gps-locations";
    pub const HISTORY: &str = "gps-history";

    pub fn devices() -> QueryKey {
        QueryKey::new(DEVICES)
    }

    pub fn locations() -> QueryKey {
        QueryKey::new(LOCATIONS)
    }

    /// Route history of one device. Segment 1 is the device id.
    pub fn history(device_id: &str, params: Value) -> QueryKey {
        QueryKey::new(HISTORY).with(device_id).with(params)
    }
}

/// Report keys.
pub mod reports {
    use super::*;

    pub const ROOT: &str = "reports";

    pub fn all() -> QueryKey {
        QueryKey::new(ROOT)
    }

    pub fn list(params: Value) -> QueryKey {
        list_key(ROOT, params)
    }
}

/// Settings and profile keys.
pub mod settings {
    use super::*;

    pub const ROOT: &str = "settings";
    pub const PROFILE: &str = "profile";

    pub fn school() -> QueryKey {
        QueryKey::new(ROOT)
    }

    pub fn profile() -> QueryKey {
        QueryKey::new(PROFILE)
    }
}

/// Invalidation sets for writes.
///
/// Each function returns every prefix a write of that kind makes stale;
/// mutations register the whole set with
/// [`Mutation::invalidates_all`](crate::Mutation::invalidates_all).
pub mod invalidate {
    use super::*;

    pub fn student_write() -> Vec<QueryKey> {
        vec![students::all(), students::stats()]
    }

    pub fn teacher_write() -> Vec<QueryKey> {
        vec![teachers::all(), teachers::stats()]
    }

    pub fn parent_write() -> Vec<QueryKey> {
        vec![parents::all()]
    }

    /// Linking a student changes both the parent and the student record.
    pub fn parent_link() -> Vec<QueryKey> {
        vec![parents::all(), students::all()]
    }

    pub fn course_write() -> Vec<QueryKey> {
        vec![courses::all()]
    }

    pub fn course_enrollment() -> Vec<QueryKey> {
        vec![courses::all(), students::all()]
    }

    pub fn grade_write() -> Vec<QueryKey> {
        vec![
            grades::all(),
            grades::stats(),
            QueryKey::new(grades::AVERAGES),
        ]
    }

    pub fn attendance_write() -> Vec<QueryKey> {
        vec![attendance::all(), attendance::stats()]
    }

    pub fn justification_write() -> Vec<QueryKey> {
        vec![justifications::all(), justifications::stats()]
    }

    /// Approving or rejecting a justification also rewrites the matching
    /// attendance records on the server.
    pub fn justification_review() -> Vec<QueryKey> {
        vec![
            justifications::all(),
            justifications::stats(),
            attendance::all(),
            attendance::stats(),
        ]
    }

    pub fn event_write() -> Vec<QueryKey> {
        vec![events::all(), QueryKey::new(events::PUBLIC)]
    }

    pub fn message_write() -> Vec<QueryKey> {
        vec![messages::all(), messages::unread_count()]
    }

    pub fn report_generated() -> Vec<QueryKey> {
        vec![reports::all()]
    }

    pub fn settings_write() -> Vec<QueryKey> {
        vec![settings::school()]
    }

    pub fn profile_write() -> Vec<QueryKey> {
        vec![settings::profile()]
    }

    /// Invalidates every prefix in `keys`. Returns the number of entries marked.
    pub fn all(cache: &QueryCache, keys: &[QueryKey]) -> usize {
        keys.iter().map(|key| cache.invalidate(key)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_keys_share_root_prefix() {
        let key = students::list(json!({ "page": 2, "limit": 15 }));
        assert!(key.starts_with(&students::all()));
        assert!(!key.starts_with(&students::stats()));
        assert!(!students::stats().starts_with(&students::all()));
    }

    #[test]
    fn test_history_key_carries_device() {
        let key = gps::history("d-7", json!({}));
        assert_eq!(key.segment_str(1).as_deref(), Some("d-7"));
        assert!(key.starts_with(&QueryKey::new(gps::HISTORY)));
    }

    #[test]
    fn test_justification_review_touches_attendance() {
        let set = invalidate::justification_review();
        assert!(set.contains(&attendance::all()));
        assert!(set.contains(&attendance::stats()));
        assert!(set.contains(&justifications::stats()));
    }

    #[tokio::test]
    async fn test_invalidate_all_counts_entries() {
        let cache = QueryCache::default();
        cache
            .set_query_data(justifications::list(json!({ "page": 1 })), &json!([]))
            .unwrap();
        cache.set_query_data(justifications::stats(), &json!({})).unwrap();
        cache.set_query_data(attendance::stats(), &json!({})).unwrap();
        cache.set_query_data(students::stats(), &json!({})).unwrap();

        let marked = invalidate::all(&cache, &invalidate::justification_review());
        assert_eq!(marked, 3);
    }
}
