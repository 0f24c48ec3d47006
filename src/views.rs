//! 派生视图
//!
//! 每次渲染都从事件集合重新计算，不做缓存也不持久化

use chrono::NaiveDateTime;

use crate::models::Event;

/// 四个只读视图
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedViews {
    /// 日期 >= now，升序
    pub upcoming: Vec<Event>,
    /// 日期 < now，降序
    pub past: Vec<Event>,
    pub searched_upcoming: Vec<Event>,
    pub searched_past: Vec<Event>,
}

/// 统计数据（不受搜索影响）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub upcoming: usize,
    pub past: usize,
}

/// 空状态提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoEvents,
    NoMatches,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            EmptyState::NoEvents => "No events added yet. Create one above!",
            EmptyState::NoMatches => "No events match your search.",
        }
    }
}

/// 计算派生视图
pub fn derive_views(events: &[Event], now: NaiveDateTime, search: &str) -> DerivedViews {
    let (mut upcoming, mut past): (Vec<Event>, Vec<Event>) =
        events.iter().cloned().partition(|e| e.is_upcoming(now));

    // sort_by 是稳定排序，相同日期保持插入顺序
    upcoming.sort_by(|a, b| a.date.cmp(&b.date));
    past.sort_by(|a, b| b.date.cmp(&a.date));

    let needle = search.to_lowercase();
    let filter = |list: &[Event]| -> Vec<Event> {
        list.iter().filter(|e| e.matches(&needle)).cloned().collect()
    };

    DerivedViews {
        searched_upcoming: filter(&upcoming),
        searched_past: filter(&past),
        upcoming,
        past,
    }
}

impl DerivedViews {
    pub fn stats(&self) -> Stats {
        Stats {
            total: self.upcoming.len() + self.past.len(),
            upcoming: self.upcoming.len(),
            past: self.past.len(),
        }
    }

    /// "Next Upcoming Events" 区域，最多 limit 条
    pub fn next_upcoming(&self, limit: usize) -> &[Event] {
        let end = self.searched_upcoming.len().min(limit);
        &self.searched_upcoming[..end]
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.upcoming.is_empty() && self.past.is_empty() {
            Some(EmptyState::NoEvents)
        } else if self.searched_upcoming.is_empty() && self.searched_past.is_empty() {
            Some(EmptyState::NoMatches)
        } else {
            None
        }
    }

    /// 屏幕上实际显示的事件（可选中、可删除）
    pub fn displayed(&self, limit: usize) -> Vec<&Event> {
        self.next_upcoming(limit)
            .iter()
            .chain(self.searched_past.iter())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn now() -> NaiveDateTime {
        date("2024-06-15").and_hms_opt(9, 30, 0).unwrap()
    }

    fn sample() -> Vec<Event> {
        vec![
            Event::new(1, "Conference", date("2024-09-01")),
            Event::new(2, "Old Meetup", date("2000-01-01")),
            Event::new(3, "Launch", date("2999-01-01")),
            Event::new(4, "Birthday", date("2024-06-14")),
            Event::new(5, "Standup", date("2024-06-16")),
            Event::new(6, "Retro", date("2024-06-15")),
        ]
    }

    #[test]
    fn test_partition_covers_collection() {
        let events = sample();
        let views = derive_views(&events, now(), "");

        assert_eq!(views.upcoming.len() + views.past.len(), events.len());
        for event in &events {
            let in_up = views.upcoming.contains(event);
            let in_past = views.past.contains(event);
            assert!(in_up ^ in_past, "{} must be in exactly one view", event.name);
        }
        // 当天 00:00 已早于 now
        assert!(views.past.iter().any(|e| e.name == "Retro"));
    }

    #[test]
    fn test_ordering() {
        let views = derive_views(&sample(), now(), "");

        assert!(views.upcoming.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(views.past.windows(2).all(|w| w[0].date >= w[1].date));

        let names: Vec<_> = views.upcoming.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Standup", "Conference", "Launch"]);
        let names: Vec<_> = views.past.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Retro", "Birthday", "Old Meetup"]);
    }

    #[test]
    fn test_equal_dates_keep_insertion_order() {
        let events = vec![
            Event::new(10, "first", date("2030-01-01")),
            Event::new(5, "second", date("2030-01-01")),
            Event::new(7, "third", date("2030-01-01")),
        ];
        let views = derive_views(&events, now(), "");
        let ids: Vec<_> = views.upcoming.iter().map(|e| e.id).collect();
        assert_eq!(ids, [10, 5, 7]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let views = derive_views(&sample(), now(), "LaUn");
        assert_eq!(views.searched_upcoming.len(), 1);
        assert_eq!(views.searched_upcoming[0].name, "Launch");
        assert!(views.searched_past.is_empty());

        // 统计不受搜索影响
        assert_eq!(views.stats(), Stats { total: 6, upcoming: 3, past: 3 });

        let views = derive_views(&sample(), now(), "E");
        let expected = sample()
            .iter()
            .filter(|e| e.name.to_lowercase().contains('e'))
            .count();
        let got = views.searched_upcoming.len() + views.searched_past.len();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_next_upcoming_truncates() {
        let events: Vec<_> = (1..=5)
            .map(|i| Event::new(i, format!("e{i}"), date(&format!("2030-01-0{i}"))))
            .collect();
        let views = derive_views(&events, now(), "");

        let next = views.next_upcoming(3);
        assert_eq!(next.len(), 3);
        assert_eq!(next[0].name, "e1");
        assert_eq!(views.next_upcoming(10).len(), 5);
        assert_eq!(views.displayed(3).len(), 3);
    }

    #[test]
    fn test_empty_states() {
        let views = derive_views(&[], now(), "");
        assert_eq!(views.empty_state(), Some(EmptyState::NoEvents));

        let views = derive_views(&sample(), now(), "zzz");
        assert_eq!(views.empty_state(), Some(EmptyState::NoMatches));

        let views = derive_views(&sample(), now(), "");
        assert_eq!(views.empty_state(), None);
    }
}
