//! Circular ring of open tabs.
//!
//! Tabs live in an arena and link to each other by index, so the ring
//! needs no shared ownership. There is no close operation: tabs are
//! dropped with the ring.

use serde::Serialize;
use surf_types::error::{Result, SurfError};

use crate::url::clamp_url;

/// Most tabs that can be open at once.
pub const MAX_TABS: usize = 10;

#[derive(Debug, Clone)]
struct Tab {
    url: String,
    next: usize,
    prev: usize,
}

/// A tab as listed for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    /// 1-based index relative to the current tab (what `switch_to` takes).
    pub index: usize,
    pub url: String,
    pub is_current: bool,
}

/// Ring of tabs with a current cursor.
#[derive(Debug, Clone)]
pub struct TabRing {
    tabs: Vec<Tab>,
    current: Option<usize>,
}

impl Default for TabRing {
    fn default() -> Self {
        Self::new()
    }
}

impl TabRing {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            current: None,
        }
    }

    /// Open a tab right after the current one and make it current.
    ///
    /// A full ring is refused with [`SurfError::CapacityExceeded`] and left
    /// as it was.
    pub fn open(&mut self, url: &str) -> Result<()> {
        if self.is_full() {
            return Err(SurfError::CapacityExceeded { capacity: MAX_TABS });
        }
        self.tabs
            .try_reserve(1)
            .map_err(|e| SurfError::Allocation(format!("tab: {e}")))?;

        let id = self.tabs.len();
        match self.current {
            None => {
                self.tabs.push(Tab {
                    url: clamp_url(url),
                    next: id,
                    prev: id,
                });
            },
            Some(cur) => {
                let after = self.tabs[cur].next;
                self.tabs.push(Tab {
                    url: clamp_url(url),
                    next: after,
                    prev: cur,
                });
                self.tabs[after].prev = id;
                self.tabs[cur].next = id;
            },
        }
        self.current = Some(id);
        Ok(())
    }

    /// Make the `index`-th tab current, counting forward from the current
    /// tab (index 1 is the current tab itself).
    ///
    /// Numbering is relative, so the same index can reach a different tab
    /// after the cursor moves. The walk goes whichever way round is shorter.
    pub fn switch_to(&mut self, index: usize) -> Result<()> {
        let Some(mut id) = self.current else {
            return Err(SurfError::InvalidIndex { index, max: 0 });
        };
        if index < 1 || index > self.tabs.len() {
            return Err(SurfError::InvalidIndex {
                index,
                max: self.tabs.len(),
            });
        }
        let forward = index - 1;
        let backward = self.tabs.len() - forward;
        if forward <= backward {
            for _ in 0..forward {
                id = self.tabs[id].next;
            }
        } else {
            for _ in 0..backward {
                id = self.tabs[id].prev;
            }
        }
        self.current = Some(id);
        Ok(())
    }

    /// One full trip around the ring starting at the current tab.
    pub fn list(&self) -> Vec<TabView> {
        self.iter()
            .enumerate()
            .map(|(i, url)| TabView {
                index: i + 1,
                url: url.to_string(),
                is_current: i == 0,
            })
            .collect()
    }

    /// URLs from the current tab around the ring.
    pub fn iter(&self) -> RingIter<'_> {
        RingIter {
            ring: self,
            next: self.current,
            remaining: self.tabs.len(),
        }
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current.map(|id| self.tabs[id].url.as_str())
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tabs.len() >= MAX_TABS
    }
}

/// Iterator over one trip around a [`TabRing`].
pub struct RingIter<'a> {
    ring: &'a TabRing,
    next: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for RingIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.next?;
        let tab = &self.ring.tabs[id];
        self.remaining -= 1;
        self.next = Some(tab.next);
        Some(tab.url.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_of(urls: &[&str]) -> TabRing {
        let mut ring = TabRing::new();
        for url in urls {
            ring.open(url).unwrap();
        }
        ring
    }

    #[test]
    fn first_tab_is_ring_of_one() {
        let ring = ring_of(&["home"]);
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.current_url(), Some("home"));
        assert_eq!(ring.iter().collect::<Vec<_>>(), ["home"]);
    }

    #[test]
    fn open_inserts_after_current() {
        let mut ring = ring_of(&["a.com", "b.com", "c.com"]);
        // c is current; ring order from c: c, a, b
        assert_eq!(ring.iter().collect::<Vec<_>>(), ["c.com", "a.com", "b.com"]);

        // Move to a (2nd from c) then open d right after it.
        ring.switch_to(2).unwrap();
        assert_eq!(ring.current_url(), Some("a.com"));
        ring.open("d.com").unwrap();
        assert_eq!(
            ring.iter().collect::<Vec<_>>(),
            ["d.com", "b.com", "c.com", "a.com"]
        );
        // Index 4 is reached by one step back along the ring.
        ring.switch_to(4).unwrap();
        assert_eq!(ring.current_url(), Some("a.com"));
    }

    #[test]
    fn eleventh_open_is_refused() {
        let mut ring = TabRing::new();
        for i in 0..MAX_TABS {
            ring.open(&format!("site{i}.com")).unwrap();
        }
        let before: Vec<String> = ring.iter().map(str::to_string).collect();

        let err = ring.open("overflow.com").unwrap_err();
        assert!(matches!(err, SurfError::CapacityExceeded { capacity: 10 }));
        assert_eq!(ring.len(), MAX_TABS);
        let after: Vec<String> = ring.iter().map(str::to_string).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn switch_to_one_is_noop() {
        let mut ring = ring_of(&["a.com", "b.com", "c.com"]);
        ring.switch_to(1).unwrap();
        assert_eq!(ring.current_url(), Some("c.com"));
    }

    #[test]
    fn switch_is_relative_to_current() {
        let mut ring = ring_of(&["a.com", "b.com", "c.com"]);
        ring.switch_to(2).unwrap();
        assert_eq!(ring.current_url(), Some("a.com"));
        // Same index again reaches a different tab.
        ring.switch_to(2).unwrap();
        assert_eq!(ring.current_url(), Some("b.com"));
    }

    #[test]
    fn switch_out_of_range_is_rejected() {
        let mut ring = ring_of(&["a.com", "b.com"]);
        assert!(matches!(
            ring.switch_to(0),
            Err(SurfError::InvalidIndex { index: 0, max: 2 })
        ));
        assert!(matches!(
            ring.switch_to(3),
            Err(SurfError::InvalidIndex { index: 3, max: 2 })
        ));
        assert_eq!(ring.current_url(), Some("b.com"));
    }

    #[test]
    fn switch_on_empty_ring() {
        let mut ring = TabRing::new();
        assert!(matches!(
            ring.switch_to(1),
            Err(SurfError::InvalidIndex { max: 0, .. })
        ));
    }

    #[test]
    fn list_marks_current_first() {
        let ring = ring_of(&["a.com", "b.com"]);
        let views = ring.list();
        assert_eq!(views.len(), 2);
        assert!(views[0].is_current);
        assert_eq!(views[0].url, "b.com");
        assert_eq!(views[1].index, 2);
        assert!(!views[1].is_current);
    }

    #[test]
    fn list_empty_ring() {
        assert!(TabRing::new().list().is_empty());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn count_never_exceeds_capacity(n in 0usize..30) {
                let mut ring = TabRing::new();
                for i in 0..n {
                    let _ = ring.open(&format!("t{i}.com"));
                }
                prop_assert_eq!(ring.len(), n.min(MAX_TABS));
                prop_assert!(ring.is_full() == (n >= MAX_TABS));
            }

            #[test]
            fn switch_one_keeps_current(n in 1usize..=MAX_TABS, moves in proptest::collection::vec(1usize..=10, 0..10)) {
                let mut ring = TabRing::new();
                for i in 0..n {
                    ring.open(&format!("t{i}.com")).unwrap();
                }
                for m in moves {
                    let _ = ring.switch_to(m);
                }
                let before = ring.current_url().map(str::to_string);
                ring.switch_to(1).unwrap();
                prop_assert_eq!(ring.current_url().map(str::to_string), before);
            }

            #[test]
            fn switch_lands_on_listed_tab(n in 1usize..=MAX_TABS, pick in 1usize..=MAX_TABS, index in 1usize..=MAX_TABS) {
                let mut ring = TabRing::new();
                for i in 0..n {
                    ring.open(&format!("t{i}.com")).unwrap();
                }
                let _ = ring.switch_to(pick);
                let listed: Vec<String> = ring.iter().map(str::to_string).collect();
                match listed.get(index - 1) {
                    Some(url) => {
                        ring.switch_to(index).unwrap();
                        prop_assert_eq!(ring.current_url(), Some(url.as_str()));
                    },
                    None => prop_assert!(ring.switch_to(index).is_err()),
                }
            }
        }
    }
}
