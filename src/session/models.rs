use crate::error::Result;
use crate::events::models::{EventFilters, EventQuery, EventRecord};
use crate::map::dedup::group_by_location;
use crate::map::models::{DisplayPoint, GroupingPolicy};
use crate::map::viewpoint::Viewpoint;
use crate::navigation::models::NavigationState;

/// Everything one map session knows, owned by whoever drives the session.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub points: Vec<DisplayPoint>,
    pub navigation: NavigationState,
    pub search: EventQuery,
    pub viewpoint: Viewpoint,
    pub grouping: GroupingPolicy,
}

impl SessionState {
    pub fn new(text: impl Into<String>, filters: EventFilters, grouping: GroupingPolicy) -> Self {
        Self {
            points: Vec::new(),
            navigation: NavigationState::new(),
            search: EventQuery::search(text, filters),
            viewpoint: Viewpoint::initial(),
            grouping,
        }
    }

    /// Drops the current points before grouping `records`, so a failed batch
    /// leaves no points behind rather than stale ones.
    pub fn replace_points(&mut self, records: &[EventRecord]) -> Result<()> {
        self.points.clear();
        self.navigation.reset_cursor();
        self.points = group_by_location(records, self.grouping)?;
        Ok(())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new("", EventFilters::default(), GroupingPolicy::Exact)
    }
}
