use crate::events::models::EventQuery;
use crate::events::source::EventSource;
use crate::navigation::models::NavigationState;

/// Number of the page next to the current one, if there is one.
///
/// Going back only needs the running count. Going forward is only possible
/// after a full page, and then costs a one-row request to the source. A
/// failed request counts as "no next page".
pub async fn adjacent_page_exists<ES: EventSource>(
    source: &ES,
    navigation: &NavigationState,
    search: &EventQuery,
    forward: bool,
) -> Option<usize> {
    let page = navigation.current_page();
    if !forward {
        return (page > 0).then(|| (page - 1) as usize);
    }
    if !navigation.last_page_was_full() {
        return None;
    }
    let next_page = (page + 1) as usize;
    let found = match search.probe(next_page) {
        Ok(query) => source.probe(&query).await,
        Err(e) => Err(e),
    };
    match found {
        Ok(found) if found > 0 => Some(next_page),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(
                task = "page_probe",
                page = next_page,
                error = %e,
                "Page probe failed, treating the page as missing."
            );
            None
        }
    }
}
