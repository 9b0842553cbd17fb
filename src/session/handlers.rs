use crate::error::Result;
use crate::events::models::EventQuery;
use crate::events::source::EventSource;
use crate::map::consts::PAN_DURATION_SECS;
use crate::map::markers::layout_markers;
use crate::map::models::LatLng;
use crate::map::viewpoint::{AnimationCurve, Viewpoint};
use crate::navigation::pages::adjacent_page_exists;
use crate::session::message_types::{SessionEvent, SurfaceCommand};
use crate::session::models::SessionState;
use tokio::time::Instant;

pub struct SessionHandler<ES: EventSource> {
    source: ES,
    state: SessionState,
}

impl<ES> SessionHandler<ES>
where
    ES: EventSource,
{
    pub fn new(source: ES, state: SessionState) -> Self {
        Self { source, state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Loads the session's default search and frames the whole country.
    pub async fn start(&mut self) -> Result<Vec<SurfaceCommand>> {
        let query = self.state.search.clone();
        let fetched = self.source.fetch(&query).await?;
        self.state.navigation.reset_for_new_search();
        self.state.navigation.record_batch(fetched.len());
        let mut commands = self.render_latest(false).await?;
        self.state.viewpoint = Viewpoint::initial();
        commands.push(SurfaceCommand::SetViewpoint {
            viewpoint: self.state.viewpoint,
        });
        Ok(commands)
    }

    pub async fn dispatch(&mut self, event: SessionEvent) -> Result<Vec<SurfaceCommand>> {
        let start_time = Instant::now();
        let event_type = event.event_type();
        let result = match event {
            SessionEvent::Search { text } => self.on_search(text).await,
            SessionEvent::PageRequested { page } => self.on_page_requested(page).await,
            SessionEvent::MoreRequested => self.on_more_requested().await,
            SessionEvent::MarkerClicked { id } => Ok(self.on_marker_clicked(id)),
            SessionEvent::StepRequested { forward } => Ok(self.on_step_requested(forward)),
            SessionEvent::PageProbe { forward } => Ok(self.on_page_probe(forward).await),
            SessionEvent::ZoomRequested { magnify } => Ok(self.on_zoom_requested(magnify)),
        };
        let processing_time_ns = start_time.elapsed().as_nanos();
        match &result {
            Ok(commands) => tracing::info!(
                task = "session_event",
                event_type,
                commands = commands.len(),
                cursor = self.state.navigation.current_index(),
                points = self.state.points.len(),
                total_results = self.state.navigation.total_result_count(),
                processing_time_ms = processing_time_ns / 1_000_000,
            ),
            Err(e) => tracing::error!(
                task = "session_event",
                event_type,
                error = %e,
                processing_time_ms = processing_time_ns / 1_000_000,
            ),
        }
        result
    }

    async fn on_search(&mut self, text: String) -> Result<Vec<SurfaceCommand>> {
        let query = EventQuery::search(text, self.state.search.filters.clone());
        let fetched = self.source.fetch(&query).await?;
        self.state.search = query;
        self.state.navigation.reset_for_new_search();
        self.state.navigation.record_batch(fetched.len());
        self.render_latest(true).await
    }

    async fn on_page_requested(&mut self, page: usize) -> Result<Vec<SurfaceCommand>> {
        let query = self.state.search.page(page)?;
        let fetched = self.source.fetch(&query).await?;
        self.state.navigation.rewind_to_page(page);
        self.state.navigation.record_batch(fetched.len());
        self.render_latest(true).await
    }

    async fn on_more_requested(&mut self) -> Result<Vec<SurfaceCommand>> {
        let Some(next_page) = self.state.navigation.next_page() else {
            tracing::debug!(task = "more_results", "No further page to append.");
            return Ok(Vec::new());
        };
        let query = self.state.search.appended_page(next_page)?;
        let fetched = self.source.fetch(&query).await?;
        self.state.navigation.record_batch(fetched.len());
        self.render_latest(false).await
    }

    fn on_marker_clicked(&mut self, id: Option<usize>) -> Vec<SurfaceCommand> {
        let Some(index) = id else {
            return Vec::new();
        };
        if !self.state.navigation.select(index, self.state.points.len()) {
            tracing::debug!(task = "marker_click", id = index, "Click on an unknown marker.");
            return Vec::new();
        }
        let center = self.state.points[index].position;
        vec![self.pan_to(center)]
    }

    fn on_step_requested(&mut self, forward: bool) -> Vec<SurfaceCommand> {
        match self
            .state
            .navigation
            .step_marker(forward, self.state.points.len())
        {
            Some(index) => {
                let center = self.state.points[index].position;
                vec![self.pan_to(center)]
            }
            None => Vec::new(),
        }
    }

    async fn on_page_probe(&self, forward: bool) -> Vec<SurfaceCommand> {
        let page = adjacent_page_exists(
            &self.source,
            &self.state.navigation,
            &self.state.search,
            forward,
        )
        .await;
        vec![SurfaceCommand::PageAvailability { forward, page }]
    }

    fn on_zoom_requested(&mut self, magnify: bool) -> Vec<SurfaceCommand> {
        self.state.viewpoint = self.state.viewpoint.zoomed(magnify);
        vec![SurfaceCommand::SetScale {
            scale: self.state.viewpoint.scale,
        }]
    }

    /// Regroups the source's latest batch and redraws every marker.
    async fn render_latest(&mut self, pan_to_first: bool) -> Result<Vec<SurfaceCommand>> {
        let batch = self.source.latest().await;
        self.state.replace_points(&batch)?;
        let mut commands = vec![SurfaceCommand::ReplaceGraphics {
            graphics: layout_markers(&self.state.points),
        }];
        if pan_to_first {
            if let Some(first) = self.state.points.first() {
                let center = first.position;
                commands.push(self.pan_to(center));
            }
        }
        Ok(commands)
    }

    fn pan_to(&mut self, center: LatLng) -> SurfaceCommand {
        self.state.viewpoint = Viewpoint::focused_on(center);
        SurfaceCommand::PanTo {
            viewpoint: self.state.viewpoint,
            duration_secs: PAN_DURATION_SECS,
            curve: AnimationCurve::EaseInOutCubic,
        }
    }
}
