//! Lifecycle of one interactive map view.
//!
//! Control flow is linear: mount with a prebuilt lookup, fetch the geometry,
//! convert it, join and style the features, then hand them to the surface. The
//! surface is owned by the view and released on `unmount` or drop, whichever
//! comes first, including when the view is torn down before the fetch resolves.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use geo_ingest::{GeometryConverter, GeometrySource};
use metrics::{counter, gauge};
use tracing::{debug, error, info, instrument};

use crate::{DistrictLookup, InteractionHandlers, MapSurface, join_features};

/// Shared flag cleared when the owning view goes away.
#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Mark the view as torn down; pending loads discard their data.
    pub fn tear_down(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Shapes were drawn. `unmatched` counts features without a record.
    Rendered { shapes: usize, unmatched: usize },
    /// Fetch or conversion failed; the map layer is left empty.
    Failed,
    /// The view was torn down before the data could be applied.
    Discarded,
}

impl LoadOutcome {
    pub fn label(self) -> &'static str {
        match self {
            LoadOutcome::Rendered { .. } => "rendered",
            LoadOutcome::Failed => "failed",
            LoadOutcome::Discarded => "discarded",
        }
    }
}

pub struct MapView<S: MapSurface> {
    lookup: Arc<DistrictLookup>,
    surface: Option<S>,
    handlers: InteractionHandlers,
    liveness: Liveness,
}

impl<S: MapSurface> MapView<S> {
    /// Take ownership of `surface` for the lifetime of the view.
    pub fn mount(lookup: Arc<DistrictLookup>, surface: S) -> Self {
        gauge!("district_map_surfaces_active").increment(1.0);
        Self {
            lookup,
            surface: Some(surface),
            handlers: InteractionHandlers::default(),
            liveness: Liveness::new(),
        }
    }

    pub fn with_handlers(mut self, handlers: InteractionHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    /// `None` once the view has been torn down.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Fetch, convert, join and draw the district layer.
    ///
    /// Failures are logged and swallowed; nothing is retried.
    #[instrument(skip_all, fields(source = %source.location()))]
    pub async fn load<G, C>(&mut self, source: &G, converter: &C) -> LoadOutcome
    where
        G: GeometrySource + ?Sized,
        C: GeometryConverter + ?Sized,
    {
        let outcome = self.load_inner(source, converter).await;
        counter!("district_map_loads_total", "outcome" => outcome.label()).increment(1);
        outcome
    }

    async fn load_inner<G, C>(&mut self, source: &G, converter: &C) -> LoadOutcome
    where
        G: GeometrySource + ?Sized,
        C: GeometryConverter + ?Sized,
    {
        if !self.is_live() {
            debug!("map view already torn down; skipping geometry fetch");
            return LoadOutcome::Discarded;
        }

        let raw = match source.fetch().await {
            Ok(raw) => raw,
            Err(err) => {
                error!("Failed to load map data: {err}");
                debug!(?err, "geometry fetch error detail");
                return LoadOutcome::Failed;
            }
        };

        if !self.is_live() {
            debug!("map view torn down while geometry was in flight; discarding");
            self.release();
            return LoadOutcome::Discarded;
        }

        let features = match converter.convert(&raw) {
            Ok(features) => features,
            Err(err) => {
                error!("Failed to load map data: {err}");
                return LoadOutcome::Failed;
            }
        };

        let shapes = match join_features(&self.lookup, features) {
            Ok(shapes) => shapes,
            Err(err) => {
                error!("Failed to load map data: {err}");
                return LoadOutcome::Failed;
            }
        };
        let total = shapes.len();
        let unmatched = shapes.iter().filter(|shape| !shape.is_joined()).count();

        let Some(surface) = self.surface.as_mut() else {
            return LoadOutcome::Discarded;
        };
        if let Err(err) = surface.render_shapes(shapes, &self.handlers) {
            debug!("surface refused shapes: {err}");
            return LoadOutcome::Discarded;
        }

        if unmatched > 0 {
            info!("rendered {total} district shapes, {unmatched} without a record");
        } else {
            info!("rendered {total} district shapes");
        }
        LoadOutcome::Rendered {
            shapes: total,
            unmatched,
        }
    }

    /// Tear the view down and release its surface.
    pub fn unmount(mut self) {
        self.release();
    }

    fn is_live(&self) -> bool {
        self.liveness.is_alive() && self.surface.is_some()
    }

    fn release(&mut self) {
        self.liveness.tear_down();
        if let Some(mut surface) = self.surface.take() {
            surface.release();
            gauge!("district_map_surfaces_active").decrement(1.0);
        }
    }
}

impl<S: MapSurface> Drop for MapView<S> {
    fn drop(&mut self) {
        self.release();
    }
}
