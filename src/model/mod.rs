mod event;
mod params;
mod persist;
mod presets;

pub use event::ModelEvent;
pub use params::{BoundaryField, EllipseField, EllipseParams, RegionsParameters};
pub use persist::PROPERTY_PREFIX;
pub use presets::Preset;

use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::geometry::{Bounds, EllipseKind};
use crate::math::{reflect_through, Point2};
use crate::operations::{BuildBoundaries, PointClassifier};
use crate::regions::{BoundaryRay, RegionBoundary};

#[derive(Debug)]
struct ModelState {
    params: RegionsParameters,
    config: ClassifierConfig,
    bounds: Option<Bounds>,
    classifier: Option<Arc<PointClassifier>>,
    subscribers: Vec<Sender<ModelEvent>>,
}

impl ModelState {
    fn notify(&mut self, events: &[ModelEvent]) {
        self.subscribers
            .retain(|tx| events.iter().all(|event| tx.send(*event).is_ok()));
    }

    /// Builds a classifier from `params` without touching the state.
    fn build_classifier(
        &self,
        params: &RegionsParameters,
        bounds: Bounds,
    ) -> Result<Arc<PointClassifier>> {
        let (background, maximum) = params.ellipses()?;
        let classifier = PointClassifier::new(
            &background,
            &maximum,
            &params.boundaries,
            bounds,
            self.config.normalization,
        )?;
        Ok(Arc::new(classifier))
    }
}

/// Observable owner of the ellipse and boundary parameters and of the
/// classifier built from them.
///
/// Every mutation runs under one lock: a recompute, the classifier rebuild
/// and the resulting notifications are seen by subscribers as a single
/// change. Failed recomputes leave the previous state in place.
#[derive(Debug)]
pub struct EllipseRegionsModel {
    state: Mutex<ModelState>,
}

impl Default for EllipseRegionsModel {
    fn default() -> Self {
        Self::with_valid_config(ClassifierConfig::default())
    }
}

impl EllipseRegionsModel {
    /// Creates an empty model with every parameter unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: ClassifierConfig) -> Self {
        Self {
            state: Mutex::new(ModelState {
                params: RegionsParameters::default(),
                config,
                bounds: None,
                classifier: None,
                subscribers: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ModelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new listener. Dropped receivers are pruned on the next
    /// notification.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<ModelEvent> {
        let (tx, rx) = mpsc::channel();
        self.lock().subscribers.push(tx);
        rx
    }

    /// A copy of the current parameters.
    #[must_use]
    pub fn snapshot(&self) -> RegionsParameters {
        self.lock().params
    }

    #[must_use]
    pub fn config(&self) -> ClassifierConfig {
        self.lock().config
    }

    /// The current classifier, if one has been built.
    #[must_use]
    pub fn classifier(&self) -> Option<Arc<PointClassifier>> {
        self.lock().classifier.clone()
    }

    /// The bounds the current classifier was built for.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.lock().bounds
    }

    #[must_use]
    pub fn ellipse(&self, kind: EllipseKind) -> EllipseParams {
        *self.lock().params.ellipse(kind)
    }

    pub fn set_ellipse(&self, kind: EllipseKind, ellipse: EllipseParams) {
        let mut state = self.lock();
        *state.params.ellipse_mut(kind) = ellipse;
        state.notify(&[ModelEvent::EllipsesUpdated]);
    }

    pub fn set_ellipse_field(&self, kind: EllipseKind, field: EllipseField, value: f64) {
        let mut state = self.lock();
        state.params.ellipse_mut(kind).set(field, value);
        state.notify(&[ModelEvent::EllipsesUpdated]);
    }

    /// Applies a regression slope to both ellipses as one update.
    pub fn set_trend_slope(&self, slope: f64) {
        let mut state = self.lock();
        for kind in EllipseKind::ALL {
            state.params.ellipse_mut(kind).slope = slope;
        }
        state.notify(&[ModelEvent::EllipsesUpdated]);
    }

    #[must_use]
    pub fn symmetric_regions(&self) -> bool {
        self.lock().params.symmetric_regions
    }

    pub fn set_symmetric_regions(&self, symmetric: bool) {
        let mut state = self.lock();
        state.params.symmetric_regions = symmetric;
        state.notify(&[ModelEvent::RegionSymmetryUpdated]);
    }

    #[must_use]
    pub fn boundary(&self, slot: RegionBoundary) -> BoundaryRay {
        self.lock().params.boundaries[slot]
    }

    /// Replaces one boundary ray.
    ///
    /// With symmetric regions on, the reflected slot receives the mirror
    /// image of the ray through the background center.
    pub fn set_boundary(&self, slot: RegionBoundary, ray: BoundaryRay) {
        self.update_boundary(slot, |current| *current = ray);
    }

    /// Sets one coordinate of a boundary ray, mirrored like
    /// [`set_boundary`](Self::set_boundary).
    pub fn set_boundary_field(&self, slot: RegionBoundary, field: BoundaryField, value: f64) {
        self.update_boundary(slot, |ray| field.set(ray, value));
    }

    /// Edits one ray, mirrors it and notifies, all under one lock.
    fn update_boundary(&self, slot: RegionBoundary, edit: impl FnOnce(&mut BoundaryRay)) {
        let mut state = self.lock();
        let params = &mut state.params;
        edit(&mut params.boundaries[slot]);
        if params.symmetric_regions {
            mirror_into_partner(params, slot);
        }
        state.notify(&[ModelEvent::RegionBoundariesUpdated]);
    }

    /// Solves all ten boundaries for the current ellipses inside `bounds`
    /// and rebuilds the classifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the ellipses are incomplete or invalid, if the
    /// solver fails, or if the resulting regions cannot be built. The model
    /// is left unchanged on error.
    pub fn recompute_regions(&self, bounds: Bounds) -> Result<()> {
        let mut state = self.lock();
        let result = state.params.ellipses().and_then(|(background, maximum)| {
            let boundaries = BuildBoundaries::new(&background, &maximum, bounds).execute()?;
            let mut params = state.params;
            params.boundaries = boundaries;
            let classifier = state.build_classifier(&params, bounds)?;
            Ok((params, classifier))
        });
        match result {
            Ok((params, classifier)) => {
                state.params = params;
                state.bounds = Some(bounds);
                state.classifier = Some(classifier);
                tracing::debug!(?bounds, "recomputed ellipse regions");
                state.notify(&[
                    ModelEvent::RegionBoundariesUpdated,
                    ModelEvent::ClassifierRebuilt,
                ]);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "rejected region recompute");
                Err(err)
            }
        }
    }

    /// Rebuilds the classifier from the current, possibly hand-edited,
    /// boundaries.
    ///
    /// # Errors
    ///
    /// Returns an error if the regions cannot be built; the previous
    /// classifier is kept.
    pub fn rebuild_classifier(&self, bounds: Bounds) -> Result<()> {
        let mut state = self.lock();
        let built = state.build_classifier(&state.params, bounds);
        match built {
            Ok(classifier) => {
                state.bounds = Some(bounds);
                state.classifier = Some(classifier);
                tracing::debug!(?bounds, "rebuilt classifier");
                state.notify(&[ModelEvent::ClassifierRebuilt]);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "rejected classifier rebuild");
                Err(err)
            }
        }
    }

    /// Changes the classifier configuration, rebuilding the classifier if
    /// one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the rebuild
    /// fails; the model is left unchanged on error.
    pub fn set_config(&self, config: ClassifierConfig) -> Result<()> {
        config.validate()?;
        let mut state = self.lock();
        let previous = state.config;
        state.config = config;
        if state.classifier.is_none() {
            return Ok(());
        }
        let Some(bounds) = state.bounds else {
            return Ok(());
        };
        let built = state.build_classifier(&state.params, bounds);
        match built {
            Ok(classifier) => {
                state.classifier = Some(classifier);
                state.notify(&[ModelEvent::ClassifierRebuilt]);
                Ok(())
            }
            Err(err) => {
                state.config = previous;
                tracing::warn!(%err, "rejected configuration change");
                Err(err)
            }
        }
    }

    /// Seeds the model from a preset, keeping the symmetry flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset's regions cannot be built.
    pub fn apply_preset(&self, preset: &Preset) -> Result<()> {
        let mut state = self.lock();
        let params = RegionsParameters {
            symmetric_regions: state.params.symmetric_regions,
            background: preset.background,
            maximum: preset.maximum,
            boundaries: preset.boundaries,
        };
        let classifier = state.build_classifier(&params, preset.bounds)?;
        state.params = params;
        state.bounds = Some(preset.bounds);
        state.classifier = Some(classifier);
        tracing::info!(preset = preset.name, "applied ellipse preset");
        state.notify(&[
            ModelEvent::EllipsesUpdated,
            ModelEvent::RegionBoundariesUpdated,
            ModelEvent::ClassifierRebuilt,
        ]);
        Ok(())
    }

    /// Flattens the parameters into persisted key/value properties.
    #[must_use]
    pub fn to_properties(&self) -> BTreeMap<String, String> {
        persist::write_properties(&self.lock().params)
    }

    /// Replaces the parameters with persisted properties.
    ///
    /// When the loaded boundaries are complete, the bounds are recovered as
    /// the box enclosing their outer points and the classifier is rebuilt;
    /// those bounds are returned. Otherwise the classifier is cleared and
    /// `None` is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed or the loaded regions
    /// cannot be built. The model is left unchanged on error.
    pub fn load_properties(&self, map: &BTreeMap<String, String>) -> Result<Option<Bounds>> {
        let params = persist::read_properties(map)?;
        let mut state = self.lock();

        let rebuilt = if params.boundaries.is_finite() {
            let bounds = Bounds::enclosing_outer_points(&params.boundaries)?;
            let classifier = state.build_classifier(&params, bounds)?;
            Some((bounds, classifier))
        } else {
            None
        };

        state.params = params;
        let mut events = vec![
            ModelEvent::RegionSymmetryUpdated,
            ModelEvent::EllipsesUpdated,
            ModelEvent::RegionBoundariesUpdated,
        ];
        let bounds = match rebuilt {
            Some((bounds, classifier)) => {
                state.bounds = Some(bounds);
                state.classifier = Some(classifier);
                events.push(ModelEvent::ClassifierRebuilt);
                Some(bounds)
            }
            None => {
                state.bounds = None;
                state.classifier = None;
                None
            }
        };
        tracing::debug!(complete = bounds.is_some(), "loaded ellipse regions");
        state.notify(&events);
        Ok(bounds)
    }
}

/// Writes the mirror image of `slot` into its reflected partner.
fn mirror_into_partner(params: &mut RegionsParameters, slot: RegionBoundary) {
    let center = Point2::new(params.background.center_x, params.background.center_y);
    if !(center.x.is_finite() && center.y.is_finite()) {
        return;
    }
    let ray = params.boundaries[slot];
    params.boundaries[slot.reflected()] = BoundaryRay::new(
        reflect_through(&ray.outer, &center),
        reflect_through(&ray.inner, &center),
    );
}
