//! A plane: one coordinate mapper shared by many curves.
//!
//! The plane owns every registered [`CurveModel`], keeps their explicit
//! bounds anchored to the canvas as zoom and size change, retains geometry
//! for static curves, and drives a frame (advance bounds, then draw).

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use log::{debug, error};

use crate::config::PlaneConfig;
use crate::coord_mapper::CoordinateMapper;
use crate::curve_model::CurveModel;
use crate::error::{GraphError, GraphResult};
use crate::path_builder::{CurvePosition, PathBuilder};
use crate::path_storage::CurveGeometry;
use crate::render_surface::{draw_geometry, RenderSurface};
use crate::static_cache::StaticPathCache;

/// Handle to a curve registered with a [`Plane`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveId(usize);

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct CurveSlot {
    id: CurveId,
    model: CurveModel,
    cache: Option<StaticPathCache>,
}

impl CurveSlot {
    /// Cached geometry for a static curve, a fresh build otherwise.
    fn geometry(&mut self, builder: &PathBuilder, generation: u64) -> Rc<CurveGeometry> {
        let CurveSlot { model, cache, .. } = self;
        match cache {
            Some(cache) => cache.get_or_build(generation, || builder.build(model)),
            None => Rc::new(builder.build(model)),
        }
    }
}

pub struct Plane {
    mapper: CoordinateMapper,
    slots: Vec<CurveSlot>,
    next_id: usize,
    generation: u64,
}

impl Plane {
    pub fn new(config: &PlaneConfig) -> GraphResult<Self> {
        Ok(Self {
            mapper: CoordinateMapper::new(config)?,
            slots: Vec::new(),
            next_id: 0,
            generation: 0,
        })
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Bumped on every resize; static geometry built for an older
    /// generation is rebuilt on next use.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn builder(&self) -> PathBuilder {
        PathBuilder::new(self.mapper.viewport())
    }

    fn slot_mut(&mut self, id: CurveId) -> GraphResult<&mut CurveSlot> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(GraphError::UnknownCurve(id))
    }

    // ---------------------------------------------------------------
    // Registry
    // ---------------------------------------------------------------

    /// Register a curve. Infinite explicit bounds are pinned to the current
    /// canvas edges, and static curves are built right away.
    pub fn add_curve(&mut self, mut model: CurveModel) -> CurveId {
        let id = CurveId(self.next_id);
        self.next_id += 1;
        model.anchor_to_canvas(&self.mapper.viewport());

        let mut slot = CurveSlot {
            id,
            cache: model.is_static().then(StaticPathCache::new),
            model,
        };
        if slot.cache.is_some() {
            let builder = self.builder();
            let generation = self.generation;
            if catch_unwind(AssertUnwindSafe(|| slot.geometry(&builder, generation))).is_err() {
                error!("curve {} panicked while building its static path", id);
            }
        }
        debug!("added {} curve {}", slot.model.kind().name(), id);
        self.slots.push(slot);
        id
    }

    pub fn remove_curve(&mut self, id: CurveId) -> GraphResult<CurveModel> {
        let idx = self
            .slots
            .iter()
            .position(|s| s.id == id)
            .ok_or(GraphError::UnknownCurve(id))?;
        Ok(self.slots.remove(idx).model)
    }

    pub fn curve(&self, id: CurveId) -> Option<&CurveModel> {
        self.slots.iter().find(|s| s.id == id).map(|s| &s.model)
    }

    /// Mutable access to a curve's model. Changing a static curve here does
    /// not rebuild its retained geometry until the next resize.
    pub fn curve_mut(&mut self, id: CurveId) -> Option<&mut CurveModel> {
        self.slot_mut(id).ok().map(|s| &mut s.model)
    }

    /// Registered curves in registration order.
    pub fn curves(&self) -> impl Iterator<Item = (CurveId, &CurveModel)> {
        self.slots.iter().map(|s| (s.id, &s.model))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    // ---------------------------------------------------------------
    // Mapping changes
    // ---------------------------------------------------------------

    /// Change the zoom level and re-anchor edge-pinned bounds. Static
    /// geometry is kept as built.
    pub fn set_zoom(&mut self, level: f64) -> GraphResult<()> {
        let previous = self.mapper.set_zoom(level)?;
        let current = self.mapper.viewport();
        for slot in &mut self.slots {
            slot.model.update_bounds_on_resize(&previous, &current);
        }
        Ok(())
    }

    /// Resize the canvas, re-anchor edge-pinned bounds, and invalidate all
    /// static geometry.
    pub fn resize(&mut self, width: f64, height: f64) -> GraphResult<()> {
        let previous = self.mapper.resize(width, height)?;
        let current = self.mapper.viewport();
        for slot in &mut self.slots {
            slot.model.update_bounds_on_resize(&previous, &current);
        }
        self.generation += 1;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Frames
    // ---------------------------------------------------------------

    /// Advance every curve's bounds by its velocity times `tick`.
    pub fn update(&mut self, tick: f64) {
        for slot in &mut self.slots {
            slot.model.update(tick);
        }
    }

    pub fn geometry(&mut self, id: CurveId) -> GraphResult<Rc<CurveGeometry>> {
        let builder = self.builder();
        let generation = self.generation;
        Ok(self.slot_mut(id)?.geometry(&builder, generation))
    }

    /// Draw every curve in registration order and return how many were
    /// drawn.
    ///
    /// Evaluator panics already surface as breaks in the path. A panic
    /// raised anywhere else while drawing a curve (the surface, for one) is
    /// logged and that curve is skipped.
    pub fn draw(&mut self, surface: &mut dyn RenderSurface) -> usize {
        let builder = self.builder();
        let generation = self.generation;
        let mut drawn = 0;
        for slot in &mut self.slots {
            let id = slot.id;
            let result = catch_unwind(AssertUnwindSafe(|| {
                let geometry = slot.geometry(&builder, generation);
                draw_geometry(surface, &geometry, slot.model.curve_style());
            }));
            match result {
                Ok(()) => drawn += 1,
                Err(_) => error!("curve {} panicked while drawing; skipped", id),
            }
        }
        drawn
    }

    /// Advance bounds by `tick`, then draw.
    pub fn frame(&mut self, tick: f64, surface: &mut dyn RenderSurface) -> usize {
        self.update(tick);
        self.draw(surface)
    }

    /// Classify the screen point (x, y) against curve `id`.
    pub fn position_of(&mut self, id: CurveId, x: f64, y: f64) -> GraphResult<CurvePosition> {
        let builder = self.builder();
        let geometry = self.geometry(id)?;
        let slot = self.slot_mut(id)?;
        Ok(builder.position_of(&slot.model, &geometry, x, y))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::VertexSource;
    use crate::color::Rgba8;
    use crate::curve_model::{Axis, Bounds};
    use crate::render_surface::RecordingSurface;

    fn plane() -> Plane {
        Plane::new(&PlaneConfig::default()).unwrap()
    }

    #[test_log::test]
    fn test_add_anchors_bounds() {
        let mut p = plane();
        let id = p.add_curve(CurveModel::explicit_y(|x| x));
        assert_eq!(p.curve(id).unwrap().bounds().range(Axis::X), (-16.0, 16.0));
        assert_eq!(p.len(), 1);
    }

    #[test_log::test]
    fn test_remove_curve() {
        let mut p = plane();
        let a = p.add_curve(CurveModel::explicit_y(|x| x));
        let b = p.add_curve(CurveModel::polar(|_| 1.0));
        assert!(p.remove_curve(a).is_ok());
        assert_eq!(p.remove_curve(a).unwrap_err(), GraphError::UnknownCurve(a));
        let ids: Vec<CurveId> = p.curves().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![b]);
        assert!(p.geometry(a).is_err());
    }

    #[test_log::test]
    fn test_invalid_zoom_leaves_state() {
        let mut p = plane();
        let id = p.add_curve(CurveModel::explicit_y(|x| x));
        assert_eq!(p.set_zoom(0.0), Err(GraphError::InvalidZoom(0.0)));
        assert_eq!(p.mapper().scale(), 20.0);
        assert_eq!(p.curve(id).unwrap().bounds().range(Axis::X), (-16.0, 16.0));
    }

    #[test_log::test]
    fn test_zoom_reanchors_bounds() {
        let mut p = plane();
        let id = p.add_curve(CurveModel::explicit_y(|x| x));
        p.set_zoom(2.0).unwrap();
        assert_eq!(p.mapper().scale(), 10.0);
        assert_eq!(p.curve(id).unwrap().bounds().range(Axis::X), (-32.0, 32.0));
    }

    #[test_log::test]
    fn test_static_cache_survives_zoom_but_not_resize() {
        let mut p = plane();
        let id = p.add_curve(CurveModel::explicit_y(|x| x * 0.5).static_path(true));
        let before = p.geometry(id).unwrap();
        p.set_zoom(2.0).unwrap();
        let after_zoom = p.geometry(id).unwrap();
        assert!(Rc::ptr_eq(&before, &after_zoom));

        p.resize(800.0, 600.0).unwrap();
        assert_eq!(p.generation(), 1);
        let after_resize = p.geometry(id).unwrap();
        assert!(!Rc::ptr_eq(&before, &after_resize));
    }

    #[test_log::test]
    fn test_dynamic_curves_rebuild() {
        let mut p = plane();
        let id = p.add_curve(CurveModel::explicit_y(|x| x));
        let a = p.geometry(id).unwrap();
        let b = p.geometry(id).unwrap();
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
    }

    #[test_log::test]
    fn test_frame_advances_then_draws() {
        let mut p = plane();
        let mut velocity = Bounds::default();
        velocity.end.t = 0.25;
        let id = p.add_curve(
            CurveModel::parametric(|t| crate::basics::PointD::new(t, t))
                .domain_t(0.0, 0.0)
                .velocity(velocity),
        );
        let mut s = RecordingSurface::new();
        assert_eq!(p.frame(1.0, &mut s), 1);
        assert_eq!(p.curve(id).unwrap().bounds().end.t, 0.25);
        assert_eq!(p.geometry(id).unwrap().path.point_count(), 26);
    }

    #[test_log::test]
    fn test_single_panicking_sample_breaks_path() {
        let mut p = plane();
        // Only the column at px = 380 (x = 3) panics.
        let id = p.add_curve(CurveModel::explicit_y(|x| {
            if (x - 3.0).abs() < 0.02 {
                panic!("evaluator failure");
            }
            x
        }));
        let mut s = RecordingSurface::new();
        assert_eq!(p.draw(&mut s), 1);
        assert_eq!(s.stroke_count(), 2);
        let g = p.geometry(id).unwrap();
        assert_eq!(g.path.subpath_count(), 2);
        assert!(!g.path.is_continuous());
        assert_eq!(g.path.point_count(), 640);
    }

    #[test_log::test]
    fn test_evaluator_panic_does_not_escape() {
        let mut p = plane();
        let id = p.add_curve(CurveModel::explicit_y(|x| {
            if x > 0.0 {
                panic!("evaluator failure");
            }
            x
        }));
        let g = p.geometry(id).unwrap();
        assert_eq!(g.path.subpath_count(), 1);
        assert!(!g.path.is_continuous());
        assert_eq!(p.position_of(id, 400.0, 100.0), Ok(CurvePosition::Unknown));
        assert_eq!(p.position_of(id, 100.0, 240.0), Ok(CurvePosition::Above));
    }

    /// Records like `RecordingSurface` but panics on red strokes.
    struct RedIntolerantSurface(RecordingSurface);

    impl RenderSurface for RedIntolerantSurface {
        fn stroke(&mut self, path: &mut dyn VertexSource, color: Rgba8, width: f64) {
            if color == Rgba8::RED {
                panic!("surface failure");
            }
            self.0.stroke(path, color, width);
        }

        fn fill(&mut self, region: &mut dyn VertexSource, color: Rgba8) {
            self.0.fill(region, color);
        }
    }

    #[test_log::test]
    fn test_surface_panic_skips_one_curve() {
        let mut p = plane();
        p.add_curve(CurveModel::explicit_y(|x| x));
        p.add_curve(CurveModel::explicit_y(|x| -x).stroke(Rgba8::RED));
        p.add_curve(CurveModel::polar(|_| 2.0));
        let mut s = RedIntolerantSurface(RecordingSurface::new());
        assert_eq!(p.draw(&mut s), 2);
        assert_eq!(s.0.stroke_count(), 2);
    }

    #[test_log::test]
    fn test_position_of() {
        let mut p = plane();
        let id = p.add_curve(CurveModel::explicit_y(|_| 0.0));
        assert_eq!(p.position_of(id, 100.0, 100.0), Ok(CurvePosition::Above));
        assert_eq!(p.position_of(id, 100.0, 400.0), Ok(CurvePosition::Below));
        assert_eq!(p.position_of(id, 100.0, 240.0), Ok(CurvePosition::On));
    }
}
