//! Retained geometry for curves marked static.
//!
//! The cache remembers the generation it was built for. The owning plane
//! bumps its generation only on resize notifications, so zoom changes and
//! bound updates never trigger a rebuild of a static curve.

use std::rc::Rc;

use log::debug;

use crate::path_storage::CurveGeometry;

#[derive(Debug, Clone, Default)]
pub struct StaticPathCache {
    entry: Option<(u64, Rc<CurveGeometry>)>,
}

impl StaticPathCache {
    pub fn new() -> Self {
        Self { entry: None }
    }

    /// Return the cached geometry if it was built for `generation`,
    /// otherwise call `build`, retain its result, and return that.
    pub fn get_or_build<F>(&mut self, generation: u64, build: F) -> Rc<CurveGeometry>
    where
        F: FnOnce() -> CurveGeometry,
    {
        match &self.entry {
            Some((gen, geometry)) if *gen == generation => Rc::clone(geometry),
            _ => {
                debug!("building static geometry for generation {}", generation);
                let geometry = Rc::new(build());
                self.entry = Some((generation, Rc::clone(&geometry)));
                geometry
            }
        }
    }

    /// The retained geometry, whatever generation it belongs to.
    pub fn cached(&self) -> Option<&Rc<CurveGeometry>> {
        self.entry.as_ref().map(|(_, g)| g)
    }

    /// Generation of the retained geometry.
    pub fn generation(&self) -> Option<u64> {
        self.entry.as_ref().map(|(g, _)| *g)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
