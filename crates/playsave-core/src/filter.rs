//! Instance exclusion policy shared by capture and restore

use crate::{Inspectable, ObjectKind, SaverConfig};
use std::collections::HashSet;

/// Why an instance was left out of a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Destroyed,
    ExcludedKind,
    Template,
}

/// Decides which instances capture and restore may touch
///
/// Kinds are matched by exact name. Hosts with kind hierarchies must report
/// derived kinds under their excluded base name (a `RectTransform` as
/// `Transform`), or list every derived name in [`SaverConfig`].
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    capture_excluded: HashSet<ObjectKind>,
    restore_excluded: HashSet<ObjectKind>,
    skip_templates: bool,
}

impl ExclusionFilter {
    pub fn from_config(config: &SaverConfig) -> Self {
        Self {
            capture_excluded: config.capture_excluded_kinds.iter().cloned().collect(),
            restore_excluded: config.restore_excluded_kinds.iter().cloned().collect(),
            skip_templates: config.skip_template_instances,
        }
    }

    /// Reason to leave `object` out of capture, if any
    pub fn capture_skip(&self, object: &dyn Inspectable) -> Option<SkipReason> {
        if object.is_destroyed() {
            return Some(SkipReason::Destroyed);
        }
        if self.capture_excluded.contains(object.kind()) {
            return Some(SkipReason::ExcludedKind);
        }
        if self.skip_templates && object.template_origin().is_template() {
            return Some(SkipReason::Template);
        }
        None
    }

    /// Reason to leave `object` out of restore, if any
    ///
    /// Template origin is not rechecked here; such instances never reach the
    /// store in the first place.
    pub fn restore_skip(&self, object: &dyn Inspectable) -> Option<SkipReason> {
        if object.is_destroyed() {
            return Some(SkipReason::Destroyed);
        }
        if self.restore_excluded.contains(object.kind()) {
            return Some(SkipReason::ExcludedKind);
        }
        None
    }
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::from_config(&SaverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scene, TemplateOrigin};

    #[test]
    fn test_capture_skips_reference_kinds() {
        let mut scene = Scene::new();
        let excluded: Vec<_> = [
            ObjectKind::TRANSFORM,
            ObjectKind::MESH_FILTER,
            ObjectKind::MESH_RENDERER,
            ObjectKind::SKINNED_MESH_RENDERER,
            ObjectKind::AVATAR_DESCRIPTOR,
        ]
        .into_iter()
        .map(|kind| scene.create(kind).id)
        .collect();
        let bone = scene.create("PhysBone").id;
        let rect = scene.create("RectTransform").id;

        let filter = ExclusionFilter::default();
        for id in excluded {
            let object = scene.object(id).unwrap();
            assert_eq!(
                filter.capture_skip(object),
                Some(SkipReason::ExcludedKind),
                "{} should be excluded",
                object.kind
            );
        }
        assert_eq!(filter.capture_skip(scene.object(bone).unwrap()), None);
        assert_eq!(filter.capture_skip(scene.object(rect).unwrap()), None);
    }

    #[test]
    fn test_restore_only_skips_transforms() {
        let mut scene = Scene::new();
        let transform = scene.create("Transform").id;
        let renderer = scene.create("MeshRenderer").id;

        let filter = ExclusionFilter::default();
        assert_eq!(
            filter.restore_skip(scene.object(transform).unwrap()),
            Some(SkipReason::ExcludedKind)
        );
        assert_eq!(filter.restore_skip(scene.object(renderer).unwrap()), None);
    }

    #[test]
    fn test_template_instances_skipped() {
        let mut scene = Scene::new();
        let object = scene.create("PhysBone");
        object.origin = TemplateOrigin::Instance;
        let id = object.id;

        let filter = ExclusionFilter::default();
        assert_eq!(
            filter.capture_skip(scene.object(id).unwrap()),
            Some(SkipReason::Template)
        );

        let config = SaverConfig {
            skip_template_instances: false,
            ..SaverConfig::default()
        };
        let filter = ExclusionFilter::from_config(&config);
        assert_eq!(filter.capture_skip(scene.object(id).unwrap()), None);
    }

    #[test]
    fn test_destroyed_skipped() {
        let mut scene = Scene::new();
        let object = scene.create("PhysBone");
        object.destroyed = true;
        let id = object.id;

        let filter = ExclusionFilter::default();
        assert_eq!(
            filter.capture_skip(scene.object(id).unwrap()),
            Some(SkipReason::Destroyed)
        );
        assert_eq!(
            filter.restore_skip(scene.object(id).unwrap()),
            Some(SkipReason::Destroyed)
        );
    }
}
