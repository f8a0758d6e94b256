use edgematch::{
    locate_instances, DefaultOps, EdgeMatchError, EdgeMatchResult, EdgeThresholds, ImageOps,
    ImageView, LocateConfig, Locator, OwnedImage, Preprocess, ScaleRange, ScoreMap, TemplatePlan,
};

const BACKGROUND: u8 = 30;
const OBJECT: u8 = 200;

/// Uniform scene with filled rectangles `(x, y, w, h)` painted on top.
fn scene(width: usize, height: usize, rects: &[(usize, usize, usize, usize)]) -> OwnedImage {
    OwnedImage::from_fn(width, height, |x, y| {
        let inside = rects
            .iter()
            .any(|&(rx, ry, rw, rh)| x >= rx && x < rx + rw && y >= ry && y < ry + rh);
        if inside {
            OBJECT
        } else {
            BACKGROUND
        }
    })
    .unwrap()
}

/// Scene with one 10x20 object whose 30x40 surrounding patch starts at (50, 50).
fn single_object_scene() -> (OwnedImage, OwnedImage) {
    let target = scene(160, 140, &[(60, 60, 10, 20)]);
    let template = target.crop(50, 50, 30, 40).unwrap();
    (target, template)
}

#[test]
fn pasted_template_is_found_once_at_its_origin() {
    let (target, template) = single_object_scene();
    let found = locate_instances(target.view(), template.view(), &LocateConfig::default()).unwrap();

    assert_eq!(found.len(), 1, "{found:?}");
    let det = found[0];
    assert!(det.x1.abs_diff(50) <= 2 && det.y1.abs_diff(50) <= 2, "{det:?}");
    assert!(det.x2.abs_diff(80) <= 2 && det.y2.abs_diff(90) <= 2, "{det:?}");
    assert!((det.score - 1.0).abs() <= 0.05, "{det:?}");
}

#[test]
fn every_candidate_meets_the_threshold() {
    let (target, template) = single_object_scene();
    let cfg = LocateConfig {
        threshold: 0.6,
        ..LocateConfig::default()
    };
    let candidates = Locator::new()
        .with_config(cfg)
        .search(target.view(), template.view())
        .unwrap();
    assert!(!candidates.is_empty());
    assert!(candidates.iter().all(|d| d.score >= 0.6));
}

#[test]
fn raising_the_threshold_only_removes_candidates() {
    let (target, template) = single_object_scene();
    let search = |threshold: f32| {
        let cfg = LocateConfig {
            threshold,
            ..LocateConfig::default()
        };
        Locator::new()
            .with_config(cfg)
            .search(target.view(), template.view())
            .unwrap()
    };

    let loose = search(0.4);
    let strict = search(0.7);
    assert!(strict.len() <= loose.len());
    for det in &strict {
        assert!(
            loose.iter().any(|d| d.corners() == det.corners()),
            "{det:?} missing at the lower threshold"
        );
    }
}

#[test]
fn scene_without_the_object_yields_nothing() {
    let (_, template) = single_object_scene();
    let empty = scene(160, 140, &[]);
    let found = locate_instances(empty.view(), template.view(), &LocateConfig::default()).unwrap();
    assert!(found.is_empty());
}

#[test]
fn target_smaller_than_template_at_every_scale_yields_nothing() {
    let (_, template) = single_object_scene();
    let tiny = scene(20, 20, &[(5, 5, 8, 8)]);
    let found = locate_instances(tiny.view(), template.view(), &LocateConfig::default()).unwrap();
    assert!(found.is_empty());
}

/// Nearest-neighbour resampling keeps filled rectangles crisp at half scale.
struct NearestOps;

impl ImageOps for NearestOps {
    fn edges(
        &self,
        image: ImageView<'_>,
        thresholds: EdgeThresholds,
    ) -> EdgeMatchResult<OwnedImage> {
        DefaultOps.edges(image, thresholds)
    }

    fn resize(
        &self,
        image: ImageView<'_>,
        width: usize,
        height: usize,
    ) -> EdgeMatchResult<OwnedImage> {
        OwnedImage::from_fn(width, height, |x, y| {
            let sx = x * image.width() / width;
            let sy = y * image.height() / height;
            image.get(sx, sy).unwrap_or(0)
        })
    }

    fn correlate(
        &self,
        image: ImageView<'_>,
        template: &TemplatePlan,
        min_var_i: f64,
    ) -> EdgeMatchResult<ScoreMap> {
        DefaultOps.correlate(image, template, min_var_i)
    }
}

#[test]
fn resized_instance_is_found_at_its_scale() {
    // The scene holds the object at twice the template size, so the match
    // lives at scale 0.5 and maps back to a 60x80 box.
    let (_, template) = single_object_scene();
    let target = scene(240, 200, &[(80, 60, 20, 40)]);
    let locator = Locator::with_ops(NearestOps).with_config(LocateConfig {
        preprocess: Preprocess::Intensity,
        threshold: 0.9,
        scales: ScaleRange::new(0.3, 1.2, 19),
        ..LocateConfig::default()
    });
    let found = locator.locate(target.view(), template.view()).unwrap();

    let best = found.first().copied().expect("object at half scale");
    assert_eq!(best.corners(), (60, 40, 120, 120));
    assert!((best.score - 1.0).abs() < 1e-4);
}

#[test]
fn two_instances_survive_suppression() {
    let target = scene(220, 140, &[(60, 60, 10, 20), (150, 40, 10, 20)]);
    let template = target.crop(50, 50, 30, 40).unwrap();
    let found = locate_instances(target.view(), template.view(), &LocateConfig::default()).unwrap();

    assert_eq!(found.len(), 2, "{found:?}");
    let mut origins: Vec<_> = found.iter().map(|d| (d.x1, d.y1)).collect();
    origins.sort();
    assert!(origins[0].0.abs_diff(50) <= 2 && origins[0].1.abs_diff(50) <= 2);
    assert!(origins[1].0.abs_diff(140) <= 2 && origins[1].1.abs_diff(30) <= 2);
}

#[test]
fn single_scale_helpers_use_raw_intensity() {
    let target = OwnedImage::from_fn(64, 48, |x, y| ((x * 13) ^ (y * 7) ^ (x * y)) as u8).unwrap();
    let template = target.crop(20, 12, 16, 10).unwrap();
    let locator = Locator::new().with_config(LocateConfig {
        preprocess: Preprocess::Intensity,
        threshold: 0.99,
        ..LocateConfig::default()
    });

    let best = locator
        .best_match(target.view(), template.view())
        .unwrap()
        .unwrap();
    assert_eq!(best.corners(), (20, 12, 36, 22));
    assert!((best.score - 1.0).abs() < 1e-4);

    let all = locator.match_all(target.view(), template.view()).unwrap();
    assert!(all.iter().any(|d| d.corners() == (20, 12, 36, 22)));
    assert!(all.iter().all(|d| d.score >= 0.99));
}

#[test]
fn invalid_parameters_fail_before_image_work() {
    let (target, template) = single_object_scene();
    let cfg = LocateConfig {
        overlap_threshold: 1.5,
        ..LocateConfig::default()
    };
    let err = locate_instances(target.view(), template.view(), &cfg).unwrap_err();
    assert_eq!(
        err,
        EdgeMatchError::InvalidParameter {
            name: "overlap_threshold",
            reason: "must lie strictly between 0 and 1",
        }
    );
}

#[test]
fn featureless_template_is_an_invalid_image() {
    let (target, _) = single_object_scene();
    let blank = scene(30, 40, &[]);
    let err = locate_instances(target.view(), blank.view(), &LocateConfig::default()).unwrap_err();
    assert!(err.is_invalid_image(), "{err}");
}
