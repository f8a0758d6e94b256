#![cfg(feature = "rayon")]

use edgematch::{LocateConfig, Locator, OwnedImage, Preprocess, ScaleOrder, ScaleRange};

fn make_scene(width: usize, height: usize) -> OwnedImage {
    OwnedImage::from_fn(width, height, |x, y| {
        let in_a = (40..52).contains(&x) && (30..54).contains(&y);
        let in_b = (110..128).contains(&x) && (70..84).contains(&y);
        if in_a || in_b {
            210
        } else {
            25
        }
    })
    .unwrap()
}

fn make_texture(width: usize, height: usize) -> OwnedImage {
    OwnedImage::from_fn(width, height, |x, y| ((x * 11) ^ (y * 3) ^ (x * y)) as u8).unwrap()
}

fn run(cfg: &LocateConfig, parallel: bool) -> Vec<edgematch::Detection> {
    let target = make_scene(180, 140);
    let template = target.crop(30, 20, 32, 44).unwrap();
    Locator::new()
        .with_config(LocateConfig {
            parallel,
            ..cfg.clone()
        })
        .locate(target.view(), template.view())
        .unwrap()
}

#[test]
fn parallel_locate_matches_sequential() {
    let cfg = LocateConfig {
        threshold: 0.5,
        scales: ScaleRange::new(0.5, 1.4, 10),
        ..LocateConfig::default()
    };
    let seq = run(&cfg, false);
    let par = run(&cfg, true);

    assert!(!seq.is_empty());
    assert_eq!(seq, par);
}

#[test]
fn parallel_locate_matches_sequential_descending() {
    let cfg = LocateConfig {
        threshold: 0.5,
        scales: ScaleRange::new(0.2, 1.2, 12),
        scale_order: ScaleOrder::Descending,
        ..LocateConfig::default()
    };
    assert_eq!(run(&cfg, false), run(&cfg, true));
}

#[test]
fn parallel_single_scale_matches_sequential() {
    let target = make_texture(96, 80);
    let template = target.crop(37, 21, 20, 14).unwrap();
    let cfg = LocateConfig {
        preprocess: Preprocess::Intensity,
        threshold: 0.6,
        ..LocateConfig::default()
    };
    let seq = Locator::new().with_config(cfg.clone());
    let par = Locator::new().with_config(LocateConfig {
        parallel: true,
        ..cfg
    });

    let best_seq = seq.best_match(target.view(), template.view()).unwrap();
    let best_par = par.best_match(target.view(), template.view()).unwrap();
    assert_eq!(best_seq, best_par);
    assert_eq!(best_seq.map(|d| (d.x1, d.y1)), Some((37, 21)));

    let all_seq = seq.match_all(target.view(), template.view()).unwrap();
    let all_par = par.match_all(target.view(), template.view()).unwrap();
    assert_eq!(all_seq, all_par);
}
