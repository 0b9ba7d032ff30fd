use std::io::Cursor;
use std::path::PathBuf;

use bitmap_bridge::bridge::{default_packages, BitmapModule, PredictorModule};
use bitmap_bridge::pixel::normalize_channel;
use bitmap_bridge::{BridgeConfig, ModuleRegistry, ResizeFilter};
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use rand::Rng;
use serde_json::{json, Value};

/// Writes a two-colour image (left half `left`, right half `right`) to a
/// uniquely named temp file.
fn write_split_png(width: u32, height: u32, left: [u8; 3], right: [u8; 3]) -> PathBuf {
    let img = RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 { Rgb(left) } else { Rgb(right) }
    });
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img).write_to(&mut buf, ImageOutputFormat::Png).unwrap();

    let name = format!("bitmap-bridge-it-{:016x}.png", rand::thread_rng().gen::<u64>());
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, buf.into_inner()).unwrap();
    path
}

fn registry(config: &BridgeConfig) -> ModuleRegistry {
    ModuleRegistry::from_packages(&default_packages(), config).unwrap()
}

fn as_floats(v: &Value) -> Vec<f32> {
    v.as_array().unwrap().iter().map(|x| x.as_f64().unwrap() as f32).collect()
}

#[test]
fn image_at_target_size_round_trips_exact_channels() {
    let config = BridgeConfig { target_width: 4, target_height: 2, ..BridgeConfig::default() };
    let path = write_split_png(4, 2, [255, 0, 0], [0, 128, 255]);
    let uri = format!("file://{}", path.display());

    let out = registry(&config)
        .invoke(BitmapModule::NAME, BitmapModule::GET_NORMALIZED_PIXELS, vec![json!(uri)])
        .wait()
        .unwrap();
    let floats = as_floats(&out);

    assert_eq!(floats.len(), 4 * 2 * 3);
    let blue_ish = [0.0, normalize_channel(128), 1.0];
    let expected_row: Vec<f32> = [[1.0, 0.0, 0.0], [1.0, 0.0, 0.0], blue_ish, blue_ish].concat();
    assert_eq!(&floats[..12], expected_row.as_slice());
    assert_eq!(&floats[12..], expected_row.as_slice());
    std::fs::remove_file(path).unwrap();
}

#[test]
fn default_target_produces_224_square_buffer() {
    let config = BridgeConfig { resize_filter: ResizeFilter::Triangle, ..BridgeConfig::default() };
    let path = write_split_png(64, 48, [10, 20, 30], [200, 210, 220]);

    let out = registry(&config)
        .invoke("BitmapModule", "getNormalizedPixels", vec![json!(path.to_str().unwrap())])
        .wait()
        .unwrap();
    let floats = as_floats(&out);

    assert_eq!(floats.len(), 224 * 224 * 3);
    assert!(floats.iter().all(|v| (0.0..=1.0).contains(v)));
    // Far from the colour boundary the smooth resize keeps the flat colour.
    let first = &floats[..3];
    assert!((first[0] - normalize_channel(10)).abs() < 2.0 / 255.0);
    assert!((first[2] - normalize_channel(30)).abs() < 2.0 / 255.0);
    std::fs::remove_file(path).unwrap();
}

#[test]
fn same_image_twice_gives_identical_buffers() {
    let config = BridgeConfig { target_width: 16, target_height: 16, ..BridgeConfig::default() };
    let path = write_split_png(37, 23, [1, 2, 3], [250, 128, 7]);
    let uri = path.to_str().unwrap().to_string();
    let reg = registry(&config);

    let a = reg.invoke(BitmapModule::NAME, BitmapModule::GET_NORMALIZED_PIXELS, vec![json!(uri)]).wait();
    let b = reg.invoke(BitmapModule::NAME, BitmapModule::GET_NORMALIZED_PIXELS, vec![json!(uri)]).wait();
    assert_eq!(a, b);
    std::fs::remove_file(path).unwrap();
}

#[test]
fn unreadable_locators_reject_with_source_code() {
    let reg = registry(&BridgeConfig::default());
    for uri in ["file:///no/such/fish.jpg", "content://media/external/images/media/42"] {
        let rej = reg
            .invoke(BitmapModule::NAME, BitmapModule::GET_NORMALIZED_PIXELS, vec![json!(uri)])
            .wait()
            .unwrap_err();
        assert_eq!(rej.code, "E_SOURCE_UNAVAILABLE", "{uri}: {}", rej.message);
    }
}

#[test]
fn concurrent_calls_are_independent() {
    let config = BridgeConfig { target_width: 8, target_height: 8, ..BridgeConfig::default() };
    let reg = registry(&config);
    let paths: Vec<PathBuf> = (0..4u8)
        .map(|i| write_split_png(8, 8, [i * 60, 0, 0], [0, 0, i * 60]))
        .collect();

    let pending: Vec<_> = paths
        .iter()
        .map(|p| reg.invoke(BitmapModule::NAME, BitmapModule::GET_NORMALIZED_PIXELS, vec![json!(p.to_str().unwrap())]))
        .collect();

    for (i, p) in pending.into_iter().enumerate() {
        let floats = as_floats(&p.wait().unwrap());
        assert_eq!(floats[0], normalize_channel(i as u8 * 60));
    }
    for p in paths {
        std::fs::remove_file(p).unwrap();
    }
}

#[test]
fn predictor_labels_scores() {
    let reg = registry(&BridgeConfig::default());
    let out = reg
        .invoke(PredictorModule::NAME, PredictorModule::INTERPRET_SCORES, vec![json!([0.05, 0.05, 0.05, 0.05, 0.8])])
        .wait()
        .unwrap();
    assert_eq!(out["scientificName"], "Moon_Wrasse");
    assert_eq!(out["confirmationRequired"], true);
}
