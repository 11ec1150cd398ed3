use std::io::Cursor;

use imageset::{
    AnnotationPipeline, ArrowSpec, AssetId, AssetStore, Collection, CropRegion, ImagesetError,
    decode_rgba,
};

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "imageset_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn white_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn pipeline(tmp: &std::path::Path) -> AnnotationPipeline {
    AnnotationPipeline::new(AssetStore::new(tmp))
}

#[test]
fn crop_derives_a_fresh_dataset_asset() {
    let tmp = temp_dir("crop");
    let pipeline = pipeline(&tmp);

    let source = AssetId::parse("originals/src.png").unwrap();
    let source_bytes = white_png(64, 48);
    pipeline.store().write(&source, &source_bytes).unwrap();

    let derived = pipeline
        .crop(
            &source,
            CropRegion {
                x: 8,
                y: 8,
                width: 16,
                height: 12,
            },
        )
        .unwrap();

    assert_eq!(derived.collection(), Collection::Datasets);
    assert_ne!(derived.to_string(), source.to_string());

    let cropped = decode_rgba(&pipeline.store().read(&derived).unwrap()).unwrap();
    assert_eq!(cropped.dimensions(), (16, 12));

    // The source is untouched, byte for byte.
    assert_eq!(pipeline.store().read(&source).unwrap(), source_bytes);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn crop_from_datasets_also_derives_not_overwrites() {
    let tmp = temp_dir("crop_datasets");
    let pipeline = pipeline(&tmp);

    let source = AssetId::parse("datasets/src.png").unwrap();
    pipeline.store().write(&source, &white_png(32, 32)).unwrap();

    let derived = pipeline
        .crop(
            &source,
            CropRegion {
                x: 0,
                y: 0,
                width: 8,
                height: 8,
            },
        )
        .unwrap();

    assert_ne!(derived, source);
    assert!(pipeline.store().exists(&source));
    assert!(pipeline.store().exists(&derived));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn crop_of_absent_source_is_not_found() {
    let tmp = temp_dir("crop_missing");
    let pipeline = pipeline(&tmp);

    let source = AssetId::parse("originals/missing.png").unwrap();
    let err = pipeline
        .crop(
            &source,
            CropRegion {
                x: 0,
                y: 0,
                width: 1,
                height: 1,
            },
        )
        .unwrap_err();
    assert!(matches!(err, ImagesetError::NotFound(_)));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn arrow_on_original_lands_in_datasets() {
    let tmp = temp_dir("arrow_original");
    let pipeline = pipeline(&tmp);

    let source = AssetId::parse("originals/src.png").unwrap();
    let source_bytes = white_png(100, 100);
    pipeline.store().write(&source, &source_bytes).unwrap();

    let target = pipeline
        .arrow_overlay(
            &source,
            ArrowSpec {
                start_x: 10,
                start_y: 50,
                end_x: 90,
                end_y: 50,
            },
        )
        .unwrap();

    assert_eq!(target.collection(), Collection::Datasets);
    assert_ne!(target.to_string(), source.to_string());
    assert_eq!(pipeline.store().read(&source).unwrap(), source_bytes);

    let annotated = decode_rgba(&pipeline.store().read(&target).unwrap()).unwrap();
    assert_eq!(annotated.get_pixel(50, 50).0, [255, 0, 0, 255]);
    // Re-encoded opaque: no transparency anywhere.
    assert!(annotated.pixels().all(|px| px.0[3] == 255));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn arrow_on_dataset_overwrites_in_place() {
    let tmp = temp_dir("arrow_dataset");
    let pipeline = pipeline(&tmp);

    let source = AssetId::parse("datasets/src.png").unwrap();
    let source_bytes = white_png(100, 100);
    pipeline.store().write(&source, &source_bytes).unwrap();

    let target = pipeline
        .arrow_overlay(
            &source,
            ArrowSpec {
                start_x: 0,
                start_y: 0,
                end_x: 99,
                end_y: 99,
            },
        )
        .unwrap();

    assert_eq!(target, source);
    let rewritten = pipeline.store().read(&source).unwrap();
    assert_ne!(rewritten, source_bytes);

    // Still exactly one dataset asset.
    assert_eq!(pipeline.store().list(Collection::Datasets).unwrap().len(), 1);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn arrow_of_absent_source_is_not_found() {
    let tmp = temp_dir("arrow_missing");
    let pipeline = pipeline(&tmp);

    let source = AssetId::parse("datasets/missing.png").unwrap();
    let err = pipeline
        .arrow_overlay(
            &source,
            ArrowSpec {
                start_x: 0,
                start_y: 0,
                end_x: 1,
                end_y: 1,
            },
        )
        .unwrap_err();
    assert!(matches!(err, ImagesetError::NotFound(_)));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn tag_writes_and_replaces_the_caption() {
    let tmp = temp_dir("tag");
    let pipeline = pipeline(&tmp);

    let id = AssetId::parse("datasets/x.png").unwrap();
    pipeline.store().write(&id, &white_png(4, 4)).unwrap();

    let caption_path = pipeline.tag(&id, "cat").unwrap();
    assert_eq!(caption_path, "datasets/x.txt");
    assert_eq!(
        pipeline.store().read_caption(&id).unwrap().as_deref(),
        Some("cat")
    );

    pipeline.tag(&id, "dog").unwrap();
    assert_eq!(
        pipeline.store().read_caption(&id).unwrap().as_deref(),
        Some("dog")
    );

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn tagging_an_absent_asset_writes_an_orphan_caption() {
    let tmp = temp_dir("tag_orphan");
    let pipeline = pipeline(&tmp);

    let id = AssetId::parse("datasets/ghost.png").unwrap();
    assert!(!pipeline.store().exists(&id));

    let caption_path = pipeline.tag(&id, "nobody home").unwrap();
    assert_eq!(caption_path, "datasets/ghost.txt");
    assert_eq!(
        pipeline.store().read_caption(&id).unwrap().as_deref(),
        Some("nobody home")
    );

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn batch_delete_isolates_failures_in_input_order() {
    let tmp = temp_dir("batch_delete");
    let pipeline = pipeline(&tmp);

    let a = AssetId::parse("datasets/a.png").unwrap();
    pipeline.store().write(&a, &white_png(2, 2)).unwrap();

    let report = pipeline.delete_batch(&[
        "datasets/a.png".to_string(),
        "datasets/missing.png".to_string(),
        "bad-id".to_string(),
    ]);

    assert_eq!(report.deleted, vec!["datasets/a.png".to_string()]);
    assert_eq!(
        report.failed,
        vec!["datasets/missing.png".to_string(), "bad-id".to_string()]
    );
    assert!(!pipeline.store().exists(&a));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn batch_delete_spares_caption_sidecars() {
    let tmp = temp_dir("batch_delete_captions");
    let pipeline = pipeline(&tmp);

    let id = AssetId::parse("datasets/x.png").unwrap();
    pipeline.store().write(&id, &white_png(2, 2)).unwrap();
    pipeline.tag(&id, "kept").unwrap();

    let report = pipeline.delete_batch(&["datasets/x.png".to_string()]);
    assert_eq!(report.deleted.len(), 1);
    assert_eq!(
        pipeline.store().read_caption(&id).unwrap().as_deref(),
        Some("kept")
    );

    std::fs::remove_dir_all(&tmp).ok();
}
