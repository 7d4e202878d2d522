use tilescan::{simulate_scan, tile_file_name, Point2D, ScanConfig, Units};

fn small_config(folder: &std::path::Path) -> ScanConfig {
    let mut config = ScanConfig::new();
    config.camera.frame_width_px = 8;
    config.camera.frame_height_px = 4;
    config.camera.pixel_width_um = 125.0;
    config.camera.pixel_height_um = 250.0;
    // 2 mm x 1 mm with 1 mm footprints: 3 columns, 2 rows
    config.region.top_left = Point2D::new(0.0, 1.0);
    config.region.bottom_right = Point2D::new(2.0, 0.0);
    config.region.units = Units::Millimetres;
    config.output.save_folder = folder.to_path_buf();
    config
}

#[test]
fn test_simulated_scan_writes_tiles_and_mosaic() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("tiles");
    let config = small_config(&folder);

    let grid = simulate_scan(&config).unwrap();
    assert_eq!(grid.num_rows(), 2);
    assert_eq!(grid.num_columns(), 3);

    for row in 0..2 {
        for col in 0..3 {
            assert!(folder.join(tile_file_name(row, col)).exists());
        }
    }

    let mosaic = image::open(config.output.tiled_image_path())
        .unwrap()
        .to_luma8();
    assert_eq!(mosaic.dimensions(), (24, 8));
}

#[test]
fn test_simulated_scan_without_tiling() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = small_config(dir.path());
    config.output.run_naive_tiling = false;

    simulate_scan(&config).unwrap();
    assert!(!config.output.tiled_image_path().exists());
}

#[test]
fn test_invalid_config_fails_before_capture() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("never");
    let mut config = small_config(&folder);
    config.region.units = Units::Degrees;

    assert!(simulate_scan(&config).is_err());
    assert!(!folder.exists());
}

#[test]
fn test_missing_serial_port_fails_before_capture() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("never");
    let mut config = small_config(&folder);
    config.stage.serial_port = String::new();

    assert!(simulate_scan(&config).is_err());
    assert!(!folder.exists());
}
