//! Tests that drive the `pixelizer` binary.

mod common;

use common::fixtures;
use pixelizer::services::read_png;
use std::process::Command;

fn pixelizer() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pixelizer"));
    cmd.env_remove("PIXELIZER_CONFIG");
    cmd
}

#[test]
fn test_presets_lists_every_preset() {
    let output = pixelizer().arg("presets").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    for name in [
        "auto",
        "portrait_warm",
        "retro_comic",
        "pico8",
        "nes",
        "gameboy",
        "muted_pastel",
    ] {
        assert!(stdout.contains(name), "missing {name} in:\n{stdout}");
    }
    assert!(stdout.contains(" 4 colors"), "gameboy size missing:\n{stdout}");
}

#[test]
fn test_convert_with_flags() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixtures::write_png(dir.path(), "in.png", &fixtures::quadrants());
    let output = dir.path().join("out.png");

    let status = pixelizer()
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .args(["--grid", "100", "--palette-size", "4", "--no-smooth"])
        .args(["--dither", "0", "--no-edges", "--scale", "3"])
        .status()
        .unwrap();
    assert!(status.success());

    let image = read_png(&output).unwrap();
    assert_eq!((image.width(), image.height()), (6, 6));
    common::assert_blocky(&image, 3);
    assert_eq!(common::visible_colors(&image).len(), 4);
}

#[test]
fn test_convert_with_config_profile() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("pixelizer.yaml");
    std::fs::write(
        &config,
        "profiles:\n  gb:\n    gridMax: 8\n    palettePreset: gameboy\n    paletteSmoothing: false\n    ditherStrength: 0\n",
    )
    .unwrap();
    let input = fixtures::write_png(dir.path(), "in.png", &fixtures::gradient(16, 16));
    let output = dir.path().join("out.png");

    let status = pixelizer()
        .arg("--config")
        .arg(&config)
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .args(["--profile", "gb"])
        .status()
        .unwrap();
    assert!(status.success());

    let image = read_png(&output).unwrap();
    assert_eq!((image.width(), image.height()), (16, 16));
    common::assert_blocky(&image, 2);
    let gameboy = [[15, 56, 15], [48, 98, 48], [139, 172, 15], [155, 188, 15]];
    for color in common::visible_colors(&image) {
        assert!(gameboy.contains(&color), "{color:?} is not a Game Boy color");
    }
}

#[test]
fn test_unknown_profile_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixtures::write_png(dir.path(), "in.png", &fixtures::quadrants());

    let output = pixelizer()
        .arg("convert")
        .arg(&input)
        .arg(dir.path().join("out.png"))
        .args(["--profile", "does-not-exist"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Unknown profile: does-not-exist"), "{stderr}");
}

#[test]
fn test_process_message_mode() {
    let dir = tempfile::tempdir().unwrap();
    let request = dir.path().join("request.json");
    let response = dir.path().join("response.json");
    std::fs::write(
        &request,
        r#"{"type": "PROCESS_PIXEL_ART", "srcWidth": 1, "srcHeight": 1,
            "srcBuffer": [0, 128, 255, 255], "outWidth": 2, "outHeight": 2}"#,
    )
    .unwrap();

    let status = pixelizer()
        .arg("process")
        .arg(&request)
        .arg(&response)
        .status()
        .unwrap();
    assert!(status.success());

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&response).unwrap()).unwrap();
    assert_eq!(value["type"], "PROCESS_PIXEL_ART_DONE");
    assert_eq!(value["outBuffer"].as_array().map(Vec::len), Some(16));
}
