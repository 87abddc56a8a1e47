use std::fs;
use std::path::PathBuf;

use nemtex::rendering::{Preview, RasterBuffer};
use nemtex::{DescriptorFields, ImportConfig, Session};
use sha2::{Digest, Sha256};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

/// 16x16 gradient with a transparent diagonal.
fn gradient_png() -> Vec<u8> {
    let mut r = RasterBuffer::transparent(16, 16);
    for y in 0..16u32 {
        for x in 0..16u32 {
            let a = if x == y { 0 } else { 255 };
            r.set_pixel(x, y, [(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8, a]);
        }
    }
    Preview::from_raster(&r).expect("encode").png_data
}

#[test]
fn golden_descriptor_matches_digest() {
    let mut session = Session::new(ImportConfig::default());
    session.import_bytes(&gradient_png()).expect("import");
    session.fields = DescriptorFields {
        id: "gradient".into(),
        name: "Gradient".into(),
        category: "blocks".into(),
        material: "stone".into(),
    };
    let yaml = session.export().expect("export").to_yaml();
    let digest = hex::encode(Sha256::digest(yaml.as_bytes()));

    let expected_path = golden_path("gradient.yml.sha256");
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, format!("{}\n", digest)).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    let exp = fs::read_to_string(&expected_path).expect("unable to read golden");
    assert_eq!(digest, exp.trim(), "descriptor drifted:\n{}", yaml);

    // (0,0) is on the transparent diagonal; (1,0) is the first coloured pixel
    assert!(!yaml.contains("\n  '0': "));
    assert!(yaml.contains("\n  '1': 1048584\n"));
}
