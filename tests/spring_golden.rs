use spring_engine::spring::{CrossSection, SpringCenterline, SpringDesign, generate};
use std::fmt::Write as _;
use std::path::PathBuf;

const SNAPSHOT_QUANTIZE: f64 = 1e-6;
const SNAPSHOT_DECIMALS: usize = 6;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_design(name: &str) -> SpringDesign {
    let path = fixtures_dir().join("designs").join(format!("{name}.json"));
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("missing design `{}`: {err}", path.display()));
    SpringDesign::from_json(&text).unwrap_or_else(|err| panic!("design `{name}`: {err}"))
}

fn normalize_snapshot_text(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    if normalized.ends_with('\n') {
        normalized
    } else {
        format!("{normalized}\n")
    }
}

fn quantize_f64(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let value = if value == -0.0 { 0.0 } else { value };
    let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
    if q == -0.0 { 0.0 } else { q }
}

fn write_f64(out: &mut String, value: f64) {
    let value = quantize_f64(value);
    let _ = write!(out, "{value:.SNAPSHOT_DECIMALS$}");
}

fn write_vec3_line(out: &mut String, prefix: &str, v: [f64; 3]) {
    let _ = write!(out, "{prefix} ");
    write_f64(out, v[0]);
    out.push(' ');
    write_f64(out, v[1]);
    out.push(' ');
    write_f64(out, v[2]);
    out.push('\n');
}

fn write_centerline(out: &mut String, centerline: &SpringCenterline) {
    let _ = writeln!(out, "family {}", centerline.family);
    match centerline.cross_section {
        CrossSection::Circular { wire_diameter } => {
            out.push_str("section circular ");
            write_f64(out, wire_diameter);
            out.push('\n');
        }
        CrossSection::Rectangular { width, thickness } => {
            out.push_str("section rectangular ");
            write_f64(out, width);
            out.push(' ');
            write_f64(out, thickness);
            out.push('\n');
        }
    }
    if let Some(grinding) = centerline.grinding.as_ref() {
        write_vec3_line(
            out,
            "grinding",
            [grinding.depth, grinding.bottom_cut_z, grinding.top_cut_z],
        );
    }
    for section in centerline.path.sections() {
        let _ = writeln!(out, "part {:?} {} {}", section.kind, section.first, section.last);
    }
    let _ = writeln!(out, "points {}", centerline.path.len());
    for p in centerline.path.points() {
        write_vec3_line(out, "p", p.to_array());
    }
}

fn snapshot(op: &str, sections: impl FnOnce(&mut String)) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# spring-engine golden v1");
    let _ = writeln!(out, "op {op}");
    let _ = writeln!(out, "quantize {SNAPSHOT_QUANTIZE:.1e}");
    sections(&mut out);
    out
}

fn assert_or_update_fixture(name: &str, actual: &str) {
    let path = fixtures_dir().join("golden").join(name);
    let actual = normalize_snapshot_text(actual);

    if std::env::var_os("SPRING_UPDATE_GOLDENS").is_some() {
        std::fs::create_dir_all(fixtures_dir().join("golden")).expect("create fixtures dir");
        std::fs::write(&path, actual).expect("write golden fixture");
        return;
    }

    let expected = std::fs::read_to_string(&path).unwrap_or_else(|err| {
        panic!(
            "missing fixture `{}`: {err} (set SPRING_UPDATE_GOLDENS=1 to record)",
            path.display()
        )
    });
    let expected = normalize_snapshot_text(&expected);

    assert_eq!(
        actual, expected,
        "golden mismatch for `{name}` (set SPRING_UPDATE_GOLDENS=1 to update)"
    );
}

fn check_golden(name: &str) -> SpringCenterline {
    let centerline = generate(&load_design(name)).unwrap_or_else(|err| panic!("{name}: {err}"));
    let snap = snapshot(name, |out| write_centerline(out, &centerline));
    assert_or_update_fixture(&format!("{name}.snap"), &snap);
    centerline
}

#[test]
fn golden_compression_reference() {
    let centerline = check_golden("compression_reference");
    assert_eq!(centerline.path.len(), 361);
    assert!(centerline.grinding.is_some());
}

#[test]
fn golden_compression_uniform() {
    let centerline = check_golden("compression_uniform");
    assert_eq!(centerline.path.len(), 361);
}

#[test]
fn golden_extension_machine_hooks() {
    let centerline = check_golden("extension_machine_hooks");
    assert_eq!(centerline.path.sections().len(), 3);
}

#[test]
fn golden_extension_double_loop() {
    let centerline = check_golden("extension_double_loop");
    assert_eq!(centerline.path.sections().len(), 3);
}

#[test]
fn golden_torsion_tangential_legs() {
    let centerline = check_golden("torsion_tangential_legs");
    assert_eq!(centerline.path.sections().len(), 3);
}

#[test]
fn golden_conical_reference() {
    check_golden("conical_reference");
}

#[test]
fn golden_arc_barrel() {
    let centerline = check_golden("arc_barrel");
    let counts = centerline.turn_counts.as_ref().expect("arc reports turn counts");
    assert_eq!(counts.len(), centerline.path.len());
}

#[test]
fn golden_spiral_torsion_reference() {
    let centerline = check_golden("spiral_torsion_reference");
    assert!(centerline.path.points().iter().all(|p| p.z == 0.0));
}

#[test]
fn golden_wave_single_ring() {
    let centerline = check_golden("wave_single_ring");
    assert_eq!(centerline.path.len(), 200);
}

#[test]
fn golden_wave_stack() {
    let centerline = check_golden("wave_stack");
    assert_eq!(centerline.path.len(), 253);
}
