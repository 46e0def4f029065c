#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("spring_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use spring_engine::geom::Point3;
    use spring_engine::spring::{
        ArcInput, CompressionInput, ConicalInput, CrossSection, ExtensionInput, GenerationOptions,
        SpiralTorsionInput, SpringCenterline, SpringDesign, SpringFactors, SpringParameters,
        TorsionInput, WaveInput, generate,
    };
    use std::fmt::Write as _;
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    const SNAPSHOT_QUANTIZE: f64 = 1e-6;
    const SNAPSHOT_DECIMALS: usize = 6;

    const USAGE: &str = r#"spring_cli (spring-engine)

USAGE:
  spring_cli list
  spring_cli run <scenario|all> [options]
  spring_cli generate <design.json> [--frames]

SCENARIOS:
  compression_reference
  compression_uniform
  extension_machine_hooks
  extension_double_loop
  torsion_tangential_legs
  conical_reference
  arc_barrel
  spiral_torsion_reference
  wave_single_ring
  wave_stack

OPTIONS (run):
  --out-dir <dir>    Write <scenario>.obj and/or <scenario>.snap to this dir (required for `all`)
  --obj <path>       Write the centerline as an OBJ polyline (single scenario only)
  --snap <path>      Write golden-style snapshot (single scenario only)
  --no-obj           Skip OBJ when using --out-dir
  --no-snap          Skip snapshot when using --out-dir
  --overwrite        Overwrite existing output files
  -h, --help         Show this help

OPTIONS (generate):
  --frames           Attach rotation-minimizing frames to the printed centerline
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                print_scenarios();
                Ok(())
            }
            "run" => cmd_run(&mut args),
            "generate" => cmd_generate(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn print_scenarios() {
        for scenario in Scenario::ALL {
            println!("{}", scenario.name());
        }
    }

    fn cmd_generate(args: &mut Args) -> Result<(), String> {
        let path = args.next().ok_or("missing design file")?;
        let mut frames = false;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--frames" => frames = true,
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        let text = fs::read_to_string(&path).map_err(|e| format!("read {path}: {e}"))?;
        let mut design = SpringDesign::from_json(&text).map_err(|e| e.to_string())?;
        if frames {
            design.options = design.options.include_frames(true);
        }
        let centerline = generate(&design).map_err(|e| e.to_string())?;
        let json = serde_json::to_string_pretty(&centerline).map_err(|e| e.to_string())?;
        println!("{json}");
        eprintln!("{}: points={}", centerline.family, centerline.path.len());
        Ok(())
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let scenario_name = args.next().ok_or("missing scenario name")?;

        let mut out_dir: Option<PathBuf> = None;
        let mut obj_path: Option<PathBuf> = None;
        let mut snap_path: Option<PathBuf> = None;
        let mut overwrite = false;
        let mut write_obj = true;
        let mut write_snap = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out-dir" => out_dir = Some(PathBuf::from(args.value("--out-dir")?)),
                "--obj" => obj_path = Some(PathBuf::from(args.value("--obj")?)),
                "--snap" => snap_path = Some(PathBuf::from(args.value("--snap")?)),
                "--overwrite" => overwrite = true,
                "--no-obj" => write_obj = false,
                "--no-snap" => write_snap = false,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        if let Some(dir) = out_dir.as_ref() {
            if obj_path.is_some() || snap_path.is_some() {
                return Err("use either --out-dir or --obj/--snap (not both)".to_string());
            }
            if !write_obj && !write_snap {
                return Err("nothing to write (both --no-obj and --no-snap set)".to_string());
            }

            fs::create_dir_all(dir).map_err(|e| format!("create out dir: {e}"))?;

            if scenario_name == "all" {
                for scenario in Scenario::ALL {
                    run_one_scenario_to_dir(*scenario, dir, write_obj, write_snap, overwrite)?;
                }
                return Ok(());
            }

            let scenario = Scenario::from_str(scenario_name.as_str())
                .ok_or_else(|| unknown_scenario(&scenario_name))?;
            return run_one_scenario_to_dir(scenario, dir, write_obj, write_snap, overwrite);
        }

        if scenario_name == "all" {
            return Err("`run all` requires --out-dir".to_string());
        }

        let scenario = Scenario::from_str(scenario_name.as_str())
            .ok_or_else(|| unknown_scenario(&scenario_name))?;
        let output = run_scenario(scenario)?;

        if let Some(path) = snap_path.as_deref() {
            write_text_file(path, &output.snapshot, overwrite)?;
            eprintln!("wrote {}", path.display());
        } else {
            print!("{}", output.snapshot);
        }

        if let Some(path) = obj_path.as_deref() {
            write_obj_file(path, output.centerline.path.points(), output.name, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        eprintln!("{}", summary_line(&output));
        Ok(())
    }

    fn run_one_scenario_to_dir(
        scenario: Scenario,
        dir: &Path,
        write_obj: bool,
        write_snap: bool,
        overwrite: bool,
    ) -> Result<(), String> {
        let output = run_scenario(scenario)?;

        if write_snap {
            let path = dir.join(format!("{}.snap", output.name));
            write_text_file(&path, &output.snapshot, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        if write_obj {
            let path = dir.join(format!("{}.obj", output.name));
            write_obj_file(&path, output.centerline.path.points(), output.name, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        eprintln!("{}", summary_line(&output));
        Ok(())
    }

    fn summary_line(output: &ScenarioOutput) -> String {
        let centerline = &output.centerline;
        let (lo, hi) = centerline.path.z_range();
        let mut line = format!(
            "{}: family={} points={} sections={} z=[{lo:.3}, {hi:.3}]",
            output.name,
            centerline.family,
            centerline.path.len(),
            centerline.path.sections().len(),
        );
        if let Some(factors) = SpringFactors::for_spring(&centerline.spring) {
            let _ = write!(line, " | C={:.3} wahl={:.4}", factors.index, factors.wahl);
        }
        line
    }

    fn unknown_scenario(name: &str) -> String {
        let mut msg = String::new();
        let _ = writeln!(msg, "unknown scenario `{name}`\n\navailable scenarios:");
        for scenario in Scenario::ALL {
            let _ = writeln!(msg, "  {}", scenario.name());
        }
        msg
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        fs::write(path, normalize_snapshot_text(text)).map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn write_obj_file(path: &Path, points: &[Point3], name: &str, overwrite: bool) -> Result<(), String> {
        if points.len() < 2 {
            return Err(format!("{name}: centerline needs at least two points"));
        }
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }

        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        let mut w = BufWriter::new(file);

        writeln!(w, "# spring-engine spring_cli").map_err(|e| format!("write obj: {e}"))?;
        writeln!(w, "o {name}").map_err(|e| format!("write obj: {e}"))?;

        for p in points {
            writeln!(w, "v {} {} {}", p.x, p.y, p.z).map_err(|e| format!("write obj: {e}"))?;
        }

        // One polyline element through every vertex, 1-based.
        let mut line = String::from("l");
        for index in 1..=points.len() {
            let _ = write!(line, " {index}");
        }
        writeln!(w, "{line}").map_err(|e| format!("write obj: {e}"))?;

        w.flush().map_err(|e| format!("flush {}: {e}", path.display()))
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
        normalize_snapshot_text(&out)
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Scenario {
        CompressionReference,
        CompressionUniform,
        ExtensionMachineHooks,
        ExtensionDoubleLoop,
        TorsionTangentialLegs,
        ConicalReference,
        ArcBarrel,
        SpiralTorsionReference,
        WaveSingleRing,
        WaveStack,
    }

    impl Scenario {
        const ALL: &'static [Scenario] = &[
            Scenario::CompressionReference,
            Scenario::CompressionUniform,
            Scenario::ExtensionMachineHooks,
            Scenario::ExtensionDoubleLoop,
            Scenario::TorsionTangentialLegs,
            Scenario::ConicalReference,
            Scenario::ArcBarrel,
            Scenario::SpiralTorsionReference,
            Scenario::WaveSingleRing,
            Scenario::WaveStack,
        ];

        fn name(self) -> &'static str {
            match self {
                Scenario::CompressionReference => "compression_reference",
                Scenario::CompressionUniform => "compression_uniform",
                Scenario::ExtensionMachineHooks => "extension_machine_hooks",
                Scenario::ExtensionDoubleLoop => "extension_double_loop",
                Scenario::TorsionTangentialLegs => "torsion_tangential_legs",
                Scenario::ConicalReference => "conical_reference",
                Scenario::ArcBarrel => "arc_barrel",
                Scenario::SpiralTorsionReference => "spiral_torsion_reference",
                Scenario::WaveSingleRing => "wave_single_ring",
                Scenario::WaveStack => "wave_stack",
            }
        }

        fn from_str(name: &str) -> Option<Self> {
            Self::ALL.iter().copied().find(|scenario| scenario.name() == name)
        }

        fn design(self) -> SpringDesign {
            match self {
                Scenario::CompressionReference => compression_design(),
                Scenario::CompressionUniform => compression_design().with_options(
                    GenerationOptions::new()
                        .pitch_strategy(spring_engine::spring::PitchStrategy::Uniform),
                ),
                Scenario::ExtensionMachineHooks => extension_design("machine"),
                Scenario::ExtensionDoubleLoop => extension_design("doubleLoop"),
                Scenario::TorsionTangentialLegs => SpringDesign::new(SpringParameters::Torsion(TorsionInput {
                    wire_diameter: Some(1.5),
                    mean_diameter: Some(12.0),
                    active_coils: Some(6.0),
                    leg_length1: Some(25.0),
                    leg_length2: Some(25.0),
                    ..TorsionInput::default()
                })),
                Scenario::ConicalReference => SpringDesign::new(SpringParameters::Conical(ConicalInput {
                    wire_diameter: Some(2.0),
                    large_outer_diameter: Some(30.0),
                    small_outer_diameter: Some(15.0),
                    active_coils: Some(6.0),
                    total_coils: Some(8.0),
                    free_length: Some(40.0),
                    ..ConicalInput::default()
                })),
                Scenario::ArcBarrel => SpringDesign::new(SpringParameters::Arc(ArcInput {
                    wire_diameter: Some(4.0),
                    mean_diameter: Some(30.0),
                    active_coils: Some(6.0),
                    arc_radius: Some(135.0),
                    alpha_deg: Some(60.0),
                    profile: Some("barrel".to_string()),
                    mid_mean_diameter: Some(34.0),
                    ..ArcInput::default()
                })),
                Scenario::SpiralTorsionReference => {
                    SpringDesign::new(SpringParameters::SpiralTorsion(SpiralTorsionInput {
                        inner_diameter: Some(15.0),
                        outer_diameter: Some(50.0),
                        turns: Some(5.0),
                        strip_width: Some(10.0),
                        strip_thickness: Some(0.8),
                        ..SpiralTorsionInput::default()
                    }))
                }
                Scenario::WaveSingleRing => wave_design(1.0, 5.0),
                Scenario::WaveStack => wave_design(3.0, 10.0),
            }
        }
    }

    fn compression_design() -> SpringDesign {
        SpringDesign::new(SpringParameters::Compression(CompressionInput {
            wire_diameter: Some(3.2),
            mean_diameter: Some(24.0),
            active_coils: Some(8.0),
            total_coils: Some(10.0),
            free_length: Some(50.0),
            ..CompressionInput::default()
        }))
    }

    fn extension_design(hook_type: &str) -> SpringDesign {
        SpringDesign::new(SpringParameters::Extension(ExtensionInput {
            wire_diameter: Some(2.0),
            outer_diameter: Some(18.0),
            active_coils: Some(12.0),
            free_length: Some(60.0),
            hook_type: Some(hook_type.to_string()),
            ..ExtensionInput::default()
        }))
    }

    fn wave_design(turns: f64, free_height: f64) -> SpringDesign {
        SpringDesign::new(SpringParameters::Wave(WaveInput {
            inner_diameter: Some(20.0),
            outer_diameter: Some(30.0),
            thickness: Some(0.5),
            waves_per_turn: Some(3.5),
            turns: Some(turns),
            free_height: Some(free_height),
            ..WaveInput::default()
        }))
    }

    struct ScenarioOutput {
        name: &'static str,
        centerline: SpringCenterline,
        snapshot: String,
    }

    fn run_scenario(scenario: Scenario) -> Result<ScenarioOutput, String> {
        let name = scenario.name();
        let centerline = generate(&scenario.design()).map_err(|e| format!("{name}: {e}"))?;
        let snap = snapshot(name, |out| write_centerline(out, &centerline));
        Ok(ScenarioOutput {
            name,
            centerline,
            snapshot: snap,
        })
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
