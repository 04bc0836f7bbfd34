use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// Helper function to run the blendopt binary
fn run_blendopt(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_blendopt"))
        .args(args)
        .output()
        .expect("Failed to run blendopt")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are valid UTF-8")
}

// Helper function to write the canonical dataset, optionally edited, into a temp dir
fn write_dataset(edit: impl FnOnce(&mut serde_json::Value)) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("oils.json");

    let output = run_blendopt(&["dataset", "--output", path_arg(&path)]);
    assert!(
        output.status.success(),
        "dataset should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let mut json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("Failed to read dataset"))
            .expect("dataset should be JSON");
    edit(&mut json);
    fs::write(&path, serde_json::to_string_pretty(&json).expect("serialise"))
        .expect("Failed to write dataset");

    (temp_dir, path)
}

#[cfg(test)]
mod dataset_command_tests {
    use super::*;

    /// The exported dataset carries the whole food manufacture problem
    #[test]
    fn test_dataset_export() {
        let (_temp_dir, path) = write_dataset(|_| {});
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(json["periods"].as_array().unwrap().len(), 6);
        assert_eq!(json["materials"].as_array().unwrap().len(), 5);
        assert_eq!(json["records"].as_array().unwrap().len(), 30);
        assert_eq!(json["sale_price"], 150.0);
        assert_eq!(json["spec"]["min_lot"], 20.0);
        assert_eq!(json["spec"]["max_distinct"], 3);
    }

    /// Without --output the dataset goes to stdout
    #[test]
    fn test_dataset_to_stdout() {
        let output = run_blendopt(&["dataset"]);
        assert!(output.status.success());

        let json: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
        assert_eq!(json["materials"][0]["id"], "VEG1");
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    /// An inverted quality band is rejected before any solver runs
    #[test]
    fn test_inverted_band_fails_validation() {
        let (_temp_dir, path) = write_dataset(|json| {
            json["spec"]["quality_lower"] = 7.0.into();
        });

        let output = run_blendopt(&["solve", path_arg(&path)]);
        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("quality band is inverted"),
            "unexpected stderr: {stderr}"
        );
    }

    #[test]
    fn test_negative_cost_fails_validation() {
        let (_temp_dir, path) = write_dataset(|json| {
            json["records"][4]["cost"] = (-10.0).into();
        });

        let output = run_blendopt(&["solve", path_arg(&path)]);
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("non-negative"));
    }

    #[test]
    fn test_missing_input_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("absent.json");

        let output = run_blendopt(&["solve", path_arg(&missing)]);
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("absent.json"));
    }

    #[test]
    fn test_invalid_time_limit() {
        let output = run_blendopt(&["solve", "--relaxed", "-t", "-5"]);
        assert!(!output.status.success());
    }
}

#[cfg(any(feature = "microlp", feature = "coin_cbc", feature = "gurobi"))]
#[cfg(test)]
mod solve_command_tests {
    use super::*;

    fn profit_from(report: &str) -> f64 {
        let line = report
            .lines()
            .find(|line| line.starts_with("Total Profit: £"))
            .expect("report should state the profit");
        line.trim_start_matches("Total Profit: £")
            .replace(',', "")
            .parse()
            .expect("profit should be a number")
    }

    /// The relaxed LP on the built-in data, report on stdout
    #[test]
    fn test_relaxed_solve_to_stdout() {
        let output = run_blendopt(&["solve", "--relaxed"]);
        assert!(
            output.status.success(),
            "solve should succeed. stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let report = String::from_utf8_lossy(&output.stdout);
        assert!(report.contains("Status: optimal"));
        assert!((profit_from(&report) - 107_842.59).abs() < 0.01);
        for heading in [
            "Refining Plan (Tons Used):",
            "Buying Plan (Tons Bought):",
            "Closing Stock (Tons):",
            "Blend Quality:",
        ] {
            assert!(report.contains(heading), "missing {heading}");
        }
    }

    /// The full problem with logical rules, report and CSV to files
    #[test]
    fn test_integer_solve_to_files() {
        let (temp_dir, path) = write_dataset(|_| {});
        let report_path = temp_dir.path().join("plan.rpt");
        let csv_path = temp_dir.path().join("plan.csv");

        let output = run_blendopt(&[
            "solve",
            path_arg(&path),
            "--report",
            path_arg(&report_path),
            "--csv",
            path_arg(&csv_path),
        ]);
        assert!(
            output.status.success(),
            "solve should succeed. stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let report = fs::read_to_string(&report_path).expect("Failed to read report");
        assert_eq!(profit_from(&report).round(), 100_279.0);

        let csv = fs::read_to_string(&csv_path).expect("Failed to read CSV");
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("material,period,buy,use,stock"));

        let mut closing = 0;
        for line in lines {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), 5, "bad CSV line {line}");
            let usage: f64 = fields[3].parse().unwrap();
            assert!(usage == 0.0 || usage >= 20.0 - 1e-3, "lot too small: {line}");
            if fields[1] == "6" {
                let stock: f64 = fields[4].parse().unwrap();
                assert!((stock - 500.0).abs() < 1e-3);
                closing += 1;
            }
        }
        assert_eq!(closing, 5);
    }

    /// Opening stock must be refined but no oil reaches the band
    #[test]
    fn test_infeasible_is_reported() {
        let (_temp_dir, path) = write_dataset(|json| {
            json["spec"]["quality_lower"] = 9.0.into();
            json["spec"]["quality_upper"] = 10.0.into();
            for material in json["materials"].as_array_mut().unwrap() {
                material["final_stock"] = 0.0.into();
            }
        });

        let output = run_blendopt(&["solve", path_arg(&path), "--relaxed"]);
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("Status: infeasible"));
        assert!(String::from_utf8_lossy(&output.stderr).contains("Problem infeasible"));
    }
}
