/// End-to-end tests for the `dice_calculator` tool: output and exit codes.

use dice_calculator::cli::args::{parse_args, Invocation};
use dice_calculator::core::report::{load_report, Report};
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dice_calculator"))
        .args(args)
        .output()
        .expect("failed to run dice_calculator")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn no_arguments_prints_usage() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("Usage: dice_calculator"));
}

#[test]
fn full_report_for_two_d6() {
    let output = run(&["1d6", "1d6", "-s:7", "-s:2"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);

    assert!(text.contains("Dice Rolled: 2d6"));
    assert!(text.contains("Combinations: 36"));
    assert!(text.contains("Average Sum: 7.00"));
    assert!(text.contains("|   7 |     6 |   16.67% |"));
    assert!(text.contains("|  12 |     1 |    2.78% |"));

    let two = text.find("sum of 2 or higher: 100.00%").unwrap();
    let seven = text.find("sum of 7 or higher: 58.33%").unwrap();
    assert!(two < seven, "chances should be sorted by target");
}

#[test]
fn canonical_dice_string() {
    let output = run(&["1d6", "1d6", "1d4"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("Dice Rolled: 2d6 1d4\nModifier: +0\n"));
}

#[test]
fn quick_mode_prints_statistics_only() {
    let output = run(&["100d100", "-q"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "\
Combinations: more than 18446744073709551615
Average Sum: 5050.00
Standard Deviation: 288.66
Standard Deviation Range: 4761.34 to 5338.66
"
    );
}

#[test]
fn failures_exit_with_one_and_print_nothing() {
    for args in [
        vec!["2d6", "nope"],
        vec!["+3"],
        vec!["1d6", "+three"],
        vec!["1d6", "-s:x"],
        vec!["1d6", "-q", "-s:3"],
        vec!["1d0"],
        vec!["1d6", "+9223372036854775807"],
        vec!["4000000000d6", "-q"],
        vec!["100d100"],
    ] {
        let output = run(&args);
        assert_eq!(output.status.code(), Some(1), "args {:?}", args);
        assert!(output.stdout.is_empty(), "args {:?}", args);
        assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR"));
    }
}

#[test]
fn output_file_round_trips() {
    let path = std::path::PathBuf::from("target/cli_test_report.ron");
    let path_arg = path.to_string_lossy().to_string();

    let output = run(&["1d20", "+5", "-s:21", "--output", &path_arg]);
    assert_eq!(output.status.code(), Some(0));

    let report = load_report(&path).unwrap();
    assert_eq!(report.dice, "1d20");
    assert_eq!(report.modifier, 5);
    assert_eq!(report.rows.first().map(|r| r.sum), Some(6));
    assert_eq!(report.rows.last().map(|r| r.sum), Some(25));
    assert!((report.chances[0].percent - 25.0).abs() < 1e-9);

    // Cleanup
    let _ = std::fs::remove_file(&path);
}

#[test]
fn parsed_options_feed_the_report() {
    let options = match parse_args(["2d6", "-1", "-s:6"]).unwrap() {
        Invocation::Calculate(options) => options,
        Invocation::Help => panic!("expected a calculation"),
    };
    let report = Report::calculate(&options.pool, options.modifier, &options.targets, options.quick);
    assert_eq!(report.rows.first().map(|r| r.sum), Some(1));
    assert!((report.chances[0].percent - 21.0 / 36.0 * 100.0).abs() < 1e-9);
}
