/// Dice Calculator — prints the full sum distribution of a dice pool.
///
/// Usage: dice_calculator <dice>... [+n|-n]... [-s:n]... [-q] [--output <file.ron>]
///
/// Example: dice_calculator 2d20 1d6 1d4 +3 -s:25 -s:30
use dice_calculator::cli::args::{parse_args, Invocation, USAGE};
use dice_calculator::core::report::{save_report, Report};
use std::process;

fn main() {
    env_logger::init();

    let invocation = parse_args(std::env::args().skip(1)).unwrap_or_else(|e| {
        eprintln!("ERROR: {}", e);
        process::exit(1);
    });

    let options = match invocation {
        Invocation::Help => {
            println!("{}", USAGE);
            return;
        }
        Invocation::Calculate(options) => options,
    };

    let report = Report::calculate(
        &options.pool,
        options.modifier,
        &options.targets,
        options.quick,
    );

    if let Some(ref path) = options.output {
        save_report(&report, path).unwrap_or_else(|e| {
            eprintln!("ERROR saving report to '{}': {}", path.display(), e);
            process::exit(1);
        });
        log::info!("report saved to '{}'", path.display());
    }

    print!("{}", report.render());
}
