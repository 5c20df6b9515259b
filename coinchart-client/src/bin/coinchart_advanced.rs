use std::process::ExitCode;

use coinchart_client::cli::run;
use coinchart_client::layout::ChartLayout;

fn main() -> ExitCode {
    run(ChartLayout::Advanced)
}
